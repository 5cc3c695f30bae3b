//! Code emission: a validated program becomes an equivalent Go source file.
//!
//! The emitted program wraps all top-level statements in `func main()`,
//! indents with one tab per nesting depth, and parenthesizes every compound
//! expression so operator precedence never depends on the target language.
//! Emission is deterministic: the same AST always yields byte-identical
//! output, and it never fails on a program the analyzer accepted.

use crate::ast::{Block, Expr, Program, Statement};

pub struct Emitter {
    out: String,
}

/// Emits the Go translation of a validated program.
pub fn emit(program: &Program) -> String {
    Emitter::new().emit(program)
}

impl Emitter {
    pub fn new() -> Self {
        Emitter { out: String::new() }
    }

    pub fn emit(mut self, program: &Program) -> String {
        self.out
            .push_str("package main\n\nimport \"fmt\"\n\nfunc main() {\n");

        for stmt in &program.statements {
            self.statement(stmt, 1);
        }

        self.out.push_str("}\n");
        self.out
    }

    fn push_indent(&mut self, indent: usize) {
        for _ in 0..indent {
            self.out.push('\t');
        }
    }

    fn statement(&mut self, stmt: &Statement, indent: usize) {
        match stmt {
            Statement::VarDecl {
                is_const,
                name,
                value,
                ..
            } => {
                let keyword = if *is_const { "const" } else { "var" };
                let value = self.expression(value);
                self.push_indent(indent);
                self.out
                    .push_str(&format!("{} {} = {}\n", keyword, name, value));
            }

            Statement::Assignment {
                targets, values, ..
            } => {
                let values: Vec<String> = values.iter().map(|v| self.expression(v)).collect();
                self.push_indent(indent);
                self.out
                    .push_str(&format!("{} = {}\n", targets.join(", "), values.join(", ")));
            }

            Statement::Say { args, .. } => {
                let args: Vec<String> = args.iter().map(|a| self.expression(a)).collect();
                self.push_indent(indent);
                self.out
                    .push_str(&format!("fmt.Println({})\n", args.join(", ")));
            }

            Statement::If {
                condition,
                consequence,
                alternative,
                ..
            } => {
                self.push_indent(indent);
                self.if_chain(condition, consequence, alternative.as_deref(), indent);
                self.out.push('\n');
            }

            Statement::For {
                iterator,
                start,
                end,
                body,
                ..
            } => {
                let start = self.expression(start);
                let end = self.expression(end);
                self.push_indent(indent);
                self.out.push_str(&format!(
                    "for {it} := {start}; {it} < {end}; {it}++ {{\n",
                    it = iterator
                ));
                self.block(body, indent + 1);
                self.push_indent(indent);
                self.out.push_str("}\n");
            }

            Statement::Return { value, .. } => {
                let value = value.as_ref().map(|v| self.expression(v));
                self.push_indent(indent);
                match value {
                    Some(value) => self.out.push_str(&format!("return {}\n", value)),
                    None => self.out.push_str("return\n"),
                }
            }

            Statement::Break { .. } => {
                self.push_indent(indent);
                self.out.push_str("break\n");
            }

            Statement::Continue { .. } => {
                self.push_indent(indent);
                self.out.push_str("continue\n");
            }

            Statement::Block(block) => self.block(block, indent),
        }
    }

    /// Emits `if COND { ... }` followed by its `else if` / `else` arms.
    ///
    /// The caller has already written the leading indent; the trailing
    /// newline is written once, after the whole chain.
    fn if_chain(
        &mut self,
        condition: &Expr,
        consequence: &Block,
        alternative: Option<&Statement>,
        indent: usize,
    ) {
        let condition = self.expression(condition);
        self.out.push_str(&format!("if {} {{\n", condition));
        self.block(consequence, indent + 1);
        self.push_indent(indent);
        self.out.push('}');

        match alternative {
            Some(Statement::If {
                condition,
                consequence,
                alternative,
                ..
            }) => {
                self.out.push_str(" else ");
                self.if_chain(condition, consequence, alternative.as_deref(), indent);
            }
            Some(Statement::Block(block)) => {
                self.out.push_str(" else {\n");
                self.block(block, indent + 1);
                self.push_indent(indent);
                self.out.push('}');
            }
            _ => {}
        }
    }

    /// Blocks add no braces of their own; the enclosing statement decides
    /// the indent.
    fn block(&mut self, block: &Block, indent: usize) {
        for stmt in &block.statements {
            self.statement(stmt, indent);
        }
    }

    fn expression(&self, expr: &Expr) -> String {
        match expr {
            Expr::Integer { value, .. } => value.to_string(),
            // Go's default fixed format: six decimal places.
            Expr::Float { value, .. } => format!("{:.6}", value),
            Expr::Str { value, .. } => format!("\"{}\"", value),
            Expr::Boolean { value, .. } => value.to_string(),
            Expr::Identifier { name, .. } => name.clone(),
            Expr::Prefix { op, right, .. } => format!("({}{})", op, self.expression(right)),
            Expr::Infix {
                op, left, right, ..
            } => format!(
                "({} {} {})",
                self.expression(left),
                op,
                self.expression(right)
            ),
        }
    }
}

impl Default for Emitter {
    fn default() -> Self {
        Emitter::new()
    }
}
