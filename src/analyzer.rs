//! Semantic analysis: scoped symbol resolution and type checking.
//!
//! The analyzer walks the program once, tracking variable types in a stack
//! of scopes, and collects every semantic problem as a diagnostic. Types are
//! identified by their canonical name strings (`int`, `float`, `str`,
//! `bool`); the internal `unknown` type suppresses cascading errors once a
//! subexpression has already been reported.

use std::collections::HashMap;

use crate::ast::{BinOp, Block, Expr, Program, Statement, Token, UnOp};
use crate::diagnostics::{Diagnostic, ErrorCode};

/// A stack of scopes, each mapping identifiers to type names.
///
/// Lookup searches inner-to-outer; definition inserts into the innermost
/// scope. Blocks push on entry and pop on exit, so the chain never outlives
/// the analysis pass.
struct Environment {
    scopes: Vec<HashMap<String, String>>,
}

impl Environment {
    fn new() -> Self {
        Environment {
            scopes: vec![HashMap::new()],
        }
    }

    fn push_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    fn pop_scope(&mut self) {
        self.scopes.pop();
    }

    fn define(&mut self, name: &str, data_type: &str) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name.to_string(), data_type.to_string());
        }
    }

    fn resolve(&self, name: &str) -> Option<&str> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.get(name).map(String::as_str))
    }

    /// Re-declaration checks look only at the innermost scope; shadowing an
    /// outer binding is allowed.
    fn defined_in_current(&self, name: &str) -> bool {
        self.scopes
            .last()
            .is_some_and(|scope| scope.contains_key(name))
    }
}

/// Single-pass semantic checker.
pub struct Analyzer {
    env: Environment,
    errors: Vec<Diagnostic>,
}

/// Analyzes a program and returns its semantic diagnostics.
///
/// The program itself is never mutated, and a fresh environment is built per
/// call, so analyzing twice yields identical results.
pub fn analyze(program: &Program) -> Vec<Diagnostic> {
    Analyzer::new().analyze(program)
}

impl Analyzer {
    pub fn new() -> Self {
        Analyzer {
            env: Environment::new(),
            errors: Vec::new(),
        }
    }

    pub fn analyze(mut self, program: &Program) -> Vec<Diagnostic> {
        for stmt in &program.statements {
            self.statement(stmt);
        }

        self.errors
    }

    fn statement(&mut self, stmt: &Statement) {
        match stmt {
            Statement::VarDecl {
                token,
                name,
                declared_type,
                value,
                ..
            } => self.var_decl(token, name, declared_type.as_deref(), value),
            Statement::Assignment {
                token,
                targets,
                values,
            } => {
                for target in targets {
                    if self.env.resolve(target).is_none() {
                        self.errors.push(Diagnostic::error(
                            ErrorCode::NameError,
                            token,
                            format!("undefined variable '{}'", target),
                        ));
                    }
                }

                for value in values {
                    self.expression(value);
                }
            }
            Statement::Say { args, .. } => {
                for arg in args {
                    self.expression(arg);
                }
            }
            Statement::If {
                token,
                condition,
                consequence,
                alternative,
            } => {
                let condition_type = self.expression(condition);

                if condition_type != "bool" && condition_type != "unknown" {
                    self.errors.push(Diagnostic::error(
                        ErrorCode::TypeError,
                        token,
                        format!(
                            "condition in 'if' statement must evaluate to a boolean, got '{}'",
                            condition_type
                        ),
                    ));
                }

                self.block(consequence);

                if let Some(alt) = alternative {
                    self.statement(alt);
                }
            }
            Statement::For {
                iterator,
                start,
                end,
                body,
                ..
            } => {
                // The iterator lives in a scope enclosing the body's own,
                // so the body may shadow it.
                self.env.push_scope();
                self.env.define(iterator, "int");

                self.expression(start);
                self.expression(end);

                self.block(body);
                self.env.pop_scope();
            }
            Statement::Return { value, .. } => {
                if let Some(value) = value {
                    self.expression(value);
                }
            }
            Statement::Block(block) => self.block(block),
            Statement::Break { .. } | Statement::Continue { .. } => {}
        }
    }

    fn block(&mut self, block: &Block) {
        self.env.push_scope();

        for stmt in &block.statements {
            self.statement(stmt);
        }

        self.env.pop_scope();
    }

    fn var_decl(
        &mut self,
        token: &Token,
        name: &str,
        declared_type: Option<&str>,
        value: &Expr,
    ) {
        if self.env.defined_in_current(name) {
            self.errors.push(Diagnostic::error(
                ErrorCode::NameError,
                token,
                format!("variable '{}' is already defined in this scope", name),
            ));
            return;
        }

        let declared_type = match declared_type {
            Some(t) => t,
            None => {
                self.errors.push(
                    Diagnostic::error(
                        ErrorCode::TypeError,
                        token,
                        format!(
                            "explicit type declaration is required for variable '{}'",
                            name
                        ),
                    )
                    .with_hint(format!("declare it as '{}: int' for example", name)),
                );
                return;
            }
        };

        let value_type = self.expression(value);

        if value_type != declared_type && value_type != "unknown" {
            self.errors.push(Diagnostic::error(
                ErrorCode::TypeError,
                token,
                format!(
                    "cannot assign type '{}' to variable of type '{}'",
                    value_type, declared_type
                ),
            ));
        }

        self.env.define(name, declared_type);
    }

    /// Types an expression, reporting problems along the way.
    ///
    /// An operand already typed `unknown` propagates silently so one broken
    /// subexpression does not drown the report in follow-up errors.
    fn expression(&mut self, expr: &Expr) -> String {
        match expr {
            Expr::Integer { .. } => "int".to_string(),
            Expr::Float { .. } => "float".to_string(),
            Expr::Str { .. } => "str".to_string(),
            Expr::Boolean { .. } => "bool".to_string(),
            Expr::Identifier { token, name } => match self.env.resolve(name) {
                Some(data_type) => data_type.to_string(),
                None => {
                    self.errors.push(Diagnostic::error(
                        ErrorCode::NameError,
                        token,
                        format!("undefined variable '{}'", name),
                    ));
                    "unknown".to_string()
                }
            },
            Expr::Prefix { token, op, right } => {
                let operand = self.expression(right);

                if operand == "unknown" {
                    return "unknown".to_string();
                }

                match op {
                    UnOp::Neg => {
                        if operand == "int" || operand == "float" {
                            operand
                        } else {
                            self.errors.push(Diagnostic::error(
                                ErrorCode::TypeError,
                                token,
                                format!("operator '-' requires a numeric operand, got '{}'", operand),
                            ));
                            "unknown".to_string()
                        }
                    }
                    UnOp::Not => {
                        if operand != "bool" {
                            self.errors.push(Diagnostic::error(
                                ErrorCode::TypeError,
                                token,
                                format!("operator '!' requires a boolean operand, got '{}'", operand),
                            ));
                        }
                        "bool".to_string()
                    }
                }
            }
            Expr::Infix {
                token,
                op,
                left,
                right,
            } => {
                let left_type = self.expression(left);
                let right_type = self.expression(right);

                if left_type == "unknown" || right_type == "unknown" {
                    return "unknown".to_string();
                }

                if op.is_comparison() {
                    if left_type != right_type {
                        self.errors.push(Diagnostic::error(
                            ErrorCode::TypeError,
                            token,
                            format!("cannot compare '{}' with '{}'", left_type, right_type),
                        ));
                    }
                    return "bool".to_string();
                }

                if left_type != right_type {
                    self.errors.push(Diagnostic::error(
                        ErrorCode::TypeError,
                        token,
                        format!(
                            "operator '{}' requires matching operand types, got '{}' and '{}'",
                            op, left_type, right_type
                        ),
                    ));
                    return "unknown".to_string();
                }

                // Strings only concatenate.
                if left_type == "str" && *op != BinOp::Add {
                    self.errors.push(Diagnostic::error(
                        ErrorCode::TypeError,
                        token,
                        format!("operator '{}' is not defined for 'str' operands", op),
                    ));
                    return "unknown".to_string();
                }

                left_type
            }
        }
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Analyzer::new()
    }
}
