use crate::ast::{BinOp, Block, Expr, Precedence, Program, Statement, Token, TokenKind, UnOp};
use crate::diagnostics::{Diagnostic, ErrorCode};

/// Recursive-descent parser with a Pratt expression core.
///
/// The parser owns the fully-lexed token vector and walks it with an index
/// cursor. It is total: it always returns a [`Program`], with every syntax
/// problem collected as a diagnostic instead of a failure. A statement that
/// cannot be completed bubbles up as `None` and the top-level loop advances
/// one token so parsing always makes progress.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    errors: Vec<Diagnostic>,
}

/// Parses a token sequence into a program plus its syntax diagnostics.
pub fn parse(tokens: Vec<Token>) -> (Program, Vec<Diagnostic>) {
    Parser::new(tokens).parse()
}

impl Parser {
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if tokens.last().map(|t| t.kind) != Some(TokenKind::Eof) {
            let (line, col) = tokens
                .last()
                .map(|t| (t.line, t.col))
                .unwrap_or((1, 1));
            tokens.push(Token::new(TokenKind::Eof, "", line, col));
        }

        Parser {
            tokens,
            pos: 0,
            errors: Vec::new(),
        }
    }

    /// Consumes the parser and produces the program and all syntax errors.
    pub fn parse(mut self) -> (Program, Vec<Diagnostic>) {
        let mut program = Program::default();

        while !self.check(TokenKind::Eof) {
            match self.parse_statement() {
                Some(stmt) => program.statements.push(stmt),
                None => {
                    self.advance();
                }
            }
        }

        (program, self.errors)
    }

    // Cursor primitives

    fn current(&self) -> &Token {
        // The vector always ends with Eof and the cursor never passes it.
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn previous(&self) -> &Token {
        &self.tokens[self.pos.saturating_sub(1)]
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.current().kind == kind
    }

    /// Returns the current token and moves forward, sticking at end-of-file.
    fn advance(&mut self) -> Token {
        let token = self.current().clone();

        if token.kind != TokenKind::Eof {
            self.pos += 1;
        }

        token
    }

    /// Consumes the current token iff its kind is one of the given ones.
    fn matches(&mut self, kinds: &[TokenKind]) -> bool {
        if kinds.contains(&self.current().kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consumes a token of the expected kind, or records a syntax error
    /// pointing at the offending token and yields `None`.
    fn consume(&mut self, kind: TokenKind, message: &str) -> Option<Token> {
        if self.check(kind) {
            return Some(self.advance());
        }

        let found = self.current().clone();
        self.errors.push(Diagnostic::error(
            ErrorCode::SyntaxError,
            &found,
            format!("{}, found '{}'", message, found.lexeme),
        ));

        None
    }

    fn error_at(&mut self, token: &Token, message: String) {
        self.errors
            .push(Diagnostic::error(ErrorCode::SyntaxError, token, message));
    }

    // Statements

    fn parse_statement(&mut self) -> Option<Statement> {
        match self.current().kind {
            TokenKind::KwVar => self.parse_var_decl(false),
            TokenKind::KwConst => self.parse_var_decl(true),
            TokenKind::KwIf => self.parse_if(),
            TokenKind::KwFor => self.parse_for(),
            TokenKind::LBrace => self.parse_block().map(Statement::Block),
            TokenKind::KwReturn => self.parse_return(),
            TokenKind::KwBreak => {
                let token = self.advance();
                Some(Statement::Break { token })
            }
            TokenKind::KwContinue => {
                let token = self.advance();
                Some(Statement::Continue { token })
            }
            TokenKind::Ident if self.current().lexeme == "say" => self.parse_say(),
            TokenKind::Ident => self.parse_assignment(),
            _ => None,
        }
    }

    fn parse_var_decl(&mut self, is_const: bool) -> Option<Statement> {
        let token = self.advance();

        let name = self.consume(TokenKind::Ident, "expected variable name")?;

        // Whatever follows ':' is captured verbatim as the declared type;
        // the analyzer is the one that judges it.
        let declared_type = if self.matches(&[TokenKind::Colon]) {
            Some(self.advance().lexeme)
        } else {
            None
        };

        self.consume(TokenKind::Assign, "expected '=' after declaration")?;

        let value = self.parse_expression(Precedence::Assignment)?;

        Some(Statement::VarDecl {
            token,
            is_const,
            name: name.lexeme,
            declared_type,
            value,
        })
    }

    fn parse_assignment(&mut self) -> Option<Statement> {
        let token = self.current().clone();
        let mut targets = vec![self.advance().lexeme];

        while self.matches(&[TokenKind::Comma]) {
            let target = self.consume(TokenKind::Ident, "expected identifier after ','")?;
            targets.push(target.lexeme);
        }

        self.consume(TokenKind::Assign, "expected '=' in assignment")?;

        let mut values = vec![self.parse_expression(Precedence::Assignment)?];

        while self.matches(&[TokenKind::Comma]) {
            values.push(self.parse_expression(Precedence::Assignment)?);
        }

        Some(Statement::Assignment {
            token,
            targets,
            values,
        })
    }

    fn parse_say(&mut self) -> Option<Statement> {
        let token = self.advance();

        self.consume(TokenKind::LParen, "expected '(' after 'say'")?;

        let args = self.parse_expression_list(TokenKind::RParen)?;

        Some(Statement::Say { token, args })
    }

    fn parse_block(&mut self) -> Option<Block> {
        let token = self.consume(TokenKind::LBrace, "expected '{'")?;
        let mut statements = Vec::new();

        while !self.check(TokenKind::RBrace) && !self.check(TokenKind::Eof) {
            match self.parse_statement() {
                Some(stmt) => statements.push(stmt),
                None => {
                    self.advance();
                }
            }
        }

        self.consume(TokenKind::RBrace, "expected '}' after block")?;

        Some(Block { token, statements })
    }

    fn parse_if(&mut self) -> Option<Statement> {
        let token = self.advance();

        let condition = self.parse_expression(Precedence::None)?;
        let consequence = self.parse_block()?;

        let alternative = if self.matches(&[TokenKind::KwElse]) {
            if self.check(TokenKind::KwIf) {
                Some(Box::new(self.parse_if()?))
            } else {
                Some(Box::new(Statement::Block(self.parse_block()?)))
            }
        } else {
            None
        };

        Some(Statement::If {
            token,
            condition,
            consequence,
            alternative,
        })
    }

    fn parse_for(&mut self) -> Option<Statement> {
        let token = self.advance();

        let iterator = self.consume(TokenKind::Ident, "expected loop iterator name")?;
        self.consume(TokenKind::KwIn, "expected 'in' after loop iterator")?;

        let start = self.parse_expression(Precedence::Assignment)?;
        self.consume(TokenKind::Range, "expected '..' in range")?;
        let end = self.parse_expression(Precedence::Assignment)?;

        let body = self.parse_block()?;

        Some(Statement::For {
            token,
            iterator: iterator.lexeme,
            start,
            end,
            body,
        })
    }

    fn parse_return(&mut self) -> Option<Statement> {
        let token = self.advance();

        let value = if self.check(TokenKind::RBrace) || self.check(TokenKind::Eof) {
            None
        } else {
            Some(self.parse_expression(Precedence::None)?)
        };

        Some(Statement::Return { token, value })
    }

    // Expressions

    /// Pratt loop: parse a prefix, then fold in infix operators while their
    /// binding power exceeds the entry level. Equal power stops the loop,
    /// which makes every infix operator left-associative.
    fn parse_expression(&mut self, precedence: Precedence) -> Option<Expr> {
        let mut left = self.parse_prefix()?;

        while precedence < Precedence::of(self.current().kind) {
            self.advance();
            left = self.parse_infix(left)?;
        }

        Some(left)
    }

    fn parse_prefix(&mut self) -> Option<Expr> {
        let token = self.advance();

        match token.kind {
            TokenKind::Ident => Some(Expr::Identifier {
                name: token.lexeme.clone(),
                token,
            }),
            TokenKind::Int => match token.lexeme.parse::<i64>() {
                Ok(value) => Some(Expr::Integer { token, value }),
                Err(_) => {
                    self.error_at(
                        &token,
                        format!("integer literal '{}' is out of range", token.lexeme),
                    );
                    None
                }
            },
            TokenKind::Float => {
                let value = token.lexeme.parse::<f64>().unwrap_or(0.0);
                Some(Expr::Float { token, value })
            }
            TokenKind::Str => Some(Expr::Str {
                value: token.lexeme.clone(),
                token,
            }),
            TokenKind::KwTrue | TokenKind::KwFalse => Some(Expr::Boolean {
                value: token.kind == TokenKind::KwTrue,
                token,
            }),
            TokenKind::Minus => {
                let right = self.parse_expression(Precedence::Unary)?;
                Some(Expr::Prefix {
                    token,
                    op: UnOp::Neg,
                    right: Box::new(right),
                })
            }
            TokenKind::LParen => {
                let expr = self.parse_expression(Precedence::None)?;
                self.consume(TokenKind::RParen, "expected ')' after expression")?;
                Some(expr)
            }
            _ => {
                self.error_at(&token, format!("unexpected token '{}'", token.lexeme));
                None
            }
        }
    }

    fn parse_infix(&mut self, left: Expr) -> Option<Expr> {
        let token = self.previous().clone();

        let op = BinOp::from_token(token.kind)?;

        let right = self.parse_expression(Precedence::of(token.kind))?;

        Some(Expr::Infix {
            token,
            op,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    fn parse_expression_list(&mut self, end: TokenKind) -> Option<Vec<Expr>> {
        let mut list = Vec::new();

        if self.check(end) {
            self.advance();
            return Some(list);
        }

        list.push(self.parse_expression(Precedence::Assignment)?);

        while self.matches(&[TokenKind::Comma]) {
            list.push(self.parse_expression(Precedence::Assignment)?);
        }

        self.consume(end, "expected closing delimiter")?;

        Some(list)
    }
}
