use crate::ast::{lookup_keyword, Token, TokenKind};

/// Transforms source text into an ordered token sequence.
///
/// The lexer is total: malformed input produces [`TokenKind::Invalid`]
/// tokens, never a failure. Positions are 1-based; a newline advances the
/// line counter and resets the column.
pub struct Lexer {
    input: Vec<char>,
    pos: usize,
    line: usize,
    col: usize,
}

/// Lexes a whole source string.
///
/// The returned sequence always ends with exactly one end-of-file token.
pub fn tokenize(source: &str) -> Vec<Token> {
    Lexer::new(source).tokenize()
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            pos: 0,
            line: 1,
            col: 1,
        }
    }

    /// Drains the lexer into a token vector terminated by end-of-file.
    pub fn tokenize(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();

        loop {
            let token = self.next_token();
            let done = token.kind == TokenKind::Eof;
            tokens.push(token);

            if done {
                break;
            }
        }

        tokens
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.pos).copied()
    }

    fn peek_char(&self, offset: usize) -> Option<char> {
        self.input.get(self.pos + offset).copied()
    }

    /// Consumes the current character, updating line and column counters.
    fn advance(&mut self) -> Option<char> {
        let ch = self.current_char()?;
        self.pos += 1;

        if ch == '\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }

        Some(ch)
    }

    /// Consumes the current character only if it matches the expected one.
    fn matches(&mut self, expected: char) -> bool {
        if self.current_char() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Skips whitespace and `//` line comments between tokens.
    ///
    /// A comment runs up to but not including the next newline, so the
    /// newline itself still bumps the line counter here.
    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char() {
            match ch {
                ' ' | '\t' | '\r' | '\n' => {
                    self.advance();
                }
                '/' if self.peek_char(1) == Some('/') => {
                    while let Some(c) = self.current_char() {
                        if c == '\n' {
                            break;
                        }
                        self.advance();
                    }
                }
                _ => break,
            }
        }
    }

    /// Identifies the next token in the buffer.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let line = self.line;
        let col = self.col;

        let ch = match self.current_char() {
            Some(ch) => ch,
            None => return Token::new(TokenKind::Eof, "", line, col),
        };

        if ch.is_alphabetic() || ch == '_' {
            return self.scan_identifier(line, col);
        }

        if ch.is_ascii_digit() {
            return self.scan_number(line, col);
        }

        self.advance();

        match ch {
            '(' => Token::new(TokenKind::LParen, "(", line, col),
            ')' => Token::new(TokenKind::RParen, ")", line, col),
            '{' => Token::new(TokenKind::LBrace, "{", line, col),
            '}' => Token::new(TokenKind::RBrace, "}", line, col),
            '[' => Token::new(TokenKind::LBracket, "[", line, col),
            ']' => Token::new(TokenKind::RBracket, "]", line, col),
            '+' => Token::new(TokenKind::Plus, "+", line, col),
            '-' => Token::new(TokenKind::Minus, "-", line, col),
            '*' => Token::new(TokenKind::Star, "*", line, col),
            ':' => Token::new(TokenKind::Colon, ":", line, col),
            ',' => Token::new(TokenKind::Comma, ",", line, col),
            '/' => Token::new(TokenKind::Slash, "/", line, col),
            '=' => {
                if self.matches('=') {
                    Token::new(TokenKind::EqEq, "==", line, col)
                } else {
                    Token::new(TokenKind::Assign, "=", line, col)
                }
            }
            '!' => {
                if self.matches('=') {
                    Token::new(TokenKind::NotEq, "!=", line, col)
                } else {
                    Token::new(TokenKind::Invalid, "!", line, col)
                }
            }
            '<' => {
                if self.matches('=') {
                    Token::new(TokenKind::LtEq, "<=", line, col)
                } else {
                    Token::new(TokenKind::Lt, "<", line, col)
                }
            }
            '>' => {
                if self.matches('=') {
                    Token::new(TokenKind::GtEq, ">=", line, col)
                } else {
                    Token::new(TokenKind::Gt, ">", line, col)
                }
            }
            '.' => {
                if self.matches('.') {
                    Token::new(TokenKind::Range, "..", line, col)
                } else {
                    Token::new(TokenKind::Dot, ".", line, col)
                }
            }
            '"' | '\'' => self.scan_string(ch, line, col),
            other => Token::new(TokenKind::Invalid, other.to_string(), line, col),
        }
    }

    /// Consumes characters until the closing delimiter.
    ///
    /// A backslash and the character after it both land in the lexeme
    /// unprocessed. End of input before the delimiter yields whatever was
    /// collected so far.
    fn scan_string(&mut self, delimiter: char, line: usize, col: usize) -> Token {
        let mut content = String::new();

        while let Some(ch) = self.current_char() {
            if ch == delimiter {
                self.advance();
                break;
            }

            if ch == '\\' {
                content.push(ch);
                self.advance();

                if let Some(escaped) = self.advance() {
                    content.push(escaped);
                }
                continue;
            }

            content.push(ch);
            self.advance();
        }

        Token::new(TokenKind::Str, content, line, col)
    }

    /// Scans a numeric literal and decides whether it is an int or a float.
    ///
    /// A `.` followed by a digit upgrades the literal once; a second `.`
    /// terminates it, so `1..5` lexes as an int, the range operator, and
    /// another int.
    fn scan_number(&mut self, line: usize, col: usize) -> Token {
        let mut lexeme = String::new();
        let mut is_float = false;

        while let Some(ch) = self.current_char() {
            if ch == '.' && !is_float && self.peek_char(1).is_some_and(|c| c.is_ascii_digit()) {
                is_float = true;
                lexeme.push(ch);
                self.advance();
            } else if ch.is_ascii_digit() {
                lexeme.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        let kind = if is_float {
            TokenKind::Float
        } else {
            TokenKind::Int
        };

        Token::new(kind, lexeme, line, col)
    }

    /// Groups letters, digits, and underscores, then checks the keyword
    /// table.
    fn scan_identifier(&mut self, line: usize, col: usize) -> Token {
        let mut lexeme = String::new();

        while let Some(ch) = self.current_char() {
            if ch.is_alphanumeric() || ch == '_' {
                lexeme.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        Token::new(lookup_keyword(&lexeme), lexeme, line, col)
    }
}

#[test]
fn test_range_splits_integer_pair() {
    let tokens = tokenize("1..5");
    let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();

    assert_eq!(
        kinds,
        vec![
            TokenKind::Int,
            TokenKind::Range,
            TokenKind::Int,
            TokenKind::Eof
        ]
    );
    assert_eq!(tokens[0].lexeme, "1");
    assert_eq!(tokens[2].lexeme, "5");
}

#[test]
fn test_positions_track_lines_and_columns() {
    let tokens = tokenize("var x\n  = 5");

    assert_eq!((tokens[0].line, tokens[0].col), (1, 1)); // var
    assert_eq!((tokens[1].line, tokens[1].col), (1, 5)); // x
    assert_eq!((tokens[2].line, tokens[2].col), (2, 3)); // =
    assert_eq!((tokens[3].line, tokens[3].col), (2, 5)); // 5
}
