//! Compiler diagnostics.
//!
//! Every stage reports problems as [`Diagnostic`] values collected into
//! lists; nothing is thrown across stage boundaries. The CLI decides at the
//! very end how to render them, with ANSI color when the output stream is a
//! terminal.

use std::fmt;

use crate::ast::Token;

const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";
const GREEN: &str = "\x1b[32m";
const RESET: &str = "\x1b[0m";

/// How serious a diagnostic is; decides its color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Note,
    Warning,
    Error,
    Fatal,
}

/// Which family of problem a diagnostic belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    SyntaxError,
    TypeError,
    NameError,
    LinkerError,
    InternalError,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::SyntaxError => "SyntaxError",
            ErrorCode::TypeError => "TypeError",
            ErrorCode::NameError => "NameError",
            ErrorCode::LinkerError => "LinkerError",
            ErrorCode::InternalError => "InternalError",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One reported problem, anchored to a source position.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub code: ErrorCode,
    pub line: usize,
    pub col: usize,
    pub message: String,
    pub hint: Option<String>,
}

impl Diagnostic {
    pub fn new(
        severity: Severity,
        code: ErrorCode,
        line: usize,
        col: usize,
        message: impl Into<String>,
    ) -> Self {
        Diagnostic {
            severity,
            code,
            line,
            col,
            message: message.into(),
            hint: None,
        }
    }

    /// An error-severity diagnostic at the position of the given token.
    pub fn error(code: ErrorCode, token: &Token, message: impl Into<String>) -> Self {
        Diagnostic::new(Severity::Error, code, token.line, token.col, message)
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Renders the diagnostic, optionally with ANSI color:
    ///
    /// ```text
    /// [TypeError] at line 3, col 5: cannot assign type 'str' to variable of type 'int'
    ///   └─ Hint: declare the variable as 'var x: str = ...'
    /// ```
    pub fn render(&self, color: bool) -> String {
        let paint = if color {
            match self.severity {
                Severity::Error | Severity::Fatal => RED,
                Severity::Warning => YELLOW,
                Severity::Note => CYAN,
            }
        } else {
            ""
        };
        let reset = if color { RESET } else { "" };

        let mut out = format!(
            "{}[{}]{} at line {}, col {}: {}",
            paint, self.code, reset, self.line, self.col, self.message
        );

        if let Some(hint) = &self.hint {
            let green = if color { GREEN } else { "" };
            out.push_str(&format!("\n  └─ {}Hint: {}{}", green, hint, reset));
        }

        out
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(false))
    }
}
