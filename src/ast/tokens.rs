/// Token kind tags produced by the lexer.
///
/// The set is closed: every character sequence in a source file maps onto one
/// of these, with [`TokenKind::Invalid`] absorbing anything unrecognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Punctuation and operators
    /// Addition or string concatenation (`+`)
    Plus,
    /// Subtraction or unary negation (`-`)
    Minus,
    /// Multiplication (`*`)
    Star,
    /// Division (`/`)
    Slash,
    /// Assignment (`=`)
    Assign,
    /// Equality (`==`)
    EqEq,
    /// Inequality (`!=`)
    NotEq,
    /// Less than (`<`)
    Lt,
    /// Less than or equal (`<=`)
    LtEq,
    /// Greater than (`>`)
    Gt,
    /// Greater than or equal (`>=`)
    GtEq,
    /// Left parenthesis
    LParen,
    /// Right parenthesis
    RParen,
    /// Left brace
    LBrace,
    /// Right brace
    RBrace,
    /// Left bracket
    LBracket,
    /// Right bracket
    RBracket,
    /// Comma
    Comma,
    /// Colon, introduces a type annotation
    Colon,
    /// Dot
    Dot,
    /// Half-open range (`..`), only valid in `for i in start..end`
    Range,

    // Keywords
    KwVar,
    KwConst,
    KwIf,
    KwElse,
    KwFor,
    KwIn,
    KwBreak,
    KwContinue,
    KwFunc,
    KwReturn,
    KwTrue,
    KwFalse,

    // Type keywords, lexed distinctly from identifiers but usable as type
    // names after ':'
    TypeInt,
    TypeFloat,
    TypeStr,
    TypeBool,
    TypeList,
    TypeMap,
    TypeJson,

    // Literals
    /// Integer literal
    ///
    /// # Examples
    /// ```text
    /// 42
    /// 314
    /// ```
    Int,
    /// Floating-point literal
    ///
    /// # Examples
    /// ```text
    /// 3.14
    /// 0.5
    /// ```
    Float,
    /// String literal, single- or double-quoted
    ///
    /// The lexeme holds the content without the delimiters; escape
    /// sequences pass through unprocessed.
    Str,
    /// Identifier
    ///
    /// Starts with a letter or underscore, continues with letters, digits,
    /// or underscores.
    Ident,

    // Sentinels
    /// End of input; every token sequence ends with exactly one of these
    Eof,
    /// A character the lexer could not recognize
    Invalid,
}

/// The smallest lexical unit: a tag, the exact source slice it matched, and
/// the 1-based position of its first character.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub line: usize,
    pub col: usize,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, line: usize, col: usize) -> Self {
        Token {
            kind,
            lexeme: lexeme.into(),
            line,
            col,
        }
    }
}

/// Resolves an identifier lexeme against the keyword table.
///
/// Returns [`TokenKind::Ident`] when the word is not reserved.
pub fn lookup_keyword(text: &str) -> TokenKind {
    match text {
        // Basic types
        "json" => TokenKind::TypeJson,
        "str" => TokenKind::TypeStr,
        "int" => TokenKind::TypeInt,
        "float" => TokenKind::TypeFloat,
        "bool" => TokenKind::TypeBool,
        "list" => TokenKind::TypeList,
        "map" => TokenKind::TypeMap,

        // Declarations
        "var" => TokenKind::KwVar,
        "const" => TokenKind::KwConst,

        // Control flow
        "for" => TokenKind::KwFor,
        "in" => TokenKind::KwIn,
        "break" => TokenKind::KwBreak,
        "continue" => TokenKind::KwContinue,
        "if" => TokenKind::KwIf,
        "else" => TokenKind::KwElse,

        // Booleans
        "true" => TokenKind::KwTrue,
        "false" => TokenKind::KwFalse,

        // Functions
        "func" => TokenKind::KwFunc,
        "return" => TokenKind::KwReturn,

        _ => TokenKind::Ident,
    }
}
