//! Tokenizer for the XDR schema language.
//!
//! Produces tokens lazily, one per call, driven strictly forward. Each
//! token carries the 1-based line and column of its first character; the
//! parser reports every failure against these positions.
//!
//! Recognized: the keywords `const enum struct unsigned int`, identifiers
//! `[A-Za-z_][A-Za-z0-9_]*`, signed decimal integers, the punctuation
//! `; = { } ,`, and block comments `/* ... */` (discarded, newlines inside
//! still counted). Anything else is a [`CompileError::Lex`].

use std::fmt;

use crate::error::CompileError;

/// Token kind together with its payload, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    Const,
    Enum,
    Struct,
    Unsigned,
    Int,
    Ident(String),
    Number(i64),
    Semicolon,  // ;
    Assign,     // =
    OpenBrace,  // {
    CloseBrace, // }
    Comma,      // ,
}

impl TokenKind {
    pub fn ty(&self) -> TokenType {
        match self {
            TokenKind::Const => TokenType::Const,
            TokenKind::Enum => TokenType::Enum,
            TokenKind::Struct => TokenType::Struct,
            TokenKind::Unsigned => TokenType::Unsigned,
            TokenKind::Int => TokenType::Int,
            TokenKind::Ident(_) => TokenType::Ident,
            TokenKind::Number(_) => TokenType::Number,
            TokenKind::Semicolon => TokenType::Semicolon,
            TokenKind::Assign => TokenType::Assign,
            TokenKind::OpenBrace => TokenType::OpenBrace,
            TokenKind::CloseBrace => TokenType::CloseBrace,
            TokenKind::Comma => TokenType::Comma,
        }
    }
}

/// Payload-free token classification, used by the parser's `expect`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenType {
    Const,
    Enum,
    Struct,
    Unsigned,
    Int,
    Ident,
    Number,
    Semicolon,
    Assign,
    OpenBrace,
    CloseBrace,
    Comma,
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenType::Const => "'const'",
            TokenType::Enum => "'enum'",
            TokenType::Struct => "'struct'",
            TokenType::Unsigned => "'unsigned'",
            TokenType::Int => "'int'",
            TokenType::Ident => "identifier",
            TokenType::Number => "number",
            TokenType::Semicolon => "';'",
            TokenType::Assign => "'='",
            TokenType::OpenBrace => "'{'",
            TokenType::CloseBrace => "'}'",
            TokenType::Comma => "','",
        };
        f.write_str(name)
    }
}

/// One token with its source position (1-based line and column).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub line: usize,
    pub column: usize,
}

impl Token {
    pub fn ty(&self) -> TokenType {
        self.kind.ty()
    }
}

/// A forward-only tokenizer over schema source text.
pub struct Lexer<'a> {
    source: &'a str,
    pos: usize,
    line: usize,
    line_start: usize,
    failed: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Lexer {
            source,
            pos: 0,
            line: 1,
            line_start: 0,
            failed: false,
        }
    }

    /// 1-based line and column of the lexer's current position. After the
    /// stream is exhausted this points just past the last character, which
    /// is where end-of-input errors are reported.
    ///
    /// Not named `position`: `Lexer` is an `Iterator`, and inside `&mut
    /// self` methods that name would resolve to `Iterator::position`.
    pub fn current_position(&self) -> (usize, usize) {
        let column = self.source[self.line_start..self.pos].chars().count() + 1;
        (self.line, column)
    }

    fn peek(&self) -> Option<char> {
        self.source[self.pos..].chars().next()
    }

    fn bump(&mut self, c: char) {
        self.pos += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.line_start = self.pos;
        }
    }

    fn lex_error(&self, line: usize, column: usize, message: String) -> CompileError {
        CompileError::Lex {
            line,
            column,
            message,
        }
    }

    /// Skip whitespace and block comments. Fails on an unterminated comment.
    fn skip_trivia(&mut self) -> Result<(), CompileError> {
        loop {
            match self.peek() {
                Some(c) if c.is_whitespace() => self.bump(c),
                Some('/') if self.source[self.pos..].starts_with("/*") => {
                    let (line, column) = self.current_position();
                    self.bump('/');
                    self.bump('*');
                    loop {
                        if self.source[self.pos..].starts_with("*/") {
                            self.bump('*');
                            self.bump('/');
                            break;
                        }
                        match self.peek() {
                            Some(c) => self.bump(c),
                            None => {
                                return Err(self.lex_error(
                                    line,
                                    column,
                                    "unterminated block comment".to_string(),
                                ));
                            }
                        }
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    fn take_identifier(&mut self) -> TokenKind {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == '_' {
                self.bump(c);
            } else {
                break;
            }
        }
        match &self.source[start..self.pos] {
            "const" => TokenKind::Const,
            "enum" => TokenKind::Enum,
            "struct" => TokenKind::Struct,
            "unsigned" => TokenKind::Unsigned,
            "int" => TokenKind::Int,
            ident => TokenKind::Ident(ident.to_string()),
        }
    }

    fn take_number(&mut self, line: usize, column: usize) -> Result<TokenKind, CompileError> {
        let start = self.pos;
        if self.peek() == Some('-') {
            self.bump('-');
        }
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                self.bump(c);
            } else {
                break;
            }
        }
        let text = &self.source[start..self.pos];
        text.parse::<i64>()
            .map(TokenKind::Number)
            .map_err(|_| self.lex_error(line, column, format!("integer literal out of range: {}", text)))
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token, CompileError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        if let Err(e) = self.skip_trivia() {
            self.failed = true;
            return Some(Err(e));
        }

        let (line, column) = self.current_position();
        let c = self.peek()?;

        let kind = match c {
            ';' => {
                self.bump(c);
                Ok(TokenKind::Semicolon)
            }
            '=' => {
                self.bump(c);
                Ok(TokenKind::Assign)
            }
            '{' => {
                self.bump(c);
                Ok(TokenKind::OpenBrace)
            }
            '}' => {
                self.bump(c);
                Ok(TokenKind::CloseBrace)
            }
            ',' => {
                self.bump(c);
                Ok(TokenKind::Comma)
            }
            '-' if self.source[self.pos + 1..].starts_with(|d: char| d.is_ascii_digit()) => {
                self.take_number(line, column)
            }
            c if c.is_ascii_digit() => self.take_number(line, column),
            c if c.is_ascii_alphabetic() || c == '_' => Ok(self.take_identifier()),
            c => Err(self.lex_error(line, column, format!("unrecognized character: {:?}", c))),
        };

        match kind {
            Ok(kind) => Some(Ok(Token { kind, line, column })),
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}
