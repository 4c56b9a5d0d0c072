use std::fmt;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while encoding, decoding, or binding a schema to
/// runtime codecs.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Attempted to read past the end of the input buffer
    UnexpectedEof,

    /// A fixed-length opaque value exceeded its declared capacity
    LengthOverflow { max: usize, got: usize },

    /// An integer value is not representable in 32 bits for its signedness
    OutOfRange { value: i64, kind: &'static str },

    /// An enum value is not among the declared members
    InvalidDiscriminant { value: u32, enum_name: String },

    /// A value of the wrong kind was handed to a codec
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// A required struct field was not supplied and carries no default
    MissingField(String),

    /// A field name that is not part of the struct's declaration
    UnknownField(String),

    /// A field type names a type the schema has not declared (yet)
    UnknownType(String),

    /// A value position references a constant the schema has not declared
    UnknownConstant(String),

    /// Two declarations share the same name
    DuplicateType(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnexpectedEof => write!(f, "unexpected end of input"),
            Error::LengthOverflow { max, got } => {
                write!(f, "opaque length {} exceeds declared capacity {}", got, max)
            }
            Error::OutOfRange { value, kind } => {
                write!(f, "value {} out of range for {}", value, kind)
            }
            Error::InvalidDiscriminant { value, enum_name } => {
                write!(
                    f,
                    "value {} is not a declared member of enum {}",
                    value, enum_name
                )
            }
            Error::TypeMismatch { expected, found } => {
                write!(f, "expected a {} value, found {}", expected, found)
            }
            Error::MissingField(name) => write!(f, "missing required field: {}", name),
            Error::UnknownField(name) => write!(f, "unrecognized field: {}", name),
            Error::UnknownType(name) => write!(f, "reference to undeclared type: {}", name),
            Error::UnknownConstant(name) => {
                write!(f, "reference to undeclared constant: {}", name)
            }
            Error::DuplicateType(name) => write!(f, "duplicate declaration of: {}", name),
        }
    }
}

impl std::error::Error for Error {}

/// Errors raised by the schema front end. Both variants carry the 1-based
/// line and column of the offending token (or of end of input).
#[derive(Debug, Clone, PartialEq)]
pub enum CompileError {
    /// An unrecognized character or malformed literal in schema source
    Lex {
        line: usize,
        column: usize,
        message: String,
    },

    /// Parser or semantic failure: unexpected token, or a reference to an
    /// undeclared constant
    Translation {
        line: usize,
        column: usize,
        message: String,
    },
}

impl CompileError {
    /// Line and column of the failure, 1-based.
    pub fn position(&self) -> (usize, usize) {
        match self {
            CompileError::Lex { line, column, .. }
            | CompileError::Translation { line, column, .. } => (*line, *column),
        }
    }
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompileError::Lex {
                line,
                column,
                message,
            } => write!(f, "lex error at {}:{}: {}", line, column, message),
            CompileError::Translation {
                line,
                column,
                message,
            } => write!(f, "translation error at {}:{}: {}", line, column, message),
        }
    }
}

impl std::error::Error for CompileError {}
