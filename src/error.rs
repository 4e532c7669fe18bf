use std::error::Error as StdError;
use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    Parse(ParseError),
    InvalidEncoding(std::str::Utf8Error),
    Bind(BindError),
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "I/O error: {err}"),
            Self::Parse(err) => write!(f, "{err}"),
            Self::InvalidEncoding(err) => write!(f, "invalid UTF-8 input: {err}"),
            Self::Bind(err) => write!(f, "{err}"),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
            Self::InvalidEncoding(err) => Some(err),
            Self::Bind(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<ParseError> for Error {
    fn from(value: ParseError) -> Self {
        Self::Parse(value)
    }
}

impl From<std::str::Utf8Error> for Error {
    fn from(value: std::str::Utf8Error) -> Self {
        Self::InvalidEncoding(value)
    }
}

impl From<BindError> for Error {
    fn from(value: BindError) -> Self {
        Self::Bind(value)
    }
}

/// A scanning failure. Line and column are 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub line: u32,
    pub column: u32,
    pub kind: ParseErrorKind,
}

impl ParseError {
    pub(crate) fn new(line: u32, column: u32, kind: ParseErrorKind) -> Self {
        Self { line, column, kind }
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "parse error at line {}, column {}: {}",
            self.line, self.column, self.kind
        )
    }
}

impl StdError for ParseError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// No key characters before the delimiter.
    EmptyKey,
    /// The key is not followed by `=`.
    MissingDelimiter,
    /// `=` is directly followed by a newline or the end of input.
    EmptyValue,
}

impl Display for ParseErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyKey => write!(f, "key is empty"),
            Self::MissingDelimiter => write!(f, "expected `=` after key"),
            Self::EmptyValue => write!(f, "value is empty"),
        }
    }
}

/// A failure while binding a document onto a destination record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindError {
    /// No entry matched the field's tag or name.
    UndefinedKey { field: String },
    /// The value could not be coerced into the field's numeric type.
    InvalidNumber { field: String, value: String },
    /// The field's type is not a supported scalar kind.
    UnsupportedType {
        field: String,
        type_name: &'static str,
    },
    /// The destination's binding table is malformed.
    InvalidDestination {
        type_name: &'static str,
        field: String,
    },
}

impl BindError {
    /// Name of the field the error is about.
    pub fn field(&self) -> &str {
        match self {
            Self::UndefinedKey { field }
            | Self::InvalidNumber { field, .. }
            | Self::UnsupportedType { field, .. }
            | Self::InvalidDestination { field, .. } => field,
        }
    }
}

impl Display for BindError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UndefinedKey { field } => write!(f, "undefined key '{field}'"),
            Self::InvalidNumber { field, value } => {
                write!(f, "invalid number {value:?} for field '{field}'")
            }
            Self::UnsupportedType { field, type_name } => write!(
                f,
                "field '{field}' has unsupported type `{type_name}`: only strings and numbers can be bound"
            ),
            Self::InvalidDestination { type_name, field } => write!(
                f,
                "destination `{type_name}` declares field '{field}' more than once"
            ),
        }
    }
}

impl StdError for BindError {}
