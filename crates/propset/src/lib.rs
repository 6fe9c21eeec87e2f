//! # Propset
//!
//! A distinctively small, tagged envelope for app-to-app marshaling.
//!
//! ## Philosophy
//!
//! - **Explicit shapes**: the envelope is a sum type over the payload kinds
//!   the bridge supports. A peer that sends anything else produces a decode
//!   error, never a panic and never a silent coercion.
//! - **Ordered maps**: name→value pairs keep insertion order, so a message
//!   that round-trips through the envelope comes back exactly as sent.

pub mod http;


/// Envelope decode errors.
///
/// Encoding *into* the envelope cannot fail: every field of the HTTP-shaped
/// messages is representable. Only decoding a value of the wrong shape does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The value had a different kind than the schema expected.
    Shape { expected: Kind, found: Kind },
    /// A map was missing a required field.
    MissingField(String),
    /// A numeric field was outside its valid range.
    OutOfRange { field: &'static str, value: u64 },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Shape { expected, found } => {
                write!(f, "Shape mismatch: expected {:?}, found {:?}", expected, found)
            }
            Error::MissingField(name) => write!(f, "Missing field: {}", name),
            Error::OutOfRange { field, value } => {
                write!(f, "Field '{}' out of range: {}", field, value)
            }
        }
    }
}

impl std::error::Error for Error {}

/// Specialized `Result` for envelope operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Identifies the kind of an envelope value.
///
/// Used for shape diagnostics when decoding fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Null,
    Bool,
    U64,
    Str,
    Bytes,
    List,
    Map,
}

/// A single envelope value: the generic name→value container the bridge
/// carries across the process boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// The empty argument (an operation invoked with no payload).
    Null,
    Bool(bool),
    U64(u64),
    Str(String),
    Bytes(Vec<u8>),
    List(Vec<Value>),
    /// Ordered name→value pairs. Duplicate names are not merged.
    Map(Vec<(String, Value)>),
}

impl Value {
    /// Returns the kind of this value.
    pub fn kind(&self) -> Kind {
        match self {
            Value::Null => Kind::Null,
            Value::Bool(_) => Kind::Bool,
            Value::U64(_) => Kind::U64,
            Value::Str(_) => Kind::Str,
            Value::Bytes(_) => Kind::Bytes,
            Value::List(_) => Kind::List,
            Value::Map(_) => Kind::Map,
        }
    }

    fn shape(&self, expected: Kind) -> Error {
        Error::Shape { expected, found: self.kind() }
    }

    /// Views this value as a `u64`.
    pub fn as_u64(&self) -> Result<u64> {
        match self {
            Value::U64(v) => Ok(*v),
            other => Err(other.shape(Kind::U64)),
        }
    }

    /// Views this value as a string slice.
    pub fn as_str(&self) -> Result<&str> {
        match self {
            Value::Str(s) => Ok(s),
            other => Err(other.shape(Kind::Str)),
        }
    }

    /// Views this value as a byte slice.
    pub fn as_bytes(&self) -> Result<&[u8]> {
        match self {
            Value::Bytes(b) => Ok(b),
            other => Err(other.shape(Kind::Bytes)),
        }
    }

    /// Views this value as ordered map entries.
    pub fn as_map(&self) -> Result<&[(String, Value)]> {
        match self {
            Value::Map(entries) => Ok(entries),
            other => Err(other.shape(Kind::Map)),
        }
    }
}
