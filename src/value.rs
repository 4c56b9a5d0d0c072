//! The dynamic value model handled by the runtime codecs.
//!
//! Codecs are built from a schema at run time rather than derived from Rust
//! types at compile time, so the values they move are a closed dynamic enum
//! instead of arbitrary user structs. Integers are widened to `i64` in
//! memory; the scalar codecs range-check them against their 32-bit wire
//! representation at encode time.

use crate::error::{Error, Result};

/// One declared enum member together with its wire value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumValue {
    pub name: String,
    pub value: u32,
}

/// A decoded or to-be-encoded struct instance: the declared fields in
/// declaration order, each paired with its current value.
///
/// Instances are produced by [`StructBuilder`](crate::schema::StructBuilder),
/// which enforces the construction policy (required fields, defaults,
/// unrecognized-name rejection). Field access is by name.
#[derive(Debug, Clone, PartialEq)]
pub struct StructValue {
    pub type_name: String,
    pub(crate) fields: Vec<(String, Value)>,
}

impl StructValue {
    /// Look up a field's current value by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// The fields in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v))
    }
}

/// A value in the codec's domain.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A 32-bit-representable integer (signedness is the codec's concern)
    Int(i64),
    /// An opaque byte string
    Opaque(Vec<u8>),
    /// A member of a declared enum
    Enum(EnumValue),
    /// An instance of a declared struct
    Struct(StructValue),
}

impl Value {
    /// The kind name used in `TypeMismatch` diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Int(_) => "integer",
            Value::Opaque(_) => "opaque",
            Value::Enum(_) => "enum",
            Value::Struct(_) => "struct",
        }
    }

    pub fn as_int(&self) -> Result<i64> {
        match self {
            Value::Int(v) => Ok(*v),
            other => Err(Error::TypeMismatch {
                expected: "integer",
                found: other.kind(),
            }),
        }
    }

    pub fn as_opaque(&self) -> Result<&[u8]> {
        match self {
            Value::Opaque(bytes) => Ok(bytes),
            other => Err(Error::TypeMismatch {
                expected: "opaque",
                found: other.kind(),
            }),
        }
    }

    pub fn as_enum(&self) -> Result<&EnumValue> {
        match self {
            Value::Enum(member) => Ok(member),
            other => Err(Error::TypeMismatch {
                expected: "enum",
                found: other.kind(),
            }),
        }
    }

    pub fn as_struct(&self) -> Result<&StructValue> {
        match self {
            Value::Struct(instance) => Ok(instance),
            other => Err(Error::TypeMismatch {
                expected: "struct",
                found: other.kind(),
            }),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Opaque(v)
    }
}

impl From<&[u8]> for Value {
    fn from(v: &[u8]) -> Self {
        Value::Opaque(v.to_vec())
    }
}

impl From<StructValue> for Value {
    fn from(v: StructValue) -> Self {
        Value::Struct(v)
    }
}
