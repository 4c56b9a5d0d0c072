//! Runtime type declarations: enums with closed member sets and structs
//! with ordered field tables.
//!
//! These are the immutable configuration the codecs hang on to. Once
//! constructed they are never mutated, so wrapping them in `Arc` and
//! sharing them across threads and across any number of encode/decode
//! calls is safe.

use crate::codec::Codec;
use crate::error::{Error, Result};
use crate::value::{EnumValue, StructValue, Value};

/// A closed set of (symbolic name, integer value) members backing an
/// enum codec.
///
/// Member values are not checked for uniqueness: two members sharing a
/// value is legal but hazardous schema authoring, because decoding that
/// value always yields whichever member was declared first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumType {
    name: String,
    members: Vec<(String, u32)>,
}

impl EnumType {
    pub fn new(name: impl Into<String>, members: Vec<(String, u32)>) -> Self {
        EnumType {
            name: name.into(),
            members,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared members, in declaration order.
    pub fn members(&self) -> &[(String, u32)] {
        &self.members
    }

    /// Build a [`Value`] for the member with the given symbolic name.
    pub fn member(&self, name: &str) -> Option<Value> {
        self.members
            .iter()
            .find(|(n, _)| n == name)
            .map(|(n, v)| {
                Value::Enum(EnumValue {
                    name: n.clone(),
                    value: *v,
                })
            })
    }

    /// The first declared member with the given wire value, if any.
    pub(crate) fn member_by_value(&self, value: u32) -> Option<EnumValue> {
        self.members
            .iter()
            .find(|(_, v)| *v == value)
            .map(|(n, v)| EnumValue {
                name: n.clone(),
                value: *v,
            })
    }

    /// Whether any declared member carries `value`.
    pub(crate) fn contains_value(&self, value: u32) -> bool {
        self.members.iter().any(|(_, v)| *v == value)
    }
}

/// One named, typed slot in a struct's field table.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub(crate) name: String,
    pub(crate) codec: Codec,
    pub(crate) default: Option<Value>,
}

impl Field {
    pub fn new(name: impl Into<String>, codec: Codec) -> Self {
        Field {
            name: name.into(),
            codec,
            default: None,
        }
    }

    /// A field whose value may be omitted at construction time, in which
    /// case `default` is used.
    pub fn with_default(name: impl Into<String>, codec: Codec, default: Value) -> Self {
        Field {
            name: name.into(),
            codec,
            default: Some(default),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn codec(&self) -> &Codec {
        &self.codec
    }
}

/// An ordered sequence of named, typed fields.
///
/// Field order is semantically significant: it fixes both the wire layout
/// and the decode sequencing. Encode order, decode order, and declaration
/// order are always the same.
#[derive(Debug, Clone, PartialEq)]
pub struct StructType {
    name: String,
    fields: Vec<Field>,
}

impl StructType {
    pub fn new(name: impl Into<String>, fields: Vec<Field>) -> Self {
        StructType {
            name: name.into(),
            fields,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The field table, in declaration order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Start building an instance of this struct.
    pub fn builder(&self) -> StructBuilder<'_> {
        StructBuilder {
            ty: self,
            values: vec![None; self.fields.len()],
        }
    }
}

/// Constructs a [`StructValue`] from named field values, enforcing the
/// construction policy: every declared field is required unless it carries
/// a default, and unrecognized field names are rejected.
#[derive(Debug)]
pub struct StructBuilder<'a> {
    ty: &'a StructType,
    values: Vec<Option<Value>>,
}

impl<'a> StructBuilder<'a> {
    /// Supply a value for the named field.
    pub fn set(mut self, name: &str, value: impl Into<Value>) -> Result<Self> {
        let index = self
            .ty
            .fields
            .iter()
            .position(|f| f.name == name)
            .ok_or_else(|| Error::UnknownField(name.to_string()))?;
        self.values[index] = Some(value.into());
        Ok(self)
    }

    /// Finish construction, applying declared defaults for omitted fields.
    pub fn build(self) -> Result<StructValue> {
        let mut fields = Vec::with_capacity(self.ty.fields.len());
        for (field, slot) in self.ty.fields.iter().zip(self.values) {
            let value = match slot {
                Some(value) => value,
                None => field
                    .default
                    .clone()
                    .ok_or_else(|| Error::MissingField(field.name.clone()))?,
            };
            fields.push((field.name.clone(), value));
        }
        Ok(StructValue {
            type_name: self.ty.name.clone(),
            fields,
        })
    }
}
