//! Binds an ordered declaration list to runtime codecs.
//!
//! The compiler front end stops at abstract declarations; this module
//! resolves them into a [`Schema`]: concrete constant values plus a named
//! [`Codec`] per declared enum and struct, ready for encode/decode. A
//! source-text emission backend would consume the same declaration list
//! instead.
//!
//! Declarations are processed in source order and share one namespace, so
//! a field's named type must refer to a struct or enum bound earlier in
//! the same pass.

use std::sync::Arc;

use crate::ast::{Declaration, TypeRef, ValueRef};
use crate::codec::Codec;
use crate::error::{Error, Result};
use crate::schema::{EnumType, Field, StructType};

/// The bound form of a compiled schema: named codecs and constant values.
#[derive(Debug, Clone)]
pub struct Schema {
    constants: Vec<(String, i64)>,
    types: Vec<(String, Codec)>,
}

impl Schema {
    /// The codec bound to a declared enum or struct name.
    pub fn codec(&self, name: &str) -> Option<&Codec> {
        self.types
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, codec)| codec)
    }

    /// The value of a declared constant.
    pub fn constant(&self, name: &str) -> Option<i64> {
        self.constants
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, value)| *value)
    }

    /// Declared constants, in declaration order.
    pub fn constants(&self) -> &[(String, i64)] {
        &self.constants
    }

    /// Bound type names and codecs, in declaration order.
    pub fn types(&self) -> &[(String, Codec)] {
        &self.types
    }
}

/// Resolve `declarations` into a [`Schema`].
pub fn bind(declarations: &[Declaration]) -> Result<Schema> {
    let mut schema = Schema {
        constants: Vec::new(),
        types: Vec::new(),
    };

    for declaration in declarations {
        let name = declaration.name();
        if schema.constant(name).is_some() || schema.codec(name).is_some() {
            return Err(Error::DuplicateType(name.to_string()));
        }
        match declaration {
            Declaration::Const { name, value } => {
                let value = resolve_value(&schema, value)?;
                schema.constants.push((name.clone(), value));
            }
            Declaration::Enum { name, members } => {
                let mut resolved = Vec::with_capacity(members.len());
                for member in members {
                    let value = resolve_value(&schema, &member.value)?;
                    // Members ride on the unsigned scalar codec.
                    let value = u32::try_from(value).map_err(|_| Error::OutOfRange {
                        value,
                        kind: "unsigned 32-bit integer",
                    })?;
                    resolved.push((member.name.clone(), value));
                }
                let codec = Codec::Enum(Arc::new(EnumType::new(name.clone(), resolved)));
                schema.types.push((name.clone(), codec));
            }
            Declaration::Struct { name, fields } => {
                let mut table = Vec::with_capacity(fields.len());
                for field in fields {
                    let codec = match &field.type_ref {
                        TypeRef::Int => Codec::Int,
                        TypeRef::UnsignedInt => Codec::UInt,
                        TypeRef::Named(type_name) => schema
                            .codec(type_name)
                            .cloned()
                            .ok_or_else(|| Error::UnknownType(type_name.clone()))?,
                    };
                    table.push(Field::new(field.name.clone(), codec));
                }
                let codec = Codec::Struct(Arc::new(StructType::new(name.clone(), table)));
                schema.types.push((name.clone(), codec));
            }
        }
    }

    Ok(schema)
}

fn resolve_value(schema: &Schema, value: &ValueRef) -> Result<i64> {
    match value {
        ValueRef::Literal(v) => Ok(*v),
        ValueRef::Constant(name) => schema
            .constant(name)
            .ok_or_else(|| Error::UnknownConstant(name.clone())),
    }
}
