//! Declaration records produced by one compile pass.
//!
//! An ordered `Vec<Declaration>` is the sole boundary toward downstream
//! emission backends; everything derives [`serde::Serialize`] so a backend
//! (or a build tool) can take the declarations in whatever representation
//! it wants without re-parsing. The records are built once per pass and
//! not retained by the compiler.

use serde::Serialize;

/// A value position in the schema: either a literal integer or a
/// reference to a previously declared constant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ValueRef {
    Literal(i64),
    Constant(String),
}

/// A field's declared type: one of the built-in 4-byte scalars, or the
/// name of a previously declared type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum TypeRef {
    Int,
    UnsignedInt,
    Named(String),
}

/// One member of an enum declaration, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumMember {
    pub name: String,
    pub value: ValueRef,
}

/// One field of a struct declaration, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDecl {
    pub type_ref: TypeRef,
    pub name: String,
}

/// One named unit of schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Declaration {
    Const {
        name: String,
        value: ValueRef,
    },
    Enum {
        name: String,
        members: Vec<EnumMember>,
    },
    Struct {
        name: String,
        fields: Vec<FieldDecl>,
    },
}

impl Declaration {
    pub fn name(&self) -> &str {
        match self {
            Declaration::Const { name, .. }
            | Declaration::Enum { name, .. }
            | Declaration::Struct { name, .. } => name,
        }
    }
}
