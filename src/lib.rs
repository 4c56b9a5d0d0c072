//! # xdrkit
//!
//! A schema-driven implementation of a subset of the XDR (External Data
//! Representation) wire encoding, together with a compiler for a small
//! interface-definition language that produces the type declarations the
//! codec engine consumes.
//!
//! ## Overview
//!
//! Everything on the wire is big-endian and occupies a multiple of 4
//! bytes. Codecs are built at run time from a schema, so values move as a
//! dynamic [`Value`] rather than as derived Rust types.
//!
//! | Schema type | Wire encoding |
//! |-------------|---------------|
//! | `int` | 4-byte signed int, two's complement |
//! | `unsigned int` | 4-byte unsigned int |
//! | fixed opaque, capacity N | N bytes + 0-3 zero-padding bytes, no length prefix |
//! | variable opaque | 4-byte length + bytes + 0-3 zero-padding bytes |
//! | `enum` | 4-byte unsigned int equal to a declared member's value |
//! | `struct` | fields encoded consecutively in declaration order |
//!
//! ## Pipeline
//!
//! Schema source text goes through the [`lexer`] into the [`parser`],
//! which produces an ordered list of [`ast::Declaration`]s. The [`bind`]
//! module resolves those into named runtime [`Codec`]s; emission backends
//! targeting source text consume the same declaration list instead.
//!
//! ## Example
//!
//! ```rust
//! use xdrkit::{bind, translate, Value};
//!
//! let declarations = translate(
//!     "struct point {
//!          int x;
//!          int y;
//!      };",
//! )
//! .unwrap();
//! let schema = bind(&declarations).unwrap();
//!
//! let codec = schema.codec("point").unwrap();
//! let point = codec
//!     .struct_type()
//!     .unwrap()
//!     .builder()
//!     .set("x", 1i64)
//!     .unwrap()
//!     .set("y", -2i64)
//!     .unwrap()
//!     .build()
//!     .unwrap();
//!
//! let bytes = codec.encode(&Value::Struct(point.clone())).unwrap();
//! assert_eq!(bytes, [0, 0, 0, 1, 0xFF, 0xFF, 0xFF, 0xFE]);
//!
//! let (decoded, rest) = codec.decode(&bytes).unwrap();
//! assert_eq!(decoded, Value::Struct(point));
//! assert!(rest.is_empty());
//! ```

pub mod ast;
pub mod bind;
pub mod codec;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod schema;
pub mod value;

pub use bind::{Schema, bind};
pub use codec::Codec;
pub use error::{CompileError, Error, Result};
pub use parser::{Translator, translate};
pub use schema::{EnumType, Field, StructBuilder, StructType};
pub use value::{EnumValue, StructValue, Value};
