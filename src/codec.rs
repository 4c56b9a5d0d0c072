//! The XDR codec engine.
//!
//! ## Wire format summary
//! - All integers are 4 bytes, big-endian; signed values are two's
//!   complement
//! - Opaque byte strings are right-padded with zero bytes to a 4-byte
//!   boundary, either length-prefixed (variable) or fixed-size by schema
//!   declaration
//! - A struct is the concatenation of its fields' encodings in declaration
//!   order, with no extra framing
//! - An enum is a 4-byte unsigned integer equal to one of its declared
//!   members' values
//!
//! A [`Codec`] is a capability, not a class hierarchy: a closed variant set
//! where each variant supports `encode` and `decode`. Adding a new wire
//! type means adding a variant. Codecs hold only immutable configuration
//! and may be shared and reused for the lifetime of the process.

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::schema::{EnumType, StructType};
use crate::value::Value;

/// A paired encode/decode capability bound to one wire representation.
#[derive(Debug, Clone, PartialEq)]
pub enum Codec {
    /// 4-byte big-endian two's-complement signed integer
    Int,
    /// 4-byte big-endian unsigned integer
    UInt,
    /// Fixed-capacity opaque bytes, zero-padded to a 4-byte boundary,
    /// no length prefix
    FixedOpaque(usize),
    /// Length-prefixed opaque bytes, zero-padded to a 4-byte boundary
    VarOpaque,
    /// A closed integer enumeration, riding on the unsigned scalar
    Enum(Arc<EnumType>),
    /// Ordered composition of named fields
    Struct(Arc<StructType>),
}

impl Codec {
    /// The underlying struct declaration, for struct codecs.
    pub fn struct_type(&self) -> Option<&Arc<StructType>> {
        match self {
            Codec::Struct(ty) => Some(ty),
            _ => None,
        }
    }

    /// The underlying enum declaration, for enum codecs.
    pub fn enum_type(&self) -> Option<&Arc<EnumType>> {
        match self {
            Codec::Enum(ty) => Some(ty),
            _ => None,
        }
    }

    /// Encode `value` into a freshly allocated byte vector.
    pub fn encode(&self, value: &Value) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        self.encode_into(value, &mut out)?;
        Ok(out)
    }

    /// Encode `value`, appending the bytes to `out`.
    pub fn encode_into(&self, value: &Value, out: &mut Vec<u8>) -> Result<()> {
        match self {
            Codec::Int => {
                let v = value.as_int()?;
                let v = i32::try_from(v).map_err(|_| Error::OutOfRange {
                    value: v,
                    kind: "signed 32-bit integer",
                })?;
                out.extend_from_slice(&v.to_be_bytes());
                Ok(())
            }
            Codec::UInt => {
                let v = value.as_int()?;
                let v = u32::try_from(v).map_err(|_| Error::OutOfRange {
                    value: v,
                    kind: "unsigned 32-bit integer",
                })?;
                out.extend_from_slice(&v.to_be_bytes());
                Ok(())
            }
            Codec::FixedOpaque(capacity) => {
                let bytes = value.as_opaque()?;
                if bytes.len() > *capacity {
                    return Err(Error::LengthOverflow {
                        max: *capacity,
                        got: bytes.len(),
                    });
                }
                out.extend_from_slice(bytes);
                // Shorter values are zero-filled up to capacity, then the
                // whole item is padded to a 4-byte boundary.
                let padded = padded_len(*capacity);
                out.resize(out.len() + (padded - bytes.len()), 0);
                Ok(())
            }
            Codec::VarOpaque => {
                let bytes = value.as_opaque()?;
                let len = u32::try_from(bytes.len()).map_err(|_| Error::LengthOverflow {
                    max: u32::MAX as usize,
                    got: bytes.len(),
                })?;
                out.extend_from_slice(&len.to_be_bytes());
                out.extend_from_slice(bytes);
                out.resize(out.len() + pad_len(bytes.len()), 0);
                Ok(())
            }
            Codec::Enum(ty) => {
                let member = value.as_enum()?;
                // Defensive: the in-memory value should already be a
                // declared member, but guard against forged instances.
                if !ty.contains_value(member.value) {
                    return Err(Error::InvalidDiscriminant {
                        value: member.value,
                        enum_name: ty.name().to_string(),
                    });
                }
                out.extend_from_slice(&member.value.to_be_bytes());
                Ok(())
            }
            Codec::Struct(ty) => {
                let instance = value.as_struct()?;
                for field in ty.fields() {
                    let field_value = instance
                        .get(field.name())
                        .ok_or_else(|| Error::MissingField(field.name().to_string()))?;
                    field.codec().encode_into(field_value, out)?;
                }
                Ok(())
            }
        }
    }

    /// Decode one value from the front of `input`, returning the value and
    /// the unconsumed remainder.
    ///
    /// On failure there is no guarantee about how much of `input` was
    /// examined; the error is fatal to the operation.
    pub fn decode<'a>(&self, input: &'a [u8]) -> Result<(Value, &'a [u8])> {
        let mut reader = Reader::new(input);
        let value = self.read_value(&mut reader)?;
        Ok((value, reader.remaining()))
    }

    fn read_value(&self, reader: &mut Reader<'_>) -> Result<Value> {
        match self {
            Codec::Int => {
                let bytes = reader.take(4)?;
                Ok(Value::Int(
                    i32::from_be_bytes(bytes.try_into().unwrap()) as i64
                ))
            }
            Codec::UInt => Ok(Value::Int(reader.read_u32()? as i64)),
            Codec::FixedOpaque(capacity) => {
                // The skipped padding bytes are not checked for zero.
                let bytes = reader.read_padded(*capacity)?;
                Ok(Value::Opaque(bytes.to_vec()))
            }
            Codec::VarOpaque => {
                let len = reader.read_u32()? as usize;
                let bytes = reader.read_padded(len)?;
                Ok(Value::Opaque(bytes.to_vec()))
            }
            Codec::Enum(ty) => {
                let raw = reader.read_u32()?;
                let member =
                    ty.member_by_value(raw)
                        .ok_or_else(|| Error::InvalidDiscriminant {
                            value: raw,
                            enum_name: ty.name().to_string(),
                        })?;
                Ok(Value::Enum(member))
            }
            Codec::Struct(ty) => {
                let mut builder = ty.builder();
                for field in ty.fields() {
                    let field_value = field.codec().read_value(reader)?;
                    builder = builder.set(field.name(), field_value)?;
                }
                Ok(Value::Struct(builder.build()?))
            }
        }
    }
}

/// Zero bytes needed to bring `len` up to a 4-byte boundary.
fn pad_len(len: usize) -> usize {
    (4 - len % 4) % 4
}

/// `len` rounded up to the next 4-byte boundary.
fn padded_len(len: usize) -> usize {
    len + pad_len(len)
}

// ── Reader ─────────────────────────────────────────────────────────────────

/// Reads from a byte slice, maintaining a cursor position.
struct Reader<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(input: &'a [u8]) -> Self {
        Reader { input, pos: 0 }
    }

    /// The unconsumed portion of the input buffer.
    fn remaining(&self) -> &'a [u8] {
        &self.input[self.pos..]
    }

    /// Consume exactly `n` bytes, returning a slice. Fails with
    /// `UnexpectedEof`.
    fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        if self.pos + n > self.input.len() {
            return Err(Error::UnexpectedEof);
        }
        let slice = &self.input[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    /// Read a big-endian u32 (the XDR basic block).
    fn read_u32(&mut self) -> Result<u32> {
        let bytes = self.take(4)?;
        Ok(u32::from_be_bytes(bytes.try_into().unwrap()))
    }

    /// Read `n` bytes of data plus their 0-3 padding bytes, returning the
    /// data as a slice into the original input.
    fn read_padded(&mut self, n: usize) -> Result<&'a [u8]> {
        let data = self.take(n)?;
        let padding = pad_len(n);
        if padding != 0 {
            self.take(padding)?;
        }
        Ok(data)
    }
}
