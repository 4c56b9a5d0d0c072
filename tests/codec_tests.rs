use std::sync::Arc;

use xdrkit::{Codec, EnumType, Error, Field, StructType, Value};

fn enum_codec(members: &[(&str, u32)]) -> Codec {
    let members = members
        .iter()
        .map(|(n, v)| (n.to_string(), *v))
        .collect();
    Codec::Enum(Arc::new(EnumType::new("testenum", members)))
}

#[test]
fn test_uint_encode_big_endian() {
    let bytes = Codec::UInt.encode(&Value::Int(17)).unwrap();
    assert_eq!(bytes, [0, 0, 0, 17]);
    let bytes = Codec::UInt.encode(&Value::Int(0xDEADBEEF)).unwrap();
    assert_eq!(bytes, [0xDE, 0xAD, 0xBE, 0xEF]);
}

#[test]
fn test_int_decode_twos_complement() {
    let (value, rest) = Codec::Int.decode(&[0xFF, 0xFF, 0xFF, 0xFE]).unwrap();
    assert_eq!(value, Value::Int(-2));
    assert!(rest.is_empty());
}

#[test]
fn test_int_roundtrip_extremes() {
    for v in [i32::MIN as i64, -1, 0, 1, i32::MAX as i64] {
        let bytes = Codec::Int.encode(&Value::Int(v)).unwrap();
        assert_eq!(bytes.len(), 4);
        let (decoded, rest) = Codec::Int.decode(&bytes).unwrap();
        assert_eq!(decoded, Value::Int(v));
        assert!(rest.is_empty());
    }
}

#[test]
fn test_scalar_range_errors() {
    let too_big = i32::MAX as i64 + 1;
    assert!(matches!(
        Codec::Int.encode(&Value::Int(too_big)),
        Err(Error::OutOfRange { .. })
    ));
    assert!(matches!(
        Codec::UInt.encode(&Value::Int(-1)),
        Err(Error::OutOfRange { value: -1, .. })
    ));
    assert!(matches!(
        Codec::UInt.encode(&Value::Int(u32::MAX as i64 + 1)),
        Err(Error::OutOfRange { .. })
    ));
}

#[test]
fn test_scalar_decode_eof() {
    assert_eq!(Codec::UInt.decode(&[0, 0, 0]), Err(Error::UnexpectedEof));
}

#[test]
fn test_var_opaque_wire_layout() {
    let bytes = Codec::VarOpaque
        .encode(&Value::Opaque(vec![0x05, 0x06, 0x07]))
        .unwrap();
    assert_eq!(bytes, [0, 0, 0, 3, 5, 6, 7, 0]);
    let (value, rest) = Codec::VarOpaque.decode(&bytes).unwrap();
    assert_eq!(value, Value::Opaque(vec![5, 6, 7]));
    assert!(rest.is_empty());
}

#[test]
fn test_var_opaque_alignment() {
    for len in 0..=9usize {
        let bytes = Codec::VarOpaque
            .encode(&Value::Opaque(vec![0xAB; len]))
            .unwrap();
        assert_eq!(bytes.len() % 4, 0, "length {} not 4-byte aligned", len);
        // Everything past the payload is zero padding.
        for &b in &bytes[4 + len..] {
            assert_eq!(b, 0, "non-zero pad for length {}", len);
        }
        let (decoded, rest) = Codec::VarOpaque.decode(&bytes).unwrap();
        assert_eq!(decoded, Value::Opaque(vec![0xAB; len]));
        assert!(rest.is_empty());
    }
}

#[test]
fn test_var_opaque_empty() {
    let bytes = Codec::VarOpaque.encode(&Value::Opaque(vec![])).unwrap();
    assert_eq!(bytes, [0, 0, 0, 0]);
}

#[test]
fn test_fixed_opaque_pads_short_values() {
    let codec = Codec::FixedOpaque(3);
    let bytes = codec.encode(&Value::Opaque(vec![0x05, 0x06])).unwrap();
    assert_eq!(bytes, [5, 6, 0, 0]);
}

#[test]
fn test_fixed_opaque_capacity_exceeded() {
    let codec = Codec::FixedOpaque(3);
    assert_eq!(
        codec.encode(&Value::Opaque(vec![1, 2, 3, 4])),
        Err(Error::LengthOverflow { max: 3, got: 4 })
    );
}

#[test]
fn test_fixed_opaque_decode_takes_declared_length() {
    let codec = Codec::FixedOpaque(3);
    let (value, rest) = codec.decode(&[1, 2, 3, 0, 9, 9]).unwrap();
    assert_eq!(value, Value::Opaque(vec![1, 2, 3]));
    assert_eq!(rest, [9, 9]);
}

#[test]
fn test_fixed_opaque_decode_ignores_padding_content() {
    // Padding bytes are skipped without being checked for zero.
    let codec = Codec::FixedOpaque(3);
    let (value, rest) = codec.decode(&[1, 2, 3, 0xFF]).unwrap();
    assert_eq!(value, Value::Opaque(vec![1, 2, 3]));
    assert!(rest.is_empty());
}

#[test]
fn test_fixed_opaque_block_sized() {
    // Capacity already a multiple of 4: no padding on the wire.
    let codec = Codec::FixedOpaque(4);
    let bytes = codec
        .encode(&Value::Opaque(vec![0xDE, 0xAD, 0xBE, 0xEF]))
        .unwrap();
    assert_eq!(bytes, [0xDE, 0xAD, 0xBE, 0xEF]);
}

#[test]
fn test_fixed_opaque_decode_eof() {
    let codec = Codec::FixedOpaque(5);
    assert_eq!(codec.decode(&[1, 2, 3, 4, 5]), Err(Error::UnexpectedEof));
}

#[test]
fn test_enum_members_roundtrip() {
    let codec = enum_codec(&[("TEXT", 0), ("DATA", 1), ("EXEC", 2)]);
    let ty = codec.enum_type().unwrap().clone();
    for name in ["TEXT", "DATA", "EXEC"] {
        let member = ty.member(name).unwrap();
        let bytes = codec.encode(&member).unwrap();
        assert_eq!(bytes.len(), 4);
        let (decoded, rest) = codec.decode(&bytes).unwrap();
        assert_eq!(decoded, member);
        assert!(rest.is_empty());
    }
}

#[test]
fn test_enum_rejects_undeclared_value_on_decode() {
    let codec = enum_codec(&[("A", 0), ("B", 1)]);
    let err = codec.decode(&[0, 0, 0, 7]).unwrap_err();
    assert!(matches!(err, Error::InvalidDiscriminant { value: 7, .. }));
}

#[test]
fn test_enum_rejects_forged_value_on_encode() {
    let codec = enum_codec(&[("A", 0), ("B", 1)]);
    let forged = Value::Enum(xdrkit::EnumValue {
        name: "A".to_string(),
        value: 9,
    });
    assert!(matches!(
        codec.encode(&forged),
        Err(Error::InvalidDiscriminant { value: 9, .. })
    ));
}

#[test]
fn test_enum_duplicate_values_decode_first_declared() {
    let codec = enum_codec(&[("FIRST", 1), ("SECOND", 1)]);
    let (value, _) = codec.decode(&[0, 0, 0, 1]).unwrap();
    assert_eq!(value.as_enum().unwrap().name, "FIRST");
}

#[test]
fn test_type_mismatch() {
    let err = Codec::Int.encode(&Value::Opaque(vec![1])).unwrap_err();
    assert_eq!(
        err,
        Error::TypeMismatch {
            expected: "integer",
            found: "opaque"
        }
    );
}

// ── Struct composition ─────────────────────────────────────────────────────
//
// MyStruct / WrapperStruct / ParentStruct mirror the reference wire vectors
// for nested struct layouts.

fn my_struct() -> Arc<StructType> {
    Arc::new(StructType::new(
        "MyStruct",
        vec![
            Field::new("a", Codec::Int),
            Field::new("b", Codec::VarOpaque),
        ],
    ))
}

fn my_struct_value(ty: &StructType) -> Value {
    Value::Struct(
        ty.builder()
            .set("a", -3i64)
            .unwrap()
            .set("b", vec![0xEAu8])
            .unwrap()
            .build()
            .unwrap(),
    )
}

const MY_STRUCT_WIRE: [u8; 12] = [0xFF, 0xFF, 0xFF, 0xFD, 0, 0, 0, 1, 0xEA, 0, 0, 0];

#[test]
fn test_struct_wire_layout() {
    let ty = my_struct();
    let codec = Codec::Struct(ty.clone());
    let value = my_struct_value(&ty);
    assert_eq!(codec.encode(&value).unwrap(), MY_STRUCT_WIRE);
    let (decoded, rest) = codec.decode(&MY_STRUCT_WIRE).unwrap();
    assert_eq!(decoded, value);
    assert!(rest.is_empty());
}

#[test]
fn test_wrapper_struct_adds_no_framing() {
    let inner = my_struct();
    let wrapper = Arc::new(StructType::new(
        "WrapperStruct",
        vec![Field::new("a", Codec::Struct(inner.clone()))],
    ));
    let value = Value::Struct(
        wrapper
            .builder()
            .set("a", my_struct_value(&inner).as_struct().unwrap().clone())
            .unwrap()
            .build()
            .unwrap(),
    );
    let codec = Codec::Struct(wrapper);
    // A wrapping struct encodes identically to its only field.
    assert_eq!(codec.encode(&value).unwrap(), MY_STRUCT_WIRE);
    let (decoded, rest) = codec.decode(&MY_STRUCT_WIRE).unwrap();
    assert_eq!(decoded, value);
    assert!(rest.is_empty());
}

#[test]
fn test_parent_struct_field_order() {
    let inner = my_struct();
    let parent = Arc::new(StructType::new(
        "ParentStruct",
        vec![
            Field::new("a", Codec::Int),
            Field::new("b", Codec::Struct(inner.clone())),
            Field::new("c", Codec::Int),
        ],
    ));
    let value = Value::Struct(
        parent
            .builder()
            .set("a", 8i64)
            .unwrap()
            .set("b", my_struct_value(&inner).as_struct().unwrap().clone())
            .unwrap()
            .set("c", 5i64)
            .unwrap()
            .build()
            .unwrap(),
    );
    let codec = Codec::Struct(parent);
    let mut expected = vec![0, 0, 0, 8];
    expected.extend_from_slice(&MY_STRUCT_WIRE);
    expected.extend_from_slice(&[0, 0, 0, 5]);
    assert_eq!(codec.encode(&value).unwrap(), expected);
    let (decoded, rest) = codec.decode(&expected).unwrap();
    assert_eq!(decoded, value);
    assert!(rest.is_empty());
}

#[test]
fn test_struct_encode_is_field_concatenation() {
    let ty = my_struct();
    let codec = Codec::Struct(ty.clone());
    let value = my_struct_value(&ty);
    let instance = value.as_struct().unwrap();

    let mut concatenated = Vec::new();
    for field in ty.fields() {
        concatenated.extend(
            field
                .codec()
                .encode(instance.get(field.name()).unwrap())
                .unwrap(),
        );
    }
    assert_eq!(codec.encode(&value).unwrap(), concatenated);
}

#[test]
fn test_struct_decode_leaves_remainder() {
    let ty = my_struct();
    let codec = Codec::Struct(ty.clone());
    let mut buf = codec.encode(&my_struct_value(&ty)).unwrap();
    buf.extend([0xFF, 0xFF]);
    let (_, rest) = codec.decode(&buf).unwrap();
    assert_eq!(rest, [0xFF, 0xFF]);
}

#[test]
fn test_struct_decode_truncated_input() {
    let ty = my_struct();
    let codec = Codec::Struct(ty);
    assert_eq!(codec.decode(&MY_STRUCT_WIRE[..6]), Err(Error::UnexpectedEof));
}

#[test]
fn test_struct_encode_missing_field_is_rejected() {
    // A forged instance that bypassed the builder's required-field check.
    let ty = my_struct();
    let other = StructType::new("Other", vec![Field::new("a", Codec::Int)]);
    let forged = other.builder().set("a", 1i64).unwrap().build().unwrap();
    let err = Codec::Struct(ty)
        .encode(&Value::Struct(forged))
        .unwrap_err();
    assert_eq!(err, Error::MissingField("b".to_string()));
}

#[test]
fn test_codec_reuse_across_calls() {
    // Codecs hold immutable configuration only; the same instance services
    // any number of encode/decode calls.
    let codec = Codec::FixedOpaque(2);
    for _ in 0..3 {
        let bytes = codec.encode(&Value::Opaque(vec![1, 2])).unwrap();
        assert_eq!(bytes, [1, 2, 0, 0]);
        assert_eq!(codec.decode(&bytes).unwrap().0, Value::Opaque(vec![1, 2]));
    }
}
