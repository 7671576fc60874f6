use alloc::string::{String, ToString};

use bytes::Bytes;

use crate::{
    error::DecodingError,
    options::DecodeOptions,
    reader::{Scope, WORD_SIZE},
    types::ParamType,
    value::Value,
};

/// Decodes `bytes` or `string` whose offset word is at `index` of `scope`.
///
/// Layout, with the offset relative to the start of `scope`:
///
/// ```text
/// index  : offset ──┐
/// ...               │
/// offset : length <─┘
/// +32    : data, right-padded to a multiple of 32
/// ```
pub fn decode_dynamic_bytes(
    ty: &ParamType,
    scope: &Scope<'_>,
    index: usize,
    options: &DecodeOptions,
) -> Result<Value, DecodingError> {
    let offset = scope.read_offset(index)?;
    let data = read_bytes(ty, scope, offset, options)?;

    match ty {
        ParamType::Bytes => Ok(Value::Bytes(data.into())),
        ParamType::String => {
            let text = core::str::from_utf8(&data).map_err(|_| DecodingError::InvalidEncoding {
                ty: ty.to_string(),
                offset: data_position(scope, offset),
                reason: "invalid utf-8",
            })?;
            Ok(Value::String(String::from(text)))
        }
        _ => Err(DecodingError::UnsupportedType { ty: ty.to_string() }),
    }
}

fn data_position(scope: &Scope<'_>, offset: usize) -> usize {
    scope
        .base()
        .saturating_add(offset)
        .saturating_add(WORD_SIZE)
}

fn read_bytes(
    ty: &ParamType,
    scope: &Scope<'_>,
    offset: usize,
    options: &DecodeOptions,
) -> Result<Bytes, DecodingError> {
    let data = scope.read_dynamic_bytes(offset)?;
    if options.is_strict() {
        let padding = scope.read_padding(offset, data.len())?;
        if padding.iter().any(|b| *b != 0) {
            return Err(DecodingError::InvalidEncoding {
                ty: ty.to_string(),
                offset: data_position(scope, offset).saturating_add(data.len()),
                reason: "non-zero padding",
            });
        }
    }
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use hex_literal::hex;

    fn decode(ty: ParamType, buf: &[u8], options: DecodeOptions) -> Result<Value, DecodingError> {
        let buf = Bytes::copy_from_slice(buf);
        decode_dynamic_bytes(&ty, &Scope::new(&buf), 0, &options)
    }

    #[test]
    fn test_decode_bytes() {
        let encoded = hex!(
            "0000000000000000000000000000000000000000000000000000000000000020"
            "0000000000000000000000000000000000000000000000000000000000000003"
            "0102030000000000000000000000000000000000000000000000000000000000"
        );
        let value = decode(ParamType::Bytes, &encoded, DecodeOptions::strict()).unwrap();
        assert_eq!(value.as_bytes(), Some(&[1u8, 2, 3][..]));
    }

    #[test]
    fn test_decode_empty_bytes() {
        let encoded = hex!(
            "0000000000000000000000000000000000000000000000000000000000000020"
            "0000000000000000000000000000000000000000000000000000000000000000"
        );
        let value = decode(ParamType::Bytes, &encoded, DecodeOptions::strict()).unwrap();
        assert_eq!(value.as_bytes(), Some(&[0u8; 0][..]));
    }

    #[test]
    fn test_decode_string() {
        // "hello world"
        let encoded = hex!(
            "0000000000000000000000000000000000000000000000000000000000000020"
            "000000000000000000000000000000000000000000000000000000000000000b"
            "68656c6c6f20776f726c64000000000000000000000000000000000000000000"
        );
        let value = decode(ParamType::String, &encoded, DecodeOptions::default()).unwrap();
        assert_eq!(value.as_str(), Some("hello world"));
    }

    #[test]
    fn test_invalid_utf8() {
        let encoded = hex!(
            "0000000000000000000000000000000000000000000000000000000000000020"
            "0000000000000000000000000000000000000000000000000000000000000002"
            "c328000000000000000000000000000000000000000000000000000000000000"
        );
        assert_eq!(
            decode(ParamType::String, &encoded, DecodeOptions::default()),
            Err(DecodingError::InvalidEncoding {
                ty: "string".into(),
                offset: 64,
                reason: "invalid utf-8",
            })
        );
    }

    #[test]
    fn test_padding_policy() {
        let dirty = hex!(
            "0000000000000000000000000000000000000000000000000000000000000020"
            "0000000000000000000000000000000000000000000000000000000000000001"
            "01ff000000000000000000000000000000000000000000000000000000000000"
        );
        assert_eq!(
            decode(ParamType::Bytes, &dirty, DecodeOptions::default())
                .unwrap()
                .as_bytes(),
            Some(&[1u8][..])
        );
        assert_eq!(
            decode(ParamType::Bytes, &dirty, DecodeOptions::strict())
                .unwrap_err()
                .kind(),
            ErrorKind::InvalidEncoding
        );

        // content present but padding cut off
        let short = hex!(
            "0000000000000000000000000000000000000000000000000000000000000020"
            "0000000000000000000000000000000000000000000000000000000000000002"
            "0102"
        );
        assert!(decode(ParamType::Bytes, &short, DecodeOptions::default()).is_ok());
        assert_eq!(
            decode(ParamType::Bytes, &short, DecodeOptions::strict())
                .unwrap_err()
                .kind(),
            ErrorKind::OffsetOutOfRange
        );
    }

    #[test]
    fn test_length_past_end() {
        let encoded = hex!(
            "0000000000000000000000000000000000000000000000000000000000000020"
            "0000000000000000000000000000000000000000000000000000000000000100"
            "0102030000000000000000000000000000000000000000000000000000000000"
        );
        assert_eq!(
            decode(ParamType::Bytes, &encoded, DecodeOptions::default())
                .unwrap_err()
                .kind(),
            ErrorKind::OffsetOutOfRange
        );
    }
}
