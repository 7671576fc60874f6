use alloc::string::ToString;

use alloy_primitives::{Address, B256, I256, U256};

use crate::{
    error::DecodingError,
    options::DecodeOptions,
    reader::{Scope, Word, WORD_SIZE},
    types::ParamType,
    value::Value,
};

/// Address bytes sit in the low 20 bytes of their word.
const ADDRESS_PADDING: usize = WORD_SIZE - Address::len_bytes();

fn invalid(ty: &ParamType, offset: usize, reason: &'static str) -> DecodingError {
    DecodingError::InvalidEncoding {
        ty: ty.to_string(),
        offset,
        reason,
    }
}

/// Decodes the static primitive `ty` from word `index` of `scope`.
pub fn decode_primitive(
    ty: &ParamType,
    scope: &Scope<'_>,
    index: usize,
    options: &DecodeOptions,
) -> Result<Value, DecodingError> {
    ty.validate()?;
    let word = scope.read_word(index)?;
    let offset = scope.position(index);
    log::trace!("{ty} at {offset}");

    match ty {
        ParamType::Bool => decode_bool(word).ok_or_else(|| invalid(ty, offset, "not 0 or 1")),
        ParamType::Uint(bits) => decode_uint(word, *bits, options)
            .map(|v| Value::Uint(v, *bits))
            .ok_or_else(|| invalid(ty, offset, "value exceeds declared width")),
        ParamType::Int(bits) => decode_int(word, *bits, options)
            .map(|v| Value::Int(v, *bits))
            .ok_or_else(|| invalid(ty, offset, "value is not sign-extended")),
        ParamType::FixedBytes(len) => decode_fixed_bytes(word, *len, options)
            .map(|v| Value::FixedBytes(v, *len))
            .ok_or_else(|| invalid(ty, offset, "non-zero trailing bytes")),
        ParamType::Address => decode_address(word, options)
            .map(Value::Address)
            .ok_or_else(|| invalid(ty, offset, "non-zero high bytes")),
        _ => Err(DecodingError::UnsupportedType { ty: ty.to_string() }),
    }
}

fn decode_bool(word: &Word) -> Option<Value> {
    let (high, low) = word.split_at(WORD_SIZE - 1);
    if high.iter().any(|b| *b != 0) {
        return None;
    }
    match low[0] {
        0 => Some(Value::Bool(false)),
        1 => Some(Value::Bool(true)),
        _ => None,
    }
}

/// Mask covering the low `bits` bits. `bits` is in `1..=256`.
fn width_mask(bits: usize) -> U256 {
    U256::MAX >> (256 - bits)
}

fn decode_uint(word: &Word, bits: usize, options: &DecodeOptions) -> Option<U256> {
    let raw = U256::from_be_bytes(*word);
    let value = raw & width_mask(bits);
    if options.is_strict() && value != raw {
        return None;
    }
    Some(value)
}

fn decode_int(word: &Word, bits: usize, options: &DecodeOptions) -> Option<I256> {
    let raw = U256::from_be_bytes(*word);
    let mask = width_mask(bits);
    let low = raw & mask;
    let extended = if low.bit(bits - 1) { low | !mask } else { low };
    if options.is_strict() && extended != raw {
        return None;
    }
    Some(I256::from_raw(extended))
}

fn decode_fixed_bytes(word: &Word, len: usize, options: &DecodeOptions) -> Option<B256> {
    let (data, trailing) = word.split_at(len);
    if options.is_strict() && trailing.iter().any(|b| *b != 0) {
        return None;
    }
    let mut out = B256::ZERO;
    out[..len].copy_from_slice(data);
    Some(out)
}

fn decode_address(word: &Word, options: &DecodeOptions) -> Option<Address> {
    let (high, addr) = word.split_at(ADDRESS_PADDING);
    if options.is_strict() && high.iter().any(|b| *b != 0) {
        return None;
    }
    Some(Address::from_slice(addr))
}
