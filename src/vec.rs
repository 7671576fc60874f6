use alloc::vec::Vec;

use crate::{
    decoder::{head_words, Heads},
    error::DecodingError,
    options::DecodeOptions,
    reader::{Scope, WORD_SIZE},
    types::ParamType,
    value::Value,
};

/// Decodes `T[len]` whose head starts at word `index` of `scope`.
///
/// A static element type keeps the whole array inline. A dynamic element type
/// turns the array into a dynamic value: the head holds an offset to a new
/// scope that contains one head per element.
pub fn decode_fixed_array(
    len: usize,
    elem: &ParamType,
    scope: &Scope<'_>,
    index: usize,
    options: &DecodeOptions,
) -> Result<Value, DecodingError> {
    if elem.is_dynamic() {
        let offset = scope.read_offset(index)?;
        let inner = scope.nested(offset)?;
        inner.ensure_words(len)?;
        return decode_elements(len, elem, inner, 0, options);
    }

    // Zero-sized elements (`T[0][n]`, `()[n]`) still count as one word each,
    // so `len` is always bounded by the buffer.
    let words = head_words(elem).max(1).saturating_mul(len);
    scope.ensure_words(index.saturating_add(words))?;
    decode_elements(len, elem, *scope, index, options)
}

/// Decodes `T[]` whose offset word is at `index` of `scope`.
///
/// ```text
/// offset      : length
/// offset + 32 : element heads (new scope)
/// ...         : element tails
/// ```
pub fn decode_array(
    elem: &ParamType,
    scope: &Scope<'_>,
    index: usize,
    options: &DecodeOptions,
) -> Result<Value, DecodingError> {
    let offset = scope.read_offset(index)?;
    let inner = scope.nested(offset)?;
    let len = inner.read_length(0)?;
    let elements = inner.nested(WORD_SIZE)?;

    // Every element needs at least one word, even when its head is empty.
    elements.ensure_words(head_words(elem).max(1).saturating_mul(len))?;
    log::trace!("{elem}[] of {len} at {}", elements.base());

    decode_elements(len, elem, elements, 0, options)
}

fn decode_elements(
    len: usize,
    elem: &ParamType,
    scope: Scope<'_>,
    start: usize,
    options: &DecodeOptions,
) -> Result<Value, DecodingError> {
    let mut heads = Heads::new(scope, start, *options);
    let mut items = Vec::with_capacity(len.min(scope.remaining() / WORD_SIZE));
    for _ in 0..len {
        items.push(heads.decode_next(elem)?);
    }
    Ok(Value::Array(items))
}
