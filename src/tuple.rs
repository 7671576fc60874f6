use alloc::{string::String, vec::Vec};

use crate::{
    decoder::Heads,
    error::DecodingError,
    options::DecodeOptions,
    reader::Scope,
    types::ParamType,
    value::Value,
};

/// Decodes a tuple whose head starts at word `index` of `scope`.
///
/// A fully static tuple lives inline in the current scope. If any field is
/// dynamic the head holds a single offset and the fields are laid out
/// head/tail in a new scope starting at that offset.
pub fn decode_tuple(
    ty: &ParamType,
    fields: &[(String, ParamType)],
    scope: &Scope<'_>,
    index: usize,
    options: &DecodeOptions,
) -> Result<Value, DecodingError> {
    let mut heads = if ty.is_dynamic() {
        let offset = scope.read_offset(index)?;
        Heads::new(scope.nested(offset)?, 0, *options)
    } else {
        Heads::new(*scope, index, *options)
    };

    let mut values = Vec::with_capacity(fields.len());
    for (name, field) in fields {
        values.push((name.clone(), heads.decode_next(field)?));
    }
    Ok(Value::Tuple(values))
}
