use crate::{
    bytes::decode_dynamic_bytes,
    error::DecodingError,
    options::DecodeOptions,
    primitive::decode_primitive,
    reader::{Scope, WORD_SIZE},
    tuple::decode_tuple,
    types::ParamType,
    value::Value,
    vec::{decode_array, decode_fixed_array},
};

/// Decodes a value of type `ty` whose head starts at word `index` of `scope`.
///
/// Static types are read in place. Dynamic types only keep an offset word in
/// the head; their content is found relative to the start of `scope`.
pub fn decode_param(
    ty: &ParamType,
    scope: &Scope<'_>,
    index: usize,
    options: &DecodeOptions,
) -> Result<Value, DecodingError> {
    match ty {
        ParamType::Bool
        | ParamType::Uint(_)
        | ParamType::Int(_)
        | ParamType::FixedBytes(_)
        | ParamType::Address => decode_primitive(ty, scope, index, options),
        ParamType::Bytes | ParamType::String => decode_dynamic_bytes(ty, scope, index, options),
        ParamType::FixedArray(len, elem) => {
            decode_fixed_array(*len, elem, scope, index, options)
        }
        ParamType::Array(elem) => decode_array(elem, scope, index, options),
        ParamType::Tuple(fields) => decode_tuple(ty, fields, scope, index, options),
    }
}

/// Walks consecutive heads of one scope.
///
/// Each decoded value advances the cursor by its head size, so static tuples
/// and static fixed arrays consume as many words as they occupy inline.
#[derive(Debug, Clone, Copy)]
pub struct Heads<'a> {
    scope: Scope<'a>,
    index: usize,
    options: DecodeOptions,
}

impl<'a> Heads<'a> {
    pub fn new(scope: Scope<'a>, index: usize, options: DecodeOptions) -> Self {
        Self {
            scope,
            index,
            options,
        }
    }

    /// Word index of the next head inside the scope.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn decode_next(&mut self, ty: &ParamType) -> Result<Value, DecodingError> {
        let value = decode_param(ty, &self.scope, self.index, &self.options)?;
        self.index = self.index.saturating_add(head_words(ty));
        Ok(value)
    }
}

/// Number of head words `ty` occupies.
pub fn head_words(ty: &ParamType) -> usize {
    ty.head_size() / WORD_SIZE
}
