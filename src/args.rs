use alloc::vec::Vec;

use bytes::Bytes;

use crate::{
    decoder::Heads,
    error::{DecodingError, Error},
    options::DecodeOptions,
    reader::Scope,
    types::{Method, ParamType},
    value::Value,
};

/// Container the decoded arguments are written into.
///
/// A destination that already holds values is overwritten slot by slot; an
/// empty one is filled by appending.
pub trait Destination {
    /// Number of slots currently present.
    fn capacity(&self) -> usize;

    /// Largest number of values the destination can ever hold, `None` if unbounded.
    fn max_len(&self) -> Option<usize> {
        None
    }

    /// Overwrites an existing slot. `index` is below [`Destination::capacity`].
    fn set_at(&mut self, index: usize, value: Value);

    /// Adds a value past the current slots. A destination that cannot grow
    /// hands the value back.
    fn append_value(&mut self, value: Value) -> Result<(), Value>;

    /// Called once before appending `additional` values.
    fn reserve(&mut self, _additional: usize) {}
}

impl Destination for Vec<Value> {
    fn capacity(&self) -> usize {
        self.len()
    }

    fn set_at(&mut self, index: usize, value: Value) {
        self[index] = value;
    }

    fn append_value(&mut self, value: Value) -> Result<(), Value> {
        self.push(value);
        Ok(())
    }

    fn reserve(&mut self, additional: usize) {
        Vec::reserve_exact(self, additional);
    }
}

/// Fixed set of slots that cannot grow.
impl Destination for [Value] {
    fn capacity(&self) -> usize {
        self.len()
    }

    fn max_len(&self) -> Option<usize> {
        Some(self.len())
    }

    fn set_at(&mut self, index: usize, value: Value) {
        self[index] = value;
    }

    fn append_value(&mut self, value: Value) -> Result<(), Value> {
        Err(value)
    }
}

/// A single slot, for methods with exactly one input.
impl Destination for Option<Value> {
    fn capacity(&self) -> usize {
        usize::from(self.is_some())
    }

    fn max_len(&self) -> Option<usize> {
        Some(1)
    }

    fn set_at(&mut self, _index: usize, value: Value) {
        *self = Some(value);
    }

    fn append_value(&mut self, value: Value) -> Result<(), Value> {
        match self {
            Some(_) => Err(value),
            None => {
                *self = Some(value);
                Ok(())
            }
        }
    }
}

/// Decodes `input` according to `inputs` and writes one value per parameter
/// into `dest`.
///
/// On error `dest` may be partially written and must not be trusted.
pub fn unpack_args<D: Destination + ?Sized>(
    dest: &mut D,
    inputs: &[ParamType],
    input: &[u8],
) -> Result<(), Error> {
    unpack_args_with(dest, inputs, input, DecodeOptions::default())
}

pub fn unpack_args_with<D: Destination + ?Sized>(
    dest: &mut D,
    inputs: &[ParamType],
    input: &[u8],
    options: DecodeOptions,
) -> Result<(), Error> {
    if input.is_empty() && !inputs.is_empty() {
        return Err(Error::EmptyInput {
            expected: inputs.len(),
        });
    }

    if let Some(max) = dest.max_len() {
        if max < inputs.len() {
            return Err(Error::NotAssignableDestination {
                required: inputs.len(),
                max,
            });
        }
    }

    let existing = dest.capacity();
    if existing > 0 && inputs.len() > existing {
        return Err(Error::SizeMismatch {
            required: inputs.len(),
            available: existing,
        });
    }

    log::debug!(
        "unpacking {} arguments from {} bytes ({})",
        inputs.len(),
        input.len(),
        if existing > 0 { "overwrite" } else { "append" }
    );

    let buf = Bytes::copy_from_slice(input);
    let mut heads = Heads::new(Scope::new(&buf), 0, options);

    if existing > 0 {
        for (i, ty) in inputs.iter().enumerate() {
            dest.set_at(i, decode_argument(&mut heads, i, ty)?);
        }
        return Ok(());
    }

    dest.reserve(inputs.len());
    for (i, ty) in inputs.iter().enumerate() {
        if dest.append_value(decode_argument(&mut heads, i, ty)?).is_err() {
            return Err(Error::NotAssignableDestination {
                required: inputs.len(),
                max: dest.capacity(),
            });
        }
    }
    Ok(())
}

fn decode_argument(heads: &mut Heads<'_>, index: usize, ty: &ParamType) -> Result<Value, Error> {
    let value = heads
        .decode_next(ty)
        .map_err(|err: DecodingError| err.at_argument(index))?;
    log::trace!("argument {index}: {ty}");
    Ok(value)
}

impl Method {
    /// Decodes the method's arguments (without selector) into a fresh vector.
    pub fn decode_input(&self, input: &[u8]) -> Result<Vec<Value>, Error> {
        self.decode_input_with(input, DecodeOptions::default())
    }

    pub fn decode_input_with(
        &self,
        input: &[u8],
        options: DecodeOptions,
    ) -> Result<Vec<Value>, Error> {
        let mut values = Vec::new();
        unpack_args_with(&mut values, &self.inputs, input, options)?;
        Ok(values)
    }
}
