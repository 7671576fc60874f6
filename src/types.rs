use alloc::{boxed::Box, format, string::String, vec::Vec};
use core::fmt;

use crate::{error::DecodingError, reader::WORD_SIZE};

/// Declared type of a single parameter.
///
/// Descriptors are immutable; whether a type is dynamic is always derived from
/// its shape and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParamType {
    Bool,
    /// Unsigned integer of the given bit width.
    Uint(usize),
    /// Signed (two's complement) integer of the given bit width.
    Int(usize),
    /// `bytesN`, left-aligned in its word.
    FixedBytes(usize),
    Address,
    Bytes,
    String,
    FixedArray(usize, Box<ParamType>),
    Array(Box<ParamType>),
    /// Ordered named fields. Names may be empty.
    Tuple(Vec<(String, ParamType)>),
}

impl ParamType {
    pub fn fixed_array(len: usize, elem: ParamType) -> Self {
        ParamType::FixedArray(len, Box::new(elem))
    }

    pub fn array(elem: ParamType) -> Self {
        ParamType::Array(Box::new(elem))
    }

    /// Tuple with unnamed fields.
    pub fn tuple(fields: impl IntoIterator<Item = ParamType>) -> Self {
        ParamType::Tuple(fields.into_iter().map(|ty| (String::new(), ty)).collect())
    }

    pub fn is_dynamic(&self) -> bool {
        match self {
            ParamType::Bytes | ParamType::String | ParamType::Array(_) => true,
            ParamType::FixedArray(_, elem) => elem.is_dynamic(),
            ParamType::Tuple(fields) => fields.iter().any(|(_, ty)| ty.is_dynamic()),
            _ => false,
        }
    }

    /// Bytes occupied in the head of the declaring scope.
    ///
    /// Dynamic types only leave an offset word behind. Saturates instead of
    /// overflowing; a saturated size can never fit a real buffer.
    pub fn head_size(&self) -> usize {
        if self.is_dynamic() {
            return WORD_SIZE;
        }
        match self {
            ParamType::FixedArray(len, elem) => len.saturating_mul(elem.head_size()),
            ParamType::Tuple(fields) => fields
                .iter()
                .fold(0usize, |acc, (_, ty)| acc.saturating_add(ty.head_size())),
            _ => WORD_SIZE,
        }
    }

    /// Checks that every width in the type can be represented.
    pub fn validate(&self) -> Result<(), DecodingError> {
        let supported = match self {
            ParamType::Uint(bits) | ParamType::Int(bits) => {
                *bits > 0 && *bits <= 256 && bits % 8 == 0
            }
            ParamType::FixedBytes(len) => *len > 0 && *len <= WORD_SIZE,
            ParamType::FixedArray(_, elem) | ParamType::Array(elem) => {
                return elem.validate();
            }
            ParamType::Tuple(fields) => {
                return fields.iter().try_for_each(|(_, ty)| ty.validate());
            }
            ParamType::Bool | ParamType::Address | ParamType::Bytes | ParamType::String => true,
        };
        if supported {
            Ok(())
        } else {
            Err(DecodingError::UnsupportedType {
                ty: format!("{self}"),
            })
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamType::Bool => f.write_str("bool"),
            ParamType::Uint(bits) => write!(f, "uint{bits}"),
            ParamType::Int(bits) => write!(f, "int{bits}"),
            ParamType::FixedBytes(len) => write!(f, "bytes{len}"),
            ParamType::Address => f.write_str("address"),
            ParamType::Bytes => f.write_str("bytes"),
            ParamType::String => f.write_str("string"),
            ParamType::FixedArray(len, elem) => write!(f, "{elem}[{len}]"),
            ParamType::Array(elem) => write!(f, "{elem}[]"),
            ParamType::Tuple(fields) => {
                f.write_str("(")?;
                for (i, (_, ty)) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{ty}")?;
                }
                f.write_str(")")
            }
        }
    }
}

/// A contract method as far as argument decoding is concerned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Method {
    /// Not used for decoding.
    pub name: String,
    pub inputs: Vec<ParamType>,
}

impl Method {
    pub fn new(name: impl Into<String>, inputs: Vec<ParamType>) -> Self {
        Self {
            name: name.into(),
            inputs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::{string::ToString, vec};

    #[test]
    fn test_dynamism_is_transitive() {
        assert!(!ParamType::Uint(256).is_dynamic());
        assert!(ParamType::Bytes.is_dynamic());
        assert!(ParamType::array(ParamType::Bool).is_dynamic());
        assert!(!ParamType::fixed_array(3, ParamType::Address).is_dynamic());
        assert!(ParamType::fixed_array(3, ParamType::String).is_dynamic());

        let nested = ParamType::tuple(vec![
            ParamType::Uint(8),
            ParamType::tuple(vec![ParamType::fixed_array(2, ParamType::Bytes)]),
        ]);
        assert!(nested.is_dynamic());
        assert!(!ParamType::tuple(vec![ParamType::Bool, ParamType::Int(64)]).is_dynamic());
    }

    #[test]
    fn test_head_size() {
        assert_eq!(ParamType::Bool.head_size(), 32);
        assert_eq!(ParamType::String.head_size(), 32);
        assert_eq!(ParamType::fixed_array(3, ParamType::Uint(8)).head_size(), 96);
        assert_eq!(ParamType::fixed_array(3, ParamType::Bytes).head_size(), 32);
        let static_tuple = ParamType::tuple(vec![
            ParamType::Address,
            ParamType::fixed_array(2, ParamType::Bool),
        ]);
        assert_eq!(static_tuple.head_size(), 96);
        assert_eq!(ParamType::fixed_array(usize::MAX, ParamType::Bool).head_size(), usize::MAX);
    }

    #[test]
    fn test_validate_widths() {
        assert!(ParamType::Uint(8).validate().is_ok());
        assert!(ParamType::Int(256).validate().is_ok());
        assert!(ParamType::FixedBytes(32).validate().is_ok());

        for ty in [
            ParamType::Uint(0),
            ParamType::Uint(7),
            ParamType::Int(264),
            ParamType::FixedBytes(0),
            ParamType::FixedBytes(33),
            ParamType::array(ParamType::Uint(12)),
        ] {
            assert!(matches!(
                ty.validate(),
                Err(DecodingError::UnsupportedType { .. })
            ));
        }
    }

    #[test]
    fn test_display_canonical() {
        let ty = ParamType::array(ParamType::tuple(vec![
            ParamType::Uint(256),
            ParamType::fixed_array(2, ParamType::FixedBytes(4)),
            ParamType::String,
        ]));
        assert_eq!(ty.to_string(), "(uint256,bytes4[2],string)[]");
        assert_eq!(ParamType::array(ParamType::Address).to_string(), "address[]");
    }
}
