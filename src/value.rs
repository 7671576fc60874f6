use alloc::{string::String, vec::Vec};

use alloy_primitives::{Address, Bytes, B256, I256, U256};

use crate::types::ParamType;

/// A decoded argument, mirroring the shape of [`ParamType`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Bool(bool),
    /// Value and declared bit width.
    Uint(U256, usize),
    /// Value and declared bit width.
    Int(I256, usize),
    /// Left-aligned bytes and declared length; bytes past the length are zero.
    FixedBytes(B256, usize),
    Address(Address),
    Bytes(Bytes),
    String(String),
    /// Elements of both fixed-size and dynamic-size arrays.
    Array(Vec<Value>),
    Tuple(Vec<(String, Value)>),
}

impl Value {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_uint(&self) -> Option<U256> {
        match self {
            Value::Uint(v, _) => Some(*v),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<I256> {
        match self {
            Value::Int(v, _) => Some(*v),
            _ => None,
        }
    }

    /// The meaningful prefix of a `bytesN` value.
    pub fn as_fixed_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::FixedBytes(word, len) => word.get(..*len),
            _ => None,
        }
    }

    pub fn as_address(&self) -> Option<Address> {
        match self {
            Value::Address(a) => Some(*a),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b.as_ref()),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    pub fn as_tuple(&self) -> Option<&[(String, Value)]> {
        match self {
            Value::Tuple(fields) => Some(fields.as_slice()),
            _ => None,
        }
    }

    /// Looks up a tuple field by name.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.as_tuple()?
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    /// Whether this value has the shape described by `ty`.
    pub fn matches(&self, ty: &ParamType) -> bool {
        match (self, ty) {
            (Value::Bool(_), ParamType::Bool)
            | (Value::Address(_), ParamType::Address)
            | (Value::Bytes(_), ParamType::Bytes)
            | (Value::String(_), ParamType::String) => true,
            (Value::Uint(_, bits), ParamType::Uint(ty_bits))
            | (Value::Int(_, bits), ParamType::Int(ty_bits)) => bits == ty_bits,
            (Value::FixedBytes(_, len), ParamType::FixedBytes(ty_len)) => len == ty_len,
            (Value::Array(items), ParamType::FixedArray(len, elem)) => {
                items.len() == *len && items.iter().all(|item| item.matches(elem))
            }
            (Value::Array(items), ParamType::Array(elem)) => {
                items.iter().all(|item| item.matches(elem))
            }
            (Value::Tuple(fields), ParamType::Tuple(types)) => {
                fields.len() == types.len()
                    && fields
                        .iter()
                        .zip(types)
                        .all(|((_, value), (_, ty))| value.matches(ty))
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_matches_nested_shape() {
        let ty = ParamType::tuple(vec![
            ParamType::Uint(64),
            ParamType::fixed_array(2, ParamType::Bool),
        ]);
        let value = Value::Tuple(vec![
            (String::new(), Value::Uint(U256::from(7), 64)),
            (
                String::new(),
                Value::Array(vec![Value::Bool(true), Value::Bool(false)]),
            ),
        ]);
        assert!(value.matches(&ty));
        assert!(!Value::Uint(U256::from(7), 256).matches(&ParamType::Uint(64)));
        assert!(!Value::Array(vec![Value::Bool(true)])
            .matches(&ParamType::fixed_array(2, ParamType::Bool)));
    }

    #[test]
    fn test_accessors() {
        let mut word = [0u8; 32];
        word[..2].copy_from_slice(&[0xde, 0xad]);
        let fixed = Value::FixedBytes(B256::from(word), 2);
        assert_eq!(fixed.as_fixed_bytes(), Some(&[0xde, 0xad][..]));
        assert_eq!(fixed.as_bool(), None);

        let tuple = Value::Tuple(vec![("owner".into(), Value::Address(Address::ZERO))]);
        assert_eq!(tuple.field("owner"), Some(&Value::Address(Address::ZERO)));
        assert_eq!(tuple.field("spender"), None);
    }
}
