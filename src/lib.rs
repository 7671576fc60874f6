//! Type-directed decoder for contract call data.
//!
//! Arguments are laid out head/tail in 32-byte words: static values sit in
//! their head slot, dynamic values leave an offset there and keep their
//! content after all heads of the same scope.
//!
//! ```
//! use calldata_codec::{unpack_args, ParamType, Value};
//! use alloy_primitives::U256;
//!
//! let mut input = [0u8; 32];
//! input[31] = 0x2a;
//!
//! let mut args: Vec<Value> = Vec::new();
//! unpack_args(&mut args, &[ParamType::Uint(256)], &input).unwrap();
//! assert_eq!(args, vec![Value::Uint(U256::from(42), 256)]);
//! ```
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod args;
mod bytes;
mod decoder;
mod error;
mod options;
mod primitive;
mod reader;
mod tuple;
mod types;
mod value;
mod vec;


pub use args::{unpack_args, unpack_args_with, Destination};
pub use decoder::{decode_param, Heads};
pub use error::{DecodingError, Error, ErrorKind};
pub use options::{DecodeOptions, Padding};
pub use reader::{Scope, Word, WORD_SIZE};
pub use types::{Method, ParamType};
pub use value::Value;
