use alloc::string::String;
use thiserror::Error;

/// Flat classification of every failure the decoder can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    EmptyInput,
    NotAssignableDestination,
    SizeMismatch,
    OffsetOutOfRange,
    InvalidEncoding,
    UnsupportedType,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("empty input: {expected} parameters expected but the buffer is empty")]
    EmptyInput { expected: usize },

    #[error("destination holds at most {max} values, {required} parameters declared")]
    NotAssignableDestination { required: usize, max: usize },

    #[error("cannot decode into slots of unequal size (require: {required}, got: {available})")]
    SizeMismatch { required: usize, available: usize },

    #[error("argument {index}: {source}")]
    Argument {
        index: usize,
        #[source]
        source: DecodingError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodingError {
    #[error("read of {len} bytes at offset {offset} exceeds buffer of {available} bytes")]
    OffsetOutOfRange {
        offset: usize,
        len: usize,
        available: usize,
    },

    #[error("invalid {ty} encoding at offset {offset}: {reason}")]
    InvalidEncoding {
        ty: String,
        offset: usize,
        reason: &'static str,
    },

    #[error("unsupported type: {ty}")]
    UnsupportedType { ty: String },
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::EmptyInput { .. } => ErrorKind::EmptyInput,
            Error::NotAssignableDestination { .. } => ErrorKind::NotAssignableDestination,
            Error::SizeMismatch { .. } => ErrorKind::SizeMismatch,
            Error::Argument { source, .. } => source.kind(),
        }
    }

    /// Index of the parameter that failed, if the failure happened while decoding one.
    pub fn argument_index(&self) -> Option<usize> {
        match self {
            Error::Argument { index, .. } => Some(*index),
            _ => None,
        }
    }
}

impl DecodingError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DecodingError::OffsetOutOfRange { .. } => ErrorKind::OffsetOutOfRange,
            DecodingError::InvalidEncoding { .. } => ErrorKind::InvalidEncoding,
            DecodingError::UnsupportedType { .. } => ErrorKind::UnsupportedType,
        }
    }

    /// Attaches the index of the parameter being decoded.
    pub(crate) fn at_argument(self, index: usize) -> Error {
        Error::Argument {
            index,
            source: self,
        }
    }
}
