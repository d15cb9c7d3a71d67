//! Error types for wire format operations.

use std::fmt;

use bitstream::BitError;

use crate::types::FieldType;

/// Result type for wire decoding operations.
pub type WireResult<T> = Result<T, DecodeError>;

/// Result type for wire encoding operations.
pub type EncodeResult<T> = Result<T, EncodeError>;

/// Decode errors for the protocol layer.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DecodeError {
    /// Underlying bit reader failed (truncated input, bad varint).
    Bitstream(BitError),

    /// A wire type id that this protocol does not define.
    UnknownFieldType { raw: u8 },

    /// A field header resolved to an id outside the `i16` range.
    InvalidFieldId { raw: i64 },

    /// A varint decoded to a value wider than its declared wire type.
    IntegerOutOfRange { ty: FieldType, value: i64 },

    /// A container declared an element type that cannot carry values.
    InvalidElementType { ty: FieldType },

    /// String bytes were not valid UTF-8.
    InvalidUtf8 { len: usize },

    /// Limits exceeded.
    LimitsExceeded {
        kind: LimitKind,
        limit: usize,
        actual: usize,
    },

    /// `read_struct_end` without a matching `read_struct_begin`.
    UnbalancedStruct,
}

/// Specific wire limits that can be exceeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitKind {
    StringBytes,
    ContainerLength,
    NestingDepth,
}

/// Errors that can occur during encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EncodeError {
    /// Underlying bit writer failed.
    Bitstream(BitError),

    /// The wire type cannot be used in this position (e.g. `Stop` as a field type).
    InvalidFieldType { ty: FieldType },

    /// A length does not fit the wire's `u32` length prefix.
    LengthOverflow { length: usize },

    /// `write_struct_end` without a matching `write_struct_begin`.
    UnbalancedStruct,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bitstream(err) => write!(f, "bitstream error: {err}"),
            Self::UnknownFieldType { raw } => write!(f, "unknown wire type id: {raw}"),
            Self::InvalidFieldId { raw } => write!(f, "field id {raw} outside i16 range"),
            Self::IntegerOutOfRange { ty, value } => {
                write!(f, "value {value} out of range for {ty}")
            }
            Self::InvalidElementType { ty } => {
                write!(f, "invalid container element type: {ty}")
            }
            Self::InvalidUtf8 { len } => write!(f, "string of {len} bytes is not valid UTF-8"),
            Self::LimitsExceeded {
                kind,
                limit,
                actual,
            } => {
                write!(f, "{kind} limit exceeded: {actual} > {limit}")
            }
            Self::UnbalancedStruct => write!(f, "struct end without matching begin"),
        }
    }
}

impl fmt::Display for LimitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::StringBytes => "string bytes",
            Self::ContainerLength => "container length",
            Self::NestingDepth => "nesting depth",
        };
        write!(f, "{name}")
    }
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bitstream(err) => write!(f, "bitstream error: {err}"),
            Self::InvalidFieldType { ty } => write!(f, "{ty} cannot be written as a field type"),
            Self::LengthOverflow { length } => {
                write!(f, "length overflow: {length}")
            }
            Self::UnbalancedStruct => write!(f, "struct end without matching begin"),
        }
    }
}

impl std::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Bitstream(err) => Some(err),
            _ => None,
        }
    }
}

impl std::error::Error for EncodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Bitstream(err) => Some(err),
            _ => None,
        }
    }
}

impl From<BitError> for DecodeError {
    fn from(err: BitError) -> Self {
        Self::Bitstream(err)
    }
}

impl From<BitError> for EncodeError {
    fn from(err: BitError) -> Self {
        Self::Bitstream(err)
    }
}
