//! Wire type ids and header types.

use std::fmt;

use crate::error::DecodeError;

/// Largest field-id delta that fits in the short field header form.
pub const MAX_SHORT_DELTA: i16 = 15;

/// Element count at which list/set headers switch to the long form.
pub const LONG_LIST_THRESHOLD: u32 = 15;

/// Wire type carried in every field header.
///
/// The numeric ids are part of the wire format and must never change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum FieldType {
    /// End-of-fields marker; never a real field's type.
    Stop = 0,
    Bool = 1,
    Byte = 3,
    I16 = 4,
    I32 = 5,
    I64 = 6,
    Double = 7,
    /// UTF-8 string or opaque binary; identical on the wire.
    String = 8,
    List = 9,
    Set = 10,
    Map = 11,
    Struct = 12,
}

impl FieldType {
    /// Parses a wire type from its raw id.
    pub const fn parse(raw: u8) -> Result<Self, DecodeError> {
        match raw {
            0 => Ok(Self::Stop),
            1 => Ok(Self::Bool),
            3 => Ok(Self::Byte),
            4 => Ok(Self::I16),
            5 => Ok(Self::I32),
            6 => Ok(Self::I64),
            7 => Ok(Self::Double),
            8 => Ok(Self::String),
            9 => Ok(Self::List),
            10 => Ok(Self::Set),
            11 => Ok(Self::Map),
            12 => Ok(Self::Struct),
            _ => Err(DecodeError::UnknownFieldType { raw }),
        }
    }

    /// Returns the raw wire id.
    #[must_use]
    pub const fn raw(self) -> u8 {
        self as u8
    }

    /// Lowercase name, as used in diagnostics and schema dumps.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Stop => "stop",
            Self::Bool => "bool",
            Self::Byte => "byte",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::Double => "double",
            Self::String => "string",
            Self::List => "list",
            Self::Set => "set",
            Self::Map => "map",
            Self::Struct => "struct",
        }
    }

    /// Parses a wire type from its lowercase name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        ALL_TYPES.iter().copied().find(|ty| ty.name() == name)
    }

    /// Returns `true` for struct, list, set and map.
    #[must_use]
    pub const fn is_compound(self) -> bool {
        matches!(self, Self::Struct | Self::List | Self::Set | Self::Map)
    }
}

const ALL_TYPES: [FieldType; 12] = [
    FieldType::Stop,
    FieldType::Bool,
    FieldType::Byte,
    FieldType::I16,
    FieldType::I32,
    FieldType::I64,
    FieldType::Double,
    FieldType::String,
    FieldType::List,
    FieldType::Set,
    FieldType::Map,
    FieldType::Struct,
];

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A decoded field header: the field id and the wire type of its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldHeader {
    pub id: i16,
    pub ty: FieldType,
}

impl FieldHeader {
    /// Creates a field header.
    #[must_use]
    pub const fn new(id: i16, ty: FieldType) -> Self {
        Self { id, ty }
    }

    /// The end-of-fields marker.
    #[must_use]
    pub const fn stop() -> Self {
        Self {
            id: 0,
            ty: FieldType::Stop,
        }
    }

    /// Returns `true` if this header terminates a struct.
    #[must_use]
    pub const fn is_stop(self) -> bool {
        matches!(self.ty, FieldType::Stop)
    }
}

/// Header for a list or set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListHeader {
    pub elem: FieldType,
    pub size: u32,
}

/// Header for a map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapHeader {
    pub key: FieldType,
    pub value: FieldType,
    pub size: u32,
}
