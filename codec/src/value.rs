//! Field values in decoded form.

use std::fmt;

use wire::{FieldType, ProtocolReader, ProtocolWriter};

use crate::error::{CodecError, CodecResult};

/// A single field value, tagged with its wire type.
///
/// This is the currency of reflective access: generic tools read and write
/// record fields through `FieldValue` without knowing the record's type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldValue {
    Bool(bool),
    Byte(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    String(String),
}

impl FieldValue {
    /// The wire type this value is encoded as.
    #[must_use]
    pub const fn field_type(&self) -> FieldType {
        match self {
            Self::Bool(_) => FieldType::Bool,
            Self::Byte(_) => FieldType::Byte,
            Self::I16(_) => FieldType::I16,
            Self::I32(_) => FieldType::I32,
            Self::I64(_) => FieldType::I64,
            Self::String(_) => FieldType::String,
        }
    }

    /// Writes the raw value, without a field header.
    pub fn write(&self, writer: &mut ProtocolWriter) -> CodecResult<()> {
        match self {
            Self::Bool(v) => writer.write_bool(*v)?,
            Self::Byte(v) => writer.write_byte(*v)?,
            Self::I16(v) => writer.write_i16(*v)?,
            Self::I32(v) => writer.write_i32(*v)?,
            Self::I64(v) => writer.write_i64(*v)?,
            Self::String(v) => writer.write_string(v)?,
        }
        Ok(())
    }

    /// Reads a raw value of type `ty`.
    pub fn read(reader: &mut ProtocolReader<'_>, ty: FieldType) -> CodecResult<Self> {
        let value = match ty {
            FieldType::Bool => Self::Bool(reader.read_bool()?),
            FieldType::Byte => Self::Byte(reader.read_byte()?),
            FieldType::I16 => Self::I16(reader.read_i16()?),
            FieldType::I32 => Self::I32(reader.read_i32()?),
            FieldType::I64 => Self::I64(reader.read_i64()?),
            FieldType::String => Self::String(reader.read_string()?),
            other => return Err(CodecError::UnsupportedFieldType { ty: other }),
        };
        Ok(value)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::Byte(v) => write!(f, "{v}"),
            Self::I16(v) => write!(f, "{v}"),
            Self::I32(v) => write!(f, "{v}"),
            Self::I64(v) => write!(f, "{v}"),
            Self::String(v) => f.write_str(v),
        }
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i16> for FieldValue {
    fn from(value: i16) -> Self {
        Self::I16(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        Self::I32(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::I64(value)
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}
