//! Encoding scheme selection and whole-buffer helpers.

use std::fmt;
use std::str::FromStr;

use wire::{Limits, ProtocolReader, ProtocolWriter};

use crate::error::{CodecError, CodecResult};
use crate::wire_struct::WireStruct;

/// Which encoding a record is written with.
///
/// The scheme is not recorded in the bytes; a reader must use the scheme the
/// writer used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Scheme {
    /// Field-tagged, skips unknown fields.
    #[default]
    Standard,
    /// Positional presence bitset plus raw values.
    Tuple,
}

impl Scheme {
    /// Both schemes.
    pub const ALL: [Self; 2] = [Self::Standard, Self::Tuple];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Tuple => "tuple",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Scheme {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|scheme| scheme.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| CodecError::UnknownScheme { name: s.to_owned() })
    }
}

/// Encodes `value` into a fresh buffer.
pub fn encode_to_vec<T: WireStruct>(value: &T, scheme: Scheme) -> CodecResult<Vec<u8>> {
    let mut writer = ProtocolWriter::new();
    value.write(&mut writer, scheme)?;
    tracing::trace!(
        struct_name = T::registry().struct_name(),
        %scheme,
        len = writer.bytes_written(),
        "encoded record"
    );
    Ok(writer.finish())
}

/// Decodes a record from `bytes`.
///
/// With [`Scheme::Standard`] the record must consume the whole buffer.
/// Tuple input is not checked for leftovers.
pub fn decode_from_slice<T: WireStruct>(
    bytes: &[u8],
    scheme: Scheme,
    limits: &Limits,
) -> CodecResult<T> {
    let mut reader = ProtocolReader::new(bytes, limits);
    let mut value = T::default();
    value.read(&mut reader, scheme)?;
    if scheme == Scheme::Standard && !reader.is_empty() {
        return Err(CodecError::TrailingBytes {
            remaining: reader.remaining_bytes(),
        });
    }
    tracing::trace!(
        struct_name = T::registry().struct_name(),
        %scheme,
        consumed = reader.position(),
        "decoded record"
    );
    Ok(value)
}
