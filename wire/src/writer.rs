//! Protocol writer: field headers, struct framing and value encodings.

use bitstream::BitWriter;

use crate::error::{EncodeError, EncodeResult};
use crate::types::{
    FieldHeader, FieldType, ListHeader, MapHeader, LONG_LIST_THRESHOLD, MAX_SHORT_DELTA,
};

/// Writes protocol values into a growable buffer.
///
/// Struct framing emits no bytes: `write_struct_begin` and `write_struct_end`
/// only maintain the last-field-id stack used for short field headers.
#[derive(Debug, Default)]
pub struct ProtocolWriter {
    bits: BitWriter,
    last_field_id: i16,
    field_id_stack: Vec<i16>,
}

impl ProtocolWriter {
    /// Creates an empty writer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a writer with pre-allocated capacity in bytes.
    #[must_use]
    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            bits: BitWriter::with_capacity(bytes),
            last_field_id: 0,
            field_id_stack: Vec::new(),
        }
    }

    /// Returns the number of bytes written so far.
    #[must_use]
    pub fn bytes_written(&self) -> usize {
        self.bits.bits_written().div_ceil(8)
    }

    /// Enters a struct.
    pub fn write_struct_begin(&mut self) {
        self.field_id_stack.push(self.last_field_id);
        self.last_field_id = 0;
    }

    /// Leaves a struct.
    pub fn write_struct_end(&mut self) -> EncodeResult<()> {
        self.last_field_id = self
            .field_id_stack
            .pop()
            .ok_or(EncodeError::UnbalancedStruct)?;
        Ok(())
    }

    /// Writes a field header.
    ///
    /// Uses the one-byte form `(delta << 4) | type` when the id follows the
    /// previous field id by 1..=15, otherwise the type byte and a zigzag id.
    pub fn write_field_begin(&mut self, header: FieldHeader) -> EncodeResult<()> {
        if header.is_stop() {
            return Err(EncodeError::InvalidFieldType { ty: header.ty });
        }
        let delta = i32::from(header.id) - i32::from(self.last_field_id);
        if delta > 0 && delta <= i32::from(MAX_SHORT_DELTA) {
            let byte = ((delta as u8) << 4) | header.ty.raw();
            self.bits.write_u8_aligned(byte)?;
        } else {
            self.bits.write_u8_aligned(header.ty.raw())?;
            self.bits.write_vars32(i32::from(header.id))?;
        }
        self.last_field_id = header.id;
        Ok(())
    }

    /// Writes the end-of-fields marker.
    pub fn write_field_stop(&mut self) -> EncodeResult<()> {
        self.bits.write_u8_aligned(FieldType::Stop.raw())?;
        Ok(())
    }

    pub fn write_bool(&mut self, value: bool) -> EncodeResult<()> {
        self.bits.write_u8_aligned(u8::from(value))?;
        Ok(())
    }

    pub fn write_byte(&mut self, value: i8) -> EncodeResult<()> {
        self.bits.write_u8_aligned(value as u8)?;
        Ok(())
    }

    pub fn write_i16(&mut self, value: i16) -> EncodeResult<()> {
        self.bits.write_vars32(i32::from(value))?;
        Ok(())
    }

    pub fn write_i32(&mut self, value: i32) -> EncodeResult<()> {
        self.bits.write_vars32(value)?;
        Ok(())
    }

    pub fn write_i64(&mut self, value: i64) -> EncodeResult<()> {
        self.bits.write_vars64(value)?;
        Ok(())
    }

    pub fn write_double(&mut self, value: f64) -> EncodeResult<()> {
        self.bits.write_u64_aligned(value.to_bits())?;
        Ok(())
    }

    /// Writes a length-prefixed UTF-8 string.
    pub fn write_string(&mut self, value: &str) -> EncodeResult<()> {
        self.write_binary(value.as_bytes())
    }

    /// Writes a length-prefixed byte run.
    pub fn write_binary(&mut self, value: &[u8]) -> EncodeResult<()> {
        let len = u32::try_from(value.len()).map_err(|_| EncodeError::LengthOverflow {
            length: value.len(),
        })?;
        self.bits.write_varu32(len)?;
        self.bits.write_bytes_aligned(value)?;
        Ok(())
    }

    /// Writes a list header.
    pub fn write_list_begin(&mut self, header: ListHeader) -> EncodeResult<()> {
        self.write_collection_header(header)
    }

    /// Writes a set header; identical to a list header on the wire.
    pub fn write_set_begin(&mut self, header: ListHeader) -> EncodeResult<()> {
        self.write_collection_header(header)
    }

    /// Writes a map header.
    pub fn write_map_begin(&mut self, header: MapHeader) -> EncodeResult<()> {
        self.bits.write_varu32(header.size)?;
        if header.size > 0 {
            if header.key == FieldType::Stop || header.value == FieldType::Stop {
                return Err(EncodeError::InvalidFieldType {
                    ty: FieldType::Stop,
                });
            }
            self.bits
                .write_u8_aligned((header.key.raw() << 4) | header.value.raw())?;
        }
        Ok(())
    }

    /// Writes a fixed-width presence bitset, MSB-first, padded to a byte boundary.
    pub fn write_bitset(&mut self, bits: &[bool]) -> EncodeResult<()> {
        for &bit in bits {
            self.bits.write_bit(bit);
        }
        self.bits.align_to_byte();
        Ok(())
    }

    /// Finishes writing and returns the encoded bytes.
    #[must_use]
    pub fn finish(self) -> Vec<u8> {
        self.bits.finish()
    }

    fn write_collection_header(&mut self, header: ListHeader) -> EncodeResult<()> {
        if header.elem == FieldType::Stop {
            return Err(EncodeError::InvalidFieldType { ty: header.elem });
        }
        if header.size < LONG_LIST_THRESHOLD {
            self.bits
                .write_u8_aligned(((header.size as u8) << 4) | header.elem.raw())?;
        } else {
            self.bits.write_u8_aligned(0xF0 | header.elem.raw())?;
            self.bits.write_varu32(header.size)?;
        }
        Ok(())
    }
}
