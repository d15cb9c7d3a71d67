//! Protocol reader with bounded decoding and value skipping.

use bitstream::BitReader;

use crate::error::{DecodeError, LimitKind, WireResult};
use crate::limits::Limits;
use crate::types::{FieldHeader, FieldType, ListHeader, MapHeader};

/// Reads protocol values from a byte slice.
///
/// Every length and nesting level is checked against [`Limits`] before it is
/// acted upon. The reader never panics on malformed input.
#[derive(Debug)]
pub struct ProtocolReader<'a> {
    bits: BitReader<'a>,
    limits: Limits,
    last_field_id: i16,
    field_id_stack: Vec<i16>,
}

impl<'a> ProtocolReader<'a> {
    /// Creates a reader over `data`.
    #[must_use]
    pub fn new(data: &'a [u8], limits: &Limits) -> Self {
        Self {
            bits: BitReader::new(data),
            limits: limits.clone(),
            last_field_id: 0,
            field_id_stack: Vec::new(),
        }
    }

    /// Returns the byte offset of the next read.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.bits.byte_position()
    }

    /// Returns the number of unread bytes.
    #[must_use]
    pub const fn remaining_bytes(&self) -> usize {
        self.bits.bits_remaining() / 8
    }

    /// Returns `true` if all input has been consumed.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Enters a struct.
    pub fn read_struct_begin(&mut self) -> WireResult<()> {
        self.check_depth(self.field_id_stack.len() + 1)?;
        self.field_id_stack.push(self.last_field_id);
        self.last_field_id = 0;
        Ok(())
    }

    /// Leaves a struct.
    pub fn read_struct_end(&mut self) -> WireResult<()> {
        self.last_field_id = self
            .field_id_stack
            .pop()
            .ok_or(DecodeError::UnbalancedStruct)?;
        Ok(())
    }

    /// Reads the next field header, or [`FieldHeader::stop`] at end of struct.
    pub fn read_field_begin(&mut self) -> WireResult<FieldHeader> {
        let byte = self.bits.read_u8_aligned()?;
        let ty = FieldType::parse(byte & 0x0F)?;
        if ty == FieldType::Stop {
            return Ok(FieldHeader::stop());
        }
        let delta = byte >> 4;
        let id = if delta == 0 {
            let raw = self.bits.read_vars32()?;
            i16::try_from(raw).map_err(|_| DecodeError::InvalidFieldId {
                raw: i64::from(raw),
            })?
        } else {
            self.last_field_id
                .checked_add(i16::from(delta))
                .ok_or(DecodeError::InvalidFieldId {
                    raw: i64::from(self.last_field_id) + i64::from(delta),
                })?
        };
        self.last_field_id = id;
        Ok(FieldHeader::new(id, ty))
    }

    /// Reads a boolean byte; any non-zero byte is `true`.
    pub fn read_bool(&mut self) -> WireResult<bool> {
        Ok(self.bits.read_u8_aligned()? != 0)
    }

    pub fn read_byte(&mut self) -> WireResult<i8> {
        Ok(self.bits.read_u8_aligned()? as i8)
    }

    pub fn read_i16(&mut self) -> WireResult<i16> {
        let value = self.bits.read_vars32()?;
        i16::try_from(value).map_err(|_| DecodeError::IntegerOutOfRange {
            ty: FieldType::I16,
            value: i64::from(value),
        })
    }

    pub fn read_i32(&mut self) -> WireResult<i32> {
        Ok(self.bits.read_vars32()?)
    }

    pub fn read_i64(&mut self) -> WireResult<i64> {
        Ok(self.bits.read_vars64()?)
    }

    pub fn read_double(&mut self) -> WireResult<f64> {
        Ok(f64::from_bits(self.bits.read_u64_aligned()?))
    }

    /// Reads a length-prefixed UTF-8 string.
    pub fn read_string(&mut self) -> WireResult<String> {
        let bytes = self.read_binary()?;
        std::str::from_utf8(bytes)
            .map(str::to_owned)
            .map_err(|_| DecodeError::InvalidUtf8 { len: bytes.len() })
    }

    /// Reads a length-prefixed byte run, borrowed from the input.
    pub fn read_binary(&mut self) -> WireResult<&'a [u8]> {
        let len = self.bits.read_varu32()? as usize;
        if len > self.limits.max_string_bytes {
            return Err(DecodeError::LimitsExceeded {
                kind: LimitKind::StringBytes,
                limit: self.limits.max_string_bytes,
                actual: len,
            });
        }
        Ok(self.bits.read_bytes_aligned(len)?)
    }

    /// Reads a list header.
    pub fn read_list_begin(&mut self) -> WireResult<ListHeader> {
        let byte = self.bits.read_u8_aligned()?;
        let elem = self.element_type(byte & 0x0F)?;
        let short = u32::from(byte >> 4);
        let size = if short == 0x0F {
            self.bits.read_varu32()?
        } else {
            short
        };
        self.check_container(size)?;
        Ok(ListHeader { elem, size })
    }

    /// Reads a set header.
    pub fn read_set_begin(&mut self) -> WireResult<ListHeader> {
        self.read_list_begin()
    }

    /// Reads a map header.
    pub fn read_map_begin(&mut self) -> WireResult<MapHeader> {
        let size = self.bits.read_varu32()?;
        self.check_container(size)?;
        if size == 0 {
            return Ok(MapHeader {
                key: FieldType::Stop,
                value: FieldType::Stop,
                size,
            });
        }
        let byte = self.bits.read_u8_aligned()?;
        let key = self.element_type(byte >> 4)?;
        let value = self.element_type(byte & 0x0F)?;
        Ok(MapHeader { key, value, size })
    }

    /// Reads a fixed-width presence bitset written by `write_bitset`.
    pub fn read_bitset(&mut self, width: usize) -> WireResult<Vec<bool>> {
        let mut bits = Vec::with_capacity(width);
        for _ in 0..width {
            bits.push(self.bits.read_bit()?);
        }
        self.bits.align_to_byte()?;
        Ok(bits)
    }

    /// Skips one value of type `ty`, recursing into compound values.
    pub fn skip(&mut self, ty: FieldType) -> WireResult<()> {
        self.skip_at_depth(ty, self.field_id_stack.len())
    }

    fn skip_at_depth(&mut self, ty: FieldType, depth: usize) -> WireResult<()> {
        match ty {
            FieldType::Stop => Err(DecodeError::InvalidElementType { ty }),
            FieldType::Bool | FieldType::Byte => {
                self.bits.read_u8_aligned()?;
                Ok(())
            }
            FieldType::I16 | FieldType::I32 | FieldType::I64 => {
                self.bits.read_varu64()?;
                Ok(())
            }
            FieldType::Double => {
                self.bits.read_u64_aligned()?;
                Ok(())
            }
            FieldType::String => {
                self.read_binary()?;
                Ok(())
            }
            FieldType::Struct => {
                self.check_depth(depth + 1)?;
                self.read_struct_begin()?;
                loop {
                    let header = self.read_field_begin()?;
                    if header.is_stop() {
                        break;
                    }
                    self.skip_at_depth(header.ty, depth + 1)?;
                }
                self.read_struct_end()
            }
            FieldType::List | FieldType::Set => {
                self.check_depth(depth + 1)?;
                let header = if ty == FieldType::Set {
                    self.read_set_begin()?
                } else {
                    self.read_list_begin()?
                };
                for _ in 0..header.size {
                    self.skip_at_depth(header.elem, depth + 1)?;
                }
                Ok(())
            }
            FieldType::Map => {
                self.check_depth(depth + 1)?;
                let header = self.read_map_begin()?;
                for _ in 0..header.size {
                    self.skip_at_depth(header.key, depth + 1)?;
                    self.skip_at_depth(header.value, depth + 1)?;
                }
                Ok(())
            }
        }
    }

    fn element_type(&self, raw: u8) -> WireResult<FieldType> {
        let ty = FieldType::parse(raw)?;
        if ty == FieldType::Stop {
            return Err(DecodeError::InvalidElementType { ty });
        }
        Ok(ty)
    }

    fn check_container(&self, size: u32) -> WireResult<()> {
        let size = size as usize;
        if size > self.limits.max_container_len {
            return Err(DecodeError::LimitsExceeded {
                kind: LimitKind::ContainerLength,
                limit: self.limits.max_container_len,
                actual: size,
            });
        }
        Ok(())
    }

    fn check_depth(&self, depth: usize) -> WireResult<()> {
        if depth > self.limits.max_nesting_depth {
            return Err(DecodeError::LimitsExceeded {
                kind: LimitKind::NestingDepth,
                limit: self.limits.max_nesting_depth,
                actual: depth,
            });
        }
        Ok(())
    }
}
