//! Bounded reader over a byte slice with bit-level access.

use crate::error::{BitError, BitResult};
use crate::varint::{zigzag_decode32, zigzag_decode64, Leb128, Step};

/// Reads bits MSB-first and byte-aligned values from a borrowed slice.
///
/// Every read is bounds-checked; malformed input yields an error, never a panic.
/// Byte-aligned reads fail with [`BitError::MisalignedAccess`] mid-byte.
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    data: &'a [u8],
    bit_pos: usize,
}

impl<'a> BitReader<'a> {
    #[must_use]
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, bit_pos: 0 }
    }

    /// Bits left to read.
    #[must_use]
    pub const fn bits_remaining(&self) -> usize {
        self.data
            .len()
            .saturating_mul(8)
            .saturating_sub(self.bit_pos)
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.bits_remaining() == 0
    }

    #[must_use]
    pub const fn bit_position(&self) -> usize {
        self.bit_pos
    }

    /// Byte offset of the next aligned read; a partly read byte counts as consumed.
    #[must_use]
    pub const fn byte_position(&self) -> usize {
        self.bit_pos.div_ceil(8)
    }

    pub fn read_bit(&mut self) -> BitResult<bool> {
        self.require_bits(1)?;
        let byte = self.data[self.bit_pos / 8];
        let bit = byte & (0x80 >> (self.bit_pos % 8)) != 0;
        self.bit_pos += 1;
        Ok(bit)
    }

    /// Reads `bits` (at most 64) bits, most significant first.
    pub fn read_bits(&mut self, bits: u8) -> BitResult<u64> {
        if bits > 64 {
            return Err(BitError::InvalidBitCount { bits, max_bits: 64 });
        }
        self.require_bits(usize::from(bits))?;
        let mut value = 0u64;
        for _ in 0..bits {
            value = (value << 1) | u64::from(self.read_bit()?);
        }
        Ok(value)
    }

    /// Skips the padding bits up to the next byte boundary.
    pub fn align_to_byte(&mut self) -> BitResult<()> {
        let padding = (8 - self.bit_pos % 8) % 8;
        self.require_bits(padding)?;
        self.bit_pos += padding;
        Ok(())
    }

    pub fn read_u8_aligned(&mut self) -> BitResult<u8> {
        Ok(self.take(1)?[0])
    }

    /// Little-endian.
    pub fn read_u16_aligned(&mut self) -> BitResult<u16> {
        Ok(u16::from_le_bytes(self.take_array()?))
    }

    /// Little-endian.
    pub fn read_u32_aligned(&mut self) -> BitResult<u32> {
        Ok(u32::from_le_bytes(self.take_array()?))
    }

    /// Little-endian.
    pub fn read_u64_aligned(&mut self) -> BitResult<u64> {
        Ok(u64::from_le_bytes(self.take_array()?))
    }

    /// LEB128; padded, too-long or out-of-range encodings fail with [`BitError::InvalidVarint`].
    pub fn read_varu32(&mut self) -> BitResult<u32> {
        let value = self.read_leb128(32)?;
        u32::try_from(value).map_err(|_| BitError::InvalidVarint)
    }

    pub fn read_varu64(&mut self) -> BitResult<u64> {
        self.read_leb128(64)
    }

    /// Zigzag LEB128.
    pub fn read_vars32(&mut self) -> BitResult<i32> {
        self.read_varu32().map(zigzag_decode32)
    }

    /// Zigzag LEB128.
    pub fn read_vars64(&mut self) -> BitResult<i64> {
        self.read_varu64().map(zigzag_decode64)
    }

    /// Borrows the next `len` bytes from the input.
    pub fn read_bytes_aligned(&mut self, len: usize) -> BitResult<&'a [u8]> {
        self.take(len)
    }

    fn read_leb128(&mut self, width: u32) -> BitResult<u64> {
        let mut acc = Leb128::new(width);
        loop {
            match acc.push(self.read_u8_aligned()?) {
                Step::More => {}
                Step::Done(value) => return Ok(value),
                Step::Invalid => return Err(BitError::InvalidVarint),
            }
        }
    }

    fn take(&mut self, len: usize) -> BitResult<&'a [u8]> {
        if self.bit_pos % 8 != 0 {
            return Err(BitError::MisalignedAccess {
                bit_position: self.bit_pos,
            });
        }
        self.require_bits(len.saturating_mul(8))?;
        let start = self.bit_pos / 8;
        let data: &'a [u8] = self.data;
        self.bit_pos += len * 8;
        Ok(&data[start..start + len])
    }

    fn take_array<const N: usize>(&mut self) -> BitResult<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    fn require_bits(&self, requested: usize) -> BitResult<()> {
        let available = self.bits_remaining();
        if requested > available {
            return Err(BitError::UnexpectedEof {
                requested,
                available,
            });
        }
        Ok(())
    }
}
