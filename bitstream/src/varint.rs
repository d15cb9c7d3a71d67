//! LEB128 and zigzag helpers shared by the reader and writer.

/// Maps a signed value onto unsigned so small magnitudes stay short.
#[must_use]
pub const fn zigzag_encode32(value: i32) -> u32 {
    ((value << 1) ^ (value >> 31)) as u32
}

#[must_use]
pub const fn zigzag_decode32(value: u32) -> i32 {
    ((value >> 1) as i32) ^ -((value & 1) as i32)
}

#[must_use]
pub const fn zigzag_encode64(value: i64) -> u64 {
    ((value << 1) ^ (value >> 63)) as u64
}

#[must_use]
pub const fn zigzag_decode64(value: u64) -> i64 {
    ((value >> 1) as i64) ^ -((value & 1) as i64)
}

/// Accumulates LEB128 groups for a value of `width` bits.
///
/// Rejects encodings that carry bits beyond `width`, continue past the last
/// group that could hold them, or end in a zero group after the first byte.
#[derive(Debug)]
pub(crate) struct Leb128 {
    width: u32,
    shift: u32,
    value: u64,
}

pub(crate) enum Step {
    More,
    Done(u64),
    Invalid,
}

impl Leb128 {
    pub(crate) const fn new(width: u32) -> Self {
        Self {
            width,
            shift: 0,
            value: 0,
        }
    }

    pub(crate) fn push(&mut self, byte: u8) -> Step {
        if self.shift >= self.width {
            return Step::Invalid;
        }
        let group = u64::from(byte & 0x7F);
        let room = self.width - self.shift;
        if room < 7 && group >> room != 0 {
            return Step::Invalid;
        }
        self.value |= group << self.shift;
        if byte & 0x80 == 0 {
            if byte == 0 && self.shift > 0 {
                return Step::Invalid;
            }
            return Step::Done(self.value);
        }
        self.shift += 7;
        Step::More
    }
}
