//! Protocol primitives for strux records.
//!
//! This crate handles the binary wire format underneath every record codec:
//! wire types, field headers, struct framing, scalar and string encodings,
//! collection headers, presence bitsets and value skipping. It does not know
//! about any particular record, only the shape of the bytes.
//!
//! # Design Principles
//!
//! - **Stable wire format** - Type ids and header layouts never change once published.
//! - **Bounded decoding** - All lengths and nesting are validated against [`Limits`].
//! - **No domain knowledge** - This crate handles framing, not record semantics.
//!
//! # Layout
//!
//! | Item | Encoding |
//! |---|---|
//! | bool / byte | one byte |
//! | i16 / i32 / i64 | zigzag LEB128 varint |
//! | double | 8 bytes little-endian |
//! | string / binary | varint `u32` length, then bytes |
//! | field header | `(delta << 4) \| type`, or `type` + zigzag id |
//! | stop | `0x00` |
//! | bitset | N bits MSB-first, zero padded to a byte |

mod error;
mod limits;
mod reader;
mod types;
mod writer;

pub use error::{DecodeError, EncodeError, EncodeResult, LimitKind, WireResult};
pub use limits::Limits;
pub use reader::ProtocolReader;
pub use types::{
    FieldHeader, FieldType, ListHeader, MapHeader, LONG_LIST_THRESHOLD, MAX_SHORT_DELTA,
};
pub use writer::ProtocolWriter;
