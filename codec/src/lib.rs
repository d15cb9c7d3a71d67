//! Record encoding and decoding for strux.
//!
//! This crate ties together bitstream, wire and schema to give fixed-schema
//! records two interchangeable encodings and reflective field access.
//!
//! # Features
//!
//! - `UpgradeStatusReport` record with per-field presence
//! - Reflective access by field token through [`FieldValue`]
//! - Standard (field-tagged) encoding that tolerates schema evolution
//! - Tuple (positional bitset) encoding for peers sharing one schema
//!
//! # Design Principles
//!
//! - **Presence is explicit** - An unset field is never confused with its zero value.
//! - **Caller picks the scheme** - Bytes do not record which encoding produced them.
//! - **Deterministic** - Same record and scheme produce the same bytes.

mod error;
mod report;
mod scheme;
mod standard;
mod tuple;
mod value;
mod wire_struct;

pub use error::{CodecError, CodecResult};
pub use report::{UpgradeStatusReport, UpgradeStatusReportField, UPGRADE_STATUS_REPORT_DEF};
pub use scheme::{decode_from_slice, encode_to_vec, Scheme};
pub use value::FieldValue;
pub use wire::Limits as WireLimits;
pub use wire_struct::WireStruct;
