//! Field registry and struct definitions for strux records.
//!
//! This crate defines how a record's fields are described:
//! - Field definitions (id, name, wire type, requirement)
//! - Struct definitions with declaration order
//! - Registry lookups by id and by name
//! - Deterministic schema hashing
//!
//! # Design Principles
//!
//! - **Static schemas** - Struct definitions are `const`-constructible and live in statics.
//! - **Ids are the compatibility key** - Field ids are stable and never reused.
//! - **Deterministic hashing** - Schema hash is stable given the same definition.

mod error;
mod field;
mod hash;
mod registry;

pub use error::{SchemaError, SchemaResult};
pub use field::{FieldDef, Requirement};
pub use hash::schema_hash;
pub use registry::{FieldRegistry, StructDef};
pub use wire::FieldType;

/// A field id within a struct.
pub type FieldId = i16;
