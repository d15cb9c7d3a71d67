//! Schema validation errors.

use std::fmt;

use wire::FieldType;

use crate::FieldId;

/// Result type for schema operations.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors that can occur when building, validating or querying a schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// Duplicate field id within a struct.
    DuplicateFieldId {
        struct_name: &'static str,
        id: FieldId,
    },

    /// Duplicate field name within a struct.
    DuplicateFieldName {
        struct_name: &'static str,
        name: &'static str,
    },

    /// Field ids must be positive.
    InvalidFieldId { name: &'static str, id: FieldId },

    /// The wire type cannot carry a field value.
    InvalidFieldType {
        name: &'static str,
        ty: FieldType,
    },

    /// Lookup of a field id that the struct does not declare.
    UnknownField {
        struct_name: &'static str,
        id: FieldId,
    },
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateFieldId { struct_name, id } => {
                write!(f, "duplicate field id {id} in {struct_name}")
            }
            Self::DuplicateFieldName { struct_name, name } => {
                write!(f, "duplicate field name {name} in {struct_name}")
            }
            Self::InvalidFieldId { name, id } => {
                write!(f, "field {name} has non-positive id {id}")
            }
            Self::InvalidFieldType { name, ty } => {
                write!(f, "field {name} cannot have wire type {ty}")
            }
            Self::UnknownField { struct_name, id } => {
                write!(f, "field {id} doesn't exist in {struct_name}")
            }
        }
    }
}

impl std::error::Error for SchemaError {}
