//! Error types for codec operations.

use std::fmt;

use schema::SchemaError;
use wire::FieldType;

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors that can occur while encoding, decoding or accessing a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Wire decode error: truncated input, malformed varint, limits.
    Wire(wire::DecodeError),

    /// Wire encode error.
    Encode(wire::EncodeError),

    /// Schema lookup error, such as an unknown field id.
    Schema(SchemaError),

    /// A field declared `Required` is unset.
    SchemaViolation {
        struct_name: &'static str,
        field: &'static str,
    },

    /// A reflective write supplied a value of the wrong type.
    TypeMismatch {
        field: &'static str,
        expected: FieldType,
        found: FieldType,
    },

    /// The schema declares a wire type that records cannot hold as a value.
    UnsupportedFieldType { ty: FieldType },

    /// Input had bytes left over after the record.
    TrailingBytes { remaining: usize },

    /// A scheme name that is neither `standard` nor `tuple`.
    UnknownScheme { name: String },
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wire(e) => write!(f, "wire error: {e}"),
            Self::Encode(e) => write!(f, "encode error: {e}"),
            Self::Schema(e) => write!(f, "schema error: {e}"),
            Self::SchemaViolation { struct_name, field } => {
                write!(
                    f,
                    "required field '{field}' was not present in {struct_name}"
                )
            }
            Self::TypeMismatch {
                field,
                expected,
                found,
            } => {
                write!(f, "field {field} expects {expected} but got {found}")
            }
            Self::UnsupportedFieldType { ty } => {
                write!(f, "wire type {ty} cannot be held as a field value")
            }
            Self::TrailingBytes { remaining } => {
                write!(f, "{remaining} trailing bytes after record")
            }
            Self::UnknownScheme { name } => {
                write!(f, "unknown scheme '{name}', expected standard or tuple")
            }
        }
    }
}

impl std::error::Error for CodecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Wire(e) => Some(e),
            Self::Encode(e) => Some(e),
            Self::Schema(e) => Some(e),
            _ => None,
        }
    }
}

impl From<wire::DecodeError> for CodecError {
    fn from(err: wire::DecodeError) -> Self {
        Self::Wire(err)
    }
}

impl From<wire::EncodeError> for CodecError {
    fn from(err: wire::EncodeError) -> Self {
        Self::Encode(err)
    }
}

impl From<SchemaError> for CodecError {
    fn from(err: SchemaError) -> Self {
        Self::Schema(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_schema_violation() {
        let err = CodecError::SchemaViolation {
            struct_name: "Heartbeat",
            field: "node",
        };
        let msg = err.to_string();
        assert!(msg.contains("node"), "should mention field");
        assert!(msg.contains("Heartbeat"), "should mention struct");
    }

    #[test]
    fn error_display_type_mismatch() {
        let err = CodecError::TypeMismatch {
            field: "version",
            expected: FieldType::I32,
            found: FieldType::String,
        };
        let msg = err.to_string();
        assert!(msg.contains("i32"));
        assert!(msg.contains("string"));
    }

    #[test]
    fn error_from_wire_error() {
        let wire_err = wire::DecodeError::UnknownFieldType { raw: 13 };
        let codec_err: CodecError = wire_err.into();
        assert!(matches!(codec_err, CodecError::Wire(_)));
    }

    #[test]
    fn error_from_schema_error() {
        let err: CodecError = SchemaError::UnknownField {
            struct_name: "UpgradeStatusReport",
            id: 9,
        }
        .into();
        assert!(matches!(err, CodecError::Schema(_)));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn error_source_none_for_others() {
        let err = CodecError::TrailingBytes { remaining: 3 };
        assert!(std::error::Error::source(&err).is_none());
    }

    #[test]
    fn error_is_std_error() {
        fn assert_error<E: std::error::Error>() {}
        assert_error::<CodecError>();
    }
}
