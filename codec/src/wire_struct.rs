//! Reflective record access shared by both codecs.

use schema::{FieldDef, FieldId, FieldRegistry, SchemaError};
use wire::{ProtocolReader, ProtocolWriter};

use crate::error::{CodecError, CodecResult};
use crate::scheme::Scheme;
use crate::value::FieldValue;
use crate::{standard, tuple};

/// A record with a static field registry and per-field reflective access.
///
/// Implementors supply the registry and the four field accessors; the
/// codecs, validation and presence checks are provided on top of them.
pub trait WireStruct: Default {
    /// Field enumeration token.
    type Field: Copy + 'static;

    /// The record's registry, built once and shared by every instance.
    fn registry() -> &'static FieldRegistry;

    /// Maps a field id to its token.
    fn field_for_id(id: FieldId) -> Option<Self::Field>;

    /// Returns the field's value, or `None` when unset.
    fn get_field_value(&self, field: Self::Field) -> Option<FieldValue>;

    /// Assigns a field; `None` unsets it.
    ///
    /// Fails with [`CodecError::TypeMismatch`] if the value's wire type
    /// differs from the field's declared type.
    fn set_field_value(&mut self, field: Self::Field, value: Option<FieldValue>)
        -> CodecResult<()>;

    /// Returns `true` if the field is present.
    fn is_set(&self, field: Self::Field) -> bool {
        self.get_field_value(field).is_some()
    }

    /// Resets every field to unset.
    fn clear(&mut self) {
        *self = Self::default();
    }

    /// Fails with [`CodecError::SchemaViolation`] if a `Required` field is unset.
    fn validate(&self) -> CodecResult<()> {
        let registry = Self::registry();
        for def in registry.required() {
            if !self.is_set(field_token::<Self>(def)?) {
                return Err(CodecError::SchemaViolation {
                    struct_name: registry.struct_name(),
                    field: def.name,
                });
            }
        }
        Ok(())
    }

    /// Encodes the record with `scheme`.
    fn write(&self, writer: &mut ProtocolWriter, scheme: Scheme) -> CodecResult<()> {
        match scheme {
            Scheme::Standard => standard::write(self, writer),
            Scheme::Tuple => tuple::write(self, writer),
        }
    }

    /// Decodes fields into the record with `scheme`.
    ///
    /// Fields absent from the input keep their current state.
    fn read(&mut self, reader: &mut ProtocolReader<'_>, scheme: Scheme) -> CodecResult<()> {
        match scheme {
            Scheme::Standard => standard::read(self, reader),
            Scheme::Tuple => tuple::read(self, reader),
        }
    }
}

/// Resolves a registry entry to the implementor's field token.
pub(crate) fn field_token<T: WireStruct + ?Sized>(def: &FieldDef) -> CodecResult<T::Field> {
    T::field_for_id(def.id).ok_or_else(|| {
        SchemaError::UnknownField {
            struct_name: T::registry().struct_name(),
            id: def.id,
        }
        .into()
    })
}
