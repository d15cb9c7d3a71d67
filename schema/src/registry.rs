//! Struct definitions and the field registry.

use std::collections::{HashMap, HashSet};

use wire::FieldType;

use crate::error::{SchemaError, SchemaResult};
use crate::{FieldDef, FieldId};

/// A struct definition: its name and its fields in declaration order.
///
/// Declaration order is significant: it fixes the bit positions of the
/// positional (tuple) encoding and the order of field-tagged writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct StructDef {
    pub name: &'static str,
    pub fields: &'static [FieldDef],
}

impl StructDef {
    /// Creates a struct definition.
    #[must_use]
    pub const fn new(name: &'static str, fields: &'static [FieldDef]) -> Self {
        Self { name, fields }
    }

    /// Validates schema invariants.
    pub fn validate(&self) -> SchemaResult<()> {
        let mut ids = HashSet::new();
        let mut names = HashSet::new();
        for field in self.fields {
            if field.id <= 0 {
                return Err(SchemaError::InvalidFieldId {
                    name: field.name,
                    id: field.id,
                });
            }
            if field.ty == FieldType::Stop {
                return Err(SchemaError::InvalidFieldType {
                    name: field.name,
                    ty: field.ty,
                });
            }
            if !ids.insert(field.id) {
                return Err(SchemaError::DuplicateFieldId {
                    struct_name: self.name,
                    id: field.id,
                });
            }
            if !names.insert(field.name) {
                return Err(SchemaError::DuplicateFieldName {
                    struct_name: self.name,
                    name: field.name,
                });
            }
        }
        Ok(())
    }
}

/// Read-only lookup tables over a validated [`StructDef`].
///
/// Built once per struct type and shared; nothing mutates it after
/// construction.
#[derive(Debug, Clone)]
pub struct FieldRegistry {
    def: &'static StructDef,
    by_id: HashMap<FieldId, usize>,
    by_name: HashMap<&'static str, usize>,
}

impl FieldRegistry {
    /// Validates `def` and indexes its fields by id and by name.
    pub fn new(def: &'static StructDef) -> SchemaResult<Self> {
        def.validate()?;
        let by_id = def
            .fields
            .iter()
            .enumerate()
            .map(|(index, field)| (field.id, index))
            .collect();
        let by_name = def
            .fields
            .iter()
            .enumerate()
            .map(|(index, field)| (field.name, index))
            .collect();
        Ok(Self { def, by_id, by_name })
    }

    /// The struct this registry describes.
    #[must_use]
    pub const fn def(&self) -> &'static StructDef {
        self.def
    }

    /// The struct name.
    #[must_use]
    pub const fn struct_name(&self) -> &'static str {
        self.def.name
    }

    /// All fields in declaration order.
    #[must_use]
    pub const fn fields(&self) -> &'static [FieldDef] {
        self.def.fields
    }

    /// Number of declared fields.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.def.fields.len()
    }

    /// Returns `true` if the struct declares no fields.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.def.fields.is_empty()
    }

    /// Finds a field by id.
    #[must_use]
    pub fn by_id(&self, id: FieldId) -> Option<&'static FieldDef> {
        let fields = self.def.fields;
        self.by_id.get(&id).map(|&index| &fields[index])
    }

    /// Finds a field by id, failing with [`SchemaError::UnknownField`].
    pub fn by_id_or_err(&self, id: FieldId) -> SchemaResult<&'static FieldDef> {
        self.by_id(id).ok_or(SchemaError::UnknownField {
            struct_name: self.def.name,
            id,
        })
    }

    /// Finds a field by name.
    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<&'static FieldDef> {
        let fields = self.def.fields;
        self.by_name.get(name).map(|&index| &fields[index])
    }

    /// Declaration index of a field id.
    #[must_use]
    pub fn position(&self, id: FieldId) -> Option<usize> {
        self.by_id.get(&id).copied()
    }

    /// Fields declared `Required`, in declaration order.
    pub fn required(&self) -> impl Iterator<Item = &'static FieldDef> {
        let fields: &'static [FieldDef] = self.def.fields;
        fields.iter().filter(|field| field.is_required())
    }

    /// Fields not declared `Required`, in declaration order.
    pub fn non_required(&self) -> impl Iterator<Item = &'static FieldDef> {
        let fields: &'static [FieldDef] = self.def.fields;
        fields.iter().filter(|field| !field.is_required())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Requirement;

    static FIELDS: [FieldDef; 3] = [
        FieldDef::new(1, "id", FieldType::I64).requirement(Requirement::Required),
        FieldDef::new(2, "label", FieldType::String),
        FieldDef::new(7, "flag", FieldType::Bool).requirement(Requirement::Optional),
    ];
    static DEF: StructDef = StructDef::new("Sample", &FIELDS);

    #[test]
    fn lookups_by_id_and_name() {
        let registry = FieldRegistry::new(&DEF).unwrap();
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.by_id(2).unwrap().name, "label");
        assert_eq!(registry.by_name("flag").unwrap().id, 7);
        assert!(registry.by_id(3).is_none());
        assert!(registry.by_name("missing").is_none());
        assert_eq!(registry.position(7), Some(2));
    }

    #[test]
    fn by_id_or_err_reports_unknown() {
        let registry = FieldRegistry::new(&DEF).unwrap();
        let err = registry.by_id_or_err(42).unwrap_err();
        assert_eq!(
            err,
            SchemaError::UnknownField {
                struct_name: "Sample",
                id: 42
            }
        );
    }

    #[test]
    fn required_partition() {
        let registry = FieldRegistry::new(&DEF).unwrap();
        let required: Vec<_> = registry.required().map(|f| f.id).collect();
        let rest: Vec<_> = registry.non_required().map(|f| f.id).collect();
        assert_eq!(required, vec![1]);
        assert_eq!(rest, vec![2, 7]);
    }

    #[test]
    fn rejects_duplicate_ids() {
        static DUP: [FieldDef; 2] = [
            FieldDef::new(1, "a", FieldType::I32),
            FieldDef::new(1, "b", FieldType::I32),
        ];
        static DUP_DEF: StructDef = StructDef::new("Dup", &DUP);
        let err = FieldRegistry::new(&DUP_DEF).unwrap_err();
        assert!(matches!(err, SchemaError::DuplicateFieldId { id: 1, .. }));
    }

    #[test]
    fn rejects_duplicate_names() {
        static DUP: [FieldDef; 2] = [
            FieldDef::new(1, "a", FieldType::I32),
            FieldDef::new(2, "a", FieldType::I16),
        ];
        let err = StructDef::new("Dup", &DUP).validate().unwrap_err();
        assert!(matches!(err, SchemaError::DuplicateFieldName { name: "a", .. }));
    }

    #[test]
    fn rejects_non_positive_ids() {
        static BAD: [FieldDef; 1] = [FieldDef::new(0, "zero", FieldType::I32)];
        let err = StructDef::new("Bad", &BAD).validate().unwrap_err();
        assert!(matches!(err, SchemaError::InvalidFieldId { id: 0, .. }));
    }

    #[test]
    fn rejects_stop_type() {
        static BAD: [FieldDef; 1] = [FieldDef::new(1, "end", FieldType::Stop)];
        let err = StructDef::new("Bad", &BAD).validate().unwrap_err();
        assert!(matches!(err, SchemaError::InvalidFieldType { .. }));
    }
}
