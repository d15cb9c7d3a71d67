//! Field definitions and requirement levels.

use std::fmt;

use wire::FieldType;

use crate::FieldId;

/// How strongly a schema requires a field to be present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Requirement {
    /// Must be set before a record is written and after it is read.
    Required,
    /// May be absent; absence is meaningful.
    Optional,
    /// Neither required nor optional; never rejected when absent.
    Default,
}

impl Requirement {
    /// Lowercase name, as used in diagnostics and schema dumps.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::Optional => "optional",
            Self::Default => "default",
        }
    }

    pub(crate) const fn tag(self) -> u8 {
        match self {
            Self::Required => 1,
            Self::Optional => 2,
            Self::Default => 3,
        }
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Field definition within a struct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FieldDef {
    pub id: FieldId,
    pub name: &'static str,
    #[cfg_attr(feature = "serde", serde(serialize_with = "serialize_field_type"))]
    pub ty: FieldType,
    pub requirement: Requirement,
}

impl FieldDef {
    /// Creates a field definition with the `Default` requirement.
    #[must_use]
    pub const fn new(id: FieldId, name: &'static str, ty: FieldType) -> Self {
        Self {
            id,
            name,
            ty,
            requirement: Requirement::Default,
        }
    }

    /// Sets the requirement level.
    #[must_use]
    pub const fn requirement(mut self, requirement: Requirement) -> Self {
        self.requirement = requirement;
        self
    }

    /// Returns `true` if the field must be present.
    #[must_use]
    pub const fn is_required(&self) -> bool {
        matches!(self.requirement, Requirement::Required)
    }
}

#[cfg(feature = "serde")]
fn serialize_field_type<S: serde::Serializer>(
    ty: &FieldType,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(ty.name())
}
