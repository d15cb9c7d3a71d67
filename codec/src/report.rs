//! The upgrade status report record.

use std::fmt;
use std::sync::OnceLock;

use schema::{FieldDef, FieldId, FieldRegistry, SchemaError, SchemaResult, StructDef};
use wire::{FieldType, Limits};

use crate::error::{CodecError, CodecResult};
use crate::scheme::{decode_from_slice, encode_to_vec, Scheme};
use crate::value::FieldValue;
use crate::wire_struct::WireStruct;

static UPGRADE_STATUS_REPORT_FIELDS: [FieldDef; 4] = [
    FieldDef::new(1, "version", FieldType::I32),
    FieldDef::new(2, "percentComplete", FieldType::I16),
    FieldDef::new(3, "finalized", FieldType::Bool),
    FieldDef::new(4, "statusText", FieldType::String),
];

/// Field declarations of [`UpgradeStatusReport`], in declaration order.
pub static UPGRADE_STATUS_REPORT_DEF: StructDef =
    StructDef::new("UpgradeStatusReport", &UPGRADE_STATUS_REPORT_FIELDS);

/// Field token for [`UpgradeStatusReport`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum UpgradeStatusReportField {
    Version,
    PercentComplete,
    Finalized,
    StatusText,
}

impl UpgradeStatusReportField {
    /// All fields in declaration order.
    pub const ALL: [Self; 4] = [
        Self::Version,
        Self::PercentComplete,
        Self::Finalized,
        Self::StatusText,
    ];

    #[must_use]
    pub fn id(self) -> FieldId {
        self.def().id
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        self.def().name
    }

    /// The registry entry for this field.
    #[must_use]
    pub fn def(self) -> &'static FieldDef {
        &UPGRADE_STATUS_REPORT_FIELDS[self as usize]
    }

    #[must_use]
    pub const fn from_id(id: FieldId) -> Option<Self> {
        match id {
            1 => Some(Self::Version),
            2 => Some(Self::PercentComplete),
            3 => Some(Self::Finalized),
            4 => Some(Self::StatusText),
            _ => None,
        }
    }

    /// Like [`Self::from_id`], failing with [`SchemaError::UnknownField`].
    pub fn from_id_or_err(id: FieldId) -> SchemaResult<Self> {
        Self::from_id(id).ok_or(SchemaError::UnknownField {
            struct_name: UPGRADE_STATUS_REPORT_DEF.name,
            id,
        })
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.name() == name)
    }
}

impl fmt::Display for UpgradeStatusReportField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Progress report for a software upgrade.
///
/// Every field may be unset. Unset primitives read as their zero value but
/// still compare, hash and encode as absent. Ordering is lexicographic over
/// the fields in declaration order, with unset sorting before any value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase", deny_unknown_fields)
)]
pub struct UpgradeStatusReport {
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    version: Option<i32>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    percent_complete: Option<i16>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    finalized: Option<bool>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    status_text: Option<String>,
}

impl UpgradeStatusReport {
    /// Creates a report with every field unset.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            version: None,
            percent_complete: None,
            finalized: None,
            status_text: None,
        }
    }

    /// Creates a report with the three primitives set.
    #[must_use]
    pub const fn with_fields(
        version: i32,
        percent_complete: i16,
        finalized: bool,
        status_text: Option<String>,
    ) -> Self {
        Self {
            version: Some(version),
            percent_complete: Some(percent_complete),
            finalized: Some(finalized),
            status_text,
        }
    }

    /// Returns an independent copy.
    #[must_use]
    pub fn deep_copy(&self) -> Self {
        self.clone()
    }

    #[must_use]
    pub const fn version(&self) -> i32 {
        match self.version {
            Some(version) => version,
            None => 0,
        }
    }

    pub fn set_version(&mut self, version: i32) -> &mut Self {
        self.version = Some(version);
        self
    }

    pub fn unset_version(&mut self) {
        self.version = None;
    }

    #[must_use]
    pub const fn is_set_version(&self) -> bool {
        self.version.is_some()
    }

    /// `true` marks the field present, keeping its current value.
    pub fn set_version_is_set(&mut self, value: bool) {
        if !value {
            self.version = None;
        } else if self.version.is_none() {
            self.version = Some(0);
        }
    }

    #[must_use]
    pub const fn percent_complete(&self) -> i16 {
        match self.percent_complete {
            Some(percent) => percent,
            None => 0,
        }
    }

    pub fn set_percent_complete(&mut self, percent_complete: i16) -> &mut Self {
        self.percent_complete = Some(percent_complete);
        self
    }

    pub fn unset_percent_complete(&mut self) {
        self.percent_complete = None;
    }

    #[must_use]
    pub const fn is_set_percent_complete(&self) -> bool {
        self.percent_complete.is_some()
    }

    pub fn set_percent_complete_is_set(&mut self, value: bool) {
        if !value {
            self.percent_complete = None;
        } else if self.percent_complete.is_none() {
            self.percent_complete = Some(0);
        }
    }

    #[must_use]
    pub const fn finalized(&self) -> bool {
        match self.finalized {
            Some(finalized) => finalized,
            None => false,
        }
    }

    pub fn set_finalized(&mut self, finalized: bool) -> &mut Self {
        self.finalized = Some(finalized);
        self
    }

    pub fn unset_finalized(&mut self) {
        self.finalized = None;
    }

    #[must_use]
    pub const fn is_set_finalized(&self) -> bool {
        self.finalized.is_some()
    }

    pub fn set_finalized_is_set(&mut self, value: bool) {
        if !value {
            self.finalized = None;
        } else if self.finalized.is_none() {
            self.finalized = Some(false);
        }
    }

    #[must_use]
    pub fn status_text(&self) -> Option<&str> {
        self.status_text.as_deref()
    }

    pub fn set_status_text(&mut self, status_text: impl Into<String>) -> &mut Self {
        self.status_text = Some(status_text.into());
        self
    }

    pub fn unset_status_text(&mut self) {
        self.status_text = None;
    }

    #[must_use]
    pub const fn is_set_status_text(&self) -> bool {
        self.status_text.is_some()
    }

    /// Only `false` has an effect: text presence is the text itself.
    pub fn set_status_text_is_set(&mut self, value: bool) {
        if !value {
            self.status_text = None;
        }
    }

    /// Encodes with the standard scheme.
    pub fn to_bytes(&self) -> CodecResult<Vec<u8>> {
        encode_to_vec(self, Scheme::Standard)
    }

    /// Decodes standard-scheme bytes with default limits.
    pub fn from_bytes(bytes: &[u8]) -> CodecResult<Self> {
        decode_from_slice(bytes, Scheme::Standard, &Limits::default())
    }
}

impl WireStruct for UpgradeStatusReport {
    type Field = UpgradeStatusReportField;

    fn registry() -> &'static FieldRegistry {
        static REGISTRY: OnceLock<FieldRegistry> = OnceLock::new();
        REGISTRY.get_or_init(|| {
            FieldRegistry::new(&UPGRADE_STATUS_REPORT_DEF)
                .expect("UpgradeStatusReport field declarations are valid")
        })
    }

    fn field_for_id(id: FieldId) -> Option<Self::Field> {
        UpgradeStatusReportField::from_id(id)
    }

    fn get_field_value(&self, field: Self::Field) -> Option<FieldValue> {
        match field {
            UpgradeStatusReportField::Version => self.version.map(FieldValue::I32),
            UpgradeStatusReportField::PercentComplete => {
                self.percent_complete.map(FieldValue::I16)
            }
            UpgradeStatusReportField::Finalized => self.finalized.map(FieldValue::Bool),
            UpgradeStatusReportField::StatusText => {
                self.status_text.clone().map(FieldValue::String)
            }
        }
    }

    fn set_field_value(
        &mut self,
        field: Self::Field,
        value: Option<FieldValue>,
    ) -> CodecResult<()> {
        use UpgradeStatusReportField as F;

        match (field, value) {
            (F::Version, None) => self.version = None,
            (F::Version, Some(FieldValue::I32(v))) => self.version = Some(v),
            (F::PercentComplete, None) => self.percent_complete = None,
            (F::PercentComplete, Some(FieldValue::I16(v))) => self.percent_complete = Some(v),
            (F::Finalized, None) => self.finalized = None,
            (F::Finalized, Some(FieldValue::Bool(v))) => self.finalized = Some(v),
            (F::StatusText, None) => self.status_text = None,
            (F::StatusText, Some(FieldValue::String(v))) => self.status_text = Some(v),
            (field, Some(other)) => {
                return Err(CodecError::TypeMismatch {
                    field: field.name(),
                    expected: field.def().ty,
                    found: other.field_type(),
                })
            }
        }
        Ok(())
    }

    fn is_set(&self, field: Self::Field) -> bool {
        match field {
            UpgradeStatusReportField::Version => self.is_set_version(),
            UpgradeStatusReportField::PercentComplete => self.is_set_percent_complete(),
            UpgradeStatusReportField::Finalized => self.is_set_finalized(),
            UpgradeStatusReportField::StatusText => self.is_set_status_text(),
        }
    }
}

impl fmt::Display for UpgradeStatusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "UpgradeStatusReport(version:{}, percentComplete:{}, finalized:{}, statusText:{})",
            self.version(),
            self.percent_complete(),
            self.finalized(),
            self.status_text().unwrap_or("null"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> UpgradeStatusReport {
        UpgradeStatusReport::with_fields(3, 42, false, Some("upgrade in progress".to_owned()))
    }

    #[test]
    fn registry_matches_declarations() {
        let registry = UpgradeStatusReport::registry();
        assert_eq!(registry.struct_name(), "UpgradeStatusReport");
        assert_eq!(registry.len(), 4);
        for field in UpgradeStatusReportField::ALL {
            let def = registry.by_id(field.id()).unwrap();
            assert_eq!(def.name, field.name());
            assert_eq!(registry.by_name(field.name()).unwrap().id, field.id());
            assert_eq!(registry.position(field.id()), Some(field as usize));
        }
        assert_eq!(registry.required().count(), 0);
    }

    #[test]
    fn registry_is_shared() {
        assert!(std::ptr::eq(
            UpgradeStatusReport::registry(),
            UpgradeStatusReport::registry()
        ));
    }

    #[test]
    fn field_token_lookups() {
        assert_eq!(
            UpgradeStatusReportField::from_name("percentComplete"),
            Some(UpgradeStatusReportField::PercentComplete)
        );
        assert_eq!(UpgradeStatusReportField::from_name("percent_complete"), None);
        assert_eq!(UpgradeStatusReportField::from_id(0), None);
        assert_eq!(UpgradeStatusReportField::StatusText.id(), 4);
        let err = UpgradeStatusReportField::from_id_or_err(5).unwrap_err();
        assert_eq!(
            err,
            SchemaError::UnknownField {
                struct_name: "UpgradeStatusReport",
                id: 5
            }
        );
    }

    #[test]
    fn new_report_is_unset() {
        let report = UpgradeStatusReport::new();
        for field in UpgradeStatusReportField::ALL {
            assert!(!report.is_set(field), "{field}");
            assert_eq!(report.get_field_value(field), None);
        }
        assert_eq!(report.version(), 0);
        assert_eq!(report.percent_complete(), 0);
        assert!(!report.finalized());
        assert_eq!(report.status_text(), None);
    }

    #[test]
    fn with_fields_sets_primitives() {
        let report = UpgradeStatusReport::with_fields(1, 2, true, None);
        assert!(report.is_set_version());
        assert!(report.is_set_percent_complete());
        assert!(report.is_set_finalized());
        assert!(!report.is_set_status_text());
    }

    #[test]
    fn setters_chain_and_unset() {
        let mut report = UpgradeStatusReport::new();
        report.set_version(9).set_finalized(true).set_status_text("done");
        assert_eq!(report.version(), 9);
        assert!(report.finalized());
        assert_eq!(report.status_text(), Some("done"));

        report.unset_version();
        report.unset_status_text();
        assert!(!report.is_set_version());
        assert!(!report.is_set_status_text());
        assert!(report.is_set_finalized());
    }

    #[test]
    fn zero_value_is_distinct_from_unset() {
        let mut report = UpgradeStatusReport::new();
        report.set_version(0);
        assert!(report.is_set_version());
        assert_ne!(report, UpgradeStatusReport::new());
    }

    #[test]
    fn is_set_flags() {
        let mut report = UpgradeStatusReport::new();
        report.set_percent_complete_is_set(true);
        assert_eq!(
            report.get_field_value(UpgradeStatusReportField::PercentComplete),
            Some(FieldValue::I16(0))
        );

        report.set_percent_complete(55);
        report.set_percent_complete_is_set(true);
        assert_eq!(report.percent_complete(), 55);

        report.set_percent_complete_is_set(false);
        assert!(!report.is_set_percent_complete());

        report.set_status_text_is_set(true);
        assert!(!report.is_set_status_text());
        report.set_status_text("x");
        report.set_status_text_is_set(false);
        assert!(!report.is_set_status_text());

        report.set_version_is_set(true);
        report.set_finalized_is_set(true);
        assert_eq!(report.version(), 0);
        assert!(report.is_set_finalized());
    }

    #[test]
    fn reflective_access() {
        let mut report = UpgradeStatusReport::new();
        report
            .set_field_value(UpgradeStatusReportField::Version, Some(FieldValue::I32(4)))
            .unwrap();
        report
            .set_field_value(UpgradeStatusReportField::StatusText, Some("hi".into()))
            .unwrap();
        assert_eq!(report.version(), 4);
        assert_eq!(
            report.get_field_value(UpgradeStatusReportField::StatusText),
            Some(FieldValue::String("hi".to_owned()))
        );

        report
            .set_field_value(UpgradeStatusReportField::Version, None)
            .unwrap();
        assert!(!report.is_set(UpgradeStatusReportField::Version));
    }

    #[test]
    fn reflective_type_mismatch() {
        let mut report = UpgradeStatusReport::new();
        let err = report
            .set_field_value(UpgradeStatusReportField::Finalized, Some(FieldValue::I32(1)))
            .unwrap_err();
        assert_eq!(
            err,
            CodecError::TypeMismatch {
                field: "finalized",
                expected: FieldType::Bool,
                found: FieldType::I32,
            }
        );
        assert!(!report.is_set_finalized());
    }

    #[test]
    fn field_for_id_resolves() {
        assert_eq!(
            UpgradeStatusReport::field_for_id(3),
            Some(UpgradeStatusReportField::Finalized)
        );
        assert_eq!(UpgradeStatusReport::field_for_id(99), None);
    }

    #[test]
    fn clear_resets_everything() {
        let mut report = sample();
        report.clear();
        assert_eq!(report, UpgradeStatusReport::default());
    }

    #[test]
    fn validate_always_succeeds() {
        assert!(UpgradeStatusReport::new().validate().is_ok());
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn display_lists_fields_in_order() {
        assert_eq!(
            sample().to_string(),
            "UpgradeStatusReport(version:3, percentComplete:42, finalized:false, statusText:upgrade in progress)"
        );
        assert_eq!(
            UpgradeStatusReport::new().to_string(),
            "UpgradeStatusReport(version:0, percentComplete:0, finalized:false, statusText:null)"
        );
    }

    #[test]
    fn ordering_is_lexicographic() {
        let a = sample();
        let b = UpgradeStatusReport::with_fields(3, 50, false, Some("upgrade in progress".to_owned()));
        assert!(a < b);

        let mut unset = a.clone();
        unset.unset_percent_complete();
        assert!(unset < a, "unset sorts before set");

        let mut no_text = a.clone();
        no_text.unset_status_text();
        assert!(no_text < a);
    }

    #[test]
    fn equal_reports_hash_equal() {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        fn hash(report: &UpgradeStatusReport) -> u64 {
            let mut hasher = DefaultHasher::new();
            report.hash(&mut hasher);
            hasher.finish()
        }

        let a = sample();
        let b = a.deep_copy();
        assert_eq!(a, b);
        assert_eq!(hash(&a), hash(&b));
    }

    #[test]
    fn deep_copy_is_independent() {
        let original = sample();
        let mut copy = original.deep_copy();
        copy.set_status_text("changed");
        assert_eq!(original.status_text(), Some("upgrade in progress"));
    }

    #[test]
    fn bytes_shorthand_roundtrip() {
        let report = sample();
        let bytes = report.to_bytes().unwrap();
        assert_eq!(UpgradeStatusReport::from_bytes(&bytes).unwrap(), report);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn json_uses_wire_names_and_omits_unset() {
        let mut report = UpgradeStatusReport::new();
        report.set_percent_complete(10);
        let json = serde_json::to_string(&report).unwrap();
        assert_eq!(json, r#"{"percentComplete":10}"#);

        let back: UpgradeStatusReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back, report);
        assert!(serde_json::from_str::<UpgradeStatusReport>(r#"{"bogus":1}"#).is_err());
    }
}
