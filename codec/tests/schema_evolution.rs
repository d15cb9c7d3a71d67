//! Records whose declarations differ from `UpgradeStatusReport`, exercising
//! the codecs across schema versions.

use std::sync::OnceLock;

use codec::{
    decode_from_slice, encode_to_vec, CodecError, CodecResult, FieldValue, Scheme,
    UpgradeStatusReport, WireLimits, WireStruct,
};
use schema::{FieldDef, FieldId, FieldRegistry, Requirement, StructDef};
use wire::FieldType;

/// Declares a record backed by one `Option<FieldValue>` slot per field.
macro_rules! slot_record {
    ($name:ident, $def:ident, $fields:ident, $len:literal) => {
        #[derive(Debug, Default, Clone, PartialEq)]
        struct $name {
            slots: [Option<FieldValue>; $len],
        }

        impl WireStruct for $name {
            type Field = usize;

            fn registry() -> &'static FieldRegistry {
                static REGISTRY: OnceLock<FieldRegistry> = OnceLock::new();
                REGISTRY.get_or_init(|| FieldRegistry::new(&$def).unwrap())
            }

            fn field_for_id(id: FieldId) -> Option<usize> {
                Self::registry().position(id)
            }

            fn get_field_value(&self, field: usize) -> Option<FieldValue> {
                self.slots[field].clone()
            }

            fn set_field_value(
                &mut self,
                field: usize,
                value: Option<FieldValue>,
            ) -> CodecResult<()> {
                let def = &$fields[field];
                if let Some(found) = value.as_ref().map(FieldValue::field_type) {
                    if found != def.ty {
                        return Err(CodecError::TypeMismatch {
                            field: def.name,
                            expected: def.ty,
                            found,
                        });
                    }
                }
                self.slots[field] = value;
                Ok(())
            }
        }
    };
}

static V2_FIELDS: [FieldDef; 5] = [
    FieldDef::new(1, "version", FieldType::I32),
    FieldDef::new(2, "percentComplete", FieldType::I16),
    FieldDef::new(3, "finalized", FieldType::Bool),
    FieldDef::new(4, "statusText", FieldType::String),
    FieldDef::new(5, "etaSeconds", FieldType::I64).requirement(Requirement::Optional),
];
static V2_DEF: StructDef = StructDef::new("UpgradeStatusReport", &V2_FIELDS);
slot_record!(ReportV2, V2_DEF, V2_FIELDS, 5);

static HEARTBEAT_FIELDS: [FieldDef; 2] = [
    FieldDef::new(1, "node", FieldType::I64).requirement(Requirement::Required),
    FieldDef::new(2, "note", FieldType::String),
];
static HEARTBEAT_DEF: StructDef = StructDef::new("Heartbeat", &HEARTBEAT_FIELDS);
slot_record!(Heartbeat, HEARTBEAT_DEF, HEARTBEAT_FIELDS, 2);

static GAUGE_FIELDS: [FieldDef; 1] = [FieldDef::new(1, "reading", FieldType::Double)];
static GAUGE_DEF: StructDef = StructDef::new("Gauge", &GAUGE_FIELDS);
slot_record!(Gauge, GAUGE_DEF, GAUGE_FIELDS, 1);

fn full_v2() -> ReportV2 {
    let mut report = ReportV2::default();
    report.set_field_value(0, Some(FieldValue::I32(2))).unwrap();
    report.set_field_value(1, Some(FieldValue::I16(75))).unwrap();
    report.set_field_value(2, Some(FieldValue::Bool(false))).unwrap();
    report.set_field_value(3, Some("migrating".into())).unwrap();
    report.set_field_value(4, Some(FieldValue::I64(3600))).unwrap();
    report
}

fn decode<T: WireStruct>(bytes: &[u8], scheme: Scheme) -> CodecResult<T> {
    decode_from_slice(bytes, scheme, &WireLimits::for_testing())
}

#[test]
fn older_reader_ignores_newer_field() {
    let bytes = encode_to_vec(&full_v2(), Scheme::Standard).unwrap();
    let report: UpgradeStatusReport = decode(&bytes, Scheme::Standard).unwrap();
    assert_eq!(
        report,
        UpgradeStatusReport::with_fields(2, 75, false, Some("migrating".to_owned()))
    );
}

#[test]
fn newer_reader_leaves_missing_field_unset() {
    let old = UpgradeStatusReport::with_fields(1, 10, false, None);
    let bytes = encode_to_vec(&old, Scheme::Standard).unwrap();
    let report: ReportV2 = decode(&bytes, Scheme::Standard).unwrap();
    assert_eq!(report.get_field_value(0), Some(FieldValue::I32(1)));
    assert!(!report.is_set(3));
    assert!(!report.is_set(4));
}

#[test]
fn tuple_does_not_detect_schema_drift() {
    let mut newer = ReportV2::default();
    newer.set_field_value(0, Some(FieldValue::I32(3))).unwrap();
    newer.set_field_value(4, Some(FieldValue::I64(7))).unwrap();
    let bytes = encode_to_vec(&newer, Scheme::Tuple).unwrap();
    assert_eq!(bytes, vec![0b1000_1000, 0x06, 0x0E]);

    // The older reader sees only the first four bits and stops early.
    let report: UpgradeStatusReport = decode(&bytes, Scheme::Tuple).unwrap();
    let mut expected = UpgradeStatusReport::new();
    expected.set_version(3);
    assert_eq!(report, expected);
}

#[test]
fn unset_required_field_fails_encode() {
    for scheme in Scheme::ALL {
        let err = encode_to_vec(&Heartbeat::default(), scheme).unwrap_err();
        assert_eq!(
            err,
            CodecError::SchemaViolation {
                struct_name: "Heartbeat",
                field: "node",
            }
        );
    }
}

#[test]
fn missing_required_field_fails_decode() {
    let err = decode::<Heartbeat>(&[0x00], Scheme::Standard).unwrap_err();
    assert!(matches!(err, CodecError::SchemaViolation { field: "node", .. }));

    // node sent with the wrong wire type is skipped, then validation fails
    let err = decode::<Heartbeat>(&[0x15, 0x02, 0x00], Scheme::Standard).unwrap_err();
    assert!(matches!(err, CodecError::SchemaViolation { .. }));
}

#[test]
fn tuple_writes_required_fields_before_bitset() {
    let mut heartbeat = Heartbeat::default();
    heartbeat.set_field_value(0, Some(FieldValue::I64(5))).unwrap();
    let bytes = encode_to_vec(&heartbeat, Scheme::Tuple).unwrap();
    assert_eq!(bytes, vec![0x0A, 0x00]);

    heartbeat.set_field_value(1, Some("a".into())).unwrap();
    let bytes = encode_to_vec(&heartbeat, Scheme::Tuple).unwrap();
    assert_eq!(bytes, vec![0x0A, 0b1000_0000, 0x01, b'a']);

    let decoded: Heartbeat = decode(&bytes, Scheme::Tuple).unwrap();
    assert_eq!(decoded, heartbeat);
}

#[test]
fn declared_double_cannot_be_materialized() {
    let mut bytes = vec![0x17];
    bytes.extend_from_slice(&0.5f64.to_le_bytes());
    bytes.push(0x00);
    let err = decode::<Gauge>(&bytes, Scheme::Standard).unwrap_err();
    assert_eq!(
        err,
        CodecError::UnsupportedFieldType {
            ty: FieldType::Double
        }
    );

    let empty: Gauge = decode(&[0x00], Scheme::Standard).unwrap();
    assert!(!empty.is_set(0));
}

#[test]
fn v2_roundtrips_both_schemes() {
    let report = full_v2();
    for scheme in Scheme::ALL {
        let bytes = encode_to_vec(&report, scheme).unwrap();
        assert_eq!(decode::<ReportV2>(&bytes, scheme).unwrap(), report);
    }
}
