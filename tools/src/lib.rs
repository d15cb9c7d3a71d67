//! Introspection and debugging tools for strux records.
//!
//! This crate provides utilities for understanding encoded records:
//!
//! - Dump the record's field registry and schema fingerprint
//! - Encode JSON records into either scheme
//! - Decode bytes back into JSON or a readable listing
//! - Walk a standard-encoded buffer header by header
//!
//! # Design Principles
//!
//! - **First-class tooling** - These tools are part of the product, not afterthoughts.
//! - **Human-readable output** - Make it easy to understand what the codec is doing.

use std::fmt::Write as _;

use anyhow::{Context, Result};
use codec::{
    decode_from_slice, encode_to_vec, FieldValue, Scheme, UpgradeStatusReport,
    UpgradeStatusReportField, WireStruct, UPGRADE_STATUS_REPORT_DEF,
};
use schema::{schema_hash, FieldDef};
use serde::Serialize;
use wire::{FieldType, Limits, ProtocolReader};

/// Registry dump for the `schema` command.
#[derive(Debug, Clone, Serialize)]
pub struct SchemaDump {
    pub name: &'static str,
    pub schema_hash: String,
    pub fields: &'static [FieldDef],
}

/// Describes the `UpgradeStatusReport` registry.
#[must_use]
pub fn schema_dump() -> SchemaDump {
    SchemaDump {
        name: UPGRADE_STATUS_REPORT_DEF.name,
        schema_hash: format!("0x{:016x}", schema_hash(&UPGRADE_STATUS_REPORT_DEF)),
        fields: UPGRADE_STATUS_REPORT_DEF.fields,
    }
}

/// Parses a JSON record and encodes it with `scheme`.
pub fn encode_json(json: &str, scheme: Scheme) -> Result<Vec<u8>> {
    let report: UpgradeStatusReport =
        serde_json::from_str(json).context("parse record json")?;
    encode_to_vec(&report, scheme).context("encode record")
}

/// Decodes a record and renders it as JSON.
pub fn decode_json(bytes: &[u8], scheme: Scheme, limits: &Limits) -> Result<serde_json::Value> {
    let report = decode_report(bytes, scheme, limits)?;
    serde_json::to_value(&report).context("serialize record json")
}

/// Decodes a record.
pub fn decode_report(bytes: &[u8], scheme: Scheme, limits: &Limits) -> Result<UpgradeStatusReport> {
    decode_from_slice(bytes, scheme, limits)
        .with_context(|| format!("decode {} bytes as {scheme}", bytes.len()))
}

/// One field per line, marking unset fields.
#[must_use]
pub fn format_decode_pretty(report: &UpgradeStatusReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", UPGRADE_STATUS_REPORT_DEF.name);
    for field in UpgradeStatusReportField::ALL {
        let value = match report.get_field_value(field) {
            Some(FieldValue::String(text)) => format!("{text:?}"),
            Some(value) => value.to_string(),
            None => "<unset>".to_owned(),
        };
        let _ = writeln!(out, "  {:>2} {:<16} {value}", field.id(), field.name());
    }
    out
}

/// A field header found while walking a standard buffer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InspectEntry {
    pub offset: usize,
    pub byte_len: usize,
    pub id: i16,
    pub ty: &'static str,
    /// Registry name, or `None` for ids the record does not declare.
    pub name: Option<&'static str>,
    /// `true` when a known id arrives with a wire type other than its declared one.
    pub mismatched: bool,
    pub summary: String,
}

/// Result of walking a standard buffer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InspectReport {
    pub entries: Vec<InspectEntry>,
    pub stop_offset: usize,
    pub total_bytes: usize,
}

/// Walks a standard-encoded `UpgradeStatusReport` header by header.
///
/// Unlike decoding, every field is reported, including unknown ones and
/// ones a decoder would skip.
pub fn inspect_standard(bytes: &[u8], limits: &Limits) -> Result<InspectReport> {
    let registry = UpgradeStatusReport::registry();
    let mut reader = ProtocolReader::new(bytes, limits);
    let mut entries = Vec::new();

    reader.read_struct_begin()?;
    let stop_offset = loop {
        let offset = reader.position();
        let header = reader
            .read_field_begin()
            .with_context(|| format!("read field header at offset {offset}"))?;
        if header.is_stop() {
            break offset;
        }
        let def = registry.by_id(header.id);
        let summary = summarize(&mut reader, header.ty)
            .with_context(|| format!("read field {} at offset {offset}", header.id))?;
        entries.push(InspectEntry {
            offset,
            byte_len: reader.position() - offset,
            id: header.id,
            ty: header.ty.name(),
            name: def.map(|def| def.name),
            mismatched: def.is_some_and(|def| def.ty != header.ty),
            summary,
        });
    };
    reader.read_struct_end()?;

    Ok(InspectReport {
        entries,
        stop_offset,
        total_bytes: bytes.len(),
    })
}

fn summarize(reader: &mut ProtocolReader<'_>, ty: FieldType) -> Result<String> {
    let summary = match ty {
        FieldType::Double => reader.read_double()?.to_string(),
        FieldType::String => format!("{:?}", reader.read_string()?),
        ty if ty.is_compound() => {
            let start = reader.position();
            reader.skip(ty)?;
            format!("<{ty}, {} bytes>", reader.position() - start)
        }
        ty => FieldValue::read(reader, ty)?.to_string(),
    };
    Ok(summary)
}

/// Renders an inspect report as a table.
#[must_use]
pub fn format_inspect(report: &InspectReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "offset  len  id  type    name              value");
    for entry in &report.entries {
        let name = entry.name.unwrap_or("<unknown>");
        let marker = if entry.mismatched { " (type mismatch)" } else { "" };
        let _ = writeln!(
            out,
            "{:>6} {:>4} {:>3}  {:<7} {:<17} {}{marker}",
            entry.offset, entry.byte_len, entry.id, entry.ty, name, entry.summary
        );
    }
    let _ = writeln!(out, "{:>6}         stop", report.stop_offset);
    let trailing = report.total_bytes.saturating_sub(report.stop_offset + 1);
    if trailing > 0 {
        let _ = writeln!(out, "{trailing} trailing bytes");
    }
    out
}
