//! Field-tagged (standard) encoding.
//!
//! Each present field is written as a header carrying its id and wire type,
//! followed by its value, and the struct ends with a stop marker. Readers
//! skip fields they do not know and fields whose wire type disagrees with
//! their registry, so records can evolve in both directions.

use wire::{FieldHeader, ProtocolReader, ProtocolWriter};

use crate::error::CodecResult;
use crate::value::FieldValue;
use crate::wire_struct::{field_token, WireStruct};

pub(crate) fn write<T: WireStruct + ?Sized>(
    value: &T,
    writer: &mut ProtocolWriter,
) -> CodecResult<()> {
    value.validate()?;
    writer.write_struct_begin();
    for def in T::registry().fields() {
        if let Some(field_value) = value.get_field_value(field_token::<T>(def)?) {
            writer.write_field_begin(FieldHeader::new(def.id, def.ty))?;
            field_value.write(writer)?;
        }
    }
    writer.write_field_stop()?;
    writer.write_struct_end()?;
    Ok(())
}

pub(crate) fn read<T: WireStruct + ?Sized>(
    value: &mut T,
    reader: &mut ProtocolReader<'_>,
) -> CodecResult<()> {
    let registry = T::registry();
    reader.read_struct_begin()?;
    loop {
        let header = reader.read_field_begin()?;
        if header.is_stop() {
            break;
        }
        match registry.by_id(header.id) {
            Some(def) if def.ty == header.ty => {
                let field_value = FieldValue::read(reader, def.ty)?;
                value.set_field_value(field_token::<T>(def)?, Some(field_value))?;
            }
            Some(def) => {
                tracing::debug!(
                    struct_name = registry.struct_name(),
                    field = def.name,
                    expected = %def.ty,
                    found = %header.ty,
                    "skipping field with mismatched wire type"
                );
                reader.skip(header.ty)?;
            }
            None => {
                tracing::debug!(
                    struct_name = registry.struct_name(),
                    field_id = header.id,
                    wire_type = %header.ty,
                    "skipping unknown field"
                );
                reader.skip(header.ty)?;
            }
        }
    }
    reader.read_struct_end()?;
    value.validate()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{UpgradeStatusReport, UpgradeStatusReportField};
    use wire::Limits;

    fn encode(report: &UpgradeStatusReport) -> Vec<u8> {
        let mut writer = ProtocolWriter::new();
        write(report, &mut writer).unwrap();
        writer.finish()
    }

    fn decode(bytes: &[u8]) -> UpgradeStatusReport {
        let mut report = UpgradeStatusReport::new();
        let mut reader = ProtocolReader::new(bytes, &Limits::for_testing());
        read(&mut report, &mut reader).unwrap();
        assert!(reader.is_empty());
        report
    }

    #[test]
    fn empty_record_is_only_stop() {
        assert_eq!(encode(&UpgradeStatusReport::new()), vec![0x00]);
    }

    #[test]
    fn version_only_layout() {
        let mut report = UpgradeStatusReport::new();
        report.set_version(3);
        // delta 1, i32; zigzag(3) = 6; stop
        assert_eq!(encode(&report), vec![0x15, 0x06, 0x00]);
    }

    #[test]
    fn full_record_layout() {
        let report = UpgradeStatusReport::with_fields(1, 100, true, Some("ok".to_owned()));
        assert_eq!(
            encode(&report),
            vec![
                0x15, 0x02, // version = 1
                0x14, 0xC8, 0x01, // percentComplete = 100
                0x11, 0x01, // finalized = true
                0x18, 0x02, b'o', b'k', // statusText = "ok"
                0x00,
            ]
        );
    }

    #[test]
    fn unset_text_emits_no_header() {
        let report = UpgradeStatusReport::with_fields(3, 42, false, None);
        let bytes = encode(&report);
        assert_eq!(bytes, vec![0x15, 0x06, 0x14, 0x54, 0x11, 0x00, 0x00]);
        assert_eq!(decode(&bytes), report);
    }

    #[test]
    fn gap_in_ids_uses_short_delta() {
        let mut report = UpgradeStatusReport::new();
        report.set_version(1).set_status_text("x");
        // id 1 then id 4: delta 3
        assert_eq!(
            encode(&report),
            vec![0x15, 0x02, 0x38, 0x01, b'x', 0x00]
        );
    }

    #[test]
    fn long_form_header_is_accepted() {
        // type byte + zigzag id 2, i16 value 7
        let bytes = [0x04, 0x04, 0x0E, 0x00];
        let report = decode(&bytes);
        assert_eq!(report.percent_complete(), 7);
        assert!(!report.is_set(UpgradeStatusReportField::Version));
    }

    #[test]
    fn unknown_field_is_skipped() {
        // version = 5, unknown id 9 (delta 8) as string "zz", stop
        let bytes = [0x15, 0x0A, 0x88, 0x02, b'z', b'z', 0x00];
        let report = decode(&bytes);
        assert_eq!(report.version(), 5);
        assert!(!report.is_set_status_text());
    }

    #[test]
    fn mismatched_type_is_skipped() {
        // id 1 sent as string instead of i32
        let bytes = [0x18, 0x01, b'v', 0x00];
        let report = decode(&bytes);
        assert!(!report.is_set_version());
    }

    #[test]
    fn missing_stop_is_an_error() {
        let mut report = UpgradeStatusReport::new();
        let mut reader = ProtocolReader::new(&[0x15, 0x06], &Limits::for_testing());
        let err = read(&mut report, &mut reader).unwrap_err();
        assert!(matches!(err, crate::CodecError::Wire(_)));
    }

    #[test]
    fn read_merges_into_existing_state() {
        let mut report = UpgradeStatusReport::new();
        report.set_status_text("kept");
        let mut reader = ProtocolReader::new(&[0x15, 0x06, 0x00], &Limits::for_testing());
        read(&mut report, &mut reader).unwrap();
        assert_eq!(report.version(), 3);
        assert_eq!(report.status_text(), Some("kept"));
    }
}
