//! Positional (tuple) encoding.
//!
//! Required fields are written first as raw values in declaration order.
//! Then comes a presence bitset with one bit per remaining field, followed by
//! the raw values of the present ones. Nothing is tagged, so both ends must
//! share the same declaration; a mismatch is not detected.

use wire::{ProtocolReader, ProtocolWriter};

use crate::error::{CodecError, CodecResult};
use crate::value::FieldValue;
use crate::wire_struct::{field_token, WireStruct};

pub(crate) fn write<T: WireStruct + ?Sized>(
    value: &T,
    writer: &mut ProtocolWriter,
) -> CodecResult<()> {
    value.validate()?;
    let registry = T::registry();

    for def in registry.required() {
        let field_value = value.get_field_value(field_token::<T>(def)?).ok_or(
            CodecError::SchemaViolation {
                struct_name: registry.struct_name(),
                field: def.name,
            },
        )?;
        field_value.write(writer)?;
    }

    let values = registry
        .non_required()
        .map(|def| Ok(value.get_field_value(field_token::<T>(def)?)))
        .collect::<CodecResult<Vec<_>>>()?;
    let presence: Vec<bool> = values.iter().map(Option::is_some).collect();
    writer.write_bitset(&presence)?;
    for field_value in values.iter().flatten() {
        field_value.write(writer)?;
    }
    Ok(())
}

pub(crate) fn read<T: WireStruct + ?Sized>(
    value: &mut T,
    reader: &mut ProtocolReader<'_>,
) -> CodecResult<()> {
    let registry = T::registry();

    for def in registry.required() {
        let field_value = FieldValue::read(reader, def.ty)?;
        value.set_field_value(field_token::<T>(def)?, Some(field_value))?;
    }

    let optional: Vec<_> = registry.non_required().collect();
    let presence = reader.read_bitset(optional.len())?;
    for (def, present) in optional.into_iter().zip(presence) {
        if present {
            let field_value = FieldValue::read(reader, def.ty)?;
            value.set_field_value(field_token::<T>(def)?, Some(field_value))?;
        }
    }
    value.validate()
}
