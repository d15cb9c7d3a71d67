//! Deterministic schema hashing.

use blake3::Hasher;

use crate::{FieldDef, StructDef};

/// Computes a deterministic fingerprint of a struct definition.
///
/// Covers the struct name and every field's id, name, wire type and
/// requirement, in declaration order. Peers exchanging positional (tuple)
/// encodings can compare fingerprints out of band; the codecs never check it.
#[must_use]
pub fn schema_hash(def: &StructDef) -> u64 {
    let mut hasher = Hasher::new();
    write_str(&mut hasher, def.name);
    write_u32(&mut hasher, def.fields.len() as u32);

    for field in def.fields {
        write_field(&mut hasher, field);
    }

    let hash = hasher.finalize();
    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&hash.as_bytes()[0..8]);
    u64::from_le_bytes(prefix)
}

fn write_field(hasher: &mut Hasher, field: &FieldDef) {
    write_i16(hasher, field.id);
    write_str(hasher, field.name);
    write_u8(hasher, field.ty.raw());
    write_u8(hasher, field.requirement.tag());
}

fn write_str(hasher: &mut Hasher, value: &str) {
    write_u32(hasher, value.len() as u32);
    hasher.update(value.as_bytes());
}

fn write_u8(hasher: &mut Hasher, value: u8) {
    hasher.update(&[value]);
}

fn write_i16(hasher: &mut Hasher, value: i16) {
    hasher.update(&value.to_le_bytes());
}

fn write_u32(hasher: &mut Hasher, value: u32) {
    hasher.update(&value.to_le_bytes());
}
