use crate::error::PackError;
use crate::record::Recordable;
use crate::scalar::{ScalarKind, ScalarValue};
use crate::types::{ENTRY_INDEX_SIZE, HEADER_SIZE, WireHeader};

// ─── Header ─────────────────────────────────────────────────────────────────

/// Parse and length-validate a snapshot header.
pub fn read_header(src: &[u8]) -> Result<WireHeader, PackError> {
    if src.len() < HEADER_SIZE {
        return Err(PackError::TruncatedStream {
            needed: HEADER_SIZE,
            available: src.len(),
        });
    }
    let truncated = |_| PackError::TruncatedStream {
        needed: HEADER_SIZE,
        available: src.len(),
    };
    Ok(WireHeader {
        total_size: u64::from_le_bytes(src[0..8].try_into().map_err(truncated)?),
        schema_hash: u64::from_le_bytes(src[8..16].try_into().map_err(truncated)?),
        entry_count: u32::from_le_bytes(src[16..20].try_into().map_err(truncated)?),
    })
}

// ─── Reader ─────────────────────────────────────────────────────────────────

/// Apply a snapshot stream onto `rec`.
///
/// The stream's declared total size is validated against the input length
/// before any field is touched, and every entry copy is bounds-checked
/// against that declared total. Fields not named in the stream keep their
/// pre-call value; the target's dirty flags are not affected either way.
///
/// Returns the number of entries applied.
pub fn apply_snapshot(rec: &mut Recordable, src: &[u8]) -> Result<usize, PackError> {
    let header = read_header(src)?;

    let total = header.total_size as usize;
    if src.len() < total {
        return Err(PackError::TruncatedStream {
            needed: total,
            available: src.len(),
        });
    }

    let local = rec.schema_hash();
    if header.schema_hash != local {
        return Err(PackError::SchemaMismatch {
            stream: header.schema_hash,
            local,
        });
    }

    let field_count = rec.fields.len();
    let mut cursor = HEADER_SIZE;
    for _ in 0..header.entry_count {
        if total < cursor + ENTRY_INDEX_SIZE {
            return Err(PackError::TruncatedStream {
                needed: cursor + ENTRY_INDEX_SIZE,
                available: total,
            });
        }
        let index = u32::from_le_bytes(
            src[cursor..cursor + ENTRY_INDEX_SIZE]
                .try_into()
                .map_err(|_| PackError::TruncatedStream {
                    needed: cursor + ENTRY_INDEX_SIZE,
                    available: total,
                })?,
        );
        cursor += ENTRY_INDEX_SIZE;

        let entry = rec
            .fields
            .get_mut(index as usize)
            .ok_or(PackError::IndexOutOfRange { index, field_count })?;

        let width = entry.kind.byte_size();
        if total < cursor + width {
            return Err(PackError::TruncatedStream {
                needed: cursor + width,
                available: total,
            });
        }
        entry.data.copy_from_slice(&src[cursor..cursor + width]);
        cursor += width;
    }

    Ok(header.entry_count as usize)
}

// ─── Decode Field ───────────────────────────────────────────────────────────

/// Decode a field's raw bytes into a [`ScalarValue`], widening to the
/// 64-bit family. `None` if `data` does not match the kind's width.
#[inline]
pub fn decode_scalar(kind: ScalarKind, data: &[u8]) -> Option<ScalarValue> {
    Some(match kind {
        ScalarKind::Bool => ScalarValue::Bool(*data.first()? != 0),
        ScalarKind::I8 => ScalarValue::I64(i8::from_le_bytes(data.try_into().ok()?) as i64),
        ScalarKind::I16 => ScalarValue::I64(i16::from_le_bytes(data.try_into().ok()?) as i64),
        ScalarKind::I32 => ScalarValue::I64(i32::from_le_bytes(data.try_into().ok()?) as i64),
        ScalarKind::I64 => ScalarValue::I64(i64::from_le_bytes(data.try_into().ok()?)),
        ScalarKind::U8 => ScalarValue::U64(u8::from_le_bytes(data.try_into().ok()?) as u64),
        ScalarKind::U16 => ScalarValue::U64(u16::from_le_bytes(data.try_into().ok()?) as u64),
        ScalarKind::U32 => ScalarValue::U64(u32::from_le_bytes(data.try_into().ok()?) as u64),
        ScalarKind::U64 => ScalarValue::U64(u64::from_le_bytes(data.try_into().ok()?)),
        ScalarKind::F32 => ScalarValue::F64(f32::from_le_bytes(data.try_into().ok()?) as f64),
        ScalarKind::F64 => ScalarValue::F64(f64::from_le_bytes(data.try_into().ok()?)),
    })
}
