use crate::error::PackError;
use crate::record::Recordable;
use crate::types::{ENTRY_INDEX_SIZE, HEADER_SIZE, SnapshotMode};

// ─── Sizing ─────────────────────────────────────────────────────────────────

/// Exact byte size a snapshot of `rec` in `mode` will occupy.
///
/// Pure function of the registry shape (and, for `Delta`, of the dirty
/// flags at call time).
pub fn snapshot_size(rec: &Recordable, mode: SnapshotMode) -> usize {
    let mut size = HEADER_SIZE;
    for field in &rec.fields {
        if mode == SnapshotMode::Delta && !field.dirty {
            continue;
        }
        size += ENTRY_INDEX_SIZE + field.kind.byte_size();
    }
    size
}

// ─── Writer ─────────────────────────────────────────────────────────────────

/// Serialize a snapshot of `rec` into `dest`.
///
/// Fails with `BufferTooSmall` before writing anything if `dest` cannot
/// hold the snapshot the call is about to produce; dirty flags are left
/// untouched in that case. On success every registered field is marked
/// clean, whether or not it was included in the output.
///
/// Returns the number of bytes written.
pub fn write_snapshot(
    rec: &mut Recordable,
    dest: &mut [u8],
    mode: SnapshotMode,
) -> Result<usize, PackError> {
    let needed = snapshot_size(rec, mode);
    if dest.len() < needed {
        return Err(PackError::BufferTooSmall {
            needed,
            available: dest.len(),
        });
    }

    let written = write_body(rec, dest, mode);
    rec.reset_modified_state();
    Ok(written)
}

/// Write entries then back-patch the header. Caller has sized `dest`.
pub(crate) fn write_body(rec: &Recordable, dest: &mut [u8], mode: SnapshotMode) -> usize {
    let mut cursor = HEADER_SIZE;
    let mut entry_count: u32 = 0;

    for (i, field) in rec.fields.iter().enumerate() {
        if mode == SnapshotMode::Delta && !field.dirty {
            continue;
        }
        dest[cursor..cursor + ENTRY_INDEX_SIZE].copy_from_slice(&(i as u32).to_le_bytes());
        cursor += ENTRY_INDEX_SIZE;

        let width = field.data.len();
        dest[cursor..cursor + width].copy_from_slice(&field.data);
        cursor += width;

        entry_count += 1;
    }

    // Header last: total size and entry count are only known once the
    // included subset has been walked.
    dest[0..8].copy_from_slice(&(cursor as u64).to_le_bytes());
    dest[8..16].copy_from_slice(&rec.schema_hash().to_le_bytes());
    dest[16..20].copy_from_slice(&entry_count.to_le_bytes());

    cursor
}
