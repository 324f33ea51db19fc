use arrayvec::ArrayVec;
use serde::ser::{Serialize, SerializeMap, Serializer};
use smol_str::SmolStr;
use xxhash_rust::xxh64::xxh64;

use crate::deserialization::{apply_snapshot, decode_scalar};
use crate::error::PackError;
use crate::scalar::ScalarKind;
use crate::serialization::{snapshot_size, write_body, write_snapshot};
use crate::types::{FieldIter, MAX_SCALAR_SIZE, SnapshotMode};

// ─── FieldEntry ─────────────────────────────────────────────────────────────

/// One registry slot. The value lives inline as little-endian bytes of
/// exactly `kind.byte_size()` length; the name is diagnostic-only and
/// never serialized.
#[derive(Debug, Clone)]
pub(crate) struct FieldEntry {
    pub(crate) name: SmolStr,
    pub(crate) kind: ScalarKind,
    pub(crate) data: ArrayVec<u8, MAX_SCALAR_SIZE>,
    pub(crate) dirty: bool,
}

// ─── FieldDescriptor ────────────────────────────────────────────────────────

/// Per-field metadata for diagnostics and tooling.
#[derive(Debug, Clone, serde::Serialize)]
pub struct FieldDescriptor {
    pub index: u32,
    pub name: SmolStr,
    pub kind: ScalarKind,
    pub byte_size: usize,
    pub dirty: bool,
}

// ─── Recordable ─────────────────────────────────────────────────────────────

/// Ordered field registry with dirty-tracking snapshot serialization.
///
/// A user type owns one `Recordable` and registers each of its tracked
/// members against it at construction, receiving a
/// [`TrackedField`](crate::record::TrackedField) handle per member. The
/// registry is append-only: a field's index equals its 0-based
/// registration order and is stable for the container's lifetime. Two
/// containers built by the same registration sequence assign identical
/// indices, which is the contract the wire format rides on.
#[derive(Debug, Default)]
pub struct Recordable {
    pub(crate) fields: Vec<FieldEntry>,
}

impl Recordable {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    pub fn with_capacity(fields: usize) -> Self {
        Self {
            fields: Vec::with_capacity(fields),
        }
    }

    /// Append a registry slot, zero-initialized and clean. Returns the
    /// assigned index. Called through `TrackedField::register`.
    pub(crate) fn register_entry(&mut self, name: &str, kind: ScalarKind) -> u32 {
        let index = self.fields.len() as u32;
        let mut data = ArrayVec::from([0u8; MAX_SCALAR_SIZE]);
        data.truncate(kind.byte_size());
        self.fields.push(FieldEntry {
            name: SmolStr::new(name),
            kind,
            data,
            dirty: false,
        });
        index
    }

    /// Number of registered fields.
    #[inline]
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Number of fields currently marked dirty.
    pub fn dirty_count(&self) -> usize {
        self.fields.iter().filter(|f| f.dirty).count()
    }

    /// xxh64 fingerprint of the registry's kind-tag sequence. Two
    /// containers with the same declared kinds in the same order agree;
    /// carried in every snapshot header so `deserialize` can reject
    /// cross-schema streams.
    pub fn schema_hash(&self) -> u64 {
        let tags: Vec<u8> = self.fields.iter().map(|f| f.kind.tag()).collect();
        xxh64(&tags, 0)
    }

    // ════════════════════════════════════════════════════════════════════════
    // Sizing
    // ════════════════════════════════════════════════════════════════════════

    /// Byte size of a full snapshot: header + every field's (index, value).
    pub fn full_buffer_size(&self) -> usize {
        snapshot_size(self, SnapshotMode::Full)
    }

    /// Byte size of a delta snapshot over the fields dirty right now.
    pub fn modified_buffer_size(&self) -> usize {
        snapshot_size(self, SnapshotMode::Delta)
    }

    // ════════════════════════════════════════════════════════════════════════
    // Snapshots
    // ════════════════════════════════════════════════════════════════════════

    /// Serialize a snapshot into `dest` and mark every field clean.
    ///
    /// `dest` must hold at least [`full_buffer_size`](Self::full_buffer_size)
    /// or [`modified_buffer_size`](Self::modified_buffer_size) bytes,
    /// matching `mode`; otherwise `BufferTooSmall` is returned and no state
    /// changes. Returns the number of bytes written.
    pub fn serialize(&mut self, dest: &mut [u8], mode: SnapshotMode) -> Result<usize, PackError> {
        write_snapshot(self, dest, mode)
    }

    /// Allocating variant of [`serialize`](Self::serialize): returns an
    /// exactly-sized snapshot buffer.
    pub fn snapshot_vec(&mut self, mode: SnapshotMode) -> Vec<u8> {
        let mut buf = vec![0u8; snapshot_size(self, mode)];
        write_body(self, &mut buf, mode);
        self.reset_modified_state();
        buf
    }

    /// Apply a snapshot stream produced by a same-schema container.
    ///
    /// Fields named in the stream are overwritten; all others keep their
    /// value. Dirty flags are not affected — only serialization passes
    /// reset them. Returns the number of entries applied.
    pub fn deserialize(&mut self, src: &[u8]) -> Result<usize, PackError> {
        apply_snapshot(self, src)
    }

    /// Mark every field clean without serializing, discarding pending
    /// changes from the next delta snapshot.
    pub fn reset_modified_state(&mut self) {
        for field in &mut self.fields {
            field.dirty = false;
        }
    }

    // ════════════════════════════════════════════════════════════════════════
    // Diagnostics
    // ════════════════════════════════════════════════════════════════════════

    /// Iterate over raw field views in index order (zero-copy).
    pub fn iter(&self) -> FieldIter<'_> {
        FieldIter {
            record: self,
            pos: 0,
        }
    }

    /// Snapshot of the registry's shape and dirty state.
    pub fn describe(&self) -> Vec<FieldDescriptor> {
        self.fields
            .iter()
            .enumerate()
            .map(|(i, f)| FieldDescriptor {
                index: i as u32,
                name: f.name.clone(),
                kind: f.kind,
                byte_size: f.kind.byte_size(),
                dirty: f.dirty,
            })
            .collect()
    }
}

// ─── Serialize (name → current value map) ───────────────────────────────────

impl Serialize for Recordable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for field in &self.fields {
            map.serialize_entry(field.name.as_str(), &decode_scalar(field.kind, &field.data))?;
        }
        map.end()
    }
}
