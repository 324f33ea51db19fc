// ─── Error ──────────────────────────────────────────────────────────────────
use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PackError {
    #[error("destination buffer too small: need {needed} bytes, have {available}")]
    BufferTooSmall { needed: usize, available: usize },
    #[error("snapshot stream truncated: need {needed} bytes, have {available}")]
    TruncatedStream { needed: usize, available: usize },
    #[error("entry index {index} out of range ({field_count} registered fields)")]
    IndexOutOfRange { index: u32, field_count: usize },
    #[error("schema fingerprint mismatch: stream {stream:#018x}, registry {local:#018x}")]
    SchemaMismatch { stream: u64, local: u64 },
}
