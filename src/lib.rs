//! Dirty-tracking binary snapshots for flat, fixed-width field sets.
//!
//! A user type owns a [`Recordable`] registry and declares its state as
//! [`TrackedField`] handles registered against it. The registry serializes
//! either the full field set or only the fields written since the last
//! pass ([`SnapshotMode`]), and applies such snapshots back onto any
//! container with the same declared schema. The wire layout lives in
//! [`types`].

pub mod deserialization;
pub mod error;
pub mod record;
pub mod scalar;
pub mod serialization;
pub mod types;

pub use error::PackError;
pub use record::{FieldDescriptor, Recordable, TrackedField};
pub use scalar::{Scalar, ScalarKind, ScalarValue};
pub use types::{FieldView, SnapshotMode};
