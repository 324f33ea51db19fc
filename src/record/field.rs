use std::marker::PhantomData;

use super::recordable::Recordable;
use crate::scalar::Scalar;

// ─── TrackedField ───────────────────────────────────────────────────────────

/// Typed handle to one registered field of a [`Recordable`].
///
/// A handle can only be obtained by registering against a container, so a
/// field cannot exist without an owner. The handle itself is a plain
/// (index, type) pair: `Copy`, cheap, and valid for any container built by
/// the same registration sequence — which is exactly the producer/consumer
/// contract of the wire format.
pub struct TrackedField<T: Scalar> {
    index: u32,
    _kind: PhantomData<fn() -> T>,
}

impl<T: Scalar> Clone for TrackedField<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Scalar> Copy for TrackedField<T> {}

impl<T: Scalar> std::fmt::Debug for TrackedField<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrackedField")
            .field("index", &self.index)
            .field("kind", &T::KIND)
            .finish()
    }
}

impl<T: Scalar> TrackedField<T> {
    /// Register a new field of type `T` in `owner`, assigning the next
    /// free index. `name` is a diagnostic label only; it never reaches
    /// the wire.
    pub fn register(owner: &mut Recordable, name: &str) -> Self {
        let index = owner.register_entry(name, T::KIND);
        Self {
            index,
            _kind: PhantomData,
        }
    }

    /// Registration index: 0-based declaration order, stable for the
    /// owner's lifetime.
    #[inline]
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Serialized width of this field. Fixed at compile time by `T`.
    #[inline]
    pub fn byte_size(&self) -> usize {
        T::KIND.byte_size()
    }

    /// Current value. No side effect.
    #[inline]
    pub fn read(&self, owner: &Recordable) -> T {
        let entry = &owner.fields[self.index as usize];
        debug_assert_eq!(entry.kind, T::KIND, "TrackedField used with a foreign registry");
        T::read_le(&entry.data)
    }

    /// Store `value` and mark the field dirty. Total over all
    /// representable `T`.
    #[inline]
    pub fn write(&self, owner: &mut Recordable, value: T) {
        let entry = &mut owner.fields[self.index as usize];
        debug_assert_eq!(entry.kind, T::KIND, "TrackedField used with a foreign registry");
        value.write_le(&mut entry.data);
        entry.dirty = true;
    }

    /// True since the last `write` not yet captured by a serialization
    /// pass.
    #[inline]
    pub fn is_dirty(&self, owner: &Recordable) -> bool {
        owner.fields[self.index as usize].dirty
    }

    /// The diagnostic label given at registration.
    #[inline]
    pub fn name<'a>(&self, owner: &'a Recordable) -> &'a str {
        owner.fields[self.index as usize].name.as_str()
    }
}
