use serde::ser::{Serialize, Serializer};

// ─── ScalarKind ─────────────────────────────────────────────────────────────

/// The closed set of field kinds a registry can declare.
///
/// Each kind has a stable one-byte tag (the unit of the schema fingerprint)
/// and a fixed serialized width. Bool serializes as one byte.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub enum ScalarKind {
    Bool = 1,
    I8 = 2,
    I16 = 3,
    I32 = 4,
    I64 = 5,
    U8 = 6,
    U16 = 7,
    U32 = 8,
    U64 = 9,
    F32 = 10,
    F64 = 11,
}

impl ScalarKind {
    /// Serialized width in bytes. Fixed per kind, known at registration.
    #[inline]
    pub const fn byte_size(self) -> usize {
        match self {
            ScalarKind::Bool | ScalarKind::I8 | ScalarKind::U8 => 1,
            ScalarKind::I16 | ScalarKind::U16 => 2,
            ScalarKind::I32 | ScalarKind::U32 | ScalarKind::F32 => 4,
            ScalarKind::I64 | ScalarKind::U64 | ScalarKind::F64 => 8,
        }
    }

    /// Stable tag byte, hashed into the schema fingerprint.
    #[inline]
    pub const fn tag(self) -> u8 {
        self as u8
    }
}

// ─── Scalar Trait ───────────────────────────────────────────────────────────

/// A Rust primitive that can live in a tracked field.
///
/// Implemented exactly for the fixed-width types named by [`ScalarKind`].
/// `write_le`/`read_le` operate on a slice of exactly `KIND.byte_size()`
/// bytes — the registry guarantees the length on every call.
pub trait Scalar: Copy {
    const KIND: ScalarKind;

    fn write_le(self, dest: &mut [u8]);
    fn read_le(src: &[u8]) -> Self;
}

macro_rules! impl_scalar {
    ($($ty:ty => $kind:ident),* $(,)?) => {$(
        impl Scalar for $ty {
            const KIND: ScalarKind = ScalarKind::$kind;

            #[inline]
            fn write_le(self, dest: &mut [u8]) {
                dest.copy_from_slice(&self.to_le_bytes());
            }

            #[inline]
            fn read_le(src: &[u8]) -> Self {
                let mut bytes = [0u8; std::mem::size_of::<$ty>()];
                bytes.copy_from_slice(src);
                Self::from_le_bytes(bytes)
            }
        }
    )*};
}

impl_scalar! {
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    f32 => F32,
    f64 => F64,
}

impl Scalar for bool {
    const KIND: ScalarKind = ScalarKind::Bool;

    #[inline]
    fn write_le(self, dest: &mut [u8]) {
        dest[0] = self as u8;
    }

    #[inline]
    fn read_le(src: &[u8]) -> Self {
        src[0] != 0
    }
}

// ─── ScalarValue ────────────────────────────────────────────────────────────

/// Dynamically-typed view of a field's current value.
///
/// Narrower integers widen to their 64-bit family, f32 widens to f64. Used
/// by the diagnostic surface (iteration, JSON dumps), never by the wire
/// format itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScalarValue {
    Bool(bool),
    I64(i64),
    U64(u64),
    F64(f64),
}

impl ScalarValue {
    pub fn as_bool(self) -> Option<bool> {
        match self {
            ScalarValue::Bool(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_i64(self) -> Option<i64> {
        match self {
            ScalarValue::I64(i) => Some(i),
            _ => None,
        }
    }

    pub fn as_u64(self) -> Option<u64> {
        match self {
            ScalarValue::U64(u) => Some(u),
            _ => None,
        }
    }

    pub fn as_f64(self) -> Option<f64> {
        match self {
            ScalarValue::F64(f) => Some(f),
            _ => None,
        }
    }
}

// ─── Serialize (for the diagnostic JSON surface) ────────────────────────────

impl Serialize for ScalarValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match *self {
            ScalarValue::Bool(b) => serializer.serialize_bool(b),
            ScalarValue::I64(i) => serializer.serialize_i64(i),
            ScalarValue::U64(u) => serializer.serialize_u64(u),
            ScalarValue::F64(f) => serializer.serialize_f64(f),
        }
    }
}

// ─── From impls ─────────────────────────────────────────────────────────────

impl From<bool> for ScalarValue {
    fn from(b: bool) -> Self {
        ScalarValue::Bool(b)
    }
}

impl From<i64> for ScalarValue {
    fn from(i: i64) -> Self {
        ScalarValue::I64(i)
    }
}

impl From<u64> for ScalarValue {
    fn from(u: u64) -> Self {
        ScalarValue::U64(u)
    }
}

impl From<f64> for ScalarValue {
    fn from(f: f64) -> Self {
        ScalarValue::F64(f)
    }
}
