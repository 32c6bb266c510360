//! Value kind: himpunan tertutup tipe argumen yang bisa di-decode.
//!
//! Menambah kind baru berarti menambah variant di [`ArgKind`], satu method
//! di [`Visitor`], satu case di [`ArgKind::dispatch`], dan satu impl [`Arg`].
//! Tipe tanpa impl `Arg` ditolak compiler saat dipakai di signature.

use super::visitor::Visitor;

/// Ukuran representasi terbesar di antara semua kind
pub const MAX_ARG_SIZE: usize = 8;

/// Tag kind untuk satu argumen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgKind {
    I32,
    I64,
    U32,
    U64,
    F32,
    F64,
    Bool,
}

impl ArgKind {
    /// Ukuran representasi raw dalam bytes
    #[inline(always)]
    pub const fn size(self) -> usize {
        match self {
            ArgKind::I32 | ArgKind::U32 | ArgKind::F32 => 4,
            ArgKind::I64 | ArgKind::U64 | ArgKind::F64 => 8,
            ArgKind::Bool => 1,
        }
    }

    /// Rekonstruksi nilai dari `bytes` lalu panggil operasi visitor yang cocok.
    ///
    /// `bytes.len()` harus sama dengan `self.size()`. Nilai dibangun byte-wise
    /// (`from_ne_bytes`), jadi `bytes` tidak perlu aligned.
    #[inline(always)]
    pub(crate) fn dispatch(self, bytes: &[u8], visitor: &mut dyn Visitor) {
        match self {
            ArgKind::I32 => visitor.visit_i32(i32::from_ne_bytes(take(bytes))),
            ArgKind::I64 => visitor.visit_i64(i64::from_ne_bytes(take(bytes))),
            ArgKind::U32 => visitor.visit_u32(u32::from_ne_bytes(take(bytes))),
            ArgKind::U64 => visitor.visit_u64(u64::from_ne_bytes(take(bytes))),
            ArgKind::F32 => visitor.visit_f32(f32::from_ne_bytes(take(bytes))),
            ArgKind::F64 => visitor.visit_f64(f64::from_ne_bytes(take(bytes))),
            ArgKind::Bool => visitor.visit_bool(bytes[0] != 0),
        }
    }
}

#[inline(always)]
fn take<const W: usize>(bytes: &[u8]) -> [u8; W] {
    let mut out = [0u8; W];
    out.copy_from_slice(&bytes[..W]);
    out
}

/// Pasangan (kind, size) untuk satu posisi di signature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArgSlot {
    pub kind: ArgKind,
    pub size: usize,
}

impl ArgSlot {
    #[inline(always)]
    pub const fn of<A: Arg>() -> Self {
        Self {
            kind: A::KIND,
            size: A::KIND.size(),
        }
    }
}

mod sealed {
    pub trait Sealed {}
}

/// Tipe yang boleh menjadi argumen record.
///
/// Sealed: himpunan kind tertutup, hanya bisa diperluas dari crate ini.
pub trait Arg: Copy + sealed::Sealed + 'static {
    const KIND: ArgKind;

    /// Representasi raw berukuran tetap
    type Bytes: AsRef<[u8]>;

    fn to_bytes(self) -> Self::Bytes;
}

macro_rules! impl_numeric_arg {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl sealed::Sealed for $ty {}

            impl Arg for $ty {
                const KIND: ArgKind = ArgKind::$kind;
                type Bytes = [u8; std::mem::size_of::<$ty>()];

                #[inline(always)]
                fn to_bytes(self) -> Self::Bytes {
                    self.to_ne_bytes()
                }
            }
        )*
    };
}

impl_numeric_arg! {
    i32 => I32,
    i64 => I64,
    u32 => U32,
    u64 => U64,
    f32 => F32,
    f64 => F64,
}

impl sealed::Sealed for bool {}

impl Arg for bool {
    const KIND: ArgKind = ArgKind::Bool;
    type Bytes = [u8; 1];

    #[inline(always)]
    fn to_bytes(self) -> Self::Bytes {
        [self as u8]
    }
}
