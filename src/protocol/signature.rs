//! Argument Signature: tuple `(A, B, ...)` dengan elemen bertipe [`Arg`].
//!
//! Layout statis `&'static [ArgSlot]` dibangun compile-time per tuple type,
//! sehingga encode tidak butuh informasi tipe runtime apa pun.

use super::kind::{Arg, ArgSlot};
use crate::core::{ByteBuffer, ByteRange};

/// Urutan kind argumen yang tetap untuk satu jenis record
pub trait Signature: Copy + 'static {
    /// Pasangan (kind, size) per posisi, sesuai urutan deklarasi
    const LAYOUT: &'static [ArgSlot];

    /// Total ukuran encoded record
    const SIZE: usize;

    /// Tulis representasi raw setiap argumen secara berurutan ke `range`.
    ///
    /// Returns sisa range setelah argumen terakhir.
    fn encode_into<B: ByteBuffer + ?Sized>(self, buffer: &mut B, range: ByteRange) -> ByteRange;
}

macro_rules! impl_signature {
    ($($T:ident),*) => {
        impl<$($T: Arg),*> Signature for ($($T,)*) {
            const LAYOUT: &'static [ArgSlot] = &[$(ArgSlot::of::<$T>()),*];
            const SIZE: usize = 0 $(+ <$T as Arg>::KIND.size())*;

            #[inline(always)]
            #[allow(non_snake_case, unused_variables, unused_mut)]
            fn encode_into<Buf: ByteBuffer + ?Sized>(
                self,
                buffer: &mut Buf,
                range: ByteRange,
            ) -> ByteRange {
                let ($($T,)*) = self;
                let mut range = range;
                $(
                    range = buffer.write($T.to_bytes().as_ref(), range);
                )*
                range
            }
        }
    };
}

impl_signature!();
impl_signature!(A);
impl_signature!(A, B);
impl_signature!(A, B, C);
impl_signature!(A, B, C, D);
impl_signature!(A, B, C, D, E);
impl_signature!(A, B, C, D, E, F);
impl_signature!(A, B, C, D, E, F, G);
impl_signature!(A, B, C, D, E, F, G, H);
impl_signature!(A, B, C, D, E, F, G, H, I);
impl_signature!(A, B, C, D, E, F, G, H, I, J);
impl_signature!(A, B, C, D, E, F, G, H, I, J, K);
impl_signature!(A, B, C, D, E, F, G, H, I, J, K, L);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::ArgKind;

    #[test]
    fn test_layout_follows_declaration_order() {
        let kinds: Vec<ArgKind> = <(i32, f64, bool)>::LAYOUT.iter().map(|s| s.kind).collect();
        assert_eq!(kinds, vec![ArgKind::I32, ArgKind::F64, ArgKind::Bool]);
    }

    #[test]
    fn test_size_is_sum_without_padding() {
        assert_eq!(<()>::SIZE, 0);
        assert_eq!(<(bool, u64)>::SIZE, 9);
        assert_eq!(<(i32, f32)>::SIZE, 8);
        assert_eq!(<(bool, bool, bool, i64, u32)>::SIZE, 15);
    }
}
