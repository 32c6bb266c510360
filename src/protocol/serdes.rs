//! Typed Descriptor: size, encode, dan akses singleton per signature.
//!
//! Layout record (tanpa header, tanpa padding, tanpa type tag):
//! ┌──────────┬──────────┬─────┬──────────────┐
//! │ arg 0    │ arg 1    │ ... │ arg N-1      │
//! │ raw size │ raw size │     │ raw size     │
//! └──────────┴──────────┴─────┴──────────────┘
//!
//! Informasi tipe hanya ada di [`Descriptor`], di luar byte record.

use std::marker::PhantomData;

use super::descriptor::{descriptor_for, Descriptor};
use super::error::{SerdesError, SerdesResult};
use super::signature::Signature;
use crate::core::{ByteBuffer, ByteRange};

/// Operasi typed untuk signature `S`
///
/// Tidak pernah di-instansiasi; semua method berupa associated function.
pub struct Serdes<S>(PhantomData<fn() -> S>);

impl<S: Signature> Serdes<S> {
    /// Descriptor singleton untuk `S`.
    ///
    /// Dua signature dengan urutan kind yang sama berbagi instance yang sama.
    #[inline(always)]
    pub fn instance() -> &'static Descriptor {
        descriptor_for(S::LAYOUT)
    }

    /// Total ukuran raw semua argumen
    #[inline(always)]
    pub const fn required_size(_args: &S) -> usize {
        S::SIZE
    }

    /// Encode `args` ke `range`.
    ///
    /// Caller wajib me-reserve minimal `required_size` bytes; tidak
    /// divalidasi ulang di sini. Gunakan [`Serdes::try_encode`] untuk versi
    /// yang memeriksa ukuran range.
    #[inline(always)]
    pub fn encode<B: ByteBuffer + ?Sized>(buffer: &mut B, range: ByteRange, args: S) -> ByteRange {
        args.encode_into(buffer, range)
    }

    /// Encode dengan validasi ukuran range.
    ///
    /// Tidak ada byte yang ditulis jika range terlalu kecil.
    pub fn try_encode<B: ByteBuffer + ?Sized>(
        buffer: &mut B,
        range: ByteRange,
        args: S,
    ) -> SerdesResult<ByteRange> {
        let required = Self::required_size(&args);
        if range.length < required {
            log::warn!(
                "rejecting encode: record needs {} bytes, range has {}",
                required,
                range.length
            );
            return Err(SerdesError::RangeTooSmall {
                required,
                available: range.length,
            });
        }

        Ok(Self::encode(buffer, range, args))
    }
}
