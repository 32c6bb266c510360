//! Byte Range: jendela kontigu `(begin, length)` di dalam backing buffer.
//!
//! `begin` adalah posisi absolut (monotonic). Backing buffer yang cyclic
//! memetakan posisi ini ke slot fisik dengan mask kapasitas.

/// Window kontigu di dalam cyclic buffer
///
/// Range dengan `length == 0` berarti "tidak ada data". Semua operasi
/// mengembalikan range baru, tidak ada mutasi in-place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ByteRange {
    /// Posisi absolut byte pertama
    pub begin: usize,
    /// Jumlah byte yang tersedia
    pub length: usize,
}

impl ByteRange {
    #[inline(always)]
    pub const fn new(begin: usize, length: usize) -> Self {
        Self { begin, length }
    }

    /// Range kosong pada posisi tertentu
    #[inline(always)]
    pub const fn empty(begin: usize) -> Self {
        Self { begin, length: 0 }
    }

    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Posisi absolut satu byte setelah akhir range
    #[inline(always)]
    pub const fn end(&self) -> usize {
        self.begin.wrapping_add(self.length)
    }

    /// Sub-range setelah `count` byte pertama dikonsumsi.
    ///
    /// Length di-clamp ke nol, tidak pernah underflow.
    #[inline(always)]
    pub const fn advance(&self, count: usize) -> Self {
        Self {
            begin: self.begin.wrapping_add(count),
            length: self.length.saturating_sub(count),
        }
    }

    /// Range yang sama, dipotong maksimal `length` byte
    #[inline(always)]
    pub const fn truncate(&self, length: usize) -> Self {
        Self {
            begin: self.begin,
            length: if length < self.length {
                length
            } else {
                self.length
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_consumes_prefix() {
        let range = ByteRange::new(10, 8);
        let rest = range.advance(4);

        assert_eq!(rest, ByteRange::new(14, 4));
        // Range asli tidak berubah
        assert_eq!(range.length, 8);
    }

    #[test]
    fn test_advance_clamps_length() {
        let rest = ByteRange::new(0, 3).advance(8);

        assert_eq!(rest.begin, 8);
        assert!(rest.is_empty());
    }

    #[test]
    fn test_truncate() {
        let range = ByteRange::new(100, 12);

        assert_eq!(range.truncate(4), ByteRange::new(100, 4));
        assert_eq!(range.truncate(64), range);
        assert_eq!(range.end(), 112);
    }
}
