//! Buffer Contract dan implementasi in-memory-nya.
//!
//! Core serdes hanya bergantung pada [`ByteBuffer`]: tulis byte ke awal
//! sebuah range lalu dapat sisa range, atau baca byte dari awal range.
//! Aritmetika wraparound sepenuhnya urusan buffer.

use super::byte_range::ByteRange;
use super::error::{StorageError, StorageResult};

/// Kontrak baca/tulis byte-range yang dikonsumsi oleh serdes
pub trait ByteBuffer {
    /// Menyalin `src` ke awal `range`.
    ///
    /// Returns sub-range yang tersisa setelah penulisan.
    fn write(&mut self, src: &[u8], range: ByteRange) -> ByteRange;

    /// Menyalin `dst.len()` byte dari awal `range` ke `dst`.
    ///
    /// Returns jumlah byte yang benar-benar tersalin. Bisa kurang dari
    /// `dst.len()` jika `range` lebih pendek atau melebihi kapasitas;
    /// sisa `dst` diisi nol.
    fn read(&self, range: ByteRange, dst: &mut [u8]) -> usize;
}

/// Manajemen kapasitas cyclic buffer: reservasi dan validasi range
pub trait Reserve {
    /// Klaim `len` byte berikutnya, menimpa data tertua.
    ///
    /// Returns `None` jika `len` melebihi kapasitas.
    fn reserve(&mut self, len: usize) -> Option<ByteRange>;

    /// Bagian `range` yang masih valid.
    ///
    /// Record yang depannya sudah tertimpa menjadi range kosong; range yang
    /// melewati write head dipotong sampai head. Byte asing tidak pernah
    /// muncul di dalam batas range yang dikembalikan.
    fn validate(&self, range: ByteRange) -> ByteRange;
}

/// Window valid untuk buffer dengan write head `head` dan kapasitas `capacity`
#[inline(always)]
pub(crate) fn clamp_to_window(range: ByteRange, head: usize, capacity: usize) -> ByteRange {
    let oldest = head.saturating_sub(capacity);

    if range.begin < oldest || range.begin >= head {
        return ByteRange::empty(range.begin);
    }

    range.truncate(head - range.begin)
}

/// Tulis `src` ke slot fisik mulai dari posisi absolut `begin`, dengan wraparound
#[inline(always)]
pub(crate) fn wrap_write(slots: &mut [u8], begin: usize, src: &[u8]) {
    let capacity = slots.len();
    let len = src.len().min(capacity);
    let offset = begin & (capacity - 1);

    let first_part = (capacity - offset).min(len);
    slots[offset..offset + first_part].copy_from_slice(&src[..first_part]);

    if first_part < len {
        let second_part = len - first_part;
        slots[..second_part].copy_from_slice(&src[first_part..len]);
    }
}

/// Baca dari slot fisik mulai dari posisi absolut `begin`, dengan wraparound.
///
/// Paling banyak `min(dst.len(), range_len, capacity)` byte; sisanya nol.
#[inline(always)]
pub(crate) fn wrap_read(slots: &[u8], begin: usize, range_len: usize, dst: &mut [u8]) -> usize {
    let capacity = slots.len();
    let len = dst.len().min(range_len).min(capacity);
    let offset = begin & (capacity - 1);

    let first_part = (capacity - offset).min(len);
    dst[..first_part].copy_from_slice(&slots[offset..offset + first_part]);

    if first_part < len {
        let second_part = len - first_part;
        dst[first_part..len].copy_from_slice(&slots[..second_part]);
    }

    dst[len..].fill(0);
    len
}

/// Cyclic byte buffer in-memory
///
/// Producer me-reserve range secara berurutan; data tertua ditimpa saat
/// buffer penuh. Alokasi hanya sekali saat inisialisasi.
pub struct CyclicBuffer {
    slots: Box<[u8]>,
    // Posisi absolut reservasi berikutnya
    head: usize,
}

impl CyclicBuffer {
    /// Membuat buffer baru. `capacity` HARUS power of 2.
    pub fn new(capacity: usize) -> StorageResult<Self> {
        if capacity == 0 || !capacity.is_power_of_two() {
            return Err(StorageError::InvalidCapacity(capacity));
        }

        Ok(Self {
            slots: vec![0u8; capacity].into_boxed_slice(),
            head: 0,
        })
    }

    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Posisi absolut write head
    #[inline(always)]
    pub fn head(&self) -> usize {
        self.head
    }
}

impl ByteBuffer for CyclicBuffer {
    #[inline(always)]
    fn write(&mut self, src: &[u8], range: ByteRange) -> ByteRange {
        let len = src.len().min(range.length);
        wrap_write(&mut self.slots, range.begin, &src[..len]);
        range.advance(src.len())
    }

    #[inline(always)]
    fn read(&self, range: ByteRange, dst: &mut [u8]) -> usize {
        wrap_read(&self.slots, range.begin, range.length, dst)
    }
}

impl Reserve for CyclicBuffer {
    #[inline(always)]
    fn reserve(&mut self, len: usize) -> Option<ByteRange> {
        if len > self.capacity() {
            return None;
        }

        let range = ByteRange::new(self.head, len);
        self.head = self.head.wrapping_add(len);
        Some(range)
    }

    #[inline(always)]
    fn validate(&self, range: ByteRange) -> ByteRange {
        clamp_to_window(range, self.head, self.capacity())
    }
}
