//! Record Queue
//!
//! Antrian FIFO handle record (descriptor + byte range) berkapasitas tetap.
//! Ring dengan mask power-of-2; tidak ada alokasi setelah inisialisasi.
//! Dimiliki penuh oleh satu [`RecordLog`](crate::record::RecordLog), jadi
//! semua operasi lewat `&mut self` tanpa atomic.

/// Ring queue berkapasitas `N` (power of 2)
pub struct RecordQueue<T, const N: usize> {
    // Posisi absolut push berikutnya
    head: usize,
    // Posisi absolut pop berikutnya
    tail: usize,
    slots: Box<[Option<T>]>,
}

impl<T, const N: usize> Default for RecordQueue<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize> RecordQueue<T, N> {
    const MASK: usize = {
        assert!(N > 0 && N.is_power_of_two(), "N must be power of 2");
        N - 1
    };

    /// Membuat queue baru. Alokasi hanya terjadi sekali di sini.
    pub fn new() -> Self {
        let _ = Self::MASK;

        let mut slots = Vec::with_capacity(N);
        slots.resize_with(N, || None);

        Self {
            head: 0,
            tail: 0,
            slots: slots.into_boxed_slice(),
        }
    }

    /// Push ke belakang queue.
    ///
    /// Returns `false` (dan `value` dibuang) jika queue penuh.
    #[inline(always)]
    pub fn try_push(&mut self, value: T) -> bool {
        if self.is_full() {
            return false;
        }

        self.slots[self.head & Self::MASK] = Some(value);
        self.head = self.head.wrapping_add(1);
        true
    }

    /// Push, membuang elemen tertua jika queue penuh.
    ///
    /// Returns elemen yang dibuang.
    #[inline(always)]
    pub fn push_evicting(&mut self, value: T) -> Option<T> {
        let evicted = if self.is_full() { self.pop() } else { None };
        let pushed = self.try_push(value);
        debug_assert!(pushed);
        evicted
    }

    /// Pop elemen tertua
    #[inline(always)]
    pub fn pop(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }

        let value = self.slots[self.tail & Self::MASK].take();
        self.tail = self.tail.wrapping_add(1);
        value
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.head == self.tail
    }

    #[inline(always)]
    pub fn is_full(&self) -> bool {
        self.len() >= N
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.head.wrapping_sub(self.tail)
    }

    #[inline(always)]
    pub const fn capacity(&self) -> usize {
        N
    }
}
