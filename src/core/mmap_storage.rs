//! Memory-Mapped Cyclic Storage
//!
//! Varian [`CyclicBuffer`](super::CyclicBuffer) yang di-back oleh file:
//! - Record yang sudah di-encode tetap ada setelah proses crash
//! - Kernel-managed paging: OS menangani flush ke disk
//! - Write head disimpan di header file, bukan di heap

use memmap2::{MmapMut, MmapOptions};
use std::fs::{File, OpenOptions};
use std::io::Read;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::buffer::{clamp_to_window, wrap_read, wrap_write, ByteBuffer, Reserve};
use super::byte_range::ByteRange;
use super::error::{StorageError, StorageResult};

/// Header di awal file mmap
#[repr(C, align(64))]
struct StorageHeader {
    magic: u64,             // Magic number untuk validasi
    version: u32,           // Versi format
    _pad: u32,              //
    capacity: u64,          // Kapasitas area data dalam bytes
    write_pos: AtomicUsize, // Posisi absolut write head
}

const MAGIC: u64 = 0x4152_4752_494E_4731; // "ARGRING1"
const VERSION: u32 = 1;
const HEADER_SIZE: usize = std::mem::size_of::<StorageHeader>();

/// Cyclic byte storage di atas file mmap
pub struct MmapStorage {
    mmap: MmapMut,
    capacity: usize,
}

impl MmapStorage {
    /// Membuat atau membuka mmap storage
    ///
    /// # Arguments
    /// * `path` - Path ke file storage
    /// * `capacity` - Kapasitas area data dalam bytes (harus power of 2)
    ///
    /// File kosong diinisialisasi; file yang sudah ada dipakai ulang jika
    /// header-nya kompatibel, termasuk posisi write head-nya. File non-kosong
    /// tanpa header argring ditolak dengan [`StorageError::ForeignFile`] dan
    /// tidak diubah.
    ///
    /// Selama storage hidup, file tidak boleh diubah oleh mapping lain atau
    /// proses lain, termasuk `open` kedua pada path yang sama.
    pub fn open<P: AsRef<Path>>(path: P, capacity: usize) -> StorageResult<Self> {
        if capacity == 0 || !capacity.is_power_of_two() {
            return Err(StorageError::InvalidCapacity(capacity));
        }

        let path = path.as_ref();
        let total_size = HEADER_SIZE + capacity;

        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)?;

        let existing_len = file.metadata()?.len() as usize;
        let reopened = existing_len > 0;
        if reopened {
            check_existing_header(&mut file, existing_len, path, capacity)?;
        }

        if existing_len < total_size {
            file.set_len(total_size as u64)?;
        }

        // SAFETY: Ukuran file minimal total_size. Mapping ini hanya valid
        // selama tidak ada mapping atau proses lain yang mengubah file;
        // kontrak itu dibebankan ke caller (lihat doc `open`).
        let mut mmap = unsafe { MmapOptions::new().len(total_size).map_mut(&file)? };

        // SAFETY: mmap page-aligned dan minimal HEADER_SIZE bytes
        let header = unsafe { &mut *(mmap.as_mut_ptr() as *mut StorageHeader) };

        if reopened {
            log::info!(
                "reopened storage {} (capacity {}, head {})",
                path.display(),
                capacity,
                header.write_pos.load(Ordering::Acquire)
            );
        } else {
            header.magic = MAGIC;
            header.version = VERSION;
            header._pad = 0;
            header.capacity = capacity as u64;
            header.write_pos = AtomicUsize::new(0);
            log::info!(
                "initialized storage {} (capacity {})",
                path.display(),
                capacity
            );
        }

        Ok(Self { mmap, capacity })
    }

    #[inline(always)]
    fn header(&self) -> &StorageHeader {
        // SAFETY: Header berada di awal mmap region
        unsafe { &*(self.mmap.as_ptr() as *const StorageHeader) }
    }

    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Posisi absolut write head
    #[inline(always)]
    pub fn head(&self) -> usize {
        self.header().write_pos.load(Ordering::Acquire)
    }

    /// Flush perubahan ke disk
    pub fn flush(&self) -> StorageResult<()> {
        self.mmap.flush()?;
        Ok(())
    }
}

/// Validasi header file yang sudah ada, sebelum file diubah atau di-map
fn check_existing_header(
    file: &mut File,
    existing_len: usize,
    path: &Path,
    capacity: usize,
) -> StorageResult<()> {
    let foreign = || StorageError::ForeignFile {
        path: path.to_path_buf(),
    };

    if existing_len < HEADER_SIZE {
        return Err(foreign());
    }

    let mut raw = [0u8; HEADER_SIZE];
    file.read_exact(&mut raw)?;

    // Offset mengikuti layout #[repr(C)] StorageHeader
    let magic = u64::from_ne_bytes(header_field(&raw, 0));
    let version = u32::from_ne_bytes(header_field(&raw, 8));
    let found = u64::from_ne_bytes(header_field(&raw, 16)) as usize;

    if magic != MAGIC || version != VERSION {
        return Err(foreign());
    }

    if found != capacity {
        return Err(StorageError::IncompatibleFile {
            path: path.to_path_buf(),
            found,
            expected: capacity,
        });
    }

    Ok(())
}

#[inline(always)]
fn header_field<const W: usize>(raw: &[u8; HEADER_SIZE], at: usize) -> [u8; W] {
    let mut bytes = [0u8; W];
    bytes.copy_from_slice(&raw[at..at + W]);
    bytes
}

impl ByteBuffer for MmapStorage {
    #[inline(always)]
    fn write(&mut self, src: &[u8], range: ByteRange) -> ByteRange {
        let len = src.len().min(range.length);
        wrap_write(&mut self.mmap[HEADER_SIZE..], range.begin, &src[..len]);
        range.advance(src.len())
    }

    #[inline(always)]
    fn read(&self, range: ByteRange, dst: &mut [u8]) -> usize {
        wrap_read(&self.mmap[HEADER_SIZE..], range.begin, range.length, dst)
    }
}

impl Reserve for MmapStorage {
    #[inline(always)]
    fn reserve(&mut self, len: usize) -> Option<ByteRange> {
        if len > self.capacity {
            return None;
        }

        let header = self.header();
        let head = header.write_pos.load(Ordering::Relaxed);
        header
            .write_pos
            .store(head.wrapping_add(len), Ordering::Release);

        Some(ByteRange::new(head, len))
    }

    #[inline(always)]
    fn validate(&self, range: ByteRange) -> ByteRange {
        clamp_to_window(range, self.head(), self.capacity)
    }
}
