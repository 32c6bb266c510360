//! Core module: byte range, buffer contract, dan cyclic storage
//!
//! Prinsip desain:
//! - Zero-Copy: Data langsung ditulis ke slot buffer (heap atau mmap)
//! - Bounded: Record queue dan storage berkapasitas tetap (power of 2)
//! - No-Allocation: Semua buffer pre-allocated saat init

mod buffer;
mod byte_range;
mod error;
mod mmap_storage;
mod record_queue;

pub use buffer::{ByteBuffer, CyclicBuffer, Reserve};
pub use byte_range::ByteRange;
pub use error::{StorageError, StorageResult};
pub use mmap_storage::MmapStorage;
pub use record_queue::RecordQueue;
