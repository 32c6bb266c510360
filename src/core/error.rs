use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Error dari backing storage (in-memory maupun mmap)
#[derive(Debug, Error)]
pub enum StorageError {
    /// Kapasitas harus power of 2 dan lebih dari nol
    #[error("capacity {0} is not a non-zero power of two")]
    InvalidCapacity(usize),

    #[error("storage I/O failed: {0}")]
    Io(#[from] io::Error),

    /// File sudah ada tapi layout header-nya berbeda
    #[error("storage file {path} has an incompatible header (capacity {found}, expected {expected})")]
    IncompatibleFile {
        path: PathBuf,
        found: usize,
        expected: usize,
    },

    /// File non-kosong yang bukan storage argring
    #[error("storage file {path} is not an argring storage file")]
    ForeignFile { path: PathBuf },
}

pub type StorageResult<T> = Result<T, StorageError>;
