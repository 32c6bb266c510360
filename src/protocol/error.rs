use thiserror::Error;

/// Error dari jalur encode yang divalidasi
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SerdesError {
    #[error("range of {available} bytes cannot hold a record of {required} bytes")]
    RangeTooSmall { required: usize, available: usize },
}

pub type SerdesResult<T> = Result<T, SerdesError>;
