//! Error type for the transmission caches.

use leap_codec::CodecError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CacheError {
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("cache capacity must be at least 1, got {0}")]
    InvalidCapacity(usize),
}
