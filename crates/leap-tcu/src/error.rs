use std::path::PathBuf;
use std::time::Duration;

use leap_cache::CacheError;
use leap_codec::{AccessPoint, CodecError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TcuError {
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("cache error: {0}")]
    Cache(#[from] CacheError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("transmitter write timed out after {0:?}")]
    WriteTimeout(Duration),

    #[error("payload directory {} holds no payload files", .0.display())]
    EmptyPayload(PathBuf),

    #[error("unsupported payload file {} (only .txt is accepted)", .0.display())]
    UnsupportedPayload(PathBuf),

    #[error("payload segmented for dim {payload}, unit runs dim {unit}")]
    PayloadDimensionMismatch { unit: usize, payload: usize },

    #[error("unknown payload file: {0}")]
    UnknownPayload(String),

    #[error("session requests no payload files")]
    EmptySession,

    #[error("{0} already has an open session")]
    SlotOccupied(AccessPoint),

    #[error("registry full: {capacity} sessions already open")]
    RegistryFull { capacity: usize },
}
