//! Sinks for packed frames.
//!
//! | Type | Target |
//! |---|---|
//! | [`DeviceTransmitter`] | Character device or file (the cube's serial bridge) |
//! | [`MemoryTransmitter`] | In-process buffer, for tests and dry runs |

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use crate::error::TcuError;

/// Anything that can push one packed frame to the cube.
#[async_trait]
pub trait Transmitter: Send {
    /// Write one frame.  Either the whole frame is accepted or an error is
    /// returned; there are no retries at this level.
    async fn write(&mut self, frame: &[u8]) -> Result<(), TcuError>;
}

// ─────────────────────────────────────────────
// DeviceTransmitter
// ─────────────────────────────────────────────

/// Writes frames to an already existing device node.
#[derive(Debug)]
pub struct DeviceTransmitter {
    path: PathBuf,
    file: File,
    timeout: Duration,
}

impl DeviceTransmitter {
    /// Open `path` for writing.  The node is never created.
    pub async fn open(path: impl AsRef<Path>, timeout: Duration) -> Result<Self, TcuError> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new().write(true).append(true).open(&path).await?;
        info!(device = %path.display(), timeout_ms = timeout.as_millis() as u64, "transmitter opened");
        Ok(Self { path, file, timeout })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl Transmitter for DeviceTransmitter {
    async fn write(&mut self, frame: &[u8]) -> Result<(), TcuError> {
        let file = &mut self.file;
        let written = tokio::time::timeout(self.timeout, async move {
            file.write_all(frame).await?;
            file.flush().await
        })
        .await;

        match written {
            Ok(result) => {
                result?;
                debug!(device = %self.path.display(), bytes = frame.len(), "frame written");
                Ok(())
            }
            Err(_) => Err(TcuError::WriteTimeout(self.timeout)),
        }
    }
}

// ─────────────────────────────────────────────
// MemoryTransmitter
// ─────────────────────────────────────────────

/// Records every frame in a shared buffer.
///
/// Cloning shares the buffer, so a test can keep one handle while the unit
/// owns the other.
#[derive(Debug, Clone, Default)]
pub struct MemoryTransmitter {
    frames: Arc<Mutex<Vec<Vec<u8>>>>,
    failing: bool,
}

impl MemoryTransmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// A transmitter that refuses every write with a broken-pipe error.
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    /// Frames written so far, oldest first.
    pub fn frames(&self) -> Vec<Vec<u8>> {
        self.frames.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.frames.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.lock().is_empty()
    }
}

#[async_trait]
impl Transmitter for MemoryTransmitter {
    async fn write(&mut self, frame: &[u8]) -> Result<(), TcuError> {
        if self.failing {
            return Err(TcuError::Io(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                "transmitter offline",
            )));
        }
        self.frames.lock().push(frame.to_vec());
        Ok(())
    }
}
