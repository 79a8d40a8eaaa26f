//! Payload files and their segmentation into cube frames.
//!
//! A payload is any `.txt` file in the payload directory.  Its bytes are
//! read MSB first and cut into `dim³`-bit frames; the last frame of a file
//! is zero-padded so no frame ever carries bits from two files.
//!
//! ```text
//!  hello.txt ─▶ 0110 1000 0110 0101 … ─▶ [frame 0][frame 1]…[frame n + 0-pad]
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use leap_codec::{BitStream, CubeDim};

use crate::error::TcuError;

const PAYLOAD_EXTENSION: &str = "txt";

/// Cut `bytes` into frames of `dim.volume()` bits.  Empty input yields no
/// frames.
pub fn segment(bytes: &[u8], dim: CubeDim) -> Vec<BitStream> {
    let frame_bits = dim.volume();
    let bits = BitStream::from_bytes(bytes);
    bits.as_slice()
        .chunks(frame_bits)
        .map(|chunk| {
            let mut frame = chunk.to_vec();
            frame.resize(frame_bits, false);
            BitStream::from_bits(frame)
        })
        .collect()
}

/// Every payload file of a directory, already segmented.
#[derive(Debug, Clone)]
pub struct PayloadLibrary {
    dim: CubeDim,
    root: PathBuf,
    files: BTreeMap<String, Vec<BitStream>>,
}

impl PayloadLibrary {
    /// Read and segment every file under `dir`.
    ///
    /// Fails with [`TcuError::UnsupportedPayload`] on the first file without
    /// a `.txt` extension and with [`TcuError::EmptyPayload`] when the
    /// directory holds no files.  Subdirectories are skipped.
    pub fn load(dir: impl AsRef<Path>, dim: CubeDim) -> Result<Self, TcuError> {
        let root = dir.as_ref().to_path_buf();
        let mut files = BTreeMap::new();

        for entry in std::fs::read_dir(&root)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            let is_txt = path
                .extension()
                .is_some_and(|ext| ext == PAYLOAD_EXTENSION);
            let name = match path.file_name().and_then(|n| n.to_str()) {
                Some(name) if is_txt => name.to_owned(),
                _ => return Err(TcuError::UnsupportedPayload(path)),
            };

            let bytes = std::fs::read(&path)?;
            let frames = segment(&bytes, dim);
            debug!(file = %name, bytes = bytes.len(), frames = frames.len(), "payload segmented");
            files.insert(name, frames);
        }

        if files.is_empty() {
            return Err(TcuError::EmptyPayload(root));
        }
        info!(dir = %root.display(), files = files.len(), dim = dim.side(), "payload library loaded");
        Ok(Self { dim, root, files })
    }

    pub fn dim(&self) -> CubeDim {
        self.dim
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File names in lexicographic order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    pub fn frames(&self, name: &str) -> Option<&[BitStream]> {
        self.files.get(name).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
