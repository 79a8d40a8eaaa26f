//! Per-access-point transmission sessions.

use std::collections::VecDeque;

use uuid::Uuid;

use leap_codec::BitStream;

use crate::error::TcuError;
use crate::payload::PayloadLibrary;

/// Frames still owed to one admitted access point, in transmission order.
#[derive(Debug, Clone)]
pub struct SessionQueue {
    id: Uuid,
    files: Vec<String>,
    frames: VecDeque<BitStream>,
}

impl SessionQueue {
    /// Queue the frames of `requested` files, in the order given.
    pub fn new(requested: &[String], library: &PayloadLibrary) -> Result<Self, TcuError> {
        if requested.is_empty() {
            return Err(TcuError::EmptySession);
        }
        let mut frames = VecDeque::new();
        for name in requested {
            let file_frames = library
                .frames(name)
                .ok_or_else(|| TcuError::UnknownPayload(name.clone()))?;
            frames.extend(file_frames.iter().cloned());
        }
        Ok(Self {
            id: Uuid::new_v4(),
            files: requested.to_vec(),
            frames,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn files(&self) -> &[String] {
        &self.files
    }

    pub fn next_frame(&mut self) -> Option<BitStream> {
        self.frames.pop_front()
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}
