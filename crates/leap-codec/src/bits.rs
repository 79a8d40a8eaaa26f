//! Owned bit sequences exchanged with the codec.

use std::fmt;
use std::ops::Index;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CodecError;

/// An ordered sequence of bits.
///
/// Byte conversions are MSB-first: bit 0 of the stream is the most
/// significant bit of the first byte.  The text form is a string of `'0'`
/// and `'1'` characters; whitespace and `_` separators are ignored when
/// parsing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct BitStream {
    bits: Vec<bool>,
}

impl BitStream {
    /// A stream of `len` zero bits.
    pub fn zeros(len: usize) -> Self {
        Self { bits: vec![false; len] }
    }

    pub fn from_bits(bits: Vec<bool>) -> Self {
        Self { bits }
    }

    /// Unpack bytes MSB-first.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let bits = bytes
            .iter()
            .flat_map(|byte| (0..8).rev().map(move |shift| (byte >> shift) & 1 == 1))
            .collect();
        Self { bits }
    }

    /// Pack MSB-first.  A trailing partial byte is zero-padded.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.bits
            .chunks(8)
            .map(|chunk| {
                chunk
                    .iter()
                    .enumerate()
                    .fold(0u8, |acc, (i, &bit)| acc | ((bit as u8) << (7 - i)))
            })
            .collect()
    }

    /// Lowercase hex of [`to_bytes`](Self::to_bytes).
    pub fn to_hex(&self) -> String {
        self.to_bytes().iter().map(|b| format!("{b:02x}")).collect()
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn get(&self, i: usize) -> Option<bool> {
        self.bits.get(i).copied()
    }

    /// # Panics
    /// If `i` is out of range.
    pub fn set(&mut self, i: usize, bit: bool) {
        self.bits[i] = bit;
    }

    pub fn push(&mut self, bit: bool) {
        self.bits.push(bit);
    }

    pub fn count_ones(&self) -> usize {
        self.bits.iter().filter(|b| **b).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.bits.iter().copied()
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.bits
    }

    pub fn into_inner(self) -> Vec<bool> {
        self.bits
    }
}

impl Index<usize> for BitStream {
    type Output = bool;

    fn index(&self, i: usize) -> &bool {
        &self.bits[i]
    }
}

impl From<Vec<bool>> for BitStream {
    fn from(bits: Vec<bool>) -> Self {
        Self { bits }
    }
}

impl FromIterator<bool> for BitStream {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        Self { bits: iter.into_iter().collect() }
    }
}

impl FromStr for BitStream {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.chars()
            .filter(|c| !c.is_whitespace() && *c != '_')
            .map(|c| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                other => Err(CodecError::InvalidBitText(other)),
            })
            .collect()
    }
}

impl fmt::Display for BitStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in &self.bits {
            f.write_str(if *bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}
