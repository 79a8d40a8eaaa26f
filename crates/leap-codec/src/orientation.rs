//! Access-point orientations around the transmitter.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::CodecError;

/// One of the four receiver positions around the cube, numbered clockwise
/// about the vertical axis.  `Ap0` is the canonical decoding reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AccessPoint {
    Ap0,
    Ap1,
    Ap2,
    Ap3,
}

impl AccessPoint {
    pub const COUNT: usize = 4;

    pub const ALL: [AccessPoint; 4] = [
        AccessPoint::Ap0,
        AccessPoint::Ap1,
        AccessPoint::Ap2,
        AccessPoint::Ap3,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Number of 90° turns from the canonical orientation.
    pub fn quarter_turns(self) -> usize {
        self.index()
    }

    pub fn rotation_degrees(self) -> u16 {
        self.index() as u16 * 90
    }

    pub fn is_canonical(self) -> bool {
        self == AccessPoint::Ap0
    }
}

impl TryFrom<usize> for AccessPoint {
    type Error = CodecError;

    fn try_from(i: usize) -> Result<Self, Self::Error> {
        Self::ALL
            .get(i)
            .copied()
            .ok_or(CodecError::InvalidAccessPoint(i))
    }
}

impl fmt::Display for AccessPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AP{}", self.index())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_roundtrip() {
        for (i, ap) in AccessPoint::ALL.iter().enumerate() {
            assert_eq!(ap.index(), i);
            assert_eq!(AccessPoint::try_from(i).unwrap(), *ap);
        }
        assert_eq!(
            AccessPoint::try_from(4),
            Err(CodecError::InvalidAccessPoint(4))
        );
    }

    #[test]
    fn display_and_degrees() {
        assert_eq!(AccessPoint::Ap3.to_string(), "AP3");
        assert_eq!(AccessPoint::Ap2.rotation_degrees(), 180);
        assert!(AccessPoint::Ap0.is_canonical());
        assert!(!AccessPoint::Ap1.is_canonical());
    }
}
