//! Key and initialization-vector types for Trivium.

use core::convert::TryFrom;
use core::fmt;

/// Length of a Trivium key in bytes (80 bits).
pub const KEY_BYTES: usize = 10;

/// Length of a Trivium initialization vector in bytes (80 bits).
pub const IV_BYTES: usize = 10;

/// 80-bit Trivium key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Key(pub [u8; KEY_BYTES]);

/// 80-bit Trivium initialization vector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Iv(pub [u8; IV_BYTES]);

impl From<[u8; KEY_BYTES]> for Key {
    fn from(value: [u8; KEY_BYTES]) -> Self {
        Self(value)
    }
}

impl From<[u8; IV_BYTES]> for Iv {
    fn from(value: [u8; IV_BYTES]) -> Self {
        Self(value)
    }
}

impl TryFrom<&[u8]> for Key {
    type Error = InvalidLength;

    fn try_from(bytes: &[u8]) -> Result<Self, InvalidLength> {
        let array: [u8; KEY_BYTES] = bytes
            .try_into()
            .map_err(|_| InvalidLength::Key(bytes.len()))?;
        Ok(Self(array))
    }
}

impl TryFrom<&[u8]> for Iv {
    type Error = InvalidLength;

    fn try_from(bytes: &[u8]) -> Result<Self, InvalidLength> {
        let array: [u8; IV_BYTES] = bytes
            .try_into()
            .map_err(|_| InvalidLength::Iv(bytes.len()))?;
        Ok(Self(array))
    }
}

/// Error returned when converting a slice of the wrong length into a
/// [`Key`] or [`Iv`]. Carries the length that was actually supplied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InvalidLength {
    /// The key slice was not exactly [`KEY_BYTES`] bytes long.
    Key(usize),
    /// The IV slice was not exactly [`IV_BYTES`] bytes long.
    Iv(usize),
}

impl fmt::Display for InvalidLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidLength::Key(len) => {
                write!(f, "invalid key length: expected {KEY_BYTES} bytes, got {len}")
            }
            InvalidLength::Iv(len) => {
                write!(f, "invalid IV length: expected {IV_BYTES} bytes, got {len}")
            }
        }
    }
}

impl std::error::Error for InvalidLength {}
