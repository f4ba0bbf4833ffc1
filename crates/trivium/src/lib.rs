//! Trivium stream cipher keystream generator.
//!
//! This crate implements the eSTREAM portfolio Trivium cipher: a 288-bit
//! nonlinear feedback shift register driven by an 80-bit key and an 80-bit
//! initialization vector. Construction runs the specified 1152-clock warm-up,
//! after which the generator yields keystream bits or bytes on demand; XORing
//! data with the keystream encrypts it, and the same stream decrypts.
//!
//! The implementation aims for clarity and testability rather than
//! constant-time guarantees; it should not be treated as side-channel
//! hardened.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod key;
mod register;
mod stream;

pub use crate::key::{InvalidLength, Iv, Key, IV_BYTES, KEY_BYTES};
pub use crate::stream::Trivium;
