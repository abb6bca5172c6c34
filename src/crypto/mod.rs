//! Cryptographic operations for MEGA node copies.

pub mod aes;
pub mod attrs;
pub mod keys;
pub mod random;

pub use aes::*;
pub use attrs::*;
pub use keys::*;
pub use random::*;
