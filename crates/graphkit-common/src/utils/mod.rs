//! Utility modules.
//!
//! - [`error`] - The error taxonomy shared by every graphkit crate
//! - [`hash`] - Hash map alias for algorithm state

pub mod error;
pub mod hash;
