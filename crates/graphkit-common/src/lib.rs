//! # graphkit-common
//!
//! Foundation layer for graphkit: vertex and weight types, the error
//! taxonomy, and hashing utilities.
//!
//! This crate provides the building blocks used by all other graphkit
//! crates. It has no internal dependencies and should be kept minimal.
//!
//! ## Modules
//!
//! - [`types`] - Core type definitions ([`Vertex`], [`Weight`])
//! - [`utils`] - Utility functions and helpers (hashing, errors)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod types;
pub mod utils;

// Re-export commonly used types at crate root
pub use types::{DEFAULT_WEIGHT, Vertex, Weight};
pub use utils::error::{Error, Result};
