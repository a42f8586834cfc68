//! molvista-common — Shared types and errors used across all Molvista crates.

pub mod error;
pub mod registry;

// Re-export commonly used types
pub use registry::{CompoundRecord, CompoundRegistry};
