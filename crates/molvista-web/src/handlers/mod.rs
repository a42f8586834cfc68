//! HTTP handlers for all web routes.

pub mod generate;
pub mod viewer;
