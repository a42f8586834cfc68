//! molvista-web — Web front end for Molvista.
//! Provides:
//!   - The 3D structure viewer page
//!   - `POST /generate_3d` — compound name to molblock + metadata
//!   - `GET /api/compounds` — registry listing for the picker

pub mod config;
pub mod handlers;
pub mod router;
pub mod state;
