//! Shared data types for the webway board engine: cell addressing, occupancy,
//! piece movement profiles, topology parameters and enumerated move paths.
//! Everything here is plain serializable data; the engine itself lives in
//! `webway-core`.

mod cell;
mod path;
mod piece;
mod topology;

pub use crate::cell::*;
pub use crate::path::*;
pub use crate::piece::*;
pub use crate::topology::*;
