//! Board topology and movement-path engine for the webway board game.
//!
//! The board is a spider web of concentric rings joined by radial spokes.
//! `BoardGraph` builds the cell graph plus its adjacency and all-pairs
//! distance tables once per game; the `pathfind` functions enumerate every
//! legal move path for a piece against a read-only occupancy view. The
//! engine holds no game state of its own and a built graph may be shared
//! read-only across threads.

mod board;
mod pathfind;

pub use crate::board::*;
pub use crate::pathfind::*;
