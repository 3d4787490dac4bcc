use serde::{Deserialize, Serialize};

use crate::CellId;

/// One fully enumerated candidate move: the start cell followed by every
/// step taken, in order, up to the destination. A real move always has at
/// least two cells. Produced fresh per query and never mutated.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MovePath {
    steps: Vec<CellId>,
}

impl MovePath {
    pub fn new(steps: Vec<CellId>) -> Self {
        debug_assert!(steps.len() >= 2, "a move path needs a start and a step");
        Self { steps }
    }

    pub fn steps(&self) -> &[CellId] {
        &self.steps
    }

    pub fn start(&self) -> CellId {
        self.steps[0]
    }

    pub fn destination(&self) -> CellId {
        self.steps[self.steps.len() - 1]
    }

    /// Number of hops taken, i.e. cells visited past the start.
    pub fn hops(&self) -> usize {
        self.steps.len() - 1
    }
}
