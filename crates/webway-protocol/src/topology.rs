use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The innermost ring always has exactly four cells, one per quadrant,
/// regardless of the outer ring size.
pub const HUB_CELLS: u16 = 4;

/// Construction parameters for one board: how many concentric levels, how
/// many cells each outer ring carries, how often a radial spoke crosses the
/// rings, and whether a synthetic center cell sits inside the hub.
///
/// Board-size presets live with the gamemode logic; the engine only sees the
/// resolved record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopologyParams {
    pub max_levels: u8,
    pub cells_per_level: u16,
    pub interpath_frequency: u16,
    pub has_center_cell: bool,
}

impl Default for TopologyParams {
    /// The stock four-ring board.
    fn default() -> Self {
        Self {
            max_levels: 4,
            cells_per_level: 16,
            interpath_frequency: 2,
            has_center_cell: false,
        }
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TopologyError {
    #[error("board needs at least one level")]
    NoLevels,
    #[error("cells per level must be at least 4, got {0}")]
    TooFewCells(u16),
    #[error("cells per level must be divisible by 4, got {0}")]
    UnevenRing(u16),
    #[error("interpath frequency {frequency} outside 1..={max}")]
    BadInterpathFrequency { frequency: u16, max: u16 },
    #[error("interpath frequency {frequency} does not divide the ring size {count}")]
    UnevenSpokes { frequency: u16, count: u16 },
    #[error("board of {0} cells exceeds the cell id space")]
    TooManyCells(usize),
}

impl TopologyParams {
    pub fn validate(&self) -> Result<(), TopologyError> {
        if self.max_levels < 1 {
            return Err(TopologyError::NoLevels);
        }
        if self.cells_per_level < HUB_CELLS {
            return Err(TopologyError::TooFewCells(self.cells_per_level));
        }
        if self.cells_per_level % HUB_CELLS != 0 {
            return Err(TopologyError::UnevenRing(self.cells_per_level));
        }
        let max_frequency = self.cells_per_level / HUB_CELLS;
        if self.interpath_frequency < 1 || self.interpath_frequency > max_frequency {
            return Err(TopologyError::BadInterpathFrequency {
                frequency: self.interpath_frequency,
                max: max_frequency,
            });
        }
        if self.cells_per_level % self.interpath_frequency != 0 {
            return Err(TopologyError::UnevenSpokes {
                frequency: self.interpath_frequency,
                count: self.cells_per_level,
            });
        }
        if self.total_cells() > u16::MAX as usize {
            return Err(TopologyError::TooManyCells(self.total_cells()));
        }
        Ok(())
    }

    /// Number of cells in the ring at `level`.
    pub fn ring_size(&self, level: u8) -> u16 {
        if level == 0 {
            HUB_CELLS
        } else {
            self.cells_per_level
        }
    }

    /// Total cell count of the built board, center cell included.
    pub fn total_cells(&self) -> usize {
        HUB_CELLS as usize
            + (self.max_levels as usize).saturating_sub(1) * self.cells_per_level as usize
            + usize::from(self.has_center_cell)
    }

    /// Whether the angular slot `index` carries a radial spoke. Spokes sit
    /// at every `interpath_frequency`-th slot and a single spoke crosses
    /// every ring at its slot.
    pub fn is_spoke_slot(&self, index: u16) -> bool {
        (index + 1) % self.interpath_frequency == 0
    }

    /// The hub cell covering the angular arc that contains outer slot
    /// `index`.
    pub fn hub_cell_for_slot(&self, index: u16) -> u16 {
        index / (self.cells_per_level / HUB_CELLS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stock_board_validates() {
        assert_eq!(TopologyParams::default().validate(), Ok(()));
        assert_eq!(TopologyParams::default().total_cells(), 4 + 3 * 16);
    }

    #[test]
    fn rejects_uneven_ring() {
        let params = TopologyParams {
            cells_per_level: 10,
            ..TopologyParams::default()
        };
        assert_eq!(params.validate(), Err(TopologyError::UnevenRing(10)));
    }

    #[test]
    fn rejects_zero_levels() {
        let params = TopologyParams {
            max_levels: 0,
            ..TopologyParams::default()
        };
        assert_eq!(params.validate(), Err(TopologyError::NoLevels));
    }

    #[test]
    fn rejects_out_of_range_frequency() {
        for frequency in [0, 5] {
            let params = TopologyParams {
                interpath_frequency: frequency,
                ..TopologyParams::default()
            };
            assert_eq!(
                params.validate(),
                Err(TopologyError::BadInterpathFrequency { frequency, max: 4 })
            );
        }
    }

    #[test]
    fn rejects_frequency_that_skews_spoke_spacing() {
        // 3 is in range for a 16-cell ring but leaves the spokes unevenly
        // spread over the hub arcs.
        let params = TopologyParams {
            interpath_frequency: 3,
            ..TopologyParams::default()
        };
        assert_eq!(
            params.validate(),
            Err(TopologyError::UnevenSpokes {
                frequency: 3,
                count: 16
            })
        );
    }

    #[test]
    fn rejects_boards_larger_than_the_id_space() {
        let params = TopologyParams {
            max_levels: 255,
            cells_per_level: 260,
            interpath_frequency: 2,
            has_center_cell: false,
        };
        assert_eq!(params.validate(), Err(TopologyError::TooManyCells(66_044)));
    }

    #[test]
    fn spoke_slots_are_evenly_spaced() {
        let params = TopologyParams {
            interpath_frequency: 4,
            ..TopologyParams::default()
        };
        let slots: Vec<u16> = (0..16).filter(|&s| params.is_spoke_slot(s)).collect();
        assert_eq!(slots, vec![3, 7, 11, 15]);
        // One spoke lands in each hub cell's arc.
        let hubs: Vec<u16> = slots.iter().map(|&s| params.hub_cell_for_slot(s)).collect();
        assert_eq!(hubs, vec![0, 1, 2, 3]);
    }

    #[test]
    fn every_hub_arc_gets_a_spoke() {
        let params = TopologyParams::default();
        for hub in 0..HUB_CELLS {
            let spokes = (0..params.cells_per_level)
                .filter(|&s| params.is_spoke_slot(s) && params.hub_cell_for_slot(s) == hub)
                .count();
            assert!(spokes >= 1, "hub cell {hub} has no spoke");
        }
    }
}
