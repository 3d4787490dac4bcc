use serde::{Deserialize, Serialize};

/// Flat storage offset of a cell inside one built board.
///
/// Ids are only meaningful for the board that produced them. Because the hub
/// ring is smaller than the outer rings, no level/index arithmetic may be
/// derived from a raw id; use the board's coordinate lookups instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CellId(pub u16);

impl CellId {
    #[inline]
    pub const fn new(raw: u16) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Ring coordinate of a cell: concentric level plus angular index within the
/// level's ring. `(level, index)` is the identity key of a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    pub level: u8,
    pub index: u16,
}

impl CellCoord {
    /// The synthetic hub-center cell. It belongs to no ring and is adjacent
    /// to the four level-0 cells only.
    pub const CENTER: CellCoord = CellCoord {
        level: 0,
        index: u16::MAX,
    };

    #[inline]
    pub const fn new(level: u8, index: u16) -> Self {
        Self { level, index }
    }

    #[inline]
    pub const fn is_center(self) -> bool {
        self.index == u16::MAX
    }
}

/// Who holds a cell, always relative to the side asking. Occupancy is owned
/// by the surrounding game, never by the engine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Occupant {
    #[default]
    None,
    Ally,
    Enemy,
}

/// By-value occupancy snapshot indexed by `CellId`, the form the sync layer
/// ships and path queries consume.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct OccupancySnapshot {
    cells: Vec<Occupant>,
}

impl OccupancySnapshot {
    pub fn empty(cell_count: usize) -> Self {
        Self {
            cells: vec![Occupant::None; cell_count],
        }
    }

    pub fn set(&mut self, cell: CellId, occupant: Occupant) {
        if let Some(slot) = self.cells.get_mut(cell.index()) {
            *slot = occupant;
        }
    }

    /// Cells outside the snapshot read as unoccupied.
    pub fn occupant_of(&self, cell: CellId) -> Occupant {
        self.cells.get(cell.index()).copied().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
