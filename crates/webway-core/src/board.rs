use std::collections::VecDeque;

use thiserror::Error;
use tracing::debug;

use webway_protocol::{CellCoord, CellId, TopologyError, TopologyParams, HUB_CELLS};

/// A cell id outside the built graph. Always a caller bug; propagated,
/// never swallowed.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
#[error("cell id {0:?} is outside the board")]
pub struct UnknownCell(pub CellId);

/// Cells within this fraction of a quadrant axis snap onto it before
/// classification, so border cells always land in one quadrant.
const AXIS_SNAP_EPSILON: f64 = 1e-9;

/// The full cell graph of one board: every cell of every ring, the
/// symmetric adjacency table and the all-pairs hop-count distance table.
///
/// Built once per game from validated `TopologyParams` and immutable
/// afterwards, so it can be shared read-only across any number of
/// concurrent path queries. Occupancy lives outside; the graph only knows
/// shape.
#[derive(Clone, Debug)]
pub struct BoardGraph {
    params: TopologyParams,
    coords: Vec<CellCoord>,
    center: Option<CellId>,
    adjacency: Vec<bool>,
    distance: Vec<u32>,
}

impl BoardGraph {
    pub fn build(params: TopologyParams) -> Result<Self, TopologyError> {
        params.validate()?;

        let mut coords = Vec::with_capacity(params.total_cells());
        for level in 0..params.max_levels {
            for index in 0..params.ring_size(level) {
                coords.push(CellCoord::new(level, index));
            }
        }
        let center = if params.has_center_cell {
            coords.push(CellCoord::CENTER);
            Some(CellId::new((coords.len() - 1) as u16))
        } else {
            None
        };

        let cells = coords.len();
        let mut graph = Self {
            params,
            coords,
            center,
            adjacency: vec![false; cells * cells],
            distance: Vec::new(),
        };
        for id in 0..cells {
            // A cell is trivially connected to itself; the search uses this
            // as its idle state.
            graph.adjacency[id * cells + id] = true;
        }
        graph.link_rings();
        graph.link_spokes();
        if let Some(center) = center {
            for hub in 0..HUB_CELLS {
                let hub_id = graph.ring_id(0, hub);
                graph.set_adjacent(center, hub_id);
            }
        }
        graph.fill_distances();

        debug!(
            cells,
            levels = params.max_levels,
            center = params.has_center_cell,
            "built board graph"
        );
        Ok(graph)
    }

    fn link_rings(&mut self) {
        for level in 0..self.params.max_levels {
            let count = self.params.ring_size(level);
            for index in 0..count {
                let a = self.ring_id(level, index);
                let b = self.ring_id(level, (index + 1) % count);
                self.set_adjacent(a, b);
            }
        }
    }

    /// One radial spoke crosses every ring at its slot, hub included.
    fn link_spokes(&mut self) {
        if self.params.max_levels < 2 {
            return;
        }
        for slot in 0..self.params.cells_per_level {
            if !self.params.is_spoke_slot(slot) {
                continue;
            }
            let hub = self.ring_id(0, self.params.hub_cell_for_slot(slot));
            let innermost = self.ring_id(1, slot);
            self.set_adjacent(hub, innermost);
            for level in 1..self.params.max_levels - 1 {
                let inner = self.ring_id(level, slot);
                let outer = self.ring_id(level + 1, slot);
                self.set_adjacent(inner, outer);
            }
        }
    }

    /// Breadth-first hop counts from every cell. O(cells^2), paid once at
    /// construction so every later lookup is O(1).
    fn fill_distances(&mut self) {
        let cells = self.coords.len();
        let mut distance = vec![u32::MAX; cells * cells];
        let mut queue = VecDeque::new();
        for src in 0..cells {
            let row = &mut distance[src * cells..(src + 1) * cells];
            row[src] = 0;
            queue.clear();
            queue.push_back(src);
            while let Some(cell) = queue.pop_front() {
                for next in 0..cells {
                    if next == cell || !self.adjacency[cell * cells + next] {
                        continue;
                    }
                    if row[next] != u32::MAX {
                        continue;
                    }
                    row[next] = row[cell] + 1;
                    queue.push_back(next);
                }
            }
            if let Some(stranded) = row.iter().position(|&d| d == u32::MAX) {
                // A validated topology is always connected; reaching this
                // means the construction itself is broken.
                panic!("board construction defect: cell {stranded} unreachable from {src}");
            }
        }
        self.distance = distance;
    }

    fn ring_id(&self, level: u8, index: u16) -> CellId {
        let offset = if level == 0 {
            0
        } else {
            HUB_CELLS as usize + (level as usize - 1) * self.params.cells_per_level as usize
        };
        CellId::new((offset + index as usize) as u16)
    }

    fn set_adjacent(&mut self, a: CellId, b: CellId) {
        let cells = self.coords.len();
        self.adjacency[a.index() * cells + b.index()] = true;
        self.adjacency[b.index() * cells + a.index()] = true;
    }

    fn check(&self, id: CellId) -> Result<(), UnknownCell> {
        if id.index() < self.coords.len() {
            Ok(())
        } else {
            Err(UnknownCell(id))
        }
    }

    pub fn params(&self) -> TopologyParams {
        self.params
    }

    pub fn cell_count(&self) -> usize {
        self.coords.len()
    }

    pub fn center_cell(&self) -> Option<CellId> {
        self.center
    }

    /// Every cell id of the board, center cell last.
    pub fn cells(&self) -> impl Iterator<Item = CellId> + '_ {
        (0..self.coords.len() as u16).map(CellId::new)
    }

    pub fn coord_of(&self, id: CellId) -> Result<CellCoord, UnknownCell> {
        self.coords.get(id.index()).copied().ok_or(UnknownCell(id))
    }

    pub fn id_of(&self, coord: CellCoord) -> Option<CellId> {
        if coord.is_center() {
            return self.center;
        }
        if coord.level >= self.params.max_levels || coord.index >= self.params.ring_size(coord.level)
        {
            return None;
        }
        Some(self.ring_id(coord.level, coord.index))
    }

    /// Whether `a` and `b` are one traversable step apart. Self-adjacency
    /// holds for every cell.
    pub fn adjacent(&self, a: CellId, b: CellId) -> Result<bool, UnknownCell> {
        self.check(a)?;
        self.check(b)?;
        Ok(self.adjacency[a.index() * self.coords.len() + b.index()])
    }

    /// Minimum hop count between `a` and `b`. Zero exactly when `a == b`.
    pub fn distance_between(&self, a: CellId, b: CellId) -> Result<u32, UnknownCell> {
        self.check(a)?;
        self.check(b)?;
        Ok(self.distance_at(a, b))
    }

    /// All cells one real step away from `cell` (self excluded).
    pub fn neighbors(
        &self,
        cell: CellId,
    ) -> Result<impl Iterator<Item = CellId> + '_, UnknownCell> {
        self.check(cell)?;
        let cells = self.coords.len();
        Ok((0..cells)
            .filter(move |&other| other != cell.index() && self.adjacency[cell.index() * cells + other])
            .map(|raw| CellId::new(raw as u16)))
    }

    /// Angular sector in `0..=3` used to split the board among up to four
    /// players. A cell sitting on a quadrant axis is snapped onto it first,
    /// so border cells classify deterministically; the four hub cells land
    /// one per quadrant and the center cell reads as quadrant 0.
    pub fn quadrant(&self, cell: CellId) -> Result<u8, UnknownCell> {
        let coord = self.coord_of(cell)?;
        if coord.is_center() {
            return Ok(0);
        }
        let count = self.params.ring_size(coord.level) as f64;
        let mut sector = coord.index as f64 * 4.0 / count + 0.5;
        if (sector - sector.round()).abs() < AXIS_SNAP_EPSILON {
            sector = sector.round();
        }
        Ok((sector.floor() as u8) % 4)
    }

    /// Outer-ring cells belonging to quadrant `quadrant`, the pool a
    /// player's starting zone is drawn from. Hub and center cells belong to
    /// no zone.
    pub fn cells_in_quadrant(&self, quadrant: u8) -> Vec<CellId> {
        self.cells()
            .filter(|&id| {
                let coord = self.coords[id.index()];
                !coord.is_center()
                    && coord.level > 0
                    && self.quadrant(id).map_or(false, |q| q == quadrant)
            })
            .collect()
    }

    pub(crate) fn coord_at(&self, id: CellId) -> CellCoord {
        self.coords[id.index()]
    }

    pub(crate) fn distance_at(&self, a: CellId, b: CellId) -> u32 {
        self.distance[a.index() * self.coords.len() + b.index()]
    }
}
