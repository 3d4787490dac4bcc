use std::collections::HashSet;

use tracing::trace;

use webway_protocol::{
    CellCoord, CellId, MovePath, MovementProfile, Occupant, OccupancySnapshot, PieceKind,
};

use crate::board::{BoardGraph, UnknownCell};

/// Read-only view of which side, if any, holds each cell. Supplied fresh on
/// every query; the engine never keeps a reference past the call.
pub trait OccupancyView {
    fn occupant_of(&self, cell: CellId) -> Occupant;
}

/// Adapter exposing a closure as an occupancy view, for callers that query
/// their own piece store instead of building a snapshot.
pub struct OccupancyFn<F>(pub F);

impl<F> OccupancyView for OccupancyFn<F>
where
    F: Fn(CellId) -> Occupant,
{
    fn occupant_of(&self, cell: CellId) -> Occupant {
        (self.0)(cell)
    }
}

impl OccupancyView for OccupancySnapshot {
    fn occupant_of(&self, cell: CellId) -> Occupant {
        OccupancySnapshot::occupant_of(self, cell)
    }
}

/// Whether a single step from `from` onto `to` is allowed under `profile`,
/// given who holds `to`. Each movement lock the profile sets must hold;
/// setting both locks pins the piece to its cell.
fn valid_step(profile: &MovementProfile, from: CellCoord, to: CellCoord, onto: Occupant) -> bool {
    match onto {
        Occupant::Ally if !profile.may_pass_allies => return false,
        Occupant::Enemy if !profile.may_pass_enemies => return false,
        _ => {}
    }
    if profile.same_level_only && from.level != to.level {
        return false;
    }
    if profile.same_index_only && from.index != to.index {
        return false;
    }
    true
}

/// Enumerates every maximal legal path from `start` under `profile`.
///
/// Explicit backtracking rather than recursion, so deep boards cannot grow
/// the call stack: the frontier holds `(cell, attach)` pairs where `attach`
/// is the length of the path prefix the step extends. A directed-step set
/// keeps any `(from, to)` step from being explored twice in one search;
/// it prunes exploration only and never decides leafness. A path is
/// emitted only as a leaf: when it reaches the profile's hop bound or no
/// valid step extends it. An empty result is a legal outcome, not an
/// error.
pub fn find_paths(
    board: &BoardGraph,
    profile: &MovementProfile,
    start: CellId,
    occupancy: &impl OccupancyView,
) -> Result<Vec<MovePath>, UnknownCell> {
    board.coord_of(start)?;
    let max_cells = (profile.max_distance as usize).saturating_add(1);
    if max_cells < 2 {
        return Ok(Vec::new());
    }

    let mut paths = Vec::new();
    let mut path: Vec<CellId> = vec![start];
    let mut frontier: Vec<(CellId, usize)> = Vec::new();
    let mut visited: HashSet<(CellId, CellId)> = HashSet::new();
    push_steps(board, profile, occupancy, &path, &mut frontier, &mut visited);

    let mut iterations = 0u64;
    while let Some((cell, attach)) = frontier.pop() {
        iterations += 1;
        path.truncate(attach);
        path.push(cell);
        if path.len() >= max_cells {
            paths.push(MovePath::new(path.clone()));
            continue;
        }
        if !push_steps(board, profile, occupancy, &path, &mut frontier, &mut visited) {
            // Dead end short of the hop bound; still a maximal path.
            paths.push(MovePath::new(path.clone()));
        }
    }

    trace!(iterations, paths = paths.len(), "path search exhausted");
    Ok(paths)
}

/// Pushes every unexplored valid step out of the path's end cell, and
/// reports whether any valid step exists at all. A step consumed by the
/// visited set under another prefix is not re-pushed but still counts as an
/// extension, so the caller never mistakes a pruned path for a leaf.
fn push_steps(
    board: &BoardGraph,
    profile: &MovementProfile,
    occupancy: &impl OccupancyView,
    path: &[CellId],
    frontier: &mut Vec<(CellId, usize)>,
    visited: &mut HashSet<(CellId, CellId)>,
) -> bool {
    let end = path[path.len() - 1];
    let Ok(neighbors) = board.neighbors(end) else {
        return false;
    };
    let mut extendable = false;
    for next in neighbors {
        if path.contains(&next) {
            continue;
        }
        if !valid_step(
            profile,
            board.coord_at(end),
            board.coord_at(next),
            occupancy.occupant_of(next),
        ) {
            continue;
        }
        extendable = true;
        if !visited.insert((end, next)) {
            continue;
        }
        frontier.push((next, path.len()));
    }
    extendable
}

/// All legal move paths for one piece of `kind` standing on `start`,
/// applying the kind's policy on top of its profile: the pawn's
/// approach-an-enemy destination filter, the priestess's straight
/// unobstructed lines, the holy champion's union of both reaches. For the
/// warrior this enumerates one of its two sub-moves; turn logic calls it
/// again from the landing cell. Capture legality stays with the caller.
pub fn paths_for_piece(
    board: &BoardGraph,
    kind: PieceKind,
    start: CellId,
    occupancy: &impl OccupancyView,
) -> Result<Vec<MovePath>, UnknownCell> {
    let profile = kind.profile();
    match kind {
        PieceKind::Pawn => {
            let paths = find_paths(board, &profile, start, occupancy)?;
            Ok(approach_filter(board, start, occupancy, paths))
        }
        PieceKind::Warrior | PieceKind::Wizard | PieceKind::MatronMother => {
            find_paths(board, &profile, start, occupancy)
        }
        PieceKind::Priestess => line_paths(board, &profile, start, occupancy),
        PieceKind::HolyChampion => {
            let mut paths = find_paths(board, &profile, start, occupancy)?;
            let lines = line_paths(board, &PieceKind::Priestess.profile(), start, occupancy)?;
            paths.extend(lines);
            let mut seen = HashSet::new();
            paths.retain(|path| seen.insert(path.clone()));
            Ok(paths)
        }
    }
}

/// Keeps only paths whose destination strictly closes the gap to at least
/// one enemy-held cell. With no enemy on the board nothing qualifies.
fn approach_filter(
    board: &BoardGraph,
    start: CellId,
    occupancy: &impl OccupancyView,
    paths: Vec<MovePath>,
) -> Vec<MovePath> {
    let enemies: Vec<CellId> = board
        .cells()
        .filter(|&cell| occupancy.occupant_of(cell) == Occupant::Enemy)
        .collect();
    if enemies.is_empty() {
        return Vec::new();
    }
    paths
        .into_iter()
        .filter(|path| {
            let dest = path.destination();
            enemies
                .iter()
                .any(|&enemy| board.distance_at(dest, enemy) < board.distance_at(start, enemy))
        })
        .collect()
}

/// Straight-line movement: every cell along each unobstructed ray from
/// `start` is a destination. Rays run both ways around the start's ring and
/// along every radial line through its slot, inward across the hub to the
/// center cell when present. An occupant the profile cannot pass ends its
/// ray there; the occupied cell itself is still reachable, nothing beyond
/// it is.
fn line_paths(
    board: &BoardGraph,
    profile: &MovementProfile,
    start: CellId,
    occupancy: &impl OccupancyView,
) -> Result<Vec<MovePath>, UnknownCell> {
    let coord = board.coord_of(start)?;
    let mut paths = Vec::new();

    if coord.is_center() {
        // Past the hub ring no single spoke continues the line, so rays
        // from the center end on the hub.
        for hub in board.neighbors(start)? {
            paths.push(MovePath::new(vec![start, hub]));
        }
        return Ok(paths);
    }

    // Both ways around the ring.
    let count = board.params().ring_size(coord.level);
    for dir in [1i32, -1] {
        let mut cells = vec![start];
        let mut index = coord.index;
        loop {
            index = (index as i32 + dir).rem_euclid(count as i32) as u16;
            if index == coord.index {
                break; // full circle
            }
            let Some(next) = board.id_of(CellCoord::new(coord.level, index)) else {
                break;
            };
            cells.push(next);
            paths.push(MovePath::new(cells.clone()));
            if blocks_ray(profile, occupancy.occupant_of(next)) {
                break;
            }
        }
    }

    // Every radial line through the start's slot.
    for first in board.neighbors(start)? {
        if !is_radial_pair(coord, board.coord_at(first)) {
            continue;
        }
        let mut cells = vec![start, first];
        paths.push(MovePath::new(cells.clone()));
        if blocks_ray(profile, occupancy.occupant_of(first)) {
            continue;
        }
        let mut prev = start;
        let mut cur = first;
        while let Some(next) = radial_next(board, prev, cur) {
            cells.push(next);
            paths.push(MovePath::new(cells.clone()));
            if blocks_ray(profile, occupancy.occupant_of(next)) {
                break;
            }
            prev = cur;
            cur = next;
        }
    }

    Ok(paths)
}

fn blocks_ray(profile: &MovementProfile, occupant: Occupant) -> bool {
    match occupant {
        Occupant::None => false,
        Occupant::Ally => !profile.may_pass_allies,
        Occupant::Enemy => !profile.may_pass_enemies,
    }
}

/// Radial position of a cell: the center sits below the hub ring.
fn radial_rank(coord: CellCoord) -> i32 {
    if coord.is_center() {
        -1
    } else {
        coord.level as i32
    }
}

fn is_radial_pair(a: CellCoord, b: CellCoord) -> bool {
    radial_rank(a) != radial_rank(b)
}

/// The cell continuing the straight radial line `prev -> cur`, if the line
/// extends that far.
fn radial_next(board: &BoardGraph, prev: CellId, cur: CellId) -> Option<CellId> {
    let prev_coord = board.coord_at(prev);
    let cur_coord = board.coord_at(cur);
    if cur_coord.is_center() {
        return None;
    }
    let outward = radial_rank(cur_coord) > radial_rank(prev_coord);
    let next = if outward {
        if cur_coord.level == 0 {
            // Came up from the center; no single spoke continues the line.
            return None;
        }
        CellCoord::new(cur_coord.level + 1, cur_coord.index)
    } else if cur_coord.level == 0 {
        return board.center_cell();
    } else if cur_coord.level == 1 {
        CellCoord::new(0, board.params().hub_cell_for_slot(cur_coord.index))
    } else {
        CellCoord::new(cur_coord.level - 1, cur_coord.index)
    };
    board
        .id_of(next)
        .filter(|&id| board.adjacent(cur, id).unwrap_or(false))
}
