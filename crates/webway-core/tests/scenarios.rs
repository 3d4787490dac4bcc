//! End-to-end checks of board construction and path enumeration: the graph
//! invariants every topology must satisfy, plus full game-situation
//! scenarios mixing piece policies and occupancy.

use webway_core::{find_paths, paths_for_piece, BoardGraph};
use webway_protocol::{
    CellCoord, CellId, MovePath, Occupant, OccupancySnapshot, PieceKind, TopologyParams,
};

fn at(board: &BoardGraph, level: u8, index: u16) -> CellId {
    board
        .id_of(CellCoord::new(level, index))
        .expect("cell exists")
}

/// Symmetry, identity and triangle properties over a spread of topologies.
#[test]
fn distance_tables_are_metric() {
    let topologies = [
        TopologyParams::default(),
        TopologyParams {
            max_levels: 2,
            cells_per_level: 8,
            interpath_frequency: 2,
            has_center_cell: false,
        },
        TopologyParams {
            max_levels: 3,
            cells_per_level: 12,
            interpath_frequency: 3,
            has_center_cell: true,
        },
    ];
    for params in topologies {
        let board = BoardGraph::build(params).expect("valid topology");
        let cells: Vec<CellId> = board.cells().collect();
        for &a in &cells {
            assert_eq!(board.adjacent(a, a), Ok(true));
            assert_eq!(board.distance_between(a, a), Ok(0));
            for &b in &cells {
                assert_eq!(board.adjacent(a, b), board.adjacent(b, a));
                let ab = board.distance_between(a, b).expect("in range");
                assert_eq!(Ok(ab), board.distance_between(b, a));
                assert_eq!(ab == 0, a == b);
                for &c in &cells {
                    let ac = board.distance_between(a, c).expect("in range");
                    let cb = board.distance_between(c, b).expect("in range");
                    assert!(
                        ab <= ac + cb,
                        "triangle violated for {a:?} {b:?} via {c:?} on {params:?}"
                    );
                }
            }
        }
    }
}

/// A four-level board with one spoke per hub arc: 4 hub cells plus three
/// 16-cell rings.
#[test]
fn four_level_board_cell_census() {
    let params = TopologyParams {
        max_levels: 4,
        cells_per_level: 16,
        interpath_frequency: 4,
        has_center_cell: false,
    };
    let board = BoardGraph::build(params).expect("valid topology");
    assert_eq!(board.cell_count(), 4 + 16 * 3);
    let hub_cells = (0..4u16).filter(|&i| board.id_of(CellCoord::new(0, i)).is_some());
    assert_eq!(hub_cells.count(), 4);
    assert_eq!(board.id_of(CellCoord::new(0, 4)), None);
}

/// Circumferentially opposite cells on an eight-cell ring sit four hops
/// apart; no spoke shortcut beats walking half the ring.
#[test]
fn opposite_ring_cells_are_half_a_ring_apart() {
    let params = TopologyParams {
        max_levels: 2,
        cells_per_level: 8,
        interpath_frequency: 2,
        has_center_cell: false,
    };
    let board = BoardGraph::build(params).expect("valid topology");
    for index in 0..8u16 {
        let a = at(&board, 1, index);
        let b = at(&board, 1, (index + 4) % 8);
        assert_eq!(board.distance_between(a, b), Ok(4), "index {index}");
    }
}

/// A wizard surrounded by an ally on the only ring exit still reaches the
/// cells beyond it.
#[test]
fn wizard_reaches_past_an_adjacent_ally() {
    let board = BoardGraph::build(TopologyParams::default()).expect("stock board");
    let mut occupancy = OccupancySnapshot::empty(board.cell_count());
    let start = at(&board, 3, 4);
    let ally = at(&board, 3, 5);
    occupancy.set(ally, Occupant::Ally);
    let paths =
        paths_for_piece(&board, PieceKind::Wizard, start, &occupancy).expect("search");
    let beyond = at(&board, 3, 6);
    assert!(
        paths.iter().any(|p| p.destination() == beyond),
        "ally blocks a piece that may pass through it"
    );
}

/// A priestess whose only straight line to a target runs through an
/// occupied cell reaches the nearer cells on that line but not the target.
#[test]
fn priestess_stops_at_the_first_occupant_on_a_line() {
    let board = BoardGraph::build(TopologyParams::default()).expect("stock board");
    let mut occupancy = OccupancySnapshot::empty(board.cell_count());
    // Start on a non-spoke slot so the ring is her only line; block both
    // directions close by.
    let start = at(&board, 1, 0);
    occupancy.set(at(&board, 1, 2), Occupant::Enemy);
    occupancy.set(at(&board, 1, 14), Occupant::Enemy);
    let paths =
        paths_for_piece(&board, PieceKind::Priestess, start, &occupancy).expect("search");
    let destinations: Vec<CellId> = paths.iter().map(MovePath::destination).collect();
    let expected = [
        at(&board, 1, 1),
        at(&board, 1, 2),
        at(&board, 1, 15),
        at(&board, 1, 14),
    ];
    for cell in expected {
        assert!(destinations.contains(&cell), "{cell:?} should be reachable");
    }
    let target = at(&board, 1, 3);
    assert!(
        !destinations.contains(&target),
        "the line past the blocker must be cut off"
    );
    assert_eq!(destinations.len(), expected.len());
}

/// A warrior turn is two independent one-hop sub-moves: the second
/// enumeration starts from wherever the first landed.
#[test]
fn warrior_turn_chains_two_sub_moves() {
    let board = BoardGraph::build(TopologyParams::default()).expect("stock board");
    let mut occupancy = OccupancySnapshot::empty(board.cell_count());
    let start = at(&board, 2, 3);
    occupancy.set(start, Occupant::Ally);
    assert_eq!(PieceKind::Warrior.sub_moves(), 2);

    let first =
        paths_for_piece(&board, PieceKind::Warrior, start, &occupancy).expect("search");
    assert!(first.iter().all(|p| p.hops() == 1));
    let landing = first.first().expect("warrior has moves").destination();

    occupancy.set(start, Occupant::None);
    occupancy.set(landing, Occupant::Ally);
    let second =
        paths_for_piece(&board, PieceKind::Warrior, landing, &occupancy).expect("search");
    assert!(!second.is_empty());
    assert!(second.iter().all(|p| p.start() == landing && p.hops() == 1));
}

/// Every path a piece query returns respects the board's adjacency, starts
/// where the piece stands, and never revisits a cell.
#[test]
fn piece_paths_are_well_formed_for_every_kind() {
    let params = TopologyParams {
        has_center_cell: true,
        ..TopologyParams::default()
    };
    let board = BoardGraph::build(params).expect("stock board with center");
    let mut occupancy = OccupancySnapshot::empty(board.cell_count());
    occupancy.set(at(&board, 1, 5), Occupant::Enemy);
    occupancy.set(at(&board, 2, 3), Occupant::Ally);
    let start = at(&board, 1, 1);
    for kind in PieceKind::ALL {
        let paths = paths_for_piece(&board, kind, start, &occupancy).expect("search");
        for path in &paths {
            assert_eq!(path.start(), start, "{kind:?}");
            assert!(path.hops() >= 1, "{kind:?}");
            for pair in path.steps().windows(2) {
                assert_eq!(board.adjacent(pair[0], pair[1]), Ok(true), "{kind:?}");
            }
            let mut cells: Vec<CellId> = path.steps().to_vec();
            cells.sort();
            cells.dedup();
            assert_eq!(cells.len(), path.steps().len(), "{kind:?} repeats a cell");
        }
    }
}

/// The generic search honours the hop bound from a custom profile.
#[test]
fn search_respects_the_hop_bound() {
    let board = BoardGraph::build(TopologyParams::default()).expect("stock board");
    let occupancy = OccupancySnapshot::empty(board.cell_count());
    let profile = webway_protocol::MovementProfile {
        max_distance: 2,
        same_level_only: false,
        same_index_only: false,
        may_pass_allies: true,
        may_pass_enemies: true,
        must_approach_enemy: false,
    };
    let start = at(&board, 2, 1);
    let paths = find_paths(&board, &profile, start, &occupancy).expect("search");
    assert!(!paths.is_empty());
    assert!(paths.iter().all(|p| p.hops() <= 2));
    for path in &paths {
        let destination = path.destination();
        let shortest = board.distance_between(start, destination).expect("in range");
        assert!(shortest as usize <= path.hops());
    }
}
