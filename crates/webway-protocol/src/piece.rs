use serde::{Deserialize, Serialize};

/// Movement constraints for one piece type. One immutable value per kind,
/// shared by every piece of that kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MovementProfile {
    /// Maximum hop count of one move. `UNBOUNDED` for pieces limited by
    /// line of movement rather than distance.
    pub max_distance: u32,
    /// Every step must stay on the start's level.
    pub same_level_only: bool,
    /// Every step must stay on the start's angular index.
    pub same_index_only: bool,
    pub may_pass_allies: bool,
    pub may_pass_enemies: bool,
    /// Destinations must strictly close the gap to at least one enemy.
    pub must_approach_enemy: bool,
}

impl MovementProfile {
    pub const UNBOUNDED: u32 = u32::MAX;
}

/// The six piece types of the game. Each maps to exactly one fixed
/// `MovementProfile`; anything beyond the profile (the pawn's approach rule,
/// the priestess's straight-line reach) is a path-search policy keyed off
/// this enum.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    Pawn,
    Warrior,
    Wizard,
    Priestess,
    MatronMother,
    HolyChampion,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Warrior,
        PieceKind::Wizard,
        PieceKind::Priestess,
        PieceKind::MatronMother,
        PieceKind::HolyChampion,
    ];

    pub const fn profile(self) -> MovementProfile {
        match self {
            PieceKind::Pawn => MovementProfile {
                max_distance: 1,
                same_level_only: false,
                same_index_only: false,
                may_pass_allies: false,
                may_pass_enemies: false,
                must_approach_enemy: true,
            },
            PieceKind::Warrior => MovementProfile {
                max_distance: 1,
                same_level_only: false,
                same_index_only: false,
                may_pass_allies: false,
                may_pass_enemies: false,
                must_approach_enemy: false,
            },
            PieceKind::Wizard => MovementProfile {
                max_distance: 3,
                same_level_only: false,
                same_index_only: false,
                may_pass_allies: true,
                may_pass_enemies: true,
                must_approach_enemy: false,
            },
            PieceKind::Priestess => MovementProfile {
                max_distance: MovementProfile::UNBOUNDED,
                same_level_only: false,
                same_index_only: false,
                may_pass_allies: false,
                may_pass_enemies: false,
                must_approach_enemy: false,
            },
            PieceKind::MatronMother => MovementProfile {
                max_distance: 1,
                same_level_only: false,
                same_index_only: false,
                may_pass_allies: true,
                may_pass_enemies: true,
                must_approach_enemy: false,
            },
            PieceKind::HolyChampion => MovementProfile {
                max_distance: 3,
                same_level_only: false,
                same_index_only: false,
                may_pass_allies: true,
                may_pass_enemies: true,
                must_approach_enemy: false,
            },
        }
    }

    /// Independent sub-moves per turn; each one is enumerated and validated
    /// on its own. Only the warrior moves twice.
    pub const fn sub_moves(self) -> u8 {
        match self {
            PieceKind::Warrior => 2,
            _ => 1,
        }
    }
}
