//! Grid positions, the 4-connected move model, and the search heuristic.
//!
//! # Coordinates
//!
//! `x` grows East, `y` grows North.  Positions are signed so that
//! [`neighbors`] never has to special-case the edge of a map; bounds and
//! obstacles are applied by [`Grid`][crate::Grid], not here.

use std::fmt;

use crate::Step;

// ── Position ─────────────────────────────────────────────────────────────────

/// An integer grid cell.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The cell one unit move away in `dir`, or `None` past the edge of the
    /// coordinate range.
    #[inline]
    pub fn step(self, dir: Direction) -> Option<Position> {
        let (dx, dy) = dir.delta();
        Some(Position::new(self.x.checked_add(dx)?, self.y.checked_add(dy)?))
    }

    /// Manhattan (L1) distance to `other`.
    #[inline]
    pub fn manhattan(self, other: Position) -> u64 {
        u64::from(self.x.abs_diff(other.x)) + u64::from(self.y.abs_diff(other.y))
    }

    /// `true` if `other` is reachable in exactly one directional move.
    #[inline]
    pub fn is_adjacent(self, other: Position) -> bool {
        self.manhattan(other) == 1
    }
}

impl From<(i32, i32)> for Position {
    #[inline]
    fn from((x, y): (i32, i32)) -> Self {
        Position::new(x, y)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

// ── Direction / Move ─────────────────────────────────────────────────────────

/// One of the four cardinal directions.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// Fixed expansion order.  Search results depend on it, so it never changes.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// `(dx, dy)` unit offset.
    #[inline]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, 1),
            Direction::South => (0, -1),
            Direction::East  => (1, 0),
            Direction::West  => (-1, 0),
        }
    }
}

/// A single unit-time action.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Move {
    /// Stay in place for one step.
    Wait,
    Go(Direction),
}

impl Move {
    /// Recover the move taken between two consecutive waypoints.
    ///
    /// Returns `None` if `to` is neither `from` nor one of its neighbors.
    pub fn between(from: Position, to: Position) -> Option<Move> {
        if from == to {
            return Some(Move::Wait);
        }
        Direction::ALL
            .into_iter()
            .find(|&d| from.step(d) == Some(to))
            .map(Move::Go)
    }
}

// ── Free functions ───────────────────────────────────────────────────────────

/// The 4-connected neighbors of `pos`, in [`Direction::ALL`] order.
///
/// Not filtered by bounds or obstacles.  Cells past `i32::MIN`/`i32::MAX`
/// are skipped, so a position on the edge of the coordinate range yields
/// fewer than four.
#[inline]
pub fn neighbors(pos: Position) -> impl Iterator<Item = Position> {
    Direction::ALL.into_iter().filter_map(move |d| pos.step(d))
}

/// Admissible, consistent distance estimate for unit-cost 4-connected
/// movement: the Manhattan distance.  Independent of time.
#[inline]
pub fn heuristic(pos: Position, goal: Position) -> u64 {
    pos.manhattan(goal)
}

// ── SpaceTimeState ───────────────────────────────────────────────────────────

/// A time-expanded search state.  The same cell at two different steps is two
/// different states.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpaceTimeState {
    pub position: Position,
    pub step:     Step,
}

impl SpaceTimeState {
    #[inline]
    pub const fn new(position: Position, step: Step) -> Self {
        Self { position, step }
    }
}

impl fmt::Display for SpaceTimeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.position, self.step)
    }
}
