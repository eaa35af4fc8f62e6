//! Map extent and obstacle masking.
//!
//! The search itself only knows about 4-connected neighbors.  Whether a
//! neighbor may actually be entered is answered here: a cell must lie inside
//! the optional [`Bounds`] and must not be reported blocked by the
//! [`Obstacles`] predicate supplied by the surrounding environment.

use std::collections::HashSet;
use std::fmt;

use crate::{MapfError, MapfResult, Position};

// ── Bounds ────────────────────────────────────────────────────────────────────

/// Rectangular map extent covering cells `0..width × 0..height`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub width:  u32,
    pub height: u32,
}

impl Bounds {
    /// Both dimensions must be non-zero.
    pub fn new(width: u32, height: u32) -> MapfResult<Self> {
        if width == 0 || height == 0 {
            return Err(MapfError::InvalidBounds { width, height });
        }
        Ok(Self { width, height })
    }

    #[inline]
    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0
            && pos.y >= 0
            && i64::from(pos.x) < i64::from(self.width)
            && i64::from(pos.y) < i64::from(self.height)
    }

    pub fn cell_count(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

// ── Region ────────────────────────────────────────────────────────────────────

/// An inclusive axis-aligned rectangle `min ..= max`.
///
/// Used to cap the search on an unbounded [`Grid`]: any cell outside every
/// finite feature of the map looks like any other.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct Region {
    pub min: Position,
    pub max: Position,
}

impl Region {
    /// The single cell `pos`.
    pub fn around(pos: Position) -> Self {
        Self { min: pos, max: pos }
    }

    /// Smallest region covering every position, or `None` if there are none.
    pub fn covering<I: IntoIterator<Item = Position>>(positions: I) -> Option<Self> {
        let mut iter = positions.into_iter();
        let mut region = Self::around(iter.next()?);
        iter.for_each(|pos| region.include(pos));
        Some(region)
    }

    /// Grow to cover `pos`.
    pub fn include(&mut self, pos: Position) {
        self.min = Position::new(self.min.x.min(pos.x), self.min.y.min(pos.y));
        self.max = Position::new(self.max.x.max(pos.x), self.max.y.max(pos.y));
    }

    /// Grow to cover `other`.
    pub fn union(mut self, other: Region) -> Self {
        self.include(other.min);
        self.include(other.max);
        self
    }

    /// Pad every side by `margin` cells, saturating at the coordinate range.
    pub fn expand(self, margin: u32) -> Self {
        let m = i32::try_from(margin).unwrap_or(i32::MAX);
        Self {
            min: Position::new(self.min.x.saturating_sub(m), self.min.y.saturating_sub(m)),
            max: Position::new(self.max.x.saturating_add(m), self.max.y.saturating_add(m)),
        }
    }

    #[inline]
    pub fn contains(&self, pos: Position) -> bool {
        (self.min.x..=self.max.x).contains(&pos.x) && (self.min.y..=self.max.y).contains(&pos.y)
    }
}

// ── Obstacles ─────────────────────────────────────────────────────────────────

/// Static obstacle predicate.
///
/// Implementations must be `Send + Sync` so a single grid can be shared by
/// planners running on the Rayon pool.  Any `Fn(Position) -> bool` closure
/// qualifies.
pub trait Obstacles: Send + Sync {
    /// `true` if `pos` can never be entered.
    fn is_blocked(&self, pos: Position) -> bool;

    /// Rectangle covering every blocked cell, if known.
    ///
    /// Predicates that cannot enumerate their cells report `None`.
    fn extent(&self) -> Option<Region> {
        None
    }
}

impl<F> Obstacles for F
where
    F: Fn(Position) -> bool + Send + Sync,
{
    #[inline]
    fn is_blocked(&self, pos: Position) -> bool {
        self(pos)
    }
}

/// No obstacles at all.
#[derive(Copy, Clone, Debug, Default)]
pub struct OpenGrid;

impl Obstacles for OpenGrid {
    #[inline]
    fn is_blocked(&self, _pos: Position) -> bool {
        false
    }
}

/// An explicit set of blocked cells.
#[derive(Clone, Debug, Default)]
pub struct BlockedCells {
    cells: HashSet<Position>,
}

impl BlockedCells {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `pos` blocked.  Returns `false` if it already was.
    pub fn insert(&mut self, pos: Position) -> bool {
        self.cells.insert(pos)
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.cells.contains(&pos)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl FromIterator<Position> for BlockedCells {
    fn from_iter<I: IntoIterator<Item = Position>>(iter: I) -> Self {
        Self { cells: iter.into_iter().collect() }
    }
}

impl Obstacles for BlockedCells {
    #[inline]
    fn is_blocked(&self, pos: Position) -> bool {
        self.cells.contains(&pos)
    }

    fn extent(&self) -> Option<Region> {
        Region::covering(self.cells.iter().copied())
    }
}

// ── Grid ──────────────────────────────────────────────────────────────────────

/// Optional bounds plus an obstacle predicate — everything the planner needs
/// to know about the static map.
pub struct Grid {
    bounds:    Option<Bounds>,
    obstacles: Box<dyn Obstacles>,
}

impl Grid {
    /// An unbounded grid with no obstacles.
    pub fn open() -> Self {
        Self { bounds: None, obstacles: Box::new(OpenGrid) }
    }

    /// A bounded grid with no obstacles.
    pub fn bounded(bounds: Bounds) -> Self {
        Self { bounds: Some(bounds), obstacles: Box::new(OpenGrid) }
    }

    /// Replace the obstacle predicate.
    pub fn with_obstacles<O: Obstacles + 'static>(mut self, obstacles: O) -> Self {
        self.obstacles = Box::new(obstacles);
        self
    }

    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    /// `true` if `pos` lies within the bounds (always `true` when unbounded).
    #[inline]
    pub fn contains(&self, pos: Position) -> bool {
        self.bounds.is_none_or(|b| b.contains(pos))
    }

    #[inline]
    pub fn is_blocked(&self, pos: Position) -> bool {
        self.obstacles.is_blocked(pos)
    }

    /// Rectangle covering every known obstacle.
    pub fn obstacle_extent(&self) -> Option<Region> {
        self.obstacles.extent()
    }

    /// `true` if an agent may stand on `pos`.
    #[inline]
    pub fn is_traversable(&self, pos: Position) -> bool {
        self.contains(pos) && !self.is_blocked(pos)
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::open()
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grid")
            .field("bounds", &self.bounds)
            .finish_non_exhaustive()
    }
}
