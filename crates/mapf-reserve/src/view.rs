//! `ReservationView` — the read-only reservation interface used by search.
//!
//! Planners receive `&dyn ReservationView` rather than the concrete table so
//! the search stays a pure function of its explicit inputs.  Holding a
//! `&ReservationTable` for the duration of a planning batch *is* the
//! point-in-time snapshot: the table cannot be committed to while any view is
//! borrowed.

use mapf_core::{Position, Region, Step};

/// Read-only collision queries.
///
/// `Sync` so one view can be shared by planners on the Rayon pool.
pub trait ReservationView: Sync {
    /// `true` if some agent stands on `pos` at `step` (vertex reservation).
    fn is_occupied(&self, pos: Position, step: Step) -> bool;

    /// `true` if some agent moves exactly `from → to` during `step → step+1`.
    ///
    /// Direction matters; a swap is detected by querying both directions.
    fn is_edge_reserved(&self, from: Position, to: Position, step: Step) -> bool;

    /// `true` if `pos` is reserved at any step strictly after `step`,
    /// including permanent reservations.
    fn is_reserved_after(&self, pos: Position, step: Step) -> bool;

    /// The last step whose slice differs from the ones after it.
    ///
    /// Every finite reservation lies at or before the horizon and every
    /// permanent one starts at or before it, so all slices after the horizon
    /// are identical.
    fn horizon(&self) -> Step;

    /// Rectangle covering every reserved cell, or `None` if nothing is
    /// reserved.
    fn extent(&self) -> Option<Region>;
}
