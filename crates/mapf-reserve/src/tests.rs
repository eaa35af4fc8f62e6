//! Unit tests for mapf-reserve.

#[cfg(test)]
mod helpers {
    use mapf_core::{CommittedPath, Position, Step};

    pub fn p(x: i32, y: i32) -> Position {
        Position::new(x, y)
    }

    /// Path along the given cells starting at `start`.
    pub fn path(start: u64, cells: &[(i32, i32)]) -> CommittedPath {
        let positions: Vec<Position> = cells.iter().map(|&c| c.into()).collect();
        CommittedPath::from_positions(Step(start), &positions).unwrap()
    }
}

// ── Occupancy ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod occupy {
    use mapf_core::{AgentId, Region, Step};

    use super::helpers::{p, path};
    use crate::{ReservationTable, ReservationView};

    #[test]
    fn empty_table() {
        let t = ReservationTable::new();
        assert!(t.is_empty());
        assert_eq!(t.horizon(), Step(0));
        assert_eq!(t.extent(), None);
        assert!(!t.is_occupied(p(0, 0), Step(0)));
    }

    #[test]
    fn extent_covers_paths_and_parked_cells() {
        let mut t = ReservationTable::new();
        t.occupy(AgentId(1), &path(0, &[(2, 3), (2, 4)]));
        t.park(AgentId(2), p(-5, 1), Step(9));
        assert_eq!(t.extent(), Some(Region { min: p(-5, 1), max: p(2, 4) }));
    }

    #[test]
    fn entries_by_owner() {
        let mut t = ReservationTable::new();
        t.occupy(AgentId(1), &path(0, &[(0, 0), (1, 0)]));
        t.park(AgentId(2), p(4, 4), Step(3));
        assert!(t.has_entries_for(AgentId(1)));
        assert!(t.has_entries_for(AgentId(2)));
        assert!(!t.has_entries_for(AgentId(3)));
    }

    #[test]
    fn vertices_and_edges_registered() {
        let mut t = ReservationTable::new();
        t.occupy(AgentId(1), &path(2, &[(0, 0), (1, 0), (1, 1)]));

        assert!(t.is_occupied(p(0, 0), Step(2)));
        assert!(t.is_occupied(p(1, 0), Step(3)));
        assert!(t.is_occupied(p(1, 1), Step(4)));
        // Same cells at other steps are free.
        assert!(!t.is_occupied(p(0, 0), Step(3)));
        assert!(!t.is_occupied(p(1, 1), Step(5)));

        assert!(t.is_edge_reserved(p(0, 0), p(1, 0), Step(2)));
        assert!(t.is_edge_reserved(p(1, 0), p(1, 1), Step(3)));
        // Exact direction only.
        assert!(!t.is_edge_reserved(p(1, 0), p(0, 0), Step(2)));
        // Exact step only.
        assert!(!t.is_edge_reserved(p(0, 0), p(1, 0), Step(3)));

        assert_eq!(t.vertex_count(), 3);
        assert_eq!(t.edge_count(), 2);
        assert_eq!(t.horizon(), Step(4));
        assert_eq!(t.occupant(p(1, 0), Step(3)), Some(AgentId(1)));
        assert_eq!(t.edge_owner(p(0, 0), p(1, 0), Step(2)), Some(AgentId(1)));
    }

    #[test]
    fn commit_is_idempotent() {
        let route = path(0, &[(0, 0), (0, 1), (0, 1), (1, 1)]);
        let mut once = ReservationTable::new();
        once.occupy(AgentId(0), &route);

        let mut twice = ReservationTable::new();
        twice.occupy(AgentId(0), &route);
        twice.occupy(AgentId(0), &route);

        assert_eq!(once.vertex_count(), twice.vertex_count());
        assert_eq!(once.edge_count(), twice.edge_count());
        assert_eq!(once.horizon(), twice.horizon());
        for s in route.states() {
            assert_eq!(once.occupant(s.position, s.step), twice.occupant(s.position, s.step));
        }
    }

    #[test]
    fn existing_owner_never_overwritten() {
        let mut t = ReservationTable::new();
        t.occupy(AgentId(0), &path(0, &[(3, 3)]));
        t.occupy(AgentId(9), &path(0, &[(3, 3)]));
        assert_eq!(t.occupant(p(3, 3), Step(0)), Some(AgentId(0)));
        assert_eq!(t.vertex_count(), 1);
    }

    #[test]
    fn hold_reserves_consecutive_steps() {
        let mut t = ReservationTable::new();
        t.hold(AgentId(2), p(5, 5), Step(10), 3);
        assert!(!t.is_occupied(p(5, 5), Step(9)));
        assert!(t.is_occupied(p(5, 5), Step(10)));
        assert!(t.is_occupied(p(5, 5), Step(12)));
        assert!(!t.is_occupied(p(5, 5), Step(13)));
        assert_eq!(t.horizon(), Step(12));
    }

    #[test]
    fn park_is_permanent_from_its_step() {
        let mut t = ReservationTable::new();
        t.park(AgentId(4), p(2, 2), Step(7));
        assert!(!t.is_occupied(p(2, 2), Step(6)));
        assert!(t.is_occupied(p(2, 2), Step(7)));
        assert!(t.is_occupied(p(2, 2), Step(1_000_000)));
        assert_eq!(t.parked_count(), 1);
        assert_eq!(t.horizon(), Step(7));
        assert!(!t.is_empty());
    }

    #[test]
    fn reserved_after() {
        let mut t = ReservationTable::new();
        t.occupy(AgentId(0), &path(0, &[(0, 0), (1, 0), (2, 0)]));
        assert!(t.is_reserved_after(p(2, 0), Step(1)));
        assert!(!t.is_reserved_after(p(2, 0), Step(2)));
        assert!(!t.is_reserved_after(p(9, 9), Step(0)));

        t.park(AgentId(1), p(9, 9), Step(50));
        assert!(t.is_reserved_after(p(9, 9), Step(0)));
        assert!(t.is_reserved_after(p(9, 9), Step(500)));
    }
}

// ── Commit with goal holds ────────────────────────────────────────────────────

#[cfg(test)]
mod commit {
    use mapf_core::{AgentId, Step};

    use super::helpers::{p, path};
    use crate::{GoalHold, ReservationTable, ReservationView};

    #[test]
    fn hold_steps_follow_arrival() {
        let mut t = ReservationTable::new();
        t.commit(AgentId(0), &path(0, &[(0, 0), (1, 0)]), GoalHold::Steps(2));
        assert!(t.is_occupied(p(1, 0), Step(1)));
        assert!(t.is_occupied(p(1, 0), Step(2)));
        assert!(t.is_occupied(p(1, 0), Step(3)));
        assert!(!t.is_occupied(p(1, 0), Step(4)));
    }

    #[test]
    fn no_hold_releases_goal() {
        let mut t = ReservationTable::new();
        t.commit(AgentId(0), &path(0, &[(0, 0), (1, 0)]), GoalHold::NONE);
        assert!(!t.is_occupied(p(1, 0), Step(2)));
        assert_eq!(GoalHold::default(), GoalHold::NONE);
    }

    #[test]
    fn forever_parks_goal() {
        let mut t = ReservationTable::new();
        t.commit(AgentId(0), &path(3, &[(0, 0), (0, 1)]), GoalHold::Forever);
        assert!(t.is_occupied(p(0, 1), Step(4)));
        assert!(t.is_occupied(p(0, 1), Step(400)));
        assert_eq!(t.occupant(p(0, 1), Step(400)), Some(AgentId(0)));
    }
}

// ── Conflict detection ────────────────────────────────────────────────────────

#[cfg(test)]
mod conflicts {
    use mapf_core::{AgentId, Step};

    use super::helpers::{p, path};
    use crate::{Conflict, GoalHold, ReservationTable};

    fn table_with(agent: u32, cells: &[(i32, i32)]) -> ReservationTable {
        let mut t = ReservationTable::new();
        t.occupy(AgentId(agent), &path(0, cells));
        t
    }

    #[test]
    fn vertex_conflict_detected() {
        let t = table_with(0, &[(0, 0), (1, 0), (2, 0)]);
        let candidate = path(0, &[(1, 1), (1, 0)]);
        assert_eq!(
            t.find_conflict(AgentId(1), &candidate, GoalHold::NONE),
            Some(Conflict::Vertex { position: p(1, 0), step: Step(1), other: AgentId(0) })
        );
    }

    #[test]
    fn swap_conflict_detected() {
        // Agent 0 moves (0,0)→(1,0) during 0→1; candidate moves (1,0)→(0,0).
        let t = table_with(0, &[(0, 0), (1, 0)]);
        let candidate = path(0, &[(1, 0), (0, 0)]);
        let conflict = t.find_conflict(AgentId(1), &candidate, GoalHold::NONE).unwrap();
        assert_eq!(
            conflict,
            Conflict::Swap { from: p(1, 0), to: p(0, 0), step: Step(0), other: AgentId(0) }
        );
        assert_eq!(conflict.other(), AgentId(0));
        assert_eq!(conflict.step(), Step(0));
    }

    #[test]
    fn following_is_not_a_conflict() {
        // Candidate trails one step behind agent 0 along the same row.
        let t = table_with(0, &[(1, 0), (2, 0), (3, 0)]);
        let candidate = path(0, &[(0, 0), (1, 0), (2, 0)]);
        assert_eq!(t.find_conflict(AgentId(1), &candidate, GoalHold::NONE), None);
    }

    #[test]
    fn own_reservations_ignored() {
        let mut t = ReservationTable::new();
        t.commit(AgentId(0), &path(0, &[(0, 0), (1, 0)]), GoalHold::Steps(1));
        // Next task of the same agent starts on its own held goal.
        let next = path(2, &[(1, 0), (2, 0)]);
        assert_eq!(t.find_conflict(AgentId(0), &next, GoalHold::Steps(1)), None);
        // Another agent at the same cell and step is a conflict.
        let intruder = path(2, &[(1, 0), (1, 1)]);
        assert!(t.find_conflict(AgentId(1), &intruder, GoalHold::NONE).is_some());
    }

    #[test]
    fn goal_hold_checked() {
        // Agent 0 reaches (5,5) at step 10.
        let t = table_with(0, &[
            (0, 0), (1, 0), (2, 0), (3, 0), (4, 0), (5, 0),
            (5, 1), (5, 2), (5, 3), (5, 4), (5, 5),
        ]);
        // Candidate reaches (5,5) at step 9: free on arrival, but holding it
        // through step 10 clashes with agent 0's arrival.
        let early = path(0, &[
            (0, 5), (1, 5), (2, 5), (3, 5), (4, 5), (4, 6), (4, 7), (4, 6), (5, 6), (5, 5),
        ]);
        assert_eq!(early.end_step(), Step(9));
        assert_eq!(t.find_conflict(AgentId(1), &early, GoalHold::NONE), None);
        assert_eq!(
            t.find_conflict(AgentId(1), &early, GoalHold::Steps(1)),
            Some(Conflict::Vertex { position: p(5, 5), step: Step(10), other: AgentId(0) })
        );
    }

    #[test]
    fn forever_hold_sees_later_traffic() {
        // Agent 0 crosses (2,2) at step 6.
        let mut t = ReservationTable::new();
        t.occupy(AgentId(0), &path(4, &[(0, 2), (1, 2), (2, 2), (3, 2)]));
        let candidate = path(0, &[(2, 0), (2, 1), (2, 2)]);
        assert_eq!(t.find_conflict(AgentId(1), &candidate, GoalHold::Steps(1)), None);
        assert_eq!(
            t.find_conflict(AgentId(1), &candidate, GoalHold::Forever),
            Some(Conflict::Vertex { position: p(2, 2), step: Step(6), other: AgentId(0) })
        );
    }

    #[test]
    fn parked_cells_conflict() {
        let mut t = ReservationTable::new();
        t.park(AgentId(7), p(1, 1), Step(0));
        let candidate = path(20, &[(0, 1), (1, 1)]);
        assert_eq!(
            t.find_conflict(AgentId(1), &candidate, GoalHold::NONE).map(|c| c.other()),
            Some(AgentId(7))
        );
    }

    #[test]
    fn display_names_other_agent() {
        let c = Conflict::Vertex { position: p(1, 2), step: Step(3), other: AgentId(4) };
        assert_eq!(c.to_string(), "vertex conflict with AgentId(4) at (1, 2)@S3");
    }
}

#[cfg(test)]
mod agent_view {
    use mapf_core::{AgentId, Step};

    use super::helpers::{p, path};
    use crate::{GoalHold, ReservationTable, ReservationView};

    #[test]
    fn own_entries_are_transparent() {
        let mut t = ReservationTable::new();
        t.commit(AgentId(0), &path(0, &[(0, 0), (1, 0)]), GoalHold::Steps(3));

        let own = t.view_for(AgentId(0));
        assert!(!own.is_occupied(p(1, 0), Step(3)));
        assert!(!own.is_edge_reserved(p(0, 0), p(1, 0), Step(0)));

        let other = t.view_for(AgentId(1));
        assert!(other.is_occupied(p(1, 0), Step(3)));
        assert!(other.is_edge_reserved(p(0, 0), p(1, 0), Step(0)));
        assert_eq!(other.agent(), AgentId(1));
    }

    #[test]
    fn horizon_and_reserved_after_match_table() {
        let mut t = ReservationTable::new();
        t.commit(AgentId(0), &path(0, &[(0, 0), (1, 0)]), GoalHold::Steps(2));
        let own = t.view_for(AgentId(0));
        assert_eq!(own.horizon(), t.horizon());
        assert_eq!(own.extent(), t.extent());
        assert_eq!(own.is_reserved_after(p(1, 0), Step(1)), t.is_reserved_after(p(1, 0), Step(1)));
    }
}
