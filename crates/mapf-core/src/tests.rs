//! Unit tests for mapf-core primitives.

#[cfg(test)]
mod ids {
    use crate::AgentId;

    #[test]
    fn index_roundtrip() {
        let id = AgentId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(AgentId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn default_is_invalid() {
        assert_eq!(AgentId::default(), AgentId::INVALID);
        assert_eq!(AgentId::INVALID.0, u32::MAX);
    }

    #[test]
    fn display() {
        assert_eq!(AgentId(7).to_string(), "AgentId(7)");
    }
}

#[cfg(test)]
mod time {
    use crate::Step;

    #[test]
    fn step_arithmetic() {
        let s = Step(10);
        assert_eq!(s + 5, Step(15));
        assert_eq!(s.next(), Step(11));
        assert_eq!(Step(15) - Step(10), 5u64);
        assert_eq!(Step(15).since(Step(10)), 5);
    }

    #[test]
    fn display() {
        assert_eq!(Step(12).to_string(), "S12");
    }
}

#[cfg(test)]
mod grid {
    use crate::{heuristic, neighbors, Direction, Move, Position};

    #[test]
    fn neighbors_fixed_order() {
        let n: Vec<_> = neighbors(Position::new(2, 3)).collect();
        assert_eq!(
            n,
            vec![
                Position::new(2, 4), // N
                Position::new(2, 2), // S
                Position::new(3, 3), // E
                Position::new(1, 3), // W
            ]
        );
    }

    #[test]
    fn neighbors_cross_zero() {
        // No bounds at this level: negative coordinates are ordinary cells.
        let n: Vec<_> = neighbors(Position::new(0, 0)).collect();
        assert!(n.contains(&Position::new(-1, 0)));
        assert!(n.contains(&Position::new(0, -1)));
    }

    #[test]
    fn neighbors_stop_at_coordinate_range() {
        let corner = Position::new(i32::MAX, i32::MIN);
        let n: Vec<_> = neighbors(corner).collect();
        assert_eq!(n, vec![Position::new(i32::MAX, i32::MIN + 1), Position::new(i32::MAX - 1, i32::MIN)]);
        assert_eq!(corner.step(Direction::East), None);
        assert_eq!(corner.step(Direction::South), None);
    }

    #[test]
    fn heuristic_is_manhattan() {
        let a = Position::new(0, 0);
        assert_eq!(heuristic(a, a), 0);
        assert_eq!(heuristic(a, Position::new(5, 5)), 10);
        assert_eq!(heuristic(Position::new(-3, 2), Position::new(1, -1)), 7);
    }

    #[test]
    fn heuristic_consistent_across_moves() {
        // |h(p) - h(p')| <= 1 for every neighbor p' — consistency for unit costs.
        let goal = Position::new(4, -2);
        for x in -3..=3 {
            for y in -3..=3 {
                let p = Position::new(x, y);
                for q in neighbors(p) {
                    let (hp, hq) = (heuristic(p, goal), heuristic(q, goal));
                    assert!(hp.abs_diff(hq) <= 1);
                }
            }
        }
    }

    #[test]
    fn move_between() {
        let p = Position::new(1, 1);
        assert_eq!(Move::between(p, p), Some(Move::Wait));
        assert_eq!(Move::between(p, Position::new(1, 2)), Some(Move::Go(Direction::North)));
        assert_eq!(Move::between(p, Position::new(0, 1)), Some(Move::Go(Direction::West)));
        assert_eq!(Move::between(p, Position::new(2, 2)), None);
    }

    #[test]
    fn step_is_adjacent() {
        let p = Position::new(0, 0);
        for d in Direction::ALL {
            let q = p.step(d).unwrap();
            assert!(p.is_adjacent(q));
            assert_eq!(Move::between(p, q), Some(Move::Go(d)));
        }
    }
}

#[cfg(test)]
mod map {
    use crate::{BlockedCells, Bounds, Grid, MapfError, Position, Region};

    #[test]
    fn bounds_reject_empty() {
        assert_eq!(
            Bounds::new(0, 4),
            Err(MapfError::InvalidBounds { width: 0, height: 4 })
        );
        assert!(Bounds::new(3, 0).is_err());
    }

    #[test]
    fn bounds_contains() {
        let b = Bounds::new(3, 2).unwrap();
        assert!(b.contains(Position::new(0, 0)));
        assert!(b.contains(Position::new(2, 1)));
        assert!(!b.contains(Position::new(3, 1)));
        assert!(!b.contains(Position::new(0, 2)));
        assert!(!b.contains(Position::new(-1, 0)));
        assert_eq!(b.cell_count(), 6);
    }

    #[test]
    fn open_grid_is_unbounded() {
        let g = Grid::open();
        assert!(g.is_traversable(Position::new(-1_000, 1_000)));
        assert!(g.bounds().is_none());
    }

    #[test]
    fn blocked_cells_mask() {
        let blocked: BlockedCells = [Position::new(1, 1)].into_iter().collect();
        let g = Grid::bounded(Bounds::new(3, 3).unwrap()).with_obstacles(blocked);
        assert!(!g.is_traversable(Position::new(1, 1)));
        assert!(g.is_traversable(Position::new(0, 1)));
        assert!(!g.is_traversable(Position::new(5, 5)));
    }

    #[test]
    fn closure_obstacles() {
        // A vertical wall at x == 2.
        let g = Grid::open().with_obstacles(|p: Position| p.x == 2);
        assert!(g.is_blocked(Position::new(2, 7)));
        assert!(!g.is_blocked(Position::new(3, 7)));
        assert_eq!(g.obstacle_extent(), None);
    }

    #[test]
    fn blocked_cells_extent() {
        let blocked: BlockedCells = [Position::new(3, -1), Position::new(-2, 4)].into_iter().collect();
        let g = Grid::open().with_obstacles(blocked);
        assert_eq!(
            g.obstacle_extent(),
            Some(Region { min: Position::new(-2, -1), max: Position::new(3, 4) })
        );
        assert_eq!(Grid::open().with_obstacles(BlockedCells::new()).obstacle_extent(), None);
    }

    #[test]
    fn region_expand_saturates() {
        let r = Region::around(Position::new(i32::MAX - 1, 0)).expand(5);
        assert_eq!(r.min, Position::new(i32::MAX - 6, -5));
        assert_eq!(r.max, Position::new(i32::MAX, 5));
        assert!(r.contains(Position::new(i32::MAX, -5)));
        assert!(!r.contains(Position::new(0, 6)));
    }

    #[test]
    fn region_union_covers_both() {
        let a = Region::covering([Position::new(0, 0), Position::new(2, 1)]).unwrap();
        let b = Region::around(Position::new(-1, 5));
        let u = a.union(b);
        assert_eq!(u, Region { min: Position::new(-1, 0), max: Position::new(2, 5) });
        assert_eq!(Region::covering(std::iter::empty()), None);
    }
}

#[cfg(test)]
mod path {
    use crate::{CommittedPath, MapfError, Move, Position, SpaceTimeState, Step};

    fn p(x: i32, y: i32) -> Position {
        Position::new(x, y)
    }

    #[test]
    fn from_positions_builds_contiguous_steps() {
        let path = CommittedPath::from_positions(Step(3), &[p(0, 0), p(1, 0), p(1, 0), p(1, 1)]).unwrap();
        assert_eq!(path.start(), p(0, 0));
        assert_eq!(path.goal(), p(1, 1));
        assert_eq!(path.start_step(), Step(3));
        assert_eq!(path.end_step(), Step(6));
        assert_eq!(path.len(), 3);
        assert_eq!(path.wait_count(), 1);
        assert_eq!(path.position_at(Step(5)), Some(p(1, 0)));
        assert_eq!(path.position_at(Step(7)), None);
        assert_eq!(path.position_at(Step(2)), None);
    }

    #[test]
    fn edges_start_at_move_time() {
        let path = CommittedPath::from_positions(Step(0), &[p(0, 0), p(0, 1)]).unwrap();
        let edges: Vec<_> = path.edges().collect();
        assert_eq!(edges, vec![(p(0, 0), p(0, 1), Step(0))]);
        let moves: Vec<_> = path.moves().collect();
        assert_eq!(moves, vec![Move::Go(crate::Direction::North)]);
    }

    #[test]
    fn stationary_is_trivial() {
        let path = CommittedPath::stationary(p(4, 4), Step(9));
        assert!(path.is_trivial());
        assert_eq!(path.len(), 0);
        assert_eq!(path.start_step(), path.end_step());
        assert_eq!(path.edges().count(), 0);
    }

    #[test]
    fn rejects_empty() {
        assert_eq!(CommittedPath::new(vec![]), Err(MapfError::EmptyPath));
    }

    #[test]
    fn rejects_time_gap() {
        let states = vec![
            SpaceTimeState::new(p(0, 0), Step(0)),
            SpaceTimeState::new(p(0, 1), Step(2)),
        ];
        assert_eq!(CommittedPath::new(states), Err(MapfError::Discontinuous { index: 1 }));
    }

    #[test]
    fn rejects_diagonal() {
        let err = CommittedPath::from_positions(Step(0), &[p(0, 0), p(1, 1)]).unwrap_err();
        assert_eq!(err, MapfError::IllegalMove { from: p(0, 0), to: p(1, 1) });
    }
}
