//! Property-based invariant tests for grid traversal.
//!
//! 1. Each coordinate is visited at most once
//! 2. Every parent entry links orthogonal neighbours, parent visited first
//! 3. BFS paths are shortest paths
//! 4. Reconstructed paths are simple, connected and open
//! 5. The goal is reached iff it is reachable
//! 6. Determinism: same input yields same output

use std::collections::{HashMap, HashSet};

use gridwalk_core::{Coord, Grid};
use gridwalk_paths::{PathOutcome, Searcher, Strategy as Search, distance_map, traverse};
use proptest::prelude::*;

// ── Strategies ──────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
struct Case {
    grid: Grid,
    start: Coord,
    goal: Coord,
}

fn case_strategy() -> impl Strategy<Value = Case> {
    (1i32..9, 1i32..9)
        .prop_flat_map(|(rows, cols)| {
            (
                prop::collection::vec(prop::bool::weighted(0.3), (rows * cols) as usize),
                (0..rows, 0..cols),
                (0..rows, 0..cols),
                Just(cols),
            )
        })
        .prop_map(|(flags, start, goal, cols)| {
            let rows: Vec<Vec<u8>> = flags
                .chunks(cols as usize)
                .map(|row| row.iter().map(|&b| u8::from(b)).collect())
                .collect();
            let start = Coord::from(start);
            let goal = Coord::from(goal);
            // The editor never lets a marker sit on a wall.
            let mut grid = Grid::from_rows(&rows).unwrap().to_rows();
            grid[start.r as usize][start.c as usize] = 0;
            grid[goal.r as usize][goal.c as usize] = 0;
            Case {
                grid: Grid::from_rows(&grid).unwrap(),
                start,
                goal,
            }
        })
}

fn search_strategy() -> impl Strategy<Value = Search> {
    prop_oneof![Just(Search::Bfs), Just(Search::Dfs)]
}

// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn visited_at_most_once(case in case_strategy(), s in search_strategy()) {
        let t = traverse(&case.grid, case.start, case.goal, s).unwrap();
        let unique: HashSet<_> = t.visited_order.iter().copied().collect();
        prop_assert_eq!(unique.len(), t.visited_order.len());
        prop_assert_eq!(t.visited_order[0], case.start);
    }

    #[test]
    fn parents_are_adjacent_and_visited_first(case in case_strategy(), s in search_strategy()) {
        let t = traverse(&case.grid, case.start, case.goal, s).unwrap();
        let pos: HashMap<Coord, usize> = t
            .visited_order
            .iter()
            .enumerate()
            .map(|(i, &p)| (p, i))
            .collect();
        prop_assert!(!t.parent.contains(case.start));
        for (child, parent) in t.parent.iter() {
            prop_assert!(child.is_adjacent(parent));
            prop_assert!(case.grid.is_open(child));
            let Some(&pi) = pos.get(&parent) else {
                return Err(TestCaseError::fail(format!("parent {parent} never visited")));
            };
            if let Some(&ci) = pos.get(&child) {
                prop_assert!(pi < ci);
            }
        }
    }

    #[test]
    fn bfs_paths_are_shortest(case in case_strategy()) {
        let t = traverse(&case.grid, case.start, case.goal, Search::Bfs).unwrap();
        let d = distance_map(&case.grid, case.start);
        match t.path() {
            PathOutcome::Found(path) => {
                prop_assert_eq!(path.edges() as i32, d.at(case.goal));
            }
            PathOutcome::Unreachable => prop_assert!(!d.reaches(case.goal)),
        }
    }

    #[test]
    fn paths_are_simple_and_open(case in case_strategy(), s in search_strategy()) {
        let t = traverse(&case.grid, case.start, case.goal, s).unwrap();
        if let PathOutcome::Found(path) = t.path() {
            let coords = path.coords();
            prop_assert_eq!(path.start(), case.start);
            prop_assert_eq!(path.goal(), case.goal);
            let unique: HashSet<_> = coords.iter().collect();
            prop_assert_eq!(unique.len(), coords.len());
            for w in coords.windows(2) {
                prop_assert!(w[0].is_adjacent(w[1]));
            }
            for &p in coords {
                prop_assert!(case.grid.is_open(p));
            }
        }
    }

    #[test]
    fn goal_reached_iff_reachable(case in case_strategy(), s in search_strategy()) {
        let t = traverse(&case.grid, case.start, case.goal, s).unwrap();
        let reachable = distance_map(&case.grid, case.start).reaches(case.goal);
        prop_assert_eq!(t.reached_goal, reachable);
        prop_assert_eq!(t.path().is_found(), reachable);
        if t.reached_goal {
            prop_assert_eq!(t.visited_order.last().copied(), Some(case.goal));
        } else {
            // Exhausted the start's component.
            let d = distance_map(&case.grid, case.start);
            prop_assert_eq!(t.visited_order.len(), d.reached());
        }
    }

    #[test]
    fn traversal_is_deterministic(case in case_strategy(), s in search_strategy()) {
        let mut searcher = Searcher::new();
        let a = searcher.traverse(&case.grid, case.start, case.goal, s).unwrap();
        let b = searcher.traverse(&case.grid, case.start, case.goal, s).unwrap();
        let c = traverse(&case.grid, case.start, case.goal, s).unwrap();
        prop_assert_eq!(&a, &b);
        prop_assert_eq!(&a, &c);
    }
}
