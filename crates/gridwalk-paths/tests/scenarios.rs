//! End-to-end traversal scenarios on hand-built grids.

use gridwalk_core::{Coord, Grid};
use gridwalk_paths::{PathOutcome, Strategy, manhattan, traverse};

#[test]
fn empty_5x5_corner_to_corner_bfs() {
    let g = Grid::open(5, 5);
    let (start, goal) = (Coord::new(0, 0), Coord::new(4, 4));
    let t = traverse(&g, start, goal, Strategy::Bfs).unwrap();

    // The goal is the only cell at distance 8, so every other cell is
    // dequeued first.
    assert_eq!(t.visited_order.len(), 25);
    assert_eq!(t.visited_order.last(), Some(&goal));

    let path = t.path();
    let path = path.path().expect("goal is reachable");
    assert_eq!(path.edges(), 8);
    assert_eq!(path.edges() as i32, manhattan(start, goal));
    // Down-first expansion commits to the left column, then the bottom row.
    assert_eq!(path.coords()[1], Coord::new(1, 0));
    assert_eq!(path.coords()[4], Coord::new(4, 0));
}

#[test]
fn wall_row_separates_regions() {
    let g: Grid = "\
.....
.....
#####
.....
.....
"
    .parse()
    .unwrap();
    for s in [Strategy::Bfs, Strategy::Dfs] {
        let t = traverse(&g, Coord::new(0, 2), Coord::new(4, 2), s).unwrap();
        assert!(!t.reached_goal);
        assert!(!t.parent.contains(Coord::new(4, 2)));
        assert_eq!(t.visited_order.len(), 10);
        assert_eq!(t.path(), PathOutcome::Unreachable);
    }
}

#[test]
fn enclosed_goal_is_unreachable() {
    let g: Grid = "\
.....
..#..
.#.#.
..#..
"
    .parse()
    .unwrap();
    let t = traverse(&g, Coord::new(0, 0), Coord::new(2, 2), Strategy::Bfs).unwrap();
    assert!(!t.parent.contains(Coord::new(2, 2)));
    assert_eq!(t.path(), PathOutcome::Unreachable);
    assert_eq!(t.visited_order.len(), g.open_count() - 1);
}

#[test]
fn bfs_takes_the_short_way_round() {
    let g: Grid = "\
.......
.#####.
.#...#.
.#.#.#.
...#...
"
    .parse()
    .unwrap();
    let (start, goal) = (Coord::new(4, 0), Coord::new(4, 6));
    let bfs = traverse(&g, start, goal, Strategy::Bfs).unwrap();
    let path = bfs.path();
    assert_eq!(path.path().unwrap().edges(), 10);

    let dfs = traverse(&g, start, goal, Strategy::Dfs).unwrap();
    let dfs_path = dfs.path();
    assert!(dfs_path.path().unwrap().edges() >= 10);
}

#[test]
fn reference_board_default_markers() {
    let g = Grid::open(25, 25);
    let (start, goal) = (Coord::new(12, 6), Coord::new(12, 18));
    let t = traverse(&g, start, goal, Strategy::Bfs).unwrap();
    assert_eq!(t.path().path().unwrap().edges(), 12);

    let t = traverse(&g, start, goal, Strategy::Dfs).unwrap();
    assert!(t.reached_goal);
}
