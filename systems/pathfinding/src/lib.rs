#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Breadth-first shortest-path searches over the maze adjacency models.
//!
//! Every search allocates its own frontier and visited set and only reads the
//! maze, so searches for different pursuers never interfere with each other.
//! Neighbours are expanded in the adjacency model's fixed order, which makes
//! the returned path deterministic for identical inputs.

use std::collections::{HashSet, VecDeque};

use log::trace;
use maze_chase_core::{CellCoord, MazeQuery, MovementModel, Path, Route};

/// Finds a shortest path from `start` to `target` under `model`.
pub fn shortest_path<M>(
    maze: &M,
    model: MovementModel,
    start: CellCoord,
    target: CellCoord,
) -> Route
where
    M: MazeQuery + ?Sized,
{
    let route = match model {
        MovementModel::Walled => bfs_walled(maze, start, target),
        MovementModel::IgnoreWalls => bfs_ignore_walls(maze, start, target),
        MovementModel::DoubleStep => bfs_double_step(maze, start, target),
    };
    trace!(
        "{model:?} search {start} -> {target}: {}",
        route.path().map_or_else(
            || String::from("unreachable"),
            |path| format!("{} steps", path.steps())
        )
    );
    route
}

/// Shortest path using single orthogonal steps into open cells.
pub fn bfs_walled<M>(maze: &M, start: CellCoord, target: CellCoord) -> Route
where
    M: MazeQuery + ?Sized,
{
    search(start, target, Marking::OnEnqueue, |cell| maze.neighbors4(cell))
}

/// Shortest path using single orthogonal steps that pass through walls.
///
/// Cells are marked visited when dequeued, so a cell may be queued more than
/// once before it is first expanded. The first dequeue still wins, so the
/// result is a shortest path.
pub fn bfs_ignore_walls<M>(maze: &M, start: CellCoord, target: CellCoord) -> Route
where
    M: MazeQuery + ?Sized,
{
    search(start, target, Marking::OnDequeue, |cell| maze.all_neighbors4(cell))
}

/// Shortest path using leaps first and ordinary steps second.
///
/// Leaps and steps share one visited set, so a cell reachable both ways from
/// the same cell is recorded as a leap.
pub fn bfs_double_step<M>(maze: &M, start: CellCoord, target: CellCoord) -> Route
where
    M: MazeQuery + ?Sized,
{
    search(start, target, Marking::OnEnqueue, |cell| {
        maze.leap_neighbors(cell).chain(maze.neighbors4(cell))
    })
}

/// When a cell joins the visited set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Marking {
    OnEnqueue,
    OnDequeue,
}

/// Explored cell and the index of the node it was reached from.
#[derive(Clone, Copy, Debug)]
struct Node {
    cell: CellCoord,
    parent: Option<usize>,
}

fn search<F, I>(start: CellCoord, target: CellCoord, marking: Marking, mut expand: F) -> Route
where
    F: FnMut(CellCoord) -> I,
    I: IntoIterator<Item = CellCoord>,
{
    let mut nodes = vec![Node {
        cell: start,
        parent: None,
    }];
    let mut queue = VecDeque::from([0_usize]);
    let mut visited = HashSet::new();
    if marking == Marking::OnEnqueue {
        let _ = visited.insert(start);
    }

    while let Some(index) = queue.pop_front() {
        let cell = nodes[index].cell;
        if marking == Marking::OnDequeue && !visited.insert(cell) {
            continue;
        }

        if cell == target {
            return Path::from_cells(trace_back(&nodes, index))
                .map_or(Route::Unreachable, Route::Found);
        }

        for neighbor in expand(cell) {
            let fresh = match marking {
                Marking::OnEnqueue => visited.insert(neighbor),
                Marking::OnDequeue => !visited.contains(&neighbor),
            };
            if !fresh {
                continue;
            }

            nodes.push(Node {
                cell: neighbor,
                parent: Some(index),
            });
            queue.push_back(nodes.len() - 1);
        }
    }

    Route::Unreachable
}

fn trace_back(nodes: &[Node], mut index: usize) -> Vec<CellCoord> {
    let mut cells = Vec::new();
    loop {
        let node = nodes[index];
        cells.push(node.cell);
        match node.parent {
            Some(parent) => index = parent,
            None => break,
        }
    }
    cells.reverse();
    cells
}

#[cfg(test)]
mod tests {
    use maze_chase_core::Marker;

    use super::*;

    /// Open rectangle without walls or markers.
    struct OpenField {
        columns: u32,
        rows: u32,
    }

    impl MazeQuery for OpenField {
        fn columns(&self) -> u32 {
            self.columns
        }

        fn rows(&self) -> u32 {
            self.rows
        }

        fn is_open(&self, cell: CellCoord) -> bool {
            self.contains(cell)
        }

        fn marker(&self, _marker: Marker) -> Option<CellCoord> {
            None
        }
    }

    fn cells(route: &Route) -> Vec<(u32, u32)> {
        route
            .path()
            .expect("path")
            .cells()
            .iter()
            .map(|cell| (cell.column(), cell.row()))
            .collect()
    }

    #[test]
    fn walled_search_breaks_ties_up_right_down_left() {
        let field = OpenField {
            columns: 3,
            rows: 3,
        };
        let route = bfs_walled(&field, CellCoord::new(0, 0), CellCoord::new(2, 2));
        assert_eq!(cells(&route), vec![(0, 0), (1, 0), (2, 0), (2, 1), (2, 2)]);
    }

    #[test]
    fn double_step_prefers_leaps() {
        let field = OpenField {
            columns: 3,
            rows: 3,
        };
        let route = bfs_double_step(&field, CellCoord::new(0, 0), CellCoord::new(2, 2));
        assert_eq!(cells(&route), vec![(0, 0), (2, 0), (2, 2)]);

        let route = bfs_double_step(&field, CellCoord::new(0, 0), CellCoord::new(1, 1));
        assert_eq!(cells(&route), vec![(0, 0), (1, 1)]);
    }

    #[test]
    fn ignore_walls_route_is_manhattan_shortest() {
        let field = OpenField {
            columns: 4,
            rows: 4,
        };
        let start = CellCoord::new(3, 0);
        let target = CellCoord::new(0, 3);
        let route = bfs_ignore_walls(&field, start, target);
        let path = route.path().expect("path");
        assert_eq!(path.steps() as u32, start.manhattan_distance(target));
        assert_eq!(path.start(), start);
        assert_eq!(path.target(), target);
    }

    #[test]
    fn targets_outside_the_maze_are_unreachable() {
        let field = OpenField {
            columns: 2,
            rows: 2,
        };
        let outside = CellCoord::new(5, 5);
        for model in [
            MovementModel::Walled,
            MovementModel::IgnoreWalls,
            MovementModel::DoubleStep,
        ] {
            let route = shortest_path(&field, model, CellCoord::new(0, 0), outside);
            assert_eq!(route, Route::Unreachable);
        }
    }
}
