use rand::Rng;
use tracing::{debug, info};

use crate::cells::Direction;
use crate::coordinates::Vector3;
use crate::generators::DirectionSmallVec;
use crate::grid::Grid;
use crate::utils;


/// Find a route from `start` to `goal` through the open passages of the grid.
///
/// The same randomised depth first walk as the carver, except that it may only pass through
/// missing walls. Every step leaves the direction taken on the cell it stepped from; backing out
/// of a dead end erases the direction left on the abandoned cell. When the goal is reached
/// following the directions from `start` leads to it.
///
/// The route is *a* simple path, not necessarily the shortest one. In a perfect maze the two
/// are the same.
///
/// Any trail from a previous solve is cleared first. Returns false if either end is outside
/// the grid or the goal cannot be reached.
pub fn depth_first_solve(grid: &mut Grid, start: Vector3, goal: Vector3) -> bool {

    grid.clear_solution();

    if !grid.is_valid_coordinate(start) || !grid.is_valid_coordinate(goal) {
        debug!(%start, %goal, "solve endpoints outside the grid");
        return false;
    }

    if start == goal {
        grid.set_solved(true);
        return true;
    }

    let mut stack: Vec<Vector3> = Vec::new();
    let mut current = start;
    grid.set_visited(current);

    loop {
        let candidates = solver_unvisited_neighbours(grid, current);

        if candidates.is_empty() {
            if let Some(cell) = grid.cell_mut(current) {
                cell.set_solution(None);
            }
            match stack.pop() {
                Some(previous) => current = previous,
                None => break,
            }
            continue;
        }

        stack.push(current);
        let index = grid.rng().gen_range(0..candidates.len());
        let direction = candidates[index];
        if let Some(cell) = grid.cell_mut(current) {
            cell.set_solution(Some(direction));
        }

        current = current + direction.offset();
        grid.set_visited(current);

        if current == goal {
            grid.make_cells_unvisited();
            grid.set_solved(true);
            info!(%start, %goal, steps = stack.len(), "solved maze");
            return true;
        }
    }

    grid.make_cells_unvisited();
    grid.set_solved(false);
    info!(%start, %goal, "no route to goal");
    false
}

/// Unvisited neighbours of `coord` reachable through a missing wall.
fn solver_unvisited_neighbours(grid: &Grid, coord: Vector3) -> DirectionSmallVec {
    Direction::ALL
        .iter()
        .cloned()
        .filter(|&dir| {
            grid.is_open(coord, dir) &&
            grid.neighbour_at_direction(coord, dir)
                .map_or(false, |neighbour| !grid.is_visited(neighbour))
        })
        .collect()
}

/// Follow the solution directions from `start` until the goal.
/// Returns every coordinate on the way including both ends, or None if the trail stops short of
/// the goal, runs into a wall or comes back on itself.
pub fn solution_path(grid: &Grid, start: Vector3) -> Option<Vec<Vector3>> {

    let goal = grid.goal();
    grid.cell(start)?;

    let mut path = vec![start];
    let mut seen = utils::fnv_hashset(grid.size());
    seen.insert(start);

    let mut current = start;
    while current != goal {
        let direction = grid.cell(current)?.solution()?;
        if !grid.is_open(current, direction) {
            return None;
        }
        current = current + direction.offset();
        if !seen.insert(current) {
            return None;
        }
        path.push(current);
    }

    Some(path)
}


#[cfg(test)]
mod tests {

    use quickcheck::quickcheck;

    use super::*;
    use crate::grid::MazeOptionsBuilder;
    use crate::grid_dimensions::GridDimensions;
    use crate::units::{Floors, Height, Width};

    fn carved(w: u8, h: u8, f: u8, seed: u64) -> Grid {
        let dimensions = GridDimensions::new(Width(w), Height(h), Floors(f)).unwrap();
        let options = MazeOptionsBuilder::new().seed(Some(seed)).build();
        let mut g = Grid::with_options(dimensions, &options);
        assert!(g.carve(Vector3::origin()));
        g
    }

    // Straight 3x1x1 corridor: (0,0,0) - (1,0,0) - (2,0,0)
    fn corridor() -> Grid {
        let dimensions = GridDimensions::new(Width(3), Height(1), Floors(1)).unwrap();
        let mut g = Grid::new(dimensions);
        for x in 0..2 {
            g.cell_mut(Vector3::new(x, 0, 0)).unwrap().remove_wall(Direction::Right);
            g.cell_mut(Vector3::new(x + 1, 0, 0)).unwrap().remove_wall(Direction::Left);
        }
        g
    }

    #[test]
    fn solves_from_entrance() {
        let mut g = carved(5, 5, 5, 900);
        let goal = g.goal();
        assert!(g.solve(Vector3::origin(), goal));
        assert!(g.is_solved());
    }

    #[test]
    fn trail_leads_to_goal() {
        let mut g = carved(8, 6, 3, 77);
        let goal = g.goal();
        let start = Vector3::new(3, 2, 1);
        assert!(g.solve(start, goal));

        let path = g.solution_path(start).expect("trail should reach the goal");
        assert_eq!(path.first(), Some(&start));
        assert_eq!(path.last(), Some(&goal));
        for pair in path.windows(2) {
            let step = pair[1] - pair[0];
            assert_eq!(step.iter().map(i32::abs).sum::<i32>(), 1);
        }
    }

    #[test]
    fn visited_flags_clean_after_solving() {
        let mut g = carved(5, 5, 2, 3);
        let goal = g.goal();
        g.solve(Vector3::origin(), goal);
        assert!(g.iter_cells().all(|cell| !cell.is_visited()));
    }

    #[test]
    fn only_path_cells_keep_directions() {
        let mut g = corridor();
        assert!(g.solve(Vector3::new(0, 0, 0), Vector3::new(2, 0, 0)));
        assert_eq!(g.cell(Vector3::new(0, 0, 0)).unwrap().solution(), Some(Direction::Right));
        assert_eq!(g.cell(Vector3::new(1, 0, 0)).unwrap().solution(), Some(Direction::Right));
        assert_eq!(g.cell(Vector3::new(2, 0, 0)).unwrap().solution(), None);
    }

    #[test]
    fn dead_end_trail_is_erased() {
        // (0,0,0) - (1,0,0) - (2,0,0) with a spur (1,0,0) - (1,1,0) that leads nowhere.
        let dimensions = GridDimensions::new(Width(3), Height(2), Floors(1)).unwrap();
        let options = MazeOptionsBuilder::new().seed(Some(1)).build();
        let mut g = Grid::with_options(dimensions, &options);
        let mut open = |a: Vector3, dir: Direction| {
            g.cell_mut(a).unwrap().remove_wall(dir);
            g.cell_mut(a + dir.offset()).unwrap().remove_wall(dir.opposite());
        };
        open(Vector3::new(0, 0, 0), Direction::Right);
        open(Vector3::new(1, 0, 0), Direction::Right);
        open(Vector3::new(1, 0, 0), Direction::Front);

        assert!(!g.solve(Vector3::new(0, 0, 0), Vector3::new(2, 1, 0)));

        // Reachable goal: whichever way the walk went first, the spur holds no direction.
        for seed in 0..20 {
            let options = MazeOptionsBuilder::new().seed(Some(seed)).build();
            let mut h = Grid::with_options(dimensions, &options);
            for (a, dir) in &[(Vector3::new(0, 0, 0), Direction::Right),
                              (Vector3::new(1, 0, 0), Direction::Right),
                              (Vector3::new(1, 0, 0), Direction::Front)] {
                h.cell_mut(*a).unwrap().remove_wall(*dir);
                h.cell_mut(*a + dir.offset()).unwrap().remove_wall(dir.opposite());
            }
            assert!(h.solve(Vector3::new(0, 0, 0), Vector3::new(2, 0, 0)));
            assert_eq!(h.cell(Vector3::new(1, 1, 0)).unwrap().solution(), None);
            assert_eq!(h.cell(Vector3::new(1, 0, 0)).unwrap().solution(), Some(Direction::Right));
        }
    }

    #[test]
    fn unreachable_goal_fails_cleanly() {
        let dimensions = GridDimensions::new(Width(2), Height(2), Floors(2)).unwrap();
        let mut g = Grid::new(dimensions);
        let goal = g.goal();
        assert!(!g.solve(Vector3::origin(), goal));
        assert!(!g.is_solved());
        assert!(g.iter_cells().all(|cell| !cell.is_visited() && cell.solution().is_none()));
        assert_eq!(g.solution_path(Vector3::origin()), None);
    }

    #[test]
    fn endpoints_outside_grid_fail() {
        let mut g = carved(3, 3, 3, 1);
        assert!(!g.solve(Vector3::new(-1, 0, 0), Vector3::new(2, 2, 2)));
        assert!(!g.solve(Vector3::origin(), Vector3::new(3, 3, 3)));
    }

    #[test]
    fn start_at_goal_is_trivially_solved() {
        let mut g = carved(3, 3, 3, 1);
        let goal = g.goal();
        assert!(g.solve(goal, goal));
        assert_eq!(g.solution_path(goal), Some(vec![goal]));
    }

    #[test]
    fn resolving_replaces_old_trail() {
        let mut g = carved(6, 6, 2, 12);
        let goal = g.goal();
        assert!(g.solve(Vector3::origin(), goal));
        let from = Vector3::new(5, 0, 0);
        assert!(g.solve(from, goal));
        let path = g.solution_path(from).unwrap();
        let marked = g.iter_cells().filter(|cell| cell.solution().is_some()).count();
        assert_eq!(marked, path.len() - 1);
    }

    #[test]
    fn widest_flat_grid_solves_from_far_side() {
        let mut g = carved(255, 255, 1, 41);
        let goal = g.goal();
        let from = Vector3::new(17, 200, 0);
        assert!(g.solve(from, goal));
        let path = g.solution_path(from).expect("trail should reach the goal");
        let marked = g.iter_cells().filter(|cell| cell.solution().is_some()).count();
        assert_eq!(marked, path.len() - 1);
    }

    #[test]
    fn broken_trail_is_rejected() {
        let mut g = corridor();
        g.cell_mut(Vector3::new(0, 0, 0)).unwrap().set_solution(Some(Direction::Right));
        g.cell_mut(Vector3::new(1, 0, 0)).unwrap().set_solution(Some(Direction::Left));
        assert_eq!(g.solution_path(Vector3::new(0, 0, 0)), None);

        g.cell_mut(Vector3::new(1, 0, 0)).unwrap().set_solution(Some(Direction::Top));
        assert_eq!(g.solution_path(Vector3::new(0, 0, 0)), None);
    }

    #[test]
    fn quickcheck_solve_from_any_cell() {

        fn p(w: u8, h: u8, f: u8, seed: u64, pick: u32) -> bool {
            let (w, h, f) = (w % 6 + 1, h % 6 + 1, f % 3 + 1);
            let mut g = carved(w, h, f, seed);
            let start = g.dimensions()
                .coordinate_of(pick as usize % g.size())
                .unwrap();
            let goal = g.goal();
            g.solve(start, goal) &&
            g.iter_cells().all(|cell| !cell.is_visited()) &&
            g.solution_path(start).map_or(false, |path| path.last() == Some(&goal))
        }
        quickcheck(p as fn(u8, u8, u8, u64, u32) -> bool)
    }
}
