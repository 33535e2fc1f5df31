use rand::Rng;
use smallvec::SmallVec;
use tracing::{debug, info};

use crate::cells::Direction;
use crate::coordinates::Vector3;
use crate::grid::Grid;

pub(crate) type DirectionSmallVec = SmallVec<[Direction; 6]>;


/// Apply the recursive backtracker maze generation algorithm to the grid, carving out from
/// `start`.
///
/// A depth first random walk that only ever steps into unvisited cells, knocking down the wall
/// between the two cells on both sides as it goes. When the walk is boxed in it backs up along
/// its own trail until it finds a cell with an unvisited neighbour. The result is a spanning
/// tree over every cell: a perfect maze with long twisty corridors and few dead ends.
/// The trail is an explicit stack, so the size of the grid does not matter to the call stack.
///
/// The floors above and below are only offered as candidates when no neighbour on the same
/// floor is left, or on a 1 in `bias` roll. Mazes are therefore mostly flat per floor with the
/// occasional shaft.
///
/// `start` becomes the entrance and the far corner of the grid the goal.
/// Returns false without changing anything if the grid is already carved or `start` is not in
/// the grid.
pub fn recursive_backtracker(grid: &mut Grid, start: Vector3) -> bool {

    if grid.is_carved() || !grid.is_valid_coordinate(start) {
        debug!(%start, carved = grid.is_carved(), "refusing to carve");
        return false;
    }

    let goal = grid.goal();
    if let Some(cell) = grid.cell_mut(start) {
        cell.set_as_entrance();
    }
    if let Some(cell) = grid.cell_mut(goal) {
        cell.set_as_goal();
    }

    let mut stack: Vec<Vector3> = Vec::new();
    let mut passages = 0usize;
    let mut current = start;
    grid.set_visited(current);

    loop {
        let candidates = carver_unvisited_neighbours(grid, current);

        if candidates.is_empty() {
            // Dead end, back up. An empty trail means every cell has been reached.
            match stack.pop() {
                Some(previous) => current = previous,
                None => break,
            }
            continue;
        }

        stack.push(current);
        let index = grid.rng().gen_range(0..candidates.len());
        let direction = candidates[index];
        let next = current + direction.offset();

        if let Some(cell) = grid.cell_mut(current) {
            cell.remove_wall(direction);
        }
        if let Some(cell) = grid.cell_mut(next) {
            cell.remove_wall(direction.opposite());
        }
        passages += 1;

        current = next;
        grid.set_visited(current);
    }

    grid.make_cells_unvisited();
    grid.set_carved();

    info!(dimensions = ?grid.dimensions(),
          passages = passages,
          "carved maze");
    true
}

/// Unvisited cells next to `coord` that the carver may step into, walls are ignored.
/// Horizontal neighbours are always listed, in Left, Right, Back, Front order. Top and Bottom
/// follow only if no horizontal neighbour is left, or on a 1 in `bias` roll.
pub(crate) fn carver_unvisited_neighbours(grid: &mut Grid, coord: Vector3) -> DirectionSmallVec {

    let mut unvisited = Direction::HORIZONTAL
        .iter()
        .cloned()
        .filter(|&dir| is_unvisited_neighbour(grid, coord, dir))
        .collect::<DirectionSmallVec>();

    let bias = grid.bias();
    if unvisited.is_empty() || grid.rng().gen_range(0..bias) == 0 {
        unvisited.extend(Direction::VERTICAL
            .iter()
            .cloned()
            .filter(|&dir| is_unvisited_neighbour(grid, coord, dir)));
    }

    unvisited
}

#[inline]
fn is_unvisited_neighbour(grid: &Grid, coord: Vector3, direction: Direction) -> bool {
    grid.neighbour_at_direction(coord, direction)
        .map_or(false, |neighbour| !grid.is_visited(neighbour))
}
