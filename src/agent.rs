use crate::cells::Direction;
use crate::coordinates::Vector3;
use crate::grid::Grid;


/// The player walking the maze: where it stands and how many steps it has taken.
/// The grid is not owned, it is only consulted on each move.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Agent {
    position: Vector3,
    moves: u32,
}

impl Default for Agent {
    fn default() -> Agent {
        Agent::new(Vector3::origin())
    }
}

impl Agent {
    pub fn new(position: Vector3) -> Agent {
        Agent::with_moves(position, 0)
    }

    pub fn with_moves(position: Vector3, moves: u32) -> Agent {
        Agent {
            position: position,
            moves: moves,
        }
    }

    #[inline]
    pub fn position(&self) -> Vector3 {
        self.position
    }

    #[inline]
    pub fn floor(&self) -> i32 {
        self.position.z
    }

    #[inline]
    pub fn moves(&self) -> u32 {
        self.moves
    }

    #[inline]
    pub fn is_at(&self, coord: Vector3) -> bool {
        self.position == coord
    }

    /// Take one step in `direction` unless a wall is in the way.
    /// Returns true if the agent moved.
    pub fn step(&mut self, grid: &Grid, direction: Direction) -> bool {
        let blocked = grid.cell(self.position).map_or(true, |cell| cell.is_wall(direction));
        if blocked {
            return false;
        }

        // Carving never opens the outer walls, but a hand edited save could.
        match grid.neighbour_at_direction(self.position, direction) {
            Some(next) => {
                self.position = next;
                self.moves += 1;
                true
            }
            None => false,
        }
    }

    /// Take one step the way the last solve marked the current cell.
    /// Returns false if the cell is not on the solver's trail.
    pub fn step_along_solution(&mut self, grid: &Grid) -> bool {
        match grid.cell(self.position).and_then(|cell| cell.solution()) {
            Some(direction) => self.step(grid, direction),
            None => false,
        }
    }
}
