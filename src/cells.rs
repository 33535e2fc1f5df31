use crate::coordinates::Vector3;


/// The six ways out of a cell. The discriminant is the cell's wall bit position.
///
/// ```text
///        _______________
///       /|    Top      /|
///      / |            / |
///     /  |  (Back)   /  |
///    /______________/   |
///    |   |          |   |
///    |Left|  Front  |Right
///    |   |----------|---|
///    |  /           |  /
///    | /  (Bottom)  | /
///    |/_____________|/
/// ```
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub enum Direction {
    Top = 0,
    Bottom = 1,
    Left = 2,
    Right = 3,
    Back = 4,
    Front = 5,
}

impl Direction {
    pub const ALL: [Direction; 6] = [Direction::Top,
                                     Direction::Bottom,
                                     Direction::Left,
                                     Direction::Right,
                                     Direction::Back,
                                     Direction::Front];

    /// Directions that stay on the same floor, in the order the carver considers them.
    pub const HORIZONTAL: [Direction; 4] = [Direction::Left,
                                            Direction::Right,
                                            Direction::Back,
                                            Direction::Front];

    /// Directions that change floor.
    pub const VERTICAL: [Direction; 2] = [Direction::Top, Direction::Bottom];

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Top => Direction::Bottom,
            Direction::Bottom => Direction::Top,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Back => Direction::Front,
            Direction::Front => Direction::Back,
        }
    }

    /// Unit vector for one step in this direction.
    pub fn offset(self) -> Vector3 {
        match self {
            Direction::Top => Vector3::new(0, 0, 1),
            Direction::Bottom => Vector3::new(0, 0, -1),
            Direction::Left => Vector3::new(-1, 0, 0),
            Direction::Right => Vector3::new(1, 0, 0),
            Direction::Back => Vector3::new(0, -1, 0),
            Direction::Front => Vector3::new(0, 1, 0),
        }
    }

    #[inline]
    pub fn bit(self) -> u8 {
        1 << (self as u8)
    }

    #[inline]
    pub fn is_vertical(self) -> bool {
        match self {
            Direction::Top | Direction::Bottom => true,
            _ => false,
        }
    }
}

pub const ENTRANCE_BIT: u8 = 1 << 6;
pub const GOAL_BIT: u8 = 1 << 7;
const ALL_WALLS: u8 = 0b0011_1111;


/// Per grid point state.
///
/// Walls, entrance and goal share one byte laid out exactly as the save file cell byte.
/// `visited` and `solution` are working state for the carver and solver and are never saved.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Cell {
    flags: u8,
    visited: bool,
    solution: Option<Direction>,
}

impl Default for Cell {
    fn default() -> Cell {
        Cell::new()
    }
}

impl Cell {
    /// A cell walled in on all six sides.
    pub fn new() -> Cell {
        Cell {
            flags: ALL_WALLS,
            visited: false,
            solution: None,
        }
    }

    pub fn from_byte(byte: u8) -> Cell {
        Cell {
            flags: byte,
            visited: false,
            solution: None,
        }
    }

    #[inline]
    pub fn to_byte(&self) -> u8 {
        self.flags
    }

    #[inline]
    pub fn is_wall(&self, direction: Direction) -> bool {
        self.flags & direction.bit() != 0
    }

    /// Clears this cell's side only, the neighbour's matching wall is left alone.
    #[inline]
    pub fn remove_wall(&mut self, direction: Direction) {
        self.flags &= !direction.bit();
    }

    pub fn walls_count(&self) -> usize {
        (self.flags & ALL_WALLS).count_ones() as usize
    }

    pub fn set_as_entrance(&mut self) {
        self.flags |= ENTRANCE_BIT;
    }

    #[inline]
    pub fn is_entrance(&self) -> bool {
        self.flags & ENTRANCE_BIT != 0
    }

    pub fn set_as_goal(&mut self) {
        self.flags |= GOAL_BIT;
    }

    #[inline]
    pub fn is_goal(&self) -> bool {
        self.flags & GOAL_BIT != 0
    }

    #[inline]
    pub fn set_visited(&mut self, visited: bool) {
        self.visited = visited;
    }

    #[inline]
    pub fn is_visited(&self) -> bool {
        self.visited
    }

    /// Direction of the next step towards the goal found by the last solve, if this cell is on it.
    #[inline]
    pub fn solution(&self) -> Option<Direction> {
        self.solution
    }

    #[inline]
    pub fn set_solution(&mut self, direction: Option<Direction>) {
        self.solution = direction;
    }
}
