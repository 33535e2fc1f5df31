use std::fmt;

use itertools::Itertools;

use crate::agent::Agent;
use crate::cells::Direction;
use crate::coordinates::Vector3;
use crate::grid::Grid;
use crate::units::FloorIndex;


pub trait GridDisplay {
    /// Render the contents of a grid cell as text.
    /// The String should be 3 glyphs long, padded if required.
    /// By default shows the ways up and down: `/` up, `\` down, `X` both.
    fn render_cell_body(&self, grid: &Grid, coord: Vector3) -> String {
        let up = grid.is_open(coord, Direction::Top);
        let down = grid.is_open(coord, Direction::Bottom);
        match (up, down) {
            (true, true) => String::from(" X "),
            (true, false) => String::from(" / "),
            (false, true) => String::from(" \\ "),
            (false, false) => String::from("   "),
        }
    }
}

/// Plain walls and shafts.
#[derive(Debug, Copy, Clone)]
pub struct PlainDisplay;
impl GridDisplay for PlainDisplay {}

/// Marks the player `@`, the entrance `S` and the goal `E`.
#[derive(Debug, Copy, Clone)]
pub struct AgentDisplay {
    position: Vector3,
}
impl AgentDisplay {
    pub fn new(agent: &Agent) -> AgentDisplay {
        AgentDisplay { position: agent.position() }
    }
}
impl GridDisplay for AgentDisplay {
    fn render_cell_body(&self, grid: &Grid, coord: Vector3) -> String {
        let cell = grid.cell(coord);
        if coord == self.position {
            String::from(" @ ")
        } else if cell.map_or(false, |c| c.is_goal()) {
            String::from(" E ")
        } else if cell.map_or(false, |c| c.is_entrance()) {
            String::from(" S ")
        } else {
            PlainDisplay.render_cell_body(grid, coord)
        }
    }
}

/// Shows the direction the last solve marked on each cell of its trail.
#[derive(Debug, Copy, Clone)]
pub struct SolutionDisplay;
impl GridDisplay for SolutionDisplay {
    fn render_cell_body(&self, grid: &Grid, coord: Vector3) -> String {
        let cell = grid.cell(coord);
        match cell.and_then(|c| c.solution()) {
            Some(Direction::Left) => String::from(" < "),
            Some(Direction::Right) => String::from(" > "),
            Some(Direction::Back) => String::from(" ^ "),
            Some(Direction::Front) => String::from(" v "),
            Some(Direction::Top) => String::from(" U "),
            Some(Direction::Bottom) => String::from(" D "),
            None if cell.map_or(false, |c| c.is_goal()) => String::from(" E "),
            None => PlainDisplay.render_cell_body(grid, coord),
        }
    }
}

/// A grid paired with the way its cell bodies should be drawn.
pub struct GridView<'a> {
    grid: &'a Grid,
    display: &'a dyn GridDisplay,
}

impl<'a> fmt::Debug for GridView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "GridView :: grid: {:?}", self.grid)
    }
}

impl Grid {
    /// Text rendering of the grid using `display` for the cell bodies.
    pub fn view<'a>(&'a self, display: &'a dyn GridDisplay) -> GridView<'a> {
        GridView {
            grid: self,
            display: display,
        }
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.view(&PlainDisplay))
    }
}

impl<'a> fmt::Display for GridView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let floors = (0..self.grid.dimensions().floors().0)
            .map(|floor| format!("Floor {}\n{}", floor + 1, render_floor(self.grid, self.display, FloorIndex(floor))))
            .join("\n");
        write!(f, "{}", floors)
    }
}

/// Box drawing glyph whose arms reach out to the given sides of a character cell.
fn junction(left: bool, right: bool, up: bool, down: bool) -> &'static str {
    match (left, right, up, down) {
        (true, true, true, true) => "┼",
        (true, true, true, false) => "┴",
        (true, true, false, true) => "┬",
        (true, false, true, true) => "┤",
        (false, true, true, true) => "├",
        (true, true, false, false) => "─",
        (false, false, true, true) => "│",
        (false, true, true, false) => "└",
        (true, false, false, true) => "┐",
        (true, false, true, false) => "┘",
        (false, true, false, true) => "┌",
        (true, false, false, false) => "╴",
        (false, true, false, false) => "╶",
        (false, false, true, false) => "╵",
        (false, false, false, true) => "╷",
        (false, false, false, false) => " ",
    }
}

/// The corner below and to the right of `coord`. Each arm is drawn when the wall it runs along
/// is standing.
fn south_east_corner(grid: &Grid, coord: Vector3, last_row: bool, last_column: bool) -> &'static str {
    let east_wall = !grid.is_open(coord, Direction::Right);
    let south_wall = !grid.is_open(coord, Direction::Front);

    // Walls of the diagonal neighbour meeting at this corner, boundary counts as wall.
    let wall_beyond = |step: Direction, side: Direction| {
        grid.neighbour_at_direction(coord, step)
            .map_or(true, |next| !grid.is_open(next, side))
    };
    let right_arm = !last_column && wall_beyond(Direction::Right, Direction::Front);
    let down_arm = !last_row && wall_beyond(Direction::Front, Direction::Right);

    junction(south_wall, right_arm, east_wall, down_arm)
}

// One floor, back row at the top. Right is drawn east and Front south.
fn render_floor(grid: &Grid, display: &dyn GridDisplay, floor: FloorIndex) -> String {
    const SPAN: &str = "───";

    let columns_count = grid.dimensions().width().0 as usize;
    let rows_count = grid.dimensions().height().0 as usize;

    let mut output = String::from(junction(false, true, false, true));
    if let Some(back_row) = grid.iter_floor_rows(floor).next() {
        for (index, coord) in back_row.iter().enumerate() {
            let last_column = index == columns_count - 1;
            let east_wall = !grid.is_open(*coord, Direction::Right);
            output.push_str(SPAN);
            output.push_str(junction(true, !last_column, false, east_wall));
        }
    }
    output.push('\n');

    for (index_row, row) in grid.iter_floor_rows(floor).enumerate() {

        let last_row = index_row == rows_count - 1;
        let first_south_wall = row.first()
            .map_or(true, |&coord| !grid.is_open(coord, Direction::Front));

        let mut bodies = String::from(junction(false, false, true, true));
        let mut walls = String::from(junction(false, first_south_wall, true, !last_row));

        for (index_column, coord) in row.into_iter().enumerate() {
            let last_column = index_column == columns_count - 1;

            bodies.push_str(&display.render_cell_body(grid, coord));
            bodies.push_str(if grid.is_open(coord, Direction::Right) { " " } else { "│" });

            walls.push_str(if grid.is_open(coord, Direction::Front) { "   " } else { SPAN });
            walls.push_str(south_east_corner(grid, coord, last_row, last_column));
        }

        output.push_str(&bodies);
        output.push('\n');
        output.push_str(&walls);
        output.push('\n');
    }

    output
}
