use std::fmt;

use petgraph::graph::{NodeIndex, UnGraph};
use rand::SeedableRng;
use rand_xorshift::XorShiftRng;

use crate::cells::{Cell, Direction};
use crate::coordinates::Vector3;
use crate::generators;
use crate::grid_dimensions::GridDimensions;
use crate::grid_iterators::{FloorRowsIter, GridCellIter};
use crate::pathing;
use crate::units::{FloorIndex, PassagesCount};

/// Default bias window: a 1 in 5 chance of also offering the floors above and below to the
/// carver while it still has a way forward on the current floor.
pub const DEFAULT_BIAS: u32 = 5;


/// Generation settings for a `Grid`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct MazeOptions {
    bias: u32,
    seed: Option<u64>,
}

impl Default for MazeOptions {
    fn default() -> MazeOptions {
        MazeOptions {
            bias: DEFAULT_BIAS,
            seed: None,
        }
    }
}

impl MazeOptions {
    #[inline]
    pub fn bias(&self) -> u32 {
        self.bias
    }

    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

#[derive(Debug, Default)]
pub struct MazeOptionsBuilder {
    options: MazeOptions,
}

impl MazeOptionsBuilder {
    pub fn new() -> MazeOptionsBuilder {
        MazeOptionsBuilder { options: MazeOptions::default() }
    }

    /// Size of the vertical shaft bias window, clamped to at least 1 (always offer up/down).
    pub fn bias(mut self, bias: u32) -> Self {
        self.options.bias = bias.max(1);
        self
    }

    /// Fixes the random number sequence used for carving and solving.
    pub fn seed(mut self, seed: Option<u64>) -> Self {
        self.options.seed = seed;
        self
    }

    pub fn build(self) -> MazeOptions {
        self.options
    }
}


/// A dense 3D block of cells. Owns all the cells and the random number generator used to
/// carve and solve them.
#[derive(Clone)]
pub struct Grid {
    dimensions: GridDimensions,
    cells: Vec<Cell>,
    rng: XorShiftRng,
    bias: u32,
    carved: bool,
    solved: bool,
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Grid :: dimensions: {:?}, bias: {:?}, carved: {:?}, solved: {:?}",
               self.dimensions, self.bias, self.carved, self.solved)
    }
}

impl Grid {
    /// An uncarved grid, every cell walled in, seeded from OS entropy.
    pub fn new(dimensions: GridDimensions) -> Grid {
        Grid::with_options(dimensions, &MazeOptions::default())
    }

    pub fn with_options(dimensions: GridDimensions, options: &MazeOptions) -> Grid {
        let seed = options.seed().unwrap_or_else(rand::random::<u64>);
        Grid {
            dimensions: dimensions,
            cells: vec![Cell::new(); dimensions.size().0],
            rng: XorShiftRng::seed_from_u64(seed),
            bias: options.bias().max(1),
            carved: false,
            solved: false,
        }
    }

    /// Rebuilds a carved grid from saved cell bytes, in `iter` order.
    pub(crate) fn from_cell_bytes(dimensions: GridDimensions, cell_bytes: &[u8]) -> Grid {
        let mut grid = Grid::new(dimensions);
        for (cell, byte) in grid.cells.iter_mut().zip(cell_bytes) {
            *cell = Cell::from_byte(*byte);
        }
        grid.carved = true;
        grid
    }

    /// Carve a perfect maze starting from `start`, which becomes the entrance.
    /// Returns false, leaving the grid untouched, if the grid is already carved or `start` is
    /// outside it.
    pub fn carve(&mut self, start: Vector3) -> bool {
        generators::recursive_backtracker(self, start)
    }

    /// Annotate the cells on a path from `start` to `goal` with the direction to take next.
    /// Returns true if the goal was reached.
    pub fn solve(&mut self, start: Vector3, goal: Vector3) -> bool {
        pathing::depth_first_solve(self, start, goal)
    }

    /// The coordinates visited following the solution annotations from `start` to the goal.
    pub fn solution_path(&self, start: Vector3) -> Option<Vec<Vector3>> {
        pathing::solution_path(self, start)
    }

    /// Remove every solution annotation.
    pub fn clear_solution(&mut self) {
        for cell in self.cells.iter_mut() {
            cell.set_solution(None);
        }
        self.solved = false;
    }

    #[inline]
    pub fn dimensions(&self) -> GridDimensions {
        self.dimensions
    }

    /// The largest valid coordinate on each axis, `dimensions - 1`.
    #[inline]
    pub fn max_coordinate(&self) -> Vector3 {
        self.dimensions.as_vector() - 1
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_carved(&self) -> bool {
        self.carved
    }

    #[inline]
    pub fn is_solved(&self) -> bool {
        self.solved
    }

    /// The goal is always the far corner of the grid.
    #[inline]
    pub fn goal(&self) -> Vector3 {
        self.max_coordinate()
    }

    pub fn entrance(&self) -> Option<Vector3> {
        self.cells
            .iter()
            .position(|cell| cell.is_entrance())
            .and_then(|index| self.dimensions.coordinate_of(index))
    }

    #[inline]
    pub fn cell(&self, coord: Vector3) -> Option<&Cell> {
        self.dimensions.index_of(coord).map(|index| &self.cells[index])
    }

    #[inline]
    pub(crate) fn cell_mut(&mut self, coord: Vector3) -> Option<&mut Cell> {
        match self.dimensions.index_of(coord) {
            Some(index) => Some(&mut self.cells[index]),
            None => None,
        }
    }

    #[inline]
    pub fn is_valid_coordinate(&self, coord: Vector3) -> bool {
        self.dimensions.contains(coord)
    }

    /// The adjacent coordinate in `direction` if it lies inside the grid.
    #[inline]
    pub fn neighbour_at_direction(&self, coord: Vector3, direction: Direction) -> Option<Vector3> {
        let neighbour = coord + direction.offset();
        if self.is_valid_coordinate(coord) && self.is_valid_coordinate(neighbour) {
            Some(neighbour)
        } else {
            None
        }
    }

    /// Is there a passage from `coord` to its neighbour in `direction`
    pub fn is_open(&self, coord: Vector3, direction: Direction) -> bool {
        self.neighbour_at_direction(coord, direction).is_some() &&
        self.cell(coord).map_or(false, |cell| !cell.is_wall(direction))
    }

    #[inline]
    pub fn iter(&self) -> GridCellIter {
        GridCellIter::new(self.dimensions)
    }

    #[inline]
    pub fn iter_floor_rows(&self, floor: FloorIndex) -> FloorRowsIter {
        FloorRowsIter::new(self.dimensions, floor)
    }

    pub fn iter_cells(&self) -> ::std::slice::Iter<Cell> {
        self.cells.iter()
    }

    /// Each open passage once, from its Left, Back or Bottom end.
    pub fn passages(&self) -> PassagesIter {
        PassagesIter {
            grid: self,
            coords: self.iter(),
            current: None,
            next_direction: 0,
        }
    }

    pub fn passages_count(&self) -> PassagesCount {
        PassagesCount(self.passages().count())
    }

    /// The open passages as an undirected graph. A cell's node index is its linear index
    /// (see `GridDimensions::index_of`).
    pub fn passage_graph(&self) -> UnGraph<(), ()> {
        let nodes = self.size();
        let mut graph = UnGraph::<(), ()>::with_capacity(nodes, nodes.saturating_sub(1));
        for _ in 0..nodes {
            let _ = graph.add_node(());
        }
        for (coord, direction) in self.passages() {
            let neighbour = coord + direction.offset();
            if let (Some(a), Some(b)) = (self.dimensions.index_of(coord),
                                         self.dimensions.index_of(neighbour)) {
                let _ = graph.add_edge(NodeIndex::new(a), NodeIndex::new(b), ());
            }
        }
        graph
    }

    // The carver and solver work through these.

    #[inline]
    pub(crate) fn rng(&mut self) -> &mut XorShiftRng {
        &mut self.rng
    }

    #[inline]
    pub(crate) fn bias(&self) -> u32 {
        self.bias
    }

    #[inline]
    pub(crate) fn is_visited(&self, coord: Vector3) -> bool {
        self.cell(coord).map_or(true, |cell| cell.is_visited())
    }

    #[inline]
    pub(crate) fn set_visited(&mut self, coord: Vector3) {
        if let Some(cell) = self.cell_mut(coord) {
            cell.set_visited(true);
        }
    }

    pub(crate) fn make_cells_unvisited(&mut self) {
        for cell in self.cells.iter_mut() {
            cell.set_visited(false);
        }
    }

    #[inline]
    pub(crate) fn set_carved(&mut self) {
        self.carved = true;
    }

    #[inline]
    pub(crate) fn set_solved(&mut self, solved: bool) {
        self.solved = solved;
    }
}

/// Iterator over the open passages of a grid as (coordinate, positive direction) pairs.
pub struct PassagesIter<'a> {
    grid: &'a Grid,
    coords: GridCellIter,
    current: Option<Vector3>,
    next_direction: usize,
}

// Only the directions pointing up the axes, so every passage is reported from one end.
const FORWARD_DIRECTIONS: [Direction; 3] = [Direction::Right, Direction::Front, Direction::Top];

impl<'a> Iterator for PassagesIter<'a> {
    type Item = (Vector3, Direction);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.current.is_none() || self.next_direction == FORWARD_DIRECTIONS.len() {
                self.current = Some(self.coords.next()?);
                self.next_direction = 0;
            }
            let coord = self.current?;
            let direction = FORWARD_DIRECTIONS[self.next_direction];
            self.next_direction += 1;
            if self.grid.is_open(coord, direction) {
                return Some((coord, direction));
            }
        }
    }
}

impl<'a> fmt::Debug for PassagesIter<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "PassagesIter :: coords: {:?}", self.coords)
    }
}
