use std::fmt;

use crate::coordinates::Vector3;
use crate::grid_dimensions::GridDimensions;
use crate::units::FloorIndex;


/// Every coordinate of a grid in save file order: floor by floor, row by row, x innermost.
#[derive(Copy, Clone)]
pub struct GridCellIter {
    dimensions: GridDimensions,
    current_cell_number: usize,
    cells_count: usize,
}

impl GridCellIter {
    pub fn new(dimensions: GridDimensions) -> GridCellIter {
        GridCellIter {
            dimensions: dimensions,
            current_cell_number: 0,
            cells_count: dimensions.size().0,
        }
    }
}

impl fmt::Debug for GridCellIter {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f,
               "GridCellIter :: current_cell_number: {:?}, cells_count: {:?}",
               self.current_cell_number,
               self.cells_count)
    }
}

impl ExactSizeIterator for GridCellIter {} // default impl using size_hint()
impl Iterator for GridCellIter {
    type Item = Vector3;
    fn next(&mut self) -> Option<Self::Item> {
        if self.current_cell_number < self.cells_count {
            let coord = self.dimensions.coordinate_of(self.current_cell_number);
            self.current_cell_number += 1;
            coord
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let lower_bound = self.cells_count - self.current_cell_number;
        let upper_bound = lower_bound;
        (lower_bound, Some(upper_bound))
    }
}

/// The rows of one floor, back (y = 0) to front, each row left to right.
#[derive(Debug, Copy, Clone)]
pub struct FloorRowsIter {
    floor: i32,
    row_length: i32,
    rows_count: i32,
    current_row: i32,
}

impl FloorRowsIter {
    pub fn new(dimensions: GridDimensions, floor: FloorIndex) -> FloorRowsIter {
        // A floor past the top of the grid has no rows.
        let rows_count = if floor.0 < dimensions.floors().0 {
            dimensions.height().0 as i32
        } else {
            0
        };
        FloorRowsIter {
            floor: floor.0 as i32,
            row_length: dimensions.width().0 as i32,
            rows_count: rows_count,
            current_row: 0,
        }
    }
}

impl ExactSizeIterator for FloorRowsIter {}
impl Iterator for FloorRowsIter {
    type Item = Vec<Vector3>;
    fn next(&mut self) -> Option<Self::Item> {
        if self.current_row < self.rows_count {
            let (y, z) = (self.current_row, self.floor);
            let row = (0..self.row_length).map(|x| Vector3::new(x, y, z)).collect();
            self.current_row += 1;
            Some(row)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.rows_count - self.current_row) as usize;
        (remaining, Some(remaining))
    }
}


#[cfg(test)]
mod tests {

    use super::*;
    use crate::units::{Floors, Height, Width};

    fn dims(w: u8, h: u8, f: u8) -> GridDimensions {
        GridDimensions::new(Width(w), Height(h), Floors(f)).unwrap()
    }

    #[test]
    fn cell_iter_order() {
        let coords = GridCellIter::new(dims(2, 2, 2)).collect::<Vec<Vector3>>();
        let v = |x, y, z| Vector3::new(x, y, z);
        assert_eq!(coords,
                   vec![v(0, 0, 0), v(1, 0, 0), v(0, 1, 0), v(1, 1, 0),
                        v(0, 0, 1), v(1, 0, 1), v(0, 1, 1), v(1, 1, 1)]);
    }

    #[test]
    fn cell_iter_exact_size() {
        let mut iter = GridCellIter::new(dims(3, 4, 5));
        assert_eq!(iter.len(), 60);
        let _ = iter.next();
        assert_eq!(iter.len(), 59);
    }

    #[test]
    fn floor_rows() {
        let rows = FloorRowsIter::new(dims(2, 3, 2), FloorIndex(1)).collect::<Vec<_>>();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2], vec![Vector3::new(0, 2, 1), Vector3::new(1, 2, 1)]);
    }

    #[test]
    fn floor_above_grid_is_empty() {
        let mut rows = FloorRowsIter::new(dims(2, 3, 2), FloorIndex(2));
        assert_eq!(rows.len(), 0);
        assert!(rows.next().is_none());
    }
}
