use crate::coordinates::Vector3;
use crate::errors::*;
use crate::units::{CellsCount, Floors, Height, Width};


/// Width (x), height (y) and floors (z) of a grid. Every extent is 1 to 255 so that it fits the
/// single byte the save format gives it.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug)]
pub struct GridDimensions {
    width: Width,
    height: Height,
    floors: Floors,
}

impl GridDimensions {
    pub fn new(width: Width, height: Height, floors: Floors) -> Result<GridDimensions> {
        if width.0 == 0 || height.0 == 0 || floors.0 == 0 {
            bail!(ErrorKind::InvalidDimensions(width.0, height.0, floors.0));
        }
        Ok(GridDimensions {
            width: width,
            height: height,
            floors: floors,
        })
    }

    #[inline(always)]
    pub fn width(&self) -> Width {
        self.width
    }

    #[inline(always)]
    pub fn height(&self) -> Height {
        self.height
    }

    #[inline(always)]
    pub fn floors(&self) -> Floors {
        self.floors
    }

    #[inline(always)]
    pub fn size(&self) -> CellsCount {
        CellsCount(self.width.0 as usize * self.height.0 as usize * self.floors.0 as usize)
    }

    #[inline]
    pub fn as_vector(&self) -> Vector3 {
        Vector3::new(self.width.0 as i32, self.height.0 as i32, self.floors.0 as i32)
    }

    /// Is the coordinate within `[0,width) x [0,height) x [0,floors)`
    #[inline]
    pub fn contains(&self, coord: Vector3) -> bool {
        coord.x >= 0 && coord.y >= 0 && coord.z >= 0 &&
        coord.x < self.width.0 as i32 && coord.y < self.height.0 as i32 &&
        coord.z < self.floors.0 as i32
    }

    /// Floor-major, then row-major linear index of a coordinate, x varying fastest.
    /// Returns None if the coordinate is outside the grid.
    #[inline]
    pub fn index_of(&self, coord: Vector3) -> Option<usize> {
        if self.contains(coord) {
            let (w, h) = (self.width.0 as usize, self.height.0 as usize);
            Some((coord.z as usize * h + coord.y as usize) * w + coord.x as usize)
        } else {
            None
        }
    }

    /// Inverse of `index_of`. Returns None if the index is past the last cell.
    #[inline]
    pub fn coordinate_of(&self, index: usize) -> Option<Vector3> {
        if index < self.size().0 {
            let (w, h) = (self.width.0 as usize, self.height.0 as usize);
            let x = index % w;
            let y = (index / w) % h;
            let z = index / (w * h);
            Some(Vector3::new(x as i32, y as i32, z as i32))
        } else {
            None
        }
    }
}
