use std::convert::From;
use std::fmt;
use std::ops::{Add, Div, Index, Mul, Sub};


/// Integer position or offset in the 3D maze: `x` is the column, `y` the row and `z` the floor.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd, Default)]
pub struct Vector3 {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Vector3 {
    pub fn new(x: i32, y: i32, z: i32) -> Vector3 {
        Vector3 { x: x, y: y, z: z }
    }

    #[inline]
    pub fn origin() -> Vector3 {
        Vector3::new(0, 0, 0)
    }

    /// The components in x, y, z order.
    pub fn iter(&self) -> ::std::array::IntoIter<i32, 3> {
        IntoIterator::into_iter([self.x, self.y, self.z])
    }
}

impl From<(i32, i32, i32)> for Vector3 {
    fn from(xyz: (i32, i32, i32)) -> Vector3 {
        Vector3::new(xyz.0, xyz.1, xyz.2)
    }
}

impl fmt::Display for Vector3 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

impl Index<usize> for Vector3 {
    type Output = i32;

    fn index(&self, component: usize) -> &i32 {
        match component {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("Vector3 component index out of range: {}", component),
        }
    }
}

impl IntoIterator for Vector3 {
    type Item = i32;
    type IntoIter = ::std::array::IntoIter<i32, 3>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// Component-wise arithmetic against another vector, or against a scalar broadcast to all
// three components.
macro_rules! componentwise_op {
    ($op_trait:ident, $op_fn:ident, $op:tt) => {
        impl $op_trait for Vector3 {
            type Output = Vector3;

            #[inline]
            fn $op_fn(self, rhs: Vector3) -> Vector3 {
                Vector3::new(self.x $op rhs.x, self.y $op rhs.y, self.z $op rhs.z)
            }
        }

        impl $op_trait<i32> for Vector3 {
            type Output = Vector3;

            #[inline]
            fn $op_fn(self, rhs: i32) -> Vector3 {
                Vector3::new(self.x $op rhs, self.y $op rhs, self.z $op rhs)
            }
        }
    }
}

componentwise_op!(Add, add, +);
componentwise_op!(Sub, sub, -);
componentwise_op!(Mul, mul, *);
componentwise_op!(Div, div, /);
