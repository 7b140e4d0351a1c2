use crate::utils::LibData;

/// Point with 2-dimensional real coordinates.
///
/// Used for input objects, cluster centers and search-path entries.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Point2D<A: LibData> {
    pub x: A,
    pub y: A,
}

impl<A: LibData> Point2D<A> {
    pub fn new(x: A, y: A) -> Self {
        Self { x, y }
    }

    /// Maps unit-square coordinates onto a raster of `pixel_offset` cells
    /// per axis. The upper cell bound is rounded to two decimals, so points
    /// on a rounded boundary fall into the lower cell.
    pub fn to_point_pixel(&self, pixel_offset: usize) -> PointPixel {
        let mut x = 0;
        let mut y = 0;
        let cells = A::from_usize(pixel_offset).unwrap();
        let hundred = A::from_f64(100.0).unwrap();
        for t in 0..pixel_offset {
            let lower = A::from_usize(t).unwrap() / cells;
            let upper = ((lower + A::one() / cells) * hundred).round() / hundred;
            if self.x >= lower && self.x < upper {
                x = t;
            }
            if self.y >= lower && self.y < upper {
                y = t;
            }
        }
        PointPixel::new(x, y)
    }
}

/// Point with raster pixel coordinates.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PointPixel {
    pub x: usize,
    pub y: usize,
}

impl PointPixel {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}
