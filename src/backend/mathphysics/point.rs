use derive_more::{Add, Sub};

use super::Meter;


#[derive(Copy, Clone, PartialEq, Add, Sub, Debug, Default)]
pub struct Point2D { 
    pub x: Meter, 
    pub y: Meter, 
}

impl Point2D {
    #[must_use]
    pub fn new(x: Meter, y: Meter) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn splat(value: Meter) -> Self {
        Self { x: value, y: value }
    }
}

impl From<(Meter, Meter)> for Point2D {
    fn from(value: (Meter, Meter)) -> Self {
        Self { 
            x: value.0, 
            y: value.1, 
        } 
    }
}

impl From<Point2D> for (f64, f64) {
    fn from(point: Point2D) -> Self {
        (f64::from(point.x), f64::from(point.y))
    }
}
