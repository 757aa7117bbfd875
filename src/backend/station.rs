use thiserror::Error;

use super::mathphysics::{Meter, Point2D};


pub type BaseStationId = usize;


#[derive(Debug, Error, PartialEq)]
pub enum CoverageError {
    #[error("Negative radius is forbidden")]
    NegativeRadius
}


/// Circular service area of a base station.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Coverage {
    center: Point2D,
    radius: Meter
}

impl Coverage {
    /// # Errors
    ///
    /// Will return `Err` if provided radius is a negative number.
    pub fn build(center: Point2D, radius: Meter) -> Result<Self, CoverageError> {
        if radius < 0.0 {
            return Err(CoverageError::NegativeRadius);
        }

        Ok(Self { center, radius })
    }

    #[must_use]
    pub fn center(&self) -> Point2D {
        self.center
    }

    #[must_use]
    pub fn radius(&self) -> Meter {
        self.radius
    }

    /// Lower-left and upper-right corners of the square enclosing the 
    /// coverage circle.
    #[must_use]
    pub fn bounds(&self) -> (Point2D, Point2D) {
        let offset = Point2D::splat(self.radius);

        (self.center - offset, self.center + offset)
    }
}


#[derive(Clone, Debug, PartialEq)]
pub struct BaseStation {
    id: BaseStationId,
    coverage: Coverage,
}

impl BaseStation {
    #[must_use]
    pub fn new(id: BaseStationId, coverage: Coverage) -> Self {
        Self { id, coverage }
    }

    #[must_use]
    pub fn id(&self) -> BaseStationId {
        self.id
    }

    #[must_use]
    pub fn coverage(&self) -> &Coverage {
        &self.coverage
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_radius_is_rejected() {
        assert_eq!(
            Err(CoverageError::NegativeRadius),
            Coverage::build(Point2D::default(), -1.0)
        );
    }

    #[test]
    fn zero_radius_is_a_point() {
        let center   = Point2D::new(3.0, 4.0);
        let coverage = Coverage::build(center, 0.0).unwrap();

        assert_eq!((center, center), coverage.bounds());
    }
    
    #[test]
    fn bounds_enclose_the_circle() {
        let coverage = Coverage::build(Point2D::new(10.0, 0.0), 2.0).unwrap();

        assert_eq!(
            (Point2D::new(8.0, -2.0), Point2D::new(12.0, 2.0)),
            coverage.bounds()
        );
    }
}
