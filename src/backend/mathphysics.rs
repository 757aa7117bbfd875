pub use point::Point2D;
pub use unit::*;


pub mod point;
pub mod unit;
