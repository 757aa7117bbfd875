pub mod client;
pub mod mathphysics;
pub mod station;
pub mod stats;
