pub mod player;
pub mod renderer;
pub mod viewer;


pub const WINDOW_TITLE: &str = "Network Slicing Simulation";
