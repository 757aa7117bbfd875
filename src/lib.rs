//! Map and statistics dashboards for network slicing simulations.
//!
//! The `backend` holds the data the dashboard reads: base stations with
//! their coverage, clients with their slice subscriptions and the
//! statistics series produced by a simulation run. The `frontend` renders
//! them with `plotters` into still images, animated GIFs or a caller
//! supplied viewer.

pub mod backend;
pub mod frontend;
