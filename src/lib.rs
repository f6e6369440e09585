//! Conway's game of life (B3/S23) on a fixed-size torus.
//!
//! The opposite edges of the grid touch, so every cell has eight neighbors.
//!
//! # Example
//!
//! ```
//! use torus_life::{pos, Cell, Grid, Simulation};
//!
//! let blinker = Grid::with_alive(5, 5, [pos!(2, 1), pos!(2, 2), pos!(2, 3)]).unwrap();
//! let mut sim = Simulation::from_grid(blinker);
//! sim.step();
//! assert_eq!(sim.cell_state(pos!(1, 2)), Ok(Cell::Alive));
//! assert_eq!(sim.cell_state(pos!(2, 1)), Ok(Cell::Dead));
//! ```

pub use utils::Pos;
mod utils;

pub use error::{Error, Result};
mod error;

pub use world::{Cell, Grid, NeighborCounts};
pub mod world;

pub mod rule;

pub use config::Config;
mod config;

pub use sim::Simulation;
mod sim;
