//! Simulation parameters.

use std::time::Duration;

use crate::{world::check_dimensions, Error, Result};

/// Parameters of one simulation.
///
/// # Example
///
/// ```
/// use torus_life::Config;
///
/// let config = Config::new(40, 60).set_alive_probability(0.3).set_seed(Some(7));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Number of rows.
    pub rows: usize,
    /// Number of columns.
    pub cols: usize,
    /// Chance of each cell starting alive, in `[0, 1]`.
    pub alive_probability: f64,
    /// Seed for the initial population. `None` draws one from the OS.
    pub seed: Option<u64>,
    /// Wall time between two generations, used by the terminal viewer.
    pub tick_interval: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            rows: 100,
            cols: 100,
            alive_probability: 0.2,
            seed: None,
            tick_interval: Duration::from_millis(200),
        }
    }
}

impl Config {
    pub fn new(rows: usize, cols: usize) -> Self {
        Config {
            rows,
            cols,
            ..Config::default()
        }
    }

    pub fn set_alive_probability(mut self, alive_probability: f64) -> Self {
        self.alive_probability = alive_probability;
        self
    }

    pub fn set_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn set_tick_interval(mut self, tick_interval: Duration) -> Self {
        self.tick_interval = tick_interval;
        self
    }

    /// Rejects grids the simulation cannot be built from. The tick interval
    /// is not looked at.
    pub fn validate_grid(&self) -> Result<()> {
        check_dimensions(self.rows, self.cols)?;
        if !(0.0..=1.0).contains(&self.alive_probability) {
            return Err(Error::InvalidConfiguration(format!(
                "alive probability must be within [0, 1], got {}",
                self.alive_probability
            )));
        }
        Ok(())
    }

    /// Rejects configurations a timed run cannot start from.
    pub fn validate(&self) -> Result<()> {
        self.validate_grid()?;
        if self.tick_interval.is_zero() {
            return Err(Error::InvalidConfiguration(
                "tick interval must be positive".into(),
            ));
        }
        Ok(())
    }
}
