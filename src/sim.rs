use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::{debug, trace};

use crate::{rule, Cell, Config, Grid, NeighborCounts, Pos, Result};

/// Owns the current generation and advances it one step at a time.
#[derive(Debug, Clone)]
pub struct Simulation {
    grid: Grid,
    generation: u64,
}

impl Simulation {
    /// Starts from a randomly populated grid.
    pub fn new<R>(rows: usize, cols: usize, alive_probability: f64, rng: &mut R) -> Result<Self>
    where
        R: Rng + ?Sized,
    {
        let grid = Grid::random(rows, cols, alive_probability, rng)?;
        Ok(Self::from_grid(grid))
    }

    /// Validates the grid part of `config` and populates a grid from its seed.
    ///
    /// The tick interval belongs to whoever drives `step` and is not checked.
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate_grid()?;
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::new(config.rows, config.cols, config.alive_probability, &mut rng)
    }

    pub fn from_grid(grid: Grid) -> Self {
        debug!(
            rows = grid.rows(),
            cols = grid.cols(),
            population = grid.population(),
            "simulation ready"
        );
        Self {
            grid,
            generation: 0,
        }
    }

    /// Advances by one generation.
    pub fn step(&mut self) {
        let counts = NeighborCounts::count(&self.grid);
        let next = match rule::next(&self.grid, &counts) {
            Ok(next) => next,
            // counts are derived from the same grid
            Err(error) => panic!("broken grid invariant: {error}"),
        };
        self.grid = next;
        self.generation += 1;
        trace!(
            generation = self.generation,
            population = self.grid.population(),
            "stepped"
        );
    }

    pub fn cell_state(&self, pos: Pos) -> Result<Cell> {
        self.grid.cell_at(pos)
    }

    pub fn dimensions(&self) -> (usize, usize) {
        self.grid.dimensions()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn population(&self) -> usize {
        self.grid.population()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }
}
