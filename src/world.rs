use std::{
    fmt,
    hash::{Hash, Hasher},
};

use metrohash::MetroHash64;
use rand::Rng;
use tracing::debug;

use crate::{pos, Error, Pos, Result};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Alive,
    #[default]
    Dead,
}

impl Cell {
    pub fn is_alive(self) -> bool {
        self == Cell::Alive
    }
}

impl From<bool> for Cell {
    fn from(alive: bool) -> Self {
        if alive {
            Cell::Alive
        } else {
            Cell::Dead
        }
    }
}

/// A fixed-size matrix of cells, stored row by row.
///
/// The dimensions are set when the grid is built and never change. A grid is
/// treated as a snapshot: the simulation replaces it rather than editing it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// an all-dead grid.
    pub fn dead(rows: usize, cols: usize) -> Result<Self> {
        check_dimensions(rows, cols)?;
        let cells = vec![Cell::Dead; rows * cols];
        Ok(Self { rows, cols, cells })
    }

    /// Populates every cell independently, alive with probability
    /// `alive_probability`.
    ///
    /// The probability is clamped to `[0, 1]`; a NaN probability is rejected.
    pub fn random<R>(
        rows: usize,
        cols: usize,
        alive_probability: f64,
        rng: &mut R,
    ) -> Result<Self>
    where
        R: Rng + ?Sized,
    {
        check_dimensions(rows, cols)?;
        if alive_probability.is_nan() {
            return Err(Error::InvalidConfiguration(
                "alive probability is not a number".into(),
            ));
        }
        let probability = alive_probability.clamp(0.0, 1.0);
        let cells = (0..rows * cols)
            .map(|_| Cell::from(rng.gen_bool(probability)))
            .collect();
        let grid = Self { rows, cols, cells };
        debug!(
            rows,
            cols,
            probability,
            population = grid.population(),
            "populated random grid"
        );
        Ok(grid)
    }

    /// a grid where exactly the listed positions are alive.
    pub fn with_alive(
        rows: usize,
        cols: usize,
        actives: impl IntoIterator<Item = Pos>,
    ) -> Result<Self> {
        let mut grid = Self::dead(rows, cols)?;
        for pos in actives {
            let index = grid.index(pos)?;
            grid.cells[index] = Cell::Alive;
        }
        Ok(grid)
    }

    /// builds a grid from row-major cells produced by the transition.
    pub(crate) fn from_cells(rows: usize, cols: usize, cells: Vec<Cell>) -> Self {
        debug_assert_eq!(cells.len(), rows * cols);
        Self { rows, cols, cells }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn cell_at(&self, pos: Pos) -> Result<Cell> {
        let index = self.index(pos)?;
        Ok(self.cells[index])
    }

    /// unchecked read for positions already known to be in range.
    pub(crate) fn cell(&self, pos: Pos) -> Cell {
        self.cells[pos.row * self.cols + pos.col]
    }

    pub(crate) fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// iterates over every position, row by row.
    pub fn positions(&self) -> impl Iterator<Item = Pos> {
        let cols = self.cols;
        (0..self.rows).flat_map(move |row| (0..cols).map(move |col| pos!(row, col)))
    }

    pub fn actives(&self) -> Vec<Pos> {
        self.positions()
            .filter(|&pos| self.cell(pos).is_alive())
            .collect()
    }

    pub fn population(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_alive()).count()
    }

    /// A 64 bit digest of the dimensions and contents, equal for equal grids.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = MetroHash64::default();
        self.hash(&mut hasher);
        hasher.finish()
    }

    fn index(&self, pos: Pos) -> Result<usize> {
        if pos.row < self.rows && pos.col < self.cols {
            Ok(pos.row * self.cols + pos.col)
        } else {
            Err(Error::OutOfBounds {
                pos,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.cols) {
            for cell in row {
                let char = if cell.is_alive() { '#' } else { '.' };
                write!(f, "{char}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Rejects empty grids and grids whose cell count cannot be allocated.
pub(crate) fn check_dimensions(rows: usize, cols: usize) -> Result<()> {
    if rows == 0 || cols == 0 {
        return Err(Error::InvalidConfiguration(format!(
            "grid dimensions must be positive, got {rows}x{cols}"
        )));
    }
    match rows.checked_mul(cols) {
        Some(len) if len <= isize::MAX as usize => Ok(()),
        _ => Err(Error::InvalidConfiguration(format!(
            "grid of {rows}x{cols} cells is too large"
        ))),
    }
}

pub use neighbors::NeighborCounts;
mod neighbors;

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    #[test]
    fn rejects_empty_dimensions() {
        let mut rng = StdRng::seed_from_u64(1);
        for (rows, cols) in [(0, 10), (10, 0), (0, 0)] {
            assert!(matches!(
                Grid::random(rows, cols, 0.2, &mut rng),
                Err(Error::InvalidConfiguration(_))
            ));
        }
        assert!(matches!(Grid::dead(0, 3), Err(Error::InvalidConfiguration(_))));
    }

    #[test]
    fn rejects_oversized_dimensions() {
        let mut rng = StdRng::seed_from_u64(1);
        for (rows, cols) in [(usize::MAX, 2), (usize::MAX / 2 + 1, 2), (2, usize::MAX)] {
            assert!(matches!(Grid::dead(rows, cols), Err(Error::InvalidConfiguration(_))));
            assert!(matches!(
                Grid::random(rows, cols, 0.2, &mut rng),
                Err(Error::InvalidConfiguration(_))
            ));
        }
        assert!(matches!(
            Grid::with_alive(usize::MAX, 3, Vec::new()),
            Err(Error::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn rejects_nan_probability() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            Grid::random(4, 4, f64::NAN, &mut rng),
            Err(Error::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn clamps_probability() {
        let mut rng = StdRng::seed_from_u64(7);
        let full = Grid::random(8, 8, 3.5, &mut rng).unwrap();
        assert_eq!(full.population(), 64);
        let empty = Grid::random(8, 8, -0.5, &mut rng).unwrap();
        assert_eq!(empty.population(), 0);
    }

    #[test]
    fn random_is_reproducible() {
        let a = Grid::random(20, 30, 0.2, &mut StdRng::seed_from_u64(42)).unwrap();
        let b = Grid::random(20, 30, 0.2, &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_eq!(a.dimensions(), (20, 30));
    }

    #[test]
    fn cell_at_checks_bounds() {
        let grid = Grid::with_alive(3, 5, [pos!(2, 4)]).unwrap();
        assert_eq!(grid.cell_at(pos!(2, 4)), Ok(Cell::Alive));
        assert_eq!(grid.cell_at(pos!(0, 0)), Ok(Cell::Dead));
        assert_eq!(
            grid.cell_at(pos!(3, 0)),
            Err(Error::OutOfBounds {
                pos: pos!(3, 0),
                rows: 3,
                cols: 5
            })
        );
        assert!(grid.cell_at(pos!(0, 5)).is_err());
    }

    #[test]
    fn with_alive_rejects_outside_positions() {
        assert!(matches!(
            Grid::with_alive(2, 2, [pos!(0, 2)]),
            Err(Error::OutOfBounds { .. })
        ));
    }

    #[test]
    fn actives_and_display() {
        let grid = Grid::with_alive(2, 3, [pos!(1, 2), pos!(0, 1)]).unwrap();
        assert_eq!(grid.actives(), vec![pos!(0, 1), pos!(1, 2)]);
        assert_eq!(grid.population(), 2);
        assert_eq!(grid.to_string(), ".#.\n..#\n");
    }

    #[test]
    fn fingerprint_tracks_contents_and_shape() {
        let a = Grid::with_alive(4, 4, [pos!(1, 1)]).unwrap();
        let b = Grid::with_alive(4, 4, [pos!(1, 2)]).unwrap();
        let c = Grid::dead(2, 8).unwrap();
        let d = Grid::dead(4, 4).unwrap();
        assert_ne!(a.fingerprint(), b.fingerprint());
        assert_ne!(c.fingerprint(), d.fingerprint());
    }
}
