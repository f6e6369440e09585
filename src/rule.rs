//! The B3/S23 transition.

use crate::{Cell, Error, Grid, NeighborCounts, Result};

/// The next state of a single cell with `count` alive neighbors.
pub fn apply(cell: Cell, count: u8) -> Cell {
    match (cell, count) {
        (Cell::Alive, 2 | 3) => Cell::Alive, // stay
        (Cell::Alive, _) => Cell::Dead,      // under or overpopulation
        (Cell::Dead, 3) => Cell::Alive,      // birth
        (Cell::Dead, _) => Cell::Dead,       // stays dead
    }
}

/// Builds the next generation from `grid` and its neighbor counts.
///
/// `grid` is left untouched; every cell of the result is computed from the
/// old grid and the complete counts.
pub fn next(grid: &Grid, counts: &NeighborCounts) -> Result<Grid> {
    if grid.dimensions() != counts.dimensions() {
        return Err(Error::DimensionMismatch {
            grid: grid.dimensions(),
            counts: counts.dimensions(),
        });
    }

    let cells = grid
        .cells()
        .iter()
        .zip(counts.as_slice())
        .map(|(&cell, &count)| apply(cell, count))
        .collect();
    Ok(Grid::from_cells(grid.rows(), grid.cols(), cells))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pos;

    #[test]
    fn rule_table() {
        for count in 0..=8 {
            let survives = count == 2 || count == 3;
            assert_eq!(apply(Cell::Alive, count).is_alive(), survives, "alive with {count}");
            assert_eq!(apply(Cell::Dead, count).is_alive(), count == 3, "dead with {count}");
        }
    }

    #[test]
    fn does_not_touch_input() {
        let grid = Grid::with_alive(5, 5, [pos!(2, 1), pos!(2, 2), pos!(2, 3)]).unwrap();
        let before = grid.clone();
        let counts = NeighborCounts::count(&grid);
        let after = next(&grid, &counts).unwrap();
        assert_eq!(grid, before);
        assert_ne!(after, before);
    }

    #[test]
    fn rejects_mismatched_counts() {
        let grid = Grid::dead(4, 4).unwrap();
        let counts = NeighborCounts::count(&Grid::dead(4, 5).unwrap());
        assert_eq!(
            next(&grid, &counts),
            Err(Error::DimensionMismatch {
                grid: (4, 4),
                counts: (4, 5)
            })
        );
    }

    #[test]
    fn crowded_cell_dies() {
        let grid = Grid::with_alive(
            5,
            5,
            [pos!(2, 2), pos!(1, 1), pos!(1, 2), pos!(1, 3), pos!(2, 1)],
        )
        .unwrap();
        let counts = NeighborCounts::count(&grid);
        assert_eq!(counts.get(pos!(2, 2)), Ok(4));
        let after = next(&grid, &counts).unwrap();
        assert_eq!(after.cell_at(pos!(2, 2)), Ok(Cell::Dead));
    }
}
