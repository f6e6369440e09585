use crate::{Error, Grid, Pos, Result};

/// the eight compass offsets, as `(d_row, d_col)`.
const OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Live-neighbor counts for every cell of one generation.
///
/// Derived from a single [`Grid`] and only meaningful for that grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NeighborCounts {
    rows: usize,
    cols: usize,
    counts: Vec<u8>,
}

impl NeighborCounts {
    /// Counts the alive neighbors of each cell, wrapping around the edges.
    ///
    /// On grids narrower than three cells some offsets land on the same
    /// neighbor, which is then counted once per offset. An offset that wraps
    /// back onto the cell itself is skipped.
    pub fn count(grid: &Grid) -> Self {
        let (rows, cols) = grid.dimensions();
        let counts = grid
            .positions()
            .map(|pos| count_at(grid, pos))
            .collect();
        Self { rows, cols, counts }
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn get(&self, pos: Pos) -> Result<u8> {
        if pos.row < self.rows && pos.col < self.cols {
            Ok(self.counts[pos.row * self.cols + pos.col])
        } else {
            Err(Error::OutOfBounds {
                pos,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    /// row-major counts, aligned with the grid's cells.
    pub(crate) fn as_slice(&self) -> &[u8] {
        &self.counts
    }
}

/// the positions of the eight neighbors of `pos`, wrapped onto the torus.
pub fn neighbors(pos: Pos, dims: (usize, usize)) -> impl Iterator<Item = Pos> {
    OFFSETS
        .into_iter()
        .map(move |(d_row, d_col)| pos.offset(d_row, d_col, dims))
        .filter(move |&neighbor| neighbor != pos)
}

fn count_at(grid: &Grid, pos: Pos) -> u8 {
    neighbors(pos, grid.dimensions())
        .filter(|&neighbor| grid.cell(neighbor).is_alive())
        .count() as u8
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::pos;

    #[test]
    fn corner_wraps_to_opposite_edges() {
        let (rows, cols) = (5, 7);
        let mut found: Vec<Pos> = neighbors(pos!(0, 0), (rows, cols)).collect();
        found.sort();
        let mut expected = vec![
            pos!(rows - 1, cols - 1),
            pos!(rows - 1, 0),
            pos!(rows - 1, 1),
            pos!(0, cols - 1),
            pos!(0, 1),
            pos!(1, cols - 1),
            pos!(1, 0),
            pos!(1, 1),
        ];
        expected.sort();
        assert_eq!(found, expected);
    }

    #[test]
    fn far_corner_sees_origin() {
        // the last row and column have a real wrap partner
        let grid = Grid::with_alive(6, 6, [pos!(0, 0)]).unwrap();
        let counts = NeighborCounts::count(&grid);
        assert_eq!(counts.get(pos!(5, 5)), Ok(1));
        assert_eq!(counts.get(pos!(5, 0)), Ok(1));
        assert_eq!(counts.get(pos!(0, 5)), Ok(1));
        assert_eq!(counts.get(pos!(4, 4)), Ok(0));
        assert_eq!(counts.get(pos!(0, 0)), Ok(0));
    }

    #[test]
    fn counts_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(3);
        for (rows, cols) in [(1, 1), (1, 5), (5, 1), (2, 2), (2, 9), (10, 10)] {
            for probability in [0.0, 0.5, 1.0] {
                let grid = Grid::random(rows, cols, probability, &mut rng).unwrap();
                let counts = NeighborCounts::count(&grid);
                assert_eq!(counts.dimensions(), (rows, cols));
                assert!(counts.as_slice().iter().all(|&count| count <= 8));
            }
        }
    }

    #[test]
    fn full_grid_has_eight_neighbors_everywhere() {
        let grid = Grid::random(4, 4, 1.0, &mut StdRng::seed_from_u64(0)).unwrap();
        let counts = NeighborCounts::count(&grid);
        assert!(counts.as_slice().iter().all(|&count| count == 8));
    }

    #[test]
    fn single_cell_is_not_its_own_neighbor() {
        let grid = Grid::with_alive(1, 1, [pos!(0, 0)]).unwrap();
        let counts = NeighborCounts::count(&grid);
        assert_eq!(counts.get(pos!(0, 0)), Ok(0));
    }

    #[test]
    fn single_row_torus() {
        let grid = Grid::with_alive(1, 4, [pos!(0, 0)]).unwrap();
        let counts = NeighborCounts::count(&grid);
        // three offsets on each side reach the same cell
        assert_eq!(counts.get(pos!(0, 0)), Ok(0));
        assert_eq!(counts.get(pos!(0, 1)), Ok(3));
        assert_eq!(counts.get(pos!(0, 2)), Ok(0));
        assert_eq!(counts.get(pos!(0, 3)), Ok(3));
    }

    #[test]
    fn get_checks_bounds() {
        let counts = NeighborCounts::count(&Grid::dead(3, 3).unwrap());
        assert!(matches!(counts.get(pos!(3, 0)), Err(Error::OutOfBounds { .. })));
    }
}
