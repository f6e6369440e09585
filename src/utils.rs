use std::fmt;

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, PartialOrd, Ord)]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

#[macro_export]
macro_rules! pos {
    ($row:expr, $col:expr) => {
        $crate::Pos {
            row: $row,
            col: $col,
        }
    };
}

impl Pos {
    /// moves by a signed offset on a `rows` x `cols` torus.
    pub fn offset(self, d_row: isize, d_col: isize, (rows, cols): (usize, usize)) -> Self {
        pos!(wrap(self.row, d_row, rows), wrap(self.col, d_col, cols))
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// adds a signed delta to `n`, mapping the result back into `[0, len)`.
pub fn wrap(n: usize, delta: isize, len: usize) -> usize {
    debug_assert!(len > 0);
    let len = len as isize;
    // rem_euclid keeps negative intermediates in range
    ((n as isize) + delta).rem_euclid(len) as usize
}

#[test]
fn test_wrap() {
    assert_eq!(wrap(0, -1, 10), 9);
    assert_eq!(wrap(9, 1, 10), 0);
    assert_eq!(wrap(5, 1, 10), 6);
    assert_eq!(wrap(0, -1, 1), 0);
    assert_eq!(wrap(0, 1, 1), 0);
    assert_eq!(wrap(1, 1, 2), 0);
    assert_eq!(wrap(3, -14, 10), 9);
}

#[test]
fn test_offset() {
    let dims = (4, 6);
    assert_eq!(pos!(0, 0).offset(-1, -1, dims), pos!(3, 5));
    assert_eq!(pos!(3, 5).offset(1, 1, dims), pos!(0, 0));
    assert_eq!(pos!(2, 2).offset(0, 1, dims), pos!(2, 3));
}
