use std::fmt;

/// State of one position in the doubled-resolution buffer.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug)]
pub enum GridValue {
    Empty,
    Path,
    Wall,
}

impl GridValue {
    /// Anything but a wall can be walked through.
    #[inline]
    pub fn is_open(self) -> bool {
        self != GridValue::Wall
    }
}

/// Names the wall adjacent to a logical cell in one direction.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub enum Side {
    Top,
    Left,
    Bottom,
    Right,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Top, Side::Left, Side::Bottom, Side::Right];

    /// Neighbour visiting order used by `Grid::neighbours`.
    pub const CLOCKWISE: [Side; 4] = [Side::Top, Side::Right, Side::Bottom, Side::Left];

    /// (row, col) step taken when moving through this side.
    #[inline]
    pub fn offset(self) -> (isize, isize) {
        match self {
            Side::Top => (-1, 0),
            Side::Left => (0, -1),
            Side::Bottom => (1, 0),
            Side::Right => (0, 1),
        }
    }
}

/// A logical maze cell, `row` in `[0, height)` and `col` in `[0, width)`.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct CellCoordinate {
    pub row: usize,
    pub col: usize,
}

impl CellCoordinate {
    pub fn new(row: usize, col: usize) -> CellCoordinate {
        CellCoordinate { row, col }
    }

    /// The cell one step away through `side`, or None when that would leave the `usize` range.
    /// The result is not bounds checked against any grid.
    pub fn offset(self, side: Side) -> Option<CellCoordinate> {
        let (d_row, d_col) = side.offset();
        let row = offset_index(self.row, d_row)?;
        let col = offset_index(self.col, d_col)?;
        Some(CellCoordinate::new(row, col))
    }

    /// Where this cell's interior lives in the doubled-resolution buffer.
    #[inline]
    pub fn as_raw(self) -> RawCoordinate {
        RawCoordinate::new(raw_index(self.row), raw_index(self.col))
    }
}

impl fmt::Display for CellCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A position in the doubled-resolution buffer.
/// Odd/odd positions are cell interiors, every other position is a wall slot or border.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct RawCoordinate {
    pub y: usize,
    pub x: usize,
}

impl RawCoordinate {
    pub fn new(y: usize, x: usize) -> RawCoordinate {
        RawCoordinate { y, x }
    }

    pub fn offset(self, side: Side) -> Option<RawCoordinate> {
        let (d_y, d_x) = side.offset();
        let y = offset_index(self.y, d_y)?;
        let x = offset_index(self.x, d_x)?;
        Some(RawCoordinate::new(y, x))
    }

    #[inline]
    pub fn is_cell_interior(self) -> bool {
        self.y % 2 == 1 && self.x % 2 == 1
    }
}

/// Translate a logical row or column index to its raw buffer index.
#[inline(always)]
pub fn raw_index(logical: usize) -> usize {
    2 * logical + 1
}

#[inline]
fn offset_index(index: usize, delta: isize) -> Option<usize> {
    if delta < 0 {
        index.checked_sub(delta.unsigned_abs())
    } else {
        index.checked_add(delta as usize)
    }
}
