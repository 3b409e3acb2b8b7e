//! Error types shared by the grid model, the generators and the solver.
//!
//! Precondition violations (bad coordinates, non-adjacent cells) abort the
//! operation that hit them; callers can tell them apart through `ErrorKind`.

// Create the Error, ErrorKind, ResultExt, and Result types
use error_chain::*;

use crate::cells::{CellCoordinate, Side};

error_chain! {

    errors {
        InvalidDimensions(width: usize, height: usize) {
            description("invalid maze dimensions")
            display("a maze must be at least 1x1 and fit in memory, got width {} height {}", width, height)
        }
        CellOutOfBounds(row: usize, col: usize) {
            description("logical cell coordinate out of bounds")
            display("cell (row {}, col {}) is outside the maze", row, col)
        }
        RawOutOfBounds(y: usize, x: usize) {
            description("raw grid coordinate out of bounds")
            display("raw position (y {}, x {}) is outside the grid buffer", y, x)
        }
        NonAdjacentCells(a: CellCoordinate, b: CellCoordinate) {
            description("cells are not orthogonally adjacent")
            display("cells {} and {} do not share a wall", a, b)
        }
        NotABorderWall(cell: CellCoordinate, side: Side) {
            description("wall is not on the outer border")
            display("the {:?} wall of cell {} is not on the outer border", side, cell)
        }
        NotOnBorder(cell: CellCoordinate) {
            description("cell has no free border wall")
            display("cell {} has no outer border wall left to open", cell)
        }
        GridNotWalled {
            description("grid is not fully walled")
            display("carving must start from a grid where every wall position is a wall and every cell is empty")
        }
        UnreachableEnd(start: CellCoordinate, end: CellCoordinate) {
            description("end location unreachable")
            display("no open route leads from {} to {}", start, end)
        }
    }
}
