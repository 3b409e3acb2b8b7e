use petgraph::{Graph, Undirected};
use smallvec::SmallVec;
use std::fmt;
use std::slice;

use crate::cells::{raw_index, CellCoordinate, GridValue, RawCoordinate, Side};
use crate::errors::*;
use crate::units::{Height, RawHeight, RawWidth, Width};


pub type CoordinateSmallVec = SmallVec<[CellCoordinate; 4]>;
pub type SideSmallVec = SmallVec<[Side; 4]>;

/// Undirected graph of carved passages, one node per logical cell in row major order.
pub type PassageGraph = Graph<CellCoordinate, (), Undirected>;

/// A rectangular maze stored at doubled resolution.
///
/// A maze of `height * width` logical cells lives in a `(2 * height + 1) * (2 * width + 1)`
/// buffer. Logical cell `(row, col)` is raw position `(2 * row + 1, 2 * col + 1)` and its four
/// walls are the raw positions one step away from it. Every position with an even coordinate
/// is either a wall slot between two cells or part of the outer border.
///
/// The buffer is allocated once and never resized.
#[derive(Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    raw_width: usize,
    raw_height: usize,
    cells: Vec<GridValue>,
    start_location: CellCoordinate,
    end_location: CellCoordinate,
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f,
               "Grid :: width: {:?}, height: {:?}, start: {}, end: {}, passages: {}",
               self.width,
               self.height,
               self.start_location,
               self.end_location,
               self.passage_count())
    }
}

impl Grid {
    /// Allocate a fully walled grid: every cell interior is empty and every wall slot and
    /// border position is a wall.
    ///
    /// Start and end default to the two diagonal corners.
    pub fn new(width: Width, height: Height) -> Result<Grid> {

        let (Width(w), Height(h)) = (width, height);
        if w == 0 || h == 0 {
            return Err(ErrorKind::InvalidDimensions(w, h).into());
        }

        let raw_len = |n: usize| n.checked_mul(2).and_then(|doubled| doubled.checked_add(1));
        let (raw_width, raw_height, buffer_len) = raw_len(w)
            .and_then(|rw| raw_len(h).map(|rh| (rw, rh)))
            .and_then(|(rw, rh)| rw.checked_mul(rh).map(|len| (rw, rh, len)))
            .ok_or_else(|| ErrorKind::InvalidDimensions(w, h))?;

        let mut grid = Grid {
            width: w,
            height: h,
            raw_width,
            raw_height,
            cells: vec![GridValue::Empty; buffer_len],
            start_location: CellCoordinate::new(0, 0),
            end_location: CellCoordinate::new(h - 1, w - 1),
        };
        grid.fill_borders();

        Ok(grid)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn dimensions(&self) -> (Width, Height) {
        (Width(self.width), Height(self.height))
    }

    #[inline]
    pub fn raw_dimensions(&self) -> (RawWidth, RawHeight) {
        (RawWidth(self.raw_width), RawHeight(self.raw_height))
    }

    /// Number of logical cells.
    #[inline]
    pub fn size(&self) -> usize {
        self.width * self.height
    }

    #[inline]
    pub fn start_location(&self) -> CellCoordinate {
        self.start_location
    }

    #[inline]
    pub fn end_location(&self) -> CellCoordinate {
        self.end_location
    }

    pub fn set_start_location(&mut self, cell: CellCoordinate) -> Result<()> {
        self.check_cell(cell.row, cell.col)?;
        self.start_location = cell;
        Ok(())
    }

    pub fn set_end_location(&mut self, cell: CellCoordinate) -> Result<()> {
        self.check_cell(cell.row, cell.col)?;
        self.end_location = cell;
        Ok(())
    }

    /// Is the logical coordinate inside the maze?
    #[inline]
    pub fn is_in_bounds(&self, row: usize, col: usize) -> bool {
        row < self.height && col < self.width
    }

    /// Is the raw coordinate inside the doubled-resolution buffer?
    #[inline]
    pub fn is_raw_in_bounds(&self, y: usize, x: usize) -> bool {
        y < self.raw_height && x < self.raw_width
    }

    pub fn get_cell(&self, row: usize, col: usize) -> Result<GridValue> {
        self.check_cell(row, col)?;
        Ok(self.cells[self.raw_offset(raw_index(row), raw_index(col))])
    }

    pub fn set_cell(&mut self, row: usize, col: usize, value: GridValue) -> Result<()> {
        self.check_cell(row, col)?;
        let offset = self.raw_offset(raw_index(row), raw_index(col));
        self.cells[offset] = value;
        Ok(())
    }

    pub fn get_raw(&self, y: usize, x: usize) -> Result<GridValue> {
        self.check_raw(y, x)?;
        Ok(self.cells[self.raw_offset(y, x)])
    }

    pub fn set_raw(&mut self, y: usize, x: usize, value: GridValue) -> Result<()> {
        self.check_raw(y, x)?;
        let offset = self.raw_offset(y, x);
        self.cells[offset] = value;
        Ok(())
    }

    /// Set the wall slots on the given sides of a cell.
    ///
    /// Sides whose wall position falls outside the raw buffer are skipped without error.
    /// Returns how many positions were written.
    pub fn set_wall_value(&mut self, row: usize, col: usize, sides: &[Side], value: GridValue) -> usize {

        // Nothing one step away from these can land in the buffer.
        if row > self.height || col > self.width {
            return 0;
        }

        let centre = RawCoordinate::new(raw_index(row), raw_index(col));
        let mut written = 0;
        for side in sides {
            if let Some(wall) = centre.offset(*side) {
                if self.is_raw_in_bounds(wall.y, wall.x) {
                    let offset = self.raw_offset(wall.y, wall.x);
                    self.cells[offset] = value;
                    written += 1;
                }
            }
        }
        written
    }

    /// State of the wall slot on one side of a cell. Outward sides of border cells are
    /// border walls, not errors.
    pub fn get_wall_value(&self, row: usize, col: usize, side: Side) -> Result<GridValue> {
        self.check_cell(row, col)?;
        let wall = CellCoordinate::new(row, col)
            .as_raw()
            .offset(side)
            .ok_or_else(|| ErrorKind::CellOutOfBounds(row, col))?;
        self.get_raw(wall.y, wall.x)
    }

    #[inline]
    pub fn build_wall(&mut self, row: usize, col: usize, sides: &[Side]) -> usize {
        self.set_wall_value(row, col, sides, GridValue::Wall)
    }

    #[inline]
    pub fn remove_wall(&mut self, row: usize, col: usize, sides: &[Side]) -> usize {
        self.set_wall_value(row, col, sides, GridValue::Empty)
    }

    /// Wall every raw position on an even row or even column. This draws the outer border
    /// and every inter-cell wall at once, leaving cell interiors untouched.
    pub fn fill_borders(&mut self) {
        for y in 0..self.raw_height {
            for x in 0..self.raw_width {
                if y % 2 == 0 || x % 2 == 0 {
                    let offset = self.raw_offset(y, x);
                    self.cells[offset] = GridValue::Wall;
                }
            }
        }
    }

    /// Return to the freshly constructed state: all cells empty, all walls built,
    /// start and end on the diagonal corners.
    pub fn reset(&mut self) {
        for value in self.cells.iter_mut() {
            *value = GridValue::Empty;
        }
        self.fill_borders();
        self.start_location = CellCoordinate::new(0, 0);
        self.end_location = CellCoordinate::new(self.height - 1, self.width - 1);
    }

    /// True when every wall slot is a wall and every cell interior is empty.
    pub fn is_fully_walled(&self) -> bool {
        self.raw_positions().all(|raw| {
            let expected = if raw.is_cell_interior() {
                GridValue::Empty
            } else {
                GridValue::Wall
            };
            self.cells[self.raw_offset(raw.y, raw.x)] == expected
        })
    }

    /// Turn every solved path marker back into open space.
    pub fn clear_path(&mut self) {
        for value in self.cells.iter_mut().filter(|v| **v == GridValue::Path) {
            *value = GridValue::Empty;
        }
    }

    /// Cells one unit step away that lie inside the maze, not necessarily connected by a
    /// passage. Always in top, right, bottom, left order.
    pub fn neighbours(&self, cell: CellCoordinate) -> CoordinateSmallVec {
        Side::CLOCKWISE
            .iter()
            .filter_map(|side| self.neighbour_at_side(cell, *side))
            .collect()
    }

    pub fn neighbour_at_side(&self, cell: CellCoordinate, side: Side) -> Option<CellCoordinate> {
        cell.offset(side).and_then(|neighbour| {
            if self.is_in_bounds(neighbour.row, neighbour.col) {
                Some(neighbour)
            } else {
                None
            }
        })
    }

    /// The side of `a` that faces `b`. The cells must differ by exactly one in exactly one axis.
    pub fn wall_between(&self, a: CellCoordinate, b: CellCoordinate) -> Result<Side> {
        Side::CLOCKWISE
            .iter()
            .cloned()
            .find(|side| a.offset(*side) == Some(b))
            .ok_or_else(|| ErrorKind::NonAdjacentCells(a, b).into())
    }

    /// Is there an open passage between two adjacent cells?
    pub fn is_passage_open(&self, a: CellCoordinate, b: CellCoordinate) -> Result<bool> {
        let side = self.wall_between(a, b)?;
        self.check_cell(b.row, b.col)?;
        Ok(self.get_wall_value(a.row, a.col, side)?.is_open())
    }

    /// Carve a passage between two adjacent cells.
    pub fn remove_wall_between(&mut self, a: CellCoordinate, b: CellCoordinate) -> Result<()> {
        self.set_wall_between(a, b, GridValue::Empty)
    }

    /// Close the passage between two adjacent cells.
    pub fn build_wall_between(&mut self, a: CellCoordinate, b: CellCoordinate) -> Result<()> {
        self.set_wall_between(a, b, GridValue::Wall)
    }

    pub fn set_wall_between(&mut self, a: CellCoordinate, b: CellCoordinate, value: GridValue) -> Result<()> {
        let side = self.wall_between(a, b)?;
        self.check_cell(a.row, a.col)?;
        self.check_cell(b.row, b.col)?;
        self.set_wall_value(a.row, a.col, &[side], value);
        Ok(())
    }

    /// Sides of a cell whose wall is part of the outer border.
    pub fn border_sides(&self, cell: CellCoordinate) -> SideSmallVec {
        Side::CLOCKWISE
            .iter()
            .cloned()
            .filter(|side| self.neighbour_at_side(cell, *side).is_none())
            .collect()
    }

    /// Open the outer border on one side of a border cell.
    pub fn open_border(&mut self, cell: CellCoordinate, side: Side) -> Result<()> {
        self.check_cell(cell.row, cell.col)?;
        if self.neighbour_at_side(cell, side).is_some() {
            return Err(ErrorKind::NotABorderWall(cell, side).into());
        }
        self.remove_wall(cell.row, cell.col, &[side]);
        Ok(())
    }

    /// Every open passage between two cells, each pair reported once with the
    /// top/left cell first.
    pub fn passages(&self) -> Vec<(CellCoordinate, CellCoordinate)> {
        let mut passages = Vec::with_capacity(self.size());
        for cell in self.iter() {
            for side in &[Side::Right, Side::Bottom] {
                let wall = cell.as_raw().offset(*side);
                if let (Some(neighbour), Some(wall)) = (self.neighbour_at_side(cell, *side), wall) {
                    if self.cells[self.raw_offset(wall.y, wall.x)].is_open() {
                        passages.push((cell, neighbour));
                    }
                }
            }
        }
        passages
    }

    #[inline]
    pub fn passage_count(&self) -> usize {
        self.passages().len()
    }

    pub fn passage_graph(&self) -> PassageGraph {
        let passages = self.passages();
        let mut graph = Graph::with_capacity(self.size(), passages.len());
        let nodes = self.iter().map(|cell| graph.add_node(cell)).collect::<Vec<_>>();
        for (a, b) in passages {
            if let (Some(index_a), Some(index_b)) = (self.cell_index(a), self.cell_index(b)) {
                graph.add_edge(nodes[index_a], nodes[index_b], ());
            }
        }
        graph
    }

    /// Row major index of a logical cell in the range `0..grid.size()`.
    /// None if the cell is outside the maze.
    #[inline]
    pub fn cell_index(&self, cell: CellCoordinate) -> Option<usize> {
        if self.is_in_bounds(cell.row, cell.col) {
            Some(cell.row * self.width + cell.col)
        } else {
            None
        }
    }

    /// Logical cells in row major order.
    pub fn iter(&self) -> impl Iterator<Item = CellCoordinate> {
        let width = self.width;
        (0..self.size()).map(move |index| CellCoordinate::new(index / width, index % width))
    }

    /// Raw positions in row major order.
    pub fn raw_positions(&self) -> impl Iterator<Item = RawCoordinate> {
        let raw_width = self.raw_width;
        (0..self.cells.len()).map(move |index| RawCoordinate::new(index / raw_width, index % raw_width))
    }

    /// Rows of the raw buffer, top to bottom.
    #[inline]
    pub fn raw_rows(&self) -> slice::Chunks<GridValue> {
        self.cells.chunks(self.raw_width)
    }

    fn check_cell(&self, row: usize, col: usize) -> Result<()> {
        if self.is_in_bounds(row, col) {
            Ok(())
        } else {
            Err(ErrorKind::CellOutOfBounds(row, col).into())
        }
    }

    fn check_raw(&self, y: usize, x: usize) -> Result<()> {
        if self.is_raw_in_bounds(y, x) {
            Ok(())
        } else {
            Err(ErrorKind::RawOutOfBounds(y, x).into())
        }
    }

    #[inline(always)]
    fn raw_offset(&self, y: usize, x: usize) -> usize {
        y * self.raw_width + x
    }
}
