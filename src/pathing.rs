use bit_set::BitSet;
use log::{info, warn};
use std::slice;

use crate::cells::{CellCoordinate, GridValue};
use crate::errors::*;
use crate::grid::Grid;
use crate::utils::{self, FnvHashMap};


/// An ordered route of logical cells, start first.
#[derive(Eq, PartialEq, Clone, Debug, Default)]
pub struct Path {
    coordinates: Vec<CellCoordinate>,
}

impl Path {
    pub fn new() -> Path {
        Path::default()
    }

    pub fn from_coordinates(coordinates: Vec<CellCoordinate>) -> Path {
        Path { coordinates }
    }

    #[inline]
    pub fn add(&mut self, cell: CellCoordinate) {
        self.coordinates.push(cell);
    }

    #[inline]
    pub fn coordinates(&self) -> &[CellCoordinate] {
        &self.coordinates
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.coordinates.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }

    #[inline]
    pub fn start(&self) -> Option<CellCoordinate> {
        self.coordinates.first().cloned()
    }

    #[inline]
    pub fn end(&self) -> Option<CellCoordinate> {
        self.coordinates.last().cloned()
    }

    #[inline]
    pub fn iter(&self) -> slice::Iter<CellCoordinate> {
        self.coordinates.iter()
    }

    /// Consecutive pairs of cells along the path.
    pub fn steps<'a>(&'a self) -> impl Iterator<Item = (CellCoordinate, CellCoordinate)> + 'a {
        self.coordinates.windows(2).map(|pair| (pair[0], pair[1]))
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a CellCoordinate;
    type IntoIter = slice::Iter<'a, CellCoordinate>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Depth first reachability search from `start`, then a walk back along the discovering
/// parents from `end`.
///
/// The whole component reachable from `start` is explored. Any non wall slot counts as open.
/// Fails with `UnreachableEnd` when `end` is not in that component, which cannot happen on a
/// maze carved by the generators unless walls were rebuilt afterwards.
/// No shortest path guarantee: on a maze with loops this finds *a* path.
pub fn dfs_path(grid: &Grid, start: CellCoordinate, end: CellCoordinate) -> Result<Path> {

    grid.cell_index(start).ok_or_else(|| ErrorKind::CellOutOfBounds(start.row, start.col))?;
    let end_bit = grid.cell_index(end).ok_or_else(|| ErrorKind::CellOutOfBounds(end.row, end.col))?;

    let cells_count = grid.size();
    let mut visited = BitSet::with_capacity(cells_count);
    let mut parents: FnvHashMap<CellCoordinate, CellCoordinate> = utils::fnv_hashmap(cells_count);

    // Cells can be pushed more than once before they are first popped, later copies are skipped.
    let mut frontier = vec![start];

    while let Some(current) = frontier.pop() {

        let current_bit = bit(grid, current);
        if visited.contains(current_bit) {
            continue;
        }

        for neighbour in grid.neighbours(current).iter().cloned() {
            if visited.contains(bit(grid, neighbour)) {
                continue;
            }
            let side = grid.wall_between(current, neighbour)?;
            if grid.get_wall_value(current.row, current.col, side)?.is_open() {
                parents.insert(neighbour, current);
                frontier.push(neighbour);
            }
        }

        visited.insert(current_bit);
    }

    if !visited.contains(end_bit) {
        return Err(ErrorKind::UnreachableEnd(start, end).into());
    }

    // Every parent was visited strictly before its child, so the walk ends at `start`.
    let mut coordinates = vec![end];
    let mut current = end;
    while current != start {
        current = *parents.get(&current).ok_or_else(|| ErrorKind::UnreachableEnd(start, end))?;
        coordinates.push(current);
    }
    coordinates.reverse();

    Ok(Path::from_coordinates(coordinates))
}

/// Overlay a path on the grid: every cell on it and every wall slot between consecutive
/// cells becomes `GridValue::Path`, so the whole corridor is highlighted.
pub fn mark_path(grid: &mut Grid, path: &Path) -> Result<()> {
    for cell in path {
        grid.set_cell(cell.row, cell.col, GridValue::Path)?;
    }
    for (a, b) in path.steps() {
        grid.set_wall_between(a, b, GridValue::Path)?;
    }
    Ok(())
}

/// Solve the maze from its start location to its end location and mark the route.
/// Any previous path overlay is cleared first.
pub fn solve_dfs(grid: &mut Grid) -> Result<Path> {

    let (start, end) = (grid.start_location(), grid.end_location());
    grid.clear_path();

    let path = dfs_path(grid, start, end).map_err(|err| {
        warn!("failed to solve {}x{} maze: {}", grid.width(), grid.height(), err);
        err
    })?;
    mark_path(grid, &path)?;

    info!("solved {}x{} maze from {} to {} in {} cells",
          grid.width(),
          grid.height(),
          start,
          end,
          path.len());

    Ok(path)
}

#[inline]
fn bit(grid: &Grid, cell: CellCoordinate) -> usize {
    cell.row * grid.width() + cell.col
}
