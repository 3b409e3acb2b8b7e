use bit_set::BitSet;
use log::debug;
use rand::Rng;
use std::cmp;

use crate::cells::{CellCoordinate, RawCoordinate};
use crate::errors::*;
use crate::grid::{CoordinateSmallVec, Grid, SideSmallVec};


/// Source of the uniform random picks made while carving.
/// Swap in a `ScriptedChooser` to get an exact, repeatable layout.
pub trait Chooser {
    /// An index in `0..len`. Never called with a `len` of zero.
    /// Larger values are wrapped back into range by the carving code.
    fn choose(&mut self, len: usize) -> usize;
}

impl<'a, C: Chooser + ?Sized> Chooser for &'a mut C {
    #[inline]
    fn choose(&mut self, len: usize) -> usize {
        (**self).choose(len)
    }
}

#[derive(Debug)]
pub struct RngChooser<R: Rng> {
    rng: R,
}

impl<R: Rng> RngChooser<R> {
    pub fn new(rng: R) -> RngChooser<R> {
        RngChooser { rng }
    }
}

impl<R: Rng> Chooser for RngChooser<R> {
    #[inline]
    fn choose(&mut self, len: usize) -> usize {
        self.rng.gen_range(0, len)
    }
}

/// Replays a fixed list of picks, cycling through it. A pick is wrapped into range with a
/// modulo, so `vec![0]` always takes the first candidate. An empty list behaves as `vec![0]`.
#[derive(Debug, Clone)]
pub struct ScriptedChooser {
    picks: Vec<usize>,
    next: usize,
}

impl ScriptedChooser {
    pub fn new(picks: Vec<usize>) -> ScriptedChooser {
        ScriptedChooser { picks, next: 0 }
    }
}

impl Chooser for ScriptedChooser {
    fn choose(&mut self, len: usize) -> usize {
        if self.picks.is_empty() {
            return 0;
        }
        let pick = self.picks[self.next % self.picks.len()];
        self.next += 1;
        pick % len
    }
}

/// What a single carving step did.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum CarveStep {
    /// Opened the wall between two cells and moved into the new one.
    Carved { from: CellCoordinate, to: CellCoordinate },
    /// Dead end: resumed from the most recent branch point in the history.
    Backtracked { from: CellCoordinate, to: CellCoordinate },
    /// Dead end with an empty history. The frontier is now empty.
    Exhausted(CellCoordinate),
}

#[derive(Eq, PartialEq, Copy, Clone, Debug, Default)]
pub struct CarveSummary {
    pub passages_carved: usize,
    pub backtracks: usize,
    pub deepest_history: usize,
}

/// Randomized depth first carving with explicit stacks instead of recursion.
///
/// Carving starts at `(0, 0)` on a fully walled grid. Each step pops the frontier; when the
/// popped cell has unvisited neighbours one of them is picked, the wall between is removed and
/// the parent goes on the history stack. When it has none, the top of the history is pushed
/// back on the frontier so carving resumes from the last branch point.
/// The result is a spanning tree over every cell: one simple path between any two cells.
pub struct RecursiveBacktracker<'g, C: Chooser> {
    grid: &'g mut Grid,
    chooser: C,
    visited: BitSet,
    frontier: Vec<CellCoordinate>,
    history: Vec<CellCoordinate>,
    summary: CarveSummary,
}

impl<'g, C: Chooser> RecursiveBacktracker<'g, C> {

    /// Fails with `GridNotWalled` unless the grid is exactly in its freshly constructed state.
    pub fn new(grid: &'g mut Grid, chooser: C) -> Result<RecursiveBacktracker<'g, C>> {

        if !grid.is_fully_walled() {
            return Err(ErrorKind::GridNotWalled.into());
        }

        let origin = CellCoordinate::new(0, 0);
        let cells_count = grid.size();
        let mut visited = BitSet::with_capacity(cells_count);
        visited.insert(cell_bit(grid, origin));
        let mut frontier = Vec::with_capacity(cells_count);
        frontier.push(origin);

        Ok(RecursiveBacktracker {
            grid,
            chooser,
            visited,
            frontier,
            history: Vec::with_capacity(cells_count),
            summary: CarveSummary::default(),
        })
    }

    #[inline]
    pub fn frontier(&self) -> &[CellCoordinate] {
        &self.frontier
    }

    #[inline]
    pub fn history(&self) -> &[CellCoordinate] {
        &self.history
    }

    #[inline]
    pub fn is_visited(&self, cell: CellCoordinate) -> bool {
        self.visited.contains(cell_bit(&*self.grid, cell))
    }

    #[inline]
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.frontier.is_empty()
    }

    #[inline]
    pub fn summary(&self) -> CarveSummary {
        self.summary
    }

    /// Advance by one frontier pop. None once the frontier is empty.
    pub fn step(&mut self) -> Result<Option<CarveStep>> {

        let current = match self.frontier.pop() {
            Some(cell) => cell,
            None => return Ok(None),
        };

        let unvisited: CoordinateSmallVec = self.grid
            .neighbours(current)
            .iter()
            .cloned()
            .filter(|neighbour| !self.is_visited(*neighbour))
            .collect();

        if unvisited.is_empty() {
            let step = match self.history.pop() {
                Some(branch_point) => {
                    self.frontier.push(branch_point);
                    self.summary.backtracks += 1;
                    CarveStep::Backtracked { from: current, to: branch_point }
                }
                None => CarveStep::Exhausted(current),
            };
            return Ok(Some(step));
        }

        let next = unvisited[pick(&mut self.chooser, unvisited.len())];

        // Neighbours are unit steps, anything else is a broken invariant.
        let side = self.grid.wall_between(current, next)?;
        self.grid.remove_wall(current.row, current.col, &[side]);

        self.visited.insert(cell_bit(&*self.grid, next));
        self.frontier.push(next);
        self.history.push(current);

        self.summary.passages_carved += 1;
        self.summary.deepest_history = cmp::max(self.summary.deepest_history, self.history.len());

        Ok(Some(CarveStep::Carved { from: current, to: next }))
    }

    /// Carve until the frontier is empty, then fix start and end to the diagonal corners.
    pub fn run(mut self) -> Result<CarveSummary> {

        while self.step()?.is_some() {}

        debug_assert_eq!(self.visited.len(), self.grid.size());

        let (height, width) = (self.grid.height(), self.grid.width());
        self.grid.set_start_location(CellCoordinate::new(0, 0))?;
        self.grid.set_end_location(CellCoordinate::new(height - 1, width - 1))?;

        Ok(self.summary)
    }
}

/// Carve a perfect maze into a fully walled grid.
pub fn recursive_backtracker<C: Chooser>(grid: &mut Grid, chooser: C) -> Result<CarveSummary> {

    let summary = RecursiveBacktracker::new(grid, chooser)?.run()?;

    debug!("carved {}x{} maze: {} passages, {} backtracks, deepest history {}",
           grid.width(),
           grid.height(),
           summary.passages_carved,
           summary.backtracks,
           summary.deepest_history);

    Ok(summary)
}

/// The two border positions opened by `open_entrance_and_exit`.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Openings {
    pub entrance: RawCoordinate,
    pub exit: RawCoordinate,
}

/// Open one outer wall of the start cell and one of the end cell, picked at random among
/// their border sides. The two openings are always distinct positions, even on a 1x1 maze.
pub fn open_entrance_and_exit<C: Chooser>(grid: &mut Grid, mut chooser: C) -> Result<Openings> {

    let start = grid.start_location();
    let end = grid.end_location();

    let start_sides = grid.border_sides(start);
    if start_sides.is_empty() {
        return Err(ErrorKind::NotOnBorder(start).into());
    }
    let start_side = start_sides[pick(&mut chooser, start_sides.len())];
    grid.open_border(start, start_side)?;

    let end_sides: SideSmallVec = grid.border_sides(end)
        .iter()
        .cloned()
        .filter(|side| end != start || *side != start_side)
        .collect();
    if end_sides.is_empty() {
        return Err(ErrorKind::NotOnBorder(end).into());
    }
    let end_side = end_sides[pick(&mut chooser, end_sides.len())];
    grid.open_border(end, end_side)?;

    let wall_position = |cell: CellCoordinate, side| {
        cell.as_raw()
            .offset(side)
            .ok_or_else(|| Error::from(ErrorKind::NotABorderWall(cell, side)))
    };

    Ok(Openings {
        entrance: wall_position(start, start_side)?,
        exit: wall_position(end, end_side)?,
    })
}

/// Rebuild up to `count` randomly chosen passages, splitting the maze into disconnected parts.
/// Returns how many walls went back up.
pub fn rebuild_random_walls<C: Chooser>(grid: &mut Grid, count: usize, mut chooser: C) -> Result<usize> {

    let mut passages = grid.passages();
    let mut rebuilt = 0;

    while rebuilt < count && !passages.is_empty() {
        let (a, b) = passages.swap_remove(pick(&mut chooser, passages.len()));
        grid.build_wall_between(a, b)?;
        rebuilt += 1;
    }

    debug!("rebuilt {} of {} requested walls", rebuilt, count);

    Ok(rebuilt)
}

/// A chooser's pick wrapped into `0..len`, so an out of range pick cannot index past the candidates.
#[inline]
fn pick<C: Chooser>(chooser: &mut C, len: usize) -> usize {
    chooser.choose(len) % len
}

#[inline]
fn cell_bit(grid: &Grid, cell: CellCoordinate) -> usize {
    cell.row * grid.width() + cell.col
}


#[cfg(test)]
mod tests {

    use super::*;
    use crate::cells::GridValue;
    use crate::grids::seeded_rng;
    use crate::units::{Height, Width};
    use petgraph::algo::{connected_components, is_cyclic_undirected};
    use quickcheck::{quickcheck, TestResult};

    fn grid(w: usize, h: usize) -> Grid {
        Grid::new(Width(w), Height(h)).expect("valid grid dimensions")
    }

    fn gc(row: usize, col: usize) -> CellCoordinate {
        CellCoordinate::new(row, col)
    }

    fn seeded_maze(w: usize, h: usize, seed: u64) -> Grid {
        let mut g = grid(w, h);
        recursive_backtracker(&mut g, RngChooser::new(seeded_rng(seed))).expect("carving failed");
        g
    }

    fn is_spanning_tree(g: &Grid) -> bool {
        let graph = g.passage_graph();
        g.passage_count() == g.size() - 1 &&
        connected_components(&graph) == 1 &&
        !is_cyclic_undirected(&graph)
    }

    fn border_is_closed(g: &Grid) -> bool {
        let (rh, rw) = (2 * g.height() + 1, 2 * g.width() + 1);
        g.raw_positions()
            .filter(|raw| raw.y == 0 || raw.x == 0 || raw.y == rh - 1 || raw.x == rw - 1)
            .all(|raw| g.get_raw(raw.y, raw.x).unwrap() == GridValue::Wall)
    }

    #[test]
    fn single_cell_maze_has_nothing_to_carve() {
        let mut g = grid(1, 1);
        let summary = recursive_backtracker(&mut g, ScriptedChooser::new(vec![])).unwrap();
        assert_eq!(summary, CarveSummary::default());
        assert!(g.is_fully_walled());
        assert_eq!(g.start_location(), gc(0, 0));
        assert_eq!(g.end_location(), gc(0, 0));
    }

    #[test]
    fn scripted_first_picks_give_exact_layout() {
        let mut g = grid(2, 2);
        let summary = recursive_backtracker(&mut g, ScriptedChooser::new(vec![0])).unwrap();
        assert_eq!(g.passages(),
                   vec![(gc(0, 0), gc(0, 1)), (gc(0, 1), gc(1, 1)), (gc(1, 0), gc(1, 1))]);
        assert_eq!(summary,
                   CarveSummary { passages_carved: 3, backtracks: 3, deepest_history: 3 });
        assert_eq!(g.start_location(), gc(0, 0));
        assert_eq!(g.end_location(), gc(1, 1));
    }

    #[test]
    fn scripted_second_picks_give_exact_layout() {
        let mut g = grid(2, 2);
        recursive_backtracker(&mut g, ScriptedChooser::new(vec![1])).unwrap();
        assert_eq!(g.passages(),
                   vec![(gc(0, 0), gc(1, 0)), (gc(0, 1), gc(1, 1)), (gc(1, 0), gc(1, 1))]);
    }

    #[test]
    fn two_by_two_removes_three_of_four_walls() {
        for seed in 0..20 {
            let g = seeded_maze(2, 2, seed);
            assert_eq!(g.passage_count(), 3);
            assert!(is_spanning_tree(&g));
        }
    }

    #[test]
    fn stepping_exposes_frontier_and_history() {
        let mut g = grid(3, 1);
        let mut carver = RecursiveBacktracker::new(&mut g, ScriptedChooser::new(vec![0])).unwrap();
        assert_eq!(carver.frontier(), &[gc(0, 0)]);
        assert!(carver.history().is_empty());
        assert_eq!(carver.visited_count(), 1);

        assert_eq!(carver.step().unwrap(), Some(CarveStep::Carved { from: gc(0, 0), to: gc(0, 1) }));
        assert_eq!(carver.frontier(), &[gc(0, 1)]);
        assert_eq!(carver.history(), &[gc(0, 0)]);

        assert_eq!(carver.step().unwrap(), Some(CarveStep::Carved { from: gc(0, 1), to: gc(0, 2) }));
        assert_eq!(carver.frontier(), &[gc(0, 2)]);
        assert_eq!(carver.history(), &[gc(0, 0), gc(0, 1)]);
        assert_eq!(carver.visited_count(), 3);

        assert_eq!(carver.step().unwrap(), Some(CarveStep::Backtracked { from: gc(0, 2), to: gc(0, 1) }));
        assert_eq!(carver.frontier(), &[gc(0, 1)]);
        assert_eq!(carver.history(), &[gc(0, 0)]);

        assert_eq!(carver.step().unwrap(), Some(CarveStep::Backtracked { from: gc(0, 1), to: gc(0, 0) }));
        assert_eq!(carver.step().unwrap(), Some(CarveStep::Exhausted(gc(0, 0))));
        assert!(carver.is_finished());
        assert_eq!(carver.step().unwrap(), None);
        assert_eq!(carver.summary(),
                   CarveSummary { passages_carved: 2, backtracks: 2, deepest_history: 2 });
    }

    #[test]
    fn carving_requires_a_fully_walled_grid() {
        let mut g = seeded_maze(4, 4, 7);
        match recursive_backtracker(&mut g, ScriptedChooser::new(vec![0])).unwrap_err().0 {
            ErrorKind::GridNotWalled => {}
            other => panic!("unexpected error {:?}", other),
        }

        g.reset();
        assert!(recursive_backtracker(&mut g, ScriptedChooser::new(vec![0])).is_ok());
        assert!(is_spanning_tree(&g));
    }

    #[test]
    fn stray_path_marks_block_carving() {
        let mut g = grid(3, 3);
        g.set_cell(1, 1, GridValue::Path).unwrap();
        assert!(RecursiveBacktracker::new(&mut g, ScriptedChooser::new(vec![0])).is_err());
    }

    #[test]
    fn generated_mazes_are_spanning_trees() {
        for &(w, h) in &[(1, 1), (1, 7), (7, 1), (3, 5), (10, 10), (25, 13)] {
            let g = seeded_maze(w, h, (w * 31 + h) as u64);
            assert!(is_spanning_tree(&g), "{}x{} maze is not a spanning tree", w, h);
            assert!(border_is_closed(&g));
        }
    }

    #[test]
    fn different_seeds_give_different_mazes() {
        let a = seeded_maze(10, 10, 1);
        let b = seeded_maze(10, 10, 2);
        let a_again = seeded_maze(10, 10, 1);
        assert_ne!(a.passages(), b.passages());
        assert_eq!(a.passages(), a_again.passages());
    }

    #[test]
    fn quickcheck_spanning_tree() {
        fn p(w: u8, h: u8, seed: u64) -> TestResult {
            let (w, h) = (w as usize % 16 + 1, h as usize % 16 + 1);
            let g = seeded_maze(w, h, seed);
            TestResult::from_bool(is_spanning_tree(&g) && border_is_closed(&g))
        }
        quickcheck(p as fn(u8, u8, u64) -> TestResult)
    }

    #[test]
    fn openings_are_the_only_gaps_in_the_border() {
        let mut g = seeded_maze(6, 4, 11);
        let openings = open_entrance_and_exit(&mut g, ScriptedChooser::new(vec![1, 0])).unwrap();

        // (0,0) border sides are [Top, Left], (3,5) border sides are [Right, Bottom]
        assert_eq!(openings.entrance, RawCoordinate::new(1, 0));
        assert_eq!(openings.exit, RawCoordinate::new(7, 12));

        let (rh, rw) = (9, 13);
        let open_border = g.raw_positions()
            .filter(|raw| raw.y == 0 || raw.x == 0 || raw.y == rh - 1 || raw.x == rw - 1)
            .filter(|raw| g.get_raw(raw.y, raw.x).unwrap() != GridValue::Wall)
            .collect::<Vec<_>>();
        assert_eq!(open_border, vec![openings.entrance, openings.exit]);
    }

    #[test]
    fn single_cell_openings_are_distinct() {
        for pick in 0..4 {
            let mut g = seeded_maze(1, 1, 3);
            let openings = open_entrance_and_exit(&mut g, ScriptedChooser::new(vec![pick])).unwrap();
            assert_ne!(openings.entrance, openings.exit);
        }
    }

    #[test]
    fn openings_need_border_cells() {
        let mut g = seeded_maze(3, 3, 5);
        g.set_start_location(gc(1, 1)).unwrap();
        match open_entrance_and_exit(&mut g, ScriptedChooser::new(vec![0])).unwrap_err().0 {
            ErrorKind::NotOnBorder(cell) => assert_eq!(cell, gc(1, 1)),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn rebuilding_walls_disconnects_the_maze() {
        let mut g = seeded_maze(5, 5, 42);
        let rebuilt = rebuild_random_walls(&mut g, 3, ScriptedChooser::new(vec![0, 5, 9])).unwrap();
        assert_eq!(rebuilt, 3);
        assert_eq!(g.passage_count(), 24 - 3);
        assert_eq!(connected_components(&g.passage_graph()), 4);
    }

    /// Always answers with an index past the end of the candidates.
    struct OverreachingChooser;

    impl Chooser for OverreachingChooser {
        fn choose(&mut self, len: usize) -> usize {
            len + 7
        }
    }

    #[test]
    fn out_of_range_picks_are_wrapped() {
        let mut g = grid(6, 5);
        recursive_backtracker(&mut g, OverreachingChooser).unwrap();
        assert!(is_spanning_tree(&g));

        let openings = open_entrance_and_exit(&mut g, OverreachingChooser).unwrap();
        assert_ne!(openings.entrance, openings.exit);

        assert_eq!(rebuild_random_walls(&mut g, 4, OverreachingChooser).unwrap(), 4);
        assert_eq!(g.passage_count(), 29 - 4);
    }

    #[test]
    fn rebuilding_stops_when_no_passages_remain() {
        let mut g = seeded_maze(2, 2, 1);
        let rebuilt = rebuild_random_walls(&mut g, 10, ScriptedChooser::new(vec![0])).unwrap();
        assert_eq!(rebuilt, 3);
        assert!(g.is_fully_walled());
    }
}
