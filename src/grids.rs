use log::info;
use rand::{self, SeedableRng, XorShiftRng};

use crate::errors::*;
use crate::generators::{self, Chooser, RngChooser};
use crate::grid::Grid;
use crate::units::{Height, Width};

pub const DEFAULT_SIZE: usize = 10;

/// A deterministic generator for reproducible mazes.
pub fn seeded_rng(seed: u64) -> XorShiftRng {
    let lo = seed as u32;
    let hi = (seed >> 32) as u32;
    // XorShift must not be seeded with all zeroes.
    XorShiftRng::from_seed([lo, hi, lo ^ 0x9E37_79B9, hi ^ 0x7F4A_7C15])
}

/// A fully carved maze using thread local randomness.
pub fn new_maze(width: Width, height: Height) -> Result<Grid> {
    new_maze_with_chooser(width, height, RngChooser::new(rand::weak_rng()))
}

pub fn default_maze() -> Result<Grid> {
    new_maze(Width(DEFAULT_SIZE), Height(DEFAULT_SIZE))
}

pub fn new_seeded_maze(width: Width, height: Height, seed: u64) -> Result<Grid> {
    new_maze_with_chooser(width, height, RngChooser::new(seeded_rng(seed)))
}

pub fn new_maze_with_chooser<C: Chooser>(width: Width, height: Height, chooser: C) -> Result<Grid> {
    let mut grid = Grid::new(width, height)?;
    let summary = generators::recursive_backtracker(&mut grid, chooser)?;
    info!("carved {}x{} maze: {} passages, {} backtracks",
          width.0,
          height.0,
          summary.passages_carved,
          summary.backtracks);
    Ok(grid)
}
