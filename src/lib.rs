//! **wall_mazes** generates perfect mazes on a doubled-resolution wall grid and solves them.
//!
//! Cells and the walls between them live in one raw buffer, so a maze can be printed or
//! painted position by position. Carving is a randomized depth first search and solving is a
//! depth first reachability search that marks the route it finds.

pub mod cells;
pub mod errors;
pub mod generators;
pub mod grid;
pub mod grid_displays;
pub mod grid_traits;
pub mod grids;
pub mod pathing;
pub mod renderers;
pub mod units;
mod utils;
