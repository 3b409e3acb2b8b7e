use itertools::Itertools;
use std::fmt;

use crate::cells::GridValue;
use crate::grid::Grid;
use crate::grid_traits::GridDisplay;


/// Two columns per raw position so the maze keeps a square aspect ratio in a terminal.
#[derive(Debug, Default, Copy, Clone)]
pub struct BlockDisplay;

impl GridDisplay for BlockDisplay {
    fn render_value(&self, value: GridValue) -> &str {
        match value {
            GridValue::Wall => "██",
            GridValue::Empty => "  ",
            GridValue::Path => "··",
        }
    }
}

#[derive(Debug, Default, Copy, Clone)]
pub struct AsciiDisplay;

impl GridDisplay for AsciiDisplay {
    fn render_value(&self, value: GridValue) -> &str {
        match value {
            GridValue::Wall => "#",
            GridValue::Empty => " ",
            GridValue::Path => ".",
        }
    }
}

/// One text line per raw row, each terminated by a newline.
pub fn render_text(grid: &Grid, display: &dyn GridDisplay) -> String {
    let mut output = grid.raw_rows()
        .map(|row| row.iter().map(|value| display.render_value(*value)).join(""))
        .join("\n");
    output.push('\n');
    output
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", render_text(self, &BlockDisplay))
    }
}


#[cfg(test)]
mod tests {

    use super::*;
    use crate::generators::{self, ScriptedChooser};
    use crate::pathing;
    use crate::units::{Height, Width};

    fn maze(w: usize, h: usize, picks: Vec<usize>) -> Grid {
        let mut g = Grid::new(Width(w), Height(h)).unwrap();
        generators::recursive_backtracker(&mut g, ScriptedChooser::new(picks)).unwrap();
        g
    }

    #[test]
    fn fresh_grid_ascii() {
        let g = Grid::new(Width(2), Height(1)).unwrap();
        assert_eq!(render_text(&g, &AsciiDisplay), "#####\n# # #\n#####\n");
    }

    #[test]
    fn solved_single_cell_ascii() {
        let mut g = maze(1, 1, vec![]);
        pathing::solve_dfs(&mut g).unwrap();
        assert_eq!(render_text(&g, &AsciiDisplay), "###\n#.#\n###\n");
    }

    #[test]
    fn solved_two_by_two_ascii() {
        let mut g = maze(2, 2, vec![0]);
        pathing::solve_dfs(&mut g).unwrap();
        let expected = "#####\n\
                        #...#\n\
                        ###.#\n\
                        #  .#\n\
                        #####\n";
        assert_eq!(render_text(&g, &AsciiDisplay), expected);
    }

    #[test]
    fn rendering_has_raw_dimensions() {
        let g = maze(7, 4, vec![3, 1, 2]);
        let text = render_text(&g, &AsciiDisplay);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 9);
        assert!(lines.iter().all(|line| line.chars().count() == 15));

        let blocks = g.to_string();
        assert!(blocks.lines().all(|line| line.chars().count() == 30));
    }

    #[test]
    fn rendering_does_not_change_the_grid() {
        let g = maze(5, 5, vec![1, 0]);
        assert_eq!(render_text(&g, &AsciiDisplay), render_text(&g, &AsciiDisplay));
        assert_eq!(g.to_string(), format!("{}", g));
    }
}
