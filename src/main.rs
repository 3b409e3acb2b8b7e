use docopt::Docopt;
use log::info;
use serde_derive::Deserialize;
use wall_mazes::{
    generators::{self, RngChooser},
    grid::Grid,
    grid_displays::{self, AsciiDisplay, BlockDisplay},
    grid_traits::GridDisplay,
    grids,
    pathing,
    renderers,
    units::{Height, Width},
};
use std::{
    io::prelude::*,
    fs::File,
    path::Path,
};

const USAGE: &str = "Wall Mazes

Usage:
    wall_mazes_driver -h | --help
    wall_mazes_driver [(--grid-size=<n>|[--width=<w> --height=<h>])] [--seed=<n>] [--openings] [--block-passages=<n>] [--solve] [--ascii] [--text-out=<path>] [--image-out=<path> --cell-pixels=<n>] [--save-edges=<path>]

Options:
    -h --help              Show this screen.
    --grid-size=<n>        The grid size is n * n cells.
    --width=<w>            The number of cell columns in a w*h maze [default: 10].
    --height=<h>           The number of cell rows in a w*h maze [default: 10].
    --seed=<n>             Seed for a reproducible maze. A fresh random maze is made if not given.
    --openings             Open the outer wall next to the start and the end cell.
    --block-passages=<n>   Randomly choose n passages to wall up again after carving.
    --solve                Find a route from the start (top left) to the end (bottom right) and mark it.
    --ascii                Render text with plain ASCII characters instead of block glyphs.
    --text-out=<path>      Output file path for a textual rendering of a maze. Printed to stdout if not given.
    --image-out=<path>     Output file path for an image rendering of a maze. Always PNG format.
    --cell-pixels=<n>      Pixel count to render one raw grid position [default: 10] max 255.
    --save-edges=<path>    Serialize the maze to a text file: each line is a pair of numbers. Line 1: n(#vertices) m(#edges). Line 2+ edge between vertices. Uses 1-based vertex indices.
";
#[derive(Debug, Deserialize)]
struct MazeArgs {
    flag_grid_size: Option<usize>,
    flag_width: usize,
    flag_height: usize,
    flag_seed: Option<u64>,
    flag_openings: bool,
    flag_block_passages: Option<usize>,
    flag_solve: bool,
    flag_ascii: bool,
    flag_text_out: String,
    flag_image_out: String,
    flag_cell_pixels: u8,
    flag_save_edges: String,
}

mod errors {
    use error_chain::*;
    error_chain! {

        links {
            Maze(::wall_mazes::errors::Error, ::wall_mazes::errors::ErrorKind);
        }

        foreign_links {
            DocOptFailure(::docopt::Error);
            Io(::std::io::Error);
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {

    env_logger::init();

    let args: MazeArgs = Docopt::new(USAGE).and_then(|d| d.deserialize())?;

    let (width, height) = if let Some(square_grid_size) = args.flag_grid_size {
        (square_grid_size, square_grid_size)
    } else {
        (args.flag_width, args.flag_height)
    };

    let rng = match args.flag_seed {
        Some(seed) => grids::seeded_rng(seed),
        None => rand::weak_rng(),
    };
    let mut chooser = RngChooser::new(rng);

    let mut maze_grid = grids::new_maze_with_chooser(Width(width), Height(height), &mut chooser)?;

    if args.flag_openings {
        let openings = generators::open_entrance_and_exit(&mut maze_grid, &mut chooser)?;
        info!("entrance at raw {:?}, exit at raw {:?}", openings.entrance, openings.exit);
    }

    if let Some(wall_count) = args.flag_block_passages {
        generators::rebuild_random_walls(&mut maze_grid, wall_count, &mut chooser)?;
    }

    if !args.flag_save_edges.is_empty() {
        save_maze_graph(&maze_grid, &args.flag_save_edges)?;
    }

    if args.flag_solve {
        pathing::solve_dfs(&mut maze_grid)?;
    }

    let display: &dyn GridDisplay = if args.flag_ascii { &AsciiDisplay } else { &BlockDisplay };
    let text = grid_displays::render_text(&maze_grid, display);
    if args.flag_text_out.is_empty() {
        print!("{}", text);
    } else {
        write_text_to_file(&text, &args.flag_text_out)
            .chain_err(|| format!("Failed to write maze to text file {}", args.flag_text_out))?;
    }

    if !args.flag_image_out.is_empty() {
        let render_options = renderers::RenderOptionsBuilder::new()
            .output_file(Some(Path::new(&args.flag_image_out)))
            .cell_pixels(args.flag_cell_pixels)
            .build();
        renderers::render_png(&maze_grid, &render_options)?;
    }

    Ok(())
}

fn write_text_to_file(data: &str, file_name: &str) -> Result<()> {
    let mut f = File::create(file_name)?;
    f.write_all(data.as_bytes())?;
    Ok(())
}

fn save_maze_graph(maze_grid: &Grid, file_path: &str) -> Result<()> {

    let passages = maze_grid.passages();
    let mut graph_data = format!("{} {}\n", maze_grid.size(), passages.len());

    for (src, dst) in passages {
        let index_a = maze_grid.cell_index(src).ok_or("Passage with an invalid source cell")?;
        let index_b = maze_grid.cell_index(dst).ok_or("Passage with an invalid destination cell")?;
        graph_data.push_str(&format!("{} {}\n", index_a + 1, index_b + 1));
    }

    write_text_to_file(&graph_data, file_path)
        .chain_err(|| format!("Failed to write maze graph to text file {}", file_path))?;

    Ok(())
}
