use image::{ImageBuffer, Rgb};
use log::info;
use std::path::Path;

use crate::cells::GridValue;
use crate::errors::*;
use crate::grid::Grid;

pub type MazeImage = ImageBuffer<Rgb<u8>, Vec<u8>>;

const DEFAULT_CELL_PIXELS: u8 = 10;

#[derive(Debug, Clone)]
pub struct RenderOptions<'path> {
    cell_pixels: u8,
    wall_colour: Rgb<u8>,
    empty_colour: Rgb<u8>,
    path_colour: Rgb<u8>,
    output_file: Option<&'path Path>,
}

impl<'path> RenderOptions<'path> {
    pub fn cell_pixels(&self) -> u8 {
        self.cell_pixels
    }

    pub fn output_file(&self) -> Option<&'path Path> {
        self.output_file
    }

    fn colour(&self, value: GridValue) -> Rgb<u8> {
        match value {
            GridValue::Wall => self.wall_colour,
            GridValue::Empty => self.empty_colour,
            GridValue::Path => self.path_colour,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RenderOptionsBuilder<'path> {
    options: RenderOptions<'path>,
}

impl<'path> RenderOptionsBuilder<'path> {
    pub fn new() -> RenderOptionsBuilder<'path> {
        RenderOptionsBuilder {
            options: RenderOptions {
                cell_pixels: DEFAULT_CELL_PIXELS,
                wall_colour: Rgb { data: [0x20, 0x20, 0x20] },
                empty_colour: Rgb { data: [0xff, 0xff, 0xff] },
                path_colour: Rgb { data: [0xd0, 0x30, 0x30] },
                output_file: None,
            },
        }
    }

    /// Side length in pixels of one raw grid position. Zero is bumped to one.
    pub fn cell_pixels(mut self, pixels: u8) -> Self {
        self.options.cell_pixels = pixels.max(1);
        self
    }
    pub fn wall_colour(mut self, colour: [u8; 3]) -> Self {
        self.options.wall_colour = Rgb { data: colour };
        self
    }
    pub fn empty_colour(mut self, colour: [u8; 3]) -> Self {
        self.options.empty_colour = Rgb { data: colour };
        self
    }
    pub fn path_colour(mut self, colour: [u8; 3]) -> Self {
        self.options.path_colour = Rgb { data: colour };
        self
    }
    pub fn output_file(mut self, path: Option<&'path Path>) -> Self {
        self.options.output_file = path;
        self
    }
    pub fn build(self) -> RenderOptions<'path> {
        self.options
    }
}

impl<'path> Default for RenderOptionsBuilder<'path> {
    fn default() -> Self {
        RenderOptionsBuilder::new()
    }
}

/// Paint every raw position of the grid as a solid square.
pub fn render_image(grid: &Grid, options: &RenderOptions) -> Result<MazeImage> {

    let (raw_width, raw_height) = grid.raw_dimensions();
    let pixels = options.cell_pixels as usize;
    let too_large = || ErrorKind::InvalidDimensions(grid.width(), grid.height());

    let image_width = raw_width.0.checked_mul(pixels).filter(|w| *w <= u32::MAX as usize).ok_or_else(too_large)?;
    let image_height = raw_height.0.checked_mul(pixels).filter(|h| *h <= u32::MAX as usize).ok_or_else(too_large)?;

    let mut image = MazeImage::new(image_width as u32, image_height as u32);
    for (y, row) in grid.raw_rows().enumerate() {
        for (x, value) in row.iter().enumerate() {
            let colour = options.colour(*value);
            let (x0, y0) = (x * pixels, y * pixels);
            for py in y0..y0 + pixels {
                for px in x0..x0 + pixels {
                    image.put_pixel(px as u32, py as u32, colour);
                }
            }
        }
    }

    Ok(image)
}

/// Render the grid and save it as a PNG when an output file is set.
pub fn render_png(grid: &Grid, options: &RenderOptions) -> Result<MazeImage> {
    let image = render_image(grid, options)?;

    if let Some(path) = options.output_file {
        image.save(path)
            .chain_err(|| format!("Failed to save maze image to {}", path.display()))?;
        info!("saved {}x{} pixel maze image to {}", image.width(), image.height(), path.display());
    }

    Ok(image)
}
