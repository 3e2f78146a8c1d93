use std::sync::mpsc::Sender;

use image::RgbImage;

use crate::core::color_map::Palette;
use crate::core::viewport::create_buffer;
use crate::fractals::gradient::ColorIndex;

/// Glyph advance of the fixed-width display font, in pixels.
pub const FONT_GLYPH_WIDTH: u32 = 8;
pub const FONT_HEIGHT: u32 = 8;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DisplayError {
    #[error("pixel ({x}, {y}) is outside of the {width}x{height} display")]
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },
    #[error("vertical line from row {y_start} to row {y_end} is reversed")]
    ReversedLine { y_start: u32, y_end: u32 },
    #[error("display backend is disconnected")]
    Disconnected,
}

/**
 * Immediate-mode raster display. Draw calls are applied in the order they are
 * issued, so later draws overwrite earlier ones.
 */
pub trait DisplayBackend {
    fn resolution(&self) -> nalgebra::Vector2<u32>;

    /// Fills the entire display with color 0.
    fn clear_screen(&mut self) -> Result<(), DisplayError>;

    /// Draws the inclusive row range `[y_start, y_end]` of column `x`.
    fn draw_vertical_line(
        &mut self,
        x: u32,
        y_start: u32,
        y_end: u32,
        color: ColorIndex,
    ) -> Result<(), DisplayError>;

    fn set_pixel(&mut self, x: u32, y: u32, color: ColorIndex) -> Result<(), DisplayError>;

    fn string_width(&self, text: &str) -> u32 {
        FONT_GLYPH_WIDTH * text.chars().count() as u32
    }

    fn draw_text(&mut self, text: &str, x: u32, y: u32, color: ColorIndex)
        -> Result<(), DisplayError>;
}

/// A single draw call, as sent through a `ChannelDisplay`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DrawCommand {
    ClearScreen,
    VerticalLine {
        x: u32,
        y_start: u32,
        y_end: u32,
        color: ColorIndex,
    },
    Pixel {
        x: u32,
        y: u32,
        color: ColorIndex,
    },
    Text(TextLabel),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextLabel {
    pub text: String,
    pub x: u32,
    pub y: u32,
    pub color: ColorIndex,
}

/**
 * In-memory indexed-color raster, stored column-major (`data[x][y]`) to match
 * the column scan order of the renderer. Text is not rasterized; it is kept
 * as a list of labels that is dropped whenever the screen is cleared.
 */
#[derive(Clone, Debug)]
pub struct FrameBuffer {
    resolution: nalgebra::Vector2<u32>,
    data: Vec<Vec<ColorIndex>>,
    labels: Vec<TextLabel>,
}

impl FrameBuffer {
    pub fn new(resolution: nalgebra::Vector2<u32>) -> FrameBuffer {
        FrameBuffer {
            resolution,
            data: create_buffer(0, &resolution),
            labels: Vec::new(),
        }
    }

    pub fn width(&self) -> u32 {
        self.resolution[0]
    }

    pub fn height(&self) -> u32 {
        self.resolution[1]
    }

    pub fn pixel(&self, x: u32, y: u32) -> ColorIndex {
        self.data[x as usize][y as usize]
    }

    pub fn labels(&self) -> &[TextLabel] {
        &self.labels
    }

    /// Pixel data in row-major order, one byte per pixel.
    pub fn to_row_major_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity((self.width() * self.height()) as usize);
        for y in 0..self.height() as usize {
            for column in self.data.iter() {
                bytes.push(column[y]);
            }
        }
        bytes
    }

    pub fn to_image(&self, palette: &Palette) -> RgbImage {
        let mut imgbuf = RgbImage::new(self.width(), self.height());
        for (x, y, pixel) in imgbuf.enumerate_pixels_mut() {
            *pixel = palette.rgb(self.pixel(x, y));
        }
        imgbuf
    }

    /// Writes the frame into an RGBA screen buffer (row-major, 4 bytes per pixel).
    pub fn write_rgba_frame(&self, palette: &Palette, screen: &mut [u8]) {
        debug_assert_eq!(screen.len(), (4 * self.width() * self.height()) as usize);
        let array_skip = self.width() as usize;
        for (flat_index, pixel) in screen.chunks_exact_mut(4).enumerate() {
            let y = flat_index / array_skip;
            let x = flat_index % array_skip;
            let rgb = palette.rgb(self.data[x][y]);
            pixel.copy_from_slice(&[rgb[0], rgb[1], rgb[2], 255]);
        }
    }

    pub fn apply(&mut self, command: &DrawCommand) -> Result<(), DisplayError> {
        match command {
            DrawCommand::ClearScreen => self.clear_screen(),
            DrawCommand::VerticalLine {
                x,
                y_start,
                y_end,
                color,
            } => self.draw_vertical_line(*x, *y_start, *y_end, *color),
            DrawCommand::Pixel { x, y, color } => self.set_pixel(*x, *y, *color),
            DrawCommand::Text(label) => self.draw_text(&label.text, label.x, label.y, label.color),
        }
    }

    fn check_bounds(&self, x: u32, y: u32) -> Result<(), DisplayError> {
        if x < self.width() && y < self.height() {
            Ok(())
        } else {
            Err(DisplayError::OutOfBounds {
                x,
                y,
                width: self.width(),
                height: self.height(),
            })
        }
    }
}

impl DisplayBackend for FrameBuffer {
    fn resolution(&self) -> nalgebra::Vector2<u32> {
        self.resolution
    }

    fn clear_screen(&mut self) -> Result<(), DisplayError> {
        for column in self.data.iter_mut() {
            column.fill(0);
        }
        self.labels.clear();
        Ok(())
    }

    fn draw_vertical_line(
        &mut self,
        x: u32,
        y_start: u32,
        y_end: u32,
        color: ColorIndex,
    ) -> Result<(), DisplayError> {
        if y_end < y_start {
            return Err(DisplayError::ReversedLine { y_start, y_end });
        }
        self.check_bounds(x, y_end)?;
        self.data[x as usize][y_start as usize..=y_end as usize].fill(color);
        Ok(())
    }

    fn set_pixel(&mut self, x: u32, y: u32, color: ColorIndex) -> Result<(), DisplayError> {
        self.check_bounds(x, y)?;
        self.data[x as usize][y as usize] = color;
        Ok(())
    }

    fn draw_text(
        &mut self,
        text: &str,
        x: u32,
        y: u32,
        color: ColorIndex,
    ) -> Result<(), DisplayError> {
        self.labels.push(TextLabel {
            text: text.to_owned(),
            x,
            y,
            color,
        });
        Ok(())
    }
}

/**
 * Display backend that forwards every draw call, in order, to another thread.
 * The receiving side applies them to its own `FrameBuffer`.
 */
pub struct ChannelDisplay {
    resolution: nalgebra::Vector2<u32>,
    sender: Sender<DrawCommand>,
}

impl ChannelDisplay {
    pub fn new(resolution: nalgebra::Vector2<u32>, sender: Sender<DrawCommand>) -> ChannelDisplay {
        ChannelDisplay { resolution, sender }
    }

    fn send(&self, command: DrawCommand) -> Result<(), DisplayError> {
        self.sender
            .send(command)
            .map_err(|_| DisplayError::Disconnected)
    }
}

impl DisplayBackend for ChannelDisplay {
    fn resolution(&self) -> nalgebra::Vector2<u32> {
        self.resolution
    }

    fn clear_screen(&mut self) -> Result<(), DisplayError> {
        self.send(DrawCommand::ClearScreen)
    }

    fn draw_vertical_line(
        &mut self,
        x: u32,
        y_start: u32,
        y_end: u32,
        color: ColorIndex,
    ) -> Result<(), DisplayError> {
        self.send(DrawCommand::VerticalLine {
            x,
            y_start,
            y_end,
            color,
        })
    }

    fn set_pixel(&mut self, x: u32, y: u32, color: ColorIndex) -> Result<(), DisplayError> {
        self.send(DrawCommand::Pixel { x, y, color })
    }

    fn draw_text(
        &mut self,
        text: &str,
        x: u32,
        y: u32,
        color: ColorIndex,
    ) -> Result<(), DisplayError> {
        self.send(DrawCommand::Text(TextLabel {
            text: text.to_owned(),
            x,
            y,
            color,
        }))
    }
}
