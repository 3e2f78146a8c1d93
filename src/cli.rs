pub mod args;
pub mod color_swatch;
pub mod explore;
pub mod render;
