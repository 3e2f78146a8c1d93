pub mod cancel;
pub mod color_map;
pub mod display;
pub mod file_io;
pub mod histogram;
pub mod interpolation;
pub mod lookup_table;
pub mod menu;
pub mod scan_renderer;
pub mod stopwatch;
pub mod viewport;
