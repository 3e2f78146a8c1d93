pub mod cli;
pub mod core;
pub mod errors;
pub mod fractals;
