pub mod common;
pub mod gradient;
pub mod quadratic_map;
