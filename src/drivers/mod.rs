//! GPIO register map and output-line helpers.

pub mod led_line;
pub mod register_map;
