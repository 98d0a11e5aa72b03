pub mod text;

pub use text::{load_map, parse_map, upscale, write_map};
