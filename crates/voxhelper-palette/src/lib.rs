//! Symbol to color table used to turn human-readable grids into palettes and back.

pub mod resource;
pub mod table;

pub use table::PaletteTable;
