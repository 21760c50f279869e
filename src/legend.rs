//! Human-readable grids.
//!
//! A legend is an ordered string of symbols. Grid value `i` stands for the `i`-th symbol and
//! value 0 (the first symbol) is the empty background. Paired with a [`PaletteTable`], the
//! legend also gives the palette to save the grid with.

use std::path::Path;
use voxhelper_common::color::rgba_record_to_argb;
use voxhelper_common::types::PackedColor;
use voxhelper_common::{Result, VoxError};
use voxhelper_palette::PaletteTable;
use voxhelper_vox::{VoxModel, PALETTE_SIZE};

/// Largest legend whose every index survives a save and reload.
pub const MAX_SYMBOLS: usize = PALETTE_SIZE - 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Legend {
    symbols: Vec<char>,
}

/// A dense grid small enough for the on-disk format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolGrid {
    pub voxels: Vec<u8>,
    pub width: u8,
    pub height: u8,
    pub depth: u8,
}

impl Legend {
    pub fn new(symbols: &str) -> Result<Self> {
        let mut chars: Vec<char> = Vec::new();
        for c in symbols.chars() {
            if chars.contains(&c) {
                return Err(VoxError::DuplicateSymbol(c));
            }
            chars.push(c);
        }
        // The writer stores `index + 1`, so index 255 would come back as an empty cell.
        if chars.is_empty() || chars.len() > MAX_SYMBOLS {
            return Err(VoxError::InvalidGrid(format!(
                "A legend needs 1 to {} symbols, got {}",
                MAX_SYMBOLS,
                chars.len()
            )));
        }
        Ok(Self { symbols: chars })
    }

    pub fn index_of(&self, symbol: char) -> Option<u8> {
        self.symbols
            .iter()
            .position(|&c| c == symbol)
            .map(|i| i as u8)
    }

    pub fn symbol(&self, index: u8) -> Option<char> {
        self.symbols.get(index as usize).copied()
    }

    /// Palette for grids encoded with this legend, one color per symbol.
    pub fn colors(&self, table: &PaletteTable) -> Result<Vec<PackedColor>> {
        let symbols: String = self.symbols.iter().collect();
        table.colors_for(&symbols)
    }

    /// Parses a text grid. Layers (z) are separated by blank lines, each line of a layer
    /// is a row (y) and each character a cell (x).
    pub fn encode(&self, text: &str) -> Result<SymbolGrid> {
        let mut layers: Vec<Vec<&str>> = Vec::new();
        let mut current: Vec<&str> = Vec::new();
        for line in text.lines() {
            let line = line.strip_suffix('\r').unwrap_or(line);
            if line.trim().is_empty() {
                if !current.is_empty() {
                    layers.push(std::mem::take(&mut current));
                }
            } else {
                current.push(line);
            }
        }
        if !current.is_empty() {
            layers.push(current);
        }

        let depth = layers.len();
        let height = layers.first().map_or(0, |layer| layer.len());
        let width = layers
            .first()
            .and_then(|layer| layer.first())
            .map_or(0, |row| row.chars().count());
        let width = grid_dimension("width", width)?;
        let height = grid_dimension("height", height)?;
        let depth = grid_dimension("depth", depth)?;

        let mut voxels = Vec::with_capacity(width as usize * height as usize * depth as usize);
        for (z, layer) in layers.iter().enumerate() {
            if layer.len() != height as usize {
                return Err(VoxError::InvalidGrid(format!(
                    "Layer {} has {} rows, expected {}",
                    z,
                    layer.len(),
                    height
                )));
            }
            for (y, row) in layer.iter().enumerate() {
                let before = voxels.len();
                for c in row.chars() {
                    voxels.push(self.index_of(c).ok_or(VoxError::UnknownSymbol(c))?);
                }
                if voxels.len() - before != width as usize {
                    return Err(VoxError::InvalidGrid(format!(
                        "Row {} of layer {} has {} cells, expected {}",
                        y,
                        z,
                        voxels.len() - before,
                        width
                    )));
                }
            }
        }

        Ok(SymbolGrid {
            voxels,
            width,
            height,
            depth,
        })
    }

    /// Renders a grid back to text, `?` for values outside the legend.
    pub fn decode(&self, grid: &SymbolGrid) -> String {
        let (w, h) = (grid.width as usize, grid.height as usize);
        let mut layers = Vec::with_capacity(grid.depth as usize);
        for layer in grid.voxels.chunks((w * h).max(1)).take(grid.depth as usize) {
            let rows: Vec<String> = layer
                .chunks(w.max(1))
                .map(|row| row.iter().map(|&v| self.symbol(v).unwrap_or('?')).collect())
                .collect();
            layers.push(rows.join("\n"));
        }
        layers.join("\n\n")
    }
}

impl SymbolGrid {
    /// Saves the grid with `palette`, normally [`Legend::colors`].
    pub fn save<P: AsRef<Path>>(&self, palette: &[PackedColor], path: P) -> Result<()> {
        voxhelper_vox::save(&self.voxels, self.width, self.height, self.depth, palette, path)
    }
}

/// Symbol of every cell of a loaded model, `None` for empty cells and colors the table
/// doesn't know.
pub fn symbols_in_model(model: &VoxModel, table: &PaletteTable) -> Vec<Option<char>> {
    model
        .voxels()
        .iter()
        .map(|&v| {
            model
                .palette_color(v)
                .map(rgba_record_to_argb)
                .and_then(|argb| table.symbol(argb))
        })
        .collect()
}

fn grid_dimension(axis: &str, value: usize) -> Result<u8> {
    match u8::try_from(value) {
        Ok(v) if v > 0 => Ok(v),
        _ => Err(VoxError::InvalidGrid(format!(
            "Grid {} must be between 1 and 255, got {}",
            axis, value
        ))),
    }
}
