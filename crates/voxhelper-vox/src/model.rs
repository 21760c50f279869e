use crate::PALETTE_SIZE;
use voxhelper_common::types::PackedColor;
use voxhelper_common::{Result, VoxError};

/// A single model as read from a vox stream.
///
/// Voxels are stored densely at `x + y * width + z * width * height`. A value of 0 is an
/// empty cell; any other value is the on-disk color index, which refers to palette slot
/// `value - 1`. Palette entries keep the reader's packing (see [`voxhelper_common::color`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoxModel {
    width: u32,
    height: u32,
    depth: u32,
    voxels: Vec<u8>,
    palette: [PackedColor; PALETTE_SIZE],
}

impl VoxModel {
    /// Allocates an empty grid from the dimensions found in a `SIZE` chunk.
    pub fn allocate(width: i32, height: i32, depth: i32) -> Result<Self> {
        let (Ok(w), Ok(h), Ok(d)) = (
            u32::try_from(width),
            u32::try_from(height),
            u32::try_from(depth),
        ) else {
            return Err(VoxError::MalformedChunk(format!(
                "Negative model size {}x{}x{}",
                width, height, depth
            )));
        };
        Self::new(w, h, d)
    }

    pub fn new(width: u32, height: u32, depth: u32) -> Result<Self> {
        let cells = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(depth as usize))
            .ok_or_else(|| {
                VoxError::MalformedChunk(format!(
                    "Model size {}x{}x{} overflows",
                    width, height, depth
                ))
            })?;

        let mut voxels = Vec::new();
        voxels.try_reserve_exact(cells).map_err(|e| {
            VoxError::MalformedChunk(format!("Cannot allocate {} voxels: {}", cells, e))
        })?;
        voxels.resize(cells, 0);

        Ok(Self {
            width,
            height,
            depth,
            voxels,
            palette: [0; PALETTE_SIZE],
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// `(width, height, depth)`
    pub fn dimensions(&self) -> (u32, u32, u32) {
        (self.width, self.height, self.depth)
    }

    pub fn voxels(&self) -> &[u8] {
        &self.voxels
    }

    pub fn palette(&self) -> &[PackedColor; PALETTE_SIZE] {
        &self.palette
    }

    pub fn set_palette(&mut self, palette: [PackedColor; PALETTE_SIZE]) {
        self.palette = palette;
    }

    /// Flat index of a cell, `None` if any coordinate is outside the grid.
    pub fn index(&self, x: u32, y: u32, z: u32) -> Option<usize> {
        if x >= self.width || y >= self.height || z >= self.depth {
            return None;
        }
        let (w, h) = (self.width as usize, self.height as usize);
        Some(x as usize + y as usize * w + z as usize * w * h)
    }

    pub fn get(&self, x: u32, y: u32, z: u32) -> Option<u8> {
        self.index(x, y, z).map(|i| self.voxels[i])
    }

    pub fn set(&mut self, x: u32, y: u32, z: u32, value: u8) -> Result<()> {
        let i = self
            .index(x, y, z)
            .ok_or(VoxError::OutOfBounds { x, y, z })?;
        self.voxels[i] = value;
        Ok(())
    }

    /// Number of non-empty cells.
    pub fn voxel_count(&self) -> usize {
        self.voxels.iter().filter(|&&v| v != 0).count()
    }

    /// Palette entry referenced by an on-disk color index. Index 0 is empty and has none.
    pub fn palette_color(&self, index: u8) -> Option<PackedColor> {
        match index {
            0 => None,
            i => Some(self.palette[i as usize - 1]),
        }
    }
}
