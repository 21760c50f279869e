use crate::chunk::{
    xyzi_content_len, ChunkHeader, ChunkId, PACK_CONTENT_LEN, RGBA_CONTENT_LEN,
    SIZE_CONTENT_LEN,
};
use crate::primitives::VoxWriteExt;
use crate::{MAGIC, PALETTE_SIZE, VERSION};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use voxhelper_common::color::rgb_channels;
use voxhelper_common::types::PackedColor;
use voxhelper_common::{Result, VoxError};
use voxhelper_logger::log;
use voxhelper_logger::LogSeverity::Debug;

/// Saves a dense grid and its palette to `path`.
///
/// Bad input is rejected before the file is created. An I/O failure after that is returned
/// as is and may leave a partial file behind.
pub fn save<P: AsRef<Path>>(
    voxels: &[u8],
    width: u8,
    height: u8,
    depth: u8,
    palette: &[PackedColor],
    path: P,
) -> Result<()> {
    validate(voxels, width, height, depth, palette)?;

    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    write_validated(&mut writer, voxels, width, height, depth, palette)?;
    writer.flush()?;

    log(
        format!("Saved {}x{}x{} model to {}", width, height, depth, path.display()),
        Debug,
    );
    Ok(())
}

/// Writes a dense grid and its palette as a complete vox stream.
///
/// Every non-zero cell becomes an `(x, y, z, value + 1)` record, in z, y, x order. Palette
/// entries are ARGB; only their RGB bytes are written. Slots past the end of `palette` are
/// filled with a descending gray ramp.
pub fn write_vox<W: Write>(
    writer: &mut W,
    voxels: &[u8],
    width: u8,
    height: u8,
    depth: u8,
    palette: &[PackedColor],
) -> Result<()> {
    validate(voxels, width, height, depth, palette)?;
    write_validated(writer, voxels, width, height, depth, palette)
}

/// Body of [`write_vox`] for input that already passed [`validate`].
fn write_validated<W: Write>(
    writer: &mut W,
    voxels: &[u8],
    width: u8,
    height: u8,
    depth: u8,
    palette: &[PackedColor],
) -> Result<()> {
    let records = collect_records(voxels, width, height, depth);

    writer.write_tag(&MAGIC)?;
    writer.write_i32_le(VERSION)?;

    ChunkHeader::new(ChunkId::Main, 0, children_len(records.len())).write(writer)?;

    ChunkHeader::leaf(ChunkId::Pack, PACK_CONTENT_LEN).write(writer)?;
    writer.write_i32_le(1)?;

    ChunkHeader::leaf(ChunkId::Size, SIZE_CONTENT_LEN).write(writer)?;
    writer.write_i32_le(width as i32)?;
    writer.write_i32_le(height as i32)?;
    writer.write_i32_le(depth as i32)?;

    ChunkHeader::leaf(ChunkId::Xyzi, xyzi_content_len(records.len())).write(writer)?;
    writer.write_i32_le(records.len() as i32)?;
    for record in &records {
        writer.write_record(*record)?;
    }

    ChunkHeader::leaf(ChunkId::Rgba, RGBA_CONTENT_LEN).write(writer)?;
    for &color in palette {
        let (r, g, b) = rgb_channels(color);
        writer.write_record([r, g, b, 0])?;
    }
    for slot in palette.len()..PALETTE_SIZE {
        writer.write_record(filler_record(slot))?;
    }

    // Readers of this format expect one pad byte after the palette.
    writer.write_all(&[0])?;
    Ok(())
}

/// Byte size of everything nested under `MAIN` for a model with `voxel_count` records.
pub fn children_len(voxel_count: usize) -> i32 {
    [
        ChunkHeader::leaf(ChunkId::Pack, PACK_CONTENT_LEN),
        ChunkHeader::leaf(ChunkId::Size, SIZE_CONTENT_LEN),
        ChunkHeader::leaf(ChunkId::Xyzi, xyzi_content_len(voxel_count)),
        ChunkHeader::leaf(ChunkId::Rgba, RGBA_CONTENT_LEN),
    ]
    .iter()
    .map(|h| h.encoded_len() as i32)
    .sum()
}

/// Record written for an unused palette slot.
pub fn filler_record(slot: usize) -> [u8; 4] {
    let gray = 0xFFu8.wrapping_sub(slot as u8).wrapping_sub(1);
    [gray, gray, gray, 0xFF]
}

fn validate(
    voxels: &[u8],
    width: u8,
    height: u8,
    depth: u8,
    palette: &[PackedColor],
) -> Result<()> {
    let expected = width as usize * height as usize * depth as usize;
    if voxels.len() != expected {
        return Err(VoxError::InvalidGrid(format!(
            "{} voxels given for a {}x{}x{} grid ({} cells)",
            voxels.len(),
            width,
            height,
            depth,
            expected
        )));
    }
    if palette.len() > PALETTE_SIZE {
        return Err(VoxError::InvalidGrid(format!(
            "Palette has {} colors, at most {} fit",
            palette.len(),
            PALETTE_SIZE
        )));
    }
    Ok(())
}

fn collect_records(voxels: &[u8], width: u8, height: u8, depth: u8) -> Vec<[u8; 4]> {
    let (w, h) = (width as usize, height as usize);
    let mut records = Vec::new();
    for z in 0..depth {
        for y in 0..height {
            for x in 0..width {
                let v = voxels[x as usize + y as usize * w + z as usize * w * h];
                if v != 0 {
                    // On-disk index 0 means "no voxel", so everything shifts up by one.
                    // 255 wraps to 0.
                    records.push([x, y, z, v.wrapping_add(1)]);
                }
            }
        }
    }
    records
}
