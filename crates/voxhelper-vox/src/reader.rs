use crate::chunk::{ChunkHeader, ChunkId};
use crate::model::VoxModel;
use crate::primitives::VoxReadExt;
use crate::PALETTE_SIZE;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use voxhelper_common::color::pack_rgba_record;
use voxhelper_common::types::PackedColor;
use voxhelper_common::{Result, VoxError};
use voxhelper_logger::LogSeverity::{Debug, Warning};
use voxhelper_logger::log;

/// Loads a model from a file. Either the whole model comes back or an error does.
pub fn load<P: AsRef<Path>>(path: P) -> Result<VoxModel> {
    let path = path.as_ref();
    let result = File::open(path)
        .map_err(VoxError::from)
        .and_then(|file| read_vox(&mut BufReader::new(file)));

    match &result {
        Ok(model) => log(
            format!(
                "Loaded {} ({}x{}x{}, {} voxels)",
                path.display(),
                model.width(),
                model.height(),
                model.depth(),
                model.voxel_count()
            ),
            Debug,
        ),
        Err(err) => log(format!("Failed to load {}: {}", path.display(), err), Warning),
    }
    result
}

/// Reads a whole vox stream.
///
/// The magic and version are consumed without being checked; the chunk tags decide what
/// gets parsed. `MAIN` is only a header, its children follow as ordinary chunks.
pub fn read_vox<R: Read>(reader: &mut R) -> Result<VoxModel> {
    let magic = reader.read_tag()?;
    let version = reader.read_i32_le()?;
    log(
        format!(
            "Reading '{}' stream, version {}",
            String::from_utf8_lossy(&magic),
            version
        ),
        Debug,
    );

    let mut model: Option<VoxModel> = None;
    let mut palette = [0 as PackedColor; PALETTE_SIZE];

    while let Some(header) = ChunkHeader::read(reader)? {
        match header.id {
            ChunkId::Main => continue,
            ChunkId::Pack => {
                // Only one model is supported, whatever the count says.
                let _model_count = reader.read_i32_le()?;
            }
            ChunkId::Size => {
                let width = reader.read_i32_le()?;
                let height = reader.read_i32_le()?;
                let depth = reader.read_i32_le()?;
                model = Some(VoxModel::allocate(width, height, depth)?);
            }
            ChunkId::Xyzi => {
                let model = model.as_mut().ok_or_else(|| {
                    VoxError::MalformedChunk("XYZI chunk before any SIZE chunk".to_owned())
                })?;
                read_voxels(reader, model)?;
            }
            ChunkId::Rgba => read_palette(reader, &mut palette)?,
            ChunkId::Other(_) => {
                let len = u64::try_from(header.content_len).map_err(|_| {
                    VoxError::MalformedChunk(format!(
                        "{} chunk has negative length {}",
                        header.id, header.content_len
                    ))
                })?;
                log(format!("Skipping {} chunk ({} bytes)", header.id, len), Debug);
                reader.skip_bytes(len)?;
            }
        }
    }

    let mut model =
        model.ok_or_else(|| VoxError::MalformedChunk("Missing SIZE chunk".to_owned()))?;
    model.set_palette(palette);
    Ok(model)
}

fn read_voxels<R: Read>(reader: &mut R, model: &mut VoxModel) -> Result<()> {
    let count = reader.read_i32_le()?;
    if count < 0 {
        return Err(VoxError::MalformedChunk(format!(
            "XYZI chunk has negative voxel count {}",
            count
        )));
    }
    for _ in 0..count {
        let [x, y, z, color] = reader.read_record()?;
        model.set(x as u32, y as u32, z as u32, color)?;
    }
    Ok(())
}

fn read_palette<R: Read>(reader: &mut R, palette: &mut [PackedColor; PALETTE_SIZE]) -> Result<()> {
    for entry in palette.iter_mut() {
        let [r, g, b, fourth] = reader.read_record()?;
        *entry = pack_rgba_record(r, g, b, fourth);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::{xyzi_content_len, RGBA_CONTENT_LEN, SIZE_CONTENT_LEN};
    use crate::primitives::VoxWriteExt;
    use crate::{MAGIC, VERSION};
    use assert_matches::assert_matches;
    use std::io::Cursor;

    fn header(buffer: &mut Vec<u8>) {
        buffer.write_tag(&MAGIC).unwrap();
        buffer.write_i32_le(VERSION).unwrap();
    }

    fn size_chunk(buffer: &mut Vec<u8>, w: i32, h: i32, d: i32) {
        ChunkHeader::leaf(ChunkId::Size, SIZE_CONTENT_LEN)
            .write(buffer)
            .unwrap();
        buffer.write_i32_le(w).unwrap();
        buffer.write_i32_le(h).unwrap();
        buffer.write_i32_le(d).unwrap();
    }

    fn xyzi_chunk(buffer: &mut Vec<u8>, records: &[[u8; 4]]) {
        ChunkHeader::leaf(ChunkId::Xyzi, xyzi_content_len(records.len()))
            .write(buffer)
            .unwrap();
        buffer.write_i32_le(records.len() as i32).unwrap();
        for record in records {
            buffer.write_record(*record).unwrap();
        }
    }

    #[test]
    fn test_read_minimal_model() {
        let mut buffer = Vec::new();
        header(&mut buffer);
        ChunkHeader::new(ChunkId::Main, 0, 0).write(&mut buffer).unwrap();
        size_chunk(&mut buffer, 2, 3, 4);
        xyzi_chunk(&mut buffer, &[[1, 2, 3, 7], [0, 0, 0, 1]]);

        let model = read_vox(&mut Cursor::new(buffer)).unwrap();
        assert_eq!(model.dimensions(), (2, 3, 4));
        assert_eq!(model.get(1, 2, 3), Some(7));
        assert_eq!(model.get(0, 0, 0), Some(1));
        assert_eq!(model.voxel_count(), 2);
        // No RGBA chunk, so the palette stays zeroed
        assert!(model.palette().iter().all(|&c| c == 0));
    }

    #[test]
    fn test_pack_count_is_ignored() {
        let mut buffer = Vec::new();
        header(&mut buffer);
        ChunkHeader::leaf(ChunkId::Pack, 4).write(&mut buffer).unwrap();
        buffer.write_i32_le(7).unwrap();
        size_chunk(&mut buffer, 1, 1, 1);

        let model = read_vox(&mut Cursor::new(buffer)).unwrap();
        assert_eq!(model.dimensions(), (1, 1, 1));
    }

    #[test]
    fn test_palette_packing() {
        let mut buffer = Vec::new();
        header(&mut buffer);
        size_chunk(&mut buffer, 1, 1, 1);
        ChunkHeader::leaf(ChunkId::Rgba, RGBA_CONTENT_LEN)
            .write(&mut buffer)
            .unwrap();
        for i in 0..PALETTE_SIZE {
            buffer.write_record([i as u8, 0x10, 0x20, 0xFF]).unwrap();
        }

        let model = read_vox(&mut Cursor::new(buffer)).unwrap();
        assert_eq!(model.palette()[0], 0x0010_20FF);
        assert_eq!(model.palette()[0xAB], 0xAB10_20FF);
    }

    #[test]
    fn test_unknown_chunk_is_skipped() {
        let mut buffer = Vec::new();
        header(&mut buffer);
        size_chunk(&mut buffer, 4, 4, 4);
        ChunkHeader::new(ChunkId::Other(*b"nTRN"), 6, 0)
            .write(&mut buffer)
            .unwrap();
        buffer.extend_from_slice(b"XYZI\x01\x02");
        xyzi_chunk(&mut buffer, &[[3, 2, 1, 5]]);

        let model = read_vox(&mut Cursor::new(buffer)).unwrap();
        assert_eq!(model.get(3, 2, 1), Some(5));
        assert_eq!(model.voxel_count(), 1);
    }

    #[test]
    fn test_xyzi_without_size() {
        let mut buffer = Vec::new();
        header(&mut buffer);
        xyzi_chunk(&mut buffer, &[[0, 0, 0, 1]]);

        assert_matches!(
            read_vox(&mut Cursor::new(buffer)),
            Err(VoxError::MalformedChunk(_))
        );
    }

    #[test]
    fn test_missing_size() {
        let mut buffer = Vec::new();
        header(&mut buffer);
        ChunkHeader::new(ChunkId::Main, 0, 0).write(&mut buffer).unwrap();

        assert_matches!(
            read_vox(&mut Cursor::new(buffer)),
            Err(VoxError::MalformedChunk(_))
        );
    }

    #[test]
    fn test_out_of_bounds_voxel() {
        let mut buffer = Vec::new();
        header(&mut buffer);
        size_chunk(&mut buffer, 2, 2, 2);
        // x == width still lands inside the flat array, but is outside the grid
        xyzi_chunk(&mut buffer, &[[2, 0, 0, 1]]);

        assert_matches!(
            read_vox(&mut Cursor::new(buffer)),
            Err(VoxError::OutOfBounds { x: 2, y: 0, z: 0 })
        );
    }

    #[test]
    fn test_truncated_records() {
        let mut buffer = Vec::new();
        header(&mut buffer);
        size_chunk(&mut buffer, 2, 2, 2);
        xyzi_chunk(&mut buffer, &[[0, 0, 0, 1], [1, 1, 1, 2]]);
        buffer.truncate(buffer.len() - 3);

        assert_matches!(
            read_vox(&mut Cursor::new(buffer)),
            Err(VoxError::TruncatedStream)
        );
    }

    #[test]
    fn test_truncated_header() {
        assert_matches!(
            read_vox(&mut Cursor::new(b"VOX \x96\x00".to_vec())),
            Err(VoxError::TruncatedStream)
        );
    }

    #[test]
    fn test_negative_lengths() {
        let mut buffer = Vec::new();
        header(&mut buffer);
        size_chunk(&mut buffer, 1, 1, 1);
        ChunkHeader::leaf(ChunkId::Other(*b"NOTE"), -4)
            .write(&mut buffer)
            .unwrap();
        assert_matches!(
            read_vox(&mut Cursor::new(buffer)),
            Err(VoxError::MalformedChunk(_))
        );

        let mut buffer = Vec::new();
        header(&mut buffer);
        size_chunk(&mut buffer, 1, 1, 1);
        ChunkHeader::leaf(ChunkId::Xyzi, 4).write(&mut buffer).unwrap();
        buffer.write_i32_le(-1).unwrap();
        assert_matches!(
            read_vox(&mut Cursor::new(buffer)),
            Err(VoxError::MalformedChunk(_))
        );
    }

    #[test]
    fn test_trailing_zero_pad() {
        let mut buffer = Vec::new();
        header(&mut buffer);
        size_chunk(&mut buffer, 1, 1, 1);
        xyzi_chunk(&mut buffer, &[[0, 0, 0, 3]]);
        buffer.extend_from_slice(&[0, 0, 0, 0]);

        let model = read_vox(&mut Cursor::new(buffer)).unwrap();
        assert_eq!(model.get(0, 0, 0), Some(3));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert_matches!(
            load(dir.path().join("missing.vox")),
            Err(VoxError::IoError(_))
        );
    }
}
