//! Tokio file helpers. The file is read or written in one piece and the codec runs on the
//! in-memory buffer, so results match [`crate::load`] and [`crate::save`].

use crate::model::VoxModel;
use crate::reader::read_vox;
use crate::writer::write_vox;
use std::io::Cursor;
use std::path::Path;
use voxhelper_common::types::PackedColor;
use voxhelper_common::Result;

pub async fn load_async<P: AsRef<Path>>(path: P) -> Result<VoxModel> {
    let bytes = tokio::fs::read(path).await?;
    read_vox(&mut Cursor::new(bytes))
}

pub async fn save_async<P: AsRef<Path>>(
    voxels: &[u8],
    width: u8,
    height: u8,
    depth: u8,
    palette: &[PackedColor],
    path: P,
) -> Result<()> {
    let mut buffer = Vec::new();
    write_vox(&mut buffer, voxels, width, height, depth, palette)?;
    tokio::fs::write(path, buffer).await?;
    Ok(())
}
