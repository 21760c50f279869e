use crate::primitives::{VoxReadExt, VoxWriteExt};
use crate::PALETTE_SIZE;
use byteorder::{ByteOrder, LittleEndian};
use std::fmt;
use std::io::{self, Read, Write};
use voxhelper_common::{Result, VoxError};

/// Bytes taken by a chunk header: tag, content length, child length.
pub const HEADER_LEN: usize = 12;

pub const PACK_CONTENT_LEN: i32 = 4;
pub const SIZE_CONTENT_LEN: i32 = 12;
pub const RGBA_CONTENT_LEN: i32 = (PALETTE_SIZE * 4) as i32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChunkId {
    /// Root container. Carries no content, the model chunks follow it as children.
    Main,
    /// Model count.
    Pack,
    /// Grid dimensions.
    Size,
    /// Sparse voxel records.
    Xyzi,
    /// 256 palette records.
    Rgba,
    Other([u8; 4]),
}

impl ChunkId {
    pub fn from_tag(tag: [u8; 4]) -> Self {
        match &tag {
            b"MAIN" => ChunkId::Main,
            b"PACK" => ChunkId::Pack,
            b"SIZE" => ChunkId::Size,
            b"XYZI" => ChunkId::Xyzi,
            b"RGBA" => ChunkId::Rgba,
            _ => ChunkId::Other(tag),
        }
    }

    pub fn tag(&self) -> [u8; 4] {
        match self {
            ChunkId::Main => *b"MAIN",
            ChunkId::Pack => *b"PACK",
            ChunkId::Size => *b"SIZE",
            ChunkId::Xyzi => *b"XYZI",
            ChunkId::Rgba => *b"RGBA",
            ChunkId::Other(tag) => *tag,
        }
    }
}

impl fmt::Display for ChunkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.tag()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkHeader {
    pub id: ChunkId,
    pub content_len: i32,
    pub child_len: i32,
}

impl ChunkHeader {
    pub fn new(id: ChunkId, content_len: i32, child_len: i32) -> Self {
        Self {
            id,
            content_len,
            child_len,
        }
    }

    /// Header for a chunk without children.
    pub fn leaf(id: ChunkId, content_len: i32) -> Self {
        Self::new(id, content_len, 0)
    }

    /// Reads the next header. Returns `None` when the stream ends on a chunk boundary, or
    /// when all that is left is a short run of zero bytes (the pad after the last chunk).
    pub fn read<R: Read>(reader: &mut R) -> Result<Option<Self>> {
        let mut buf = [0u8; HEADER_LEN];
        let filled = reader.read_up_to(&mut buf)?;
        if filled == 0 {
            return Ok(None);
        }
        if filled < HEADER_LEN {
            if buf[..filled].iter().all(|&b| b == 0) {
                return Ok(None);
            }
            return Err(VoxError::TruncatedStream);
        }

        let mut tag = [0u8; 4];
        tag.copy_from_slice(&buf[..4]);
        Ok(Some(Self {
            id: ChunkId::from_tag(tag),
            content_len: LittleEndian::read_i32(&buf[4..8]),
            child_len: LittleEndian::read_i32(&buf[8..12]),
        }))
    }

    pub fn write<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_tag(&self.id.tag())?;
        writer.write_i32_le(self.content_len)?;
        writer.write_i32_le(self.child_len)
    }

    /// Bytes taken by this chunk on disk, children excluded.
    pub fn encoded_len(&self) -> usize {
        HEADER_LEN + self.content_len.max(0) as usize
    }
}

/// Content length of an `XYZI` chunk holding `count` voxels.
pub fn xyzi_content_len(count: usize) -> i32 {
    4 + 4 * count as i32
}
