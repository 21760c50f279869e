//! Reader and writer for the chunked `.vox` voxel model format (version 150).
//!
//! A file is a 4 byte magic and a version integer followed by a flat stream of chunks.
//! Each chunk is a 4 byte ASCII tag, a content length, a child length and the content
//! itself. Only one model is read or written; the consumed chunks are `MAIN`, `PACK`,
//! `SIZE`, `XYZI` and `RGBA`, anything else is skipped.

pub mod async_fs;
pub mod chunk;
pub mod model;
pub mod primitives;
pub mod reader;
pub mod writer;

pub use async_fs::{load_async, save_async};
pub use model::VoxModel;
pub use reader::{load, read_vox};
pub use writer::{save, write_vox};

/// File magic, including the trailing space.
pub const MAGIC: [u8; 4] = *b"VOX ";

/// Format version written into every file.
pub const VERSION: i32 = 150;

/// Number of entries in an on-disk palette.
pub const PALETTE_SIZE: usize = 256;
