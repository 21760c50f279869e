use std::error::Error;
use std::fmt;
use std::io;

#[derive(Debug)]
pub enum VoxError {
    IoError(io::Error),
    /// The stream ended in the middle of a header or record.
    TruncatedStream,
    MalformedChunk(String),
    /// A voxel record pointed outside the grid declared by `SIZE`.
    OutOfBounds { x: u32, y: u32, z: u32 },
    InvalidGrid(String),
    PaletteError(String),
    DuplicateSymbol(char),
    DuplicateColor(u32),
    UnknownSymbol(char),
}

impl fmt::Display for VoxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VoxError::IoError(err) => write!(f, "IO error: {}", err),
            VoxError::TruncatedStream => write!(f, "Truncated stream"),
            VoxError::MalformedChunk(msg) => write!(f, "Malformed chunk: {}", msg),
            VoxError::OutOfBounds { x, y, z } => {
                write!(f, "Voxel ({}, {}, {}) is outside the grid", x, y, z)
            }
            VoxError::InvalidGrid(msg) => write!(f, "Invalid grid: {}", msg),
            VoxError::PaletteError(msg) => write!(f, "Palette error: {}", msg),
            VoxError::DuplicateSymbol(symbol) => write!(f, "Duplicate palette symbol '{}'", symbol),
            VoxError::DuplicateColor(color) => write!(f, "Duplicate palette color {:#010X}", color),
            VoxError::UnknownSymbol(symbol) => write!(f, "Unknown symbol '{}'", symbol),
        }
    }
}

impl Error for VoxError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            VoxError::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for VoxError {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::UnexpectedEof => VoxError::TruncatedStream,
            _ => VoxError::IoError(err),
        }
    }
}
