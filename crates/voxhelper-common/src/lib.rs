pub mod color;
pub mod error;
pub mod types;

pub use error::VoxError;
pub use types::Result;
