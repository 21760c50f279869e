pub type Result<T> = std::result::Result<T, crate::error::VoxError>;

/// A 32-bit packed color. Which byte holds which channel depends on where the value came
/// from, see [`crate::color`].
pub type PackedColor = u32;
