//! Packed color layouts.
//!
//! Two layouts meet in this workspace and they are not the same:
//!
//! * ARGB `0xAARRGGBB`: what the palette table hands out and what the writer consumes
//!   (it takes red, green and blue from bits 16, 8 and 0 and ignores the top byte).
//! * Loaded RGBA records `0xRRGGBBxx`: what the reader produces from an `RGBA` chunk, with
//!   the fourth byte of each record in the low byte.
//!
//! Files already written in this format depend on both layouts, so neither side is changed.
//! [`rgba_record_to_argb`] bridges a loaded entry back to opaque ARGB.

use crate::types::PackedColor;

pub const OPAQUE: PackedColor = 0xFF00_0000;

/// Forces full opacity on a 24-bit RGB value.
pub fn opaque(rgb: u32) -> PackedColor {
    OPAQUE | rgb
}

/// Red, green and blue of an ARGB color.
pub fn rgb_channels(argb: PackedColor) -> (u8, u8, u8) {
    (
        ((argb & 0x00FF_0000) >> 16) as u8,
        ((argb & 0x0000_FF00) >> 8) as u8,
        (argb & 0x0000_00FF) as u8,
    )
}

/// Packs one on-disk palette record the way the reader does.
pub fn pack_rgba_record(r: u8, g: u8, b: u8, fourth: u8) -> PackedColor {
    (r as u32) << 24 | (g as u32) << 16 | (b as u32) << 8 | fourth as u32
}

/// Converts a loaded palette entry into an opaque ARGB color. The fourth record byte is dropped.
pub fn rgba_record_to_argb(packed: PackedColor) -> PackedColor {
    opaque(packed >> 8)
}
