use serde::Deserialize;
use voxhelper_common::{Result, VoxError};

/// One `(symbol, hex color)` pair as written in a palette resource.
///
/// XML resources carry both as attributes: `<color symbol="R" value="FF004D"/>`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ColorEntry {
    #[serde(rename = "@symbol", alias = "symbol")]
    pub symbol: String,
    #[serde(rename = "@value", alias = "value")]
    pub value: String,
}

#[derive(Debug, Deserialize)]
struct XmlPalette {
    #[serde(rename = "color", default)]
    colors: Vec<ColorEntry>,
}

pub fn parse_xml(source: &str) -> Result<Vec<ColorEntry>> {
    let document: XmlPalette = quick_xml::de::from_str(source)
        .map_err(|e| VoxError::PaletteError(format!("Invalid palette XML: {}", e)))?;
    Ok(document.colors)
}

pub fn parse_json(source: &str) -> Result<Vec<ColorEntry>> {
    serde_json::from_str(source)
        .map_err(|e| VoxError::PaletteError(format!("Invalid palette JSON: {}", e)))
}

impl ColorEntry {
    pub fn symbol_char(&self) -> Result<char> {
        parse_symbol(&self.symbol)
    }

    pub fn rgb(&self) -> Result<u32> {
        parse_hex(&self.value)
    }
}

pub fn parse_symbol(symbol: &str) -> Result<char> {
    let mut chars = symbol.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(VoxError::PaletteError(format!(
            "Symbol '{}' must be a single character",
            symbol
        ))),
    }
}

/// Parses `RRGGBB` style hex, with an optional `#` or `0x` prefix.
pub fn parse_hex(value: &str) -> Result<u32> {
    let trimmed = value.trim();
    let digits = trimmed
        .strip_prefix('#')
        .or_else(|| trimmed.strip_prefix("0x"))
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    if digits.is_empty() || digits.len() > 8 {
        return Err(VoxError::PaletteError(format!("Invalid color value '{}'", value)));
    }
    u32::from_str_radix(digits, 16)
        .map_err(|_| VoxError::PaletteError(format!("Invalid color value '{}'", value)))
}
