use crate::resource::{parse_hex, parse_json, parse_xml, ColorEntry};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use voxhelper_common::color::opaque;
use voxhelper_common::types::PackedColor;
use voxhelper_common::{Result, VoxError};
use voxhelper_logger::log;
use voxhelper_logger::LogSeverity::Debug;

/// Immutable bidirectional mapping between single-character symbols and opaque ARGB colors.
///
/// Built once from a resource and then handed to whoever needs it. Both directions are
/// hash lookups. Construction fails on a repeated symbol or on two symbols sharing a color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteTable {
    entries: Vec<(char, PackedColor)>,
    by_symbol: HashMap<char, PackedColor>,
    by_color: HashMap<PackedColor, char>,
}

impl PaletteTable {
    /// Loads a resource file. `.json` files are read as JSON, anything else as XML.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let source = fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let table = if is_json {
            Self::from_json_str(&source)?
        } else {
            Self::from_xml_str(&source)?
        };
        log(
            format!("Loaded {} palette colors from {}", table.len(), path.display()),
            Debug,
        );
        Ok(table)
    }

    pub fn from_xml_str(source: &str) -> Result<Self> {
        Self::from_entries(&parse_xml(source)?)
    }

    pub fn from_json_str(source: &str) -> Result<Self> {
        Self::from_entries(&parse_json(source)?)
    }

    pub fn from_entries(entries: &[ColorEntry]) -> Result<Self> {
        let pairs = entries
            .iter()
            .map(|entry| Ok((entry.symbol_char()?, entry.value.as_str())))
            .collect::<Result<Vec<_>>>()?;
        Self::from_pairs(pairs)
    }

    /// Builds a table from `(symbol, hex)` pairs. Alpha is forced to `0xFF`.
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (char, S)>,
        S: AsRef<str>,
    {
        let mut table = PaletteTable {
            entries: Vec::new(),
            by_symbol: HashMap::new(),
            by_color: HashMap::new(),
        };

        for (symbol, hex) in pairs {
            let color = opaque(parse_hex(hex.as_ref())?);
            if table.by_symbol.contains_key(&symbol) {
                return Err(VoxError::DuplicateSymbol(symbol));
            }
            if table.by_color.contains_key(&color) {
                return Err(VoxError::DuplicateColor(color));
            }
            table.by_symbol.insert(symbol, color);
            table.by_color.insert(color, symbol);
            table.entries.push((symbol, color));
        }
        Ok(table)
    }

    pub fn color(&self, symbol: char) -> Option<PackedColor> {
        self.by_symbol.get(&symbol).copied()
    }

    pub fn symbol(&self, color: PackedColor) -> Option<char> {
        self.by_color.get(&color).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in resource order.
    pub fn iter(&self) -> impl Iterator<Item = (char, PackedColor)> + '_ {
        self.entries.iter().copied()
    }

    /// Colors for each symbol of `symbols`, in order.
    pub fn colors_for(&self, symbols: &str) -> Result<Vec<PackedColor>> {
        symbols
            .chars()
            .map(|c| self.color(c).ok_or(VoxError::UnknownSymbol(c)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_both_directions() {
        let table = PaletteTable::from_pairs([('A', "FF0000"), ('B', "00FF00")]).unwrap();
        assert_eq!(table.color('A'), Some(0xFFFF0000));
        assert_eq!(table.color('B'), Some(0xFF00FF00));
        assert_eq!(table.symbol(0xFFFF0000), Some('A'));
        assert_eq!(table.symbol(0x00FF0000), None);
        assert_eq!(table.color('C'), None);
        assert_eq!(table.len(), 2);
        assert_eq!(
            table.iter().collect::<Vec<_>>(),
            vec![('A', 0xFFFF0000), ('B', 0xFF00FF00)]
        );
    }

    #[test]
    fn test_duplicates_are_fatal() {
        assert_matches!(
            PaletteTable::from_pairs([('A', "FF0000"), ('A', "00FF00")]),
            Err(VoxError::DuplicateSymbol('A'))
        );
        assert_matches!(
            PaletteTable::from_pairs([('A', "FF0000"), ('B', "#ff0000")]),
            Err(VoxError::DuplicateColor(0xFFFF0000))
        );
    }

    #[test]
    fn test_from_xml_str() {
        let xml = r#"<palette>
            <color symbol="A" value="FF0000"/>
            <color symbol="B" value="00FF00"/>
        </palette>"#;
        let table = PaletteTable::from_xml_str(xml).unwrap();
        assert_eq!(table.color('A'), Some(0xFFFF0000));
        assert_eq!(table.symbol(0xFF00FF00), Some('B'));
    }

    #[test]
    fn test_bad_symbol_in_resource() {
        let xml = r#"<palette><color symbol="AB" value="FF0000"/></palette>"#;
        assert_matches!(PaletteTable::from_xml_str(xml), Err(VoxError::PaletteError(_)));
    }

    #[test]
    fn test_colors_for() {
        let table = PaletteTable::from_pairs([('A', "FF0000"), ('B', "00FF00")]).unwrap();
        assert_eq!(table.colors_for("BA").unwrap(), vec![0xFF00FF00, 0xFFFF0000]);
        assert_matches!(table.colors_for("AZ"), Err(VoxError::UnknownSymbol('Z')));
    }

    #[test]
    fn test_load_by_extension() {
        let dir = tempfile::tempdir().unwrap();

        let xml_path = dir.path().join("palette.xml");
        fs::write(&xml_path, r#"<palette><color symbol="W" value="FFF1E8"/></palette>"#).unwrap();
        assert_eq!(PaletteTable::load(&xml_path).unwrap().color('W'), Some(0xFFFFF1E8));

        let json_path = dir.path().join("palette.JSON");
        fs::write(&json_path, r#"[{"symbol": "W", "value": "FFF1E8"}]"#).unwrap();
        assert_eq!(PaletteTable::load(&json_path).unwrap().symbol(0xFFFFF1E8), Some('W'));

        assert_matches!(
            PaletteTable::load(dir.path().join("missing.xml")),
            Err(VoxError::IoError(_))
        );
    }
}
