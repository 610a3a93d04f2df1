//! Named page-size presets

use rustc_hash::FxHashMap;

/// Table of named page sizes mapping to a default maximum extent.
///
/// Extents are page heights in logical pixels at 96 dpi.
#[derive(Debug, Clone)]
pub struct PageSizeTable {
    presets: FxHashMap<&'static str, f32>,
}

impl Default for PageSizeTable {
    fn default() -> Self {
        let mut presets = FxHashMap::default();
        presets.insert("a3", 1587.0); // 297 x 420 mm
        presets.insert("a4", 1123.0); // 210 x 297 mm
        presets.insert("a5", 794.0); // 148 x 210 mm
        presets.insert("letter", 1056.0); // 8.5 x 11 in
        presets.insert("legal", 1344.0); // 8.5 x 14 in
        Self { presets }
    }
}

impl PageSizeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a named preset
    pub fn get(&self, name: &str) -> Option<f32> {
        self.presets.get(name).copied()
    }

    /// Resolve a size name to an extent, falling back to `fallback` when the
    /// name is unrecognized. Never errors.
    pub fn resolve(&self, name: &str, fallback: f32) -> f32 {
        self.get(name).unwrap_or(fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_presets() {
        let table = PageSizeTable::new();
        assert_eq!(table.resolve("a4", 0.0), 1123.0);
        assert_eq!(table.resolve("letter", 0.0), 1056.0);
        assert_eq!(table.resolve("legal", 0.0), 1344.0);
    }

    #[test]
    fn test_unknown_name_falls_back() {
        let table = PageSizeTable::new();
        assert_eq!(table.resolve("tabloid", 640.0), 640.0);
        assert_eq!(table.resolve("", 500.0), 500.0);
    }
}
