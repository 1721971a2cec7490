use std::collections::{BTreeMap, BTreeSet};

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: category label → Color32
// ---------------------------------------------------------------------------

/// Maps the distinct labels of one record field (e.g. `fall`) to colours.
#[derive(Debug, Clone, Default)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
}

impl ColorMap {
    /// Build a colour map from the distinct labels, in sorted order.
    pub fn new<'a>(labels: impl IntoIterator<Item = &'a str>) -> Self {
        let unique: BTreeSet<&str> = labels.into_iter().collect();
        let palette = generate_palette(unique.len());
        let mapping = unique
            .into_iter()
            .zip(palette)
            .map(|(label, c)| (label.to_string(), c))
            .collect();
        ColorMap { mapping }
    }

    /// Look up the colour for a label; unknown labels are grey.
    pub fn color_for(&self, label: &str) -> Color32 {
        self.mapping.get(label).copied().unwrap_or(Color32::GRAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_is_distinct() {
        let palette = generate_palette(4);
        assert_eq!(palette.len(), 4);
        let unique: BTreeSet<[u8; 4]> = palette.iter().map(|c| c.to_array()).collect();
        assert_eq!(unique.len(), 4);
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn test_color_map_dedupes_labels() {
        let map = ColorMap::new(["Fell", "Found", "Fell"]);
        let labels: Vec<&str> = map.mapping.keys().map(String::as_str).collect();
        assert_eq!(labels, vec!["Fell", "Found"]);
        assert_ne!(map.color_for("Fell"), map.color_for("Found"));
        assert_eq!(map.color_for("Unknown"), Color32::GRAY);
    }
}
