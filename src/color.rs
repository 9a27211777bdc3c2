use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::{Category, Region};

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
// Fixed legend colours
// ---------------------------------------------------------------------------

/// Regime colours: sea green, gold, dark orange, crimson.
pub fn category_color(category: Category) -> Color32 {
    match category {
        Category::FullDemocracy => Color32::from_rgb(0x2E, 0x8B, 0x57),
        Category::FlawedDemocracy => Color32::from_rgb(0xFF, 0xD7, 0x00),
        Category::HybridRegime => Color32::from_rgb(0xFF, 0x8C, 0x00),
        Category::Authoritarian => Color32::from_rgb(0xDC, 0x14, 0x3C),
    }
}

/// One palette hue per latitude band.
pub fn region_color(region: Region) -> Color32 {
    let palette = generate_palette(Region::ALL.len());
    Region::ALL
        .iter()
        .position(|&r| r == region)
        .and_then(|i| palette.get(i).copied())
        .unwrap_or(Color32::GRAY)
}
