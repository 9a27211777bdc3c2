use super::model::{Category, Region};

// ---------------------------------------------------------------------------
// Threshold rules
// ---------------------------------------------------------------------------

/// Bucket a democracy-index score into a regime type.
///
/// Thresholds are checked high-to-low and each lower bound is inclusive:
/// `8.0` is already a full democracy, `7.999` is not. Total over `f64`:
/// anything that fails every comparison (including NaN) is authoritarian.
pub fn classify_score(score: f64) -> Category {
    if score >= 8.0 {
        Category::FullDemocracy
    } else if score >= 6.0 {
        Category::FlawedDemocracy
    } else if score >= 4.0 {
        Category::HybridRegime
    } else {
        Category::Authoritarian
    }
}

/// Label a latitude with a coarse band.
///
/// This is a latitude band, not continent detection: Australia and Uruguay
/// share a band, and so do Saudi Arabia and Taiwan. Boundary values belong to
/// the lower band (`50.0` is not "northern").
pub fn classify_region(latitude: f64) -> Region {
    if latitude > 50.0 {
        Region::Northern
    } else if latitude > 25.0 {
        Region::MidNorthern
    } else if latitude > -25.0 {
        Region::Equatorial
    } else {
        Region::Southern
    }
}
