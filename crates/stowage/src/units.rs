//! Unit conversion and rotation helpers.
//!
//! All lengths are millimeters. Volumes stay in mm³ until aggregation, where
//! they are converted to m³ once.

use stowage_core::geometry::rotate;

const MM3_PER_M3: f64 = 1e9;
const G_PER_KG: f64 = 1e3;

/// Converts a volume from mm³ to m³.
pub fn mm3_to_m3(mm3: f64) -> f64 {
    mm3 / MM3_PER_M3
}

/// Converts a mass from grams to kilograms.
pub fn g_to_kg(grams: f64) -> f64 {
    grams / G_PER_KG
}

/// Converts a mass from kilograms to grams.
pub fn kg_to_g(kg: f64) -> f64 {
    kg * G_PER_KG
}

/// Volume in mm³ of a box with the given extents in mm.
pub fn box_volume_mm3(length: f64, width: f64, height: f64) -> f64 {
    length * width * height
}

/// Decodes a rotation code into permuted (length, width, height).
///
/// | code | result    |
/// |------|-----------|
/// | 0    | (L, W, H) |
/// | 1    | (W, L, H) |
/// | 2    | (W, H, L) |
/// | 3    | (H, W, L) |
/// | 4    | (H, L, W) |
/// | 5    | (L, H, W) |
///
/// Any other code, negative ones included, returns (L, W, H) unchanged.
pub fn rotated_dimensions(code: i64, length: f64, width: f64, height: f64) -> (f64, f64, f64) {
    let [l, w, h] = rotate([length, width, height], code);
    (l, w, h)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_conversions() {
        assert_relative_eq!(mm3_to_m3(1e9), 1.0);
        assert_relative_eq!(mm3_to_m3(box_volume_mm3(1000.0, 500.0, 200.0)), 0.1);
        assert_relative_eq!(g_to_kg(2500.0), 2.5);
        assert_relative_eq!(kg_to_g(2.5), 2500.0);
        assert_relative_eq!(g_to_kg(kg_to_g(13.37)), 13.37);
    }

    #[test]
    fn test_rotation_codes() {
        assert_eq!(rotated_dimensions(0, 1.0, 2.0, 3.0), (1.0, 2.0, 3.0));
        assert_eq!(rotated_dimensions(1, 1.0, 2.0, 3.0), (2.0, 1.0, 3.0));
        assert_eq!(rotated_dimensions(2, 1.0, 2.0, 3.0), (2.0, 3.0, 1.0));
        assert_eq!(rotated_dimensions(3, 1.0, 2.0, 3.0), (3.0, 2.0, 1.0));
        assert_eq!(rotated_dimensions(4, 1.0, 2.0, 3.0), (3.0, 1.0, 2.0));
        assert_eq!(rotated_dimensions(5, 1.0, 2.0, 3.0), (1.0, 3.0, 2.0));
    }

    #[test]
    fn test_rotation_then_identity_round_trips() {
        for code in 0..6 {
            let (l, w, h) = rotated_dimensions(code, 10.0, 20.0, 30.0);
            let (l, w, h) = rotated_dimensions(0, l, w, h);
            let mut dims = [l, w, h];
            dims.sort_by(f64::total_cmp);
            assert_eq!(dims, [10.0, 20.0, 30.0]);
            assert_relative_eq!(box_volume_mm3(l, w, h), 6000.0);
        }
    }

    #[test]
    fn test_out_of_range_codes_are_identity() {
        for code in [-1, 6, 99, i64::MAX, i64::MIN] {
            assert_eq!(rotated_dimensions(code, 11.0, 22.0, 33.0), (11.0, 22.0, 33.0));
        }
    }
}
