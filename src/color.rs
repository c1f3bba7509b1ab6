use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Chart palette
// ---------------------------------------------------------------------------

/// Fixed chart palette. Categories take colors by index (wrapping through
/// generated hues past the fixed set), so a given category list always
/// renders the same colors.
pub const CHART_PALETTE: [Color32; 13] = [
    Color32::from_rgb(75, 192, 192),
    Color32::from_rgb(54, 162, 235),
    Color32::from_rgb(153, 102, 255),
    Color32::from_rgb(255, 159, 64),
    Color32::from_rgb(255, 99, 132),
    Color32::from_rgb(255, 206, 86),
    Color32::from_rgb(231, 233, 237),
    Color32::from_rgb(156, 39, 176),
    Color32::from_rgb(33, 150, 243),
    Color32::from_rgb(76, 175, 80),
    Color32::from_rgb(255, 152, 0),
    Color32::from_rgb(121, 85, 72),
    Color32::from_rgb(96, 125, 139),
];

/// Color for the `i`-th chart category.
pub fn color_for_index(i: usize) -> Color32 {
    if i < CHART_PALETTE.len() {
        CHART_PALETTE[i]
    } else {
        // Past the fixed palette, fall back to evenly spaced hues so large
        // category sets stay distinguishable.
        generated_hue(i - CHART_PALETTE.len())
    }
}

/// One series worth of colors for `n` categories.
pub fn series_colors(n: usize) -> Vec<Color32> {
    (0..n).map(color_for_index).collect()
}

fn generated_hue(i: usize) -> Color32 {
    // Golden-angle stepping keeps consecutive hues far apart.
    let hue = (i as f32 * 137.507_77) % 360.0;
    let hsl = Hsl::new(hue, 0.75, 0.55);
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_assignment_is_deterministic() {
        assert_eq!(color_for_index(0), CHART_PALETTE[0]);
        assert_eq!(color_for_index(12), CHART_PALETTE[12]);
        assert_eq!(color_for_index(40), color_for_index(40));
    }

    #[test]
    fn overflow_indices_still_produce_distinct_colors() {
        let a = color_for_index(13);
        let b = color_for_index(14);
        assert_ne!(a, b);
    }

    #[test]
    fn series_colors_match_index_assignment() {
        let colors = series_colors(20);
        assert_eq!(colors.len(), 20);
        assert_eq!(colors[5], color_for_index(5));
        assert_eq!(colors[19], color_for_index(19));
    }
}
