use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

/// Line color of the spectrum trace.
pub const SPECTRUM: Color32 = Color32::from_rgb(31, 119, 180);

// ---------------------------------------------------------------------------
// Selection markers
// ---------------------------------------------------------------------------

/// `n` distinct marker colors for clicked points, starting at orange so the
/// first marker stands out against the blue trace.
pub fn marker_colors(n: usize) -> Vec<Color32> {
    const START_HUE: f32 = 30.0;
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = START_HUE + (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.85, 0.5);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red.clamp(0.0, 1.0) * 255.0) as u8,
                (rgb.green.clamp(0.0, 1.0) * 255.0) as u8,
                (rgb.blue.clamp(0.0, 1.0) * 255.0) as u8,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_colors_count() {
        assert!(marker_colors(0).is_empty());
        assert_eq!(marker_colors(2).len(), 2);
    }

    #[test]
    fn test_marker_colors_distinct() {
        let colors = marker_colors(2);
        assert_ne!(colors[0], colors[1]);
        assert_ne!(colors[0], SPECTRUM);
    }
}
