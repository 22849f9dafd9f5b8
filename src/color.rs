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
            let hsl = Hsl::new(hue, 0.65, 0.52);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

/// Background colour for a correlation coefficient in [-1, 1]:
/// blue for negative, red for positive, washing out towards white at
/// zero.
pub fn diverging_color(r: f64) -> Color32 {
    let r = r.clamp(-1.0, 1.0) as f32;
    let hue = if r < 0.0 { 225.0 } else { 8.0 };
    let strength = r.abs();
    let hsl = Hsl::new(hue, 0.80 * strength, 0.93 - 0.42 * strength);
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

// ---------------------------------------------------------------------------
// Color mapping: category label → Color32
// ---------------------------------------------------------------------------

/// Maps category labels to distinct colours, in the order given.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: Vec<(String, Color32)>,
    default_color: Color32,
}

impl ColorMap {
    /// Build a colour map for the given labels (first-seen order).
    pub fn new<'a>(labels: impl Iterator<Item = &'a str>) -> Self {
        let labels: Vec<String> = labels.map(str::to_string).collect();
        let palette = generate_palette(labels.len());
        ColorMap {
            mapping: labels.into_iter().zip(palette).collect(),
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a label.
    pub fn color_for(&self, label: &str) -> Color32 {
        self.mapping
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, c)| *c)
            .unwrap_or(self.default_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_size_matches_request() {
        assert!(generate_palette(0).is_empty());
        assert_eq!(generate_palette(5).len(), 5);
    }

    #[test]
    fn diverging_endpoints_differ_from_the_midpoint() {
        let cold = diverging_color(-1.0);
        let hot = diverging_color(1.0);
        let neutral = diverging_color(0.0);
        assert_ne!(cold, hot);
        // The midpoint is near-white.
        assert!(neutral.r() > 220 && neutral.g() > 220 && neutral.b() > 220);
    }

    #[test]
    fn unknown_labels_get_the_default_color() {
        let cm = ColorMap::new(["BEV", "PHEV"].into_iter());
        assert_ne!(cm.color_for("BEV"), cm.color_for("PHEV"));
        assert_eq!(cm.color_for("FCEV"), Color32::GRAY);
    }
}
