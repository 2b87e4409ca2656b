use eframe::egui::Color32;
use egui_plot::MarkerShape;
use palette::{Hsl, IntoColor, Srgb};
use plotters::style::RGBColor;

use crate::data::model::Observable;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// An sRGB colour usable by both the egui viewer and the plotters export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl From<SeriesColor> for Color32 {
    fn from(c: SeriesColor) -> Self {
        Color32::from_rgb(c.r, c.g, c.b)
    }
}

impl From<SeriesColor> for RGBColor {
    fn from(c: SeriesColor) -> Self {
        RGBColor(c.r, c.g, c.b)
    }
}

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<SeriesColor> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            // Offset keeps the first series off pure red.
            let hue = (210.0 + (i as f32 / n as f32) * 360.0) % 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.45);
            let rgb: Srgb = hsl.into_color();
            SeriesColor {
                r: (rgb.red * 255.0) as u8,
                g: (rgb.green * 255.0) as u8,
                b: (rgb.blue * 255.0) as u8,
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Series styling: observable → colour + marker
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Circle,
    /// Points down in both the viewer and the PDF export.
    Triangle,
}

impl From<Marker> for MarkerShape {
    fn from(m: Marker) -> Self {
        match m {
            Marker::Circle => MarkerShape::Circle,
            Marker::Triangle => MarkerShape::Down,
        }
    }
}

/// How one observable's error series is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesStyle {
    pub observable: Observable,
    pub color: SeriesColor,
    pub marker: Marker,
}

/// Styles for every observable, in [`Observable::ALL`] order.
pub fn series_styles() -> Vec<SeriesStyle> {
    let palette = generate_palette(Observable::ALL.len());
    Observable::ALL
        .iter()
        .zip(palette)
        .map(|(&observable, color)| SeriesStyle {
            observable,
            color,
            marker: match observable {
                Observable::FreeEnergy => Marker::Circle,
                Observable::Energy => Marker::Triangle,
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_colours_are_distinct() {
        let colours = generate_palette(4);
        assert_eq!(colours.len(), 4);
        for (i, a) in colours.iter().enumerate() {
            for b in &colours[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn free_energy_uses_circles_and_energy_triangles() {
        let styles = series_styles();
        assert_eq!(styles.len(), 2);
        assert_eq!(styles[0].observable, Observable::FreeEnergy);
        assert_eq!(styles[0].marker, Marker::Circle);
        assert_eq!(styles[1].observable, Observable::Energy);
        assert_eq!(styles[1].marker, Marker::Triangle);
        assert_ne!(styles[0].color, styles[1].color);
    }

    #[test]
    fn viewer_triangle_points_down() {
        assert!(matches!(MarkerShape::from(Marker::Triangle), MarkerShape::Down));
        assert!(matches!(MarkerShape::from(Marker::Circle), MarkerShape::Circle));
    }
}
