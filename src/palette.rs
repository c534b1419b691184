use plotters::style::RGBColor;
use std::f64::consts::PI;

/// Colorblind-friendly palette (https://gist.github.com/thriveth/8560036)
const SAFE_COLORS: &[RGBColor] = &[
    RGBColor(0x37, 0x7e, 0xb8), // Blue
    RGBColor(0xff, 0x7f, 0x00), // Orange
    RGBColor(0x4d, 0xaf, 0x4a), // Green
    RGBColor(0xf7, 0x81, 0xbf), // Pink
    RGBColor(0xa6, 0x56, 0x28), // Brown
    RGBColor(0x98, 0x4e, 0xa3), // Purple
    RGBColor(0x99, 0x99, 0x99), // Gray
    RGBColor(0xe4, 0x1a, 0x1c), // Red
    RGBColor(0xde, 0xde, 0x00), // Yellow
];

/// How algorithms are colored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaletteMode {
    /// Fixed 9-color colorblind-safe table, wrapping around past 9 algorithms
    #[default]
    Fixed,
    /// Rainbow gradient with exactly one color per algorithm
    Generated,
}

impl PaletteMode {
    /// Colors for `count` algorithms, in canonical order.
    pub fn colors(&self, count: usize) -> Vec<RGBColor> {
        match self {
            PaletteMode::Fixed => (0..count)
                .map(|i| SAFE_COLORS[i % SAFE_COLORS.len()])
                .collect(),
            PaletteMode::Generated => linspace(count).into_iter().map(rainbow).collect(),
        }
    }
}

/// `count` evenly spaced points in [0, 1], both ends included.
fn linspace(count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![0.0],
        _ => (0..count)
            .map(|i| i as f64 / (count - 1) as f64)
            .collect(),
    }
}

/// Rainbow colormap: purple at 0, through green, to red at 1.
fn rainbow(x: f64) -> RGBColor {
    let channel = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    RGBColor(
        channel((2.0 * x - 0.5).abs()),
        channel((PI * x).sin()),
        channel((PI * x / 2.0).cos()),
    )
}
