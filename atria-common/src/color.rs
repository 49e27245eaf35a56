use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// RGBA color with components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba(pub [f32; 4]);

impl Hash for Rgba {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0
            .iter()
            .for_each(|v| OrderedFloat::from(*v).hash(state));
    }
}

impl Rgba {
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Rgba([r, g, b, a])
    }

    /// Opaque color from 8-bit channels.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Rgba([
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            1.0,
        ])
    }

    /// Color from a `[r, g, b, a]` row with rgb in 0–255 and alpha in 0–1,
    /// the layout session configs use for ramps.
    pub fn from_row(row: [f32; 4]) -> Self {
        Rgba([row[0] / 255.0, row[1] / 255.0, row[2] / 255.0, row[3]])
    }

    /// Parses `#RRGGBB`, case-insensitive. Returns `None` for anything else.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#')?;
        if hex.len() != 6 {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Rgba::from_rgb8(r, g, b))
    }

    /// `#rrggbb` rendering of the color, alpha dropped.
    pub fn to_hex(&self) -> String {
        format!(
            "#{:02x}{:02x}{:02x}",
            (self.0[0] * 255.0).round() as u8,
            (self.0[1] * 255.0).round() as u8,
            (self.0[2] * 255.0).round() as u8
        )
    }

    pub fn alpha(&self) -> f32 {
        self.0[3]
    }

    /// Semi-transparent gray used for "no match" symbols and grayed-out
    /// gradient stops.
    pub fn neutral_gray() -> Self {
        Rgba([135.0 / 255.0, 135.0 / 255.0, 135.0 / 255.0, 0.2])
    }

    pub fn white() -> Self {
        Rgba([1.0, 1.0, 1.0, 1.0])
    }

    /// Low endpoint of the overview gradient.
    pub fn gradient_low() -> Self {
        Rgba::from_rgb8(0xE4, 0x00, 0x2B)
    }

    /// High endpoint of the overview gradient.
    pub fn gradient_high() -> Self {
        Rgba::from_rgb8(0x00, 0x19, 0x33)
    }
}

/// An ordered palette assigned positionally to bins or categories.
///
/// Positional lookup cycles through the palette when bins outnumber
/// entries, so color assignment stays deterministic past the palette end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorRamp {
    colors: Vec<Rgba>,
}

const CHART_RAMP_SMALL: [&str; 6] = [
    "#E4002B", "#A6192B", "#9BD3DD", "#D9ECEB", "#0093B2", "#001933",
];

const CHART_RAMP_LARGE: [&str; 10] = [
    "#E4002B", "#A6192B", "#9BD3DD", "#D9ECEB", "#0093B2", "#56AAC6", "#9EC8DB", "#003865",
    "#526180", "#001933",
];

const CATEGORY_RAMP: [[f32; 4]; 18] = [
    [251.0, 231.0, 137.0, 1.0],
    [226.0, 221.0, 140.0, 1.0],
    [201.0, 211.0, 143.0, 1.0],
    [176.0, 202.0, 147.0, 1.0],
    [151.0, 192.0, 150.0, 1.0],
    [126.0, 182.0, 153.0, 1.0],
    [101.0, 173.0, 157.0, 1.0],
    [76.0, 163.0, 160.0, 1.0],
    [105.0, 107.0, 107.0, 1.0],
    [150.0, 152.0, 152.0, 1.0],
    [195.0, 196.0, 196.0, 1.0],
    [208.0, 206.0, 207.0, 1.0],
    [0.0, 56.0, 101.0, 1.0],
    [82.0, 97.0, 128.0, 1.0],
    [181.0, 189.0, 0.0, 1.0],
    [201.0, 206.0, 113.0, 1.0],
    [222.0, 225.0, 170.0, 1.0],
    [238.0, 240.0, 211.0, 1.0],
];

impl ColorRamp {
    pub fn new(colors: Vec<Rgba>) -> Self {
        Self { colors }
    }

    pub fn from_rows(rows: &[[f32; 4]]) -> Self {
        Self {
            colors: rows.iter().map(|row| Rgba::from_row(*row)).collect(),
        }
    }

    fn from_hex_palette(palette: &[&str]) -> Self {
        Self {
            colors: palette
                .iter()
                .filter_map(|hex| Rgba::from_hex(hex))
                .collect(),
        }
    }

    /// Ramp for bin charts: a 6-color palette, or a 10-color palette when
    /// more than 9 bins are needed.
    pub fn chart_ramp(bin_count: usize) -> Self {
        if bin_count > 9 {
            Self::from_hex_palette(&CHART_RAMP_LARGE)
        } else {
            Self::from_hex_palette(&CHART_RAMP_SMALL)
        }
    }

    /// The 18-entry categorical session ramp.
    pub fn category_default() -> Self {
        Self::from_rows(&CATEGORY_RAMP)
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn colors(&self) -> &[Rgba] {
        &self.colors
    }

    /// Positional color, cycling modulo the palette length. An empty ramp
    /// falls back to neutral gray.
    pub fn color_at(&self, index: usize) -> Rgba {
        if self.colors.is_empty() {
            Rgba::neutral_gray()
        } else {
            self.colors[index % self.colors.len()]
        }
    }
}
