//! Panel color palettes
//!
//! E-paper panels show a handful of pigment colors. A palette is an ordered
//! slice of [`PaletteColor`]s; order matters because nearest-color ties resolve
//! to the lowest index.

/// 8-bit RGB triple
pub type Rgb = [u8; 3];

/// One displayable pigment color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PaletteColor {
    /// Name reported on info surfaces ("black", "red", ...)
    pub name: &'static str,
    /// Nominal RGB value used for matching
    pub rgb: Rgb,
}

impl PaletteColor {
    /// Create a palette entry
    pub const fn new(name: &'static str, rgb: Rgb) -> Self {
        Self { name, rgb }
    }
}

/// Pure black
pub const BLACK: PaletteColor = PaletteColor::new("black", [0, 0, 0]);
/// Pure white
pub const WHITE: PaletteColor = PaletteColor::new("white", [255, 255, 255]);
/// Spectra red
pub const RED: PaletteColor = PaletteColor::new("red", [255, 0, 0]);
/// Spectra yellow
pub const YELLOW: PaletteColor = PaletteColor::new("yellow", [255, 255, 0]);
/// Spectra green
pub const GREEN: PaletteColor = PaletteColor::new("green", [0, 255, 0]);
/// Spectra blue
pub const BLUE: PaletteColor = PaletteColor::new("blue", [0, 0, 255]);

/// Two-color panels
pub const BLACK_WHITE: &[PaletteColor] = &[BLACK, WHITE];

/// Four-color (G) panels: black, white, red, yellow
pub const BWRY: &[PaletteColor] = &[BLACK, WHITE, RED, YELLOW];

/// Spectra 6 panels
pub const SPECTRA_6: &[PaletteColor] = &[BLACK, WHITE, RED, YELLOW, GREEN, BLUE];

/// Squared Euclidean distance between two RGB colors
#[inline]
pub fn distance_sq(a: Rgb, b: Rgb) -> u32 {
    a.iter()
        .zip(b.iter())
        .map(|(&x, &y)| {
            let d = i32::from(x) - i32::from(y);
            d.unsigned_abs() * d.unsigned_abs()
        })
        .sum()
}

/// Index of the palette entry closest to `rgb`
///
/// Returns `None` for an empty palette. Ties resolve to the lowest index
/// because only a strictly smaller distance replaces the current best.
pub fn nearest_index(palette: &[PaletteColor], rgb: Rgb) -> Option<usize> {
    let mut best: Option<(usize, u32)> = None;
    for (index, color) in palette.iter().enumerate() {
        let d = distance_sq(rgb, color.rgb);
        match best {
            Some((_, best_d)) if d >= best_d => {}
            _ => best = Some((index, d)),
        }
    }
    best.map(|(index, _)| index)
}

/// RGB of the palette entry closest to `rgb`; identity for an empty palette
pub fn nearest_rgb(palette: &[PaletteColor], rgb: Rgb) -> Rgb {
    nearest_index(palette, rgb)
        .and_then(|i| palette.get(i))
        .map_or(rgb, |c| c.rgb)
}
