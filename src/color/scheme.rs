use serde::{Deserialize, Serialize};

use crate::error::ChartResult;
use crate::render::Color;

use super::LabGradient;

/// Named 7-class ColorBrewer schemes offered by the color selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ColorScheme {
    #[default]
    Spectral,
    RdYlBu,
    RdYlGn,
    RdBu,
    PuOr,
    BrBG,
    PiYG,
    YlGnBu,
    YlOrRd,
    Blues,
    Greens,
    Greys,
    Oranges,
    Purples,
}

impl ColorScheme {
    const ALL: [Self; 14] = [
        Self::Spectral,
        Self::RdYlBu,
        Self::RdYlGn,
        Self::RdBu,
        Self::PuOr,
        Self::BrBG,
        Self::PiYG,
        Self::YlGnBu,
        Self::YlOrRd,
        Self::Blues,
        Self::Greens,
        Self::Greys,
        Self::Oranges,
        Self::Purples,
    ];

    /// All schemes sorted by name, the order a selector lists them in.
    #[must_use]
    pub fn sorted() -> Vec<Self> {
        let mut schemes = Self::ALL.to_vec();
        schemes.sort_by_key(|scheme| scheme.name());
        schemes
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|scheme| scheme.name() == name)
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Spectral => "Spectral",
            Self::RdYlBu => "RdYlBu",
            Self::RdYlGn => "RdYlGn",
            Self::RdBu => "RdBu",
            Self::PuOr => "PuOr",
            Self::BrBG => "BrBG",
            Self::PiYG => "PiYG",
            Self::YlGnBu => "YlGnBu",
            Self::YlOrRd => "YlOrRd",
            Self::Blues => "Blues",
            Self::Greens => "Greens",
            Self::Greys => "Greys",
            Self::Oranges => "Oranges",
            Self::Purples => "Purples",
        }
    }

    const fn stops_rgb8(self) -> [[u8; 3]; 7] {
        match self {
            Self::Spectral => [
                [0xd5, 0x3e, 0x4f],
                [0xfc, 0x8d, 0x59],
                [0xfe, 0xe0, 0x8b],
                [0xff, 0xff, 0xbf],
                [0xe6, 0xf5, 0x98],
                [0x99, 0xd5, 0x94],
                [0x32, 0x88, 0xbd],
            ],
            Self::RdYlBu => [
                [0xd7, 0x30, 0x27],
                [0xfc, 0x8d, 0x59],
                [0xfe, 0xe0, 0x90],
                [0xff, 0xff, 0xbf],
                [0xe0, 0xf3, 0xf8],
                [0x91, 0xbf, 0xdb],
                [0x45, 0x75, 0xb4],
            ],
            Self::RdYlGn => [
                [0xd7, 0x30, 0x27],
                [0xfc, 0x8d, 0x59],
                [0xfe, 0xe0, 0x8b],
                [0xff, 0xff, 0xbf],
                [0xd9, 0xef, 0x8b],
                [0x91, 0xcf, 0x60],
                [0x1a, 0x98, 0x50],
            ],
            Self::RdBu => [
                [0xb2, 0x18, 0x2b],
                [0xef, 0x8a, 0x62],
                [0xfd, 0xdb, 0xc7],
                [0xf7, 0xf7, 0xf7],
                [0xd1, 0xe5, 0xf0],
                [0x67, 0xa9, 0xcf],
                [0x21, 0x66, 0xac],
            ],
            Self::PuOr => [
                [0xb3, 0x58, 0x06],
                [0xf1, 0xa3, 0x40],
                [0xfe, 0xe0, 0xb6],
                [0xf7, 0xf7, 0xf7],
                [0xd8, 0xda, 0xeb],
                [0x99, 0x8e, 0xc3],
                [0x54, 0x27, 0x88],
            ],
            Self::BrBG => [
                [0x8c, 0x51, 0x0a],
                [0xd8, 0xb3, 0x65],
                [0xf6, 0xe8, 0xc3],
                [0xf5, 0xf5, 0xf5],
                [0xc7, 0xea, 0xe5],
                [0x5a, 0xb4, 0xac],
                [0x01, 0x66, 0x5e],
            ],
            Self::PiYG => [
                [0xc5, 0x1b, 0x7d],
                [0xe9, 0xa3, 0xc9],
                [0xfd, 0xe0, 0xef],
                [0xf7, 0xf7, 0xf7],
                [0xe6, 0xf5, 0xd0],
                [0xa1, 0xd7, 0x6a],
                [0x4d, 0x92, 0x21],
            ],
            Self::YlGnBu => [
                [0xff, 0xff, 0xcc],
                [0xc7, 0xe9, 0xb4],
                [0x7f, 0xcd, 0xbb],
                [0x41, 0xb6, 0xc4],
                [0x1d, 0x91, 0xc0],
                [0x22, 0x5e, 0xa8],
                [0x0c, 0x2c, 0x84],
            ],
            Self::YlOrRd => [
                [0xff, 0xff, 0xb2],
                [0xfe, 0xd9, 0x76],
                [0xfe, 0xb2, 0x4c],
                [0xfd, 0x8d, 0x3c],
                [0xfc, 0x4e, 0x2a],
                [0xe3, 0x1a, 0x1c],
                [0xb1, 0x00, 0x26],
            ],
            Self::Blues => [
                [0xef, 0xf3, 0xff],
                [0xc6, 0xdb, 0xef],
                [0x9e, 0xca, 0xe1],
                [0x6b, 0xae, 0xd6],
                [0x42, 0x92, 0xc6],
                [0x21, 0x71, 0xb5],
                [0x08, 0x45, 0x94],
            ],
            Self::Greens => [
                [0xed, 0xf8, 0xe9],
                [0xc7, 0xe9, 0xc0],
                [0xa1, 0xd9, 0x9b],
                [0x74, 0xc4, 0x76],
                [0x41, 0xab, 0x5d],
                [0x23, 0x8b, 0x45],
                [0x00, 0x5a, 0x32],
            ],
            Self::Greys => [
                [0xf7, 0xf7, 0xf7],
                [0xd9, 0xd9, 0xd9],
                [0xbd, 0xbd, 0xbd],
                [0x96, 0x96, 0x96],
                [0x73, 0x73, 0x73],
                [0x52, 0x52, 0x52],
                [0x25, 0x25, 0x25],
            ],
            Self::Oranges => [
                [0xfe, 0xed, 0xde],
                [0xfd, 0xd0, 0xa2],
                [0xfd, 0xae, 0x6b],
                [0xfd, 0x8d, 0x3c],
                [0xf1, 0x69, 0x13],
                [0xd9, 0x48, 0x01],
                [0x8c, 0x2d, 0x04],
            ],
            Self::Purples => [
                [0xf2, 0xf0, 0xf7],
                [0xda, 0xda, 0xeb],
                [0xbc, 0xbd, 0xdc],
                [0x9e, 0x9a, 0xc8],
                [0x80, 0x7d, 0xba],
                [0x6a, 0x51, 0xa3],
                [0x4a, 0x14, 0x86],
            ],
        }
    }

    /// Control points of the scheme's gradient, low to high.
    #[must_use]
    pub fn stops(self) -> Vec<Color> {
        self.stops_rgb8()
            .into_iter()
            .map(|[r, g, b]| Color::from_rgb8(r, g, b))
            .collect()
    }

    /// Swatch strip for a color selector entry: `width` samples across the
    /// scheme's gradient.
    pub fn preview(self, width: usize) -> ChartResult<Vec<Color>> {
        Ok(LabGradient::new(&self.stops())?.colors(width))
    }
}

#[cfg(test)]
mod tests {
    use super::ColorScheme;

    #[test]
    fn names_round_trip() {
        for scheme in ColorScheme::sorted() {
            assert_eq!(ColorScheme::from_name(scheme.name()), Some(scheme));
            assert_eq!(scheme.stops().len(), 7);
        }
        assert_eq!(ColorScheme::from_name("Rainbow"), None);
    }

    #[test]
    fn sorted_listing_is_alphabetical() {
        let names: Vec<_> = ColorScheme::sorted().into_iter().map(ColorScheme::name).collect();
        let mut expected = names.clone();
        expected.sort_unstable();
        assert_eq!(names, expected);
        assert_eq!(names.first(), Some(&"Blues"));
    }

    #[test]
    fn preview_spans_scheme_endpoints() {
        let scheme = ColorScheme::Blues;
        let preview = scheme.preview(16).expect("preview");
        let stops = scheme.stops();
        assert_eq!(preview.len(), 16);
        assert_eq!(preview.first().map(|c| c.to_rgb8()), stops.first().map(|c| c.to_rgb8()));
        assert_eq!(preview.last().map(|c| c.to_rgb8()), stops.last().map(|c| c.to_rgb8()));
    }
}
