use serde::{Deserialize, Serialize};

use super::ParameterId;

/// Chart state that must be refreshed after a parameter change.
///
/// Declaration order is the order in which a triggered set is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InvalidationTag {
    /// Color scheme replaced; rebuild the mapper.
    Scheme,
    /// Representation switched; swap the geometry strategy.
    Layout,
    /// Color switches changed; recompute segment fills.
    Color,
    /// Window target changed; reshape.
    Window,
    /// Cached segment polygons are stale.
    Raster,
    Legend,
    /// Highlight/glow only; the cached raster stays valid.
    Overlay,
}

impl InvalidationTag {
    pub const ORDERED: [Self; 7] = [
        Self::Scheme,
        Self::Layout,
        Self::Color,
        Self::Window,
        Self::Raster,
        Self::Legend,
        Self::Overlay,
    ];

    const fn bit(self) -> u8 {
        match self {
            Self::Scheme => 1 << 0,
            Self::Layout => 1 << 1,
            Self::Color => 1 << 2,
            Self::Window => 1 << 3,
            Self::Raster => 1 << 4,
            Self::Legend => 1 << 5,
            Self::Overlay => 1 << 6,
        }
    }
}

/// Bitmask of invalidation tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct InvalidationTags {
    bits: u8,
}

impl InvalidationTags {
    #[must_use]
    pub const fn none() -> Self {
        Self { bits: 0 }
    }

    #[must_use]
    pub const fn from_tag(tag: InvalidationTag) -> Self {
        Self { bits: tag.bit() }
    }

    #[must_use]
    pub const fn with(self, tag: InvalidationTag) -> Self {
        Self {
            bits: self.bits | tag.bit(),
        }
    }

    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self {
            bits: self.bits | other.bits,
        }
    }

    #[must_use]
    pub const fn contains(self, tag: InvalidationTag) -> bool {
        (self.bits & tag.bit()) != 0
    }

    #[must_use]
    pub const fn is_none(self) -> bool {
        self.bits == 0
    }

    /// Tags in handling order.
    pub fn iter(self) -> impl Iterator<Item = InvalidationTag> {
        InvalidationTag::ORDERED
            .into_iter()
            .filter(move |tag| self.contains(*tag))
    }
}

impl ParameterId {
    /// Dispatch table: state invalidated by a change of this parameter.
    #[must_use]
    pub const fn invalidation(self) -> InvalidationTags {
        match self {
            Self::SegmentsPerCycle | Self::NumberOfCycles | Self::Offset => {
                InvalidationTags::from_tag(InvalidationTag::Window)
            }
            Self::DelimiterStrength | Self::BandScale | Self::Rotation => {
                InvalidationTags::from_tag(InvalidationTag::Raster)
            }
            Self::Representation => InvalidationTags::from_tag(InvalidationTag::Layout),
            Self::ColorMap => InvalidationTags::from_tag(InvalidationTag::Scheme)
                .with(InvalidationTag::Color),
            Self::SmoothColors
            | Self::ReverseColors
            | Self::TwoToneColors
            | Self::TwoToneFlip => InvalidationTags::from_tag(InvalidationTag::Color),
            Self::ColorLegend => InvalidationTags::from_tag(InvalidationTag::Legend),
            Self::Guidance => InvalidationTags::from_tag(InvalidationTag::Overlay),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{InvalidationTag, InvalidationTags};
    use crate::api::ParameterId;

    #[test]
    fn every_parameter_invalidates_something() {
        for id in ParameterId::ALL {
            assert!(!id.invalidation().is_none(), "{id:?}");
        }
    }

    #[test]
    fn color_map_rebuilds_scheme_before_recoloring() {
        let tags: Vec<_> = ParameterId::ColorMap.invalidation().iter().collect();
        assert_eq!(tags, vec![InvalidationTag::Scheme, InvalidationTag::Color]);
    }

    #[test]
    fn iteration_follows_handling_order() {
        let tags = InvalidationTags::from_tag(InvalidationTag::Overlay)
            .with(InvalidationTag::Window)
            .union(InvalidationTags::from_tag(InvalidationTag::Layout));
        let order: Vec<_> = tags.iter().collect();
        assert_eq!(
            order,
            vec![
                InvalidationTag::Layout,
                InvalidationTag::Window,
                InvalidationTag::Overlay
            ]
        );
        assert!(InvalidationTags::none().iter().next().is_none());
    }
}
