/// How samples outside the source region are treated along one edge.
///
/// Only [`Boundary::Exclude`] is implemented by the resampler: contributions
/// from outside the region are dropped and the remaining weights are
/// renormalized. The other modes are accepted as configuration values so that
/// callers can describe their intent, but resampling with them panics.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Boundary {
    #[default]
    Exclude,
    Clamp,
    Repeat,
    Mirror,
    Color([f32; 4]),
}

/// Boundary modes for the four edges of the source region.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Boundaries {
    pub north: Boundary,
    pub east: Boundary,
    pub south: Boundary,
    pub west: Boundary,
}

impl Boundaries {
    pub const EXCLUDE: Self = Self::uniform(Boundary::Exclude);

    pub const fn uniform(mode: Boundary) -> Self {
        Self {
            north: mode,
            east: mode,
            south: mode,
            west: mode,
        }
    }

    pub fn all_exclude(&self) -> bool {
        [self.north, self.east, self.south, self.west]
            .iter()
            .all(|b| *b == Boundary::Exclude)
    }
}
