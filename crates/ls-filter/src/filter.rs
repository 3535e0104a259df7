use core::fmt;
use core::str::FromStr;

/// Filter selector used by the resampler.
///
/// [`Filter::Default`] is a placeholder that the resampler resolves per pass:
/// [`Filter::Mitchell`] when magnifying and [`Filter::Lanczos`] otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Filter {
    #[default]
    Default,
    Box,
    Nearest,
    Hermite,
    Mitchell,
    Lanczos,
    /// Gaussian followed by renormalization of each pixel as a 3-vector.
    GaussianNormals,
    GaussianScalars,
    /// Per-channel minimum over the box-filter footprint.
    Minimum,
}

impl Filter {
    pub const ALL: [Filter; 9] = [
        Filter::Default,
        Filter::Box,
        Filter::Nearest,
        Filter::Hermite,
        Filter::Mitchell,
        Filter::Lanczos,
        Filter::GaussianNormals,
        Filter::GaussianScalars,
        Filter::Minimum,
    ];

    /// Replaces [`Filter::Default`] with the filter suited to the resize
    /// direction. Any other value is returned unchanged.
    pub fn resolve(self, magnifying: bool) -> Filter {
        match self {
            Filter::Default if magnifying => Filter::Mitchell,
            Filter::Default => Filter::Lanczos,
            other => other,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Filter::Default => "DEFAULT",
            Filter::Box => "BOX",
            Filter::Nearest => "NEAREST",
            Filter::Hermite => "HERMITE",
            Filter::Mitchell => "MITCHELL",
            Filter::Lanczos => "LANCZOS",
            Filter::GaussianNormals => "NORMALS",
            Filter::GaussianScalars => "GAUSSIAN",
            Filter::Minimum => "MIN",
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFilterError {
    name: String,
}

impl fmt::Display for ParseFilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown filter name '{}'", self.name)
    }
}

impl std::error::Error for ParseFilterError {}

impl FromStr for Filter {
    type Err = ParseFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let filter = match s.trim().to_ascii_uppercase().as_str() {
            "DEFAULT" => Filter::Default,
            "BOX" => Filter::Box,
            "NEAREST" => Filter::Nearest,
            "HERMITE" => Filter::Hermite,
            "MITCHELL" => Filter::Mitchell,
            "LANCZOS" => Filter::Lanczos,
            "NORMALS" | "GAUSSIAN_NORMALS" => Filter::GaussianNormals,
            "GAUSSIAN" | "GAUSSIAN_SCALARS" => Filter::GaussianScalars,
            "MIN" | "MINIMUM" => Filter::Minimum,
            _ => {
                return Err(ParseFilterError {
                    name: s.to_string(),
                });
            }
        };
        Ok(filter)
    }
}
