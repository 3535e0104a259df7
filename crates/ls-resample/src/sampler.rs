use ls_core::{Boundaries, LinearImage, Region};
use ls_filter::{Filter, MadProgram};

use crate::resample1d::resample_1d;

/// Parameters of a 2D resample.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SamplerConfig {
    pub horizontal_filter: Filter,
    pub vertical_filter: Filter,
    /// Scales kernel support without changing its shape.
    pub filter_radius_multiplier: f32,
    /// Part of the source mapped onto the result, in normalized coordinates.
    pub source_region: Region,
    pub boundaries: Boundaries,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            horizontal_filter: Filter::Default,
            vertical_filter: Filter::Default,
            filter_radius_multiplier: 1.0,
            source_region: Region::FULL,
            boundaries: Boundaries::EXCLUDE,
        }
    }
}

impl SamplerConfig {
    /// Default configuration using `filter` on both axes.
    pub fn with_filter(filter: Filter) -> Self {
        Self {
            horizontal_filter: filter,
            vertical_filter: filter,
            ..Self::default()
        }
    }
}

/// Resizes `source` to `width x height` with two separable passes.
///
/// The horizontal pass uses the region's left/right bounds, the vertical pass
/// runs on the transposed intermediate with the top/bottom bounds.
///
/// # Panics
/// Panics if any edge uses a boundary mode other than
/// [`Boundary::Exclude`](ls_core::Boundary::Exclude).
pub fn resample(
    source: &LinearImage,
    width: usize,
    height: usize,
    config: &SamplerConfig,
) -> LinearImage {
    assert!(
        config.boundaries.all_exclude(),
        "only Boundary::Exclude is implemented, got {:?}",
        config.boundaries
    );

    let region = config.source_region;
    let radius = config.filter_radius_multiplier;
    let mut program = MadProgram::new();

    let horizontal = resample_1d(
        source,
        &mut program,
        width,
        config.horizontal_filter,
        region.left,
        region.right,
        radius,
    )
    .transpose();
    log::trace!(
        "horizontal pass done: {}x{} -> {}x{}",
        source.width(),
        source.height(),
        horizontal.height(),
        horizontal.width()
    );

    resample_1d(
        &horizontal,
        &mut program,
        height,
        config.vertical_filter,
        region.top,
        region.bottom,
        radius,
    )
    .transpose()
}

/// Resizes with `filter` on both axes and otherwise default settings.
pub fn resample_with_filter(
    source: &LinearImage,
    width: usize,
    height: usize,
    filter: Filter,
) -> LinearImage {
    resample(source, width, height, &SamplerConfig::with_filter(filter))
}

#[cfg(test)]
mod tests {
    use ls_core::{Boundaries, Boundary, LinearImage, Region};
    use ls_filter::Filter;

    use crate::sampler::{SamplerConfig, resample, resample_with_filter};

    fn ramp(width: usize, height: usize, channels: usize) -> LinearImage {
        let data = (0..width * height * channels)
            .map(|i| ((i * 37) % 101) as f32 / 100.0)
            .collect();
        LinearImage::from_vec(width, height, channels, data).expect("valid image")
    }

    fn assert_close(actual: &[f32], expected: &[f32], tol: f32) {
        assert_eq!(actual.len(), expected.len());
        for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
            assert!((a - e).abs() < tol, "index {i}: {a} vs {e}");
        }
    }

    #[test]
    fn same_size_box_and_nearest_reproduce_source() {
        let src = ramp(6, 6, 3);
        for filter in [Filter::Box, Filter::Nearest] {
            let out = resample_with_filter(&src, 6, 6, filter);
            assert_eq!((out.width(), out.height(), out.channels()), (6, 6, 3));
            assert_close(out.data(), src.data(), 1e-6);
        }
    }

    #[test]
    fn box_2x2_block_average() {
        let src = LinearImage::from_vec(
            4,
            4,
            1,
            vec![
                0.0, 1.0, 2.0, 3.0, //
                4.0, 5.0, 6.0, 7.0, //
                8.0, 9.0, 10.0, 11.0, //
                12.0, 13.0, 14.0, 15.0, //
            ],
        )
        .expect("valid image");

        let out = resample_with_filter(&src, 2, 2, Filter::Box);
        assert_close(out.data(), &[2.5, 4.5, 10.5, 12.5], 1e-5);
    }

    #[test]
    fn output_keeps_orientation_for_non_square_sizes() {
        let src = ramp(5, 3, 2);
        let out = resample_with_filter(&src, 8, 2, Filter::Mitchell);
        assert_eq!((out.width(), out.height(), out.channels()), (8, 2, 2));

        let src = LinearImage::from_vec(3, 2, 1, vec![1.0, 1.0, 1.0, 9.0, 9.0, 9.0])
            .expect("valid image");
        let out = resample_with_filter(&src, 3, 2, Filter::Nearest);
        assert_eq!(out.data(), &[1.0, 1.0, 1.0, 9.0, 9.0, 9.0]);
    }

    #[test]
    fn constant_image_stays_constant() {
        let src = LinearImage::new_fill(7, 5, 4, 0.375);
        for filter in Filter::ALL {
            if filter == Filter::GaussianNormals {
                continue;
            }
            for (w, h) in [(3, 2), (11, 9), (7, 5), (1, 1)] {
                let out = resample_with_filter(&src, w, h, filter);
                assert_close(out.data(), &vec![0.375; w * h * 4], 1e-5);
            }
        }
    }

    #[test]
    fn source_region_crops_before_resizing() {
        let src = ramp(8, 8, 1);
        let config = SamplerConfig {
            source_region: Region::new(0.5, 0.25, 1.0, 0.75),
            ..SamplerConfig::with_filter(Filter::Nearest)
        };
        let out = resample(&src, 4, 4, &config);
        let expected = src.crop(4, 2, 4, 4).expect("valid crop");
        assert_eq!(out, expected);
    }

    #[test]
    fn independent_filters_per_axis() {
        let src = ramp(4, 4, 1);
        let config = SamplerConfig {
            horizontal_filter: Filter::Box,
            vertical_filter: Filter::Nearest,
            ..SamplerConfig::default()
        };
        let out = resample(&src, 2, 4, &config);
        for y in 0..4 {
            let row = src.row(y);
            let expected = [(row[0] + row[1]) * 0.5, (row[2] + row[3]) * 0.5];
            assert_close(out.row(y), &expected, 1e-6);
        }
    }

    #[test]
    #[should_panic(expected = "only Boundary::Exclude")]
    fn non_exclude_boundary_is_fatal() {
        let src = ramp(4, 4, 1);
        let config = SamplerConfig {
            boundaries: Boundaries {
                south: Boundary::Clamp,
                ..Boundaries::EXCLUDE
            },
            ..SamplerConfig::default()
        };
        let _ = resample(&src, 2, 2, &config);
    }
}
