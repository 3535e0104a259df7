use ls_core::{LinearImage, Region};
use ls_filter::{Filter, MadProgram};

use crate::resample1d::resample_1d;

const POINT_RADIUS: f32 = 1.0;

/// Caller-owned storage for one sampled pixel.
///
/// Allocated on first use and reused by later calls.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SinglePixel {
    data: Vec<f32>,
}

impl SinglePixel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Channel values of the last sample, or `None` before the first one.
    pub fn get(&self) -> Option<&[f32]> {
        if self.data.is_empty() {
            None
        } else {
            Some(&self.data)
        }
    }

    pub fn channels(&self) -> usize {
        self.data.len()
    }

    fn prepare(&mut self, channels: usize) -> &mut [f32] {
        if self.data.len() != channels {
            self.data.resize(channels, 0.0);
        }
        &mut self.data
    }
}

/// Evaluates `source` at the normalized coordinate `(x, y)`.
///
/// The footprint spans one source pixel on each side of the point. The image
/// is reduced to a single column around `x`, then to a single pixel around
/// `y`, and the result is written into `result`.
pub fn sample_point(source: &LinearImage, x: f32, y: f32, filter: Filter, result: &mut SinglePixel) {
    let region = Region::around(x, y, POINT_RADIUS, source.width(), source.height());
    let mut program = MadProgram::new();

    let column = resample_1d(
        source,
        &mut program,
        1,
        filter,
        region.left,
        region.right,
        POINT_RADIUS,
    )
    .transpose();
    let pixel = resample_1d(
        &column,
        &mut program,
        1,
        filter,
        region.top,
        region.bottom,
        POINT_RADIUS,
    );

    let nchan = source.channels();
    result.prepare(nchan).copy_from_slice(&pixel.data()[..nchan]);
}

#[cfg(test)]
mod tests {
    use ls_core::LinearImage;
    use ls_filter::Filter;

    use crate::point::{SinglePixel, sample_point};

    fn grid_4x4() -> LinearImage {
        LinearImage::from_vec(
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
        .expect("valid image")
    }

    #[test]
    fn pixel_is_allocated_lazily_and_reused() {
        let src = LinearImage::new_fill(3, 3, 4, 0.5);
        let mut px = SinglePixel::new();
        assert!(px.get().is_none());

        sample_point(&src, 0.5, 0.5, Filter::Box, &mut px);
        assert_eq!(px.channels(), 4);
        let first = px.get().expect("allocated").as_ptr();
        for v in px.get().expect("allocated") {
            assert!((v - 0.5).abs() < 1e-6);
        }

        sample_point(&src, 0.1, 0.9, Filter::Box, &mut px);
        assert_eq!(px.get().expect("allocated").as_ptr(), first);
    }

    #[test]
    fn nearest_picks_containing_pixel() {
        let src = grid_4x4();
        let mut px = SinglePixel::new();

        sample_point(&src, 0.625, 0.375, Filter::Nearest, &mut px);
        assert_eq!(px.get(), Some(&[6.0][..]));

        sample_point(&src, 0.1, 0.9, Filter::Nearest, &mut px);
        assert_eq!(px.get(), Some(&[12.0][..]));
    }

    #[test]
    fn box_averages_neighborhood() {
        let src = grid_4x4();
        let mut px = SinglePixel::new();

        // Pixel centers within half a pixel of the point contribute:
        // columns 0..=1 and rows 1..=2.
        sample_point(&src, 0.3, 0.6, Filter::Box, &mut px);
        let v = px.get().expect("allocated")[0];
        assert!((v - 6.5).abs() < 1e-5, "{v}");

        // On the shared corner of four pixels the 2x2 block contributes.
        sample_point(&src, 0.5, 0.5, Filter::Box, &mut px);
        let v = px.get().expect("allocated")[0];
        assert!((v - 7.5).abs() < 1e-5, "{v}");
    }

    #[test]
    fn channel_count_change_resizes_storage() {
        let mut px = SinglePixel::new();
        sample_point(&LinearImage::new_fill(2, 2, 3, 1.0), 0.5, 0.5, Filter::Box, &mut px);
        assert_eq!(px.channels(), 3);
        sample_point(&LinearImage::new_fill(2, 2, 1, 2.0), 0.5, 0.5, Filter::Box, &mut px);
        assert_eq!(px.get(), Some(&[2.0][..]));
    }
}
