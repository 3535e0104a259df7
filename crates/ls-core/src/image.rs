use crate::Error;

/// Dense row-major float image with interleaved channels.
///
/// Pixel `(x, y)` occupies `data[(y * width + x) * channels..][..channels]`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LinearImage {
    width: usize,
    height: usize,
    channels: usize,
    data: Vec<f32>,
}

impl LinearImage {
    /// Allocates a zero-filled image.
    pub fn new(width: usize, height: usize, channels: usize) -> Self {
        Self::new_fill(width, height, channels, 0.0)
    }

    pub fn new_fill(width: usize, height: usize, channels: usize, value: f32) -> Self {
        assert!(channels > 0, "image must have at least one channel");
        let len = width
            .checked_mul(height)
            .and_then(|v| v.checked_mul(channels))
            .expect("image size overflow");
        Self {
            width,
            height,
            channels,
            data: vec![value; len],
        }
    }

    pub fn from_vec(
        width: usize,
        height: usize,
        channels: usize,
        data: Vec<f32>,
    ) -> Result<Self, Error> {
        if channels == 0 {
            return Err(Error::ZeroChannels);
        }

        let expected = width
            .checked_mul(height)
            .and_then(|v| v.checked_mul(channels))
            .ok_or(Error::SizeMismatch {
                expected: usize::MAX,
                actual: data.len(),
            })?;

        if data.len() != expected {
            return Err(Error::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }

        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    /// Builds an image from 8-bit samples, mapping `0..=255` onto `0.0..=1.0`.
    pub fn from_u8(width: usize, height: usize, channels: usize, data: &[u8]) -> Result<Self, Error> {
        let values = data.iter().map(|&v| v as f32 / 255.0).collect();
        Self::from_vec(width, height, channels, values)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Number of floats in one row.
    pub fn row_len(&self) -> usize {
        self.width * self.channels
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    pub fn row(&self, y: usize) -> &[f32] {
        assert!(y < self.height, "row index out of bounds");
        let len = self.row_len();
        &self.data[y * len..(y + 1) * len]
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<&[f32]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let start = (y * self.width + x) * self.channels;
        self.data.get(start..start + self.channels)
    }

    pub fn pixel_mut(&mut self, x: usize, y: usize) -> Option<&mut [f32]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let start = (y * self.width + x) * self.channels;
        self.data.get_mut(start..start + self.channels)
    }

    /// Copies a rectangular block into a new image.
    pub fn crop(&self, x: usize, y: usize, width: usize, height: usize) -> Result<Self, Error> {
        if x > self.width
            || y > self.height
            || width > (self.width - x)
            || height > (self.height - y)
        {
            return Err(Error::OutOfBounds);
        }

        let nchan = self.channels;
        let mut data = Vec::with_capacity(width * height * nchan);
        for row in y..y + height {
            let src = self.row(row);
            data.extend_from_slice(&src[x * nchan..(x + width) * nchan]);
        }

        Ok(Self {
            width,
            height,
            channels: nchan,
            data,
        })
    }

    /// Returns a new image with rows and columns swapped.
    ///
    /// Pixel `(x, y)` of `self` becomes pixel `(y, x)` of the result. Channel
    /// order within a pixel is preserved.
    pub fn transpose(&self) -> Self {
        let (w, h, nchan) = (self.width, self.height, self.channels);
        let mut out = Self::new(h, w, nchan);
        if self.data.is_empty() {
            return out;
        }

        for (y, src_row) in self.data.chunks_exact(w * nchan).enumerate() {
            for (x, px) in src_row.chunks_exact(nchan).enumerate() {
                let dst = (x * h + y) * nchan;
                out.data[dst..dst + nchan].copy_from_slice(px);
            }
        }
        out
    }

    /// Converts to 8-bit samples, clamping to `0.0..=1.0` first.
    pub fn to_u8(&self) -> Vec<u8> {
        self.data
            .iter()
            .map(|&v| (v.clamp(0.0, 1.0) * 255.0).round() as u8)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::LinearImage;
    use crate::Error;

    #[test]
    fn from_vec_checks_length_and_channels() {
        let err = LinearImage::from_vec(2, 2, 3, vec![0.0; 11]).expect_err("short buffer");
        assert_eq!(
            err,
            Error::SizeMismatch {
                expected: 12,
                actual: 11
            }
        );

        let err = LinearImage::from_vec(2, 2, 0, Vec::new()).expect_err("zero channels");
        assert_eq!(err, Error::ZeroChannels);

        let img = LinearImage::from_vec(2, 2, 3, vec![0.0; 12]).expect("valid image");
        assert_eq!(img.row_len(), 6);
    }

    #[test]
    fn pixel_indexing_with_channels() {
        let img = LinearImage::from_vec(
            2,
            2,
            2,
            vec![
                1.0, 2.0, 3.0, 4.0, // row 0
                5.0, 6.0, 7.0, 8.0, // row 1
            ],
        )
        .expect("valid image");

        assert_eq!(img.pixel(1, 0), Some(&[3.0, 4.0][..]));
        assert_eq!(img.pixel(0, 1), Some(&[5.0, 6.0][..]));
        assert_eq!(img.pixel(2, 0), None);
        assert_eq!(img.row(1), &[5.0, 6.0, 7.0, 8.0]);
    }

    #[test]
    fn transpose_swaps_axes_and_keeps_channels() {
        let img = LinearImage::from_vec(
            3,
            2,
            2,
            vec![
                0.0, 0.5, 1.0, 1.5, 2.0, 2.5, // row 0
                10.0, 10.5, 11.0, 11.5, 12.0, 12.5, // row 1
            ],
        )
        .expect("valid image");

        let t = img.transpose();
        assert_eq!((t.width(), t.height(), t.channels()), (2, 3, 2));
        assert_eq!(t.pixel(1, 2), img.pixel(2, 1));
        assert_eq!(t.pixel(0, 1), Some(&[1.0, 1.5][..]));
        assert_eq!(t.transpose(), img);
    }

    #[test]
    fn crop_copies_block() {
        let img = LinearImage::from_vec(3, 3, 1, (0..9).map(|v| v as f32).collect())
            .expect("valid image");
        let sub = img.crop(1, 1, 2, 2).expect("valid crop");
        assert_eq!(sub.data(), &[4.0, 5.0, 7.0, 8.0]);
        assert_eq!(img.crop(2, 0, 2, 1), Err(Error::OutOfBounds));
    }

    #[test]
    fn u8_conversion_clamps() {
        let img = LinearImage::from_u8(2, 1, 1, &[0, 255]).expect("valid image");
        assert_eq!(img.data(), &[0.0, 1.0]);

        let out = LinearImage::from_vec(3, 1, 1, vec![-0.5, 0.5, 2.0]).expect("valid image");
        assert_eq!(out.to_u8(), vec![0, 128, 255]);
    }
}
