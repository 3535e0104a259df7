use ls_core::LinearImage;
use ls_filter::Filter;

use crate::sampler::resample_with_filter;

/// Number of levels below the base of a full chain for `source`.
///
/// Each level halves both dimensions (clamped to at least 1) until the image
/// is 1x1. Returns 0 for an empty or 1x1 image.
pub fn mipmap_count(source: &LinearImage) -> usize {
    if source.is_empty() {
        return 0;
    }
    let (mut w, mut h) = (source.width(), source.height());
    let mut count = 0;
    while w > 1 || h > 1 {
        (w, h) = half_size(w, h);
        count += 1;
    }
    count
}

fn half_size(w: usize, h: usize) -> (usize, usize) {
    ((w / 2).max(1), (h / 2).max(1))
}

/// Reusable chain of successively halved images.
///
/// Level 0 is a copy of the input. Each next level resamples the previous one
/// to half its size with the chosen filter. Building stops early once a level
/// is 1x1.
#[derive(Debug, Default, Clone)]
pub struct MipChain {
    levels: Vec<LinearImage>,
}

impl MipChain {
    pub fn new() -> Self {
        Self { levels: Vec::new() }
    }

    /// Builds up to `num_levels` levels (including the base) from `source`.
    ///
    /// The base buffer is reused when its shape matches the previous build.
    pub fn build(&mut self, source: &LinearImage, filter: Filter, num_levels: usize) {
        let build_levels = num_levels.min(mipmap_count(source) + 1);
        if build_levels == 0 || source.is_empty() {
            self.levels.clear();
            return;
        }

        self.levels.truncate(build_levels);
        match self.levels.first_mut() {
            Some(base) if same_shape(base, source) => base.data_mut().copy_from_slice(source.data()),
            Some(base) => *base = source.clone(),
            None => self.levels.push(source.clone()),
        }

        for level_idx in 1..build_levels {
            let prev = &self.levels[level_idx - 1];
            let (w, h) = half_size(prev.width(), prev.height());
            let next = resample_with_filter(prev, w, h, filter);
            log::trace!("mip level {level_idx}: {w}x{h}");
            if level_idx < self.levels.len() {
                self.levels[level_idx] = next;
            } else {
                self.levels.push(next);
            }
        }
    }

    pub fn level(&self, i: usize) -> Option<&LinearImage> {
        self.levels.get(i)
    }

    pub fn num_levels(&self) -> usize {
        self.levels.len()
    }

    pub fn levels(&self) -> &[LinearImage] {
        &self.levels
    }
}

fn same_shape(a: &LinearImage, b: &LinearImage) -> bool {
    a.width() == b.width() && a.height() == b.height() && a.channels() == b.channels()
}

#[cfg(test)]
mod tests {
    use ls_core::LinearImage;
    use ls_filter::Filter;

    use crate::mipmap::{MipChain, mipmap_count};

    #[test]
    fn count_halves_until_one_by_one() {
        assert_eq!(mipmap_count(&LinearImage::new(16, 16, 1)), 4);
        assert_eq!(mipmap_count(&LinearImage::new(16, 4, 3)), 4);
        assert_eq!(mipmap_count(&LinearImage::new(5, 1, 1)), 2);
        assert_eq!(mipmap_count(&LinearImage::new(1, 1, 1)), 0);
        assert_eq!(mipmap_count(&LinearImage::new(0, 7, 1)), 0);
    }

    #[test]
    fn chain_stops_at_one_by_one() {
        let src = LinearImage::new_fill(16, 4, 2, 0.25);
        let mut chain = MipChain::new();
        chain.build(&src, Filter::Box, 10);

        assert_eq!(chain.num_levels(), 5);
        let dims: Vec<(usize, usize)> = chain
            .levels()
            .iter()
            .map(|level| (level.width(), level.height()))
            .collect();
        assert_eq!(dims, vec![(16, 4), (8, 2), (4, 1), (2, 1), (1, 1)]);
        for level in chain.levels() {
            assert_eq!(level.channels(), 2);
            assert!(level.data().iter().all(|v| (v - 0.25).abs() < 1e-6));
        }
    }

    #[test]
    fn level_zero_is_copy_and_level_one_is_block_average() {
        let src = LinearImage::from_vec(4, 4, 1, (0..16).map(|v| v as f32).collect())
            .expect("valid image");
        let mut chain = MipChain::new();
        chain.build(&src, Filter::Box, 2);

        assert_eq!(chain.num_levels(), 2);
        assert_eq!(chain.level(0), Some(&src));
        let l1 = chain.level(1).expect("level 1");
        for (a, e) in l1.data().iter().zip([2.5, 4.5, 10.5, 12.5]) {
            assert!((a - e).abs() < 1e-5, "{a} vs {e}");
        }
        assert!(chain.level(2).is_none());
    }

    #[test]
    fn rebuild_reuses_base_and_can_shrink() {
        let src = LinearImage::new_fill(8, 8, 3, 1.0);
        let mut chain = MipChain::new();
        chain.build(&src, Filter::Mitchell, 4);
        let base_ptr = chain.level(0).expect("level 0").data().as_ptr();

        let src2 = LinearImage::new_fill(8, 8, 3, 0.5);
        chain.build(&src2, Filter::Mitchell, 2);
        assert_eq!(chain.num_levels(), 2);
        assert_eq!(chain.level(0).expect("level 0").data().as_ptr(), base_ptr);
        assert_eq!(chain.level(0), Some(&src2));
    }

    #[test]
    fn build_zero_levels_clears_chain() {
        let src = LinearImage::new_fill(4, 4, 1, 1.0);
        let mut chain = MipChain::new();
        chain.build(&src, Filter::Box, 2);
        assert_eq!(chain.num_levels(), 2);
        chain.build(&src, Filter::Box, 0);
        assert_eq!(chain.num_levels(), 0);
    }
}
