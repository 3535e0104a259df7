use ls_core::{LinearImage, Vec3f};
use ls_filter::{Filter, FilterFn, MadInstruction, MadProgram};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Resamples every row of `source` to `target_width` samples.
///
/// `left` and `right` select the horizontal part of the source that maps onto
/// the result. [`Filter::Default`] resolves to Mitchell when magnifying and
/// Lanczos otherwise. `program` is scratch storage; it is cleared and refilled.
///
/// The result keeps the source height and channel count. Target samples with
/// no valid contributors stay `0.0` (or `f32::INFINITY` for
/// [`Filter::Minimum`]).
pub fn resample_1d(
    source: &LinearImage,
    program: &mut MadProgram,
    target_width: usize,
    filter: Filter,
    left: f32,
    right: f32,
    radius_multiplier: f32,
) -> LinearImage {
    let swidth = source.width();
    let sheight = source.height();
    let nchan = source.channels();
    let filter = filter.resolve(target_width > swidth);
    let kernel = FilterFn::for_filter(filter);

    program.clear();
    program.generate(target_width, swidth, left, right, &kernel, radius_multiplier);
    program.expand(nchan);
    log::debug!(
        "{filter} pass {swidth} -> {target_width} ({sheight} rows, {nchan} channels): {} instructions",
        program.len()
    );

    // Minimum starts from a sentinel and ignores weights.
    if filter == Filter::Minimum {
        let mut result = LinearImage::new_fill(target_width, sheight, nchan, f32::INFINITY);
        apply_rows(source, &mut result, program, min_row);
        return result;
    }

    let mut result = LinearImage::new(target_width, sheight, nchan);
    apply_rows(source, &mut result, program, mad_row);

    if filter == Filter::GaussianNormals {
        normalize_vectors(&mut result);
    }
    result
}

/// Rescales every pixel of a 3-channel image to unit length.
///
/// Zero vectors are left as zero.
///
/// # Panics
/// Panics if the image does not have exactly 3 channels.
pub fn normalize_vectors(image: &mut LinearImage) {
    assert_eq!(image.channels(), 3, "vector renormalization needs a 3-channel image");
    for px in image.data_mut().chunks_exact_mut(3) {
        Vec3f::from_slice(px).normalize().write_to(px);
    }
}

#[inline]
fn mad_row(dst: &mut [f32], src: &[f32], program: &[MadInstruction]) {
    for mad in program {
        dst[mad.target as usize] += src[mad.source as usize] * mad.weight;
    }
}

#[inline]
fn min_row(dst: &mut [f32], src: &[f32], program: &[MadInstruction]) {
    for mad in program {
        let t = &mut dst[mad.target as usize];
        *t = t.min(src[mad.source as usize]);
    }
}

fn apply_rows(
    source: &LinearImage,
    target: &mut LinearImage,
    program: &MadProgram,
    row_op: fn(&mut [f32], &[f32], &[MadInstruction]),
) {
    debug_assert_eq!(source.height(), target.height());
    let src_len = source.row_len();
    let dst_len = target.row_len();
    if program.is_empty() || src_len == 0 || dst_len == 0 {
        return;
    }

    let mads = program.instructions();

    #[cfg(feature = "parallel")]
    {
        target
            .data_mut()
            .par_chunks_exact_mut(dst_len)
            .zip(source.data().par_chunks_exact(src_len))
            .for_each(|(dst, src)| row_op(dst, src, mads));
    }

    #[cfg(not(feature = "parallel"))]
    {
        target
            .data_mut()
            .chunks_exact_mut(dst_len)
            .zip(source.data().chunks_exact(src_len))
            .for_each(|(dst, src)| row_op(dst, src, mads));
    }
}
