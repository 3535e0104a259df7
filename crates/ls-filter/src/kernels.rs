use core::f32::consts::{FRAC_1_SQRT_2, FRAC_2_SQRT_PI, PI};

use crate::Filter;

/// Continuous kernel shapes.
///
/// `t` is the non-negative distance from the kernel center in units of the
/// kernel's natural half-width. Every shape is zero outside its support.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KernelShape {
    Box,
    Gaussian,
    Hermite,
    Mitchell,
    Lanczos,
}

// Mitchell-Netravali with B = C = 1/3.
const MITCHELL_B: f32 = 1.0 / 3.0;
const MITCHELL_C: f32 = 1.0 / 3.0;
const MITCHELL_P0: f32 = (6.0 - 2.0 * MITCHELL_B) / 6.0;
const MITCHELL_P2: f32 = (-18.0 + 12.0 * MITCHELL_B + 6.0 * MITCHELL_C) / 6.0;
const MITCHELL_P3: f32 = (12.0 - 9.0 * MITCHELL_B - 6.0 * MITCHELL_C) / 6.0;
const MITCHELL_Q0: f32 = (8.0 * MITCHELL_B + 24.0 * MITCHELL_C) / 6.0;
const MITCHELL_Q1: f32 = (-12.0 * MITCHELL_B - 48.0 * MITCHELL_C) / 6.0;
const MITCHELL_Q2: f32 = (6.0 * MITCHELL_B + 30.0 * MITCHELL_C) / 6.0;
const MITCHELL_Q3: f32 = (-MITCHELL_B - 6.0 * MITCHELL_C) / 6.0;

// 1 / sqrt(pi / 2)
const GAUSSIAN_SCALE: f32 = FRAC_2_SQRT_PI * FRAC_1_SQRT_2;

impl KernelShape {
    #[inline]
    pub fn eval(self, t: f32) -> f32 {
        match self {
            KernelShape::Box => {
                if t <= 0.5 {
                    1.0
                } else {
                    0.0
                }
            }
            KernelShape::Gaussian => {
                if t >= 2.0 {
                    return 0.0;
                }
                (-2.0 * t * t).exp() * GAUSSIAN_SCALE
            }
            KernelShape::Hermite => {
                if t >= 1.0 {
                    return 0.0;
                }
                (2.0 * t - 3.0) * t * t + 1.0
            }
            KernelShape::Mitchell => {
                if t >= 2.0 {
                    return 0.0;
                }
                if t >= 1.0 {
                    return MITCHELL_Q0 + t * (MITCHELL_Q1 + t * (MITCHELL_Q2 + t * MITCHELL_Q3));
                }
                MITCHELL_P0 + t * t * (MITCHELL_P2 + t * MITCHELL_P3)
            }
            KernelShape::Lanczos => {
                if t >= 1.0 {
                    return 0.0;
                }
                let s = sinc(t);
                s * s
            }
        }
    }
}

// Evaluated directly; programs are built once per pass, not per pixel.
fn sinc(t: f32) -> f32 {
    if t <= 0.00001 {
        return 1.0;
    }
    (PI * t).sin() / (PI * t)
}

/// A kernel shape together with its support and rejection policy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterFn {
    pub shape: KernelShape,
    /// Half-width of the non-zero support, in the shape's own domain.
    pub bounding_radius: f32,
    /// Drop candidates that fall outside the image or the requested region
    /// instead of weighting them.
    pub reject_external: bool,
}

impl FilterFn {
    pub const BOX: Self = Self::new(KernelShape::Box, 1.0);
    /// Box shape with zero radius, which degenerates to point sampling.
    pub const NEAREST: Self = Self::new(KernelShape::Box, 0.0);
    pub const GAUSSIAN: Self = Self::new(KernelShape::Gaussian, 2.0);
    pub const HERMITE: Self = Self::new(KernelShape::Hermite, 1.0);
    pub const MITCHELL: Self = Self::new(KernelShape::Mitchell, 2.0);
    pub const LANCZOS: Self = Self::new(KernelShape::Lanczos, 1.0);

    pub const fn new(shape: KernelShape, bounding_radius: f32) -> Self {
        Self {
            shape,
            bounding_radius,
            reject_external: true,
        }
    }

    /// Kernel table lookup.
    ///
    /// # Panics
    /// Panics on [`Filter::Default`], which must be resolved by the caller
    /// first (see [`Filter::resolve`]).
    pub fn for_filter(filter: Filter) -> Self {
        match filter {
            Filter::Minimum | Filter::Box => Self::BOX,
            Filter::Nearest => Self::NEAREST,
            Filter::Hermite => Self::HERMITE,
            Filter::Mitchell => Self::MITCHELL,
            Filter::Lanczos => Self::LANCZOS,
            Filter::GaussianNormals | Filter::GaussianScalars => Self::GAUSSIAN,
            Filter::Default => panic!("unresolved filter type: resolve Filter::Default first"),
        }
    }

    #[inline]
    pub fn eval(&self, t: f32) -> f32 {
        self.shape.eval(t)
    }
}
