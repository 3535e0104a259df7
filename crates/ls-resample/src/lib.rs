//! Separable resampling of [`LinearImage`](ls_core::LinearImage) buffers.
//!
//! A 2D resize runs two row passes: the first over the source rows, the second
//! over the rows of the transposed intermediate. Each pass compiles one
//! [`MadProgram`](ls_filter::MadProgram) for its axis, expands it for the
//! channel count and replays it on every row.
//!
//! Filter resolution:
//! - [`Filter::Default`](ls_filter::Filter::Default) becomes Mitchell when a
//!   pass magnifies and Lanczos otherwise.
//! - [`Filter::Minimum`](ls_filter::Filter::Minimum) takes the minimum of the
//!   box footprint instead of a weighted sum.
//! - [`Filter::GaussianNormals`](ls_filter::Filter::GaussianNormals) filters
//!   3-channel vectors and rescales every result to unit length.
//!
//! With the default `parallel` feature rows are processed with rayon.

mod mipmap;
mod point;
mod resample1d;
mod sampler;

pub use mipmap::{MipChain, mipmap_count};
pub use point::{SinglePixel, sample_point};
pub use resample1d::{normalize_vectors, resample_1d};
pub use sampler::{SamplerConfig, resample, resample_with_filter};
