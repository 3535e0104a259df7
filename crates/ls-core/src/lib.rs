//! Foundational types for the linear-sampler workspace.
//!
//! ## Image Layout
//! [`LinearImage`] stores `width * height` pixels in row-major order with
//! `channels` interleaved `f32` values per pixel. Rows are tightly packed; there
//! is no separate stride. [`LinearImage::transpose`] swaps the two spatial axes,
//! which is how a single row-oriented pass is reused for columns.
//!
//! ## Normalized Coordinates
//! Source regions use normalized coordinates where `0` and `1` are the outer
//! edges of the first and last pixel. Pixel `i` of `n` has its center at
//! `(i + 0.5) / n`.

mod boundary;
mod error;
mod geom;
mod image;

pub use boundary::{Boundaries, Boundary};
pub use error::Error;
pub use geom::{Region, Vec3f};
pub use image::LinearImage;
