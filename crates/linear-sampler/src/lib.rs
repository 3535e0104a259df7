//! Umbrella crate for the `linear-sampler` workspace.
//!
//! Re-exports the image buffer and geometry types, the filter kernels and
//! program generator, and the resampling entry points.

pub use ls_core::*;
pub use ls_filter::*;
pub use ls_resample::*;
