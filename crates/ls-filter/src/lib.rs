//! Reconstruction kernels and per-axis resampling programs.
//!
//! A resize along one axis is compiled into a [`MadProgram`]: a flat list of
//! `(target, source, weight)` multiply-adds. The program depends only on the
//! row lengths, the source region and the kernel, so it is generated once and
//! replayed for every row.
//!
//! Coordinates follow the normalized convention: `0` is the outer edge of the
//! first sample and `1` the outer edge of the last one, so sample `i` of `n`
//! sits at `(i + 0.5) / n`.

pub mod filter;
pub mod kernels;
pub mod program;

pub use filter::{Filter, ParseFilterError};
pub use kernels::{FilterFn, KernelShape};
pub use program::{MadInstruction, MadProgram};
