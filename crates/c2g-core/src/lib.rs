//! # c2g-core
//!
//! Core types for the color2gray pipeline.
//!
//! - [`Plane`] - single-channel `f32` buffer (grayscale result, alpha)
//! - [`ImageBuffer`] / [`Layout`] - interleaved multi-channel image
//! - [`ColorModel`] - color model tag reported by decoders
//! - [`Error`] / [`Result`] - shape validation errors
//!
//! ## Crate Structure
//!
//! ```text
//! c2g-core (this crate)
//!    ^
//!    +-- c2g-io  (decode / encode)
//!    +-- c2g-ops (mixing, tone, alpha, pipeline)
//!    +-- c2g-cli (color2gray binary)
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod buffer;
pub mod colormodel;
pub mod error;

pub use buffer::{ImageBuffer, Layout, Plane};
pub use colormodel::ColorModel;
pub use error::{Error, Result};
