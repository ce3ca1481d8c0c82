//! # c2g-ops
//!
//! Color to grayscale conversion.
//!
//! # Modules
//!
//! - [`params`] - weights, mixing form, colorspace and their parsers
//! - [`mixer`] - the `add`, `rms` and `desat` reductions
//! - [`colorspace`] - HSL/HSB/HCL conversions and achromatic components
//! - [`tone`] - brightness/contrast
//! - [`alpha`] - transparency detection and recombination
//! - [`pipeline`] - load, convert, write
//!
//! # Example
//!
//! ```rust
//! use c2g_core::{ColorModel, ImageBuffer, Layout};
//! use c2g_io::{Format, ImageData, Metadata};
//! use c2g_ops::{Pipeline, Settings};
//!
//! let buffer = ImageBuffer::from_data(1, 1, Layout::Rgba, vec![0.2, 0.8, 0.5, 0.5]).unwrap();
//! let image = ImageData::new(buffer, Metadata {
//!     format: Format::Png,
//!     color_model: ColorModel::Srgb,
//!     bit_depth: 8,
//! });
//!
//! let gray = Pipeline::new(Settings::default()).process(&image).unwrap();
//! assert_eq!(gray.layout(), Layout::Rgba);
//! assert_eq!(gray.alpha().unwrap().as_slice(), &[0.5]);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod alpha;
pub mod colorspace;
pub mod mixer;
pub mod params;
pub mod pipeline;
pub mod settings;
pub mod tone;

pub use error::{OpsError, OpsResult};
pub use params::{ChannelWeights, DesatSpace, MixForm};
pub use pipeline::{Pipeline, RunSummary};
pub use settings::Settings;
pub use tone::BrightnessContrast;
