//! End-to-end conversion of one image.
//!
//! The stages run in a fixed order, each consuming the previous result:
//!
//! ```text
//! LOAD -> VALIDATE -> DETECT_ALPHA -> MIX -> TONE -> RECOMBINE -> ENCODE
//! ```
//!
//! [`Pipeline::process`] covers VALIDATE through RECOMBINE on an
//! already-decoded image and touches no files. [`Pipeline::run`] adds the
//! load and encode steps; the output file only appears once encoding
//! succeeded.
//!
//! # Example
//!
//! ```rust,ignore
//! use c2g_ops::{MixForm, Pipeline, Settings};
//!
//! let settings = Settings::default().with_form(MixForm::Rms);
//! let summary = Pipeline::new(settings).run("photo.png", "photo-gray.png")?;
//! println!("{}x{}", summary.width, summary.height);
//! ```

use crate::alpha::{extract_alpha, recombine};
use crate::mixer::mix;
use crate::params::MixForm;
use crate::settings::Settings;
use crate::tone::adjust;
use crate::{OpsError, OpsResult};
use c2g_core::ImageBuffer;
use c2g_io::{ImageData, WriteOptions};
use std::path::Path;
use tracing::{debug, info, trace};

/// What a successful [`Pipeline::run`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Mixing form used.
    pub form: MixForm,
    /// Whether partial transparency was carried to the output.
    pub had_alpha: bool,
}

/// A configured grayscale conversion.
#[derive(Debug, Clone)]
pub struct Pipeline {
    settings: Settings,
    jpeg_quality: u8,
}

impl Pipeline {
    /// Creates a pipeline with the given settings.
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            jpeg_quality: WriteOptions::default().jpeg_quality,
        }
    }

    /// Sets the quality used when the output is JPEG.
    pub fn with_jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = quality;
        self
    }

    /// The settings this pipeline applies.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Converts a decoded image to grayscale.
    ///
    /// # Errors
    ///
    /// - [`OpsError::Colorspace`] if the image is not RGB or sRGB
    /// - [`OpsError::SizeMismatch`] if alpha and gray disagree on size
    pub fn process(&self, image: &ImageData) -> OpsResult<ImageBuffer> {
        let model = &image.metadata.color_model;
        if !model.is_rgb() {
            return Err(OpsError::Colorspace {
                found: model.to_string(),
            });
        }

        let buffer = &image.buffer;
        trace!(
            width = buffer.width(),
            height = buffer.height(),
            layout = ?buffer.layout(),
            "process"
        );

        let alpha = extract_alpha(buffer);
        let Settings {
            weights,
            form,
            space,
            tone,
        } = self.settings;

        let gray = mix(buffer, form, &weights, space);
        let gray = adjust(gray, &tone);

        if let Some((lo, hi)) = gray.min_max() {
            debug!(min = lo, max = hi, mean = gray.mean(), "gray plane");
        }

        recombine(gray, alpha)
    }

    /// Reads `input`, converts it, and writes the result to `output`.
    ///
    /// The output format follows the output extension. Bit depth follows
    /// the input: 16-bit stays 16-bit, and float input stays float where the
    /// output format can hold it (TIFF), so alpha is carried bit for bit.
    ///
    /// # Errors
    ///
    /// - [`OpsError::InputFile`] if the input cannot be read or decoded
    /// - anything [`process`](Self::process) reports
    /// - [`OpsError::Output`] if encoding or writing fails; no file is left
    ///   at `output` in that case
    pub fn run<P, Q>(&self, input: P, output: Q) -> OpsResult<RunSummary>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        let input = input.as_ref();
        let output = output.as_ref();
        info!(
            input = %input.display(),
            output = %output.display(),
            settings = %self.settings,
            "converting"
        );

        let image = c2g_io::read(input).map_err(|source| OpsError::InputFile {
            path: input.to_path_buf(),
            source,
        })?;

        let result = self.process(&image)?;
        let had_alpha = result.layout().has_alpha();

        let options = WriteOptions::default()
            .with_bit_depth(image.metadata.bit_depth)
            .with_jpeg_quality(self.jpeg_quality);
        c2g_io::write(output, &result, &options).map_err(|source| OpsError::Output {
            path: output.to_path_buf(),
            source,
        })?;

        let summary = RunSummary {
            width: result.width(),
            height: result.height(),
            form: self.settings.form,
            had_alpha,
        };
        info!(
            output = %output.display(),
            width = summary.width,
            height = summary.height,
            alpha = had_alpha,
            "done"
        );
        Ok(summary)
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{ChannelWeights, DesatSpace};
    use crate::tone::BrightnessContrast;
    use approx::assert_abs_diff_eq;
    use c2g_core::{ColorModel, Layout};
    use c2g_io::{Format, Metadata};

    fn decoded(layout: Layout, data: Vec<f32>, width: u32, model: ColorModel) -> ImageData {
        let height = (data.len() / layout.channels()) as u32 / width;
        let buffer = ImageBuffer::from_data(width, height, layout, data).unwrap();
        ImageData::new(
            buffer,
            Metadata {
                format: Format::Png,
                color_model: model,
                bit_depth: 8,
            },
        )
    }

    #[test]
    fn rejects_non_rgb_models() {
        for model in [ColorModel::Gray, ColorModel::Cmyk, ColorModel::Other("Lab".into())] {
            let image = decoded(Layout::Rgb, vec![0.5; 3], 1, model);
            assert!(matches!(
                Pipeline::default().process(&image),
                Err(OpsError::Colorspace { .. })
            ));
        }
    }

    #[test]
    fn linear_rgb_is_accepted() {
        let image = decoded(Layout::Rgb, vec![0.5; 3], 1, ColorModel::Rgb);
        assert!(Pipeline::default().process(&image).is_ok());
    }

    #[test]
    fn opaque_rgb_becomes_gray() {
        let image = decoded(Layout::Rgb, vec![0.2, 0.8, 0.5, 1.0, 1.0, 1.0], 2, ColorModel::Srgb);
        let out = Pipeline::default().process(&image).unwrap();

        assert_eq!(out.layout(), Layout::Gray);
        let expected = 0.299 * 0.2 + 0.587 * 0.8 + 0.114 * 0.5;
        assert_abs_diff_eq!(out.as_slice()[0], expected, epsilon = 1e-5);
        assert_abs_diff_eq!(out.as_slice()[1], 1.0, epsilon = 1e-5);
    }

    #[test]
    fn alpha_survives_tone() {
        let image = decoded(
            Layout::Rgba,
            vec![0.2, 0.8, 0.5, 0.3, 0.9, 0.1, 0.1, 1.0],
            2,
            ColorModel::Srgb,
        );
        let settings = Settings::default().with_tone(BrightnessContrast::new(40.0, 60.0).unwrap());
        let out = Pipeline::new(settings).process(&image).unwrap();

        assert_eq!(out.layout(), Layout::Rgba);
        let alpha = out.alpha().unwrap();
        assert_eq!(alpha.as_slice(), &[0.3, 1.0]);
        for px in out.as_slice().chunks_exact(4) {
            assert_eq!(px[0], px[1]);
            assert_eq!(px[1], px[2]);
        }
    }

    #[test]
    fn tone_runs_after_mix() {
        let image = decoded(Layout::Rgb, vec![0.2, 0.8, 0.5], 1, ColorModel::Srgb);
        let settings = Settings::default()
            .with_weights(ChannelWeights::new(100.0, 0.0, 0.0))
            .with_tone(BrightnessContrast::new(10.0, 0.0).unwrap());
        let out = Pipeline::new(settings).process(&image).unwrap();
        assert_abs_diff_eq!(out.as_slice()[0], 0.3, epsilon = 1e-6);
    }

    #[test]
    fn desat_uses_space() {
        let image = decoded(Layout::Rgb, vec![0.9, 0.6, 0.1], 1, ColorModel::Srgb);
        let settings = Settings::default()
            .with_form(MixForm::Desat)
            .with_space(DesatSpace::Hsb);
        let out = Pipeline::new(settings).process(&image).unwrap();
        assert_abs_diff_eq!(out.as_slice()[0], 0.9, epsilon = 1e-6);
    }

    #[test]
    fn missing_input_is_input_error() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.png");
        let result = Pipeline::default().run(dir.path().join("missing.png"), &output);

        assert!(matches!(result, Err(OpsError::InputFile { .. })));
        assert!(!output.exists());
    }
}
