//! color2gray - convert a color image to grayscale
//!
//! Mixes RGB into one channel (weighted sum, weighted root of squares, or
//! colorspace desaturation), applies brightness/contrast, and keeps any
//! partial transparency.

use anyhow::{Context, Result};
use c2g_ops::params::{check_range, parse_number, TONE_MAX, TONE_MIN};
use c2g_ops::{
    BrightnessContrast, ChannelWeights, DesatSpace, MixForm, OpsError, OpsResult, Pipeline,
    Settings,
};
use clap::{ArgAction, Parser};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::debug;

mod logging;

#[derive(Parser, Debug)]
#[command(name = "color2gray")]
#[command(version, about = "Convert a color image to grayscale")]
#[command(long_about = "
Convert a color image to grayscale using one of three mixing forms,
optionally adjust brightness and contrast, and keep partial transparency.

Forms:
  add    clamp(r*R + g*G + b*B)
  rms    clamp(sqrt(r*R^2 + g*G^2 + b*B^2))   (no division by 3)
  desat  lightness (hsl), brightness (hsb) or luma (hcl); weights ignored

Examples:
  color2gray photo.jpg gray.jpg
  color2gray -r 100 -g 0 -b 0 photo.png red.png
  color2gray -f rms -r 33 -g 33 -b 34 photo.png rms.png
  color2gray -f desat -c hsb -B 10 -C 20 logo.png logo-gray.png
")]
struct Cli {
    /// Input and output image: infile outfile
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Red weight in percent (may be negative)
    #[arg(
        short = 'r',
        long = "red",
        default_value_t = 29.9,
        value_parser = parse_red,
        allow_negative_numbers = true
    )]
    red: f32,

    /// Green weight in percent (may be negative)
    #[arg(
        short = 'g',
        long = "green",
        default_value_t = 58.7,
        value_parser = parse_green,
        allow_negative_numbers = true
    )]
    green: f32,

    /// Blue weight in percent (may be negative)
    #[arg(
        short = 'b',
        long = "blue",
        default_value_t = 11.4,
        value_parser = parse_blue,
        allow_negative_numbers = true
    )]
    blue: f32,

    /// Mixing form: add, rms, desat (or a, r, d)
    #[arg(short = 'f', long = "form", default_value = "add", value_parser = parse_form)]
    form: MixForm,

    /// Desaturation colorspace: hsl, hsb, hcl
    #[arg(short = 'c', long = "colorspace", default_value = "hsl", value_parser = parse_space)]
    colorspace: DesatSpace,

    /// Brightness in percent, -100 to 100
    #[arg(
        short = 'B',
        long = "brightness",
        default_value_t = 0.0,
        value_parser = parse_brightness,
        allow_negative_numbers = true
    )]
    brightness: f32,

    /// Contrast in percent, -100 to 100
    #[arg(
        short = 'C',
        long = "contrast",
        default_value_t = 0.0,
        value_parser = parse_contrast,
        allow_negative_numbers = true
    )]
    contrast: f32,

    /// JPEG output quality (1-100)
    #[arg(
        short = 'q',
        long,
        default_value_t = 92,
        value_parser = clap::value_parser!(u8).range(1..=100)
    )]
    quality: u8,

    /// Verbose output (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long, action = ArgAction::Count)]
    verbose: u8,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, default_value_t = 0)]
    threads: usize,

    /// Also write logs to this file
    #[arg(long = "log-file", value_name = "PATH")]
    log_file: Option<PathBuf>,
}

// ============================================================================
// Value parsers
// ============================================================================

fn parse_red(s: &str) -> OpsResult<f32> {
    parse_number("red", s)
}

fn parse_green(s: &str) -> OpsResult<f32> {
    parse_number("green", s)
}

fn parse_blue(s: &str) -> OpsResult<f32> {
    parse_number("blue", s)
}

fn parse_brightness(s: &str) -> OpsResult<f32> {
    check_range("brightness", parse_number("brightness", s)?, TONE_MIN, TONE_MAX)
}

fn parse_contrast(s: &str) -> OpsResult<f32> {
    check_range("contrast", parse_number("contrast", s)?, TONE_MIN, TONE_MAX)
}

fn parse_form(s: &str) -> OpsResult<MixForm> {
    s.parse()
}

fn parse_space(s: &str) -> OpsResult<DesatSpace> {
    s.parse()
}

impl Cli {
    /// The two positional paths, or [`OpsError::ArgumentCount`].
    fn paths(&self) -> OpsResult<(&Path, &Path)> {
        match self.files.as_slice() {
            [input, output] => Ok((input.as_path(), output.as_path())),
            other => Err(OpsError::ArgumentCount {
                expected: 2,
                actual: other.len(),
            }),
        }
    }

    fn settings(&self) -> OpsResult<Settings> {
        Ok(Settings::default()
            .with_weights(ChannelWeights::new(self.red, self.green, self.blue))
            .with_form(self.form)
            .with_space(self.colorspace)
            .with_tone(BrightnessContrast::new(self.brightness, self.contrast)?))
    }
}

/// Accepts the single-dash `-help` spelling.
fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .map(|arg| if arg == "-help" { OsString::from("--help") } else { arg })
        .collect()
}

fn run(cli: &Cli) -> Result<()> {
    let (input, output) = cli.paths()?;
    let settings = cli.settings()?;

    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }
    debug!(threads = rayon::current_num_threads(), %settings, "starting");

    Pipeline::new(settings)
        .with_jpeg_quality(cli.quality)
        .run(input, output)
        .with_context(|| format!("Failed to convert {}", input.display()))?;
    Ok(())
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse_from(normalize_args(std::env::args_os())) {
        Ok(cli) => cli,
        Err(err) => {
            // help and version go to stdout and are not failures
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    let _guard = match logging::init(cli.verbose, cli.log_file.as_deref()) {
        Ok(guard) => guard,
        Err(err) => {
            eprintln!("error: {err:#}");
            return ExitCode::FAILURE;
        }
    };

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    fn parse(args: &[&str]) -> std::result::Result<Cli, clap::Error> {
        let mut argv = vec![OsString::from("color2gray")];
        argv.extend(args.iter().map(OsString::from));
        Cli::try_parse_from(normalize_args(argv))
    }

    #[test]
    fn defaults() {
        let cli = parse(&["in.png", "out.png"]).unwrap();
        let settings = cli.settings().unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(cli.quality, 92);
        assert_eq!(cli.verbose, 0);
        let (input, output) = cli.paths().unwrap();
        assert_eq!(input, Path::new("in.png"));
        assert_eq!(output, Path::new("out.png"));
    }

    #[test]
    fn negative_weights_and_aliases() {
        let args = ["-r", "-20", "--green", "120", "-b", "0", "-f", "R", "x.png", "y.png"];
        let cli = parse(&args).unwrap();
        let settings = cli.settings().unwrap();
        assert_eq!(settings.weights, ChannelWeights::new(-20.0, 120.0, 0.0));
        assert_eq!(settings.form, MixForm::Rms);
    }

    #[test]
    fn tone_flags() {
        let args = ["-B", "-50", "-C", "100", "-f", "desat", "-c", "HCL", "a.png", "b.png"];
        let cli = parse(&args).unwrap();
        let settings = cli.settings().unwrap();
        assert_eq!(settings.tone.brightness(), -50.0);
        assert_eq!(settings.tone.contrast(), 100.0);
        assert_eq!(settings.space, DesatSpace::Hcl);
    }

    #[test]
    fn bad_values_are_rejected_by_parser() {
        for args in [
            &["-f", "xyz", "a.png", "b.png"][..],
            &["-c", "lab", "a.png", "b.png"][..],
            &["-r", "abc", "a.png", "b.png"][..],
            &["-B", "150", "a.png", "b.png"][..],
            &["-C", "-101", "a.png", "b.png"][..],
            &["-q", "0", "a.png", "b.png"][..],
        ] {
            let err = parse(args).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::ValueValidation, "{:?}", args);
            assert!(err.use_stderr());
        }
    }

    #[test]
    fn parser_messages_name_the_kind() {
        let err = parse(&["-f", "xyz", "a.png", "b.png"]).unwrap_err();
        assert!(err.to_string().contains("invalid form 'xyz'"));

        let err = parse(&["-B", "150", "a.png", "b.png"]).unwrap_err();
        assert!(err.to_string().contains("brightness must be between"));
    }

    #[test]
    fn wrong_file_count() {
        for args in [&[][..], &["only.png"][..], &["a.png", "b.png", "c.png"][..]] {
            let cli = parse(args).unwrap();
            assert!(matches!(cli.paths(), Err(OpsError::ArgumentCount { expected: 2, .. })));
        }
    }

    #[test]
    fn help_spellings_exit_cleanly() {
        for flag in ["-h", "--help", "-help"] {
            let err = parse(&[flag]).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::DisplayHelp);
            assert!(!err.use_stderr());
        }
    }

    #[test]
    fn run_reports_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("missing.png");
        let output = dir.path().join("out.png");
        let cli = parse(&[input.to_str().unwrap(), output.to_str().unwrap()]).unwrap();

        let err = run(&cli).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to convert"));
        assert!(err.chain().any(|e| e.downcast_ref::<OpsError>().is_some()));
        assert!(!output.exists());
    }
}
