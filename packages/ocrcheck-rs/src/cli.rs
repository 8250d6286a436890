//! Command line arguments backing the `ocrcheck` binary.
use clap::{Args as ClapArgs, Parser, Subcommand};
use ocrcheck_ocr::CommandOcrEngine;
use ocrcheck_rs::{ReportFormat, RunConfig, ScoringConfig};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
  name = "ocrcheck",
  about = "Compare OCR output for an image against a stored reference result set",
  version
)]
pub struct Args {
  /// Only log warnings and errors
  #[arg(long, short = 'q', global = true)]
  pub quiet: bool,

  #[command(subcommand)]
  pub command: Commands,
}

/// Selects and configures the external recognition engine.
#[derive(ClapArgs, Debug)]
pub struct EngineArgs {
  /// Recognition language, repeatable [default: en, ru]
  #[arg(long = "lang", short = 'l')]
  pub languages: Vec<String>,

  /// External OCR program that prints JSON regions (EasyOCR bridge when omitted)
  #[arg(long)]
  pub ocr_cmd: Option<String>,

  /// Argument passed to --ocr-cmd, repeatable; `{image}` and `{langs}` are substituted
  #[arg(long = "ocr-arg", allow_hyphen_values = true)]
  pub ocr_args: Vec<String>,
}

impl EngineArgs {
  pub fn languages(&self) -> Vec<String> {
    if self.languages.is_empty() {
      RunConfig::default().languages
    } else {
      self.languages.clone()
    }
  }

  pub fn build_engine(&self, languages: Vec<String>) -> CommandOcrEngine {
    match &self.ocr_cmd {
      Some(program) => CommandOcrEngine::new(program.as_str())
        .args(self.ocr_args.iter().cloned())
        .languages(languages),
      None => CommandOcrEngine::easyocr(languages),
    }
  }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
  /// Print version information
  Version,
  /// Recognize an image and compare the result with a reference file
  Compare {
    /// Reference result set (JSON array of text elements)
    #[arg(long, short = 'r')]
    reference: PathBuf,

    /// Image to recognize
    #[arg(long, short = 'i')]
    image: PathBuf,

    /// Center offset in pixels at which the coordinate score drops to zero
    #[arg(long, default_value_t = 50.0)]
    decay_distance: f64,

    /// Weight of the mean text similarity in the overall accuracy
    #[arg(long, default_value_t = 0.7)]
    text_weight: f64,

    /// Weight of the mean coordinate score in the overall accuracy
    #[arg(long, default_value_t = 0.3)]
    coord_weight: f64,

    /// Report format
    #[arg(long, short = 'f', value_enum, default_value_t = ReportFormat::Text)]
    format: ReportFormat,

    #[command(flatten)]
    engine: EngineArgs,
  },
  /// Recognize an image and print the elements as reference JSON
  Recognize {
    /// Image to recognize
    #[arg(long, short = 'i')]
    image: PathBuf,

    #[command(flatten)]
    engine: EngineArgs,
  },
}

impl Commands {
  /// Run configuration for `compare`; `None` for other commands.
  pub fn run_config(&self) -> Option<RunConfig> {
    match self {
      Commands::Compare {
        reference,
        image,
        decay_distance,
        text_weight,
        coord_weight,
        engine,
        ..
      } => Some(RunConfig {
        reference_path: reference.clone(),
        image_path: image.clone(),
        scoring: ScoringConfig {
          coord_decay_distance: *decay_distance,
          text_weight: *text_weight,
          coord_weight: *coord_weight,
        },
        languages: engine.languages(),
      }),
      _ => None,
    }
  }
}
