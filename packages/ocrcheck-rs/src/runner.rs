//! Drives a single comparison run: file checks, reference loading, recognition, scoring.
use std::path::{Path, PathBuf};

use ocrcheck_ocr::{OcrEngine, OcrInput, DEFAULT_LANGUAGES};
use tracing::info;

use crate::comparator::{Comparator, ComparisonReport, ScoringConfig};
use crate::element::TextElement;
use crate::error::{CheckError, Result};
use crate::reference::{ensure_reference_exists, load_reference};

/// Configuration for one comparison run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub reference_path: PathBuf,
    pub image_path: PathBuf,
    pub scoring: ScoringConfig,
    /// Passed to the recognition engine.
    pub languages: Vec<String>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            reference_path: PathBuf::from("./results/reference.json"),
            image_path: PathBuf::from("image.jpg"),
            scoring: ScoringConfig::default(),
            languages: DEFAULT_LANGUAGES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

fn ensure_image_exists(path: &Path) -> Result<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(CheckError::ImageFileMissing(path.to_path_buf()))
    }
}

/// Recognizes `image_path` and returns the elements in engine order.
pub async fn recognize_only(image_path: &Path, engine: &dyn OcrEngine) -> Result<Vec<TextElement>> {
    ensure_image_exists(image_path)?;

    info!(engine = engine.name(), image = %image_path.display(), "running recognition");
    let output = engine
        .recognize(&OcrInput::FilePath(image_path.to_path_buf()))
        .await?;
    info!(elements = output.regions.len(), "recognition finished");

    Ok(output.regions.into_iter().map(TextElement::from).collect())
}

/// Compares a fresh recognition of the configured image with the stored reference.
///
/// Every check happens before the engine runs, so a bad path or reference file never
/// costs an inference pass. Nothing is retried.
pub async fn run(config: &RunConfig, engine: &dyn OcrEngine) -> Result<ComparisonReport> {
    let comparator = Comparator::new(config.scoring)?;

    ensure_reference_exists(&config.reference_path)?;
    ensure_image_exists(&config.image_path)?;
    let reference = load_reference(&config.reference_path)?;

    info!(languages = ?config.languages, "recognizing target image");
    let current = recognize_only(&config.image_path, engine).await?;
    comparator.compare(&current, &reference)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use ocrcheck_ocr::{OcrError, OcrOutput, TextRegion};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedEngine {
        regions: Vec<TextRegion>,
        calls: AtomicUsize,
    }

    impl FixedEngine {
        fn new(regions: Vec<TextRegion>) -> Self {
            Self {
                regions,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl OcrEngine for FixedEngine {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn recognize(&self, _input: &OcrInput) -> std::result::Result<OcrOutput, OcrError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(OcrOutput::from_regions(self.regions.clone()))
        }
    }

    fn fixture(name: &str) -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("tests/fixtures")
            .join(name)
    }

    fn region(text: &str, x: f64, y: f64, w: f64, h: f64) -> TextRegion {
        TextRegion {
            text: text.into(),
            bbox: vec![[x, y], [x + w, y], [x + w, y + h], [x, y + h]],
            confidence: Some(0.9),
        }
    }

    fn config(reference: &str) -> RunConfig {
        RunConfig {
            reference_path: fixture(reference),
            // any existing file will do, the engine never reads it
            image_path: fixture("streetname_ocr.json"),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_run_matching_recognition() {
        let engine = FixedEngine::new(vec![
            region("Main St", 0.0, 0.0, 10.0, 10.0),
            region("Nevsky Prospekt", 0.0, 20.0, 120.0, 20.0),
            region("12", 130.0, 0.0, 20.0, 20.0),
        ]);
        let report = run(&config("streetname_reference.json"), &engine).await.unwrap();

        assert_eq!(engine.calls.load(Ordering::SeqCst), 1);
        assert_eq!(report.comparisons.len(), 3);
        assert_eq!(report.aggregate.unwrap().overall_accuracy, 1.0);
        assert_eq!(report.length_mismatch, None);
    }

    #[tokio::test]
    async fn test_missing_reference_skips_recognition() {
        let engine = FixedEngine::new(Vec::new());
        let err = run(&config("no_such_reference.json"), &engine).await.unwrap_err();
        assert!(matches!(err, CheckError::ReferenceFileMissing { .. }));
        assert_eq!(engine.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_missing_image_skips_recognition() {
        let engine = FixedEngine::new(Vec::new());
        let config = RunConfig {
            image_path: fixture("no_such_image.jpg"),
            ..config("streetname_reference.json")
        };
        let err = run(&config, &engine).await.unwrap_err();
        assert!(matches!(err, CheckError::ImageFileMissing(_)));
        assert_eq!(engine.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_invalid_reference_skips_recognition() {
        let engine = FixedEngine::new(Vec::new());
        let err = run(&config("invalid_reference.json"), &engine).await.unwrap_err();
        assert!(matches!(err, CheckError::ReferenceParseError { .. }));
        assert_eq!(engine.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_invalid_scoring_is_rejected_first() {
        let engine = FixedEngine::new(Vec::new());
        let config = RunConfig {
            scoring: ScoringConfig {
                text_weight: 0.5,
                coord_weight: 0.4,
                ..Default::default()
            },
            ..config("no_such_reference.json")
        };
        let err = run(&config, &engine).await.unwrap_err();
        assert!(matches!(err, CheckError::InvalidConfig(_)));
    }

    #[tokio::test]
    async fn test_recognize_only_converts_regions() {
        let engine = FixedEngine::new(vec![region("Main St", 0.0, 0.0, 10.0, 10.0)]);
        let elements = recognize_only(&fixture("streetname_ocr.json"), &engine)
            .await
            .unwrap();
        assert_eq!(elements.len(), 1);
        assert_eq!(elements[0].confidence, Some(0.9));
    }
}
