//! Drives an OCR engine that lives in another process.
//!
//! The program must print a JSON array on stdout. Each item is either an object
//! `{"bbox": [[x, y], ...], "text": "...", "confidence": 0.9}` or a
//! `[bbox, text, confidence]` triple, which is what EasyOCR's `readtext` yields.
use std::path::Path;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::process::Command;
use tracing::debug;

use crate::engine::{OcrEngine, OcrError, OcrInput, OcrOutput};
use crate::region::{Corner, TextRegion};

const IMAGE_PLACEHOLDER: &str = "{image}";
const LANGS_PLACEHOLDER: &str = "{langs}";

/// Reads an image path and a comma separated language list, prints triples as JSON.
const EASYOCR_BRIDGE: &str = include_str!("bridge/easyocr_json.py");

pub const DEFAULT_LANGUAGES: &[&str] = &["en", "ru"];

#[derive(Debug, Clone)]
pub struct CommandOcrEngine {
    program: String,
    args: Vec<String>,
    languages: Vec<String>,
}

impl CommandOcrEngine {
    /// Arguments may use `{image}` and `{langs}`. Without an `{image}` placeholder the
    /// image path is appended as the last argument.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            languages: DEFAULT_LANGUAGES.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// EasyOCR through the bundled bridge script, run with `python3`.
    pub fn easyocr(languages: Vec<String>) -> Self {
        Self::new("python3")
            .args(["-c", EASYOCR_BRIDGE, IMAGE_PLACEHOLDER, LANGS_PLACEHOLDER])
            .languages(languages)
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// An empty list keeps the current languages.
    pub fn languages(mut self, languages: Vec<String>) -> Self {
        if !languages.is_empty() {
            self.languages = languages;
        }
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    fn resolve_args(&self, image: &Path) -> Result<Vec<String>, OcrError> {
        let image = image
            .to_str()
            .ok_or_else(|| OcrError::InvalidInput("non-utf8 path".into()))?;
        let langs = self.languages.join(",");

        let mut resolved: Vec<String> = self
            .args
            .iter()
            .map(|a| {
                a.replace(IMAGE_PLACEHOLDER, image)
                    .replace(LANGS_PLACEHOLDER, &langs)
            })
            .collect();

        if !self.args.iter().any(|a| a.contains(IMAGE_PLACEHOLDER)) {
            resolved.push(image.to_string());
        }
        Ok(resolved)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawRegion {
    Object {
        bbox: Vec<Corner>,
        text: String,
        #[serde(default)]
        confidence: Option<f64>,
    },
    Triple(Vec<Corner>, String, f64),
}

impl From<RawRegion> for TextRegion {
    fn from(raw: RawRegion) -> Self {
        match raw {
            RawRegion::Object {
                bbox,
                text,
                confidence,
            } => TextRegion {
                text,
                bbox,
                confidence,
            },
            RawRegion::Triple(bbox, text, confidence) => TextRegion {
                text,
                bbox,
                confidence: Some(confidence),
            },
        }
    }
}

fn parse_regions(stdout: &[u8]) -> Result<Vec<TextRegion>, OcrError> {
    let raw: Vec<RawRegion> =
        serde_json::from_slice(stdout).map_err(|e| OcrError::MalformedOutput(e.to_string()))?;
    Ok(raw.into_iter().map(TextRegion::from).collect())
}

#[async_trait]
impl OcrEngine for CommandOcrEngine {
    fn name(&self) -> &str {
        &self.program
    }

    async fn recognize(&self, input: &OcrInput) -> Result<OcrOutput, OcrError> {
        let path = match input {
            OcrInput::FilePath(path) => path,
            OcrInput::Bytes(_) => return Err(OcrError::Unsupported),
        };
        let args = self.resolve_args(path)?;
        debug!(program = %self.program, languages = ?self.languages, "spawning OCR command");

        let output = Command::new(&self.program)
            .args(&args)
            .output()
            .await
            .map_err(|e| OcrError::EngineError(format!("failed to run {}: {}", self.program, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(OcrError::EngineError(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        let regions = parse_regions(&output.stdout)?;
        debug!(regions = regions.len(), "OCR command finished");
        Ok(OcrOutput::from_regions(regions))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_parse_object_regions() {
        let json = br#"[{"bbox": [[0, 0], [10, 0], [10, 10], [0, 10]], "text": "Main St", "confidence": 0.93}]"#;
        let regions = parse_regions(json).unwrap();
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].text, "Main St");
        assert_eq!(regions[0].bbox[2], [10.0, 10.0]);
        assert_eq!(regions[0].confidence, Some(0.93));
    }

    #[test]
    fn test_parse_triples_and_missing_confidence() {
        let json = br#"[
            [[[1, 2], [3, 2], [3, 4], [1, 4]], "Ulitsa", 0.5],
            {"bbox": [[0, 0], [1, 0], [1, 1], [0, 1]], "text": ""}
        ]"#;
        let regions = parse_regions(json).unwrap();
        assert_eq!(regions.len(), 2);
        assert_eq!(regions[0].text, "Ulitsa");
        assert_eq!(regions[0].confidence, Some(0.5));
        assert_eq!(regions[1].text, "");
        assert_eq!(regions[1].confidence, None);
    }

    #[test]
    fn test_parse_rejects_non_array_output() {
        let err = parse_regions(b"Recognition done").unwrap_err();
        assert!(matches!(err, OcrError::MalformedOutput(_)));
    }

    #[test]
    fn test_image_placeholder_substitution() {
        let engine = CommandOcrEngine::new("ocr")
            .args(["--input", "{image}", "--lang={langs}"])
            .languages(vec!["en".into(), "de".into()]);
        let args = engine.resolve_args(Path::new("sign.jpg")).unwrap();
        assert_eq!(args, vec!["--input", "sign.jpg", "--lang=en,de"]);
    }

    #[test]
    fn test_image_appended_without_placeholder() {
        let engine = CommandOcrEngine::new("ocr").arg("--json");
        let args = engine.resolve_args(Path::new("sign.jpg")).unwrap();
        assert_eq!(args, vec!["--json", "sign.jpg"]);
    }

    #[test]
    fn test_easyocr_defaults() {
        let engine = CommandOcrEngine::easyocr(Vec::new());
        assert_eq!(engine.program(), "python3");
        let args = engine.resolve_args(Path::new("streetname.jpg")).unwrap();
        assert_eq!(args.len(), 4);
        assert_eq!(args[2], "streetname.jpg");
        assert_eq!(args[3], "en,ru");
    }

    #[tokio::test]
    async fn test_bytes_input_is_unsupported() {
        let engine = CommandOcrEngine::new("cat");
        let err = engine
            .recognize(&OcrInput::Bytes(vec![1, 2, 3]))
            .await
            .unwrap_err();
        assert!(matches!(err, OcrError::Unsupported));
    }

    #[tokio::test]
    async fn test_missing_program_is_engine_error() {
        let engine = CommandOcrEngine::new("ocrcheck-no-such-engine-binary");
        let err = engine
            .recognize(&OcrInput::FilePath(PathBuf::from("image.jpg")))
            .await
            .unwrap_err();
        assert!(matches!(err, OcrError::EngineError(_)));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_recognize_reads_command_stdout() {
        // sh binds the image path to $0 and ignores it.
        let engine = CommandOcrEngine::new("sh").args([
            "-c",
            r#"echo '[{"bbox": [[0, 0], [10, 0], [10, 10], [0, 10]], "text": "Main St", "confidence": 0.9}]'"#,
            "{image}",
        ]);
        let output = engine
            .recognize(&OcrInput::FilePath(PathBuf::from("unused.jpg")))
            .await
            .unwrap();
        assert_eq!(output.regions.len(), 1);
        assert_eq!(output.text, "Main St");
        assert_eq!(output.regions[0].confidence, Some(0.9));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_failing_command_reports_status() {
        let engine = CommandOcrEngine::new("false");
        let err = engine
            .recognize(&OcrInput::FilePath(PathBuf::from("image.jpg")))
            .await
            .unwrap_err();
        match err {
            OcrError::EngineError(msg) => assert!(msg.contains("false")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
