//! # ocrcheck-rs
//!
//! Regression checks for OCR pipelines: recognize an image, compare the recognized text
//! elements with a stored reference result set, and report how well they agree.
//!
//! ## Features
//!
//! - **Text similarity**: Ratcliff–Obershelp matching-blocks ratio, numerically identical to `difflib`
//! - **Position accuracy**: center-to-center distance of the bounding boxes, decayed into a [0, 1] score
//! - **Aggregate accuracy**: configurable weighted blend of mean text and mean position scores
//! - **Pluggable recognition**: any [`ocrcheck_ocr::OcrEngine`]; external programs via `CommandOcrEngine`
//! - **Separate presentation**: structured reports rendered as text or JSON
//!
//! ## Quick Start
//!
//! ```ignore
//! use ocrcheck_rs::prelude::*;
//!
//! let reference = load_reference("results/streetname.json")?;
//! let current = vec![TextElement::new("Main St", vec![[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 10.0]])];
//!
//! let report = Comparator::new(ScoringConfig::default())?.compare(&current, &reference)?;
//! if let Some(aggregate) = &report.aggregate {
//!     println!("overall accuracy: {:.1}%", aggregate.overall_accuracy * 100.0);
//! }
//! print!("{}", render_text(&report));
//! ```

pub mod comparator;
pub mod element;
pub mod error;
pub mod reference;
pub mod report;
pub mod runner;
pub mod similarity;

// Re-export commonly used types at the root level
pub use comparator::{compare_elements, AggregateReport, Comparator, ComparisonReport, ElementComparison, ScoringConfig};
pub use element::{calculate_center, Point, TextElement};
pub use error::{CheckError, ElementLocation, Result, Side};
pub use reference::{load_reference, parse_reference};
pub use report::{render, render_elements_json, render_json, render_text, ReportFormat};
pub use runner::{recognize_only, run, RunConfig};
pub use similarity::{matching_blocks, text_similarity, MatchingBlock};

/// Prelude module for convenient imports
///
/// Import everything you need with:
/// ```ignore
/// use ocrcheck_rs::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        calculate_center, compare_elements, load_reference, recognize_only, render, render_text, run,
        text_similarity, AggregateReport, CheckError, Comparator, ComparisonReport, ElementComparison,
        Point, ReportFormat, RunConfig, ScoringConfig, TextElement,
    };
}
