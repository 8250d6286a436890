//! Index-paired comparison of recognized elements against a reference set.
//!
//! Only the first `min(current, reference)` pairs are compared. Elements are never
//! realigned by content or position.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::element::TextElement;
use crate::error::{CheckError, Result, Side};
use crate::similarity::text_similarity;

const WEIGHT_TOLERANCE: f64 = 1e-9;

/// Scoring parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Center offset, in pixels, at which the coordinate score reaches zero.
    pub coord_decay_distance: f64,
    pub text_weight: f64,
    pub coord_weight: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            coord_decay_distance: 50.0,
            text_weight: 0.7,
            coord_weight: 0.3,
        }
    }
}

impl ScoringConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.coord_decay_distance.is_finite() || self.coord_decay_distance <= 0.0 {
            return Err(CheckError::InvalidConfig(format!(
                "coordinate decay distance must be a positive number, got {}",
                self.coord_decay_distance
            )));
        }
        if !(self.text_weight >= 0.0 && self.coord_weight >= 0.0) {
            return Err(CheckError::InvalidConfig(format!(
                "weights must not be negative, got text {} and coordinate {}",
                self.text_weight, self.coord_weight
            )));
        }
        let sum = self.text_weight + self.coord_weight;
        if (sum - 1.0).abs() > WEIGHT_TOLERANCE {
            return Err(CheckError::InvalidConfig(format!(
                "text and coordinate weights must sum to 1.0, got {sum}"
            )));
        }
        Ok(())
    }

    /// `max(0, 1 - coord_diff / coord_decay_distance)`
    pub fn coord_score(&self, coord_diff: f64) -> f64 {
        (1.0 - coord_diff / self.coord_decay_distance).max(0.0)
    }

    pub fn overall_accuracy(&self, mean_text_similarity: f64, mean_coord_score: f64) -> f64 {
        self.text_weight * mean_text_similarity + self.coord_weight * mean_coord_score
    }
}

/// One current element scored against the reference element at the same index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementComparison {
    pub index: usize,
    pub text_similarity: f64,
    /// Pixel distance between the two bounding box centers.
    pub coord_diff: f64,
    pub coord_score: f64,
    pub current_text: String,
    pub reference_text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AggregateReport {
    pub matched: usize,
    pub mean_text_similarity: f64,
    pub mean_coord_score: f64,
    pub overall_accuracy: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub comparisons: Vec<ElementComparison>,
    /// Absent when nothing was compared.
    pub aggregate: Option<AggregateReport>,
    pub current_count: usize,
    pub reference_count: usize,
    /// Absolute difference in element counts, present only when they differ.
    pub length_mismatch: Option<usize>,
}

/// Scores a single pair. Bounding box errors carry `index` and the offending side.
pub fn compare_elements(
    index: usize,
    current: &TextElement,
    reference: &TextElement,
    config: &ScoringConfig,
) -> Result<ElementComparison> {
    let current_center = current
        .center()
        .map_err(|e| e.at(Side::Current, index))?;
    let reference_center = reference
        .center()
        .map_err(|e| e.at(Side::Reference, index))?;
    let coord_diff = current_center.distance(&reference_center);

    Ok(ElementComparison {
        index,
        text_similarity: text_similarity(&current.text, &reference.text),
        coord_diff,
        coord_score: config.coord_score(coord_diff),
        current_text: current.text.clone(),
        reference_text: reference.text.clone(),
    })
}

#[derive(Debug, Default)]
pub struct Comparator {
    config: ScoringConfig,
}

impl Comparator {
    pub fn new(config: ScoringConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn compare(&self, current: &[TextElement], reference: &[TextElement]) -> Result<ComparisonReport> {
        let comparisons = current
            .iter()
            .zip(reference)
            .enumerate()
            .map(|(i, (cur, refr))| compare_elements(i, cur, refr, &self.config))
            .collect::<Result<Vec<_>>>()?;

        let aggregate = self.aggregate(&comparisons);
        let length_mismatch = match current.len().abs_diff(reference.len()) {
            0 => None,
            diff => {
                warn!(
                    current = current.len(),
                    reference = reference.len(),
                    "element counts differ"
                );
                Some(diff)
            }
        };

        debug!(matched = comparisons.len(), "comparison finished");
        Ok(ComparisonReport {
            comparisons,
            aggregate,
            current_count: current.len(),
            reference_count: reference.len(),
            length_mismatch,
        })
    }

    fn aggregate(&self, comparisons: &[ElementComparison]) -> Option<AggregateReport> {
        let matched = comparisons.len();
        if matched == 0 {
            return None;
        }

        let (total_text, total_coord) = comparisons
            .iter()
            .fold((0.0, 0.0), |(t, c), comp| (t + comp.text_similarity, c + comp.coord_score));
        let mean_text_similarity = total_text / matched as f64;
        let mean_coord_score = total_coord / matched as f64;

        Some(AggregateReport {
            matched,
            mean_text_similarity,
            mean_coord_score,
            overall_accuracy: self
                .config
                .overall_accuracy(mean_text_similarity, mean_coord_score),
        })
    }
}
