//! Recognized text elements and their geometry.
use ocrcheck_ocr::{Corner, TextRegion};
use serde::{Deserialize, Serialize};

use crate::error::{CheckError, Result};

/// Corners in a well-formed bounding box.
pub const BBOX_POINTS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance.
    pub fn distance(&self, other: &Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// One detected text region, either freshly recognized or loaded from a reference file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextElement {
    pub text: String,
    pub bbox: Vec<Corner>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl TextElement {
    pub fn new(text: impl Into<String>, bbox: Vec<Corner>) -> Self {
        Self {
            text: text.into(),
            bbox,
            confidence: None,
        }
    }

    pub fn center(&self) -> Result<Point> {
        calculate_center(&self.bbox)
    }
}

impl From<TextRegion> for TextElement {
    fn from(region: TextRegion) -> Self {
        Self {
            text: region.text,
            bbox: region.bbox,
            confidence: region.confidence,
        }
    }
}

/// Centroid of a four-corner bounding box: the mean of the x and of the y coordinates.
pub fn calculate_center(bbox: &[Corner]) -> Result<Point> {
    if bbox.len() != BBOX_POINTS {
        return Err(CheckError::MalformedBoundingBox {
            points: bbox.len(),
            location: None,
        });
    }
    let (sum_x, sum_y) = bbox
        .iter()
        .fold((0.0_f64, 0.0_f64), |(sx, sy), &[x, y]| (sx + x, sy + y));
    Ok(Point::new(
        sum_x / BBOX_POINTS as f64,
        sum_y / BBOX_POINTS as f64,
    ))
}
