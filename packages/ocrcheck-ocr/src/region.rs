use serde::{Deserialize, Serialize};

/// A quadrilateral corner in image pixel coordinates.
pub type Corner = [f64; 2];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRegion {
    pub text: String,
    /// Corners as reported by the engine. Engines emit four, but nothing here enforces it.
    pub bbox: Vec<Corner>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}
