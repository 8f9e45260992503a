//! Recognition results as reported by the platform engine

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Word bounding rectangle in bitmap pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// A single recognized word
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OcrWord {
    /// Recognized text
    pub text: String,
    /// Bounding box reported by the recognizer
    pub bounds: Bounds,
}

/// A line of recognized words
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OcrLine {
    /// Line text as joined by the recognizer
    pub text: String,
    /// Words in reading order
    pub words: Vec<OcrWord>,
}

/// Everything the recognizer reported for one image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognitionResult {
    /// Absolute path of the image
    pub path: PathBuf,
    /// Language tag of the recognizer that produced the result
    pub language: String,
    /// Full recognized text
    pub text: String,
    /// Clockwise text skew in degrees, when the recognizer detected one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_angle: Option<f64>,
    /// Recognized lines
    pub lines: Vec<OcrLine>,
}

impl RecognitionResult {
    /// Number of recognized words across all lines
    pub fn word_count(&self) -> usize {
        self.lines.iter().map(|line| line.words.len()).sum()
    }

    /// Whether the recognizer found any text at all
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}
