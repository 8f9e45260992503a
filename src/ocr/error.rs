//! Errors surfaced by the OCR layer

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Step of the imaging pipeline that issued a platform call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Opening the file as a random-access stream
    Open,
    /// Creating a format-sniffing bitmap decoder over the stream
    Decode,
    /// Extracting the software bitmap from the decoder
    Extract,
    /// Running the recognizer on the bitmap
    Recognize,
}

impl Stage {
    pub fn name(&self) -> &'static str {
        match self {
            Stage::Open => "open",
            Stage::Decode => "decode",
            Stage::Extract => "extract",
            Stage::Recognize => "recognize",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// OCR layer error
#[derive(Debug, Error)]
pub enum OcrError {
    /// The host does not provide the OCR feature set at all
    #[error("Windows OCR is not available on this host: {message}")]
    FeatureUnavailable { message: String },

    /// The OCR feature exists but no recognizer could be created
    #[error("no OCR recognizer available for {}: {message}", .requested.as_deref().unwrap_or("the user profile languages"))]
    LanguageUnavailable {
        requested: Option<String>,
        message: String,
    },

    /// A platform call failed while processing one image
    #[error("{stage} failed for {}: {message} (HRESULT 0x{code:08X})", .path.display())]
    Platform {
        stage: Stage,
        path: PathBuf,
        code: i32,
        message: String,
    },

    /// The absolute form of an existing path could not be computed
    #[error("failed to resolve {}", .path.display())]
    PathResolution {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl OcrError {
    /// Pipeline stage that failed, if this is a per-image platform failure
    pub fn stage(&self) -> Option<Stage> {
        match self {
            OcrError::Platform { stage, .. } => Some(*stage),
            _ => None,
        }
    }

    /// Whether no further image can be processed after this error
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            OcrError::FeatureUnavailable { .. } | OcrError::LanguageUnavailable { .. }
        )
    }
}
