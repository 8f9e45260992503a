//! Backend for hosts without Windows OCR

use std::convert::Infallible;
use std::path::Path;

use super::error::OcrError;
use super::platform::{Bindings, Platform};
use super::result::RecognitionResult;

/// A host that has no OCR service to bind
#[derive(Debug, Default)]
pub struct UnsupportedPlatform;

fn unavailable() -> OcrError {
    OcrError::FeatureUnavailable {
        message: format!(
            "Windows.Media.Ocr requires Windows 10 or later (this host is {})",
            std::env::consts::OS
        ),
    }
}

impl Platform for UnsupportedPlatform {
    type Stream = Infallible;
    type Decoder = Infallible;
    type Bitmap = Infallible;
    type Engine = Infallible;

    fn bind(&self) -> Result<Bindings, OcrError> {
        Err(unavailable())
    }

    fn create_engine(&self, _language: Option<&str>) -> Result<Infallible, OcrError> {
        Err(unavailable())
    }

    fn engine_language(&self, engine: &Infallible) -> String {
        match *engine {}
    }

    fn open_read(&self, _path: &Path) -> Result<Infallible, OcrError> {
        Err(unavailable())
    }

    fn decode(&self, _path: &Path, stream: &Infallible) -> Result<Infallible, OcrError> {
        match *stream {}
    }

    fn extract(&self, _path: &Path, decoder: &Infallible) -> Result<Infallible, OcrError> {
        match *decoder {}
    }

    fn recognize(
        &self,
        _path: &Path,
        engine: &Infallible,
        _bitmap: &Infallible,
    ) -> Result<RecognitionResult, OcrError> {
        match *engine {}
    }
}
