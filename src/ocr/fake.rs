//! In-memory platform for exercising the pipeline without the host OCR service
//!
//! "Images" are text files starting with `IMG:`; the rest of the file is
//! what the fake recognizer reads back. Anything else fails to decode.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use super::error::{OcrError, Stage};
use super::platform::{Bindings, Platform};
use super::result::{Bounds, OcrLine, OcrWord, RecognitionResult};

/// Magic prefix of a decodable fake image
pub const IMAGE_MAGIC: &str = "IMG:";

/// WINCODEC_ERR_COMPONENTNOTFOUND, what the decoder reports for unknown formats
const E_UNKNOWN_FORMAT: i32 = 0x88982F50u32 as i32;
/// E_FAIL
const E_FAIL: i32 = 0x80004005u32 as i32;

pub struct FakePlatform {
    feature: bool,
    languages: Vec<String>,
    bind_calls: AtomicUsize,
    engine_calls: AtomicUsize,
    recognize_calls: AtomicUsize,
}

impl FakePlatform {
    /// Host with the OCR feature and an en-US recognizer
    pub fn new() -> Self {
        Self::with_languages(&["en-US"])
    }

    /// Host with the OCR feature and the given recognizers
    pub fn with_languages(languages: &[&str]) -> Self {
        Self {
            feature: true,
            languages: languages.iter().map(|l| l.to_string()).collect(),
            bind_calls: AtomicUsize::new(0),
            engine_calls: AtomicUsize::new(0),
            recognize_calls: AtomicUsize::new(0),
        }
    }

    /// Host without the OCR feature
    pub fn without_feature() -> Self {
        Self {
            feature: false,
            ..Self::with_languages(&[])
        }
    }

    pub fn bind_calls(&self) -> usize {
        self.bind_calls.load(Ordering::SeqCst)
    }

    pub fn engine_calls(&self) -> usize {
        self.engine_calls.load(Ordering::SeqCst)
    }

    pub fn recognize_calls(&self) -> usize {
        self.recognize_calls.load(Ordering::SeqCst)
    }
}

fn platform_error(stage: Stage, path: &Path, code: i32, message: impl Into<String>) -> OcrError {
    OcrError::Platform {
        stage,
        path: path.to_path_buf(),
        code,
        message: message.into(),
    }
}

impl Platform for FakePlatform {
    type Stream = (PathBuf, Vec<u8>);
    type Decoder = String;
    type Bitmap = String;
    type Engine = String;

    fn bind(&self) -> Result<Bindings, OcrError> {
        self.bind_calls.fetch_add(1, Ordering::SeqCst);
        if !self.feature {
            return Err(OcrError::FeatureUnavailable {
                message: "Class not registered".to_string(),
            });
        }
        Ok(Bindings {
            generation: 0,
            recognizer_languages: self.languages.clone(),
            file_extensions: vec![".png".to_string(), ".bmp".to_string()],
            max_image_dimension: 10_000,
        })
    }

    fn create_engine(&self, language: Option<&str>) -> Result<String, OcrError> {
        self.engine_calls.fetch_add(1, Ordering::SeqCst);
        let found = match language {
            Some(tag) => self.languages.iter().find(|l| l.eq_ignore_ascii_case(tag)),
            None => self.languages.first(),
        };
        found.cloned().ok_or_else(|| OcrError::LanguageUnavailable {
            requested: language.map(str::to_string),
            message: "no recognizer installed".to_string(),
        })
    }

    fn engine_language(&self, engine: &String) -> String {
        engine.clone()
    }

    fn open_read(&self, path: &Path) -> Result<Self::Stream, OcrError> {
        let bytes = std::fs::read(path)
            .map_err(|e| platform_error(Stage::Open, path, E_FAIL, e.to_string()))?;
        Ok((path.to_path_buf(), bytes))
    }

    fn decode(&self, path: &Path, stream: &Self::Stream) -> Result<String, OcrError> {
        let text = String::from_utf8_lossy(&stream.1);
        text.strip_prefix(IMAGE_MAGIC)
            .map(|pixels| pixels.to_string())
            .ok_or_else(|| {
                platform_error(
                    Stage::Decode,
                    path,
                    E_UNKNOWN_FORMAT,
                    "The component cannot be found.",
                )
            })
    }

    fn extract(&self, _path: &Path, decoder: &String) -> Result<String, OcrError> {
        Ok(decoder.clone())
    }

    fn recognize(
        &self,
        path: &Path,
        engine: &String,
        bitmap: &String,
    ) -> Result<RecognitionResult, OcrError> {
        self.recognize_calls.fetch_add(1, Ordering::SeqCst);

        let lines: Vec<OcrLine> = bitmap
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(row, line)| OcrLine {
                text: line.split_whitespace().collect::<Vec<_>>().join(" "),
                words: line
                    .split_whitespace()
                    .enumerate()
                    .map(|(col, word)| OcrWord {
                        text: word.to_string(),
                        bounds: Bounds {
                            x: col as f32 * 100.0,
                            y: row as f32 * 20.0,
                            width: word.len() as f32 * 10.0,
                            height: 16.0,
                        },
                    })
                    .collect(),
            })
            .collect();

        Ok(RecognitionResult {
            path: path.to_path_buf(),
            language: engine.clone(),
            text: lines
                .iter()
                .map(|line| line.text.as_str())
                .collect::<Vec<_>>()
                .join("\n"),
            text_angle: None,
            lines,
        })
    }
}
