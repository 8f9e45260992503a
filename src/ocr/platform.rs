//! Platform imaging and recognition calls
//!
//! The pipeline talks to the host only through [`Platform`]. The native
//! backend wraps `Windows.Media.Ocr` and the Windows imaging APIs; hosts
//! without them get a backend that fails at binding time.

use std::path::Path;

use super::error::OcrError;
use super::result::RecognitionResult;

/// What the load step resolved on the host
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Bindings {
    /// Incremented every time the platform is (re)bound
    pub generation: u64,
    /// Recognizer languages installed on the host
    pub recognizer_languages: Vec<String>,
    /// File extensions the platform decoder accepts (e.g. ".png")
    pub file_extensions: Vec<String>,
    /// Largest width or height the recognizer accepts
    pub max_image_dimension: u32,
}

impl Bindings {
    /// Whether a recognizer language with this tag is installed
    pub fn has_language(&self, tag: &str) -> bool {
        self.recognizer_languages
            .iter()
            .any(|lang| lang.eq_ignore_ascii_case(tag))
    }
}

/// Host OCR service and the imaging pipeline in front of it
///
/// Every call blocks until the platform operation has completed.
pub trait Platform {
    /// Open random-access stream over an image file
    type Stream;
    /// Decoder created over a stream
    type Decoder;
    /// Decoded pixels in the format the recognizer accepts
    type Bitmap;
    /// Recognizer instance
    type Engine;

    /// Resolve the platform types the pipeline needs
    fn bind(&self) -> Result<Bindings, OcrError>;

    /// Create a recognizer, from the user profile languages when `language` is `None`
    fn create_engine(&self, language: Option<&str>) -> Result<Self::Engine, OcrError>;

    /// Language tag the engine recognizes
    fn engine_language(&self, engine: &Self::Engine) -> String;

    /// Open an absolute path for reading
    fn open_read(&self, path: &Path) -> Result<Self::Stream, OcrError>;

    /// Create a decoder by sniffing the stream's format
    fn decode(&self, path: &Path, stream: &Self::Stream) -> Result<Self::Decoder, OcrError>;

    /// Extract the decoded image as a software bitmap
    fn extract(&self, path: &Path, decoder: &Self::Decoder) -> Result<Self::Bitmap, OcrError>;

    /// Run recognition and snapshot the engine's result
    fn recognize(
        &self,
        path: &Path,
        engine: &Self::Engine,
        bitmap: &Self::Bitmap,
    ) -> Result<RecognitionResult, OcrError>;
}
