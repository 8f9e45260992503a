//! Windows OCR API backend
//!
//! Drives the built-in Windows OCR (Media.Ocr) through the Windows imaging
//! pipeline: `StorageFile` → `IRandomAccessStream` → `BitmapDecoder` →
//! `SoftwareBitmap`.

use std::path::Path;
use tracing::debug;
use windows::{
    core::HSTRING,
    Globalization::Language,
    Graphics::Imaging::{BitmapDecoder, SoftwareBitmap},
    Media::Ocr::{OcrEngine as WinOcrEngine, OcrResult as WinOcrResult},
    Storage::{FileAccessMode, StorageFile},
    Storage::Streams::IRandomAccessStream,
};

use super::bridge::{platform_error, wait};
use super::error::{OcrError, Stage};
use super::platform::{Bindings, Platform};
use super::result::{Bounds, OcrLine, OcrWord, RecognitionResult};

/// The host's Windows OCR service
#[derive(Debug, Default)]
pub struct WindowsPlatform;

fn describe(err: &windows::core::Error) -> String {
    let message = err.message().to_string();
    if message.is_empty() {
        format!("HRESULT 0x{:08X}", err.code().0)
    } else {
        message
    }
}

fn feature_unavailable(err: windows::core::Error) -> OcrError {
    OcrError::FeatureUnavailable {
        message: describe(&err),
    }
}

impl Platform for WindowsPlatform {
    type Stream = IRandomAccessStream;
    type Decoder = BitmapDecoder;
    type Bitmap = SoftwareBitmap;
    type Engine = WinOcrEngine;

    fn bind(&self) -> Result<Bindings, OcrError> {
        let languages =
            WinOcrEngine::AvailableRecognizerLanguages().map_err(feature_unavailable)?;

        let mut recognizer_languages = Vec::new();
        for i in 0..languages.Size().map_err(feature_unavailable)? {
            let tag = languages
                .GetAt(i)
                .and_then(|lang| lang.LanguageTag())
                .map_err(feature_unavailable)?;
            recognizer_languages.push(tag.to_string());
        }

        let max_image_dimension =
            WinOcrEngine::MaxImageDimension().map_err(feature_unavailable)?;

        let decoders =
            BitmapDecoder::GetDecoderInformationEnumerator().map_err(feature_unavailable)?;

        let mut file_extensions = Vec::new();
        for i in 0..decoders.Size().map_err(feature_unavailable)? {
            let extensions = decoders
                .GetAt(i)
                .and_then(|codec| codec.FileExtensions())
                .map_err(feature_unavailable)?;
            for j in 0..extensions.Size().map_err(feature_unavailable)? {
                let ext = extensions.GetAt(j).map_err(feature_unavailable)?;
                file_extensions.push(ext.to_string().to_lowercase());
            }
        }
        file_extensions.sort();
        file_extensions.dedup();

        debug!(
            languages = ?recognizer_languages,
            max_image_dimension,
            "Resolved Windows OCR and imaging types"
        );

        Ok(Bindings {
            generation: 0,
            recognizer_languages,
            file_extensions,
            max_image_dimension,
        })
    }

    fn create_engine(&self, language: Option<&str>) -> Result<WinOcrEngine, OcrError> {
        let unavailable = |err: windows::core::Error| OcrError::LanguageUnavailable {
            requested: language.map(str::to_string),
            message: describe(&err),
        };

        match language {
            Some(tag) => {
                let lang = Language::CreateLanguage(&HSTRING::from(tag)).map_err(unavailable)?;
                WinOcrEngine::TryCreateFromLanguage(&lang).map_err(unavailable)
            }
            None => WinOcrEngine::TryCreateFromUserProfileLanguages().map_err(unavailable),
        }
    }

    fn engine_language(&self, engine: &WinOcrEngine) -> String {
        engine
            .RecognizerLanguage()
            .and_then(|lang| lang.LanguageTag())
            .map(|tag| tag.to_string())
            .unwrap_or_else(|_| "und".to_string())
    }

    fn open_read(&self, path: &Path) -> Result<IRandomAccessStream, OcrError> {
        let file = wait(
            Stage::Open,
            path,
            StorageFile::GetFileFromPathAsync(&HSTRING::from(path.as_os_str())),
        )?;
        wait(Stage::Open, path, file.OpenAsync(FileAccessMode::Read))
    }

    fn decode(&self, path: &Path, stream: &IRandomAccessStream) -> Result<BitmapDecoder, OcrError> {
        wait(Stage::Decode, path, BitmapDecoder::CreateAsync(stream))
    }

    fn extract(&self, path: &Path, decoder: &BitmapDecoder) -> Result<SoftwareBitmap, OcrError> {
        let bitmap = wait(Stage::Extract, path, decoder.GetSoftwareBitmapAsync())?;
        debug!(
            width = bitmap.PixelWidth().unwrap_or_default(),
            height = bitmap.PixelHeight().unwrap_or_default(),
            "Decoded bitmap"
        );
        Ok(bitmap)
    }

    fn recognize(
        &self,
        path: &Path,
        engine: &WinOcrEngine,
        bitmap: &SoftwareBitmap,
    ) -> Result<RecognitionResult, OcrError> {
        let result = wait(Stage::Recognize, path, engine.RecognizeAsync(bitmap))?;
        snapshot(path, self.engine_language(engine), &result)
            .map_err(|err| platform_error(Stage::Recognize, path, &err))
    }
}

/// Copy the engine's result into owned values
fn snapshot(
    path: &Path,
    language: String,
    result: &WinOcrResult,
) -> windows::core::Result<RecognitionResult> {
    let win_lines = result.Lines()?;
    let mut lines = Vec::with_capacity(win_lines.Size()? as usize);

    for i in 0..win_lines.Size()? {
        let line = win_lines.GetAt(i)?;
        let win_words = line.Words()?;

        let mut words = Vec::with_capacity(win_words.Size()? as usize);
        for j in 0..win_words.Size()? {
            let word = win_words.GetAt(j)?;
            let rect = word.BoundingRect()?;
            words.push(OcrWord {
                text: word.Text()?.to_string(),
                bounds: Bounds {
                    x: rect.X,
                    y: rect.Y,
                    width: rect.Width,
                    height: rect.Height,
                },
            });
        }

        lines.push(OcrLine {
            text: line.Text()?.to_string(),
            words,
        });
    }

    // Null when the recognizer did not detect any skew
    let text_angle = result.TextAngle().and_then(|angle| angle.Value()).ok();

    Ok(RecognitionResult {
        path: path.to_path_buf(),
        language,
        text: result.Text()?.to_string(),
        text_angle,
        lines,
    })
}
