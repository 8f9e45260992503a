//! Image file → recognized text pipeline

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::error::OcrError;
use super::platform::{Bindings, Platform};
use super::result::RecognitionResult;

/// One OCR invocation: a bound platform and the engine created for it
pub struct OcrSession<'p, P: Platform> {
    platform: &'p P,
    engine: P::Engine,
    language: String,
}

impl<'p, P: Platform> OcrSession<'p, P> {
    /// Create the recognizer for this invocation
    ///
    /// Without `language` the recognizer follows the user profile
    /// languages. A tag the host has no recognizer for falls back to the
    /// profile languages with a warning.
    pub fn new(
        platform: &'p P,
        bindings: &Bindings,
        language: Option<&str>,
    ) -> Result<Self, OcrError> {
        let requested = match language {
            Some(tag) if bindings.has_language(tag) => Some(tag),
            Some(tag) => {
                warn!(
                    "Language '{}' not supported, falling back to user profile languages",
                    tag
                );
                None
            }
            None => None,
        };

        let engine = platform.create_engine(requested)?;
        let language = platform.engine_language(&engine);
        info!("OCR engine initialized with language: {}", language);

        Ok(Self {
            platform,
            engine,
            language,
        })
    }

    /// Language tag of the session's recognizer
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Run OCR on one image file
    ///
    /// Returns `Ok(None)` without touching the platform when `path` is not
    /// an existing regular file. Every platform failure after that point
    /// is returned as is.
    pub fn recognize_path(&self, path: &Path) -> Result<Option<RecognitionResult>, OcrError> {
        if !is_regular_file(path) {
            debug!(path = %path.display(), "Skipping: not an existing file");
            return Ok(None);
        }

        let path = absolute_path(path).map_err(|source| OcrError::PathResolution {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "Processing image");

        let bitmap = {
            let stream = self.platform.open_read(&path)?;
            let decoder = self.platform.decode(&path, &stream)?;
            self.platform.extract(&path, &decoder)?
        };

        let result = self.platform.recognize(&path, &self.engine, &bitmap)?;
        debug!(
            path = %path.display(),
            lines = result.lines.len(),
            words = result.word_count(),
            "Recognized image"
        );

        Ok(Some(result))
    }

    /// Run OCR on every path in order
    ///
    /// Skipped paths yield nothing. A failing path yields its error and
    /// iteration carries on with the next one.
    pub fn recognize_all<I>(&self, paths: I) -> Recognitions<'_, 'p, P, I::IntoIter>
    where
        I: IntoIterator,
        I::Item: AsRef<Path>,
    {
        Recognitions {
            session: self,
            paths: paths.into_iter(),
        }
    }
}

/// Iterator returned by [`OcrSession::recognize_all`]
pub struct Recognitions<'s, 'p, P: Platform, I> {
    session: &'s OcrSession<'p, P>,
    paths: I,
}

impl<P, I> Iterator for Recognitions<'_, '_, P, I>
where
    P: Platform,
    I: Iterator,
    I::Item: AsRef<Path>,
{
    type Item = Result<RecognitionResult, OcrError>;

    fn next(&mut self) -> Option<Self::Item> {
        for path in self.paths.by_ref() {
            if let Some(outcome) = self.session.recognize_path(path.as_ref()).transpose() {
                return Some(outcome);
            }
        }
        None
    }
}

/// Options for [`recognize_files`]
#[derive(Debug, Clone, Default)]
pub struct OcrOptions {
    /// Rebind platform types even if they are already bound
    pub reload: bool,
    /// Recognizer language tag; user profile languages when unset
    pub language: Option<String>,
}

/// Bind the native platform and run OCR on every path
///
/// Binding and engine failures are returned as the outer error; per-image
/// outcomes are returned in input order, skipped paths omitted.
pub fn recognize_files<I>(
    paths: I,
    options: &OcrOptions,
) -> Result<Vec<Result<RecognitionResult, OcrError>>, OcrError>
where
    I: IntoIterator,
    I::Item: AsRef<Path>,
{
    let binder = super::process_binder();
    let bindings = binder.bind(options.reload)?;
    let session = OcrSession::new(binder.platform(), &bindings, options.language.as_deref())?;
    Ok(session.recognize_all(paths).collect())
}

/// Whether `path` exists and is a regular file (symlinks followed)
pub fn is_regular_file(path: &Path) -> bool {
    std::fs::metadata(path)
        .map(|meta| meta.is_file())
        .unwrap_or(false)
}

/// Absolute form of a path without touching the filesystem
pub fn absolute_path(path: &Path) -> std::io::Result<PathBuf> {
    std::path::absolute(path)
}
