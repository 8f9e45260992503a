//! OCR layer
//!
//! Runs the operating system's OCR engine on image files. The platform
//! is bound once per process through [`process_binder`]; each invocation
//! then creates one [`OcrSession`] and feeds it paths in order.

pub mod binding;
pub mod error;
pub mod pipeline;
pub mod platform;
pub mod result;

#[cfg(windows)]
mod bridge;
#[cfg(windows)]
pub mod windows_ocr;

#[cfg(not(windows))]
pub mod unsupported;

#[cfg(test)]
pub(crate) mod fake;

use std::sync::OnceLock;

pub use binding::Binder;
pub use error::{OcrError, Stage};
pub use pipeline::{is_regular_file, recognize_files, OcrOptions, OcrSession, Recognitions};
pub use platform::{Bindings, Platform};
pub use result::{Bounds, OcrLine, OcrWord, RecognitionResult};

/// OCR backend of the host this binary was built for
#[cfg(windows)]
pub type NativePlatform = windows_ocr::WindowsPlatform;

/// OCR backend of the host this binary was built for
#[cfg(not(windows))]
pub type NativePlatform = unsupported::UnsupportedPlatform;

/// Process-wide binder for the native platform
pub fn process_binder() -> &'static Binder<NativePlatform> {
    static BINDER: OnceLock<Binder<NativePlatform>> = OnceLock::new();
    BINDER.get_or_init(|| Binder::new(NativePlatform::default()))
}
