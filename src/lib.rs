//! file-ocr - run the operating system's OCR engine on image files
//!
//! Images are loaded through the platform imaging pipeline and handed to
//! the built-in recognizer; this crate only binds and sequences those calls.

pub mod config;
pub mod ocr;
pub mod output;
