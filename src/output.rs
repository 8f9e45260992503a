//! Writing recognition results to the invocation's output stream

use anyhow::Result;
use std::io::Write;

use crate::config::OutputFormat;
use crate::ocr::RecognitionResult;

/// Streams results in one format, separating them as the format requires
pub struct ResultWriter<W> {
    out: W,
    format: OutputFormat,
    written: usize,
}

impl<W: Write> ResultWriter<W> {
    pub fn new(out: W, format: OutputFormat) -> Self {
        Self {
            out,
            format,
            written: 0,
        }
    }

    /// Write one result and flush, so pipeline consumers see it right away
    pub fn write(&mut self, result: &RecognitionResult) -> Result<()> {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_writer(&mut self.out, result)?;
                writeln!(self.out)?;
            }
            OutputFormat::Pretty => {
                serde_json::to_writer_pretty(&mut self.out, result)?;
                writeln!(self.out)?;
            }
            OutputFormat::Text => {
                if self.written > 0 {
                    writeln!(self.out)?;
                }
                writeln!(self.out, "{}", result.text)?;
            }
        }
        self.out.flush()?;
        self.written += 1;
        Ok(())
    }

    /// Number of results written so far
    pub fn written(&self) -> usize {
        self.written
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ocr::{Bounds, OcrLine, OcrWord};
    use std::path::PathBuf;

    fn result(text: &str) -> RecognitionResult {
        RecognitionResult {
            path: PathBuf::from("/images/a.png"),
            language: "en-US".to_string(),
            text: text.to_string(),
            text_angle: Some(0.5),
            lines: vec![OcrLine {
                text: text.to_string(),
                words: vec![OcrWord {
                    text: text.to_string(),
                    bounds: Bounds::default(),
                }],
            }],
        }
    }

    #[test]
    fn test_json_lines() {
        let mut writer = ResultWriter::new(Vec::new(), OutputFormat::Json);
        writer.write(&result("HELLO")).unwrap();
        writer.write(&result("WORLD")).unwrap();
        assert_eq!(writer.written(), 2);

        let out = String::from_utf8(writer.into_inner()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: RecognitionResult = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first.text, "HELLO");
        assert_eq!(first.text_angle, Some(0.5));
        assert_eq!(first.lines[0].words[0].text, "HELLO");
    }

    #[test]
    fn test_text_separates_results_with_blank_line() {
        let mut writer = ResultWriter::new(Vec::new(), OutputFormat::Text);
        writer.write(&result("HELLO")).unwrap();
        writer.write(&result("WORLD")).unwrap();

        let out = String::from_utf8(writer.into_inner()).unwrap();
        assert_eq!(out, "HELLO\n\nWORLD\n");
    }

    #[test]
    fn test_pretty_is_valid_json() {
        let mut writer = ResultWriter::new(Vec::new(), OutputFormat::Pretty);
        writer.write(&result("HELLO")).unwrap();

        let out = String::from_utf8(writer.into_inner()).unwrap();
        assert!(out.contains("\n  \"language\": \"en-US\""));
        let parsed: RecognitionResult = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed.path, PathBuf::from("/images/a.png"));
    }
}
