//! file-ocr - Windows OCR for image files
//!
//! Loads each image through the Windows imaging pipeline, runs the
//! built-in recognizer on it and prints the result.

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::io::{BufRead, IsTerminal};
use std::path::{Path, PathBuf};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use file_ocr::config::{self, AppConfig, OutputFormat};
use file_ocr::ocr::{self, OcrSession};
use file_ocr::output::ResultWriter;

/// Run the built-in Windows OCR engine on image files
#[derive(Parser, Debug)]
#[command(name = "file-ocr", version)]
#[command(about = "Run the built-in Windows OCR engine on image files")]
struct Args {
    /// Image files to recognize; `-` reads newline-separated paths from stdin
    paths: Vec<PathBuf>,

    /// Bind platform types again even if already bound
    #[arg(long)]
    reload: bool,

    /// Recognizer language tag (default: user profile languages)
    #[arg(short, long)]
    language: Option<String>,

    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// List installed recognizer languages and exit
    #[arg(long)]
    list_languages: bool,

    /// List image file extensions the platform decoder accepts and exit
    #[arg(long)]
    list_formats: bool,

    /// Configuration file (default: config.toml in the user config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// More log output (repeatable)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Results go to stdout, so logs go to stderr
    let level = match (args.quiet, args.verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = load_or_default_config(args.config.as_deref())?;
    let format = args.format.unwrap_or(config.output.format);
    let language = args.language.clone().or(config.ocr.language);

    let binder = ocr::process_binder();
    let bindings = binder
        .bind(args.reload)
        .context("Failed to bind the platform OCR service")?;

    if args.list_languages {
        for lang in &bindings.recognizer_languages {
            println!("{}", lang);
        }
        return Ok(());
    }

    if args.list_formats {
        for ext in &bindings.file_extensions {
            println!("{}", ext);
        }
        return Ok(());
    }

    let stdin = std::io::stdin();
    let paths = collect_paths(&args.paths, stdin.is_terminal(), stdin.lock())?;

    let session = OcrSession::new(binder.platform(), &bindings, language.as_deref())
        .context("Failed to create OCR engine")?;

    let mut writer = ResultWriter::new(std::io::stdout().lock(), format);
    let mut failed = 0usize;

    for outcome in session.recognize_all(&paths) {
        match outcome {
            Ok(result) => writer.write(&result)?,
            Err(e) => {
                error!("{}", e);
                failed += 1;
            }
        }
    }

    info!(
        recognized = writer.written(),
        failed,
        skipped = paths.len() - writer.written() - failed,
        "Done"
    );

    if failed > 0 {
        bail!("{} of {} images failed", failed, writer.written() + failed);
    }

    Ok(())
}

/// Load the explicit config file, or the default one if it exists
fn load_or_default_config(explicit: Option<&Path>) -> Result<AppConfig> {
    if let Some(path) = explicit {
        return config::load_config(path);
    }

    if let Ok(path) = config::default_config_path() {
        if path.exists() {
            let config = config::load_config(&path)?;
            info!("Loaded configuration from {:?}", path);
            return Ok(config);
        }
    }
    Ok(AppConfig::default())
}

/// Expand `-` (or no paths with piped stdin) into the paths read from stdin
fn collect_paths(
    args: &[PathBuf],
    stdin_is_terminal: bool,
    stdin: impl BufRead,
) -> Result<Vec<PathBuf>> {
    let wants_stdin = args.iter().any(|p| p.as_os_str() == "-")
        || (args.is_empty() && !stdin_is_terminal);
    if !wants_stdin {
        return Ok(args.to_vec());
    }

    let mut from_stdin = Vec::new();
    for line in stdin.lines() {
        let line = line.context("Failed to read paths from stdin")?;
        let line = line.trim_end_matches('\r');
        if !line.trim().is_empty() {
            from_stdin.push(PathBuf::from(line));
        }
    }

    if args.is_empty() {
        return Ok(from_stdin);
    }

    // Splice stdin paths in where `-` appeared
    let mut paths = Vec::with_capacity(args.len() + from_stdin.len());
    let mut from_stdin = Some(from_stdin);
    for arg in args {
        if arg.as_os_str() == "-" {
            paths.extend(from_stdin.take().unwrap_or_default());
        } else {
            paths.push(arg.clone());
        }
    }
    Ok(paths)
}
