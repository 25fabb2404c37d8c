use clap::Parser;
use image::ImageReader;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use giroscan::debug::DebugOutput;
use giroscan::{GlyphSet, ScanError, Scanner, ScannerConfig};

#[derive(Parser)]
#[command(name = "giroscan")]
#[command(about = "Read the OCR line of a giro payment slip from an image")]
struct Cli {
    /// Path to input image file
    #[arg(value_name = "IMAGE", required_unless_present = "print_config")]
    image_path: Option<PathBuf>,

    /// Scanner settings (TOML); defaults are used for missing keys
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory of char<code>*.png reference glyphs instead of the built-in set
    #[arg(long, value_name = "DIR")]
    glyphs: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Save debug outputs to directory (must be empty)
    #[arg(long, value_name = "DIR")]
    debug_out: Option<PathBuf>,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    init_logging(args.verbose);

    let config = match &args.config {
        Some(path) => giroscan::config::load_config(path)?,
        None => ScannerConfig::default(),
    };

    if args.print_config {
        print!("{}", toml::to_string_pretty(&config)?);
        return Ok(());
    }

    let glyphs = match &args.glyphs {
        Some(dir) => GlyphSet::load_dir(dir)?,
        None => GlyphSet::builtin(),
    };
    let scanner = Scanner::new(config, glyphs)?;

    let Some(image_path) = args.image_path else {
        anyhow::bail!("No input image given");
    };

    let img = ImageReader::open(&image_path)?
        .decode()
        .map_err(|e| anyhow::anyhow!("Failed to decode image: {}", e))?;
    tracing::info!("Image loaded: {}x{}", img.width(), img.height());

    let result = match &args.debug_out {
        Some(dir) => {
            let debug_out = DebugOutput::new(dir.clone())?;
            let result = scanner.scan_with_diagnostics(&img)?;
            let written = debug_out.save_scan(&img, &result, &scanner.reference_sheet())?;
            let out_dir = debug_out.dir().display().to_string();
            tracing::info!("Wrote {} debug images to {}", written, out_dir);
            result
        }
        None => scanner.scan(&img)?,
    };

    if args.verbose {
        for (i, m) in result.matches.iter().enumerate() {
            println!(
                "  {:>2}: '{}' {:>5.1}% at ({}, {}) {}x{}",
                i,
                m.symbol,
                m.score,
                m.bbox.left,
                m.bbox.top,
                m.bbox.width(),
                m.bbox.height()
            );
        }
    }

    match result.require_text() {
        Ok(text) => println!("{}", text),
        Err(ScanError::InsufficientCandidates { found, required }) => {
            println!("No OCR line found ({} of {} characters)", found, required);
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "giroscan=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
