mod common;
use common::*;

use std::process::{Command, Output};

fn giroscan(args: &[&str]) -> anyhow::Result<Output> {
    Ok(Command::new(env!("CARGO_BIN_EXE_giroscan")).args(args).output()?)
}

#[test]
fn test_print_config() -> anyhow::Result<()> {
    let output = giroscan(&["--print-config"])?;
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout)?;
    let config: ScannerConfig = toml::from_str(&stdout)?;
    assert_eq!(config, ScannerConfig::default());
    Ok(())
}

#[test]
fn test_reads_line_from_file() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;
    let image = dir.path().join("line.png");
    line_1234().save(&image)?;

    let output = giroscan(&[image.to_str().unwrap_or_default()])?;
    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout)?.trim(), "1234");
    Ok(())
}

#[test]
fn test_blank_frame_reports_no_line() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;
    let image = dir.path().join("blank.png");
    blank(100, 50).save(&image)?;

    let output = giroscan(&[image.to_str().unwrap_or_default()])?;
    assert!(output.status.success());
    assert!(String::from_utf8(output.stdout)?.starts_with("No OCR line found"));
    Ok(())
}

#[test]
fn test_debug_out_directory() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;
    let image = dir.path().join("line.png");
    let out_dir = dir.path().join("debug");
    line_1234().save(&image)?;

    let output = giroscan(&[
        image.to_str().unwrap_or_default(),
        "--debug-out",
        out_dir.to_str().unwrap_or_default(),
    ])?;
    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout)?.trim(), "1234");
    assert_eq!(std::fs::read_dir(&out_dir)?.count(), 5);

    // Reusing a non-empty directory is refused
    let again = giroscan(&[
        image.to_str().unwrap_or_default(),
        "--debug-out",
        out_dir.to_str().unwrap_or_default(),
    ])?;
    assert!(!again.status.success());
    Ok(())
}
