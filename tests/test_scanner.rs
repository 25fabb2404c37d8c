mod common;
use common::*;

use giroscan::PixelFormat;
use giroscan::detection::preprocessing::image_from_raw;
use std::sync::Arc;

#[test]
fn test_reads_1234() -> anyhow::Result<()> {
    let scanner = builtin_scanner();
    let result = scanner.scan(&dynamic(line_1234()))?;

    assert_eq!(result.text(), Some("1234"));
    assert_eq!(result.candidates_found, 4);
    assert_eq!(result.skipped, 0);
    assert_eq!(result.matches.len(), 4);
    assert_eq!(result.matches[0].bbox, BoundingBox::new(20, 18, 36, 42));
    assert!(result.confidence().values().all(|&score| score == 100.0));
    Ok(())
}

#[test]
fn test_blank_frame_is_no_result() -> anyhow::Result<()> {
    let scanner = builtin_scanner();
    let result = scanner.scan(&dynamic(blank(100, 50)))?;

    assert!(!result.is_recognized());
    assert!(result.matches.is_empty());
    assert!(matches!(
        result.require_text(),
        Err(ScanError::InsufficientCandidates { found: 0, required: 4 })
    ));
    Ok(())
}

#[test]
fn test_three_characters_are_not_enough() -> anyhow::Result<()> {
    let scanner = builtin_scanner();
    let img = place_glyphs(200, 60, "123", &[20, 64, 108], 18);
    let result = scanner.scan_luma(&img)?;
    assert_eq!(result.text(), None);

    let mut config = ScannerConfig::default();
    config.segmentation.min_result_length = 3;
    let relaxed = Scanner::new(config, GlyphSet::builtin())?;
    assert_eq!(relaxed.scan_luma(&img)?.text(), Some("123"));
    Ok(())
}

#[test]
fn test_full_alphabet_with_camera_levels() -> anyhow::Result<()> {
    let scanner = builtin_scanner();
    let line = scanner.glyphs().render_line("#0123456789>", 8, 20);
    let frame = to_camera_levels(&line, 40, 215);

    let result = scanner.scan(&dynamic(frame))?;
    assert_eq!(result.text(), Some("#0123456789>"));
    Ok(())
}

#[test]
fn test_rgb_and_raw_input() -> anyhow::Result<()> {
    let scanner = builtin_scanner();
    let gray = line_1234();

    let rgb = dynamic(gray.clone()).to_rgb8();
    let result = scanner.scan(&image::DynamicImage::ImageRgb8(rgb))?;
    assert_eq!(result.text(), Some("1234"));

    let raw = image_from_raw(gray.into_raw(), 200, 60, PixelFormat::Luma8)?;
    assert_eq!(scanner.scan(&raw)?.text(), Some("1234"));
    Ok(())
}

#[test]
fn test_diagnostics() -> anyhow::Result<()> {
    let scanner = builtin_scanner();
    let result = scanner.scan_with_diagnostics(&dynamic(line_1234()))?;

    let diag = result.diagnostics.as_ref().expect("diagnostics requested");
    assert_eq!(diag.normalized.dimensions(), (200, 60));
    assert_eq!(diag.boxes.dimensions(), (200, 60));
    // Box outline drawn in red on the first candidate's corner
    assert_eq!(diag.boxes.get_pixel(20, 18).0, [255, 0, 0]);

    let sheet = diag.candidates.as_ref().expect("candidates classified");
    assert_eq!(sheet.dimensions(), (4 * 16, 3 * 24));

    assert_eq!(scanner.reference_sheet().dimensions(), (12 * 16, 24));

    let plain = scanner.scan(&dynamic(line_1234()))?;
    assert!(plain.diagnostics.is_none());
    Ok(())
}

#[test]
fn test_diagnostics_without_result() -> anyhow::Result<()> {
    let scanner = builtin_scanner();
    let result = scanner.scan_with_diagnostics(&dynamic(blank(100, 50)))?;

    let diag = result.diagnostics.expect("diagnostics requested");
    assert!(diag.candidates.is_none());
    Ok(())
}

#[test]
fn test_invalid_config_rejected_at_construction() {
    let mut config = ScannerConfig::default();
    config.matching.compare_row_spacing = 0;
    assert!(matches!(
        Scanner::new(config, GlyphSet::builtin()),
        Err(ScanError::InvalidConfig(_))
    ));
}

#[test]
fn test_tolerance_bound_checked_at_construction() {
    let mut config = ScannerConfig::default();
    config.matching.match_tolerance_rows = 300_000_000;
    assert!(matches!(
        Scanner::new(config, GlyphSet::builtin()),
        Err(ScanError::InvalidConfig(_))
    ));
}

#[test]
fn test_unrecognized_symbol_must_not_be_a_glyph() {
    let mut config = ScannerConfig::default();
    config.matching.unrecognized_symbol = '#';
    assert!(matches!(
        Scanner::new(config.clone(), GlyphSet::builtin()),
        Err(ScanError::InvalidConfig(_))
    ));

    config.matching.unrecognized_symbol = '?';
    assert!(Scanner::new(config, GlyphSet::builtin()).is_ok());
}

#[test]
fn test_shared_across_threads() {
    let scanner = Arc::new(builtin_scanner());
    let frame = dynamic(line_1234());

    let (scanner, frame) = (&scanner, &frame);

    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| s.spawn(move || scanner.scan(frame).unwrap().text))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap().as_deref(), Some("1234"));
        }
    });
}
