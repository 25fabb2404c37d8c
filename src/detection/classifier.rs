//! Nearest-template classification of candidate bitmaps
//!
//! Each candidate is compared pixel by pixel (at the configured stride)
//! against every reference glyph. A comparison is abandoned as soon as its
//! running match percentage drops below the best score seen so far.

use crate::config::ScannerConfig;
use crate::detection::glyphs::GlyphSet;
use crate::detection::preprocessing::is_dark;
use crate::error::{Result, ScanError};
use crate::models::{Candidate, CharacterMatch};
use image::GrayImage;
use tracing::trace;

/// Classify every candidate and concatenate the symbols, left to right
pub fn classify(
    candidates: &[Candidate],
    glyphs: &GlyphSet,
    config: &ScannerConfig,
) -> Result<(String, Vec<CharacterMatch>)> {
    let matches = candidates
        .iter()
        .map(|candidate| {
            let (symbol, score) = best_match(&candidate.contrasted, glyphs, config)?;
            Ok(CharacterMatch {
                symbol,
                score,
                bbox: candidate.bbox,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let text = matches.iter().map(|m| m.symbol).collect();
    Ok((text, matches))
}

/// Best reference symbol for one bitmap and its match percentage.
///
/// Returns the unrecognized symbol with score 0 when no reference beats
/// `min_initial_match_percent`. Ties go to the reference visited first,
/// i.e. the lowest symbol.
pub fn best_match(
    bitmap: &GrayImage,
    glyphs: &GlyphSet,
    config: &ScannerConfig,
) -> Result<(char, f32)> {
    let (width, height) = bitmap.dimensions();
    if (width, height) != glyphs.dimensions() {
        return Err(ScanError::DimensionMismatch {
            width,
            height,
            expected_width: glyphs.width(),
            expected_height: glyphs.height(),
        });
    }

    let m = &config.matching;
    let mut best_symbol = m.unrecognized_symbol;
    let mut best_score = m.min_initial_match_percent;
    let mut recognized = false;

    for glyph in glyphs.iter() {
        let Some(percent) = compare(bitmap, &glyph.bitmap, best_score, config) else {
            trace!("'{}' abandoned below {:.1}%", glyph.symbol, best_score);
            continue;
        };
        trace!("'{}' matched {:.1}%", glyph.symbol, percent);

        if percent > best_score {
            best_score = percent;
            best_symbol = glyph.symbol;
            recognized = true;
        }
    }

    Ok((best_symbol, if recognized { best_score } else { 0.0 }))
}

/// Match percentage of `candidate` against `reference`, or `None` once the
/// running percentage falls below `floor`.
///
/// `match_tolerance_rows` full rows of matching pixels are credited up front.
fn compare(
    candidate: &GrayImage,
    reference: &GrayImage,
    floor: f32,
    config: &ScannerConfig,
) -> Option<f32> {
    let m = &config.matching;
    let threshold = config.normalization.dark_threshold;

    let mut matching = reference.width() as u64 * m.match_tolerance_rows as u64;
    let mut nonmatching = 0u64;

    for y in (0..candidate.height()).step_by(m.compare_row_spacing as usize) {
        for x in (0..candidate.width()).step_by(m.compare_col_spacing as usize) {
            let found = is_dark(candidate.get_pixel(x, y)[0], threshold);
            let expected = is_dark(reference.get_pixel(x, y)[0], threshold);

            if found == expected {
                matching += 1;
            } else {
                nonmatching += 1;
                if nonmatching % m.early_exit_interval as u64 == 0
                    && percent(matching, nonmatching) < floor
                {
                    return None;
                }
            }
        }
    }

    Some(percent(matching, nonmatching))
}

fn percent(matching: u64, nonmatching: u64) -> f32 {
    let total = matching + nonmatching;
    if total == 0 {
        return 0.0;
    }
    matching as f32 / total as f32 * 100.0
}
