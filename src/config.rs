//! Scanner configuration
//!
//! Tunable thresholds for segmentation, normalization and glyph matching,
//! stored as TOML.

use crate::error::{Result, ScanError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Upper bound for `match_tolerance_rows`
pub const MAX_TOLERANCE_ROWS: u32 = 1024;

/// All scanner settings. Constructed once and shared read-only across scans.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScannerConfig {
    /// Column/row run detection and candidate size limits
    pub segmentation: SegmentationConfig,
    /// Brightness/contrast remapping
    pub normalization: NormalizationConfig,
    /// Template comparison
    pub matching: MatchingConfig,
}

/// Candidate segmentation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentationConfig {
    /// Fewest characters a scan must find to produce a result
    pub min_result_length: usize,
    /// Minimum character width as fraction of image width
    pub char_min_width_fraction: f32,
    /// Maximum character width as fraction of image width
    pub char_max_width_fraction: f32,
    /// Minimum character height as fraction of image height
    pub char_min_height_fraction: f32,
    /// Maximum character height as fraction of image height
    pub char_max_height_fraction: f32,
    /// Characters must be taller than wide
    pub char_always_portrait: bool,
    /// Ink pixels needed for a column to count as part of a character
    pub min_dark_per_column: u32,
    /// Ink pixels needed for a row to count as part of a character
    pub min_dark_per_row: u32,
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            min_result_length: 4,
            char_min_width_fraction: 0.01,
            char_max_width_fraction: 0.1,
            char_min_height_fraction: 0.15,
            char_max_height_fraction: 0.9,
            char_always_portrait: true,
            min_dark_per_column: 2,
            min_dark_per_row: 2,
        }
    }
}

/// Brightness/contrast settings used to binarize frames and candidates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizationConfig {
    /// Brightness, applied as a `1 + color_scale` multiplier
    pub color_scale: f32,
    /// Contrast, applied as a `1 + color_scale_translate` multiplier around mid-gray
    pub color_scale_translate: f32,
    /// A normalized pixel at or below this luma is ink
    pub dark_threshold: u8,
}

impl Default for NormalizationConfig {
    fn default() -> Self {
        Self {
            color_scale: 0.3,
            color_scale_translate: 100.0,
            dark_threshold: 64,
        }
    }
}

/// Glyph comparison settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    /// Score a reference must beat before a candidate is recognized at all
    pub min_initial_match_percent: f32,
    /// Mismatching rows forgiven up front, as a matching-pixel head start
    pub match_tolerance_rows: u32,
    /// Row stride when comparing bitmaps
    pub compare_row_spacing: u32,
    /// Column stride when comparing bitmaps
    pub compare_col_spacing: u32,
    /// Re-check the running score every this many mismatches
    pub early_exit_interval: u32,
    /// Emitted for candidates no reference matches well enough
    pub unrecognized_symbol: char,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            min_initial_match_percent: 50.0,
            match_tolerance_rows: 3,
            compare_row_spacing: 2,
            compare_col_spacing: 2,
            early_exit_interval: 2,
            unrecognized_symbol: 'X',
        }
    }
}

impl ScannerConfig {
    /// Check that every value is in range
    pub fn validate(&self) -> Result<()> {
        let seg = &self.segmentation;
        if seg.min_result_length == 0 {
            return Err(invalid("min_result_length must be at least 1"));
        }
        check_fraction("char_min_width_fraction", seg.char_min_width_fraction)?;
        check_fraction("char_max_width_fraction", seg.char_max_width_fraction)?;
        check_fraction("char_min_height_fraction", seg.char_min_height_fraction)?;
        check_fraction("char_max_height_fraction", seg.char_max_height_fraction)?;
        if seg.char_min_width_fraction > seg.char_max_width_fraction {
            return Err(invalid("char_min_width_fraction exceeds char_max_width_fraction"));
        }
        if seg.char_min_height_fraction > seg.char_max_height_fraction {
            return Err(invalid("char_min_height_fraction exceeds char_max_height_fraction"));
        }
        if seg.min_dark_per_column == 0 || seg.min_dark_per_row == 0 {
            return Err(invalid("min_dark_per_column and min_dark_per_row must be at least 1"));
        }

        let norm = &self.normalization;
        if !norm.color_scale.is_finite() || !norm.color_scale_translate.is_finite() {
            return Err(invalid("color_scale and color_scale_translate must be finite"));
        }

        let m = &self.matching;
        if !(0.0..=100.0).contains(&m.min_initial_match_percent) {
            return Err(invalid("min_initial_match_percent must be within 0..=100"));
        }
        if m.compare_row_spacing == 0 || m.compare_col_spacing == 0 {
            return Err(invalid("compare spacing must be at least 1"));
        }
        if m.match_tolerance_rows > MAX_TOLERANCE_ROWS {
            return Err(invalid(&format!(
                "match_tolerance_rows must be at most {MAX_TOLERANCE_ROWS}"
            )));
        }
        if m.early_exit_interval == 0 {
            return Err(invalid("early_exit_interval must be at least 1"));
        }

        Ok(())
    }
}

fn check_fraction(name: &str, value: f32) -> Result<()> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(invalid(&format!("{name} must be within (0, 1], got {value}")))
    }
}

fn invalid(msg: &str) -> ScanError {
    ScanError::InvalidConfig(msg.to_string())
}

/// Load configuration from file
pub fn load_config(path: &Path) -> Result<ScannerConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: ScannerConfig = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

/// Save configuration to file
pub fn save_config(config: &ScannerConfig, path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content)?;
    Ok(())
}
