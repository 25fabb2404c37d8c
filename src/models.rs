use crate::detection::diagnostics::Diagnostics;
use crate::error::{Result, ScanError};
use image::GrayImage;
use std::collections::BTreeMap;

/// Character cell in source image coordinates.
///
/// `right` and `bottom` are exclusive: one past the last ink column/row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoundingBox {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl BoundingBox {
    pub fn new(left: u32, top: u32, right: u32, bottom: u32) -> Self {
        Self { left, top, right, bottom }
    }

    pub fn width(&self) -> u32 {
        self.right.saturating_sub(self.left)
    }

    pub fn height(&self) -> u32 {
        self.bottom.saturating_sub(self.top)
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    pub fn is_portrait(&self) -> bool {
        self.height() > self.width()
    }

    /// Clip to an image of the given size
    pub fn clamp_to(&self, width: u32, height: u32) -> Self {
        Self {
            left: self.left.min(width),
            top: self.top.min(height),
            right: self.right.min(width),
            bottom: self.bottom.min(height),
        }
    }
}

/// A segmented region scaled to reference glyph size
#[derive(Debug, Clone)]
pub struct Candidate {
    pub bbox: BoundingBox,
    /// Cropped from the source frame and resized, no contrast applied
    pub rescaled: GrayImage,
    /// `rescaled` after normalization; this is what gets classified
    pub contrasted: GrayImage,
}

/// Best reference for one candidate
#[derive(Debug, Clone, PartialEq)]
pub struct CharacterMatch {
    /// Recognized symbol, or the configured unrecognized symbol
    pub symbol: char,
    /// Match percentage of the winning reference, 0 when nothing matched
    pub score: f32,
    pub bbox: BoundingBox,
}

/// Outcome of a single scan.
///
/// `text` is `None` when the frame held too few character candidates; callers
/// should simply try the next frame.
#[derive(Debug, Clone)]
pub struct ScanResult {
    pub text: Option<String>,
    /// One entry per classified candidate, left to right
    pub matches: Vec<CharacterMatch>,
    /// Candidates accepted by the size filter
    pub candidates_found: usize,
    /// Candidates dropped because they degenerated during extraction
    pub skipped: usize,
    pub(crate) required: usize,
    pub diagnostics: Option<Diagnostics>,
}

impl ScanResult {
    pub(crate) fn no_result(candidates_found: usize, required: usize) -> Self {
        Self {
            text: None,
            matches: Vec::new(),
            candidates_found,
            skipped: 0,
            required,
            diagnostics: None,
        }
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn is_recognized(&self) -> bool {
        self.text.is_some()
    }

    /// Match score per character index
    pub fn confidence(&self) -> BTreeMap<usize, f32> {
        self.matches
            .iter()
            .enumerate()
            .map(|(i, m)| (i, m.score))
            .collect()
    }

    /// Convert a missing result into [`ScanError::InsufficientCandidates`],
    /// counting only candidates that were not skipped
    pub fn require_text(self) -> Result<String> {
        let found = self.candidates_found - self.skipped;
        let required = self.required;
        self.text
            .ok_or(ScanError::InsufficientCandidates { found, required })
    }
}
