pub mod preprocessing;
pub mod glyphs;
pub mod segmenter;
pub mod rescale;
pub mod classifier;
pub mod diagnostics;

use crate::config::ScannerConfig;
use crate::error::{Result, ScanError};
use crate::models::{BoundingBox, ScanResult};
use diagnostics::Diagnostics;
use glyphs::GlyphSet;
use image::{DynamicImage, GrayImage};
use std::sync::Arc;
use tracing::debug;

/// OCR line scanner: normalize → segment → rescale → classify.
///
/// Holds only read-only state, so one scanner can serve any number of
/// threads. Each call to [`Scanner::scan`] is independent.
#[derive(Debug, Clone)]
pub struct Scanner {
    config: ScannerConfig,
    glyphs: Arc<GlyphSet>,
}

impl Scanner {
    /// Create a scanner, validating the configuration up front
    pub fn new(config: ScannerConfig, glyphs: impl Into<Arc<GlyphSet>>) -> Result<Self> {
        config.validate()?;
        let glyphs = glyphs.into();
        let unrecognized = config.matching.unrecognized_symbol;
        if glyphs.get(unrecognized).is_some() {
            return Err(ScanError::InvalidConfig(format!(
                "unrecognized_symbol '{unrecognized}' is also a reference glyph"
            )));
        }
        debug!(
            "Scanner ready with {} reference glyphs of {}x{}",
            glyphs.len(),
            glyphs.width(),
            glyphs.height()
        );
        Ok(Self { config, glyphs })
    }

    /// Scanner with default settings and the built-in glyph set
    pub fn with_builtin_glyphs() -> Self {
        Self {
            config: ScannerConfig::default(),
            glyphs: Arc::new(GlyphSet::builtin()),
        }
    }

    pub fn config(&self) -> &ScannerConfig {
        &self.config
    }

    pub fn glyphs(&self) -> &GlyphSet {
        &self.glyphs
    }

    /// Scan a frame for an OCR line
    pub fn scan(&self, img: &DynamicImage) -> Result<ScanResult> {
        self.run(&preprocessing::to_grayscale(img), false)
    }

    /// Scan a frame that is already grayscale
    pub fn scan_luma(&self, img: &GrayImage) -> Result<ScanResult> {
        self.run(img, false)
    }

    /// Scan and keep the intermediate bitmaps in [`ScanResult::diagnostics`]
    pub fn scan_with_diagnostics(&self, img: &DynamicImage) -> Result<ScanResult> {
        self.run(&preprocessing::to_grayscale(img), true)
    }

    /// All reference glyphs side by side, in matching order
    pub fn reference_sheet(&self) -> GrayImage {
        diagnostics::reference_sheet(&self.glyphs)
    }

    fn run(&self, source: &GrayImage, keep_diagnostics: bool) -> Result<ScanResult> {
        let norm = &self.config.normalization;
        let required = self.config.segmentation.min_result_length;

        // Step 1: Binarize
        let normalized =
            preprocessing::normalize(source, norm.color_scale, norm.color_scale_translate);

        // Step 2: Find character cells
        let boxes = segmenter::segment(&normalized, &self.config);
        if boxes.len() < required {
            debug!("{} candidates, need {}; no result", boxes.len(), required);
            return Ok(self.no_result(source, normalized, &boxes, 0, keep_diagnostics));
        }

        self.read_boxes(source, normalized, &boxes, keep_diagnostics)
    }

    /// Rescale and classify segmented boxes
    fn read_boxes(
        &self,
        source: &GrayImage,
        normalized: GrayImage,
        boxes: &[BoundingBox],
        keep_diagnostics: bool,
    ) -> Result<ScanResult> {
        let norm = &self.config.normalization;
        let required = self.config.segmentation.min_result_length;

        // Step 3: Crop from the unnormalized frame and scale to glyph size
        let (width, height) = self.glyphs.dimensions();
        let candidates: Vec<_> = boxes
            .iter()
            .filter_map(|bbox| {
                let candidate = rescale::extract_candidate(source, bbox, width, height, norm);
                if candidate.is_none() {
                    debug!("Skipping degenerate candidate {:?}", bbox);
                }
                candidate
            })
            .collect();
        let skipped = boxes.len() - candidates.len();
        if candidates.len() < required {
            debug!(
                "{} candidates left after skipping {}, need {}; no result",
                candidates.len(),
                skipped,
                required
            );
            return Ok(self.no_result(source, normalized, boxes, skipped, keep_diagnostics));
        }

        // Step 4: Match against the references
        let (text, matches) = classifier::classify(&candidates, &self.glyphs, &self.config)?;
        debug!("Recognized {:?} from {} candidates", text, candidates.len());

        let diagnostics = keep_diagnostics.then(|| {
            Diagnostics::build(source, normalized, boxes, &candidates, &matches, &self.glyphs)
        });

        Ok(ScanResult {
            text: Some(text),
            matches,
            candidates_found: boxes.len(),
            skipped,
            required,
            diagnostics,
        })
    }

    fn no_result(
        &self,
        source: &GrayImage,
        normalized: GrayImage,
        boxes: &[BoundingBox],
        skipped: usize,
        keep_diagnostics: bool,
    ) -> ScanResult {
        let mut result =
            ScanResult::no_result(boxes.len(), self.config.segmentation.min_result_length);
        result.skipped = skipped;
        if keep_diagnostics {
            result.diagnostics = Some(Diagnostics::build(
                source,
                normalized,
                boxes,
                &[],
                &[],
                &self.glyphs,
            ));
        }
        result
    }
}
