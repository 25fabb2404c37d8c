//! Debug bitmaps for inspecting a scan visually

use crate::detection::glyphs::GlyphSet;
use crate::models::{BoundingBox, Candidate, CharacterMatch};
use image::{DynamicImage, GrayImage, Luma, Rgb, RgbImage};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;

const BOX_COLOR: Rgb<u8> = Rgb([255, 0, 0]);

/// Which way [`compose`] lays out its images
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Horizontal,
    Vertical,
}

/// Bitmaps produced by `Scanner::scan_with_diagnostics`
#[derive(Debug, Clone)]
pub struct Diagnostics {
    /// The frame after brightness/contrast normalization
    pub normalized: GrayImage,
    /// The frame in color with accepted candidate boxes outlined
    pub boxes: RgbImage,
    /// Three rows: best-matching references, contrasted candidates, plain
    /// candidates. `None` when no candidate was classified.
    pub candidates: Option<GrayImage>,
}

impl Diagnostics {
    pub(crate) fn build(
        source: &GrayImage,
        normalized: GrayImage,
        boxes: &[BoundingBox],
        candidates: &[Candidate],
        matches: &[CharacterMatch],
        glyphs: &GlyphSet,
    ) -> Self {
        Self {
            normalized,
            boxes: draw_boxes(source, boxes),
            candidates: candidate_sheet(candidates, matches, glyphs),
        }
    }
}

/// Paste equal-sized images side by side or on top of each other.
///
/// The first image sets the cell size; the canvas starts white. Returns
/// `None` for an empty list.
pub fn compose(images: &[&GrayImage], direction: Direction) -> Option<GrayImage> {
    let first = images.first()?;
    let (cell_w, cell_h) = first.dimensions();
    let n = images.len() as u32;

    let (width, height) = match direction {
        Direction::Horizontal => (cell_w * n, cell_h),
        Direction::Vertical => (cell_w, cell_h * n),
    };
    let mut canvas = GrayImage::from_pixel(width, height, Luma([255]));

    for (i, img) in images.iter().enumerate() {
        let i = i as i64;
        let (x, y) = match direction {
            Direction::Horizontal => (i * cell_w as i64, 0),
            Direction::Vertical => (0, i * cell_h as i64),
        };
        image::imageops::replace(&mut canvas, *img, x, y);
    }

    Some(canvas)
}

/// All reference glyphs in symbol order, side by side
pub fn reference_sheet(glyphs: &GlyphSet) -> GrayImage {
    let bitmaps: Vec<&GrayImage> = glyphs.iter().map(|g| &g.bitmap).collect();
    // A glyph set is never empty
    compose(&bitmaps, Direction::Horizontal)
        .unwrap_or_else(|| GrayImage::new(glyphs.width(), glyphs.height()))
}

fn candidate_sheet(
    candidates: &[Candidate],
    matches: &[CharacterMatch],
    glyphs: &GlyphSet,
) -> Option<GrayImage> {
    let blank = GrayImage::from_pixel(glyphs.width(), glyphs.height(), Luma([255]));

    let references: Vec<&GrayImage> = matches
        .iter()
        .map(|m| glyphs.get(m.symbol).unwrap_or(&blank))
        .collect();
    let contrasted: Vec<&GrayImage> = candidates.iter().map(|c| &c.contrasted).collect();
    let plain: Vec<&GrayImage> = candidates.iter().map(|c| &c.rescaled).collect();

    let rows = [
        compose(&references, Direction::Horizontal)?,
        compose(&contrasted, Direction::Horizontal)?,
        compose(&plain, Direction::Horizontal)?,
    ];
    compose(&[&rows[0], &rows[1], &rows[2]], Direction::Vertical)
}

fn draw_boxes(source: &GrayImage, boxes: &[BoundingBox]) -> RgbImage {
    let mut canvas = DynamicImage::ImageLuma8(source.clone()).to_rgb8();
    for bbox in boxes.iter().filter(|b| !b.is_empty()) {
        let rect = Rect::at(bbox.left as i32, bbox.top as i32).of_size(bbox.width(), bbox.height());
        draw_hollow_rect_mut(&mut canvas, rect, BOX_COLOR);
    }
    canvas
}
