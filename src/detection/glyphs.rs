//! Reference glyphs for the OCR line alphabet
//!
//! The built-in set covers the digits plus the two delimiters of the giro
//! payment line, `#` and `>`, at 16x24 pixels. Every glyph fills its cell
//! edge to edge because candidates are cropped to their ink before scaling.

use crate::error::{Result, ScanError};
use image::{GrayImage, Luma};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

const INK: u8 = 0;
const PAPER: u8 = 255;

/// Each mask cell becomes a square of this many pixels
const BUILTIN_SCALE: u32 = 2;
const MASK_WIDTH: usize = 8;
const MASK_HEIGHT: usize = 12;

#[rustfmt::skip]
const BUILTIN_MASKS: [(char, [&str; MASK_HEIGHT]); 12] = [
    ('#', [
        ".##..##.",
        ".##..##.",
        ".##..##.",
        "########",
        "########",
        ".##..##.",
        ".##..##.",
        "########",
        "########",
        ".##..##.",
        ".##..##.",
        ".##..##.",
    ]),
    ('0', [
        ".######.",
        "##....##",
        "##....##",
        "##....##",
        "##....##",
        "##....##",
        "##....##",
        "##....##",
        "##....##",
        "##....##",
        "##....##",
        ".######.",
    ]),
    ('1', [
        "...###..",
        "..####..",
        ".##.##..",
        "##..##..",
        "....##..",
        "....##..",
        "....##..",
        "....##..",
        "....##..",
        "....##..",
        "....##..",
        "########",
    ]),
    ('2', [
        ".######.",
        "##....##",
        "......##",
        "......##",
        ".....##.",
        "....##..",
        "...##...",
        "..##....",
        ".##.....",
        "##......",
        "##......",
        "########",
    ]),
    ('3', [
        "########",
        ".....##.",
        "....##..",
        "...##...",
        "..#####.",
        "......##",
        "......##",
        "......##",
        "......##",
        "##....##",
        "##....##",
        ".######.",
    ]),
    ('4', [
        "....##..",
        "...###..",
        "..#.##..",
        ".#..##..",
        "##..##..",
        "##..##..",
        "########",
        "....##..",
        "....##..",
        "....##..",
        "....##..",
        "...####.",
    ]),
    ('5', [
        "########",
        "##......",
        "##......",
        "##......",
        "#######.",
        "......##",
        "......##",
        "......##",
        "......##",
        "##....##",
        "##....##",
        ".######.",
    ]),
    ('6', [
        "..#####.",
        ".##.....",
        "##......",
        "##......",
        "#######.",
        "##....##",
        "##....##",
        "##....##",
        "##....##",
        "##....##",
        "##....##",
        ".######.",
    ]),
    ('7', [
        "########",
        "##....##",
        "......##",
        ".....##.",
        ".....##.",
        "....##..",
        "....##..",
        "...##...",
        "...##...",
        "..##....",
        "..##....",
        "..##....",
    ]),
    ('8', [
        ".######.",
        "##....##",
        "##....##",
        "##....##",
        ".##..##.",
        "..####..",
        ".##..##.",
        "##....##",
        "##....##",
        "##....##",
        "##....##",
        ".######.",
    ]),
    ('9', [
        ".######.",
        "##....##",
        "##....##",
        "##....##",
        "##....##",
        "##....##",
        ".#######",
        "......##",
        "......##",
        "......##",
        ".....##.",
        ".#####..",
    ]),
    ('>', [
        "##......",
        ".##.....",
        "..##....",
        "...##...",
        "....##..",
        ".....###",
        ".....###",
        "....##..",
        "...##...",
        "..##....",
        ".##.....",
        "##......",
    ]),
];

/// Canonical bitmap for one recognizable symbol
#[derive(Debug, Clone)]
pub struct GlyphReference {
    pub symbol: char,
    pub bitmap: GrayImage,
}

/// Immutable symbol → bitmap mapping, iterated in ascending symbol order.
///
/// Never empty and every bitmap has the same size.
#[derive(Debug, Clone)]
pub struct GlyphSet {
    glyphs: Vec<GlyphReference>,
    width: u32,
    height: u32,
}

impl GlyphSet {
    /// Build a set, rejecting empty input, duplicate symbols and mixed sizes
    pub fn new(glyphs: impl IntoIterator<Item = GlyphReference>) -> Result<Self> {
        let mut by_symbol = BTreeMap::new();
        for glyph in glyphs {
            let symbol = glyph.symbol;
            if by_symbol.insert(symbol, glyph).is_some() {
                return Err(ScanError::DuplicateSymbol(symbol));
            }
        }

        let (width, height) = by_symbol
            .values()
            .next()
            .map(|g| g.bitmap.dimensions())
            .ok_or(ScanError::EmptyReferenceSet)?;

        if width == 0 || height == 0 {
            return Err(ScanError::EmptyReferenceSet);
        }

        for glyph in by_symbol.values() {
            let (w, h) = glyph.bitmap.dimensions();
            if (w, h) != (width, height) {
                return Err(ScanError::InconsistentGlyphSize {
                    symbol: glyph.symbol,
                    width: w,
                    height: h,
                    expected_width: width,
                    expected_height: height,
                });
            }
        }

        Ok(Self {
            glyphs: by_symbol.into_values().collect(),
            width,
            height,
        })
    }

    /// The embedded 16x24 set for `0-9`, `#` and `>`
    pub fn builtin() -> Self {
        let mut glyphs: Vec<GlyphReference> = BUILTIN_MASKS
            .iter()
            .map(|(symbol, mask)| GlyphReference {
                symbol: *symbol,
                bitmap: expand_mask(mask, BUILTIN_SCALE),
            })
            .collect();
        glyphs.sort_by_key(|g| g.symbol);

        Self {
            glyphs,
            width: MASK_WIDTH as u32 * BUILTIN_SCALE,
            height: MASK_HEIGHT as u32 * BUILTIN_SCALE,
        }
    }

    /// Load `char<code>*.png` files from a directory.
    ///
    /// The decimal code point after `char` names the symbol, so
    /// `char48_16x24.png` is the reference for `'0'`. Other files are ignored.
    pub fn load_dir(dir: &Path) -> Result<Self> {
        let mut glyphs = Vec::new();

        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            let Some(symbol) = symbol_from_file_name(name) else {
                continue;
            };

            let bitmap = image::open(&path)?.to_luma8();
            debug!(
                "Loaded glyph '{}' from {} ({}x{})",
                symbol,
                path.display(),
                bitmap.width(),
                bitmap.height()
            );
            glyphs.push(GlyphReference { symbol, bitmap });
        }

        Self::new(glyphs)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GlyphReference> {
        self.glyphs.iter()
    }

    pub fn symbols(&self) -> impl Iterator<Item = char> + '_ {
        self.glyphs.iter().map(|g| g.symbol)
    }

    pub fn get(&self, symbol: char) -> Option<&GrayImage> {
        self.glyphs
            .binary_search_by_key(&symbol, |g| g.symbol)
            .ok()
            .map(|i| &self.glyphs[i].bitmap)
    }

    /// Draw `text` on white paper, glyphs separated by `spacing` pixels with a
    /// `margin` on every side. Symbols without a glyph leave a blank cell.
    pub fn render_line(&self, text: &str, spacing: u32, margin: u32) -> GrayImage {
        let count = text.chars().count() as u32;
        let width = 2 * margin + count * self.width + count.saturating_sub(1) * spacing;
        let height = 2 * margin + self.height;
        let mut canvas = GrayImage::from_pixel(width, height, Luma([PAPER]));

        for (i, symbol) in text.chars().enumerate() {
            if let Some(bitmap) = self.get(symbol) {
                let x = margin + i as u32 * (self.width + spacing);
                image::imageops::replace(&mut canvas, bitmap, x.into(), margin.into());
            }
        }

        canvas
    }
}

fn expand_mask(mask: &[&str; MASK_HEIGHT], scale: u32) -> GrayImage {
    GrayImage::from_fn(MASK_WIDTH as u32 * scale, MASK_HEIGHT as u32 * scale, |x, y| {
        let row = mask[(y / scale) as usize].as_bytes();
        if row[(x / scale) as usize] == b'#' {
            Luma([INK])
        } else {
            Luma([PAPER])
        }
    })
}

fn symbol_from_file_name(name: &str) -> Option<char> {
    let lower = name.to_ascii_lowercase();
    if !lower.ends_with(".png") {
        return None;
    }
    let digits: String = lower
        .strip_prefix("char")?
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    char::from_u32(digits.parse().ok()?)
}
