use giroscan::{GlyphSet, Scanner};
use image::{DynamicImage, GrayImage, Luma};

pub const PAPER: u8 = 255;
pub const INK: u8 = 0;

/// Scanner with default settings and the built-in glyphs
pub fn builtin_scanner() -> Scanner {
    Scanner::with_builtin_glyphs()
}

/// A white image of the given size
pub fn blank(width: u32, height: u32) -> GrayImage {
    GrayImage::from_pixel(width, height, Luma([PAPER]))
}

/// White image with filled rectangles `(left, top, width, height)` of `value`
pub fn draw_rects(width: u32, height: u32, rects: &[(u32, u32, u32, u32)], value: u8) -> GrayImage {
    let mut img = blank(width, height);
    for &(left, top, w, h) in rects {
        for y in top..top + h {
            for x in left..left + w {
                img.put_pixel(x, y, Luma([value]));
            }
        }
    }
    img
}

/// Copy built-in glyphs for `text` onto a white canvas, one per x position
pub fn place_glyphs(width: u32, height: u32, text: &str, xs: &[u32], y: u32) -> GrayImage {
    assert_eq!(text.chars().count(), xs.len(), "one x position per symbol");

    let glyphs = GlyphSet::builtin();
    let mut canvas = blank(width, height);
    for (symbol, &x) in text.chars().zip(xs) {
        let bitmap = glyphs.get(symbol).expect("symbol in built-in set");
        image::imageops::replace(&mut canvas, bitmap, x.into(), y.into());
    }
    canvas
}

/// The 200x60 frame holding "1234" used by several tests
pub fn line_1234() -> GrayImage {
    place_glyphs(200, 60, "1234", &[20, 64, 108, 152], 18)
}

/// Replace pure ink and paper with camera-like gray levels
pub fn to_camera_levels(img: &GrayImage, ink: u8, paper: u8) -> GrayImage {
    GrayImage::from_fn(img.width(), img.height(), |x, y| {
        if img.get_pixel(x, y)[0] == INK {
            Luma([ink])
        } else {
            Luma([paper])
        }
    })
}

pub fn dynamic(img: GrayImage) -> DynamicImage {
    DynamicImage::ImageLuma8(img)
}
