use crate::error::{Result, ScanError};
use image::{DynamicImage, GrayImage, ImageBuffer, Luma, Rgb, Rgba};

/// Layout of a raw camera buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// One luminance byte per pixel (e.g. the Y plane of a YUV preview frame)
    Luma8,
    Rgb8,
    Rgba8,
}

impl PixelFormat {
    pub fn channels(self) -> usize {
        match self {
            PixelFormat::Luma8 => 1,
            PixelFormat::Rgb8 => 3,
            PixelFormat::Rgba8 => 4,
        }
    }
}

/// Wrap a raw row-major pixel buffer as an image
pub fn image_from_raw(
    data: Vec<u8>,
    width: u32,
    height: u32,
    format: PixelFormat,
) -> Result<DynamicImage> {
    let expected = width as usize * height as usize * format.channels();
    let actual = data.len();
    let mismatch = || ScanError::InvalidBuffer { expected, actual };

    if actual != expected {
        return Err(mismatch());
    }

    let img = match format {
        PixelFormat::Luma8 => DynamicImage::ImageLuma8(
            ImageBuffer::<Luma<u8>, _>::from_raw(width, height, data).ok_or_else(mismatch)?,
        ),
        PixelFormat::Rgb8 => DynamicImage::ImageRgb8(
            ImageBuffer::<Rgb<u8>, _>::from_raw(width, height, data).ok_or_else(mismatch)?,
        ),
        PixelFormat::Rgba8 => DynamicImage::ImageRgba8(
            ImageBuffer::<Rgba<u8>, _>::from_raw(width, height, data).ok_or_else(mismatch)?,
        ),
    };
    Ok(img)
}

/// Convert image to grayscale
pub fn to_grayscale(img: &DynamicImage) -> GrayImage {
    img.to_luma8()
}

/// Brightness/contrast remap that pushes pixels toward black or white.
///
/// Stage one multiplies every value by `brightness + 1`. Stage two multiplies
/// by `contrast + 1` and translates by `(0.5 - 0.5 * (contrast + 1)) * 255`,
/// which keeps mid-gray fixed. Each stage rounds and clamps to `0..=255`.
/// With both amounts at zero the image is returned unchanged.
pub fn normalize(img: &GrayImage, brightness: f32, contrast: f32) -> GrayImage {
    let scale1 = brightness + 1.0;
    let scale2 = contrast + 1.0;
    let translate = (-0.5 * scale2 + 0.5) * 255.0;

    let mut out = GrayImage::new(img.width(), img.height());
    for (src, dst) in img.pixels().zip(out.pixels_mut()) {
        let v = clamp_channel(src[0] as f32 * scale1);
        let v = clamp_channel(v as f32 * scale2 + translate);
        *dst = Luma([v]);
    }
    out
}

fn clamp_channel(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

/// Ink test shared by the segmenter and classifier
#[inline]
pub fn is_dark(value: u8, dark_threshold: u8) -> bool {
    value <= dark_threshold
}
