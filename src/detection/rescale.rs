use crate::config::NormalizationConfig;
use crate::detection::preprocessing::normalize;
use crate::models::{BoundingBox, Candidate};
use image::GrayImage;
use image::imageops::{self, FilterType};

/// Crop `bbox` out of the source frame and resize it to the target size.
///
/// `source` must be the unnormalized frame. When `contrast` is given the
/// resized bitmap is normalized afterwards.
///
/// Returns `None` if the box is empty once clipped to the frame.
pub fn rescale(
    source: &GrayImage,
    bbox: &BoundingBox,
    target_width: u32,
    target_height: u32,
    contrast: Option<&NormalizationConfig>,
) -> Option<GrayImage> {
    let clipped = bbox.clamp_to(source.width(), source.height());
    if clipped.is_empty() || target_width == 0 || target_height == 0 {
        return None;
    }

    let region = imageops::crop_imm(
        source,
        clipped.left,
        clipped.top,
        clipped.width(),
        clipped.height(),
    )
    .to_image();
    let resized = imageops::resize(&region, target_width, target_height, FilterType::Triangle);

    Some(match contrast {
        Some(norm) => normalize(&resized, norm.color_scale, norm.color_scale_translate),
        None => resized,
    })
}

/// Build a candidate holding both the plain and the contrasted bitmap
pub fn extract_candidate(
    source: &GrayImage,
    bbox: &BoundingBox,
    target_width: u32,
    target_height: u32,
    norm: &NormalizationConfig,
) -> Option<Candidate> {
    let rescaled = rescale(source, bbox, target_width, target_height, None)?;
    let contrasted = normalize(&rescaled, norm.color_scale, norm.color_scale_translate);
    Some(Candidate {
        bbox: *bbox,
        rescaled,
        contrasted,
    })
}
