//! Run-length segmentation of a normalized frame into character cells
//!
//! Columns holding enough ink form column runs; within each column run the
//! rows holding enough ink form row runs. The tallest row run of a column run
//! gives that run's bounding box, which is then checked against the
//! configured size limits.

use crate::config::ScannerConfig;
use crate::detection::preprocessing::is_dark;
use crate::models::BoundingBox;
use image::GrayImage;
use std::ops::Range;
use tracing::{debug, trace};

/// Find character candidates in a normalized frame, left to right.
///
/// Returns an empty list when the frame has fewer column runs than the
/// configured minimum result length.
pub fn segment(img: &GrayImage, config: &ScannerConfig) -> Vec<BoundingBox> {
    let seg = &config.segmentation;
    let threshold = config.normalization.dark_threshold;
    let (width, height) = img.dimensions();

    let columns = find_runs((0..width).map(|x| {
        let ink = (0..height)
            .filter(|&y| is_dark(img.get_pixel(x, y)[0], threshold))
            .count();
        ink as u32 >= seg.min_dark_per_column
    }));

    debug!("Found {} column runs", columns.len());

    if columns.len() < seg.min_result_length {
        return Vec::new();
    }

    let limits = SizeLimits::new(config, width, height);
    let mut boxes = Vec::new();

    for cols in columns {
        let rows = find_runs((0..height).map(|y| {
            let ink = cols
                .clone()
                .filter(|&x| is_dark(img.get_pixel(x, y)[0], threshold))
                .count();
            ink as u32 >= seg.min_dark_per_row
        }));

        // Tallest row run wins, first on ties
        let Some(best) = rows.iter().fold(None::<&Range<u32>>, |best, run| match best {
            Some(b) if b.len() >= run.len() => Some(b),
            _ => Some(run),
        }) else {
            continue;
        };

        let bbox = BoundingBox::new(cols.start, best.start, cols.end, best.end);
        if limits.accepts(&bbox) {
            boxes.push(bbox);
        } else {
            trace!(
                "Rejected {}x{} region at ({}, {})",
                bbox.width(),
                bbox.height(),
                bbox.left,
                bbox.top
            );
        }
    }

    debug!("Accepted {} character candidates", boxes.len());
    boxes
}

/// Maximal runs of `true` in a profile, as half-open index ranges
pub fn find_runs(profile: impl IntoIterator<Item = bool>) -> Vec<Range<u32>> {
    let mut runs = Vec::new();
    let mut start = None;
    let mut index = 0u32;

    for full in profile {
        match (full, start) {
            (true, None) => start = Some(index),
            (false, Some(s)) => {
                runs.push(s..index);
                start = None;
            }
            _ => {}
        }
        index += 1;
    }

    if let Some(s) = start {
        runs.push(s..index);
    }

    runs
}

/// Pixel size limits derived from the configured fractions
struct SizeLimits {
    min_width: f32,
    max_width: f32,
    min_height: f32,
    max_height: f32,
    portrait: bool,
}

impl SizeLimits {
    fn new(config: &ScannerConfig, width: u32, height: u32) -> Self {
        let seg = &config.segmentation;
        Self {
            min_width: width as f32 * seg.char_min_width_fraction,
            max_width: width as f32 * seg.char_max_width_fraction,
            min_height: height as f32 * seg.char_min_height_fraction,
            max_height: height as f32 * seg.char_max_height_fraction,
            portrait: seg.char_always_portrait,
        }
    }

    fn accepts(&self, bbox: &BoundingBox) -> bool {
        let w = bbox.width() as f32;
        let h = bbox.height() as f32;
        w >= self.min_width
            && w <= self.max_width
            && h >= self.min_height
            && h <= self.max_height
            && (!self.portrait || bbox.is_portrait())
    }
}
