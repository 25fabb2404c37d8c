//! Writing scan diagnostics to disk

use crate::models::ScanResult;
use anyhow::Result;
use image::DynamicImage;
use std::path::{Path, PathBuf};
use tracing::info;

/// Output directory for debug bitmaps
#[derive(Clone, Debug)]
pub struct DebugOutput {
    output_dir: PathBuf,
}

impl DebugOutput {
    /// Use `output_dir` for debug output.
    /// The directory must be empty or non-existent
    pub fn new(output_dir: PathBuf) -> Result<Self> {
        // Check if directory exists and is empty
        if output_dir.exists() {
            let entries = std::fs::read_dir(&output_dir)?;
            if entries.count() > 0 {
                return Err(anyhow::anyhow!(
                    "Debug directory is not empty: {}",
                    output_dir.display()
                ));
            }
        } else {
            std::fs::create_dir_all(&output_dir)?;
        }

        Ok(Self { output_dir })
    }

    pub fn dir(&self) -> &Path {
        &self.output_dir
    }

    /// Save one bitmap under `name` (a file name with extension)
    pub fn save(&self, name: &str, image: &DynamicImage) -> Result<()> {
        let path = self.output_dir.join(name);
        image
            .save(&path)
            .map_err(|e| anyhow::anyhow!("Failed to save debug image {}: {}", path.display(), e))?;
        info!("Debug: saved {}", name);
        Ok(())
    }

    /// Save the input frame, every diagnostic bitmap of `result` and the
    /// reference sheet. Returns the number of files written.
    pub fn save_scan(
        &self,
        input: &DynamicImage,
        result: &ScanResult,
        references: &image::GrayImage,
    ) -> Result<usize> {
        let mut written = 0;

        self.save("00_input.png", input)?;
        written += 1;

        if let Some(diag) = &result.diagnostics {
            self.save("01_normalized.png", &DynamicImage::ImageLuma8(diag.normalized.clone()))?;
            self.save("02_boxes.png", &DynamicImage::ImageRgb8(diag.boxes.clone()))?;
            written += 2;
            if let Some(sheet) = &diag.candidates {
                self.save("03_candidates.png", &DynamicImage::ImageLuma8(sheet.clone()))?;
                written += 1;
            }
        }

        self.save("04_references.png", &DynamicImage::ImageLuma8(references.clone()))?;
        written += 1;

        Ok(written)
    }
}
