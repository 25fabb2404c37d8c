pub mod config;
pub mod debug;
pub mod detection;
pub mod error;
pub mod models;

pub use config::{MatchingConfig, NormalizationConfig, ScannerConfig, SegmentationConfig};
pub use detection::Scanner;
pub use detection::diagnostics::Diagnostics;
pub use detection::glyphs::{GlyphReference, GlyphSet};
pub use detection::preprocessing::PixelFormat;
pub use error::{Result, ScanError};
pub use models::{BoundingBox, Candidate, CharacterMatch, ScanResult};
