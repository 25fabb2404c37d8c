#![allow(dead_code, unused_imports)]

mod fixtures;
pub use fixtures::*;

// Re-export commonly used types from giroscan for tests
pub use giroscan::{BoundingBox, GlyphSet, ScanError, ScanResult, Scanner, ScannerConfig};
