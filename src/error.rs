//! Error types for giroscan

use thiserror::Error;

/// Errors that can occur while building a scanner or scanning a frame
#[derive(Debug, Error)]
pub enum ScanError {
    /// Glyph set constructed without any reference glyphs
    #[error("reference glyph set is empty")]
    EmptyReferenceSet,

    /// A reference glyph does not share the size of the rest of the set
    #[error("glyph '{symbol}' is {width}x{height}, expected {expected_width}x{expected_height}")]
    InconsistentGlyphSize {
        symbol: char,
        width: u32,
        height: u32,
        expected_width: u32,
        expected_height: u32,
    },

    /// Two reference glyphs for the same symbol
    #[error("duplicate glyph for symbol '{0}'")]
    DuplicateSymbol(char),

    /// Candidate bitmap not scaled to the reference size
    #[error("candidate is {width}x{height}, reference glyphs are {expected_width}x{expected_height}")]
    DimensionMismatch {
        width: u32,
        height: u32,
        expected_width: u32,
        expected_height: u32,
    },

    /// Too few character candidates in the frame to form a result
    #[error("found {found} character candidates, need at least {required}")]
    InsufficientCandidates { found: usize, required: usize },

    /// Configuration value out of range
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Raw pixel buffer does not match the stated dimensions
    #[error("pixel buffer holds {actual} bytes, expected {expected}")]
    InvalidBuffer { expected: usize, actual: usize },

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("failed to serialize configuration: {0}")]
    ConfigWrite(#[from] toml::ser::Error),
}

/// Result type for scanner operations
pub type Result<T> = std::result::Result<T, ScanError>;
