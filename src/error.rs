use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("frame count must be at least 1")]
    NoFrames,

    #[error("window size must be positive, got {width}x{height}")]
    WindowSize { width: i32, height: i32 },

    #[error("fps must be positive")]
    Fps,

    #[error("smoothing must be in [0, 1), got {0}")]
    Smoothing(f64),

    #[error("scroll length {length} must exceed the viewport height {viewport}")]
    ScrollLength { length: f64, viewport: f64 },

    #[error("{name} must be positive")]
    NonPositive { name: &'static str },
}

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SequenceError {
    #[error("failed to read directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no image files found in directory: {0}")]
    Empty(PathBuf),
}

// Counted as resolved by the preloader
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode {path}: {reason}")]
    Decode { path: PathBuf, reason: String },

    #[error("failed to create texture for {path}: {reason}")]
    Upload { path: PathBuf, reason: String },
}

impl LoadError {
    pub fn path(&self) -> &std::path::Path {
        match self {
            LoadError::Read { path, .. }
            | LoadError::Decode { path, .. }
            | LoadError::Upload { path, .. } => path,
        }
    }
}
