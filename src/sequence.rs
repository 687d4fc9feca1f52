use std::fs;
use std::path::{Path, PathBuf};

use crate::error::SequenceError;

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "gif"];

/// Immutable frame list. Names are 1-indexed on disk, access is 0-indexed.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSequence {
    frames: Box<[PathBuf]>,
}

impl FrameSequence {
    /// Builds `dir/{prefix}{i:0width$}.{extension}` for `i` in `1..=count`.
    pub fn numbered(
        dir: impl AsRef<Path>,
        prefix: &str,
        width: usize,
        extension: &str,
        count: usize,
    ) -> Self {
        let dir = dir.as_ref();
        let frames = (1..=count)
            .map(|i| dir.join(format!("{prefix}{i:0width$}.{extension}")))
            .collect();
        Self { frames }
    }

    pub fn scan(dir: impl AsRef<Path>) -> Result<Self, SequenceError> {
        let dir = dir.as_ref();
        let entries = fs::read_dir(dir).map_err(|source| SequenceError::ReadDir {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| SequenceError::ReadDir {
                path: dir.to_path_buf(),
                source,
            })?;
            let path = entry.path();
            if path.is_file() && is_image(&path) {
                paths.push(path);
            }
        }

        if paths.is_empty() {
            return Err(SequenceError::Empty(dir.to_path_buf()));
        }
        paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        Ok(Self::from(paths))
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Path> {
        self.frames.get(index).map(PathBuf::as_path)
    }

    pub fn last_index(&self) -> Option<usize> {
        self.frames.len().checked_sub(1)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.frames.iter().map(PathBuf::as_path)
    }
}

impl From<Vec<PathBuf>> for FrameSequence {
    fn from(frames: Vec<PathBuf>) -> Self {
        Self {
            frames: frames.into_boxed_slice(),
        }
    }
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}
