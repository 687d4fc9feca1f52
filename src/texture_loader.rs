use std::collections::VecDeque;
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use exif::{In, Reader, Tag, Value};
use log::debug;
use raylib::prelude::*;

use crate::error::LoadError;
use crate::preloader::{LoadCompletion, ResourceLoader};

/// Loads frames into GPU textures from the UI loop, a few per tick.
/// Texture creation needs the raylib thread, so requests are queued and
/// worked off by [`TextureLoader::poll`] between paints.
pub struct TextureLoader {
    queue: VecDeque<(usize, PathBuf)>,
    per_tick: usize,
    max_width: i32,
}

impl TextureLoader {
    pub fn new(per_tick: usize, max_width: i32) -> Self {
        Self {
            queue: VecDeque::new(),
            per_tick: per_tick.max(1),
            max_width,
        }
    }

    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    // Oldest requests first, at most `per_tick` of them
    fn take_batch(&mut self) -> Vec<(usize, PathBuf)> {
        let count = self.per_tick.min(self.queue.len());
        self.queue.drain(..count).collect()
    }

    pub fn poll(
        &mut self,
        rl: &mut RaylibHandle,
        thread: &RaylibThread,
    ) -> Vec<LoadCompletion<Texture2D>> {
        let max_width = self.max_width;
        self.take_batch()
            .into_iter()
            .map(|(index, path)| LoadCompletion {
                index,
                result: load_frame_texture(rl, thread, &path, max_width),
            })
            .collect()
    }
}

impl ResourceLoader for TextureLoader {
    type Resource = Texture2D;

    fn request(&mut self, index: usize, path: &Path) {
        self.queue.push_back((index, path.to_path_buf()));
    }
}

// --- Load Image, Apply EXIF Rotation, Create Texture ---
pub fn load_frame_texture(
    rl: &mut RaylibHandle,
    thread: &RaylibThread,
    path: &Path,
    max_width: i32,
) -> Result<Texture2D, LoadError> {
    let image = decode_frame(path, max_width)?;
    rl.load_texture_from_image(thread, &image)
        .map_err(|e| LoadError::Upload {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
}

// Upright and at most `max_width` pixels wide
pub fn decode_frame(path: &Path, max_width: i32) -> Result<Image, LoadError> {
    let bytes = fs::read(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let extension = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_lowercase();

    // EXIF is only read reliably from JPEG
    let orientation = if extension == "jpg" || extension == "jpeg" {
        exif_orientation(&bytes).unwrap_or(1)
    } else {
        1
    };

    let mut image = Image::load_image_from_mem(&format!(".{extension}"), &bytes).map_err(|e| {
        LoadError::Decode {
            path: path.to_path_buf(),
            reason: e.to_string(),
        }
    })?;

    // 3 = 180°, 6 = 90° CW, 8 = 90° CCW. Flipped variants are ignored.
    match orientation {
        3 => {
            image.rotate_cw();
            image.rotate_cw();
        }
        6 => image.rotate_cw(),
        8 => image.rotate_ccw(),
        _ => {}
    }
    if orientation != 1 {
        debug!("Applied EXIF orientation {orientation} to {}", path.display());
    }

    if let Some((width, height)) = fit_width(image.width(), image.height(), max_width) {
        image.resize(width, height);
    }

    Ok(image)
}

pub fn exif_orientation(bytes: &[u8]) -> Option<u16> {
    let exif = match Reader::new().read_from_container(&mut Cursor::new(bytes)) {
        Ok(exif) => exif,
        Err(e) => {
            debug!("No EXIF data: {e}");
            return None;
        }
    };
    let field = exif.get_field(Tag::Orientation, In::PRIMARY)?;
    match &field.value {
        Value::Short(values) => values.first().copied(),
        _ => None,
    }
}

/// Downscaled size keeping the aspect ratio, `None` when it already fits.
pub fn fit_width(width: i32, height: i32, max_width: i32) -> Option<(i32, i32)> {
    if max_width <= 0 || width <= max_width || width <= 0 {
        return None;
    }
    let height = ((height as i64 * max_width as i64) / width as i64).max(1) as i32;
    Some((max_width, height))
}
