use std::path::PathBuf;

use clap::Parser;

use crate::constants::*;
use crate::error::{ConfigError, SequenceError};
use crate::sequence::FrameSequence;

#[derive(Parser, Debug, Clone)]
#[command(name = "dcim-scrub", version, about = "Scroll-scrubbed frame sequence player")]
pub struct Args {
    /// Directory holding the frame images
    #[arg(default_value = FRAMES_DIR)]
    pub frames_dir: PathBuf,

    /// File name prefix before the frame number
    #[arg(long, default_value = FRAME_PREFIX)]
    pub prefix: String,

    /// Zero-padded width of the frame number
    #[arg(long, default_value_t = FRAME_PAD)]
    pub pad: usize,

    /// Frame file extension
    #[arg(long, default_value = FRAME_EXTENSION)]
    pub extension: String,

    /// Number of frames in the sequence
    #[arg(long, default_value_t = TOTAL_FRAMES)]
    pub count: usize,

    /// Use every image in the directory, sorted by name, instead of the numbered pattern
    #[arg(long)]
    pub scan: bool,

    #[arg(long, default_value_t = WINDOW_WIDTH)]
    pub width: i32,

    #[arg(long, default_value_t = WINDOW_HEIGHT)]
    pub height: i32,

    #[arg(long, default_value_t = FPS)]
    pub fps: u32,

    /// Height of the virtual document in pixels
    #[arg(long, default_value_t = SCROLL_LENGTH)]
    pub scroll_length: f64,

    /// Pixels scrolled per mouse wheel notch
    #[arg(long, default_value_t = WHEEL_STEP)]
    pub wheel_step: f64,

    /// Inertial scroll smoothing in [0, 1); 0 disables it
    #[arg(long, default_value_t = 0.0)]
    pub smoothing: f64,

    /// Frames uploaded per UI tick while preloading
    #[arg(long, default_value_t = LOADS_PER_TICK)]
    pub per_tick: usize,

    /// Downscale frames wider than this
    #[arg(long, default_value_t = MAX_TEXTURE_WIDTH)]
    pub max_width: i32,

    /// Show frame and scroll position
    #[arg(long)]
    pub hud: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FrameSource {
    Numbered {
        dir: PathBuf,
        prefix: String,
        pad: usize,
        extension: String,
        count: usize,
    },
    Scan(PathBuf),
}

impl FrameSource {
    pub fn build(&self) -> Result<FrameSequence, SequenceError> {
        match self {
            FrameSource::Numbered {
                dir,
                prefix,
                pad,
                extension,
                count,
            } => Ok(FrameSequence::numbered(dir, prefix, *pad, extension, *count)),
            FrameSource::Scan(dir) => FrameSequence::scan(dir),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerConfig {
    pub frames: FrameSource,
    pub width: i32,
    pub height: i32,
    pub fps: u32,
    pub scroll_length: f64,
    pub wheel_step: f64,
    pub smoothing: f64,
    pub per_tick: usize,
    pub max_width: i32,
    pub hud: bool,
}

impl Args {
    pub fn into_config(self) -> Result<PlayerConfig, ConfigError> {
        if !self.scan && self.count == 0 {
            return Err(ConfigError::NoFrames);
        }
        if self.width <= 0 || self.height <= 0 {
            return Err(ConfigError::WindowSize {
                width: self.width,
                height: self.height,
            });
        }
        if self.fps == 0 {
            return Err(ConfigError::Fps);
        }
        if !(0.0..1.0).contains(&self.smoothing) {
            return Err(ConfigError::Smoothing(self.smoothing));
        }
        if !(self.scroll_length > self.height as f64) {
            return Err(ConfigError::ScrollLength {
                length: self.scroll_length,
                viewport: self.height as f64,
            });
        }
        if !(self.wheel_step > 0.0) {
            return Err(ConfigError::NonPositive { name: "wheel-step" });
        }
        if self.per_tick == 0 {
            return Err(ConfigError::NonPositive { name: "per-tick" });
        }
        if self.max_width <= 0 {
            return Err(ConfigError::NonPositive { name: "max-width" });
        }

        let frames = if self.scan {
            FrameSource::Scan(self.frames_dir)
        } else {
            FrameSource::Numbered {
                dir: self.frames_dir,
                prefix: self.prefix,
                pad: self.pad,
                extension: self.extension,
                count: self.count,
            }
        };

        Ok(PlayerConfig {
            frames,
            width: self.width,
            height: self.height,
            fps: self.fps,
            scroll_length: self.scroll_length,
            wheel_step: self.wheel_step,
            smoothing: self.smoothing,
            per_tick: self.per_tick,
            max_width: self.max_width,
            hud: self.hud,
        })
    }
}
