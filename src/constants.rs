pub const WINDOW_WIDTH: i32 = 1280;           // Default window width
pub const WINDOW_HEIGHT: i32 = 720;           // Default window height (also the scroll viewport)
pub const FPS: u32 = 60;                      // Frames per second

pub const TOTAL_FRAMES: usize = 240;          // Length of the background sequence
pub const FRAMES_DIR: &str = "ezgif-59835d4e34a6e4b3-jpg";
pub const FRAME_PREFIX: &str = "ezgif-frame-";
pub const FRAME_PAD: usize = 3;               // ezgif-frame-001.jpg
pub const FRAME_EXTENSION: &str = "jpg";

pub const SCROLL_LENGTH: f64 = 4800.0;        // Virtual document height in pixels
pub const WHEEL_STEP: f64 = 120.0;            // Pixels per mouse wheel notch
pub const LINE_STEP: f64 = 40.0;              // Pixels per arrow key press

pub const LOADS_PER_TICK: usize = 8;          // Textures uploaded per UI tick while preloading
pub const MAX_TEXTURE_WIDTH: i32 = 1280;      // Frames wider than this are downscaled

pub const SPINNER_PERIOD: f64 = 1.0;          // Seconds per loader revolution
pub const OVERLAY_ALPHA: f32 = 0.55;          // Darkening at the bottom of the background overlay
