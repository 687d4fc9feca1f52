//! Scroll-scrubbed playback of a fixed image sequence.

pub mod animator;
pub mod backdrop;
pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod gate;
pub mod overlay;
pub mod preloader;
pub mod progress;
pub mod scheduler;
pub mod sequence;
pub mod state;
pub mod texture_loader;

pub use animator::{ScrollFrameAnimator, frame_index};
pub use gate::{FrameView, compose};
pub use preloader::{FramePreloader, LoadCompletion, LoadState, ResourceLoader};
pub use progress::{ProgressSource, ScrollProgress, ScrollTracker, Subscription};
pub use scheduler::{FrameHandle, FrameQueue, PaintScheduler};
pub use sequence::FrameSequence;
pub use state::LoadPhase;
