use std::path::Path;

use log::{debug, info, warn};

use crate::error::LoadError;
use crate::sequence::FrameSequence;
use crate::state::LoadPhase;

/// Starts loads. Results come back later as [`LoadCompletion`]s.
pub trait ResourceLoader {
    type Resource;

    fn request(&mut self, index: usize, path: &Path);
}

#[derive(Debug)]
pub struct LoadCompletion<R> {
    pub index: usize,
    pub result: Result<R, LoadError>,
}

impl<R> LoadCompletion<R> {
    pub fn loaded(index: usize, resource: R) -> Self {
        Self {
            index,
            result: Ok(resource),
        }
    }

    pub fn failed(index: usize, error: LoadError) -> Self {
        Self {
            index,
            result: Err(error),
        }
    }
}

/// Completion counter. `Ready` is reached once and never left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadState {
    total: usize,
    resolved: usize,
    failed: usize,
    phase: LoadPhase,
}

impl LoadState {
    pub fn new(total: usize) -> Self {
        let phase = if total == 0 {
            LoadPhase::Ready
        } else {
            LoadPhase::Loading
        };
        Self {
            total,
            resolved: 0,
            failed: 0,
            phase,
        }
    }

    /// Counts one resolution. Returns `Some(Ready)` on the transition only.
    pub fn record(&mut self, success: bool) -> Option<LoadPhase> {
        if self.phase == LoadPhase::Ready {
            return None;
        }
        self.resolved += 1;
        if !success {
            self.failed += 1;
        }
        if self.resolved == self.total {
            self.phase = LoadPhase::Ready;
            return Some(LoadPhase::Ready);
        }
        None
    }

    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    pub fn is_ready(&self) -> bool {
        self.phase == LoadPhase::Ready
    }

    pub fn resolved(&self) -> usize {
        self.resolved
    }

    pub fn failed(&self) -> usize {
        self.failed
    }

    pub fn total(&self) -> usize {
        self.total
    }

    // 1 for an empty sequence
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.resolved as f64 / self.total as f64
        }
    }
}

#[derive(Debug)]
enum Slot<R> {
    Pending,
    Loaded(R),
    Failed(LoadError),
}

#[derive(Debug)]
pub struct FramePreloader<R> {
    slots: Vec<Slot<R>>,
    state: LoadState,
    started: bool,
}

impl<R> FramePreloader<R> {
    pub fn new(total: usize) -> Self {
        Self {
            slots: (0..total).map(|_| Slot::Pending).collect(),
            state: LoadState::new(total),
            started: false,
        }
    }

    /// Requests every frame of `sequence` from `loader`. Only the first
    /// call does anything.
    pub fn start<L>(&mut self, sequence: &FrameSequence, loader: &mut L)
    where
        L: ResourceLoader<Resource = R>,
    {
        if self.started {
            return;
        }
        self.started = true;
        info!("Preloading {} frames", sequence.len());
        for (index, path) in sequence.iter().enumerate() {
            loader.request(index, path);
        }
    }

    /// Stores one completion. Failures count toward readiness too, so a
    /// broken frame cannot hold the page in its loading state. Returns
    /// `true` when this completion flipped the latch.
    pub fn resolve(&mut self, completion: LoadCompletion<R>) -> bool {
        let LoadCompletion { index, result } = completion;
        let Some(slot) = self.slots.get_mut(index) else {
            warn!("Ignoring completion for unknown frame {index}");
            return false;
        };
        if !matches!(slot, Slot::Pending) {
            warn!("Ignoring duplicate completion for frame {index}");
            return false;
        }

        let success = result.is_ok();
        *slot = match result {
            Ok(resource) => {
                debug!("Frame {index} loaded");
                Slot::Loaded(resource)
            }
            Err(e) => {
                warn!("Frame {index} failed to load: {e}");
                Slot::Failed(e)
            }
        };

        match self.state.record(success) {
            Some(LoadPhase::Ready) => {
                info!(
                    "All {} frames resolved ({} failed)",
                    self.state.total(),
                    self.state.failed()
                );
                true
            }
            _ => false,
        }
    }

    pub fn resolve_all(&mut self, completions: impl IntoIterator<Item = LoadCompletion<R>>) -> bool {
        let mut became_ready = false;
        for completion in completions {
            became_ready |= self.resolve(completion);
        }
        became_ready
    }

    pub fn is_ready(&self) -> bool {
        self.state.is_ready()
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn failed_count(&self) -> usize {
        self.state.failed()
    }

    pub fn resource(&self, index: usize) -> Option<&R> {
        match self.slots.get(index) {
            Some(Slot::Loaded(resource)) => Some(resource),
            _ => None,
        }
    }

    pub fn failure(&self, index: usize) -> Option<&LoadError> {
        match self.slots.get(index) {
            Some(Slot::Failed(error)) => Some(error),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[derive(Default)]
    struct RecordingLoader {
        requested: Vec<(usize, PathBuf)>,
    }

    impl ResourceLoader for RecordingLoader {
        type Resource = u32;

        fn request(&mut self, index: usize, path: &Path) {
            self.requested.push((index, path.to_path_buf()));
        }
    }

    fn broken(index: usize) -> LoadCompletion<u32> {
        LoadCompletion::failed(
            index,
            LoadError::Decode {
                path: PathBuf::from(format!("{index}.jpg")),
                reason: "truncated".into(),
            },
        )
    }

    #[test]
    fn latch_flips_once_at_total() {
        let mut state = LoadState::new(3);
        assert_eq!(state.record(true), None);
        assert_eq!(state.record(true), None);
        assert!(!state.is_ready());
        assert_eq!(state.record(true), Some(LoadPhase::Ready));
        assert!(state.is_ready());

        assert_eq!(state.record(true), None);
        assert_eq!(state.resolved(), 3);
        assert!(state.is_ready());
    }

    #[test]
    fn empty_state_starts_ready() {
        let state = LoadState::new(0);
        assert!(state.is_ready());
        assert_eq!(state.fraction(), 1.0);
    }

    #[test]
    fn start_requests_every_frame_once() {
        let seq = FrameSequence::numbered("f", "frame-", 3, "jpg", 4);
        let mut loader = RecordingLoader::default();
        let mut preloader = FramePreloader::new(seq.len());

        preloader.start(&seq, &mut loader);
        preloader.start(&seq, &mut loader);

        let indices: Vec<_> = loader.requested.iter().map(|(i, _)| *i).collect();
        assert_eq!(indices, [0, 1, 2, 3]);
        assert_eq!(loader.requested[3].1, PathBuf::from("f/frame-004.jpg"));
    }

    #[test]
    fn failures_count_toward_ready() {
        let mut preloader = FramePreloader::new(3);
        assert!(!preloader.resolve(LoadCompletion::loaded(2, 20)));
        assert!(!preloader.resolve(broken(0)));
        assert!(!preloader.is_ready());
        assert!(preloader.resolve(LoadCompletion::loaded(1, 10)));

        assert!(preloader.is_ready());
        assert_eq!(preloader.failed_count(), 1);
        assert_eq!(preloader.resource(0), None);
        assert!(preloader.failure(0).is_some());
        assert_eq!(preloader.resource(1), Some(&10));
        assert_eq!(preloader.resource(2), Some(&20));
    }

    #[test]
    fn duplicate_and_unknown_completions_are_ignored() {
        let mut preloader = FramePreloader::new(2);
        preloader.resolve(LoadCompletion::loaded(0, 1));
        assert!(!preloader.resolve(LoadCompletion::loaded(0, 99)));
        assert!(!preloader.resolve(broken(0)));
        assert!(!preloader.resolve(LoadCompletion::loaded(7, 7)));

        assert_eq!(preloader.state().resolved(), 1);
        assert_eq!(preloader.resource(0), Some(&1));
        assert!(!preloader.is_ready());
    }

    #[test]
    fn resolve_all_reports_the_transition() {
        let mut preloader = FramePreloader::new(2);
        let ready = preloader.resolve_all(vec![LoadCompletion::loaded(1, 1), broken(0)]);
        assert!(ready);
        assert!(!preloader.resolve_all(Vec::new()));
        assert_eq!(preloader.state().fraction(), 1.0);
    }
}
