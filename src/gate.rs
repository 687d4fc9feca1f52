use std::path::Path;

use crate::preloader::FramePreloader;
use crate::sequence::FrameSequence;

#[derive(Debug)]
pub struct FrameView<'a, R> {
    pub ready: bool,
    pub index: usize,
    pub resource_id: Option<&'a Path>,
    pub image: Option<&'a R>,
    pub loaded: usize,
    pub total: usize,
}

impl<R> FrameView<'_, R> {
    pub fn opacity(&self) -> f32 {
        if self.ready { 1.0 } else { 0.0 }
    }

    /// Ready, but this particular frame never loaded.
    pub fn is_broken(&self) -> bool {
        self.ready && self.image.is_none()
    }

    pub fn load_fraction(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.loaded as f64 / self.total as f64
        }
    }
}

pub fn compose<'a, R>(
    sequence: &'a FrameSequence,
    preloader: &'a FramePreloader<R>,
    current_frame: usize,
) -> FrameView<'a, R> {
    let index = sequence
        .last_index()
        .map_or(0, |last| current_frame.min(last));
    let state = preloader.state();
    FrameView {
        ready: preloader.is_ready(),
        index,
        resource_id: sequence.get(index),
        image: preloader.resource(index),
        loaded: state.resolved(),
        total: state.total(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LoadError;
    use crate::preloader::LoadCompletion;

    fn sequence() -> FrameSequence {
        FrameSequence::numbered("f", "frame-", 3, "jpg", 3)
    }

    #[test]
    fn hidden_until_ready() {
        let seq = sequence();
        let mut preloader = FramePreloader::new(seq.len());
        preloader.resolve(LoadCompletion::loaded(0, 'a'));

        let view = compose(&seq, &preloader, 0);
        assert!(!view.ready);
        assert_eq!(view.opacity(), 0.0);
        assert_eq!(view.image, Some(&'a'));
        assert_eq!(view.loaded, 1);
        assert!((view.load_fraction() - 1.0 / 3.0).abs() < 1e-12);
        assert!(!view.is_broken());
    }

    #[test]
    fn ready_view_shows_the_current_frame() {
        let seq = sequence();
        let mut preloader = FramePreloader::new(seq.len());
        preloader.resolve_all(vec![
            LoadCompletion::loaded(0, 'a'),
            LoadCompletion::loaded(1, 'b'),
            LoadCompletion::failed(
                2,
                LoadError::Decode {
                    path: "f/frame-003.jpg".into(),
                    reason: "bad header".into(),
                },
            ),
        ]);

        let view = compose(&seq, &preloader, 1);
        assert_eq!(view.opacity(), 1.0);
        assert_eq!(view.image, Some(&'b'));
        assert_eq!(view.resource_id, Some(Path::new("f/frame-002.jpg")));

        let broken = compose(&seq, &preloader, 2);
        assert!(broken.is_broken());
    }

    #[test]
    fn index_is_clamped_to_the_sequence() {
        let seq = sequence();
        let preloader: FramePreloader<char> = FramePreloader::new(seq.len());
        let view = compose(&seq, &preloader, 99);
        assert_eq!(view.index, 2);
        assert_eq!(view.resource_id, Some(Path::new("f/frame-003.jpg")));
    }
}
