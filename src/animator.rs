use std::cell::RefCell;
use std::rc::{Rc, Weak};

use log::trace;

use crate::progress::{ProgressSource, Subscription};
use crate::scheduler::{FrameHandle, PaintScheduler};

/// `min(floor(progress * total), total - 1)`, clamped into `[0, total - 1]`.
///
/// NaN and negative progress map to the first frame, anything at or past
/// the end (including +inf) to the last.
pub fn frame_index(progress: f64, total: usize) -> usize {
    let Some(last) = total.checked_sub(1) else {
        return 0;
    };
    if progress.is_nan() || progress <= 0.0 {
        return 0;
    }
    let scaled = (progress * total as f64).floor();
    if scaled >= last as f64 {
        last
    } else {
        scaled as usize
    }
}

struct AnimatorState {
    total: usize,
    current: usize,
    pending: Option<FrameHandle>,
    applied: u64,
}

impl AnimatorState {
    fn apply(&mut self, progress: f64) {
        self.pending = None;
        self.current = frame_index(progress, self.total);
        self.applied += 1;
        trace!("frame {} (progress {progress:.4})", self.current);
    }
}

pub struct ScrollFrameAnimator {
    state: Rc<RefCell<AnimatorState>>,
    scheduler: Rc<dyn PaintScheduler>,
    subscription: Option<Subscription>,
}

impl ScrollFrameAnimator {
    /// Subscribes to `source`. Every progress event replaces the pending
    /// update, so a burst within one paint window applies only its last
    /// value.
    pub fn attach(
        source: &dyn ProgressSource,
        scheduler: Rc<dyn PaintScheduler>,
        total: usize,
    ) -> Self {
        let state = Rc::new(RefCell::new(AnimatorState {
            total,
            current: 0,
            pending: None,
            applied: 0,
        }));

        let listener_state = Rc::downgrade(&state);
        let listener_scheduler = scheduler.clone();
        let subscription = source.subscribe(Box::new(move |progress| {
            schedule_update(&listener_state, listener_scheduler.as_ref(), progress);
        }));

        Self {
            state,
            scheduler,
            subscription: Some(subscription),
        }
    }

    pub fn current_frame(&self) -> usize {
        self.state.borrow().current
    }

    pub fn total_frames(&self) -> usize {
        self.state.borrow().total
    }

    pub fn has_pending_update(&self) -> bool {
        self.state.borrow().pending.is_some()
    }

    pub fn updates_applied(&self) -> u64 {
        self.state.borrow().applied
    }

    pub fn is_attached(&self) -> bool {
        self.subscription.is_some()
    }

    pub fn detach(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
        }
        let pending = self.state.borrow_mut().pending.take();
        if let Some(handle) = pending {
            self.scheduler.cancel_frame(handle);
        }
    }
}

impl Drop for ScrollFrameAnimator {
    fn drop(&mut self) {
        self.detach();
    }
}

fn schedule_update(
    state: &Weak<RefCell<AnimatorState>>,
    scheduler: &dyn PaintScheduler,
    progress: f64,
) {
    let Some(strong) = state.upgrade() else {
        return;
    };

    let previous = strong.borrow_mut().pending.take();
    if let Some(handle) = previous {
        scheduler.cancel_frame(handle);
    }

    let update_state = state.clone();
    let handle = scheduler.request_frame(Box::new(move |_| {
        if let Some(state) = update_state.upgrade() {
            state.borrow_mut().apply(progress);
        }
    }));
    strong.borrow_mut().pending = Some(handle);
}
