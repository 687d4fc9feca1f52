use std::cell::RefCell;
use std::rc::Rc;

pub trait ProgressSource {
    fn subscribe(&self, listener: Box<dyn FnMut(f64)>) -> Subscription;
}

#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    unsubscribe: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(unsubscribe: impl FnOnce() + 'static) -> Self {
        Self {
            unsubscribe: Some(Box::new(unsubscribe)),
        }
    }

    pub fn unsubscribe(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.unsubscribe.is_some())
            .finish()
    }
}

type Listener = Rc<RefCell<Box<dyn FnMut(f64)>>>;

struct Inner {
    value: f64,
    next_id: u64,
    listeners: Vec<(u64, Listener)>,
}

/// Single-threaded observable progress value. Clones share the same value.
#[derive(Clone)]
pub struct ScrollProgress {
    inner: Rc<RefCell<Inner>>,
}

impl ScrollProgress {
    pub fn new(value: f64) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                value,
                next_id: 0,
                listeners: Vec::new(),
            })),
        }
    }

    pub fn get(&self) -> f64 {
        self.inner.borrow().value
    }

    /// Stores `value` and notifies listeners if it differs from the
    /// current one. A listener may call `set` again; that nested value is
    /// stored and sent to the others but not back to the listener that is
    /// still running.
    pub fn set(&self, value: f64) {
        let snapshot: Vec<(u64, Listener)> = {
            let mut inner = self.inner.borrow_mut();
            if inner.value == value {
                return;
            }
            inner.value = value;
            inner.listeners.clone()
        };

        for (id, listener) in snapshot {
            // A listener may have been removed by an earlier one.
            if !self.is_subscribed(id) {
                continue;
            }
            let Ok(mut callback) = listener.try_borrow_mut() else {
                continue;
            };
            (*callback)(value);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    fn is_subscribed(&self, id: u64) -> bool {
        self.inner
            .borrow()
            .listeners
            .iter()
            .any(|(listener_id, _)| *listener_id == id)
    }
}

impl Default for ScrollProgress {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl ProgressSource for ScrollProgress {
    fn subscribe(&self, listener: Box<dyn FnMut(f64)>) -> Subscription {
        let id = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_id;
            inner.next_id += 1;
            inner.listeners.push((id, Rc::new(RefCell::new(listener))));
            id
        };

        let weak = Rc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner
                    .borrow_mut()
                    .listeners
                    .retain(|(listener_id, _)| *listener_id != id);
            }
        })
    }
}

// progress = offset / (document_height - viewport_height)
pub struct ScrollTracker {
    document_height: f64,
    viewport_height: f64,
    offset: f64,
    target: f64,
    smoothing: f64,
    progress: ScrollProgress,
}

impl ScrollTracker {
    pub fn new(document_height: f64, viewport_height: f64) -> Self {
        Self {
            document_height: document_height.max(0.0),
            viewport_height: viewport_height.max(0.0),
            offset: 0.0,
            target: 0.0,
            smoothing: 0.0,
            progress: ScrollProgress::default(),
        }
    }

    /// Fraction of the remaining distance kept per 1/60 s. 0 snaps to the
    /// target immediately.
    pub fn with_smoothing(mut self, smoothing: f64) -> Self {
        self.smoothing = smoothing.clamp(0.0, 0.99);
        self
    }

    pub fn progress(&self) -> &ScrollProgress {
        &self.progress
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn max_offset(&self) -> f64 {
        (self.document_height - self.viewport_height).max(0.0)
    }

    pub fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    pub fn scroll_by(&mut self, delta: f64) {
        self.scroll_to(self.target + delta);
    }

    pub fn scroll_to(&mut self, offset: f64) {
        self.target = offset.clamp(0.0, self.max_offset());
        if self.smoothing == 0.0 {
            self.move_to(self.target);
        }
    }

    pub fn set_viewport(&mut self, viewport_height: f64) {
        self.viewport_height = viewport_height.max(0.0);
        self.target = self.target.clamp(0.0, self.max_offset());
        self.move_to(self.offset.clamp(0.0, self.max_offset()));
    }

    pub fn tick(&mut self, dt: f64) {
        if self.offset == self.target {
            return;
        }
        let keep = self.smoothing.powf(dt * 60.0);
        let mut next = self.target + (self.offset - self.target) * keep;
        if (next - self.target).abs() < 0.5 {
            next = self.target;
        }
        self.move_to(next);
    }

    fn move_to(&mut self, offset: f64) {
        self.offset = offset;
        let max = self.max_offset();
        let progress = if max > 0.0 { offset / max } else { 0.0 };
        self.progress.set(progress);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorder(source: &ScrollProgress) -> (Rc<RefCell<Vec<f64>>>, Subscription) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let sub = source.subscribe(Box::new(move |p| sink.borrow_mut().push(p)));
        (seen, sub)
    }

    #[test]
    fn set_notifies_only_on_change() {
        let progress = ScrollProgress::default();
        let (seen, _sub) = recorder(&progress);

        progress.set(0.0);
        progress.set(0.25);
        progress.set(0.25);
        progress.set(0.5);

        assert_eq!(*seen.borrow(), vec![0.25, 0.5]);
        assert_eq!(progress.get(), 0.5);
    }

    #[test]
    fn unsubscribe_and_drop_remove_the_listener() {
        let progress = ScrollProgress::default();
        let (seen, sub) = recorder(&progress);
        let (_other_seen, other) = recorder(&progress);
        assert_eq!(progress.listener_count(), 2);

        sub.unsubscribe();
        drop(other);
        assert_eq!(progress.listener_count(), 0);

        progress.set(1.0);
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn listener_removed_mid_notification_is_skipped() {
        let progress = ScrollProgress::default();
        let victim: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));

        let slot = victim.clone();
        let _killer = progress.subscribe(Box::new(move |_| {
            slot.borrow_mut().take();
        }));
        let (seen, sub) = recorder(&progress);
        *victim.borrow_mut() = Some(sub);

        progress.set(0.3);
        assert!(seen.borrow().is_empty());
        assert_eq!(progress.listener_count(), 1);
    }

    #[test]
    fn listener_setting_the_source_again_does_not_panic() {
        let progress = ScrollProgress::default();
        let calls = Rc::new(RefCell::new(0));

        let source = progress.clone();
        let counter = calls.clone();
        let reentrant = progress.subscribe(Box::new(move |p| {
            *counter.borrow_mut() += 1;
            if p < 0.5 {
                source.set(0.9);
            }
        }));
        let (seen, _sub) = recorder(&progress);

        progress.set(0.2);

        assert_eq!(progress.get(), 0.9);
        assert_eq!(*calls.borrow(), 1);
        assert!(seen.borrow().contains(&0.9));

        // Breaks the source <-> listener cycle.
        reentrant.unsubscribe();
        assert_eq!(progress.listener_count(), 1);
    }

    #[test]
    fn subscription_outliving_the_source_is_harmless() {
        let progress = ScrollProgress::default();
        let (_seen, sub) = recorder(&progress);
        drop(progress);
        sub.unsubscribe();
    }

    #[test]
    fn tracker_maps_offset_to_progress() {
        let mut tracker = ScrollTracker::new(1000.0, 200.0);
        tracker.scroll_by(400.0);
        assert_eq!(tracker.progress().get(), 0.5);

        tracker.scroll_by(10_000.0);
        assert_eq!(tracker.offset(), 800.0);
        assert_eq!(tracker.progress().get(), 1.0);

        tracker.scroll_to(-50.0);
        assert_eq!(tracker.progress().get(), 0.0);
    }

    #[test]
    fn tracker_without_scrollable_range_stays_at_zero() {
        let mut tracker = ScrollTracker::new(300.0, 600.0);
        tracker.scroll_by(100.0);
        assert_eq!(tracker.offset(), 0.0);
        assert_eq!(tracker.progress().get(), 0.0);
    }

    #[test]
    fn resizing_the_viewport_reclamps_the_offset() {
        let mut tracker = ScrollTracker::new(1000.0, 200.0);
        tracker.scroll_to(800.0);
        tracker.set_viewport(600.0);
        assert_eq!(tracker.offset(), 400.0);
        assert_eq!(tracker.progress().get(), 1.0);
    }

    #[test]
    fn smoothing_eases_toward_the_target() {
        let mut tracker = ScrollTracker::new(1100.0, 100.0).with_smoothing(0.5);
        tracker.scroll_by(1000.0);
        assert_eq!(tracker.offset(), 0.0);

        tracker.tick(1.0 / 60.0);
        assert!((tracker.offset() - 500.0).abs() < 1e-9);
        assert!((tracker.progress().get() - 0.5).abs() < 1e-9);

        for _ in 0..20 {
            tracker.tick(1.0 / 60.0);
        }
        assert_eq!(tracker.offset(), 1000.0);
        assert_eq!(tracker.progress().get(), 1.0);
    }
}
