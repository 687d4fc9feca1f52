use std::cell::RefCell;
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(u64);

pub type FrameCallback = Box<dyn FnOnce(f64)>;

pub trait PaintScheduler {
    fn request_frame(&self, callback: FrameCallback) -> FrameHandle;

    /// Drops a queued callback. Unknown or already-run handles are ignored.
    fn cancel_frame(&self, handle: FrameHandle);
}

#[derive(Default)]
struct Queue {
    next_id: u64,
    queued: VecDeque<(FrameHandle, FrameCallback)>,
    running: VecDeque<(FrameHandle, FrameCallback)>,
}

#[derive(Default)]
pub struct FrameQueue {
    queue: RefCell<Queue>,
}

impl FrameQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs every callback requested before this call, oldest first.
    /// Callbacks requested meanwhile wait for the next call. Returns how
    /// many ran.
    pub fn run_frame(&self, timestamp: f64) -> usize {
        {
            let mut queue = self.queue.borrow_mut();
            let batch = std::mem::take(&mut queue.queued);
            queue.running = batch;
        }

        let mut ran = 0;
        loop {
            // The borrow ends before the callback runs; it may reschedule.
            let next = self.queue.borrow_mut().running.pop_front();
            match next {
                Some((_, callback)) => {
                    callback(timestamp);
                    ran += 1;
                }
                None => break,
            }
        }
        ran
    }

    pub fn pending(&self) -> usize {
        self.queue.borrow().queued.len()
    }

    pub fn is_idle(&self) -> bool {
        self.pending() == 0
    }
}

impl PaintScheduler for FrameQueue {
    fn request_frame(&self, callback: FrameCallback) -> FrameHandle {
        let mut queue = self.queue.borrow_mut();
        let handle = FrameHandle(queue.next_id);
        queue.next_id += 1;
        queue.queued.push_back((handle, callback));
        handle
    }

    fn cancel_frame(&self, handle: FrameHandle) {
        let removed = {
            let mut queue = self.queue.borrow_mut();
            let queue = &mut *queue;
            take_handle(&mut queue.queued, handle).or_else(|| take_handle(&mut queue.running, handle))
        };
        // Dropped outside the borrow: the callback may own scheduler state.
        drop(removed);
    }
}

fn take_handle(
    entries: &mut VecDeque<(FrameHandle, FrameCallback)>,
    handle: FrameHandle,
) -> Option<FrameCallback> {
    let position = entries.iter().position(|(h, _)| *h == handle)?;
    entries.remove(position).map(|(_, callback)| callback)
}
