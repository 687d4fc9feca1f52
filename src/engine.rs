use std::rc::Rc;

use log::info;
use raylib::prelude::*;

use crate::animator::ScrollFrameAnimator;
use crate::backdrop;
use crate::config::PlayerConfig;
use crate::constants::*;
use crate::gate::{self, FrameView};
use crate::overlay::{self, HudInfo};
use crate::preloader::FramePreloader;
use crate::progress::ScrollTracker;
use crate::scheduler::FrameQueue;
use crate::sequence::FrameSequence;
use crate::texture_loader::TextureLoader;

/// One mounted page: frames, scroll, scheduler and animator, wired
/// source → animator → gate. Dropping it detaches the animator.
pub struct ScrubEngine {
    animator: ScrollFrameAnimator,
    queue: Rc<FrameQueue>,
    tracker: ScrollTracker,
    preloader: FramePreloader<Texture2D>,
    loader: TextureLoader,
    sequence: FrameSequence,
    wheel_step: f64,
    hud: bool,
}

impl ScrubEngine {
    pub fn new(sequence: FrameSequence, config: &PlayerConfig) -> Self {
        let tracker = ScrollTracker::new(config.scroll_length, config.height as f64)
            .with_smoothing(config.smoothing);
        let queue = Rc::new(FrameQueue::new());
        let animator = ScrollFrameAnimator::attach(tracker.progress(), queue.clone(), sequence.len());

        let mut loader = TextureLoader::new(config.per_tick, config.max_width);
        let mut preloader = FramePreloader::new(sequence.len());
        preloader.start(&sequence, &mut loader);

        Self {
            animator,
            queue,
            tracker,
            preloader,
            loader,
            sequence,
            wheel_step: config.wheel_step,
            hud: config.hud,
        }
    }

    /// Runs one UI tick: input, scrolling, loading, then the paint
    /// callbacks queued since the previous tick.
    pub fn update(&mut self, rl: &mut RaylibHandle, thread: &RaylibThread) {
        if rl.is_window_resized() {
            let height = rl.get_screen_height() as f64;
            info!("Viewport resized to {height}px");
            self.tracker.set_viewport(height);
        }
        self.handle_input(rl);
        self.tracker.tick(rl.get_frame_time() as f64);

        if self.loader.queued() > 0 {
            let completions = self.loader.poll(rl, thread);
            self.preloader.resolve_all(completions);
        }

        self.queue.run_frame(rl.get_time() * 1000.0);
    }

    fn handle_input(&mut self, rl: &RaylibHandle) {
        let wheel = rl.get_mouse_wheel_move() as f64;
        if wheel != 0.0 {
            // Wheel up reports positive values
            self.tracker.scroll_by(-wheel * self.wheel_step);
        }

        let page = self.tracker.viewport_height() * 0.9;
        if rl.is_key_pressed(KeyboardKey::KEY_DOWN) {
            self.tracker.scroll_by(LINE_STEP);
        }
        if rl.is_key_pressed(KeyboardKey::KEY_UP) {
            self.tracker.scroll_by(-LINE_STEP);
        }
        if rl.is_key_pressed(KeyboardKey::KEY_PAGE_DOWN) || rl.is_key_pressed(KeyboardKey::KEY_SPACE) {
            self.tracker.scroll_by(page);
        }
        if rl.is_key_pressed(KeyboardKey::KEY_PAGE_UP) {
            self.tracker.scroll_by(-page);
        }
        if rl.is_key_pressed(KeyboardKey::KEY_HOME) {
            self.tracker.scroll_to(0.0);
        }
        if rl.is_key_pressed(KeyboardKey::KEY_END) {
            self.tracker.scroll_to(self.tracker.max_offset());
        }
    }

    pub fn view(&self) -> FrameView<'_, Texture2D> {
        gate::compose(&self.sequence, &self.preloader, self.animator.current_frame())
    }

    pub fn draw(&self, d: &mut RaylibDrawHandle, time: f64) {
        let view = self.view();
        d.clear_background(Color::BLACK);
        backdrop::draw(d, &view);

        let hud = self.hud.then(|| HudInfo {
            frame: view.index,
            total: self.sequence.len(),
            scroll: self.tracker.progress().get(),
            failed: self.preloader.failed_count(),
        });
        overlay::draw(d, &view, time, hud);
    }

    pub fn is_ready(&self) -> bool {
        self.preloader.is_ready()
    }
}
