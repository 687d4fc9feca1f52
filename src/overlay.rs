use std::f64::consts::TAU;

use raylib::prelude::*;

use crate::constants::*;
use crate::gate::FrameView;

const ACCENT: Color = Color::new(0, 255, 157, 255);
const TEXT: Color = Color::new(230, 237, 243, 255);
const MUTED: Color = Color::new(139, 148, 158, 255);

const BRAND_GAP: i32 = 6;
const BADGE_TEXT_X: i32 = 30; // label offset from the badge's left edge
const BADGE_PADDING: i32 = 14;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HudInfo {
    pub frame: usize,
    pub total: usize,
    pub scroll: f64,
    pub failed: usize,
}

impl HudInfo {
    pub fn label(&self) -> String {
        let mut label = format!(
            "frame {:03}/{:03}  scroll {:5.1}%",
            self.frame + 1,
            self.total,
            self.scroll * 100.0
        );
        if self.failed > 0 {
            label.push_str(&format!("  {} missing", self.failed));
        }
        label
    }
}

pub fn draw<R>(d: &mut RaylibDrawHandle, view: &FrameView<'_, R>, time: f64, hud: Option<HudInfo>) {
    let width = d.get_screen_width();
    let height = d.get_screen_height();

    // Background overlay: keeps the foreground text readable over bright frames
    let bottom = Color::new(0, 0, 0, (OVERLAY_ALPHA * 255.0) as u8);
    d.draw_rectangle_gradient_v(0, 0, width, height, Color::new(0, 0, 0, 40), bottom);

    draw_brand(d);
    draw_status_badge(d, height);

    if !view.ready {
        draw_loading(d, width, height, view.load_fraction(), time);
    }

    if let Some(hud) = hud {
        let label = hud.label();
        let x = right_aligned(width, d.measure_text(&label, 16), 20);
        d.draw_text(&label, x, height - 32, 16, MUTED);
    }
}

fn draw_brand(d: &mut RaylibDrawHandle) {
    let (open_x, word_x, close_x) =
        brand_positions(24, d.measure_text("[", 28), d.measure_text("DCIM", 28), BRAND_GAP);
    d.draw_text("[", open_x, 20, 28, ACCENT);
    d.draw_text("DCIM", word_x, 20, 28, TEXT);
    d.draw_text("]", close_x, 20, 28, ACCENT);
}

fn draw_status_badge(d: &mut RaylibDrawHandle, height: i32) {
    let label = "SYSTEM OPERATIONAL";
    let y = height - 48;
    let w = badge_width(d.measure_text(label, 14));
    d.draw_rectangle_lines(24, y, w, 28, ACCENT);
    d.draw_circle(40, y + 14, 4.0, ACCENT);
    d.draw_text(label, 24 + BADGE_TEXT_X, y + 7, 14, ACCENT);
}

fn draw_loading(d: &mut RaylibDrawHandle, width: i32, height: i32, fraction: f64, time: f64) {
    let center = Vector2::new(width as f32 * 0.5, height as f32 * 0.5 - 20.0);
    let start = spinner_angle(time);
    d.draw_ring(center, 18.0, 22.0, 0.0, 360.0, 48, Color::new(0, 255, 157, 40));
    d.draw_ring(center, 18.0, 22.0, start, start + 90.0, 24, ACCENT);

    let label = "Loading experience...";
    let x = centered(width, d.measure_text(label, 20));
    d.draw_text(label, x, center.y as i32 + 40, 20, TEXT);

    let percent = format!("{:.0}%", fraction * 100.0);
    let x = centered(width, d.measure_text(&percent, 16));
    d.draw_text(&percent, x, center.y as i32 + 68, 16, MUTED);
}

// Start angle in degrees of the spinner arc at `time` seconds
pub fn spinner_angle(time: f64) -> f32 {
    let turns = (time / SPINNER_PERIOD).rem_euclid(1.0);
    (turns * TAU).to_degrees() as f32
}

// --- Layout from measured text widths ---

pub fn centered(container: i32, content: i32) -> i32 {
    (container - content) / 2
}

pub fn right_aligned(container: i32, content: i32, margin: i32) -> i32 {
    container - content - margin
}

// x of "[", "DCIM" and "]", the same gap on both sides of the word
pub fn brand_positions(x: i32, bracket_w: i32, word_w: i32, gap: i32) -> (i32, i32, i32) {
    let word_x = x + bracket_w + gap;
    (x, word_x, word_x + word_w + gap)
}

// Dot and its padding on the left, text padding on the right
pub fn badge_width(label_w: i32) -> i32 {
    BADGE_TEXT_X + label_w + BADGE_PADDING
}
