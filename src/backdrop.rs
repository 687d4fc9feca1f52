use raylib::prelude::*;

use crate::gate::FrameView;

/// Placement of a `texture_w` x `texture_h` image covering the whole
/// viewport, centered and cropped on the overflowing axis.
pub fn cover_rect(texture_w: f32, texture_h: f32, view_w: f32, view_h: f32) -> Rectangle {
    if texture_w <= 0.0 || texture_h <= 0.0 {
        return Rectangle::new(0.0, 0.0, view_w, view_h);
    }
    let scale = (view_w / texture_w).max(view_h / texture_h);
    let width = texture_w * scale;
    let height = texture_h * scale;
    Rectangle::new((view_w - width) * 0.5, (view_h - height) * 0.5, width, height)
}

/// Draws the current frame behind everything else. Nothing is drawn for a
/// hidden or broken frame, leaving the cleared background.
pub fn draw(d: &mut RaylibDrawHandle, view: &FrameView<'_, Texture2D>) {
    let Some(texture) = view.image else {
        return;
    };
    let opacity = view.opacity();
    if opacity <= 0.0 {
        return;
    }

    let screen_width = d.get_screen_width() as f32;
    let screen_height = d.get_screen_height() as f32;
    let tex_width = texture.width() as f32;
    let tex_height = texture.height() as f32;

    d.draw_texture_pro(
        texture,
        Rectangle::new(0.0, 0.0, tex_width, tex_height),
        cover_rect(tex_width, tex_height, screen_width, screen_height),
        Vector2::new(0.0, 0.0),
        0.0,
        Color::new(255, 255, 255, (opacity * 255.0).round() as u8),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wider_image_is_cropped_horizontally() {
        let r = cover_rect(2000.0, 1000.0, 1000.0, 1000.0);
        assert_eq!((r.x, r.y, r.width, r.height), (-500.0, 0.0, 2000.0, 1000.0));
    }

    #[test]
    fn taller_image_is_cropped_vertically() {
        let r = cover_rect(1280.0, 720.0, 720.0, 720.0 * 2.0);
        assert_eq!(r.height, 1440.0);
        assert_eq!(r.width, 2560.0);
        assert_eq!(r.x, (720.0 - 2560.0) / 2.0);
        assert_eq!(r.y, 0.0);
    }

    #[test]
    fn matching_aspect_fills_exactly() {
        let r = cover_rect(640.0, 360.0, 1280.0, 720.0);
        assert_eq!((r.x, r.y, r.width, r.height), (0.0, 0.0, 1280.0, 720.0));
    }

    #[test]
    fn degenerate_texture_falls_back_to_the_viewport() {
        let r = cover_rect(0.0, 10.0, 300.0, 200.0);
        assert_eq!((r.x, r.y, r.width, r.height), (0.0, 0.0, 300.0, 200.0));
    }
}
