//! Frame presentation: texture upload and stretched draw.

use image::RgbImage;
use macroquad::prelude::*;

/// Upload the frame to the window texture and draw it stretched to the
/// screen. Returns the frame-to-screen (x, y) scale so overlay
/// coordinates can follow.
///
/// The texture is reused between iterations while the frame size is stable.
pub fn blit(texture: &mut Option<Texture2D>, frame: &RgbImage) -> (f32, f32) {
    let (w, h) = frame.dimensions();

    let mut rgba = Vec::with_capacity((w * h * 4) as usize);
    for px in frame.pixels() {
        rgba.extend_from_slice(&[px[0], px[1], px[2], 255]);
    }

    let tex: &Texture2D = match texture {
        Some(t) if t.width() == w as f32 && t.height() == h as f32 => {
            t.update(&Image {
                bytes: rgba,
                width: w as u16,
                height: h as u16,
            });
            t
        }
        _ => {
            let t = Texture2D::from_rgba8(w as u16, h as u16, &rgba);
            t.set_filter(FilterMode::Linear);
            texture.insert(t)
        }
    };

    clear_background(BLACK);
    draw_texture_ex(
        tex,
        0.0,
        0.0,
        WHITE,
        DrawTextureParams {
            dest_size: Some(vec2(screen_width(), screen_height())),
            ..Default::default()
        },
    );

    (screen_width() / w as f32, screen_height() / h as f32)
}
