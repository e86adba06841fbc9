//! Interactive spinning-cube demo
//!
//! Renders the cube through the software rasterizer every frame and blits
//! the RGB565 framebuffer to the window. Runtime toggles:
//! - T: texturing on/off
//! - G: Gouraud modulation on/off
//! - Z: depth test on/off
//! - F: nearest/bilinear filter

use macroquad::prelude::*;

use rastly::rasterizer::{Rgb565, TexFilter, Texture as RasterTexture};
use rastly::scene::{cube_frame, cube_mvp};
use rastly::{RenderBackend, SoftwareBackend, VERSION};

const FB_WIDTH: usize = 256;
const FB_HEIGHT: usize = 256;

fn window_conf() -> Conf {
    Conf {
        window_title: format!("Rastly v{}", VERSION),
        window_width: FB_WIDTH as i32 * 3,
        window_height: FB_HEIGHT as i32 * 3,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let mut backend = match SoftwareBackend::new(FB_WIDTH, FB_HEIGHT) {
        Ok(backend) => backend,
        Err(err) => {
            eprintln!("failed to create framebuffer: {err}");
            return;
        }
    };

    let checker = RasterTexture::checkerboard(
        64,
        8,
        Rgb565::WHITE,
        Rgb565::from_rgb8(0x84, 0x82, 0x84),
    );
    let upload = checker.and_then(|tex| backend.upload_texture(tex));
    if let Err(err) = upload {
        eprintln!("failed to upload texture: {err}");
        return;
    }

    let mut texturing = true;
    let mut modulation = true;
    let mut depth_test = true;
    let mut filter = TexFilter::Bilinear;
    let mut angle: f32 = 0.0;

    loop {
        if is_key_pressed(KeyCode::T) {
            texturing = !texturing;
            backend.set_texturing(texturing);
        }
        if is_key_pressed(KeyCode::G) {
            modulation = !modulation;
            backend.set_modulation(modulation);
        }
        if is_key_pressed(KeyCode::Z) {
            depth_test = !depth_test;
            backend.set_depth_test(depth_test);
        }
        if is_key_pressed(KeyCode::F) {
            filter = match filter {
                TexFilter::Nearest => TexFilter::Bilinear,
                TexFilter::Bilinear => TexFilter::Nearest,
            };
            backend.set_tex_filter(filter);
        }

        angle += get_frame_time();

        backend.clear(Rgb565::BLACK, 1.0);
        backend.reset_stats();
        let mvp = cube_mvp(angle, FB_WIDTH as f32 / FB_HEIGHT as f32);
        backend.draw_triangles(&cube_frame(&mvp, FB_WIDTH, FB_HEIGHT));

        // Blit the software framebuffer to the window, scaled to fit
        let rgba = backend.framebuffer().to_rgba8();
        let texture = Texture2D::from_rgba8(FB_WIDTH as u16, FB_HEIGHT as u16, &rgba);
        texture.set_filter(FilterMode::Nearest);

        clear_background(BLACK);
        let scale = (screen_width() / FB_WIDTH as f32).min(screen_height() / FB_HEIGHT as f32);
        let draw_w = FB_WIDTH as f32 * scale;
        let draw_h = FB_HEIGHT as f32 * scale;
        draw_texture_ex(
            &texture,
            (screen_width() - draw_w) * 0.5,
            (screen_height() - draw_h) * 0.5,
            WHITE,
            DrawTextureParams {
                dest_size: Some(Vec2::new(draw_w, draw_h)),
                ..Default::default()
            },
        );

        let stats = backend.stats();
        draw_text(
            &format!(
                "tris {}/{} culled | px {} drawn, {} rejected | T:{} G:{} Z:{} F:{:?}",
                stats.triangles_culled,
                stats.triangles_submitted,
                stats.pixels_drawn,
                stats.pixels_rejected,
                texturing as u8,
                modulation as u8,
                depth_test as u8,
                filter,
            ),
            10.0,
            20.0,
            18.0,
            WHITE,
        );

        next_frame().await
    }
}
