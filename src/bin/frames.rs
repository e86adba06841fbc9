//! Headless animation renderer
//!
//! Renders the spinning-cube demo to numbered image files, one per frame.
//! Settings come from the command line, optionally seeded by a RON config.
//!
//! Usage: rastly-frames --frames 60 --out frames/ --format png

#[cfg(not(target_arch = "wasm32"))]
mod cli {
    use std::fs;
    use std::path::PathBuf;

    use anyhow::{Context, Result};
    use clap::{Parser, ValueEnum};
    use indicatif::{ProgressBar, ProgressStyle};

    use rastly::rasterizer::{Rgb565, Texture};
    use rastly::scene::{cube_frame, cube_mvp, DemoConfig};
    use rastly::{RenderBackend, SoftwareBackend};

    #[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
    enum ImageFormat {
        Png,
        Ppm,
    }

    #[derive(Parser, Debug)]
    #[command(name = "rastly-frames", about = "Render the cube demo to image files")]
    struct Args {
        /// RON config file; command-line flags override its values
        #[arg(long)]
        config: Option<PathBuf>,

        /// Number of frames in one full rotation
        #[arg(long)]
        frames: Option<usize>,

        /// Framebuffer width in pixels
        #[arg(long)]
        width: Option<usize>,

        /// Framebuffer height in pixels
        #[arg(long)]
        height: Option<usize>,

        /// Output directory
        #[arg(long, default_value = "frames")]
        out: PathBuf,

        /// Output image format
        #[arg(long, value_enum, default_value = "png")]
        format: ImageFormat,
    }

    fn load_config(args: &Args) -> Result<DemoConfig> {
        let mut config = match &args.config {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("reading config {}", path.display()))?;
                ron::from_str(&text)
                    .with_context(|| format!("parsing config {}", path.display()))?
            }
            None => DemoConfig::default(),
        };
        if let Some(frames) = args.frames {
            config.frames = frames;
        }
        if let Some(width) = args.width {
            config.width = width;
        }
        if let Some(height) = args.height {
            config.height = height;
        }
        Ok(config)
    }

    fn save_frame(
        path: &PathBuf,
        format: ImageFormat,
        fb: &rastly::Framebuffer,
    ) -> Result<()> {
        match format {
            ImageFormat::Png => {
                image::save_buffer(
                    path,
                    &fb.to_rgba8(),
                    fb.width as u32,
                    fb.height as u32,
                    image::ExtendedColorType::Rgba8,
                )?;
            }
            ImageFormat::Ppm => {
                // PPM carries no alpha channel
                let mut rgb = Vec::with_capacity(fb.width * fb.height * 3);
                for &pixel in fb.color_buffer() {
                    let (r, g, b) = pixel.to_rgb8();
                    rgb.extend_from_slice(&[r, g, b]);
                }
                image::save_buffer(
                    path,
                    &rgb,
                    fb.width as u32,
                    fb.height as u32,
                    image::ExtendedColorType::Rgb8,
                )?;
            }
        }
        Ok(())
    }

    pub fn run() -> Result<()> {
        env_logger::init();
        let args = Args::parse();
        let config = load_config(&args)?;

        log::info!(
            "rendering {} frames at {}x{}",
            config.frames,
            config.width,
            config.height
        );

        fs::create_dir_all(&args.out)
            .with_context(|| format!("creating output dir {}", args.out.display()))?;

        let mut backend = SoftwareBackend::new(config.width, config.height)?;
        let checker = Texture::checkerboard(
            config.texture_size,
            config.check_size,
            Rgb565::WHITE,
            Rgb565::from_rgb8(0x84, 0x82, 0x84),
        )?;
        backend.upload_texture(checker)?;
        backend.set_texturing(config.texturing);
        backend.set_modulation(config.modulation);
        backend.set_depth_test(config.depth_test);
        backend.set_tex_filter(config.tex_filter);

        let extension = match args.format {
            ImageFormat::Png => "png",
            ImageFormat::Ppm => "ppm",
        };
        let aspect = config.width as f32 / config.height as f32;

        let progress = ProgressBar::new(config.frames as u64).with_style(
            ProgressStyle::with_template("{bar:40} {pos}/{len} frames")?,
        );
        for frame in 0..config.frames {
            backend.clear(Rgb565::BLACK, 1.0);
            let angle = frame as f32 * (std::f32::consts::TAU / config.frames as f32);
            let mvp = cube_mvp(angle, aspect);
            backend.draw_triangles(&cube_frame(&mvp, config.width, config.height));

            let path = args.out.join(format!("frame_{frame:03}.{extension}"));
            save_frame(&path, args.format, backend.framebuffer())?;
            progress.inc(1);
        }
        progress.finish();

        let stats = backend.stats();
        log::info!(
            "done: {} triangles submitted, {} culled, {} pixels drawn",
            stats.triangles_submitted,
            stats.triangles_culled,
            stats.pixels_drawn
        );
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    cli::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {}
