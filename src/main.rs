//! # Marea CLI
//!
//! Render liquid-fill gauges to PNG from the command line.
//!
//! ## Usage
//!
//! ```bash
//! # Render a single frame
//! marea render --progress 65 --out gauge.png
//!
//! # Orange bordered circle with a percentage label
//! marea render --wave-color "#FF9000" --border-width 8 --title-center "65%"
//!
//! # Labels in a host-supplied font instead of the built-in bitmap one
//! marea render --title-center "65%" --font DejaVuSans.ttf
//!
//! # A south-pointing triangle from a JSON scene
//! marea render --config scene.json --out scene.png
//!
//! # 90 frames of animation at 30 fps
//! marea animate --frames 90 --fps 30 --out-dir frames/
//!
//! # List shape names
//! marea shapes
//! ```

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

use marea::{
    Canvas, MareaError,
    config::{GaugeConfig, LabelConfig},
};

/// Marea - Liquid-fill gauge renderer
#[derive(Parser, Debug)]
#[command(name = "marea")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render a single frame to a PNG file
    Render {
        #[command(flatten)]
        scene: SceneArgs,

        /// Output PNG path
        #[arg(long, default_value = "gauge.png")]
        out: PathBuf,
    },

    /// Render an animation as a numbered PNG sequence
    Animate {
        #[command(flatten)]
        scene: SceneArgs,

        /// Number of frames to render
        #[arg(long, default_value = "60")]
        frames: u32,

        /// Frames per second of the simulated clock
        #[arg(long, default_value = "30")]
        fps: u32,

        /// Output directory for frame_NNNN.png files
        #[arg(long, default_value = "frames")]
        out_dir: PathBuf,
    },

    /// List available shape names
    Shapes,
}

/// Scene flags shared by `render` and `animate`. Unset flags fall back
/// to the config file (if given) and then to the library defaults.
#[derive(Args, Debug)]
struct SceneArgs {
    /// JSON scene file to start from (flags override its values)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Surface width and height in pixels [default: 500]
    #[arg(long)]
    size: Option<u32>,

    /// Shape: circle, square, rectangle, triangle [default: circle]
    #[arg(long)]
    shape: Option<String>,

    /// Triangle direction: north, south, east, west [default: north]
    #[arg(long)]
    direction: Option<String>,

    /// Round the rectangle's corners
    #[arg(long)]
    rounded: bool,

    /// Corner radius for rounded rectangles [default: 30]
    #[arg(long)]
    corner_radius: Option<f32>,

    /// Progress percentage, 0-100 [default: 50]
    #[arg(long)]
    progress: Option<u32>,

    /// Wave amplitude as a fraction of height, 0-0.1 [default: 0.05]
    #[arg(long)]
    amplitude: Option<f32>,

    /// Wave color as a hex string [default: #212121]
    #[arg(long, value_name = "COLOR")]
    wave_color: Option<String>,

    /// Background color behind the wave [default: transparent]
    #[arg(long, value_name = "COLOR")]
    background_color: Option<String>,

    /// Border width in pixels [default: 0]
    #[arg(long)]
    border_width: Option<f32>,

    /// Border color [default: #212121]
    #[arg(long, value_name = "COLOR")]
    border_color: Option<String>,

    /// Top label text
    #[arg(long, value_name = "TEXT")]
    title_top: Option<String>,

    /// Center label text
    #[arg(long, value_name = "TEXT")]
    title_center: Option<String>,

    /// Bottom label text
    #[arg(long, value_name = "TEXT")]
    title_bottom: Option<String>,

    /// TTF/OTF font file for label text [default: built-in bitmap font]
    #[arg(long, value_name = "FILE")]
    font: Option<PathBuf>,
}

impl SceneArgs {
    fn into_config(self) -> Result<GaugeConfig, MareaError> {
        let mut config = match &self.config {
            Some(path) => GaugeConfig::from_json(&std::fs::read_to_string(path)?)?,
            None => GaugeConfig::default(),
        };
        if let Some(size) = self.size {
            config.width = size;
            config.height = size;
        }
        if let Some(shape) = self.shape {
            config.shape = shape;
        }
        if let Some(direction) = self.direction {
            config.direction = direction;
        }
        if self.rounded {
            config.rounded = true;
        }
        if let Some(radius) = self.corner_radius {
            config.corner_radius = radius;
        }
        if let Some(progress) = self.progress {
            config.progress = progress;
        }
        if let Some(amplitude) = self.amplitude {
            config.amplitude = amplitude;
        }
        if let Some(color) = &self.wave_color {
            config.wave_color = color.parse()?;
        }
        if let Some(color) = &self.background_color {
            config.wave_background_color = color.parse()?;
        }
        if let Some(width) = self.border_width {
            config.border_width = width;
        }
        if let Some(color) = &self.border_color {
            config.border_color = color.parse()?;
        }
        if let Some(text) = self.title_top {
            config.top_label = Some(LabelConfig::text(text));
        }
        if let Some(text) = self.title_center {
            config.center_label = Some(LabelConfig::text(text));
        }
        if let Some(text) = self.title_bottom {
            config.bottom_label = Some(LabelConfig::text(text));
        }
        if let Some(path) = self.font {
            config.font = Some(path);
        }
        Ok(config)
    }
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), MareaError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Render { scene, out } => {
            let config = scene.into_config()?;
            let (width, height) = (config.width, config.height);
            let progress = config.progress.min(100);
            let mut gauge = config.into_gauge()?;
            // A still frame shows the target level directly instead of
            // the start of the settle animation.
            gauge.set_fill_level_ratio(progress as f32 / 100.0);

            println!("Rendering {}x{} gauge...", width, height);
            let mut canvas = Canvas::new(width, height);
            gauge.render(&mut canvas);
            std::fs::write(&out, canvas.to_png()?)?;
            println!("Saved to {}", out.display());
        }

        Commands::Animate {
            scene,
            frames,
            fps,
            out_dir,
        } => {
            let config = scene.into_config()?;
            let (width, height) = (config.width, config.height);
            let mut gauge = config.into_gauge()?;
            gauge.attach();

            let fps = fps.max(1);
            let dt = Duration::from_secs_f64(1.0 / f64::from(fps));
            std::fs::create_dir_all(&out_dir)?;

            println!(
                "Rendering {} frames at {} fps ({}x{})...",
                frames, fps, width, height
            );
            for frame in 0..frames {
                gauge.tick(dt);
                let mut canvas = Canvas::new(width, height);
                gauge.render(&mut canvas);
                let path = out_dir.join(format!("frame_{:04}.png", frame));
                std::fs::write(&path, canvas.to_png()?)?;
            }
            gauge.detach();
            println!("Saved {} frames to {}", frames, out_dir.display());
        }

        Commands::Shapes => {
            println!("Available shapes:");
            println!("  circle");
            println!("  square");
            println!("  rectangle    (--rounded for rounded corners)");
            println!("  triangle     (--direction north|south|east|west)");
        }
    }

    Ok(())
}
