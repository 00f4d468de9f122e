use std::path::PathBuf;

use anyhow::{Context, Result};
use argh::FromArgs;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use trails::color::{ColorSpec, Hsv};
use trails::config::Config;
use trails::render::{self, Renderer, Viewport};
use trails::sim::Simulation;

/// Bouncing-agent trail renderer: agents fan out from the canvas center,
/// reflect off a fixed field of circles and leave fading particle trails,
/// one PNG per frame.
#[derive(FromArgs)]
struct Args {
    /// JSON config file; CLI flags below override its fields
    #[argh(option)]
    config: Option<PathBuf>,

    /// canvas width in pixels
    #[argh(option)]
    width: Option<u32>,

    /// canvas height in pixels
    #[argh(option)]
    height: Option<u32>,

    /// simulation time step
    #[argh(option)]
    dt: Option<f64>,

    /// number of agents
    #[argh(option)]
    agents: Option<usize>,

    /// number of frames to render
    #[argh(option, default = "1000")]
    frames: u64,

    /// output directory for PNG frames
    #[argh(option, default = "PathBuf::from(\"frames\")")]
    out: PathBuf,

    /// draw the obstacle field
    #[argh(switch)]
    show_obstacles: bool,

    /// disable reflection off the canvas border
    #[argh(switch)]
    no_border_reflect: bool,

    /// color agents along the stock hue gradient instead of a single color
    #[argh(switch)]
    gradient: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args: Args = argh::from_env();
    let config = build_config(&args)?;

    info!(
        width = config.width,
        height = config.height,
        agents = config.agent_count,
        obstacles = config.obstacles.len(),
        frames = args.frames,
        "starting render"
    );

    std::fs::create_dir_all(&args.out)
        .with_context(|| format!("failed to create output directory {}", args.out.display()))?;

    let mut sim = Simulation::new(&config)?;
    let renderer = Renderer::new(Viewport::new(config.width, config.height));

    let pbar = ProgressBar::new(args.frames);
    pbar.set_style(ProgressStyle::with_template(
        "[{elapsed_precise}/{eta_precise}] {bar:40.cyan/blue} {pos:>7}/{len:7} {msg}",
    )?);

    for _ in 0..args.frames {
        let snapshot = sim.frame_step();
        let path = render::frame_path(&args.out, snapshot.frame);
        renderer
            .render(&snapshot)
            .save(&path)
            .with_context(|| format!("failed to save {}", path.display()))?;
        pbar.inc(1);
    }
    pbar.finish();

    info!(frames = sim.frame(), "render complete");
    Ok(())
}

fn build_config(args: &Args) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }
    if let Some(dt) = args.dt {
        config.dt = dt;
    }
    if let Some(agents) = args.agents {
        config.agent_count = agents;
    }
    if args.show_obstacles {
        config.circles_visible = true;
    }
    if args.no_border_reflect {
        config.border_reflect = false;
    }
    if args.gradient {
        config.color = ColorSpec::Gradient(Hsv::new(0.0, 0.8, 0.9), Hsv::new(1.0, 0.8, 0.9));
    }

    config.validate()?;
    Ok(config)
}
