use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "scrubreel", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load a frame directory and report what was found.
    Probe(SourceArgs),
    /// Render the frame selected by a scroll progress value as a PNG.
    Frame(FrameArgs),
    /// Simulate scrolling through the container and write every redraw as a PNG.
    Scroll(ScrollArgs),
}

#[derive(Args, Debug)]
struct SourceArgs {
    /// Directory holding frame-001.jpg, frame-002.jpg, ...
    #[arg(long)]
    frames: Option<PathBuf>,

    /// Player config JSON.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct ViewportArgs {
    /// Viewport width in pixels.
    #[arg(long, default_value_t = 1280)]
    width: u32,

    /// Viewport height in pixels.
    #[arg(long, default_value_t = 720)]
    height: u32,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    source: SourceArgs,

    #[command(flatten)]
    viewport: ViewportArgs,

    /// Scroll progress in [0, 1].
    #[arg(long)]
    progress: f64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct ScrollArgs {
    #[command(flatten)]
    source: SourceArgs,

    #[command(flatten)]
    viewport: ViewportArgs,

    /// Number of evenly spaced scroll positions from top to bottom.
    #[arg(long, default_value_t = 60)]
    steps: u32,

    /// Ticks per second used for scrub smoothing.
    #[arg(long, default_value_t = 30.0)]
    fps: f64,

    /// Override the configured scrub duration in seconds (0 disables smoothing).
    #[arg(long)]
    scrub: Option<f64>,

    /// Output directory for numbered PNGs.
    #[arg(long)]
    out_dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Probe(args) => cmd_probe(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Scroll(args) => cmd_scroll(args),
    }
}

fn load_config(args: &SourceArgs) -> anyhow::Result<scrubreel::PlayerConfig> {
    let mut cfg = match &args.config {
        Some(path) => scrubreel::PlayerConfig::from_json_path(path)?,
        None => scrubreel::PlayerConfig::default(),
    };
    if let Some(frames) = &args.frames {
        cfg.base_path = frames.clone();
    } else if args.config.is_none() {
        anyhow::bail!("either --frames or --config is required");
    }
    Ok(cfg)
}

fn viewport(args: &ViewportArgs) -> anyhow::Result<scrubreel::Viewport> {
    Ok(scrubreel::Viewport::new(args.width, args.height)?)
}

fn start_player(
    cfg: &scrubreel::PlayerConfig,
    viewport: scrubreel::Viewport,
) -> anyhow::Result<scrubreel::FrameSequencePlayer<scrubreel::CpuSurface>> {
    let source = scrubreel::DirFrameSource::new(&cfg.base_path);
    let surface = scrubreel::CpuSurface::new(scrubreel::CpuSurfaceOpts {
        clear_rgba: cfg.clear_rgba,
    });
    let container = scrubreel::Container::new(0.0, scrubreel::Length::Vh(100.0));
    let player =
        scrubreel::FrameSequencePlayer::start(container, cfg, &source, surface, viewport)?;
    if player.frames().is_empty() {
        anyhow::bail!(
            "no frames found in '{}' (expected {})",
            cfg.base_path.display(),
            cfg.pattern.file_name(0)
        );
    }
    Ok(player)
}

fn cmd_probe(args: SourceArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args)?;
    let source = scrubreel::DirFrameSource::new(&cfg.base_path);
    let seq = scrubreel::FrameSequence::load(&source, &cfg.pattern);

    println!("frames: {}", seq.len());
    if let Some(first) = seq.iter().next() {
        println!("size:   {}x{}", first.width, first.height);
        let mixed = seq
            .iter()
            .any(|f| f.width != first.width || f.height != first.height);
        if mixed {
            println!("note:   frame sizes differ; each is cover-fit on its own");
        }
    }
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    if !(0.0..=1.0).contains(&args.progress) {
        anyhow::bail!("--progress must be within [0, 1], got {}", args.progress);
    }
    let cfg = load_config(&args.source)?;
    let mut player = start_player(&cfg, viewport(&args.viewport)?)?;
    player.handle(scrubreel::PlayerEvent::Progress(args.progress))?;

    write_png(&player.surface().snapshot(), &args.out)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_scroll(args: ScrollArgs) -> anyhow::Result<()> {
    if args.steps < 2 {
        anyhow::bail!("--steps must be >= 2");
    }
    if !args.fps.is_finite() || args.fps <= 0.0 {
        anyhow::bail!("--fps must be > 0");
    }

    let mut cfg = load_config(&args.source)?;
    if let Some(s) = args.scrub {
        cfg.scrub = if s > 0.0 {
            scrubreel::Scrub::Seconds(s)
        } else {
            scrubreel::Scrub::Off
        };
    }
    cfg.validate()?;

    let vp = viewport(&args.viewport)?;
    let mut player = start_player(&cfg, vp)?;
    let region = scrubreel::TriggerRegion::for_container(player.container(), vp);

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;

    let dt = 1.0 / args.fps;
    let mut written = 0u32;
    let mut emit = |player: &scrubreel::FrameSequencePlayer<scrubreel::CpuSurface>| {
        written += 1;
        let path = args.out_dir.join(format!("scroll-{written:05}.png"));
        write_png(&player.surface().snapshot(), &path)
    };

    // The first image is the frame drawn by setup; after that only redraws are written.
    emit(&player)?;
    for step in 0..args.steps {
        let t = f64::from(step) / f64::from(args.steps - 1);
        let y = region.start + (region.end - region.start) * t;
        let scrolled = player.handle(scrubreel::PlayerEvent::Scroll(y))?;
        let ticked = player.handle(scrubreel::PlayerEvent::Tick(dt))?;
        if scrolled || ticked {
            emit(&player)?;
        }
    }

    // Let scrub smoothing land on the final position.
    let settle_limit = (args.fps * 10.0).ceil() as u32;
    for _ in 0..settle_limit {
        if player.trigger().is_none_or(|t| t.is_settled()) {
            break;
        }
        if player.handle(scrubreel::PlayerEvent::Tick(dt))? {
            emit(&player)?;
        }
    }

    tracing::info!(
        frames = player.frames().len(),
        written,
        "scroll simulation finished"
    );
    eprintln!("wrote {written} images to {}", args.out_dir.display());
    Ok(())
}

fn write_png(frame: &scrubreel::FrameRGBA, path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    image::save_buffer_with_format(
        path,
        &frame.to_straight_rgba8(),
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}
