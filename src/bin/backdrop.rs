use std::path::PathBuf;

use anyhow::Context as _;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "backdrop", version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Render a numbered PNG sequence into a directory.
    Sequence(SequenceArgs),
    /// Print the effective configuration as JSON.
    Config(SceneArgs),
}

#[derive(Parser, Debug)]
struct SceneArgs {
    /// Input config JSON. Flags below override its fields.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Animation variant.
    #[arg(long, value_enum)]
    variant: Option<VariantChoice>,

    /// Color theme.
    #[arg(long, value_enum)]
    theme: Option<ThemeChoice>,

    /// Logical width in pixels.
    #[arg(long)]
    width: Option<f64>,

    /// Logical height in pixels.
    #[arg(long)]
    height: Option<f64>,

    /// Device pixel ratio.
    #[arg(long)]
    dpr: Option<f64>,

    /// Refresh rate of the simulated display.
    #[arg(long)]
    fps: Option<u32>,

    /// Seed for variant layout randomness.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Frame index (0-based). Earlier frames are simulated for their trails.
    #[arg(long, default_value_t = 0)]
    frame: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Keep alpha instead of flattening onto the theme page background.
    #[arg(long, default_value_t = false)]
    transparent: bool,
}

#[derive(Parser, Debug)]
struct SequenceArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Number of frames (defaults to the config's `frames`).
    #[arg(long)]
    frames: Option<u64>,

    /// Output directory; files are named `frame_00000.png`, ...
    #[arg(long)]
    out_dir: PathBuf,

    /// Pace frames against the wall clock instead of simulated time.
    #[arg(long, default_value_t = false)]
    realtime: bool,

    /// Keep alpha instead of flattening onto the theme page background.
    #[arg(long, default_value_t = false)]
    transparent: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum VariantChoice {
    Aurora,
    Waves,
    Particles,
}

impl From<VariantChoice> for backdrop::Variant {
    fn from(v: VariantChoice) -> Self {
        match v {
            VariantChoice::Aurora => backdrop::Variant::Aurora,
            VariantChoice::Waves => backdrop::Variant::Waves,
            VariantChoice::Particles => backdrop::Variant::Particles,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ThemeChoice {
    Dark,
    Light,
}

impl From<ThemeChoice> for backdrop::Theme {
    fn from(t: ThemeChoice) -> Self {
        match t {
            ThemeChoice::Dark => backdrop::Theme::Dark,
            ThemeChoice::Light => backdrop::Theme::Light,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = match cli.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Sequence(args) => cmd_sequence(args),
        Command::Config(args) => cmd_config(args),
    }
}

fn load_config(args: &SceneArgs) -> anyhow::Result<backdrop::BackdropConfig> {
    let mut cfg = match &args.config {
        Some(path) => backdrop::BackdropConfig::from_path(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => backdrop::BackdropConfig::default(),
    };
    if let Some(v) = args.variant {
        cfg.variant = v.into();
    }
    if let Some(t) = args.theme {
        cfg.theme = t.into();
    }
    if let Some(w) = args.width {
        cfg.viewport.width = w;
    }
    if let Some(h) = args.height {
        cfg.viewport.height = h;
    }
    if let Some(dpr) = args.dpr {
        cfg.viewport.device_pixel_ratio = dpr;
    }
    if let Some(fps) = args.fps {
        cfg.fps = backdrop::Fps::new(fps, 1)?;
    }
    if let Some(seed) = args.seed {
        cfg.seed = seed;
    }
    cfg.validate()?;
    Ok(cfg)
}

fn finish(
    frame: &backdrop::FrameRGBA,
    theme: backdrop::Theme,
    transparent: bool,
) -> backdrop::FrameRGBA {
    if transparent {
        frame.to_straight()
    } else {
        frame.flatten_onto(theme.page_background())
    }
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.scene)?;
    let frame = backdrop::render_frame(&cfg, backdrop::FrameIndex(args.frame))?;
    finish(&frame, cfg.theme, args.transparent)
        .save_png(&args.out)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_sequence(args: SequenceArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.scene)?;
    let frames = args.frames.unwrap_or(cfg.frames);
    let range = backdrop::FrameRange::new(backdrop::FrameIndex(0), backdrop::FrameIndex(frames))?;

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;

    let out_dir = args.out_dir.clone();
    let mut sink = |idx: backdrop::FrameIndex, frame: &backdrop::FrameRGBA| {
        let path = out_dir.join(format!("frame_{:05}.png", idx.0));
        finish(frame, cfg.theme, args.transparent).save_png(&path)
    };
    let stats = if args.realtime {
        backdrop::render_frames_realtime(&cfg, range, &mut sink)?
    } else {
        backdrop::render_frames(&cfg, range, &mut sink)?
    };

    eprintln!(
        "wrote {} frames to {}",
        stats.frames_emitted,
        args.out_dir.display()
    );
    Ok(())
}

fn cmd_config(args: SceneArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args)?;
    println!("{}", cfg.to_json_pretty()?);
    Ok(())
}
