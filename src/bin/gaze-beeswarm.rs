use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use gaze_beeswarm::{
    BeeswarmConfig, BeeswarmJob, BeeswarmPipeline, DeploymentMode, FfmpegBackend, FrameIndex,
    LoadedData,
};

#[derive(Parser, Debug)]
#[command(name = "gaze-beeswarm", version, about = "Eye-tracking beeswarm overlay videos")]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// JSON config; unset fields keep their defaults.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Root directory holding one subdirectory per collection site.
    #[arg(long, global = true)]
    lab_data: Option<PathBuf>,

    /// Directory with `<stimulus>.mp4` source videos.
    #[arg(long, global = true)]
    media: Option<PathBuf>,

    /// Output directory for merged data and videos.
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    /// More log output (repeat for trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log warnings and errors.
    #[arg(long, global = true, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Merge site data and exclusion lists, then print a summary.
    Merge,
    /// Render beeswarm videos (requires `ffmpeg` and `ffprobe` on PATH).
    Render(RenderArgs),
    /// Overlay one frame of a stimulus video and save it as PNG.
    Snapshot(SnapshotArgs),
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Restrict to these stimuli (repeatable).
    #[arg(long = "stimulus")]
    stimuli: Vec<String>,

    /// Restrict to these participant groups (repeatable).
    #[arg(long = "group")]
    groups: Vec<String>,

    /// Which dispersion variants to render.
    #[arg(long, value_enum)]
    dispersion: Option<DispersionChoice>,
}

#[derive(Args, Debug)]
struct SnapshotArgs {
    /// Stimulus name.
    #[arg(long)]
    stimulus: String,

    /// Participant-group filter.
    #[arg(long, default_value = "")]
    group: String,

    /// Frame index (0-based).
    #[arg(long)]
    frame: u64,

    /// Draw the dispersion ellipse.
    #[arg(long)]
    dispersion: bool,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DispersionChoice {
    On,
    Off,
    Both,
}

impl DispersionChoice {
    fn flags(self) -> Vec<bool> {
        match self {
            Self::On => vec![true],
            Self::Off => vec![false],
            Self::Both => vec![true, false],
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.common);

    let cfg = load_config(&cli.common)?;
    match cli.cmd {
        Command::Merge => cmd_merge(&cfg),
        Command::Render(args) => cmd_render(cfg, args),
        Command::Snapshot(args) => cmd_snapshot(&cfg, args),
    }
}

fn init_tracing(common: &CommonArgs) {
    let default_level = if common.quiet {
        "warn"
    } else {
        match common.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(common: &CommonArgs) -> anyhow::Result<BeeswarmConfig> {
    let mut cfg = match &common.config {
        Some(path) => BeeswarmConfig::from_path(path)?,
        None => BeeswarmConfig::default(),
    };
    if let Some(dir) = &common.lab_data {
        cfg.lab_data_dir = dir.clone();
    }
    if let Some(dir) = &common.media {
        cfg.media_dir = dir.clone();
    }
    if let Some(dir) = &common.output {
        cfg.output_dir = dir.clone();
    }
    cfg.validate()?;
    Ok(cfg)
}

fn load_data(cfg: &BeeswarmConfig) -> anyhow::Result<LoadedData> {
    let loaded = gaze_beeswarm::load_gaze_data(cfg)?;
    match &loaded.mode {
        DeploymentMode::MultiSite {
            sites,
            merged_csv,
            merged_exclusions,
        } => {
            eprintln!(
                "merged {} site(s) into {} and {}",
                sites.len(),
                merged_csv.display(),
                merged_exclusions.display()
            );
        }
        DeploymentMode::SingleFile { csv } => {
            eprintln!("read pre-merged data from {}", csv.display());
        }
    }
    Ok(loaded)
}

fn cmd_merge(cfg: &BeeswarmConfig) -> anyhow::Result<()> {
    let loaded = load_data(cfg)?;
    println!("rows read:        {}", loaded.rows_read);
    println!("rows skipped:     {}", loaded.rows_skipped);
    println!("rows excluded:    {}", loaded.rows_excluded);
    println!("rows kept:        {}", loaded.dataset.len());
    println!("participants:     {}", loaded.dataset.participants().len());
    println!("exclusion ids:    {}", loaded.exclusions.len());
    Ok(())
}

fn cmd_render(mut cfg: BeeswarmConfig, args: RenderArgs) -> anyhow::Result<()> {
    if !args.stimuli.is_empty() {
        cfg.stimuli = args.stimuli;
    }
    if !args.groups.is_empty() {
        cfg.groups = args.groups;
    }
    if let Some(choice) = args.dispersion {
        cfg.dispersion = choice.flags();
    }
    cfg.validate()?;

    let loaded = load_data(&cfg)?;
    let backend = FfmpegBackend::from_config(&cfg);
    let reports = gaze_beeswarm::run_batch(&cfg, &loaded.dataset, &backend)?;
    for r in &reports {
        println!(
            "{}: {} frames ({} with gaze, {} markers)",
            r.output_path.display(),
            r.frames_written,
            r.frames_with_gaze,
            r.markers_drawn
        );
    }
    Ok(())
}

fn cmd_snapshot(cfg: &BeeswarmConfig, args: SnapshotArgs) -> anyhow::Result<()> {
    let loaded = load_data(cfg)?;
    let backend = FfmpegBackend::from_config(cfg);
    let pipeline = BeeswarmPipeline::new(cfg, &loaded.dataset, &backend);
    let job = BeeswarmJob::new(args.stimulus, args.group, args.dispersion);
    let (frame, marks) = pipeline.snapshot(&job, FrameIndex(args.frame))?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    image::save_buffer_with_format(
        &args.out,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!(
        "wrote {} ({} markers, centroid: {}, ellipse: {})",
        args.out.display(),
        marks.markers,
        marks.centroid,
        marks.ellipse
    );
    Ok(())
}
