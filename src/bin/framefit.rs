use std::{
    fs::File,
    io::{BufWriter, Write as _},
    path::PathBuf,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "framefit", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the scene schedule and playback plans as JSON.
    Plan(PlanArgs),
    /// Print one frame's render instructions as JSON.
    Frame(FrameArgs),
    /// Write render instructions for a frame range as JSON lines.
    Eval(EvalArgs),
}

#[derive(Parser, Debug)]
struct ManifestArgs {
    /// Input manifest JSON.
    #[arg(long)]
    manifest: PathBuf,

    /// Title subtitle JSON (shown over the intro).
    #[arg(long)]
    title_subs: Option<PathBuf>,

    /// Body subtitle JSON (shown over the scenes).
    #[arg(long)]
    body_subs: Option<PathBuf>,

    /// Override the crossfade length in frames.
    #[arg(long)]
    fade_frames: Option<u64>,

    /// Fade budget treatment on the last scene.
    #[arg(long, value_enum, default_value_t = FinalFadeChoice::Extend)]
    final_fade: FinalFadeChoice,

    /// Slow push-in on body scenes.
    #[arg(long, default_value_t = false)]
    zoom: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FinalFadeChoice {
    Extend,
    Clip,
}

#[derive(Parser, Debug)]
struct PlanArgs {
    #[command(flatten)]
    input: ManifestArgs,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    input: ManifestArgs,

    /// Frame index (0-based).
    #[arg(long)]
    frame: u64,
}

#[derive(Parser, Debug)]
struct EvalArgs {
    #[command(flatten)]
    input: ManifestArgs,

    /// First frame (inclusive).
    #[arg(long, default_value_t = 0)]
    start: u64,

    /// Last frame (exclusive); defaults to the composition duration.
    #[arg(long)]
    end: Option<u64>,

    /// Output JSON-lines path.
    #[arg(long)]
    out: PathBuf,

    /// Evaluate frames in parallel.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,

    /// Frames per evaluation chunk.
    #[arg(long, default_value_t = 64)]
    chunk_size: usize,
}

#[derive(serde::Serialize)]
struct PlanReport<'a> {
    duration_frames: u64,
    body_start: u64,
    fingerprint: String,
    timeline: &'a framefit::Timeline,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Plan(args) => cmd_plan(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Eval(args) => cmd_eval(args),
    }
}

fn load_timeline(args: &ManifestArgs) -> anyhow::Result<framefit::Timeline> {
    let mut config = framefit::TimelineConfig::default();
    config.final_fade = match args.final_fade {
        FinalFadeChoice::Extend => framefit::FinalFade::Extend,
        FinalFadeChoice::Clip => framefit::FinalFade::Clip,
    };
    if args.zoom {
        config.zoom = Some(framefit::ZoomConfig::default());
    }

    let def = framefit::ManifestDef::from_path(&args.manifest)
        .with_context(|| format!("load manifest '{}'", args.manifest.display()))?;
    let mut manifest = def.resolve(&config.playback)?;
    if let Some(path) = &args.title_subs {
        let cues = framefit::captions_from_path(path)
            .with_context(|| format!("load title subtitles '{}'", path.display()))?;
        manifest = manifest.with_title_captions(cues);
    }
    if let Some(path) = &args.body_subs {
        let cues = framefit::captions_from_path(path)
            .with_context(|| format!("load body subtitles '{}'", path.display()))?;
        manifest = manifest.with_body_captions(cues);
    }

    let mut config = config.with_manifest_overrides(&manifest);
    if let Some(fade) = args.fade_frames {
        config.fade.fade_duration_frames = fade;
    }
    Ok(framefit::Timeline::build(&manifest, &config))
}

fn cmd_plan(args: PlanArgs) -> anyhow::Result<()> {
    let timeline = load_timeline(&args.input)?;
    let report = PlanReport {
        duration_frames: timeline.duration_frames,
        body_start: timeline.body_start,
        fingerprint: framefit::fingerprint_schedule(&timeline.schedule).to_string(),
        timeline: &timeline,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let timeline = load_timeline(&args.input)?;
    if args.frame >= timeline.duration_frames {
        anyhow::bail!(
            "frame {} is outside the composition (duration {})",
            args.frame,
            timeline.duration_frames
        );
    }
    let frame = framefit::Evaluator::eval_frame(&timeline, framefit::FrameIndex(args.frame));
    println!("{}", serde_json::to_string_pretty(&frame)?);
    Ok(())
}

fn cmd_eval(args: EvalArgs) -> anyhow::Result<()> {
    let timeline = load_timeline(&args.input)?;
    let range = framefit::FrameRange::new(
        framefit::FrameIndex(args.start),
        framefit::FrameIndex(args.end.unwrap_or(timeline.duration_frames)),
    )?;
    let threading = framefit::EvalThreading {
        parallel: args.parallel,
        chunk_size: args.chunk_size,
        threads: args.threads,
    };

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    let file = File::create(&args.out)
        .with_context(|| format!("create output '{}'", args.out.display()))?;
    let mut w = BufWriter::new(file);

    let mut frames = 0u64;
    framefit::eval_range_chunked(&timeline, range, &threading, |chunk| {
        for f in &chunk {
            serde_json::to_writer(&mut w, f)
                .map_err(|e| framefit::FramefitError::serde(e.to_string()))?;
            w.write_all(b"\n")
                .map_err(|e| framefit::FramefitError::Other(e.into()))?;
        }
        frames += chunk.len() as u64;
        Ok(())
    })?;
    w.flush()
        .with_context(|| format!("flush output '{}'", args.out.display()))?;

    eprintln!("wrote {frames} frames to {}", args.out.display());
    Ok(())
}
