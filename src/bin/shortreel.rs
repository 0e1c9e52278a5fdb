use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::prelude::*;

use shortreel::{
    FfmpegEngine, Pipeline, PipelineConfig, RunRequest, ScriptMode, Seed, Workspace,
    captions::srt, visual::compose,
};

#[derive(Parser, Debug)]
#[command(name = "shortreel", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the full pipeline into a working directory (requires `ffmpeg` and `ffprobe` on PATH).
    Render(RenderArgs),
    /// Print the generated script as JSON.
    Script(ScriptArgs),
    /// Allocate captions for a text file over a known duration and emit SRT.
    Captions(CaptionsArgs),
    /// Print the serialized visual filter graph.
    Filter(FilterArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Working directory for intermediates and final artifacts.
    #[arg(long)]
    workdir: PathBuf,

    /// Pipeline config JSON. Defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Overrides the configured script mode.
    #[arg(long, value_enum)]
    mode: Option<ModeChoice>,

    /// Content seed. Falls back to the UTC minute bucket.
    #[arg(long, env = "GITHUB_RUN_ID")]
    seed: Option<String>,

    /// Voice id for voice-parametrized backends; skips the daily rotation.
    #[arg(long, env = "TTS_VOICE")]
    voice: Option<String>,
}

#[derive(Parser, Debug)]
struct ScriptArgs {
    #[arg(long, value_enum, default_value_t = ModeChoice::Short)]
    mode: ModeChoice,

    #[arg(long, env = "GITHUB_RUN_ID")]
    seed: Option<String>,

    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct CaptionsArgs {
    /// Newline-delimited script text.
    #[arg(long)]
    text: PathBuf,

    /// Measured audio duration in seconds.
    #[arg(long)]
    duration: f64,

    /// Minimum display time per caption.
    #[arg(long, default_value_t = shortreel::DEFAULT_MIN_DISPLAY_SECONDS)]
    min_display: f64,

    /// Output SRT path. Printed to stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct FilterArgs {
    #[arg(long)]
    title_file: PathBuf,

    #[arg(long)]
    captions: PathBuf,

    /// Seed for the background style. Defaults to today's UTC date.
    #[arg(long)]
    style_seed: Option<String>,

    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeChoice {
    Short,
    Long,
}

impl From<ModeChoice> for ScriptMode {
    fn from(value: ModeChoice) -> Self {
        match value {
            ModeChoice::Short => ScriptMode::Short,
            ModeChoice::Long => ScriptMode::Long,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Script(args) => cmd_script(args),
        Command::Captions(args) => cmd_captions(args),
        Command::Filter(args) => cmd_filter(args),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<PipelineConfig> {
    match path {
        Some(p) => Ok(PipelineConfig::load(p)?),
        None => Ok(PipelineConfig::default()),
    }
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let config = load_config(args.config.as_deref())?;
    let engine = FfmpegEngine::default();
    if !engine.is_available() {
        anyhow::bail!("ffmpeg and ffprobe must be on PATH to render");
    }

    let mode = args.mode.map(ScriptMode::from).unwrap_or(config.mode);
    let mut req = RunRequest::new(mode, Seed::for_run(args.seed.as_deref()));
    req.voice_override = args.voice;

    let ws = Workspace::create(&args.workdir)?;
    let pipeline = Pipeline::from_config(config, Box::new(engine))?;
    tracing::info!(seed = %req.seed, workdir = %ws.root().display(), "starting run");
    let report = pipeline.run(&ws, &req)?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn cmd_script(args: ScriptArgs) -> anyhow::Result<()> {
    let config = load_config(args.config.as_deref())?;
    let seed = Seed::for_run(args.seed.as_deref());
    let script = shortreel::generate(&config.templates, args.mode.into(), &seed)?;
    println!("{}", serde_json::to_string_pretty(&script)?);
    Ok(())
}

fn cmd_captions(args: CaptionsArgs) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(&args.text)
        .with_context(|| format!("read script text '{}'", args.text.display()))?;
    let entries = shortreel::allocate(&text, args.duration, args.min_display)?;
    match args.out {
        Some(out) => {
            srt::write_srt(&out, &entries)?;
            tracing::info!(entries = entries.len(), out = %out.display(), "captions written");
        }
        None => print!("{}", srt::to_srt(&entries)),
    }
    Ok(())
}

fn cmd_filter(args: FilterArgs) -> anyhow::Result<()> {
    let config = load_config(args.config.as_deref())?;
    let seed = args
        .style_seed
        .map(Seed::new)
        .unwrap_or_else(Seed::utc_day_bucket);
    let graph = compose::build(
        config.canvas,
        &args.title_file,
        &args.captions,
        &seed,
        &config.visual,
    )?;
    println!("{}", graph.to_filter_string()?);
    Ok(())
}
