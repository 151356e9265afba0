use std::{
    io::Write as _,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "reeltime", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print scene and transition windows and the frame budget.
    Inspect(InputArgs),
    /// Evaluate a single frame and print it as JSON.
    Frame(FrameArgs),
    /// Evaluate a frame range, one JSON line per frame.
    Dump(DumpArgs),
    /// Write the composition as JSON.
    Export(ExportArgs),
}

#[derive(Parser, Debug)]
struct InputArgs {
    /// Input composition JSON. Defaults to the built-in promo.
    #[arg(long = "in")]
    in_path: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Frame index (0-based).
    #[arg(long)]
    frame: u64,

    /// Output JSON path; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct DumpArgs {
    #[command(flatten)]
    input: InputArgs,

    /// First frame (inclusive).
    #[arg(long, default_value_t = 0)]
    start: u64,

    /// Last frame (exclusive). Defaults to the composition budget.
    #[arg(long)]
    end: Option<u64>,

    /// Evaluate chunks on a thread pool.
    #[arg(long)]
    parallel: bool,

    /// Thread pool size.
    #[arg(long)]
    threads: Option<usize>,

    /// Frames per chunk.
    #[arg(long, default_value_t = 64)]
    chunk_size: usize,

    /// Include the full frame state in each line.
    #[arg(long)]
    full: bool,
}

#[derive(Parser, Debug)]
struct ExportArgs {
    /// Output JSON path.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Inspect(args) => cmd_inspect(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Dump(args) => cmd_dump(args),
        Command::Export(args) => cmd_export(args),
    }
}

fn load(input: &InputArgs) -> anyhow::Result<reeltime::Composition> {
    match &input.in_path {
        Some(path) => {
            let def = reeltime::CompositionDef::from_path(path)
                .with_context(|| format!("read composition '{}'", path.display()))?;
            def.build()
                .with_context(|| format!("build composition '{}'", path.display()))
        }
        None => reeltime::promo().context("build built-in promo"),
    }
}

fn cmd_inspect(args: InputArgs) -> anyhow::Result<()> {
    let comp = load(&args)?;
    let config = comp.config();
    let timeline = comp.timeline();
    let layout = timeline.layout();
    let fps = comp.fps();

    let mut out = std::io::stdout().lock();
    writeln!(
        out,
        "{}: {}x{} @ {}/{} fps",
        config.id, config.canvas.width, config.canvas.height, config.fps.num, config.fps.den
    )?;
    for (i, (scene, range)) in timeline.scenes().iter().zip(&layout.scenes).enumerate() {
        writeln!(
            out,
            "  scene {i:>2} {:<16} [{:>4}, {:>4})  {} frames ({:.2}s)",
            scene.id(),
            range.start.0,
            range.end.0,
            scene.duration_frames(),
            fps.frames_to_secs(scene.duration_frames())
        )?;
        if let (Some(tr), Some(window)) =
            (timeline.transitions().get(i), layout.transitions.get(i))
        {
            writeln!(
                out,
                "    transition {:<13} {:<7} [{:>4}, {:>4})",
                tr.presentation.name(),
                tr.timing.name(),
                window.start.0,
                window.end.0
            )?;
        }
    }
    writeln!(
        out,
        "resolved {} / budget {} frames ({:.2}s / {:.2}s, {} trailing, {:?})",
        layout.len_frames,
        comp.duration_frames(),
        fps.frames_to_secs(layout.len_frames),
        fps.frames_to_secs(comp.duration_frames()),
        comp.trailing_frames(),
        config.trailing
    )?;
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let comp = load(&args.input)?;
    let state = reeltime::Evaluator::eval_frame(&comp, reeltime::FrameIndex(args.frame))
        .with_context(|| format!("evaluate frame {}", args.frame))?;
    let json = serde_json::to_string_pretty(&state).context("serialize frame state")?;
    match &args.out {
        Some(path) => write_file(path, &json)?,
        None => println!("{json}"),
    }
    Ok(())
}

fn cmd_dump(args: DumpArgs) -> anyhow::Result<()> {
    let comp = load(&args.input)?;
    let end = args.end.unwrap_or(comp.duration_frames());
    let range =
        reeltime::FrameRange::new(reeltime::FrameIndex(args.start), reeltime::FrameIndex(end))?;
    let threading = reeltime::EvalThreading {
        parallel: args.parallel,
        chunk_size: args.chunk_size,
        threads: args.threads,
    };
    let (frames, stats) = reeltime::eval_range_with_stats(&comp, range, &threading)
        .with_context(|| format!("evaluate frames [{}, {end})", args.start))?;

    let mut out = std::io::BufWriter::new(std::io::stdout().lock());
    for frame in &frames {
        let fingerprint = reeltime::fingerprint_frame(frame).to_string();
        let line = if args.full {
            serde_json::json!({ "fingerprint": fingerprint, "state": frame })
        } else {
            serde_json::json!({
                "frame": frame.frame.0,
                "buffer": frame.buffer,
                "content": content_summary(&frame.content),
                "fingerprint": fingerprint,
            })
        };
        writeln!(out, "{line}")?;
    }
    out.flush()?;
    eprintln!(
        "evaluated {} frames ({} distinct)",
        stats.frames_total, stats.frames_distinct
    );
    Ok(())
}

fn content_summary(content: &reeltime::FrameContent) -> serde_json::Value {
    match content {
        reeltime::FrameContent::Scene { scene } => serde_json::json!({
            "kind": "scene",
            "scene": scene.id,
            "local": scene.local_frame,
        }),
        reeltime::FrameContent::Transition {
            transition,
            outgoing,
            incoming,
        } => serde_json::json!({
            "kind": "transition",
            "presentation": transition.presentation.name(),
            "progress": transition.progress,
            "outgoing": outgoing.id,
            "incoming": incoming.id,
        }),
        reeltime::FrameContent::Blank => serde_json::json!({ "kind": "blank" }),
    }
}

fn cmd_export(args: ExportArgs) -> anyhow::Result<()> {
    let def = reeltime::promo_def().context("build built-in promo")?;
    let json = def.to_json_pretty()?;
    write_file(&args.out, &json)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn write_file(path: &Path, contents: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, contents).with_context(|| format!("write '{}'", path.display()))
}
