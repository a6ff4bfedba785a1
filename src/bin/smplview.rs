use std::f32::consts::{PI, TAU};
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use smplview::{
    AnimationData, CameraState, CpuSurface, FfmpegSink, FfmpegSinkOpts, FrameIndex, FrameRange,
    PlaybackDriver, PngSequenceSink, SystemClock, Vec3, ViewerConfig, ViewerSession,
};

#[derive(Parser, Debug)]
#[command(name = "smplview", version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the header of an SMPL file.
    Info(InfoArgs),
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Render every frame as a numbered PNG sequence.
    Frames(FramesArgs),
    /// Render an MP4 video (requires `ffmpeg` on PATH).
    Render(RenderArgs),
    /// Play the animation in real time without a window, logging frame changes.
    Play(PlayArgs),
    /// Write a synthetic animated mesh.
    Synth(SynthArgs),
}

#[derive(Args, Debug)]
struct ViewArgs {
    /// Input SMPL file.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Viewer configuration JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Camera azimuth override, radians.
    #[arg(long, allow_hyphen_values = true)]
    azimuth: Option<f32>,

    /// Camera elevation override, radians.
    #[arg(long, allow_hyphen_values = true)]
    elevation: Option<f32>,

    /// Camera distance override.
    #[arg(long)]
    distance: Option<f32>,
}

#[derive(Args, Debug)]
struct InfoArgs {
    /// Input SMPL file.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    view: ViewArgs,

    /// Frame index (0-based).
    #[arg(long, default_value_t = 0)]
    frame: u32,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct FramesArgs {
    #[command(flatten)]
    view: ViewArgs,

    /// Output directory.
    #[arg(long)]
    out_dir: PathBuf,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    view: ViewArgs,

    /// Output MP4 path.
    #[arg(long)]
    out: PathBuf,

    /// Fail instead of replacing an existing output file.
    #[arg(long)]
    no_overwrite: bool,
}

#[derive(Args, Debug)]
struct PlayArgs {
    #[command(flatten)]
    view: ViewArgs,

    /// How long to play, in seconds.
    #[arg(long, default_value_t = 2.0)]
    seconds: f64,

    /// Refresh rate of the simulated display, in Hz.
    #[arg(long, default_value_t = 60.0)]
    refresh_hz: f64,
}

#[derive(Args, Debug)]
struct SynthArgs {
    /// Output SMPL file.
    #[arg(long)]
    out: PathBuf,

    /// Number of frames.
    #[arg(long, default_value_t = 60)]
    frames: u32,

    /// Playback rate.
    #[arg(long, default_value_t = 30.0)]
    fps: f32,

    /// Display color.
    #[arg(long, default_value = "#4a9eff")]
    color: String,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Info(args) => cmd_info(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Frames(args) => cmd_frames(args),
        Command::Render(args) => cmd_render(args),
        Command::Play(args) => cmd_play(args),
        Command::Synth(args) => cmd_synth(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();
}

fn read_input(path: &Path) -> anyhow::Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("read input '{}'", path.display()))
}

fn open_session(view: &ViewArgs) -> anyhow::Result<ViewerSession> {
    let config = match &view.config {
        Some(path) => ViewerConfig::from_path(path)?,
        None => ViewerConfig::default(),
    };
    let mut session = ViewerSession::new(config)?;
    let bytes = read_input(&view.in_path)?;
    session
        .load(&bytes)
        .with_context(|| format!("load '{}'", view.in_path.display()))?;

    let cam = *session.camera();
    session.set_camera(CameraState {
        azimuth: view.azimuth.unwrap_or(cam.azimuth),
        elevation: view.elevation.unwrap_or(cam.elevation),
        distance: view.distance.unwrap_or(cam.distance),
        ..cam
    });
    Ok(session)
}

fn frame_count(session: &ViewerSession) -> anyhow::Result<u32> {
    session
        .data()
        .map(AnimationData::frames)
        .context("no animation loaded")
}

fn cmd_info(args: InfoArgs) -> anyhow::Result<()> {
    let bytes = read_input(&args.in_path)?;
    let header = smplview::decode_header(&bytes)?;
    let data = smplview::decode(&bytes)
        .with_context(|| format!("decode '{}'", args.in_path.display()))?;

    println!("frames:   {}", header.frames);
    println!("vertices: {}", header.num_vertices);
    println!("faces:    {}", header.num_faces);
    println!("fps:      {}", header.fps);
    println!("color:    {}", header.mesh_color);
    println!(
        "duration: {:.3}s",
        f64::from(data.frames()) * data.frame_duration_ms() / 1000.0
    );
    if let Some((min, max)) = data.frame_bounds(FrameIndex(0)) {
        println!("bounds:   {min} .. {max}");
    }
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let mut session = open_session(&args.view)?;
    let frames = frame_count(&session)?;
    if args.frame >= frames {
        anyhow::bail!("frame {} is out of range (animation has {frames})", args.frame);
    }
    session.scrub(args.frame);

    let mut surface = CpuSurface::new(session.canvas())?;
    session.render(&mut surface)?;
    smplview::write_png(&args.out, &surface.frame())?;

    eprintln!("wrote {} ({})", args.out.display(), session.status_text());
    Ok(())
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    let session = open_session(&args.view)?;
    let frames = frame_count(&session)?;
    let mut sink = PngSequenceSink::new(&args.out_dir);
    session.render_range(FrameRange::all(frames), &mut sink)?;

    eprintln!(
        "wrote {} frames to {}",
        sink.written().len(),
        args.out_dir.display()
    );
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let session = open_session(&args.view)?;
    let frames = frame_count(&session)?;

    let sink_opts = FfmpegSinkOpts {
        out_path: args.out.clone(),
        overwrite: !args.no_overwrite,
        background: session.style().background,
    };
    let mut sink = FfmpegSink::new(sink_opts);
    session.render_range(FrameRange::all(frames), &mut sink)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_play(args: PlayArgs) -> anyhow::Result<()> {
    if !args.seconds.is_finite() || args.seconds < 0.0 {
        anyhow::bail!("--seconds must be a non-negative number");
    }
    let mut session = open_session(&args.view)?;
    let mut driver = PlaybackDriver::new(SystemClock::new(), 1000.0 / args.refresh_hz);
    session.toggle_play(driver.now_ms());

    let mut advances = 0u64;
    let refreshes = driver.run_for(&mut session, args.seconds * 1000.0, |s| {
        advances += 1;
        tracing::info!(status = %s.status_text(), "frame");
    });
    session.toggle_play(driver.now_ms());

    println!(
        "{} after {refreshes} refreshes ({advances} frame changes)",
        session.status_text()
    );
    Ok(())
}

fn cmd_synth(args: SynthArgs) -> anyhow::Result<()> {
    let data = synth_animation(args.frames, args.fps, &args.color)?;
    let bytes = smplview::encode(&data)?;
    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&args.out, &bytes)
        .with_context(|| format!("write '{}'", args.out.display()))?;

    eprintln!(
        "wrote {} ({} frames, {} vertices, {} faces)",
        args.out.display(),
        data.frames(),
        data.num_vertices(),
        data.num_faces()
    );
    Ok(())
}

const SYNTH_RINGS: u32 = 12;
const SYNTH_SEGMENTS: u32 = 16;
const SYNTH_HEIGHT: f32 = 1.8;

/// A swaying capsule-like tube standing on the grid, one loop over the whole clip.
fn synth_animation(frames: u32, fps: f32, color: &str) -> anyhow::Result<AnimationData> {
    let mut vertices = Vec::with_capacity(frames as usize * (SYNTH_RINGS * SYNTH_SEGMENTS) as usize);
    for f in 0..frames {
        let phase = TAU * f as f32 / frames.max(1) as f32;
        for r in 0..SYNTH_RINGS {
            let t = r as f32 / (SYNTH_RINGS - 1) as f32;
            let y = SYNTH_HEIGHT * t;
            let radius = 0.12 + 0.1 * (PI * t).sin();
            let sway = 0.15 * phase.sin() * t;
            for s in 0..SYNTH_SEGMENTS {
                let a = TAU * s as f32 / SYNTH_SEGMENTS as f32;
                vertices.push(Vec3::new(sway + radius * a.cos(), y, radius * a.sin()));
            }
        }
    }

    let mut faces = Vec::new();
    for r in 0..SYNTH_RINGS - 1 {
        for s in 0..SYNTH_SEGMENTS {
            let a = r * SYNTH_SEGMENTS + s;
            let b = r * SYNTH_SEGMENTS + (s + 1) % SYNTH_SEGMENTS;
            let c = a + SYNTH_SEGMENTS;
            let d = b + SYNTH_SEGMENTS;
            faces.push([a, b, d]);
            faces.push([a, d, c]);
        }
    }

    Ok(AnimationData::new(
        frames,
        SYNTH_RINGS * SYNTH_SEGMENTS,
        fps,
        color,
        vertices,
        faces,
    )?)
}
