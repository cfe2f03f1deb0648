use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing_subscriber::{EnvFilter, fmt};

use vlab::{
    AnimationParams, CancelToken, FrameIndex, FrameRange, FrameSink, RasterBuffer, RenderInputs,
    Renderer, SegmenterHandle, SequenceSpec, Settings, SinkConfig, SourceImage, VlabError,
    VlabResult,
};

#[derive(Parser, Debug)]
#[command(name = "vlab", version, about = "Stylized raster synthesis")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single still as a PNG.
    Still(StillArgs),
    /// Render an animated sequence as numbered PNG frames.
    Sequence(SequenceArgs),
}

#[derive(clap::Args, Debug)]
struct InputArgs {
    /// Base photo.
    #[arg(long)]
    base: PathBuf,

    /// Optional pattern photo for texture/detail blending.
    #[arg(long)]
    pattern: Option<PathBuf>,

    /// Optional camera frame; enables camera compositing.
    #[arg(long)]
    camera: Option<PathBuf>,

    /// Settings JSON. Missing fields take their defaults.
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Skip segmentation and draw the camera frame at 90% opacity.
    #[arg(long)]
    raw_camera: bool,

    /// Output width in pixels.
    #[arg(long, default_value_t = 1920)]
    width: u32,

    /// Output height in pixels.
    #[arg(long, default_value_t = 1080)]
    height: u32,

    /// Seed for reproducible noise and glitches.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(clap::Args, Debug)]
struct StillArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(clap::Args, Debug)]
struct SequenceArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Number of frames.
    #[arg(long)]
    frames: u64,

    /// Frame rate.
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Drift speed, 0-100.
    #[arg(long, default_value_t = 50.0)]
    speed: f64,

    /// Drift intensity, 0-100.
    #[arg(long, default_value_t = 30.0)]
    intensity: f64,

    /// Directory that receives `frame_00000.png`, ...
    #[arg(long)]
    out_dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Still(args) => cmd_still(args),
        Command::Sequence(args) => cmd_sequence(args),
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("vlab=info"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

struct LoadedInputs {
    base: SourceImage,
    pattern: Option<SourceImage>,
    camera: Option<RasterBuffer>,
    settings: Settings,
}

impl LoadedInputs {
    fn inputs(&self) -> RenderInputs<'_> {
        RenderInputs {
            base: &self.base,
            pattern: self.pattern.as_ref(),
            camera: self.camera.as_ref(),
        }
    }
}

fn load_inputs(args: &InputArgs) -> anyhow::Result<LoadedInputs> {
    let base = read_image(&args.base)?;
    let pattern = args.pattern.as_deref().map(read_image).transpose()?;
    let camera = args
        .camera
        .as_deref()
        .map(|p| read_image(p).map(|img| img.raster().clone()))
        .transpose()?;

    let mut settings = match &args.settings {
        Some(path) => Settings::from_path(path)
            .with_context(|| format!("load settings '{}'", path.display()))?,
        None => Settings::default(),
    };
    if camera.is_some() {
        settings.camera_enabled = true;
    }
    settings.validate().context("validate settings")?;

    Ok(LoadedInputs {
        base,
        pattern,
        camera,
        settings,
    })
}

fn read_image(path: &Path) -> anyhow::Result<SourceImage> {
    let bytes = std::fs::read(path).with_context(|| format!("read image '{}'", path.display()))?;
    SourceImage::decode(&bytes).with_context(|| format!("decode image '{}'", path.display()))
}

fn make_renderer(args: &InputArgs) -> anyhow::Result<Renderer> {
    let mut segmenter = SegmenterHandle::heuristic();
    if !args.raw_camera {
        segmenter.init().context("init segmenter")?;
    }
    Ok(Renderer::with_segmenter(segmenter)?)
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

fn cmd_still(args: StillArgs) -> anyhow::Result<()> {
    let loaded = load_inputs(&args.input)?;
    let renderer = make_renderer(&args.input)?;
    let mut rng = make_rng(args.input.seed);

    let frame = renderer.render_with_rng(
        &loaded.inputs(),
        &loaded.settings,
        args.input.width,
        args.input.height,
        &mut rng,
    )?;
    write_png(&args.out, &frame)?;
    tracing::info!(out = %args.out.display(), "wrote still");
    Ok(())
}

fn cmd_sequence(args: SequenceArgs) -> anyhow::Result<()> {
    let loaded = load_inputs(&args.input)?;
    let renderer = make_renderer(&args.input)?;
    let mut rng = make_rng(args.input.seed);

    let spec = SequenceSpec {
        width: args.input.width,
        height: args.input.height,
        fps: vlab::Fps::new(args.fps, 1)?,
        range: FrameRange::new(FrameIndex(0), FrameIndex(args.frames))?,
        animation: AnimationParams {
            speed: args.speed,
            intensity: args.intensity,
        },
    };
    let mut sink = PngDirSink::new(args.out_dir.clone());
    let stats = renderer.render_sequence(
        &loaded.inputs(),
        &loaded.settings,
        &spec,
        &mut sink,
        &CancelToken::new(),
        &mut rng,
    )?;
    tracing::info!(
        frames = stats.frames_rendered,
        out_dir = %args.out_dir.display(),
        "wrote sequence"
    );
    Ok(())
}

fn write_png(path: &Path, frame: &RasterBuffer) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
    }
    image::save_buffer_with_format(
        path,
        frame.data(),
        frame.width(),
        frame.height(),
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

/// Writes each frame as `frame_NNNNN.png` into a directory.
struct PngDirSink {
    dir: PathBuf,
}

impl PngDirSink {
    fn new(dir: PathBuf) -> Self {
        Self { dir }
    }
}

impl FrameSink for PngDirSink {
    fn begin(&mut self, _cfg: SinkConfig) -> VlabResult<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("create output dir '{}'", self.dir.display()))
            .map_err(VlabError::from)
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &RasterBuffer) -> VlabResult<()> {
        let path = self.dir.join(format!("frame_{:05}.png", idx.0));
        write_png(&path, frame).map_err(VlabError::from)
    }

    fn end(&mut self) -> VlabResult<()> {
        Ok(())
    }
}
