use std::{
    fs::File,
    io::BufWriter,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame, ImageFormat};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "smawf", version)]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print header, block table and size table as JSON.
    Info(InfoArgs),
    /// Write every image as a numbered PNG.
    Extract(ExtractArgs),
    /// Replace every image with PNGs from a directory.
    Repack(RepackArgs),
    /// Render a preview as PNG, or as an animated GIF for `.gif` output.
    Preview(PreviewArgs),
}

#[derive(Parser, Debug)]
struct InfoArgs {
    /// Input watch face container.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct ExtractArgs {
    /// Input watch face container.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output directory for `NNN.png` files.
    #[arg(long)]
    out: PathBuf,

    /// Decode images in parallel.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(Parser, Debug)]
struct RepackArgs {
    /// Input watch face container supplying the block table.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Directory of replacement PNGs, taken in file name order.
    #[arg(long)]
    images: PathBuf,

    /// Output container path.
    #[arg(long)]
    out: PathBuf,

    /// Force one compression mode for every block.
    #[arg(long, value_enum)]
    compression: Option<CompressionChoice>,
}

#[derive(Parser, Debug)]
struct PreviewArgs {
    /// Input watch face container.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Canvas width in pixels.
    #[arg(long)]
    width: u32,

    /// Canvas height in pixels.
    #[arg(long)]
    height: u32,

    /// Preview values as JSON; missing fields use defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output `.png` or `.gif` path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum CompressionChoice {
    Raw,
    Rle,
}

impl From<CompressionChoice> for smawf::Compression {
    fn from(c: CompressionChoice) -> Self {
        match c {
            CompressionChoice::Raw => Self::Raw,
            CompressionChoice::Rle => Self::Rle,
        }
    }
}

const GIF_FRAME_MS: u32 = 200;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Info(args) => cmd_info(args),
        Command::Extract(args) => cmd_extract(args),
        Command::Repack(args) => cmd_repack(args),
        Command::Preview(args) => cmd_preview(args),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_face(path: &Path) -> anyhow::Result<smawf::WatchFace> {
    let bytes = std::fs::read(path).with_context(|| format!("read '{}'", path.display()))?;
    smawf::decode_container(&bytes).with_context(|| format!("parse '{}'", path.display()))
}

fn create_parent_dir(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

fn cmd_info(args: InfoArgs) -> anyhow::Result<()> {
    let face = load_face(&args.in_path)?;
    let json = serde_json::to_string_pretty(face.metadata()).context("serialize metadata")?;
    println!("{json}");
    Ok(())
}

fn cmd_extract(args: ExtractArgs) -> anyhow::Result<()> {
    let face = load_face(&args.in_path)?;
    let opts = smawf::DecodeOpts {
        parallel: args.parallel,
        threads: args.threads,
    };
    let images = face.decode_images(&opts)?;

    std::fs::create_dir_all(&args.out)
        .with_context(|| format!("create output dir '{}'", args.out.display()))?;
    for (id, img) in images.iter().enumerate() {
        let path = args.out.join(format!("{id:03}.png"));
        img.save_with_format(&path, ImageFormat::Png)
            .with_context(|| format!("write png '{}'", path.display()))?;
    }

    eprintln!("wrote {} images to {}", images.len(), args.out.display());
    Ok(())
}

fn cmd_repack(args: RepackArgs) -> anyhow::Result<()> {
    let face = load_face(&args.in_path)?;

    let mut paths = std::fs::read_dir(&args.images)
        .with_context(|| format!("read image dir '{}'", args.images.display()))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()
        .with_context(|| format!("list image dir '{}'", args.images.display()))?;
    paths.retain(|p| {
        p.extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("png"))
    });
    paths.sort();

    if paths.len() != face.images().len() {
        anyhow::bail!(
            "'{}' has {} PNGs, container holds {} images",
            args.images.display(),
            paths.len(),
            face.images().len()
        );
    }

    // Each image is re-encoded with its owning block's alpha flag.
    let mut owner = vec![None; paths.len()];
    for block in face.blocks() {
        for slot in owner.iter_mut().skip(block.image_ids().start).take(block.image_ids().len()) {
            *slot = Some(*block);
        }
    }

    let images = paths
        .iter()
        .zip(owner)
        .map(|(path, block)| {
            let block = block.with_context(|| format!("no block owns '{}'", path.display()))?;
            let compression = args.compression.map_or(block.compression, Into::into);
            let img = image::open(path).with_context(|| format!("open '{}'", path.display()))?;
            smawf::encode_image(&img, compression, block.has_alpha)
                .with_context(|| format!("encode '{}'", path.display()))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let rebuilt = face.with_images(images)?;
    create_parent_dir(&args.out)?;
    std::fs::write(&args.out, smawf::encode_container(&rebuilt))
        .with_context(|| format!("write '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_preview(args: PreviewArgs) -> anyhow::Result<()> {
    let face = load_face(&args.in_path)?;
    let config = match &args.config {
        Some(path) => smawf::PreviewConfig::from_path(path)?,
        None => smawf::PreviewConfig::default(),
    };
    let frames = smawf::render_preview(&face, args.width, args.height, &config)?;
    create_parent_dir(&args.out)?;

    let is_gif = args
        .out
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("gif"));
    if is_gif {
        let file =
            File::create(&args.out).with_context(|| format!("create '{}'", args.out.display()))?;
        let mut encoder = GifEncoder::new(BufWriter::new(file));
        encoder.set_repeat(Repeat::Infinite)?;
        let delay = Delay::from_numer_denom_ms(GIF_FRAME_MS, 1);
        encoder
            .encode_frames(
                frames
                    .into_iter()
                    .map(|f| Frame::from_parts(f, 0, 0, delay)),
            )
            .with_context(|| format!("write gif '{}'", args.out.display()))?;
    } else {
        let first = frames.first().context("preview produced no frames")?;
        first
            .save_with_format(&args.out, ImageFormat::Png)
            .with_context(|| format!("write png '{}'", args.out.display()))?;
    }

    eprintln!("wrote {}", args.out.display());
    Ok(())
}
