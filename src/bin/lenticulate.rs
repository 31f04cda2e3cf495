use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "lenticulate", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interlace a sequence of frames into a lenticular print PNG.
    Generate(GenerateArgs),
    /// Print canvas size, lens pitch and lens count for the given settings.
    Info(InfoArgs),
}

#[derive(Args, Debug, Clone)]
struct SettingsArgs {
    /// Settings JSON (camelCase keys); flags below override it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Lens sheet density in lines per inch.
    #[arg(long)]
    lpi: Option<f64>,

    /// Output resolution in dots per inch.
    #[arg(long)]
    dpi: Option<f64>,

    /// Print width in inches.
    #[arg(long)]
    width: Option<f64>,

    /// Print height in inches.
    #[arg(long)]
    height: Option<f64>,

    /// Lens orientation.
    #[arg(long, value_enum)]
    orientation: Option<OrientationChoice>,
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    /// Frame files, in any order (sorted by name before interlacing).
    images: Vec<PathBuf>,

    /// Directory whose image files are added to the sequence.
    #[arg(long)]
    dir: Option<PathBuf>,

    /// Output PNG path, or a directory to receive the suggested file name.
    #[arg(long)]
    out: PathBuf,

    #[command(flatten)]
    settings: SettingsArgs,

    /// Decode frames in parallel.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(Parser, Debug)]
struct InfoArgs {
    #[command(flatten)]
    settings: SettingsArgs,

    /// Frame count, to also report the strip width.
    #[arg(long)]
    images: Option<usize>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OrientationChoice {
    Vertical,
    Horizontal,
}

impl From<OrientationChoice> for lenticulate::Orientation {
    fn from(c: OrientationChoice) -> Self {
        match c {
            OrientationChoice::Vertical => Self::Vertical,
            OrientationChoice::Horizontal => Self::Horizontal,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Generate(args) => cmd_generate(args).await,
        Command::Info(args) => cmd_info(args),
    }
}

fn resolve_settings(args: &SettingsArgs) -> anyhow::Result<lenticulate::LenticularSettings> {
    let mut s = match &args.config {
        Some(path) => lenticulate::LenticularSettings::from_path(path)?,
        None => lenticulate::LenticularSettings::default(),
    };
    if let Some(v) = args.lpi {
        s.lpi = v;
    }
    if let Some(v) = args.dpi {
        s.dpi = v;
    }
    if let Some(v) = args.width {
        s.width_inches = v;
    }
    if let Some(v) = args.height {
        s.height_inches = v;
    }
    if let Some(o) = args.orientation {
        s.orientation = o.into();
    }
    s.validate()?;
    Ok(s)
}

fn collect_dir(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut out = Vec::new();
    for entry in
        std::fs::read_dir(dir).with_context(|| format!("read directory '{}'", dir.display()))?
    {
        let path = entry?.path();
        if path.is_file() && image::ImageFormat::from_path(&path).is_ok() {
            out.push(path);
        }
    }
    Ok(out)
}

async fn cmd_generate(args: GenerateArgs) -> anyhow::Result<()> {
    let settings = resolve_settings(&args.settings)?;

    let mut paths = args.images.clone();
    if let Some(dir) = &args.dir {
        paths.extend(collect_dir(dir)?);
    }
    let mut sequence = lenticulate::ImageSequence::new();
    for p in &paths {
        sequence.push(lenticulate::SourceImage::from_path(p)?);
    }
    for (i, img) in sequence.iter().enumerate() {
        tracing::debug!(index = i, name = %img.name, "frame");
    }

    let opts = lenticulate::GenerateOpts {
        load: lenticulate::LoadOpts {
            parallel: args.parallel,
            threads: args.threads,
        },
    };
    let mut session = lenticulate::GenerationSession::new(opts);
    session.start(sequence.as_slice().to_vec(), settings);
    let token = session
        .cancel_token()
        .context("generation did not start")?;

    let print = tokio::select! {
        res = session.finish() => res?,
        _ = tokio::signal::ctrl_c() => {
            token.cancel();
            anyhow::bail!("interrupted; output discarded");
        }
    };

    let out_path = if args.out.is_dir() {
        args.out.join(lenticulate::suggested_file_name(&settings))
    } else {
        args.out.clone()
    };
    lenticulate::write_png(&out_path, &print)?;

    eprintln!(
        "wrote {} ({} x {} px)",
        out_path.display(),
        print.width(),
        print.height()
    );
    Ok(())
}

fn cmd_info(args: InfoArgs) -> anyhow::Result<()> {
    let settings = resolve_settings(&args.settings)?;
    let summary = settings.summary(args.images)?;

    println!(
        "canvas:       {} x {} px",
        summary.canvas.width, summary.canvas.height
    );
    println!("lens pitch:   {:.4} px", summary.lens_pitch_px);
    if let Some(w) = summary.strip_width_px {
        println!("strip width:  {w:.4} px");
    }
    println!("lenses:       {}", summary.total_lenses);
    println!("orientation:  {}", settings.orientation);
    println!("file name:    {}", lenticulate::suggested_file_name(&settings));
    Ok(())
}
