use chromakey::io::{load_rgb_image, save_rgb_image};
use chromakey::{resize_bilinear, Compositor, KeyConfig, Rgb};
use clap::Parser;
use serde::Deserialize;
use std::error::Error;
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

const DEFAULT_OUTPUT: &str = "output.png";
const DEFAULT_THRESHOLD: f64 = 1.0;

#[derive(Parser, Debug)]
#[command(author, version, about = "Chroma keying: replace a key color with a background image")]
struct Cli {
    /// Foreground image file (PNG).
    #[arg(long, value_name = "FILE")]
    fg: Option<PathBuf>,
    /// Background image file (PNG), resized to the foreground.
    #[arg(long, value_name = "FILE")]
    bg: Option<PathBuf>,
    /// Output image file (PNG).
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
    /// Key color as three channel values in 0-255.
    #[arg(
        long,
        num_args = 3,
        value_names = ["R", "G", "B"],
        allow_negative_numbers = true
    )]
    key_color: Option<Vec<i64>>,
    /// Distance threshold; key-like pixels fall below it.
    #[arg(short, long, allow_negative_numbers = true)]
    threshold: Option<f64>,
    /// Composite rows in parallel.
    #[arg(long)]
    parallel: bool,
    /// JSON config supplying any option not given on the command line.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Print an example config and exit.
    #[arg(long)]
    print_example: bool,
    /// Enable tracing output for each pipeline stage.
    #[arg(long)]
    trace: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Config {
    fg: Option<PathBuf>,
    bg: Option<PathBuf>,
    output: Option<PathBuf>,
    key_color: Option<Vec<i64>>,
    threshold: Option<f64>,
    parallel: bool,
}

/// Fully resolved and validated job.
#[derive(Debug, PartialEq)]
struct Job {
    fg: PathBuf,
    bg: PathBuf,
    output: PathBuf,
    key: KeyConfig,
}

fn parse_key_color(channels: &[i64]) -> Result<Rgb, Box<dyn Error>> {
    match channels {
        [r, g, b] => Ok(Rgb::from_channels(*r, *g, *b)?),
        _ => Err(format!("expected 3 color channels, got {}", channels.len()).into()),
    }
}

/// Merges command-line flags over the optional config file and validates
/// everything that can be checked before touching the images.
fn resolve(cli: Cli, config: Config) -> Result<Job, Box<dyn Error>> {
    let fg = cli.fg.or(config.fg).ok_or("missing foreground image (--fg)")?;
    let bg = cli.bg.or(config.bg).ok_or("missing background image (--bg)")?;
    let output = cli
        .output
        .or(config.output)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));
    let channels = cli
        .key_color
        .or(config.key_color)
        .ok_or("missing key color (--key-color R G B)")?;

    let key = KeyConfig {
        key: parse_key_color(&channels)?,
        threshold: cli
            .threshold
            .or(config.threshold)
            .unwrap_or(DEFAULT_THRESHOLD),
        parallel: cli.parallel || config.parallel,
    };
    key.validate()?;

    Ok(Job {
        fg,
        bg,
        output,
        key,
    })
}

fn run(job: &Job) -> Result<(), Box<dyn Error>> {
    let fg = load_rgb_image(&job.fg)?;
    let bg = load_rgb_image(&job.bg)?;
    let bg = resize_bilinear(&bg, fg.width(), fg.height())?;

    let result = Compositor::new(job.key).composite(&fg, &bg)?;
    save_rgb_image(&result, &job.output)?;
    tracing::info!(
        output = %job.output.display(),
        width = result.width(),
        height = result.height(),
        "composite written"
    );
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let level = if cli.trace { "chromakey=info" } else { "chromakey=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.parse()?))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if cli.print_example {
        println!("{EXAMPLE_JSON}");
        return Ok(());
    }

    let config = match &cli.config {
        Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
        None => Config::default(),
    };
    let job = resolve(cli, config)?;
    run(&job)
}
