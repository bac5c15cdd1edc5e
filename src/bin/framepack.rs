use std::{fs, path::Path, path::PathBuf, sync::Arc};

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::json;

use framepack::{
    ArchivePackager, DEFAULT_MOBILE_MAX_WIDTH, DEFAULT_PLAYABLE_TIMEOUT, DecoderHandle,
    DimensionPolicy, ExtractOptions, ExtractionRequest, FfmpegLogLevel, ProgressCallback,
    ProgressInfo, SamplingMode, StillFormat, ZipPackager, await_playable, named_entries,
    resolve_dimensions,
};

const CLI_AFTER_HELP: &str = "Examples:\n  framepack extract input.webm --by count --n 12 --out frames.zip --progress\n  framepack extract input.mp4 --by rate --n 2 --format jpg --quality 0.85 --mobile\n  framepack metadata input.mp4 --json\n  framepack completions zsh > _framepack";

#[derive(Debug, Parser)]
#[command(
    name = "framepack",
    version,
    about = "Sample still frames from a video and pack them into a ZIP archive",
    after_help = CLI_AFTER_HELP
)]
struct Cli {
    #[command(flatten)]
    global: GlobalOptions,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Parser, Clone, Default)]
struct GlobalOptions {
    /// Show additional logging output.
    #[arg(long)]
    verbose: bool,

    /// Show a progress bar where supported.
    #[arg(long)]
    progress: bool,

    /// Allow overwriting existing output files.
    #[arg(long)]
    overwrite: bool,

    /// FFmpeg log level (quiet, panic, fatal, error, warning, info, verbose, debug, trace).
    #[arg(long)]
    log_level: Option<String>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Extract frames and pack them into a ZIP archive.
    #[command(
        about = "Extract sampled frames into a ZIP archive",
        after_help = "Examples:\n  framepack extract input.webm --by count --n 12 --out frames.zip\n  framepack extract input.mp4 --by rate --n 2 --width 100 --height 50\n  framepack extract input.mp4 --scale 0.5 --format jpg --quality 0.85"
    )]
    Extract {
        /// Input video path.
        input: String,

        /// Sampling mode: rate (frames per second) or count (total frames).
        #[arg(long, default_value = "count")]
        by: String,

        /// Sampling parameter (rate: 1-60, count: 1-3600).
        #[arg(long = "n", default_value_t = 12)]
        param: u32,

        /// Encode quality, 0.01-1.0. Ignored for PNG.
        #[arg(long, default_value_t = 1.0)]
        quality: f32,

        /// Still-image format: png or jpg.
        #[arg(long, default_value = "png")]
        format: String,

        /// Exact output width (requires --height).
        #[arg(long, requires = "height")]
        width: Option<u32>,

        /// Exact output height (requires --width).
        #[arg(long, requires = "width")]
        height: Option<u32>,

        /// Scale both dimensions by a factor.
        #[arg(long, conflicts_with_all = ["width", "height"])]
        scale: Option<f64>,

        /// Cap width at a mobile preset (360, 480, 720, 1080), preserving
        /// aspect ratio.
        #[arg(
            long,
            conflicts_with_all = ["width", "height", "scale"],
            num_args = 0..=1,
            default_missing_value = "720"
        )]
        mobile: Option<u32>,

        /// Per-frame file name template; {{id}} is replaced with the
        /// zero-padded frame index. Defaults to frame-{{id}}.<format>.
        #[arg(long)]
        template: Option<String>,

        /// Output archive path.
        #[arg(long, default_value = "frames.zip")]
        out: PathBuf,
    },

    /// Print source metadata (alias: probe).
    #[command(
        about = "Print video source metadata",
        visible_alias = "probe",
        after_help = "Examples:\n  framepack metadata input.mp4\n  framepack metadata input.mp4 --json"
    )]
    Metadata {
        /// Input video path.
        input: String,

        /// Output metadata as machine-readable JSON.
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completion scripts.
    #[command(about = "Generate shell completions")]
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn parse_log_level(value: &str) -> Option<FfmpegLogLevel> {
    match value.to_ascii_lowercase().as_str() {
        "quiet" => Some(FfmpegLogLevel::Quiet),
        "panic" => Some(FfmpegLogLevel::Panic),
        "fatal" => Some(FfmpegLogLevel::Fatal),
        "error" => Some(FfmpegLogLevel::Error),
        "warning" | "warn" => Some(FfmpegLogLevel::Warning),
        "info" => Some(FfmpegLogLevel::Info),
        "verbose" => Some(FfmpegLogLevel::Verbose),
        "debug" => Some(FfmpegLogLevel::Debug),
        "trace" => Some(FfmpegLogLevel::Trace),
        _ => None,
    }
}

fn dimension_policy(
    width: Option<u32>,
    height: Option<u32>,
    scale: Option<f64>,
    mobile: Option<u32>,
) -> DimensionPolicy {
    match (width, height, scale, mobile) {
        (Some(width), Some(height), _, _) => DimensionPolicy::Custom { width, height },
        (_, _, Some(factor), _) => DimensionPolicy::Scale(factor),
        (_, _, _, Some(max_width)) => DimensionPolicy::Mobile { max_width },
        _ => DimensionPolicy::Original,
    }
}

fn ensure_writable_path(path: &Path, overwrite: bool) -> Result<(), Box<dyn std::error::Error>> {
    if path.exists() {
        if overwrite {
            eprintln!(
                "{} {}",
                "warning:".yellow().bold(),
                format!("overwriting {}", path.display()).yellow()
            );
        } else {
            return Err(format!(
                "output already exists: {} (use --overwrite to replace)",
                path.display()
            )
            .into());
        }
    }
    Ok(())
}

fn stage(message: &str) {
    log::info!("{message}");
    eprintln!("{} {message}", "stage:".cyan().bold());
}

struct BarProgress {
    bar: ProgressBar,
}

impl BarProgress {
    fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let bar = ProgressBar::new(100);
        let style =
            ProgressStyle::with_template("{spinner:.green} {bar:40.cyan/blue} {pos}% {msg}")?;
        bar.set_style(style.progress_chars("##-"));
        Ok(Self { bar })
    }
}

impl ProgressCallback for BarProgress {
    fn on_progress(&self, info: &ProgressInfo) {
        self.bar.set_position(u64::from(info.percent));
        self.bar
            .set_message(format!("{} frames", info.frames_collected));
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if let Some(level) = &cli.global.log_level {
        let parsed = parse_log_level(level).ok_or(format!("unsupported --log-level: {level}"))?;
        framepack::set_ffmpeg_log_level(parsed);
    }

    match cli.command {
        Commands::Extract {
            input,
            by,
            param,
            quality,
            format,
            width,
            height,
            scale,
            mobile,
            template,
            out,
        } => {
            stage("validating");

            let mode = SamplingMode::parse(&by)?;
            let still_format = StillFormat::parse(&format)
                .ok_or(format!("unsupported --format: {format} (png|jpg)"))?;
            let policy = dimension_policy(width, height, scale, mobile);
            let request = ExtractionRequest::new(mode, param, quality, still_format, policy)?;

            ensure_writable_path(&out, cli.global.overwrite)?;

            stage("loading");

            let mut options = ExtractOptions::new();
            let progress_bar = if cli.global.progress {
                let bar = BarProgress::new()?;
                let handle = bar.bar.clone();
                options = options.with_progress(Arc::new(bar));
                Some(handle)
            } else {
                None
            };

            stage("extracting");

            let result = framepack::extract_frames(&input, &request, &options)?;

            if let Some(bar) = progress_bar {
                bar.finish_with_message(format!("{} frames", result.summary.frame_count));
            }

            if cli.global.verbose {
                eprintln!(
                    "extracted {} frame(s) at {}×{}, {:.2} ms/frame average encode",
                    result.summary.frame_count,
                    result.summary.output_width,
                    result.summary.output_height,
                    result.summary.average_encode_ms,
                );
            }

            stage("packaging");

            let template = template
                .unwrap_or_else(|| format!("frame-{{{{id}}}}.{}", still_format.extension()));
            let entries = named_entries(&result.frames, &template);
            let archive = ZipPackager::new().pack(&entries)?;
            fs::write(&out, archive)?;

            stage("done");

            println!(
                "{} {}",
                "success:".green().bold(),
                format!(
                    "Packed {} frame(s) into {}",
                    result.summary.frame_count,
                    out.display()
                )
                .green()
            );
        }
        Commands::Metadata { input, json } => {
            let handle = DecoderHandle::open(&input)?;
            let metadata = await_playable(&handle, DEFAULT_PLAYABLE_TIMEOUT)?;

            if json {
                let mobile = resolve_dimensions(
                    &DimensionPolicy::Mobile {
                        max_width: DEFAULT_MOBILE_MAX_WIDTH,
                    },
                    metadata.width,
                    metadata.height,
                );
                let payload = json!({
                    "duration_seconds": metadata.duration.as_secs_f64(),
                    "width": metadata.width,
                    "height": metadata.height,
                    "mobile_720": { "width": mobile.0, "height": mobile.1 },
                });
                println!("{}", serde_json::to_string_pretty(&payload)?);
            } else {
                println!("Duration: {:.2}s", metadata.duration.as_secs_f64());
                println!("Dimensions: {}×{}", metadata.width, metadata.height);
            }
        }
        Commands::Completions { shell } => {
            let mut command = Cli::command();
            clap_complete::generate(shell, &mut command, "framepack", &mut std::io::stdout());
        }
    }

    Ok(())
}

fn main() {
    if let Err(error) = run() {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::{dimension_policy, parse_log_level};
    use framepack::DimensionPolicy;

    #[test]
    fn policy_precedence() {
        assert_eq!(
            dimension_policy(Some(100), Some(50), None, None),
            DimensionPolicy::Custom {
                width: 100,
                height: 50
            },
        );
        assert_eq!(
            dimension_policy(None, None, Some(0.5), None),
            DimensionPolicy::Scale(0.5),
        );
        assert_eq!(
            dimension_policy(None, None, None, Some(720)),
            DimensionPolicy::Mobile { max_width: 720 },
        );
        assert_eq!(
            dimension_policy(None, None, None, None),
            DimensionPolicy::Original,
        );
    }

    #[test]
    fn parse_log_level_aliases() {
        assert!(parse_log_level("warn").is_some());
        assert!(parse_log_level("QUIET").is_some());
        assert!(parse_log_level("chatty").is_none());
    }
}
