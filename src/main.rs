// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow};
use log::{info, warn, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::io::Write;
use std::path::{Path, PathBuf};
use clap::{Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use vidsum::app_config::{self, Config, SummaryProvider};
use vidsum::app_controller::{Controller, RunOptions, RunOutcome};

/// CLI Wrapper for SummaryProvider to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliSummaryProvider {
    Extractive,
    Ollama,
}

impl From<CliSummaryProvider> for SummaryProvider {
    fn from(cli_provider: CliSummaryProvider) -> Self {
        match cli_provider {
            CliSummaryProvider::Extractive => SummaryProvider::Extractive,
            CliSummaryProvider::Ollama => SummaryProvider::Ollama,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate shell completions for vidsum
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// vidsum - Watch videos quickly
///
/// Summarizes a video's captions and cuts the matching parts of the video
/// into a short highlight.
#[derive(Parser, Debug)]
#[command(name = "vidsum")]
#[command(version)]
#[command(about = "Cut a highlight video out of a transcript summary")]
#[command(long_about = "vidsum summarizes the captions of a video and cuts the parts of the video the summary sentences come from into one short highlight.

EXAMPLES:
    vidsum https://www.youtube.com/watch?v=ID        # Download, summarize and cut
    vidsum -o short.mp4 talk.mp4                     # Local video with talk.vtt next to it
    vidsum -s captions.srt talk.mkv                  # Explicit caption file
    vidsum -r 0.2 talk.mp4                           # Keep about 20% of the sentences
    vidsum -p ollama -m llama3.2:3b talk.mp4         # Let an Ollama model pick sentences
    vidsum --plan-only talk.mp4                      # Print the time ranges as JSON
    vidsum talk.vtt                                  # Plan for a caption file alone
    vidsum completions bash > vidsum.bash            # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.

REQUIREMENTS:
    ffmpeg  - cutting and joining clips, embedded subtitle extraction
    yt-dlp  - only for URL inputs")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Video URL, local video file, or caption file
    #[arg(value_name = "INPUT")]
    input: Option<String>,

    /// Output video path
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Caption file to use instead of discovering one
    #[arg(short, long)]
    subtitles: Option<PathBuf>,

    /// Fraction of sentences to keep in the summary (0 < ratio <= 1)
    #[arg(short, long)]
    ratio: Option<f32>,

    /// Summarization provider to use
    #[arg(short, long, value_enum)]
    provider: Option<CliSummaryProvider>,

    /// Ollama model name
    #[arg(short, long)]
    model: Option<String>,

    /// Keep original movie & subtitle file after downloading
    #[arg(short, long)]
    keep_original_file: bool,

    /// Force overwrite of an existing output file
    #[arg(short, long)]
    force_overwrite: bool,

    /// Print the extraction plan as JSON instead of rendering the video
    #[arg(long)]
    plan_only: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        // The logger accepts everything; log::set_max_level does the filtering
        let logger = Box::new(CustomLogger::new(LevelFilter::Trace));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color code for level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "1;31",
            Level::Warn => "1;33",
            Level::Info => "1;32",
            Level::Debug => "1;36",
            Level::Trace => "1;35",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {:<5} {}\x1B[0m",
                Self::color_for_level(record.level()),
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Info until the config or the command line says otherwise
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    if let Some(Commands::Completions { shell }) = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "vidsum", &mut std::io::stdout());
        return Ok(());
    }

    run(cli).await
}

async fn run(options: CommandLineOptions) -> Result<()> {
    if let Some(cmd_log_level) = &options.log_level {
        let level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let input = options.input.clone().ok_or_else(|| {
        anyhow!("INPUT is required when no subcommand is specified")
    })?;

    let config = load_config(&options)?;

    if options.log_level.is_none() {
        log::set_max_level(config.log_level.to_level_filter());
    }

    let controller = Controller::with_config(config)?;

    let run_options = RunOptions {
        input,
        output: options.output.clone(),
        subtitles: options.subtitles.clone(),
        keep_original: options.keep_original_file,
        force_overwrite: options.force_overwrite,
        plan_only: options.plan_only,
    };

    match controller.run(run_options).await? {
        RunOutcome::Rendered(path) => info!("Highlight written to {:?}", path),
        RunOutcome::Planned(plan) => {
            println!("{}", serde_json::to_string_pretty(&plan)?);
        }
        RunOutcome::NothingToExtract => warn!("Nothing to extract, no highlight was written"),
        RunOutcome::Skipped(path) => warn!("Skipped, {:?} already exists", path),
    }

    Ok(())
}

/// Load the config file, creating it with defaults when missing, then apply CLI overrides
fn load_config(options: &CommandLineOptions) -> Result<Config> {
    let config_path = Path::new(&options.config_path);

    let mut config = if config_path.exists() {
        Config::from_file(config_path)?
    } else {
        warn!("Config file not found at '{}', creating default config.", options.config_path);
        let config = Config::default();
        config.save(config_path)?;
        config
    };

    if let Some(provider) = &options.provider {
        config.summary.provider = provider.clone().into();
    }

    if let Some(model) = &options.model {
        config.summary.ollama.model = model.clone();
    }

    if let Some(ratio) = options.ratio {
        config.summary.ratio = ratio;
    }

    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    Ok(config)
}
