// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, info, warn};
use std::io::Write;
use std::path::PathBuf;

use srtcheck::app_config::{self, Config};
use srtcheck::app_controller::Controller;
use srtcheck::checks::RuleRegistry;
use srtcheck::report::CheckReport;

const DEFAULT_CONFIG_PATH: &str = "srtcheck.json";

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
    /// Check every subtitle file in a folder (default command)
    Check(CheckArgs),

    /// List the available rules
    Rules,

    /// Write the default configuration file
    InitConfig {
        /// Configuration file path
        #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
        config_path: String,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Generate shell completions for srtcheck
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct CheckArgs {
    /// Folder containing .srt files named like `episode_ENG.srt`
    #[arg(value_name = "FOLDER")]
    input_dir: PathBuf,

    /// Configuration file path
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Include subdirectories
    #[arg(short, long)]
    recursive: bool,

    /// Print issue counts per language and rule
    #[arg(short, long)]
    stats: bool,

    /// Save the results as a text report
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Save the results as JSON
    #[arg(long, value_name = "FILE")]
    json: Option<PathBuf>,
}

/// srtcheck - Subtitle localization QC
///
/// Checks localized SubRip files against per-language style rules: line
/// length, line count, punctuation, spacing, brackets and script conventions.
#[derive(Parser, Debug)]
#[command(name = "srtcheck")]
#[command(version)]
#[command(about = "Style and formatting checks for localized subtitle files")]
#[command(long_about = "srtcheck checks localized .srt files against per-language style rules.

The language of each file is taken from its name: the part after the last
underscore, e.g. `ep01_episode_subtitle_eng.srt` is checked as ENG.
Supported languages: KOR, ENG, JPN, CHN, SPA, VIE, IND, THA.

EXAMPLES:
    srtcheck subs/                              # Check a folder using srtcheck.json
    srtcheck check subs/ --stats                # Also print counts per language
    srtcheck subs/ -o results.txt               # Save a text report
    srtcheck subs/ --json results.json          # Save a JSON report
    srtcheck rules                              # List available rules
    srtcheck init-config --force                # Rewrite the default configuration
    srtcheck completions bash > srtcheck.bash   # Generate bash completions

CONFIGURATION:
    Configuration is stored in srtcheck.json by default. You can specify a
    different file with --config-path. If the file doesn't exist, a default
    one is created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Folder containing .srt files named like `episode_ENG.srt`
    #[arg(value_name = "FOLDER")]
    input_dir: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Include subdirectories
    #[arg(short, long)]
    recursive: bool,

    /// Print issue counts per language and rule
    #[arg(short, long)]
    stats: bool,

    /// Save the results as a text report
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Save the results as JSON
    #[arg(long, value_name = "FILE")]
    json: Option<PathBuf>,
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
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Color escape and emoji for a log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("\x1B[1;31m", "❌ "),
            Level::Warn => ("\x1B[1;33m", "🚧 "),
            Level::Info => ("\x1B[1;32m", " "),
            Level::Debug => ("\x1B[1;36m", "🔍 "),
            Level::Trace => ("\x1B[1;35m", "📋 "),
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
            let (color, emoji) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {} {}\x1B[0m", color, now, emoji, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // The logger accepts everything; the max level is adjusted once the
    // config is known
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "srtcheck", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Rules) => {
            print_rules();
            Ok(())
        }
        Some(Commands::InitConfig { config_path, force }) => init_config(&config_path, force),
        Some(Commands::Check(args)) => run_check(args).await,
        None => {
            // Default behavior - use top-level args
            let input_dir = cli.input_dir.ok_or_else(|| {
                anyhow!("FOLDER is required when no subcommand is specified")
            })?;

            let check_args = CheckArgs {
                input_dir,
                config_path: cli.config_path,
                log_level: cli.log_level,
                recursive: cli.recursive,
                stats: cli.stats,
                output: cli.output,
                json: cli.json,
            };
            run_check(check_args).await
        }
    }
}

async fn run_check(options: CheckArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        let log_level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(log_level.to_level_filter());
    }

    let (mut config, _created) = Config::load_or_create(&options.config_path)?;

    if options.recursive {
        config.recursive = true;
    }
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    config.validate()
        .context("Configuration validation failed")?;

    // If log level was not set via command line, update it from config now
    if options.log_level.is_none() {
        log::set_max_level(config.log_level.to_level_filter());
    }

    let controller = Controller::with_config(config)?;
    let report = controller.check_folder(&options.input_dir).await?;

    print_report(&report);
    if options.stats {
        print_statistics(&report);
    }

    if let Some(path) = &options.output {
        report.save_text(path)?;
        info!("Results saved to {}", path.display());
    }
    if let Some(path) = &options.json {
        report.save_json(path)?;
        info!("Results saved to {}", path.display());
    }

    Ok(())
}

fn init_config(config_path: &str, force: bool) -> Result<()> {
    if std::path::Path::new(config_path).exists() && !force {
        warn!("Config file already exists at '{}' (use --force to overwrite)", config_path);
        return Ok(());
    }

    Config::default().save(config_path)?;
    info!("Default config written to {}", config_path);
    Ok(())
}

fn print_rules() {
    let registry = RuleRegistry::default();

    for check in registry.iter() {
        let languages: Vec<&str> = check.default_languages().iter().map(|l| l.as_str()).collect();
        println!("{:<28} {}", check.name(), check.description());
        println!("{:<28} default: {}", "", languages.join(", "));
        if !check.aliases().is_empty() {
            println!("{:<28} aliases: {}", "", check.aliases().join(", "));
        }
    }
}

fn print_report(report: &CheckReport) {
    if report.is_empty() {
        println!("No issues found.");
        return;
    }

    for (language, violations) in &report.languages {
        println!("== {} ({}) ==", language, violations.len());
        for violation in violations {
            println!(
                "  {}  {}  [{}] {}",
                violation.file, violation.start_tc, violation.error_type, violation.detail
            );
            println!("      {}", violation.subtitle_text.replace('\n', " / "));
        }
    }

    if !report.parse_errors.is_empty() {
        println!("== PARSE_ERROR ({}) ==", report.parse_errors.len());
        for failure in &report.parse_errors {
            println!("  {}  {}", failure.file, failure.message);
        }
    }
}

fn print_statistics(report: &CheckReport) {
    println!();
    println!("Total: {}", report.total());
    for stats in report.statistics() {
        println!("{}: {}", stats.language, stats.total);
        for (rule, count) in &stats.by_rule {
            println!("  {}: {}", rule, count);
        }
    }
    if !report.parse_errors.is_empty() {
        println!("PARSE_ERROR: {}", report.parse_errors.len());
    }
}
