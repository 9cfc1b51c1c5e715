use anyhow::Result;
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use std::path::Path;
use std::sync::Arc;

use crate::app_config::{Config, Settings};
use crate::checks::{FailurePolicy, LogObserver, RuleEngine, RuleRegistry, Violation};
use crate::errors::AppError;
use crate::file_utils::FileManager;
use crate::language_utils::{language_from_file_name, LanguageCode};
use crate::report::CheckReport;
use crate::subtitle_processor::SubtitleFile;

// @module: Application controller for folder checks

/// What happened to one file during a folder check
#[derive(Debug, Clone, PartialEq)]
pub enum FileOutcome {
    /// The file was parsed and checked
    Checked {
        language: LanguageCode,
        violations: Vec<Violation>,
    },
    /// The file could not be parsed
    ParseFailed {
        message: String,
    },
    /// The file was not checked
    Skipped {
        reason: String,
    },
}

/// Main application controller for subtitle checks
pub struct Controller {
    // @field: App configuration
    config: Config,

    // @field: Shared by every file task
    engine: RuleEngine,

    // @field: Settings handed to blocking tasks without cloning per file
    settings: Arc<Settings>,

    // @field: Draw a progress bar during folder runs
    show_progress: bool,
}

impl Controller {
    /// Create a new controller for test purposes with default configuration
    pub fn new_for_test() -> Result<Self> {
        Ok(Self::with_config(Config::default())?.without_progress())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        let engine = RuleEngine::new(RuleRegistry::default(), config.profiles.clone())
            .with_observer(Arc::new(LogObserver))
            .with_failure_policy(FailurePolicy::Isolate);
        let settings = Arc::new(config.settings.clone());

        Ok(Self {
            config,
            engine,
            settings,
            show_progress: true,
        })
    }

    /// Disable the progress bar
    pub fn without_progress(mut self) -> Self {
        self.show_progress = false;
        self
    }

    /// Configuration in use
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Engine in use
    pub fn engine(&self) -> &RuleEngine {
        &self.engine
    }

    /// Check one file synchronously
    ///
    /// The language comes from the file name. Files whose language is not
    /// supported, or that have no rule enabled for their language, are
    /// skipped before being read.
    pub fn check_file<P: AsRef<Path>>(&self, path: P) -> FileOutcome {
        Self::check_path(&self.engine, &self.settings, path.as_ref())
    }

    fn check_path(engine: &RuleEngine, settings: &Settings, path: &Path) -> FileOutcome {
        let file_name = FileManager::file_name(path);
        let code = language_from_file_name(&file_name);

        let Some(language) = LanguageCode::parse(&code) else {
            return FileOutcome::Skipped {
                reason: format!("unsupported language code '{}'", code),
            };
        };

        if engine.active_rules(settings, &code).is_empty() {
            return FileOutcome::Skipped {
                reason: format!("no rules enabled for {}", language),
            };
        }

        let subtitles = match SubtitleFile::open(path) {
            Ok(subtitles) => subtitles,
            Err(e) => {
                return FileOutcome::ParseFailed { message: e.to_string() };
            }
        };

        let violations = engine.check(&subtitles.cues, &code, &file_name, settings);
        debug!("{}: {} cue(s), {} issue(s)", file_name, subtitles.cues.len(), violations.len());

        FileOutcome::Checked { language, violations }
    }

    /// Check every `.srt` file in a folder
    ///
    /// Files are checked concurrently on the blocking pool; results are put
    /// back in file order before being grouped by language. A file that
    /// fails to parse ends up in the report's parse errors and does not stop
    /// the others.
    pub async fn check_folder<P: AsRef<Path>>(&self, input_dir: P) -> Result<CheckReport> {
        let input_dir = input_dir.as_ref();
        let start_time = std::time::Instant::now();

        if !FileManager::dir_exists(input_dir) {
            return Err(AppError::File(format!("Input directory does not exist: {:?}", input_dir)).into());
        }

        let files = FileManager::find_files(input_dir, "srt", self.config.recursive)?;
        if files.is_empty() {
            warn!("No subtitle files found in directory: {:?}", input_dir);
            return Ok(CheckReport::new());
        }

        info!("Checking {} subtitle file(s) in {:?}", files.len(), input_dir);

        let progress_bar = self.create_progress_bar(files.len() as u64);
        let concurrency = self.config.concurrent_files.max(1);

        let mut outcomes = stream::iter(files.into_iter().enumerate())
            .map(|(index, path)| {
                let engine = self.engine.clone();
                let settings = Arc::clone(&self.settings);
                let progress_bar = progress_bar.clone();
                let file_name = FileManager::file_name(&path);

                async move {
                    progress_bar.set_message(file_name.clone());
                    let outcome = tokio::task::spawn_blocking(move || {
                        Self::check_path(&engine, &settings, &path)
                    })
                    .await
                    .unwrap_or_else(|e| {
                        error!("Checking {} failed: {}", file_name, e);
                        FileOutcome::ParseFailed {
                            message: format!("internal error: {}", e),
                        }
                    });
                    progress_bar.inc(1);

                    (index, file_name, outcome)
                }
            })
            .buffer_unordered(concurrency)
            .collect::<Vec<_>>()
            .await;

        // Restore file order
        outcomes.sort_by_key(|(index, _, _)| *index);

        let mut report = CheckReport::new();
        let mut skip_count = 0;

        for (_, file_name, outcome) in outcomes {
            match outcome {
                FileOutcome::Checked { language, violations } => {
                    report.add_violations(language, violations);
                }
                FileOutcome::ParseFailed { message } => {
                    warn!("Failed to parse {}: {}", file_name, message);
                    report.add_parse_failure(file_name, message);
                }
                FileOutcome::Skipped { reason } => {
                    debug!("Skipping {}: {}", file_name, reason);
                    skip_count += 1;
                }
            }
        }

        progress_bar.finish_and_clear();

        info!(
            "Folder check completed in {:.2}s: {} issue(s), {} parse error(s), {} file(s) skipped",
            start_time.elapsed().as_secs_f64(),
            report.violation_count(),
            report.parse_errors.len(),
            skip_count
        );

        Ok(report)
    }

    fn create_progress_bar(&self, len: u64) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }

        let progress_bar = ProgressBar::new(len);
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(template_result.progress_chars("█▓▒░"));
        progress_bar
    }
}
