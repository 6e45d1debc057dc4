// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, info};
use std::io::{IsTerminal, Read, Write};
use std::path::{Path, PathBuf};

use linguanova::app_config::{self, Config, TranslationProvider};
use linguanova::app_controller::{Controller, RunOutcome};
use linguanova::language_utils;

/// CLI Wrapper for TranslationProvider to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliTranslationProvider {
    Google,
    Ollama,
    Anthropic,
}

impl From<CliTranslationProvider> for TranslationProvider {
    fn from(cli_provider: CliTranslationProvider) -> Self {
        match cli_provider {
            CliTranslationProvider::Google => TranslationProvider::Google,
            CliTranslationProvider::Ollama => TranslationProvider::Ollama,
            CliTranslationProvider::Anthropic => TranslationProvider::Anthropic,
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
    /// Translate text, a text file, or a folder of text files (default command)
    Translate(TranslateArgs),

    /// List the supported languages and their codes
    Languages,

    /// Generate shell completions for linguanova
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug)]
struct TranslateArgs {
    /// Input .txt file, directory of .txt files, or '-' for stdin
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// Text to translate instead of reading a file
    #[arg(long, conflicts_with = "input_path")]
    text: Option<String>,

    /// Target language code or name; repeat or separate with commas
    #[arg(short, long = "target-language", value_delimiter = ',')]
    target_languages: Vec<String>,

    /// Source language code or name, or 'auto'
    #[arg(short, long)]
    source_language: Option<String>,

    /// Translation provider to use
    #[arg(short, long, value_enum)]
    provider: Option<CliTranslationProvider>,

    /// Model name to use for LLM providers
    #[arg(short, long)]
    model: Option<String>,

    /// Directory for output files (defaults to the input's directory, or '.')
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Also synthesize speech for each translation
    #[arg(long)]
    speech: bool,

    /// Maximum characters per translation request
    #[arg(long)]
    max_chars: Option<usize>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Print the recent translation history when done
    #[arg(long)]
    history: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// LinguaNova - translate long text into several languages at once
///
/// Splits text into sentence-aligned chunks, translates every chunk into each
/// target language, and optionally produces spoken audio of the result.
#[derive(Parser, Debug)]
#[command(name = "linguanova")]
#[command(version)]
#[command(about = "Chunked multi-language text translator")]
#[command(args_conflicts_with_subcommands = true)]
#[command(long_about = "LinguaNova translates long text into one or more languages.

EXAMPLES:
    linguanova notes.txt -t fr                      # Translate a file to French
    linguanova notes.txt -t fr,de,ja                # Several languages at once
    linguanova --text \"Hello world.\" -t es          # Translate inline text
    cat notes.txt | linguanova -t it                # Translate stdin
    linguanova -s en -t de --speech notes.txt       # Also write speech_de audio
    linguanova -p ollama -m llama3.2:3b notes.txt   # Use a local LLM
    linguanova /docs/ -t fr                         # Translate every .txt in a folder
    linguanova languages                            # List language codes
    linguanova completions bash > linguanova.bash   # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.

SUPPORTED PROVIDERS:
    google    - Public Google Translate endpoint (default, no key required)
    ollama    - Local Ollama server (default: llama3.2:3b)
    anthropic - Anthropic Claude API (requires API key)")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    translate: TranslateArgs,
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

    // @returns: ANSI color and marker for a log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("\x1B[1;31m", "✗"),
            Level::Warn => ("\x1B[1;33m", "!"),
            Level::Info => ("\x1B[1;32m", " "),
            Level::Debug => ("\x1B[1;36m", "·"),
            Level::Trace => ("\x1B[1;35m", "…"),
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
            let (color, marker) = Self::style_for_level(record.level());
            let _ = writeln!(std::io::stderr(), "{}{} {} {}\x1B[0m", color, now, marker, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // The logger is installed with Trace and filtered via set_max_level once
    // the configuration is known
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "linguanova", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Languages) => {
            print_languages();
            Ok(())
        }
        Some(Commands::Translate(args)) => run_translate(args).await,
        None => run_translate(cli.translate).await,
    }
}

fn print_languages() {
    let mut stdout = std::io::stdout();
    for (code, name) in language_utils::supported_languages() {
        let _ = writeln!(stdout, "{:<8} {}", code, name);
    }
}

/// Apply command line overrides on top of the loaded configuration
fn apply_overrides(config: &mut Config, options: &TranslateArgs) {
    if let Some(provider) = &options.provider {
        config.translation.provider = provider.clone().into();
    }

    if let Some(model) = &options.model {
        config.translation.active_provider_config_mut().model = model.clone();
    }

    if let Some(source_language) = &options.source_language {
        config.source_language = source_language.clone();
    }

    if !options.target_languages.is_empty() {
        config.target_languages = options.target_languages.clone();
    }

    if let Some(max_chars) = options.max_chars {
        config.translation.common.max_chars_per_chunk = max_chars;
    }

    if options.speech {
        config.speech.enabled = true;
    }

    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }
}

async fn run_translate(options: TranslateArgs) -> Result<()> {
    // Apply a command line log level before the config is read
    if let Some(cmd_log_level) = &options.log_level {
        let config_log_level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(config_log_level.to_level_filter());
    }

    let mut config = Config::load_or_create(&options.config_path)?;
    apply_overrides(&mut config, &options);
    log::set_max_level(config.log_level.to_level_filter());

    config.validate().context("Configuration validation failed")?;

    let controller = Controller::with_config(config)?;
    controller.test_connection().await;

    if let Some(text) = &options.text {
        let output_dir = options.output_dir.clone().unwrap_or_else(|| PathBuf::from("."));
        let outcome = controller.run_text(text.clone(), &output_dir).await?;
        print_latest_translation(&controller, &outcome);
    } else {
        match &options.input_path {
            Some(path) if path.as_os_str() == "-" => run_stdin(&controller, &options).await?,
            Some(path) if path.is_file() => {
                let output_dir = match &options.output_dir {
                    Some(dir) => dir.clone(),
                    None => path.parent().unwrap_or(Path::new(".")).to_path_buf(),
                };
                controller.run_file(path, &output_dir, options.force_overwrite).await?;
            }
            Some(path) if path.is_dir() => {
                controller.run_folder(path, options.force_overwrite).await?;
            }
            Some(path) => return Err(anyhow!("Input path does not exist: {:?}", path)),
            None if !std::io::stdin().is_terminal() => run_stdin(&controller, &options).await?,
            None => {
                return Err(anyhow!(
                    "No input given: pass a file or directory, --text, or pipe text on stdin"
                ));
            }
        }
    }

    if let Some(usage) = controller.usage_summary() {
        info!("Usage: {}", usage);
    }

    if options.history {
        let history = controller.history();
        info!("Recent translations ({} of {}):", history.len(), history.capacity());
        for entry in history.iter() {
            info!("  {}", entry.summary());
        }
    }

    Ok(())
}

async fn run_stdin(controller: &Controller, options: &TranslateArgs) -> Result<()> {
    let mut text = String::new();
    std::io::stdin()
        .read_to_string(&mut text)
        .context("Failed to read text from stdin")?;

    let output_dir = options.output_dir.clone().unwrap_or_else(|| PathBuf::from("."));
    let outcome = controller.run_text(text, &output_dir).await?;
    print_latest_translation(controller, &outcome);
    Ok(())
}

/// Print the translation that was just produced to stdout
fn print_latest_translation(controller: &Controller, outcome: &RunOutcome) {
    if !matches!(outcome, RunOutcome::Translated(_)) {
        return;
    }

    let history = controller.history();
    let Some(entry) = history.latest() else {
        return;
    };

    let mut stdout = std::io::stdout();
    for (language, text) in entry.result.iter() {
        let name = language_utils::get_language_name(language).unwrap_or_else(|_| language.to_string());
        let _ = writeln!(stdout, "=== {} ({}) ===\n{}\n", name, language, text);
    }
}
