use anyhow::{Context, Result, anyhow};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use crate::app_config::Config;
use crate::errors::TranslationError;
use crate::file_utils::{FileManager, OutputKind};
use crate::history::{HistoryEntry, TranslationHistory};
use crate::speech::{GoogleSpeech, SpeechSynthesizer};
use crate::translation::{
    DocumentOptions, TranslationResult, TranslationService, Translator, translate_document_with_progress,
};

// @module: Application controller for text translation

/// Result of processing one input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Translations were written to these files
    Translated(Vec<PathBuf>),
    /// All outputs already existed
    Skipped,
    /// The input held no text
    Empty,
}

/// Counts reported at the end of a folder run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FolderSummary {
    pub processed: usize,
    pub skipped: usize,
    pub empty: usize,
    pub errors: usize,
    /// Files left out because they are outputs of an earlier run
    pub ignored: usize,
}

/// Main application controller for document translation
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Chunk translator
    translator: Arc<dyn Translator>,
    // @field: Config-driven service behind `translator`, when built from config
    service: Option<Arc<TranslationService>>,
    // @field: Speech backend, when speech output is enabled
    speech: Option<Arc<dyn SpeechSynthesizer>>,
    // @field: Recent translations
    history: Mutex<TranslationHistory>,
    // @field: Whether to draw progress bars
    show_progress: bool,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        let service = Arc::new(
            TranslationService::new(config.translation.clone()).context("Failed to create translation service")?,
        );

        let speech: Option<Arc<dyn SpeechSynthesizer>> = if config.speech.enabled {
            Some(Arc::new(GoogleSpeech::new(
                config.speech.endpoint.clone(),
                config.speech.timeout_secs,
                config.speech.max_chars_per_request,
            )))
        } else {
            None
        };

        let translator: Arc<dyn Translator> = service.clone();
        let mut controller = Self::with_components(config, translator, speech);
        controller.service = Some(service);
        Ok(controller)
    }

    /// Create a controller around explicit translation and speech backends
    pub fn with_components(
        config: Config,
        translator: Arc<dyn Translator>,
        speech: Option<Arc<dyn SpeechSynthesizer>>,
    ) -> Self {
        Self {
            config,
            translator,
            service: None,
            speech,
            history: Mutex::new(TranslationHistory::new()),
            show_progress: true,
        }
    }

    /// Enable or disable progress bars
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Snapshot of the recent translations
    pub fn history(&self) -> TranslationHistory {
        self.history.lock().clone()
    }

    /// Check that the configured provider answers
    ///
    /// A failure is only logged; the first chunk request reports it again.
    pub async fn test_connection(&self) {
        let Some(service) = &self.service else {
            return;
        };

        match service.test_connection().await {
            Ok(()) => debug!("{} is reachable", self.config.translation.provider.display_name()),
            Err(e) => warn!(
                "Could not reach {}: {}",
                self.config.translation.provider.display_name(),
                e
            ),
        }
    }

    /// Backend usage so far, when the controller owns a translation service
    pub fn usage_summary(&self) -> Option<String> {
        self.service.as_ref().map(|service| service.usage().summary())
    }

    fn document_options(&self) -> DocumentOptions {
        let common = &self.config.translation.common;
        DocumentOptions::default()
            .with_max_chars(common.max_chars_per_chunk)
            .with_separator(common.chunk_separator.clone())
            .with_concurrent_requests(common.concurrent_requests)
    }

    fn progress_bar(&self) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }

        let progress_bar = ProgressBar::new(0);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} chunks ({percent}%) {msg} {eta}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(style.progress_chars("█▓▒░"));
        progress_bar
    }

    /// Translate `text` into every configured target language
    ///
    /// Returns `None` when there is nothing to translate. Successful
    /// translations are recorded in the history.
    pub async fn translate_text(&self, text: &str) -> Result<Option<TranslationResult>> {
        let start_time = Instant::now();
        let progress_bar = self.progress_bar();
        progress_bar.set_message("Translating");

        info!(
            "LinguaNova: {} ({} -> {})",
            self.config.translation.provider.display_name(),
            self.config.source_language,
            self.config.target_languages.join(", ")
        );

        let outcome = translate_document_with_progress(
            self.translator.as_ref(),
            text,
            &self.config.source_language,
            self.config.target_languages.as_slice(),
            &self.document_options(),
            |completed, total| {
                progress_bar.set_length(total as u64);
                progress_bar.set_position(completed as u64);
            },
        )
        .await;

        progress_bar.finish_and_clear();

        match outcome {
            Ok(result) => {
                info!(
                    "Translated {} characters into {} language(s) in {:.1}s",
                    text.chars().count(),
                    result.len(),
                    start_time.elapsed().as_secs_f64()
                );
                self.history
                    .lock()
                    .push(HistoryEntry::new(self.config.source_language.clone(), text, result.clone()));
                Ok(Some(result))
            }
            Err(TranslationError::EmptyInput) => {
                warn!("Please enter some text to translate.");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Translate text that did not come from a file and write the outputs
    pub async fn run_text(&self, text: String, output_dir: &Path) -> Result<RunOutcome> {
        let (text, truncated) = FileManager::truncate_input(text);
        if truncated {
            warn!(
                "Input is longer than {} characters, the rest is ignored",
                crate::file_utils::MAX_INPUT_CHARS
            );
        }

        match self.translate_text(&text).await? {
            Some(result) => Ok(RunOutcome::Translated(self.write_outputs(None, output_dir, &result).await?)),
            None => Ok(RunOutcome::Empty),
        }
    }

    /// Translate one text file, writing outputs into `output_dir`
    pub async fn run_file(&self, input_file: &Path, output_dir: &Path, force_overwrite: bool) -> Result<RunOutcome> {
        if !FileManager::file_exists(input_file) {
            return Err(anyhow!("Input file does not exist: {:?}", input_file));
        }

        if !force_overwrite && self.outputs_exist(input_file, output_dir) {
            warn!(
                "Skipping {:?}, translations already exist (use -f to force overwrite)",
                input_file
            );
            return Ok(RunOutcome::Skipped);
        }

        let text = FileManager::read_input(input_file)?;
        match self.translate_text(&text).await? {
            Some(result) => Ok(RunOutcome::Translated(
                self.write_outputs(Some(input_file), output_dir, &result).await?,
            )),
            None => Ok(RunOutcome::Empty),
        }
    }

    /// Translate every `.txt` file under `input_dir`, next to its source
    pub async fn run_folder(&self, input_dir: &Path, force_overwrite: bool) -> Result<FolderSummary> {
        let start_time = Instant::now();

        if !FileManager::dir_exists(input_dir) {
            return Err(anyhow!("Input directory does not exist: {:?}", input_dir));
        }

        let target_codes = self.target_codes();
        let mut summary = FolderSummary::default();
        let mut text_files: Vec<PathBuf> = Vec::new();
        for path in FileManager::find_files(input_dir, "txt")? {
            if FileManager::is_generated_output(&path, target_codes.as_slice()) {
                info!("Ignoring {:?}, it is a translation output", path);
                summary.ignored += 1;
            } else {
                text_files.push(path);
            }
        }

        if text_files.is_empty() {
            return Err(anyhow!("No text files to translate found in directory: {:?}", input_dir));
        }

        let folder_pb = if self.show_progress {
            let folder_pb = ProgressBar::new(text_files.len() as u64);
            let style = ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar());
            folder_pb.set_style(style.progress_chars("█▓▒░"));
            folder_pb
        } else {
            ProgressBar::hidden()
        };

        for text_file in &text_files {
            let file_name = text_file
                .file_name()
                .map(|f| f.to_string_lossy().to_string())
                .unwrap_or_else(|| "unknown".to_string());
            folder_pb.set_message(format!("Processing: {}", file_name));

            let output_dir = text_file.parent().unwrap_or(input_dir);
            match self.run_file(text_file, output_dir, force_overwrite).await {
                Ok(RunOutcome::Translated(_)) => summary.processed += 1,
                Ok(RunOutcome::Skipped) => summary.skipped += 1,
                Ok(RunOutcome::Empty) => summary.empty += 1,
                Err(e) => {
                    error!("Error processing file {}: {:#}", file_name, e);
                    summary.errors += 1;
                }
            }

            folder_pb.inc(1);
        }

        folder_pb.finish_and_clear();

        info!(
            "Folder processing completed in {:.1}s: {} processed, {} skipped, {} empty, {} errors, {} outputs ignored",
            start_time.elapsed().as_secs_f64(),
            summary.processed,
            summary.skipped,
            summary.empty,
            summary.errors,
            summary.ignored
        );

        Ok(summary)
    }

    /// Configured targets as the codes used in output file names
    fn target_codes(&self) -> Vec<String> {
        self.config
            .target_languages
            .iter()
            .map(|language| crate::language_utils::resolve_language(language).unwrap_or_else(|_| language.clone()))
            .collect()
    }

    /// Whether every text output for `input_file` is already on disk
    fn outputs_exist(&self, input_file: &Path, output_dir: &Path) -> bool {
        self.target_codes()
            .iter()
            .all(|code| FileManager::output_path(Some(input_file), output_dir, code, OutputKind::Text).exists())
    }

    /// Write the text, and speech when enabled, for every language
    ///
    /// A failed speech request only costs that language's audio.
    async fn write_outputs(
        &self,
        input_file: Option<&Path>,
        output_dir: &Path,
        result: &TranslationResult,
    ) -> Result<Vec<PathBuf>> {
        FileManager::ensure_dir(output_dir)?;
        let mut written = Vec::new();

        for (language, text) in result.iter() {
            let text_path = FileManager::output_path(input_file, output_dir, language, OutputKind::Text);
            FileManager::write_to_file(&text_path, text)?;
            debug!("Wrote {:?}", text_path);
            written.push(text_path);

            let Some(speech) = &self.speech else {
                continue;
            };

            match speech.synthesize(text, language).await {
                Ok(clip) => {
                    let audio_path = FileManager::output_path(input_file, output_dir, language, OutputKind::Speech);
                    FileManager::write_bytes(&audio_path, &clip.data)?;
                    written.push(audio_path);

                    if self.config.speech.write_download_link {
                        let link_path =
                            FileManager::output_path(input_file, output_dir, language, OutputKind::DownloadLink);
                        FileManager::write_to_file(&link_path, &FileManager::audio_download_page(&clip, language))?;
                        written.push(link_path);
                    }
                }
                Err(e) => warn!("Speech synthesis for '{}' failed, keeping the text only: {}", language, e),
            }
        }

        info!("Wrote {} file(s) to {:?}", written.len(), output_dir);
        Ok(written)
    }
}
