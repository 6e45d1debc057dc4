use anyhow::{Context, Result};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use log::warn;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::speech::AudioClip;

// @module: File and directory utilities

/// Longest input accepted, in characters; the rest is dropped
pub const MAX_INPUT_CHARS: usize = 100_000;

/// Kind of file written for one target language
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    /// Translated text
    Text,
    /// Synthesized speech
    Speech,
    /// HTML page embedding the speech as a download link
    DownloadLink,
}

impl OutputKind {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Speech => "mp3",
            Self::DownloadLink => "html",
        }
    }

    /// File name prefix used when the input has no file name
    fn prefix(&self) -> &'static str {
        match self {
            Self::Text => "translated",
            Self::Speech | Self::DownloadLink => "speech",
        }
    }
}

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.as_os_str().is_empty() && !path.exists() {
            fs::create_dir_all(path).with_context(|| format!("Failed to create directory: {:?}", path))?;
        }
        Ok(())
    }

    // @generates: Output path for one language of a translated file
    // @params: input_file, output_dir, target_language, extension
    pub fn generate_output_path<P1: AsRef<Path>, P2: AsRef<Path>>(
        input_file: P1,
        output_dir: P2,
        target_language: &str,
        extension: &str,
    ) -> PathBuf {
        let stem = input_file.as_ref().file_stem().unwrap_or_default();
        let output_filename = format!("{}.{}.{}", stem.to_string_lossy(), target_language, extension);
        output_dir.as_ref().join(output_filename)
    }

    /// Output path for text that did not come from a file
    ///
    /// Produces `translated_<lang>.txt`, `speech_<lang>.mp3` and
    /// `speech_<lang>.html`.
    pub fn standalone_output_path<P: AsRef<Path>>(output_dir: P, target_language: &str, kind: OutputKind) -> PathBuf {
        output_dir
            .as_ref()
            .join(format!("{}_{}.{}", kind.prefix(), target_language, kind.extension()))
    }

    /// Output path for `kind`, named after `input_file` when there is one
    pub fn output_path<P: AsRef<Path>>(
        input_file: Option<&Path>,
        output_dir: P,
        target_language: &str,
        kind: OutputKind,
    ) -> PathBuf {
        match input_file {
            Some(input) => Self::generate_output_path(input, output_dir, target_language, kind.extension()),
            None => Self::standalone_output_path(output_dir, target_language, kind),
        }
    }

    /// Find files with a specific extension in a directory
    pub fn find_files<P: AsRef<Path>>(dir: P, extension: &str) -> Result<Vec<PathBuf>> {
        let mut result = Vec::new();
        let normalized_ext = extension.trim_start_matches('.');

        for entry in WalkDir::new(dir.as_ref()).follow_links(true).sort_by_file_name() {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if path.is_file()
                && path
                    .extension()
                    .is_some_and(|ext| ext.to_string_lossy().eq_ignore_ascii_case(normalized_ext))
            {
                result.push(path.to_path_buf());
            }
        }

        Ok(result)
    }

    /// Whether `path` looks like a file this tool wrote for one of `target_languages`
    ///
    /// Matches `<stem>.<lang>.txt` and `translated_<lang>.txt` where `<lang>`
    /// is one of the given codes, so folder runs do not translate their own
    /// outputs. Sources such as `brief.de.txt` stay inputs unless `de` is a
    /// target.
    pub fn is_generated_output<P: AsRef<Path>, S: AsRef<str>>(path: P, target_languages: &[S]) -> bool {
        let Some(stem) = path.as_ref().file_stem().map(|s| s.to_string_lossy().to_string()) else {
            return false;
        };
        let is_target = |code: &str| target_languages.iter().any(|target| target.as_ref() == code);

        if let Some(code) = stem.strip_prefix("translated_") {
            if is_target(code) {
                return true;
            }
        }

        stem.rsplit_once('.').is_some_and(|(_, code)| is_target(code))
    }

    /// Cut `text` to at most `MAX_INPUT_CHARS` characters
    ///
    /// Returns the text and whether anything was dropped.
    pub fn truncate_input(text: String) -> (String, bool) {
        match text.char_indices().nth(MAX_INPUT_CHARS) {
            Some((byte_index, _)) => (text[..byte_index].to_string(), true),
            None => (text, false),
        }
    }

    /// Read an input text file, truncated to `MAX_INPUT_CHARS`
    pub fn read_input<P: AsRef<Path>>(path: P) -> Result<String> {
        let content = Self::read_to_string(&path)?;
        let (content, truncated) = Self::truncate_input(content);
        if truncated {
            warn!(
                "Input {:?} is longer than {} characters, the rest is ignored",
                path.as_ref(),
                MAX_INPUT_CHARS
            );
        }
        Ok(content)
    }

    /// Read a file to a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        fs::read_to_string(&path).with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Write a string to a file
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        Self::write_bytes(path, content.as_bytes())
    }

    /// Write raw bytes to a file, creating parent directories
    pub fn write_bytes<P: AsRef<Path>>(path: P, content: &[u8]) -> Result<()> {
        if let Some(parent) = path.as_ref().parent() {
            Self::ensure_dir(parent)?;
        }

        fs::write(&path, content).with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))?;

        Ok(())
    }

    /// HTML anchor that downloads `clip` from an inline data URI
    pub fn audio_download_link(clip: &AudioClip, target_language: &str) -> String {
        format!(
            "<a href=\"data:audio/mp3;base64,{}\" download=\"speech_{}.mp3\">Download Audio</a>",
            BASE64.encode(&clip.data),
            target_language
        )
    }

    /// Small HTML page wrapping the download anchor
    pub fn audio_download_page(clip: &AudioClip, target_language: &str) -> String {
        format!(
            "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>Speech ({lang})</title></head>\n<body>\n{link}\n</body>\n</html>\n",
            lang = target_language,
            link = Self::audio_download_link(clip, target_language)
        )
    }
}
