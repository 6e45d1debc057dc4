/*!
 * Tests for file utility functions
 */

use anyhow::Result;
use bytes::Bytes;
use std::path::Path;
use linguanova::file_utils::{FileManager, MAX_INPUT_CHARS, OutputKind};
use linguanova::speech::AudioClip;
use crate::common;

#[test]
fn test_file_exists_withExistingFile_shouldReturnTrue() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let test_file = common::create_test_file(temp_dir.path(), "input.txt", "Hello.")?;

    assert!(FileManager::file_exists(&test_file));
    assert!(!FileManager::file_exists(temp_dir.path()));
    assert!(FileManager::dir_exists(temp_dir.path()));
    Ok(())
}

#[test]
fn test_output_path_withInputFile_shouldInsertLanguageCode() {
    let input = Path::new("/tmp/input/notes.txt");
    let output_dir = Path::new("/tmp/output");

    assert_eq!(
        FileManager::output_path(Some(input), output_dir, "fr", OutputKind::Text),
        Path::new("/tmp/output/notes.fr.txt")
    );
    assert_eq!(
        FileManager::output_path(Some(input), output_dir, "zh-cn", OutputKind::Speech),
        Path::new("/tmp/output/notes.zh-cn.mp3")
    );
}

#[test]
fn test_output_path_withoutInputFile_shouldUsePrefixes() {
    let output_dir = Path::new("out");

    assert_eq!(
        FileManager::output_path(None, output_dir, "de", OutputKind::Text),
        Path::new("out/translated_de.txt")
    );
    assert_eq!(
        FileManager::output_path(None, output_dir, "de", OutputKind::Speech),
        Path::new("out/speech_de.mp3")
    );
    assert_eq!(
        FileManager::output_path(None, output_dir, "de", OutputKind::DownloadLink),
        Path::new("out/speech_de.html")
    );
}

#[test]
fn test_is_generated_output_withTargetCodes_shouldRecognizeOwnFiles() {
    let targets = ["fr", "ja", "zh-tw"];

    assert!(FileManager::is_generated_output("notes.fr.txt", &targets));
    assert!(FileManager::is_generated_output("dir/translated_ja.txt", &targets));
    assert!(FileManager::is_generated_output("story.zh-tw.txt", &targets));
    assert!(!FileManager::is_generated_output("notes.txt", &targets));
    assert!(!FileManager::is_generated_output("chapter.12.txt", &targets));
    assert!(!FileManager::is_generated_output("translated_notes.txt", &targets));
}

#[test]
fn test_is_generated_output_withOtherLanguageSuffix_shouldTreatAsSource() {
    let targets = ["fr"];

    assert!(!FileManager::is_generated_output("brief.de.txt", &targets));
    assert!(!FileManager::is_generated_output("minutes.no.txt", &targets));
    assert!(!FileManager::is_generated_output("translated_de.txt", &targets));
}

#[test]
fn test_find_files_withNestedDirectories_shouldReturnSortedMatches() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "b.txt", "B.")?;
    common::create_test_file(temp_dir.path(), "a.TXT", "A.")?;
    common::create_test_file(temp_dir.path(), "nested/c.txt", "C.")?;
    common::create_test_file(temp_dir.path(), "image.png", "")?;

    let files = FileManager::find_files(temp_dir.path(), ".txt")?;
    let names: Vec<String> = files
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
        .collect();

    assert_eq!(names, vec!["a.TXT", "b.txt", "c.txt"]);
    Ok(())
}

#[test]
fn test_truncate_input_withLongText_shouldKeepLimit() {
    let (short, truncated) = FileManager::truncate_input("short".to_string());
    assert_eq!(short, "short");
    assert!(!truncated);

    let long = "é".repeat(MAX_INPUT_CHARS + 10);
    let (text, truncated) = FileManager::truncate_input(long);
    assert!(truncated);
    assert_eq!(text.chars().count(), MAX_INPUT_CHARS);
}

#[test]
fn test_read_input_withLongFile_shouldTruncate() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "big.txt", &"a".repeat(MAX_INPUT_CHARS + 1))?;

    assert_eq!(FileManager::read_input(&path)?.len(), MAX_INPUT_CHARS);
    Ok(())
}

#[test]
fn test_write_bytes_withMissingParent_shouldCreateDirectories() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("deep/er/speech_fr.mp3");

    FileManager::write_bytes(&path, b"ID3")?;

    assert_eq!(std::fs::read(&path)?, b"ID3");
    Ok(())
}

#[test]
fn test_audio_download_link_shouldEmbedBase64() {
    let clip = AudioClip::mp3(Bytes::from_static(b"hello"));

    let link = FileManager::audio_download_link(&clip, "es");

    assert_eq!(
        link,
        "<a href=\"data:audio/mp3;base64,aGVsbG8=\" download=\"speech_es.mp3\">Download Audio</a>"
    );
    assert!(FileManager::audio_download_page(&clip, "es").contains(&link));
}
