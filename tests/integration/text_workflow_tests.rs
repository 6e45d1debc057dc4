/*!
 * End-to-end tests for translating text and single files
 */

use anyhow::Result;
use std::fs;
use linguanova::app_controller::RunOutcome;
use linguanova::providers::mock::{MockSpeech, MockTranslator};
use crate::common;

#[test]
fn test_translate_text_fromSyncContext_shouldReturnResultAndRecordHistory() {
    let translator = MockTranslator::working();
    let controller = common::mock_controller(common::test_config(&["es", "it"]), &translator, None);

    let result = tokio_test::block_on(async { controller.translate_text("Good night. Sleep well.").await });

    let result = result.unwrap().expect("non-empty input should be translated");
    assert_eq!(result.get("es"), Some("[es] Good night. Sleep well."));
    assert_eq!(result.get("it"), Some("[it] Good night. Sleep well."));
    assert_eq!(controller.history().latest().unwrap().input_chars, 23);
}

#[tokio::test]
async fn test_run_text_withTwoTargets_shouldWriteOneFilePerLanguage() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let translator = MockTranslator::working();
    let controller = common::mock_controller(common::test_config(&["fr", "German"]), &translator, None);

    let outcome = controller.run_text("Good morning.".to_string(), temp_dir.path()).await?;

    let fr_path = temp_dir.path().join("translated_fr.txt");
    let de_path = temp_dir.path().join("translated_de.txt");
    assert_eq!(outcome, RunOutcome::Translated(vec![fr_path.clone(), de_path.clone()]));
    assert_eq!(fs::read_to_string(&fr_path)?, "[fr] Good morning.");
    assert_eq!(fs::read_to_string(&de_path)?, "[de] Good morning.");

    let history = controller.history();
    assert_eq!(history.len(), 1);
    assert_eq!(history.latest().unwrap().target_languages(), vec!["fr", "de"]);
    Ok(())
}

#[tokio::test]
async fn test_run_text_withSpeech_shouldWriteAudioAndDownloadLink() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let translator = MockTranslator::working();
    let speech = MockSpeech::working();
    let mut config = common::test_config(&["es"]);
    config.speech.enabled = true;
    config.speech.write_download_link = true;
    let controller = common::mock_controller(config, &translator, Some(&speech));

    controller.run_text("Hello there.".to_string(), temp_dir.path()).await?;

    let audio = fs::read(temp_dir.path().join("speech_es.mp3"))?;
    assert_eq!(audio, b"ID3 es:[es] Hello there.");
    let page = fs::read_to_string(temp_dir.path().join("speech_es.html"))?;
    assert!(page.contains("data:audio/mp3;base64,"));
    assert!(page.contains("download=\"speech_es.mp3\""));
    assert_eq!(speech.call_count(), 1);
    Ok(())
}

#[tokio::test]
async fn test_run_text_withFailingSpeech_shouldKeepTranslatedText() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let translator = MockTranslator::working();
    let speech = MockSpeech::failing();
    let controller = common::mock_controller(common::test_config(&["it", "pt"]), &translator, Some(&speech));

    let outcome = controller.run_text("Ciao.".to_string(), temp_dir.path()).await?;

    assert!(matches!(outcome, RunOutcome::Translated(ref files) if files.len() == 2));
    assert!(temp_dir.path().join("translated_it.txt").exists());
    assert!(temp_dir.path().join("translated_pt.txt").exists());
    assert!(!temp_dir.path().join("speech_it.mp3").exists());
    assert_eq!(speech.call_count(), 2);
    Ok(())
}

#[tokio::test]
async fn test_run_text_withBlankInput_shouldReportEmpty() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let translator = MockTranslator::working();
    let controller = common::mock_controller(common::test_config(&["fr"]), &translator, None);

    let outcome = controller.run_text("  \n ".to_string(), temp_dir.path()).await?;

    assert_eq!(outcome, RunOutcome::Empty);
    assert_eq!(translator.call_count(), 0);
    assert_eq!(fs::read_dir(temp_dir.path())?.count(), 0);
    assert!(controller.history().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_run_text_withFailingTranslator_shouldWriteNothing() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let translator = MockTranslator::failing_on_call(2);
    let controller = common::mock_controller(common::test_config(&["fr", "de"]), &translator, None);

    let err = controller
        .run_text("One sentence.".to_string(), temp_dir.path())
        .await
        .unwrap_err();

    assert!(err.to_string().contains("'de'"), "{}", err);
    assert_eq!(fs::read_dir(temp_dir.path())?.count(), 0);
    assert!(controller.history().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_run_text_withLongDocument_shouldJoinChunksWithSeparator() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let translator = MockTranslator::working();
    let mut config = common::test_config(&["fr"]);
    config.translation.common.max_chars_per_chunk = 20;
    config.translation.common.chunk_separator = " | ".to_string();
    let controller = common::mock_controller(config, &translator, None);

    controller
        .run_text("First part here. Second part here.".to_string(), temp_dir.path())
        .await?;

    assert_eq!(
        fs::read_to_string(temp_dir.path().join("translated_fr.txt"))?,
        "[fr] First part here. | [fr] Second part here."
    );
    Ok(())
}

#[tokio::test]
async fn test_run_file_withExistingOutputs_shouldSkipUnlessForced() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(temp_dir.path(), "notes.txt", "Buy milk.")?;
    let output_dir = temp_dir.path().join("out");
    let translator = MockTranslator::working();
    let controller = common::mock_controller(common::test_config(&["ja"]), &translator, None);

    let first = controller.run_file(&input, &output_dir, false).await?;
    assert_eq!(first, RunOutcome::Translated(vec![output_dir.join("notes.ja.txt")]));
    assert_eq!(fs::read_to_string(output_dir.join("notes.ja.txt"))?, "[ja] Buy milk.");

    let second = controller.run_file(&input, &output_dir, false).await?;
    assert_eq!(second, RunOutcome::Skipped);
    assert_eq!(translator.call_count(), 1);

    let forced = controller.run_file(&input, &output_dir, true).await?;
    assert!(matches!(forced, RunOutcome::Translated(_)));
    assert_eq!(translator.call_count(), 2);
    Ok(())
}

#[tokio::test]
async fn test_run_file_withMissingInput_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let translator = MockTranslator::working();
    let controller = common::mock_controller(common::test_config(&["fr"]), &translator, None);

    let result = controller
        .run_file(&temp_dir.path().join("missing.txt"), temp_dir.path(), false)
        .await;

    assert!(result.is_err());
    Ok(())
}
