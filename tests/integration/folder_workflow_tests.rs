/*!
 * End-to-end tests for translating a folder of text files
 */

use anyhow::Result;
use std::fs;
use linguanova::app_controller::FolderSummary;
use linguanova::providers::mock::MockTranslator;
use crate::common;

#[tokio::test]
async fn test_run_folder_withMixedFiles_shouldTranslateEachSource() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path();
    common::create_test_file(root, "a.txt", "Alpha.")?;
    common::create_test_file(root, "b.txt", "   ")?;
    common::create_test_file(root, "nested/c.txt", "Gamma.")?;
    common::create_test_file(root, "readme.md", "Not text.")?;

    let translator = MockTranslator::working();
    let controller = common::mock_controller(common::test_config(&["fr"]), &translator, None);

    let summary = controller.run_folder(root, false).await?;

    assert_eq!(
        summary,
        FolderSummary {
            processed: 2,
            skipped: 0,
            empty: 1,
            errors: 0,
            ignored: 0
        }
    );
    assert_eq!(fs::read_to_string(root.join("a.fr.txt"))?, "[fr] Alpha.");
    assert_eq!(fs::read_to_string(root.join("nested/c.fr.txt"))?, "[fr] Gamma.");
    assert!(!root.join("b.fr.txt").exists());
    Ok(())
}

#[tokio::test]
async fn test_run_folder_runTwice_shouldSkipOwnOutputs() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path();
    common::create_test_file(root, "story.txt", "Once upon a time.")?;

    let translator = MockTranslator::working();
    let controller = common::mock_controller(common::test_config(&["de", "es"]), &translator, None);

    let first = controller.run_folder(root, false).await?;
    assert_eq!(first.processed, 1);
    assert!(root.join("story.de.txt").exists());
    assert!(root.join("story.es.txt").exists());

    // The generated story.de.txt and story.es.txt are not picked up as inputs
    let second = controller.run_folder(root, false).await?;
    assert_eq!(
        second,
        FolderSummary {
            processed: 0,
            skipped: 1,
            empty: 0,
            errors: 0,
            ignored: 2
        }
    );
    assert_eq!(translator.call_count(), 2);
    Ok(())
}

#[tokio::test]
async fn test_run_folder_withLanguageSuffixedSources_shouldTranslateThem() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path();
    common::create_test_file(root, "notes.no.txt", "Hei verden.")?;
    common::create_test_file(root, "brief.de.txt", "Hallo Welt.")?;
    common::create_test_file(root, "old.fr.txt", "Bonjour.")?;

    let translator = MockTranslator::working();
    let controller = common::mock_controller(common::test_config(&["fr"]), &translator, None);

    let summary = controller.run_folder(root, false).await?;

    assert_eq!(summary.processed, 2);
    assert_eq!(summary.ignored, 1);
    assert_eq!(fs::read_to_string(root.join("notes.no.fr.txt"))?, "[fr] Hei verden.");
    assert_eq!(fs::read_to_string(root.join("brief.de.fr.txt"))?, "[fr] Hallo Welt.");
    assert!(!root.join("old.fr.fr.txt").exists());
    Ok(())
}

#[tokio::test]
async fn test_run_folder_withFailingFile_shouldCountErrorAndContinue() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path();
    common::create_test_file(root, "a.txt", "Fine text.")?;
    common::create_test_file(root, "b.txt", "This one is broken.")?;
    common::create_test_file(root, "c.txt", "Also fine.")?;

    let translator = MockTranslator::failing_on_text("broken");
    let controller = common::mock_controller(common::test_config(&["fr"]), &translator, None);

    let summary = controller.run_folder(root, false).await?;

    assert_eq!(summary.processed, 2);
    assert_eq!(summary.errors, 1);
    assert!(root.join("a.fr.txt").exists());
    assert!(!root.join("b.fr.txt").exists());
    assert!(root.join("c.fr.txt").exists());
    Ok(())
}

#[tokio::test]
async fn test_run_folder_withManyFiles_shouldKeepFiveHistoryEntries() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path();
    for i in 0..7 {
        common::create_test_file(root, &format!("doc{}.txt", i), &format!("Document number {}.", i))?;
    }

    let translator = MockTranslator::working();
    let controller = common::mock_controller(common::test_config(&["fr"]), &translator, None);

    controller.run_folder(root, false).await?;

    let history = controller.history();
    assert_eq!(history.len(), 5);
    assert_eq!(history.iter().next().unwrap().input_preview, "Document number 2.");
    assert_eq!(history.latest().unwrap().input_preview, "Document number 6.");
    Ok(())
}

#[tokio::test]
async fn test_run_folder_withoutTextFiles_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "image.png", "")?;

    let translator = MockTranslator::working();
    let controller = common::mock_controller(common::test_config(&["fr"]), &translator, None);

    assert!(controller.run_folder(temp_dir.path(), false).await.is_err());
    Ok(())
}
