/*!
 * Tests for document translation and reassembly
 */

use linguanova::errors::{ProviderError, TranslationError};
use linguanova::language_utils::SourceLanguage;
use linguanova::providers::mock::MockTranslator;
use linguanova::translation::{DocumentOptions, split_into_chunks, translate_document};
use crate::common;

fn three_chunk_document() -> (String, DocumentOptions) {
    let text = "First part here. Second part here. Third part here.".to_string();
    (text, DocumentOptions::default().with_max_chars(20))
}

#[tokio::test]
async fn test_translate_document_withWorkingTranslator_shouldPreserveChunkOrder() {
    let text = common::sample_document();
    let options = DocumentOptions::default().with_max_chars(60);
    let chunks = split_into_chunks(&text, 60);
    assert!(chunks.len() > 2);

    let translator = MockTranslator::working().with_custom_response(|req| req.text().to_uppercase());
    let result = translate_document(&translator, &text, "en", &["fr"], &options).await.unwrap();

    let expected: Vec<String> = chunks.iter().map(|c| c.to_uppercase()).collect();
    assert_eq!(result.get("fr"), Some(expected.join("\n\n").as_str()));

    // Chunks are sent in order, each exactly once
    let sent: Vec<String> = translator.requests().iter().map(|r| r.text().to_string()).collect();
    assert_eq!(sent, chunks);
}

#[tokio::test]
async fn test_translate_document_withSecondChunkFailing_shouldAbortWithChunkIndex() {
    let (text, options) = three_chunk_document();
    let translator = MockTranslator::failing_on_call(2);

    let err = translate_document(&translator, &text, "en", &["fr", "de"], &options)
        .await
        .unwrap_err();

    match err {
        TranslationError::TranslationFailure { language, chunk_index, source } => {
            assert_eq!(language, "fr");
            assert_eq!(chunk_index, 1);
            assert!(matches!(source, ProviderError::ApiError { status_code: 503, .. }));
        }
        other => panic!("unexpected error: {:?}", other),
    }

    // No further chunk or language is attempted
    assert_eq!(translator.call_count(), 2);
}

#[tokio::test]
async fn test_translate_document_withFailureInSecondLanguage_shouldNameThatLanguage() {
    let (text, options) = three_chunk_document();
    // fr uses calls 1-3, de fails on its first chunk
    let translator = MockTranslator::failing_on_call(4);

    let err = translate_document(&translator, &text, "auto", &["fr", "de", "es"], &options)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        TranslationError::TranslationFailure { ref language, chunk_index: 0, .. } if language == "de"
    ));
    assert_eq!(translator.call_count(), 4);
}

#[tokio::test]
async fn test_translate_document_withEmptyInput_shouldNotCallTranslator() {
    let translator = MockTranslator::working();

    for text in ["", "   ", "\n\n\t"] {
        let err = translate_document(&translator, text, "en", &["fr"], &DocumentOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, TranslationError::EmptyInput));
    }

    assert_eq!(translator.call_count(), 0);
}

#[tokio::test]
async fn test_translate_document_withAutoSource_shouldForwardSentinel() {
    let translator = MockTranslator::working();

    translate_document(&translator, "Hola.", "Auto-Detect", &["en"], &DocumentOptions::default())
        .await
        .unwrap();

    assert_eq!(translator.requests()[0].source(), &SourceLanguage::Auto);
    assert_eq!(translator.requests()[0].source().as_code(), "auto");
}

#[tokio::test]
async fn test_translate_document_withConcurrency_shouldMatchSequentialResult() {
    let text = common::sample_document();
    let sequential = DocumentOptions::default().with_max_chars(50);
    let concurrent = sequential.clone().with_concurrent_requests(4);

    let expected = translate_document(&MockTranslator::working(), &text, "en", &["fr", "ja"], &sequential)
        .await
        .unwrap();
    let actual = translate_document(&MockTranslator::slow(5), &text, "en", &["fr", "ja"], &concurrent)
        .await
        .unwrap();

    assert_eq!(actual, expected);
}

#[tokio::test]
async fn test_translate_document_withConcurrencyAndFailure_shouldReportFailingChunk() {
    let (text, options) = three_chunk_document();
    let options = options.with_concurrent_requests(3);
    let translator = MockTranslator::failing_on_text("Second");

    let err = translate_document(&translator, &text, "en", &["it"], &options)
        .await
        .unwrap_err();

    assert!(matches!(err, TranslationError::TranslationFailure { chunk_index: 1, .. }));
}

#[tokio::test]
async fn test_translate_document_withFailure_shouldDisplayLanguageAndChunk() {
    let (text, options) = three_chunk_document();
    let translator = MockTranslator::failing();

    let err = translate_document(&translator, &text, "en", &["pt"], &options)
        .await
        .unwrap_err();

    let message = err.to_string();
    assert!(message.contains("'pt'"), "{}", message);
    assert!(message.contains("chunk 0"), "{}", message);
}
