/*!
 * Tests for language code utilities
 */

use linguanova::language_utils::{
    SourceLanguage, get_language_name, language_codes_match, resolve_language, supported_languages,
};

#[test]
fn test_source_language_withAutoVariants_shouldParseAsAuto() {
    for input in ["auto", "AUTO", "auto-detect", " Auto Detect "] {
        assert_eq!(input.parse::<SourceLanguage>().unwrap(), SourceLanguage::Auto, "{}", input);
    }
}

#[test]
fn test_source_language_withCodeOrName_shouldResolve() {
    assert_eq!(
        "German".parse::<SourceLanguage>().unwrap(),
        SourceLanguage::Code("de".to_string())
    );
    assert_eq!("spa".parse::<SourceLanguage>().unwrap().as_code(), "es");
    assert!("zz".parse::<SourceLanguage>().is_err());
}

#[test]
fn test_resolve_language_withInvalidInput_shouldFail() {
    assert!(resolve_language("").is_err());
    assert!(resolve_language("   ").is_err());
    assert!(resolve_language("q1x").is_err());
    assert!(resolve_language("english-ish").is_err());
}

#[test]
fn test_language_codes_match_withEquivalentForms_shouldMatch() {
    assert!(language_codes_match("fr", "fre"));
    assert!(language_codes_match("French", "fra"));
    assert!(language_codes_match("he", "iw"));
    assert!(!language_codes_match("fr", "de"));
    assert!(!language_codes_match("fr", "nonsense"));
}

#[test]
fn test_get_language_name_withCode_shouldReturnEnglishName() {
    assert_eq!(get_language_name("ja").unwrap(), "Japanese");
    assert_eq!(get_language_name("zh-TW").unwrap(), "Chinese (traditional)");
    assert!(get_language_name("qq").is_err());
}

#[test]
fn test_supported_languages_shouldBeSortedAndUnique() {
    let languages = supported_languages();

    assert!(languages.len() > 100);
    assert!(languages.windows(2).all(|pair| pair[0].1 < pair[1].1));
    assert!(languages.contains(&("fr", "French")));
    assert!(languages.contains(&("he", "Hebrew")));
    assert!(!languages.iter().any(|(code, _)| *code == "iw"));
}
