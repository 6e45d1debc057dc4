use anyhow::{Result, anyhow};
use isolang::Language;
use std::fmt;
use std::str::FromStr;

/// Language utilities for translation language codes
///
/// The known language set is the one accepted by the translation backends:
/// mostly ISO 639-1 codes plus a handful of backend-specific ones
/// (`zh-cn`, `zh-tw`, `haw`, `ceb`, `hmn`, ...). ISO 639-2 codes and English
/// language names are accepted on input and resolved to the backend code.
static KNOWN_LANGUAGES: &[(&str, &str)] = &[
    ("af", "Afrikaans"),
    ("sq", "Albanian"),
    ("am", "Amharic"),
    ("ar", "Arabic"),
    ("hy", "Armenian"),
    ("az", "Azerbaijani"),
    ("eu", "Basque"),
    ("be", "Belarusian"),
    ("bn", "Bengali"),
    ("bs", "Bosnian"),
    ("bg", "Bulgarian"),
    ("ca", "Catalan"),
    ("ceb", "Cebuano"),
    ("ny", "Chichewa"),
    ("zh-cn", "Chinese (simplified)"),
    ("zh-tw", "Chinese (traditional)"),
    ("co", "Corsican"),
    ("hr", "Croatian"),
    ("cs", "Czech"),
    ("da", "Danish"),
    ("nl", "Dutch"),
    ("en", "English"),
    ("eo", "Esperanto"),
    ("et", "Estonian"),
    ("tl", "Filipino"),
    ("fi", "Finnish"),
    ("fr", "French"),
    ("fy", "Frisian"),
    ("gl", "Galician"),
    ("ka", "Georgian"),
    ("de", "German"),
    ("el", "Greek"),
    ("gu", "Gujarati"),
    ("ht", "Haitian creole"),
    ("ha", "Hausa"),
    ("haw", "Hawaiian"),
    ("iw", "Hebrew"),
    ("he", "Hebrew"),
    ("hi", "Hindi"),
    ("hmn", "Hmong"),
    ("hu", "Hungarian"),
    ("is", "Icelandic"),
    ("ig", "Igbo"),
    ("id", "Indonesian"),
    ("ga", "Irish"),
    ("it", "Italian"),
    ("ja", "Japanese"),
    ("jw", "Javanese"),
    ("kn", "Kannada"),
    ("kk", "Kazakh"),
    ("km", "Khmer"),
    ("ko", "Korean"),
    ("ku", "Kurdish (kurmanji)"),
    ("ky", "Kyrgyz"),
    ("lo", "Lao"),
    ("la", "Latin"),
    ("lv", "Latvian"),
    ("lt", "Lithuanian"),
    ("lb", "Luxembourgish"),
    ("mk", "Macedonian"),
    ("mg", "Malagasy"),
    ("ms", "Malay"),
    ("ml", "Malayalam"),
    ("mt", "Maltese"),
    ("mi", "Maori"),
    ("mr", "Marathi"),
    ("mn", "Mongolian"),
    ("my", "Myanmar (burmese)"),
    ("ne", "Nepali"),
    ("no", "Norwegian"),
    ("or", "Odia"),
    ("ps", "Pashto"),
    ("fa", "Persian"),
    ("pl", "Polish"),
    ("pt", "Portuguese"),
    ("pa", "Punjabi"),
    ("ro", "Romanian"),
    ("ru", "Russian"),
    ("sm", "Samoan"),
    ("gd", "Scots gaelic"),
    ("sr", "Serbian"),
    ("st", "Sesotho"),
    ("sn", "Shona"),
    ("sd", "Sindhi"),
    ("si", "Sinhala"),
    ("sk", "Slovak"),
    ("sl", "Slovenian"),
    ("so", "Somali"),
    ("es", "Spanish"),
    ("su", "Sundanese"),
    ("sw", "Swahili"),
    ("sv", "Swedish"),
    ("tg", "Tajik"),
    ("ta", "Tamil"),
    ("te", "Telugu"),
    ("th", "Thai"),
    ("tr", "Turkish"),
    ("uk", "Ukrainian"),
    ("ur", "Urdu"),
    ("ug", "Uyghur"),
    ("uz", "Uzbek"),
    ("vi", "Vietnamese"),
    ("cy", "Welsh"),
    ("xh", "Xhosa"),
    ("yi", "Yiddish"),
    ("yo", "Yoruba"),
    ("zu", "Zulu"),
];

/// Sentinel accepted in place of a source language code
pub const AUTO_DETECT: &str = "auto";

/// Source language of a translation request
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SourceLanguage {
    /// Let the backend infer the source language
    Auto,
    /// A resolved backend language code
    Code(String),
}

impl SourceLanguage {
    /// Code forwarded to the backend (`auto` for auto-detection)
    pub fn as_code(&self) -> &str {
        match self {
            Self::Auto => AUTO_DETECT,
            Self::Code(code) => code,
        }
    }

    pub fn is_auto(&self) -> bool {
        matches!(self, Self::Auto)
    }
}

impl fmt::Display for SourceLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_code())
    }
}

impl FromStr for SourceLanguage {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim().to_lowercase();
        match trimmed.as_str() {
            "auto" | "auto-detect" | "auto detect" | "autodetect" => Ok(Self::Auto),
            _ => resolve_language(s).map(Self::Code),
        }
    }
}

/// Map an ISO 639-2/B code to its ISO 639-2/T form
fn part2b_to_part2t(code: &str) -> &str {
    match code {
        "fre" => "fra",
        "ger" => "deu",
        "dut" => "nld",
        "gre" => "ell",
        "chi" => "zho",
        "cze" => "ces",
        "ice" => "isl",
        "alb" => "sqi",
        "arm" => "hye",
        "baq" => "eus",
        "bur" => "mya",
        "per" => "fas",
        "geo" => "kat",
        "may" => "msa",
        "mac" => "mkd",
        "rum" => "ron",
        "slo" => "slk",
        "wel" => "cym",
        other => other,
    }
}

/// Check whether a code is in the known language set
pub fn is_known_code(code: &str) -> bool {
    KNOWN_LANGUAGES.iter().any(|(known, _)| *known == code)
}

/// Resolve a code or English language name to a known backend code
///
/// Accepts ISO 639-1 codes, backend-specific codes such as `zh-cn`,
/// ISO 639-2/T and 639-2/B codes, and English names ("French").
pub fn resolve_language(input: &str) -> Result<String> {
    let normalized = input.trim().to_lowercase().replace('_', "-");
    if normalized.is_empty() {
        return Err(anyhow!("Language code cannot be empty"));
    }

    if is_known_code(&normalized) {
        return Ok(normalized);
    }

    // Plain Chinese defaults to the simplified variant
    if normalized == "zh" {
        return Ok("zh-cn".to_string());
    }

    if normalized.len() == 3 {
        if let Some(lang) = Language::from_639_3(part2b_to_part2t(&normalized)) {
            if let Some(part1) = lang.to_639_1() {
                let candidate = if part1 == "zh" { "zh-cn" } else { part1 };
                if is_known_code(candidate) {
                    return Ok(candidate.to_string());
                }
            }
        }
    }

    // Last resort: an English language name. Later entries win, as in the
    // name picker (Hebrew resolves to "he").
    if let Some((code, _)) = KNOWN_LANGUAGES
        .iter()
        .rev()
        .find(|(_, name)| name.eq_ignore_ascii_case(&normalized))
    {
        return Ok(code.to_string());
    }

    Err(anyhow!("Invalid language code: {}", input))
}

/// Check if two language inputs resolve to the same language
pub fn language_codes_match(code1: &str, code2: &str) -> bool {
    match (resolve_language(code1), resolve_language(code2)) {
        (Ok(a), Ok(b)) => a == b || (is_hebrew(&a) && is_hebrew(&b)),
        _ => false,
    }
}

fn is_hebrew(code: &str) -> bool {
    code == "he" || code == "iw"
}

/// Get the English language name for a code
pub fn get_language_name(code: &str) -> Result<String> {
    let resolved = resolve_language(code)?;
    KNOWN_LANGUAGES
        .iter()
        .find(|(known, _)| *known == resolved)
        .map(|(_, name)| name.to_string())
        .ok_or_else(|| anyhow!("Failed to get language name for code: {}", resolved))
}

/// All known languages as (code, name) pairs sorted by name
///
/// Duplicate names keep only the last code, matching `resolve_language`.
pub fn supported_languages() -> Vec<(&'static str, &'static str)> {
    let mut languages: Vec<(&'static str, &'static str)> = Vec::with_capacity(KNOWN_LANGUAGES.len());
    for &(code, name) in KNOWN_LANGUAGES.iter().rev() {
        if !languages.iter().any(|(_, existing)| *existing == name) {
            languages.push((code, name));
        }
    }
    languages.sort_by(|a, b| a.1.cmp(b.1));
    languages
}
