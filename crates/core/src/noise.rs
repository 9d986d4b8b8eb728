//! Noise-line classification for extracted slide text.
//!
//! Worship decks accumulate stray operator keystrokes ("ㄴㄴㄴ", "ㅠㅠ"),
//! decorative rules ("---", "···"), and emphasis runs ("!!!") that must not
//! be indexed or re-emitted as lyrics.

use regex::Regex;
use std::sync::LazyLock;

/// Lines made only of whitespace, dashes, underscores, dots, or bullets.
static FILLER_PUNCT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\s\-_.·•]+$").unwrap());

/// Lines made only of Hangul compatibility jamo (ㄱ-ㅎ, ㅏ-ㅣ).
static JAMO_ONLY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[ㄱ-ㅎㅏ-ㅣ]+$").unwrap());

/// At least one meaningful character: Hangul syllable or ASCII alphanumeric.
static MEANINGFUL_CHAR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[가-힣A-Za-z0-9]").unwrap());

/// Classify a trimmed line of extracted text as noise.
///
/// A line is noise when any of the following holds:
/// - it is empty, or consists solely of whitespace/dash/dot/bullet filler;
/// - it consists solely of Hangul jamo (stray filler keystrokes);
/// - it is a single character repeated three or more times;
/// - it contains no alphanumeric and no Hangul syllable character.
pub fn is_noise_line(text: &str) -> bool {
    if text.is_empty() {
        return true;
    }
    if FILLER_PUNCT_REGEX.is_match(text) {
        return true;
    }
    if JAMO_ONLY_REGEX.is_match(text) {
        return true;
    }
    if is_repeated_single_char(text) {
        return true;
    }
    if !MEANINGFUL_CHAR_REGEX.is_match(text) {
        return true;
    }
    false
}

/// A single character repeated three or more times (e.g. "!!!", "ㅋㅋㅋ").
///
/// The `regex` crate has no backreferences, so this rule is a char loop.
fn is_repeated_single_char(text: &str) -> bool {
    let mut chars = text.chars();
    let first = match chars.next() {
        Some(c) => c,
        None => return false,
    };
    let mut count = 1;
    for c in chars {
        if c != first {
            return false;
        }
        count += 1;
    }
    count >= 3
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_filler_are_noise() {
        assert!(is_noise_line(""));
        assert!(is_noise_line("-.."));
        assert!(is_noise_line("···"));
        assert!(is_noise_line("• • •"));
        assert!(is_noise_line("___"));
    }

    #[test]
    fn jamo_only_is_noise() {
        assert!(is_noise_line("ㄴㄴㄴ"));
        assert!(is_noise_line("ㅠㅠ"));
        assert!(is_noise_line("ㅁ"));
    }

    #[test]
    fn repeated_single_char_is_noise() {
        assert!(is_noise_line("!!!"));
        assert!(is_noise_line("aaa"));
        assert!(is_noise_line("????"));
        // Two repeats with other content are not caught by this rule.
        assert!(!is_noise_line("aa b"));
    }

    #[test]
    fn no_meaningful_char_is_noise() {
        assert!(is_noise_line("!?"));
        assert!(is_noise_line("~*~"));
    }

    #[test]
    fn real_lyric_lines_are_kept() {
        assert!(!is_noise_line("Amazing grace"));
        assert!(!is_noise_line("주 안에서"));
        assert!(!is_noise_line("Verse 1"));
        assert!(!is_noise_line("a"));
    }
}
