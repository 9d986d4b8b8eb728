//! Lyric text sanitizing before re-emission into slides.
//!
//! Stored lyrics can carry PPTX extraction markers (`_x000B_` and friends),
//! mixed line-break conventions, and control characters. Output slides want
//! plain `\n`-separated, trimmed lines.

use regex::Regex;
use std::sync::LazyLock;

/// Runs of bare carriage returns collapse to a single break.
static CR_RUN_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\r+").unwrap());

/// Three or more consecutive line breaks collapse to exactly two.
static MULTI_BREAK_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

/// Clean raw lyric text for slide output.
///
/// Steps, in order:
/// 1. unify line breaks (`\r\n` then remaining `\r` runs become `\n`);
/// 2. replace the PPTX escape markers `_x000B_`, `_x000C_`, `_x000D_` with a
///    line break and `_x0009_` with a space;
/// 3. replace vertical tab and form feed with line breaks;
/// 4. collapse runs of three or more line breaks to exactly two;
/// 5. trim each line, then trim the whole result.
pub fn sanitize_lyrics(text: &str) -> String {
    let s = text.replace("\r\n", "\n");
    let s = CR_RUN_REGEX.replace_all(&s, "\n");

    let s = s
        .replace("_x000B_", "\n")
        .replace("_x000C_", "\n")
        .replace("_x000D_", "\n")
        .replace("_x0009_", " ")
        .replace('\u{000B}', "\n")
        .replace('\u{000C}', "\n");

    let s = MULTI_BREAK_REGEX.replace_all(&s, "\n\n");

    s.split('\n')
        .map(str::trim)
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mixed_breaks_unified_and_collapsed() {
        assert_eq!(sanitize_lyrics("a\r\nb\r\rc\n\n\n\nd"), "a\nb\nc\n\nd");
    }

    #[test]
    fn pptx_markers_become_breaks() {
        assert_eq!(sanitize_lyrics("one_x000B_two"), "one\ntwo");
        assert_eq!(sanitize_lyrics("tab_x0009_here"), "tab here");
    }

    #[test]
    fn control_chars_become_breaks() {
        assert_eq!(sanitize_lyrics("a\u{000B}b\u{000C}c"), "a\nb\nc");
    }

    #[test]
    fn lines_are_trimmed_individually() {
        assert_eq!(sanitize_lyrics("  hello  \n  world  "), "hello\nworld");
    }

    #[test]
    fn double_break_is_preserved() {
        assert_eq!(sanitize_lyrics("verse\n\nchorus"), "verse\n\nchorus");
    }

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(sanitize_lyrics(""), "");
        assert_eq!(sanitize_lyrics("\n\n\n"), "");
    }
}
