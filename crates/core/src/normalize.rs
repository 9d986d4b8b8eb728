//! Search-side text normalization.
//!
//! The same transform is applied when indexing and when querying, so
//! substring matches are case- and whitespace-insensitive.

/// Normalize text for search comparison: lowercase and strip all whitespace.
///
/// Empty input normalizes to the empty string.
pub fn normalize_for_search(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_strips_whitespace() {
        assert_eq!(normalize_for_search("Amazing Grace"), "amazinggrace");
        assert_eq!(normalize_for_search("  How\tGreat \n Thou Art "), "howgreatthouart");
    }

    #[test]
    fn empty_input_yields_empty() {
        assert_eq!(normalize_for_search(""), "");
        assert_eq!(normalize_for_search("   \n\t"), "");
    }

    #[test]
    fn hangul_passes_through() {
        assert_eq!(normalize_for_search("주 안에서 내 영혼"), "주안에서내영혼");
    }
}
