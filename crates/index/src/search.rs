//! Scoring and ranking of repository documents against a query.

use praise_core::{normalize_for_search, DocumentRecord};
use std::str::FromStr;

/// Which fields a query is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchMode {
    Title,
    Lyrics,
    #[default]
    Both,
}

impl FromStr for SearchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "title" => Ok(SearchMode::Title),
            "lyrics" => Ok(SearchMode::Lyrics),
            "both" => Ok(SearchMode::Both),
            other => Err(format!(
                "unknown search mode '{}' (expected title, lyrics, or both)",
                other
            )),
        }
    }
}

/// Score and rank documents against the query.
///
/// Returns matches sorted by score descending; equal scores keep repository
/// order (stable sort). An empty query returns no results. Result-count
/// caps and minimum query lengths are the caller's concern.
pub fn search<'a>(
    documents: &'a [DocumentRecord],
    query: &str,
    mode: SearchMode,
) -> Vec<&'a DocumentRecord> {
    if query.is_empty() {
        return Vec::new();
    }

    let query_normalized = normalize_for_search(query);

    let mut scored: Vec<(u32, &DocumentRecord)> = documents
        .iter()
        .filter_map(|doc| {
            let score = score_document(doc, query, &query_normalized, mode);
            (score > 0).then_some((score, doc))
        })
        .collect();

    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.into_iter().map(|(_, doc)| doc).collect()
}

/// Per-document score.
///
/// Single-field modes: 100 for a normalized substring hit, 80 for a raw
/// case-sensitive substring hit. `Both`: 50 per normalized field hit.
fn score_document(
    doc: &DocumentRecord,
    query: &str,
    query_normalized: &str,
    mode: SearchMode,
) -> u32 {
    match mode {
        SearchMode::Title => {
            if doc.title_normalized.contains(query_normalized) {
                100
            } else if doc.title.contains(query) {
                80
            } else {
                0
            }
        }
        SearchMode::Lyrics => {
            if doc.lyrics_normalized.contains(query_normalized) {
                100
            } else if doc.lyrics.contains(query) {
                80
            } else {
                0
            }
        }
        SearchMode::Both => {
            let mut score = 0;
            if doc.title_normalized.contains(query_normalized) {
                score += 50;
            }
            if doc.lyrics_normalized.contains(query_normalized) {
                score += 50;
            }
            score
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use praise_core::SlideUnit;

    fn doc(id: u64, title: &str, lyrics_lines: &[&str]) -> DocumentRecord {
        DocumentRecord::from_slides(
            id,
            format!("{title}.pptx"),
            title,
            format!("/decks/{title}.pptx"),
            vec![SlideUnit::new(
                1,
                lyrics_lines.iter().map(|l| l.to_string()).collect(),
            )],
        )
    }

    fn catalog() -> Vec<DocumentRecord> {
        vec![
            doc(1, "Amazing Grace", &["Amazing grace", "how sweet the sound"]),
            doc(2, "Grace Alone", &["In grace alone we stand"]),
            doc(3, "Holy Holy", &["Holy holy holy", "Lord God almighty"]),
        ]
    }

    #[test]
    fn empty_query_returns_nothing() {
        let docs = catalog();
        assert!(search(&docs, "", SearchMode::Both).is_empty());
    }

    #[test]
    fn title_mode_normalized_match() {
        let docs = catalog();
        let results = search(&docs, "aMAzing  GRACE", SearchMode::Title);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, 1);
    }

    #[test]
    fn lyrics_mode_matches_across_whitespace() {
        let docs = catalog();
        let results = search(&docs, "sweet the", SearchMode::Lyrics);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, 1);
    }

    #[test]
    fn zero_score_documents_are_excluded() {
        let docs = catalog();
        let results = search(&docs, "nonexistent words", SearchMode::Both);
        assert!(results.is_empty());
    }

    #[test]
    fn both_mode_scores_are_additive() {
        let docs = catalog();
        // "grace" hits title+lyrics for docs 1 and 2 (100 each), nothing
        // for doc 3.
        let results = search(&docs, "grace", SearchMode::Both);
        assert_eq!(results.len(), 2);
        // Equal scores keep repository order.
        assert_eq!(results[0].id, 1);
        assert_eq!(results[1].id, 2);
    }

    #[test]
    fn both_mode_half_score_ranks_below_full_score() {
        let docs = vec![
            doc(1, "Evening Hymn", &["grace in the evening"]), // lyrics only: 50
            doc(2, "Grace", &["grace upon grace"]),            // both: 100
        ];
        let results = search(&docs, "grace", SearchMode::Both);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].id, 2);
        assert_eq!(results[1].id, 1);
    }

    #[test]
    fn ranking_is_stable_for_equal_scores() {
        let docs = vec![
            doc(5, "Grace A", &["x"]),
            doc(2, "Grace B", &["y"]),
            doc(9, "Grace C", &["z"]),
        ];
        let results = search(&docs, "grace", SearchMode::Title);
        let ids: Vec<u64> = results.iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![5, 2, 9]);
    }

    #[test]
    fn raw_substring_fallback_when_normalized_field_lags() {
        // Store files can be hand-edited, leaving normalized fields stale.
        // The raw comparison still finds the document.
        let mut stale = doc(1, "Amazing Grace", &["how sweet the sound"]);
        stale.title_normalized = String::from("outdated");
        let docs = vec![stale];
        let results = search(&docs, "Amazing Grace", SearchMode::Title);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, 1);
    }

    #[test]
    fn search_mode_parses_from_str() {
        assert_eq!("title".parse::<SearchMode>().unwrap(), SearchMode::Title);
        assert_eq!("LYRICS".parse::<SearchMode>().unwrap(), SearchMode::Lyrics);
        assert_eq!("both".parse::<SearchMode>().unwrap(), SearchMode::Both);
        assert!("fuzzy".parse::<SearchMode>().is_err());
    }
}
