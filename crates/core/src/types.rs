//! Domain types for the indexed song catalog.

use serde::{Deserialize, Serialize};

use crate::normalize::normalize_for_search;

/// One indexed song: metadata, full lyrics, and the per-slide breakdown.
///
/// Serialized field names match the on-disk JSON index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentRecord {
    /// Positive id, unique within the store.
    pub id: u64,

    /// Original filename (without path).
    pub filename: String,

    /// Song title, derived from the filename stem.
    pub title: String,

    /// Where the source deck lives, kept for later deletion.
    pub file_path: String,

    /// All slide lines joined by line breaks, in slide/line order.
    pub lyrics: String,

    /// Per-slide breakdown; one entry per non-empty slide.
    #[serde(rename = "slides_text")]
    pub slides: Vec<SlideUnit>,

    /// Search form of the title (lowercased, whitespace removed).
    pub title_normalized: String,

    /// Search form of the lyrics.
    pub lyrics_normalized: String,
}

impl DocumentRecord {
    /// Build a record from extracted slides, deriving `lyrics` and the
    /// normalized search fields.
    pub fn from_slides(
        id: u64,
        filename: impl Into<String>,
        title: impl Into<String>,
        file_path: impl Into<String>,
        slides: Vec<SlideUnit>,
    ) -> Self {
        let title = title.into();
        let lyrics = slides
            .iter()
            .flat_map(|s| s.lines.iter().map(|l| l.as_str()))
            .collect::<Vec<_>>()
            .join("\n");

        let title_normalized = normalize_for_search(&title);
        let lyrics_normalized = normalize_for_search(&lyrics);

        Self {
            id,
            filename: filename.into(),
            title,
            file_path: file_path.into(),
            lyrics,
            slides,
            title_normalized,
            lyrics_normalized,
        }
    }

    /// Recompute the normalized search fields from `title`/`lyrics`.
    ///
    /// Must be called whenever either source field changes; the normalized
    /// fields are never edited independently.
    pub fn renormalize(&mut self) {
        self.title_normalized = normalize_for_search(&self.title);
        self.lyrics_normalized = normalize_for_search(&self.lyrics);
    }
}

/// One non-empty slide of a song deck.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlideUnit {
    /// 1-based slide number in the source deck.
    pub slide_number: usize,

    /// Lines joined by `\n`.
    pub text: String,

    /// Individual surviving lines, in reading order.
    #[serde(rename = "text_lines")]
    pub lines: Vec<String>,
}

impl SlideUnit {
    /// Create a slide unit from its surviving lines.
    pub fn new(slide_number: usize, lines: Vec<String>) -> Self {
        let text = lines.join("\n");
        Self {
            slide_number,
            text,
            lines,
        }
    }

    /// Whether the slide kept any lines at all.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
