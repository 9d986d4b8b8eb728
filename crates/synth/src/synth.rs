//! Builds an output deck from cataloged songs, in the visual style of a
//! template presentation.

use crate::retry::RetryPolicy;
use log::{info, warn};
use praise_core::{normalize_for_search, sanitize_lyrics, DocumentRecord, StyleModel};
use praise_index::DocumentStore;
use praise_pptx::{DeckWriter, SlidePlan, StyleCapture};
use std::path::{Path, PathBuf};

/// Assembles a deck for a set of song titles out of the catalog.
pub struct Synthesizer {
    store_path: PathBuf,
    template: Option<PathBuf>,
    retry: RetryPolicy,
}

impl Synthesizer {
    pub fn new(store_path: impl Into<PathBuf>) -> Self {
        Synthesizer {
            store_path: store_path.into(),
            template: None,
            retry: RetryPolicy::default(),
        }
    }

    /// Capture slide size, background, connector decorations, and lyric
    /// typography from this deck, and reuse its masters and theme.
    pub fn with_template(mut self, path: impl Into<PathBuf>) -> Self {
        self.template = Some(path.into());
        self
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Build a deck containing the given songs, in order, and write it to
    /// `output` (or a timestamp-suffixed sibling when `output` is locked).
    /// Returns the path actually written.
    ///
    /// Titles not found in the catalog are skipped with a warning; the
    /// deck is only written when at least one title matched.
    pub fn synthesize(&self, titles: &[String], output: &Path) -> Option<PathBuf> {
        let mut store = DocumentStore::new(&self.store_path);
        if !store.load_from_store() {
            warn!("no catalog at {}, nothing to synthesize", self.store_path.display());
            return None;
        }

        let mut plans = Vec::new();
        let mut matched = 0usize;
        for title in titles {
            match find_by_title(store.documents(), title) {
                Some(doc) => {
                    matched += 1;
                    append_song(&mut plans, doc);
                }
                None => warn!("'{}' is not in the catalog, skipping", title),
            }
        }
        if matched == 0 {
            warn!("none of the requested titles matched the catalog");
            return None;
        }

        let (style, template) = self.resolve_style();
        let mut writer = DeckWriter::new(&style);
        if let Some(template) = template {
            writer = writer.with_template(template);
        }

        let written = self
            .retry
            .save_with_fallback(output, |path| writer.write(&plans, path))?;
        info!(
            "wrote {} ({} songs, {} slides)",
            written.display(),
            matched,
            plans.len()
        );
        Some(written)
    }

    /// Captured template style, or defaults when there is no usable
    /// template. The template path is only forwarded to the writer when
    /// the capture succeeded; a deck we cannot read is not a shell we
    /// should copy parts out of.
    fn resolve_style(&self) -> (StyleModel, Option<&Path>) {
        let Some(template) = self.template.as_deref() else {
            return (StyleModel::default(), None);
        };
        if !template.exists() {
            warn!(
                "template {} not found, using default styling",
                template.display()
            );
            return (StyleModel::default(), None);
        }
        match StyleCapture::capture_path(template) {
            Ok(style) => (style, Some(template)),
            Err(e) => {
                warn!(
                    "could not read template {}: {}, using default styling",
                    template.display(),
                    e
                );
                (StyleModel::default(), None)
            }
        }
    }
}

/// Case- and whitespace-insensitive title lookup. First exact match wins.
fn find_by_title<'a>(documents: &'a [DocumentRecord], title: &str) -> Option<&'a DocumentRecord> {
    if let Some(doc) = documents.iter().find(|d| d.title == title) {
        return Some(doc);
    }
    let wanted = normalize_for_search(title);
    documents.iter().find(|d| d.title_normalized == wanted)
}

/// A separator slide, then one slide per non-empty cataloged slide. A
/// document whose slides all came out empty still gets one slide built
/// from its joined lyrics.
fn append_song(plans: &mut Vec<SlidePlan>, doc: &DocumentRecord) {
    plans.push(SlidePlan::Separator);
    let start = plans.len();
    for unit in &doc.slides {
        let text = sanitize_lyrics(&unit.text);
        if !text.is_empty() {
            plans.push(SlidePlan::lyric(&text));
        }
    }
    if plans.len() == start {
        let text = sanitize_lyrics(&doc.lyrics);
        if !text.is_empty() {
            plans.push(SlidePlan::lyric(&text));
        }
    }
}
