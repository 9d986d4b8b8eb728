//! JSON-file-backed document repository.
//!
//! The persisted index is a pretty-printed UTF-8 JSON array of records; its
//! absence means "not indexed yet", not corruption. All operations on the
//! public surface report success as a boolean and leave the in-memory
//! collection untouched on failure.

use praise_core::{DocumentRecord, Error, Result};
use praise_pptx::DeckExtractor;
use std::fs;
use std::path::{Path, PathBuf};

/// In-memory ordered collection of indexed songs, persisted to one JSON
/// file.
#[derive(Debug)]
pub struct DocumentStore {
    store_path: PathBuf,
    extractor: DeckExtractor,
    documents: Vec<DocumentRecord>,
}

impl DocumentStore {
    /// Create a store persisted at the given path, with duplicate lines
    /// preserved during extraction.
    pub fn new(store_path: impl Into<PathBuf>) -> Self {
        Self {
            store_path: store_path.into(),
            extractor: DeckExtractor::new(),
            documents: Vec::new(),
        }
    }

    /// Use a differently configured extractor (e.g. per-slide dedup).
    pub fn with_extractor(mut self, extractor: DeckExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    /// The indexed documents, in repository order.
    pub fn documents(&self) -> &[DocumentRecord] {
        &self.documents
    }

    /// Where the JSON index lives.
    pub fn store_path(&self) -> &Path {
        &self.store_path
    }

    /// Load the JSON index from disk.
    ///
    /// Returns `false` when the file is missing (logged as a warning: the
    /// catalog simply has not been indexed yet) or unparseable (logged as an
    /// error). The in-memory collection is left unchanged on failure.
    pub fn load_from_store(&mut self) -> bool {
        if !self.store_path.exists() {
            log::warn!("index file not found: {}", self.store_path.display());
            return false;
        }
        match self.try_load() {
            Ok(documents) => {
                log::info!("loaded {} documents from index", documents.len());
                self.documents = documents;
                true
            }
            Err(e) => {
                log::error!("failed to load index {}: {}", self.store_path.display(), e);
                false
            }
        }
    }

    /// Serialize the full in-memory collection, overwriting the index file.
    pub fn save_to_store(&self) -> bool {
        match self.try_save() {
            Ok(()) => {
                log::info!(
                    "saved {} documents to {}",
                    self.documents.len(),
                    self.store_path.display()
                );
                true
            }
            Err(e) => {
                log::error!("failed to save index {}: {}", self.store_path.display(), e);
                false
            }
        }
    }

    /// Rebuild the entire index from the deck files directly under
    /// `source_folder` (non-recursive), then persist it.
    ///
    /// Ids are assigned 1..N in discovery order (lexicographic by filename,
    /// so a rebuild is deterministic). A deck that fails extraction or
    /// yields no slides is skipped, never fatal; only a missing folder
    /// returns `false`. A failed save is logged, not a rebuild failure.
    pub fn rebuild_all(&mut self, source_folder: &Path) -> bool {
        let files = match discover_decks(source_folder) {
            Ok(files) => files,
            Err(e) => {
                log::error!("cannot scan {}: {}", source_folder.display(), e);
                return false;
            }
        };

        log::info!("found {} deck files", files.len());

        let mut documents = Vec::new();
        for path in files {
            match self.build_record(documents.len() as u64 + 1, &path) {
                Ok(Some(record)) => {
                    log::debug!("indexed '{}': {} slides", record.title, record.slides.len());
                    documents.push(record);
                }
                Ok(None) => {
                    log::warn!("no lyric content in {}", path.display());
                }
                Err(e) => {
                    log::warn!("skipping {}: {}", path.display(), e);
                }
            }
        }

        self.documents = documents;
        if !self.save_to_store() {
            log::error!(
                "rebuilt index could not be saved to {}",
                self.store_path.display()
            );
        }
        true
    }

    /// Index one additional deck.
    ///
    /// The new id is `max(existing ids, 0) + 1`. Returns `false` without
    /// mutating state when the deck yields no slides or cannot be read.
    /// Persisting is the caller's separate, explicit step.
    pub fn add_single(&mut self, path: &Path) -> bool {
        let new_id = self.documents.iter().map(|d| d.id).max().unwrap_or(0) + 1;

        match self.build_record(new_id, path) {
            Ok(Some(record)) => {
                log::info!("added '{}' (id {})", record.title, record.id);
                self.documents.push(record);
                true
            }
            Ok(None) => {
                log::warn!("no lyric content in {}", path.display());
                false
            }
            Err(e) => {
                log::error!("failed to add {}: {}", path.display(), e);
                false
            }
        }
    }

    /// Remove a document by id. Removing an absent id is a no-op.
    pub fn remove_by_id(&mut self, id: u64) {
        let before = self.documents.len();
        self.documents.retain(|d| d.id != id);
        if self.documents.len() < before {
            log::info!("removed document id {}", id);
        } else {
            log::debug!("remove_by_id: id {} not present", id);
        }
    }

    fn try_load(&self) -> Result<Vec<DocumentRecord>> {
        let content = fs::read_to_string(&self.store_path)?;
        let documents = serde_json::from_str(&content)?;
        Ok(documents)
    }

    fn try_save(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.documents)?;
        fs::write(&self.store_path, json)?;
        Ok(())
    }

    /// Extract a deck into a record; `Ok(None)` means no surviving slides.
    fn build_record(&self, id: u64, path: &Path) -> Result<Option<DocumentRecord>> {
        let slides = self.extractor.extract_path(path)?;
        if slides.is_empty() {
            return Ok(None);
        }

        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| Error::Extraction(format!("unusable filename: {}", path.display())))?;
        let title = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(filename);

        Ok(Some(DocumentRecord::from_slides(
            id,
            filename,
            title,
            path.to_string_lossy(),
            slides,
        )))
    }
}

/// Deck files directly under the folder, sorted by filename.
fn discover_decks(source_folder: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(source_folder)? {
        let entry = entry?;
        let path = entry.path();
        let is_deck = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("pptx"));
        if path.is_file() && is_deck {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use praise_core::SlideUnit;

    fn record(id: u64, title: &str) -> DocumentRecord {
        DocumentRecord::from_slides(
            id,
            format!("{title}.pptx"),
            title,
            format!("/decks/{title}.pptx"),
            vec![SlideUnit::new(1, vec![format!("{title} lyrics")])],
        )
    }

    fn store_with(documents: Vec<DocumentRecord>, path: &Path) -> DocumentStore {
        let mut store = DocumentStore::new(path);
        store.documents = documents;
        store
    }

    #[test]
    fn save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.json");

        let store = store_with(vec![record(1, "Grace"), record(2, "Mercy")], &path);
        assert!(store.save_to_store());

        let mut fresh = DocumentStore::new(&path);
        assert!(fresh.load_from_store());
        assert_eq!(fresh.documents().len(), 2);
        assert_eq!(fresh.documents()[0].title, "Grace");
        assert_eq!(fresh.documents()[1].id, 2);
    }

    #[test]
    fn missing_file_fails_load_and_preserves_memory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");

        let mut store = store_with(vec![record(1, "Kept")], &path);
        assert!(!store.load_from_store());
        assert_eq!(store.documents().len(), 1);
    }

    #[test]
    fn corrupt_file_fails_load_and_preserves_memory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.json");
        fs::write(&path, "{ not json").unwrap();

        let mut store = store_with(vec![record(1, "Kept")], &path);
        assert!(!store.load_from_store());
        assert_eq!(store.documents().len(), 1);
        assert_eq!(store.documents()[0].title, "Kept");
    }

    #[test]
    fn add_single_assigns_max_plus_one() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_with(
            vec![record(3, "Three"), record(7, "Seven")],
            &dir.path().join("index.json"),
        );

        // Build a real one-slide deck so extraction succeeds.
        let deck_path = dir.path().join("New Song.pptx");
        write_single_slide_deck(&deck_path, "Grace");

        assert!(store.add_single(&deck_path));
        let added = store.documents().last().unwrap();
        assert_eq!(added.id, 8);
        assert_eq!(added.title, "New Song");
        assert_eq!(added.lyrics, "Grace");
    }

    #[test]
    fn add_single_unreadable_deck_leaves_state_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_with(vec![record(1, "Kept")], &dir.path().join("index.json"));

        let bad = dir.path().join("broken.pptx");
        fs::write(&bad, b"not a zip").unwrap();

        assert!(!store.add_single(&bad));
        assert_eq!(store.documents().len(), 1);
    }

    #[test]
    fn remove_by_id_is_noop_for_unknown_id() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_with(
            vec![record(1, "One"), record(2, "Two")],
            &dir.path().join("index.json"),
        );

        store.remove_by_id(2);
        assert_eq!(store.documents().len(), 1);

        store.remove_by_id(99);
        assert_eq!(store.documents().len(), 1);
        assert_eq!(store.documents()[0].id, 1);
    }

    #[test]
    fn rebuild_all_missing_folder_is_false() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = DocumentStore::new(dir.path().join("index.json"));
        assert!(!store.rebuild_all(&dir.path().join("no-such-folder")));
    }

    #[test]
    fn rebuild_all_indexes_in_filename_order() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("decks");
        fs::create_dir(&source).unwrap();

        write_single_slide_deck(&source.join("B Song.pptx"), "Grace");
        write_single_slide_deck(&source.join("A Song.pptx"), "Grace");
        // A non-deck file is ignored.
        fs::write(source.join("notes.txt"), "ignored").unwrap();
        // A broken deck is skipped, not fatal.
        fs::write(source.join("C Broken.pptx"), b"not a zip").unwrap();

        let mut store = DocumentStore::new(dir.path().join("index.json"));
        assert!(store.rebuild_all(&source));

        let docs = store.documents();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].id, 1);
        assert_eq!(docs[0].title, "A Song");
        assert_eq!(docs[1].id, 2);
        assert_eq!(docs[1].title, "B Song");
        assert_eq!(docs[0].lyrics, "Grace");

        // The rebuild also persisted the index.
        let mut fresh = DocumentStore::new(store.store_path());
        assert!(fresh.load_from_store());
        assert_eq!(fresh.documents().len(), 2);
    }

    #[test]
    fn rebuild_all_succeeds_even_when_save_fails() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("decks");
        fs::create_dir(&source).unwrap();
        write_single_slide_deck(&source.join("Song.pptx"), "Grace");

        // The store path is a directory, so persisting fails.
        let unwritable = dir.path().join("store-dir");
        fs::create_dir(&unwritable).unwrap();

        let mut store = DocumentStore::new(&unwritable);
        assert!(!store.save_to_store());
        assert!(store.rebuild_all(&source));
        assert_eq!(store.documents().len(), 1);
        assert_eq!(store.documents()[0].title, "Song");
    }

    /// Write a minimal real PPTX with one slide containing one line.
    fn write_single_slide_deck(path: &Path, line: &str) {
        use praise_core::StyleModel;
        use praise_pptx::{DeckWriter, SlidePlan};

        let style = StyleModel::default();
        let writer = DeckWriter::new(&style);
        writer
            .write(
                &[SlidePlan::Lyric {
                    lines: vec![line.to_string()],
                }],
                path,
            )
            .unwrap();
    }
}
