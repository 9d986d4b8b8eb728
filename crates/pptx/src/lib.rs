//! PPTX (Office Open XML) backend for the praise deck catalog.
//!
//! A `.pptx` file is a ZIP archive of XML parts. This crate reads decks for
//! indexing (`extract`), captures a template's visual styling (`style`), and
//! assembles new decks from sanitized lyric text (`compose`).

pub mod compose;
pub mod extract;
pub mod skeleton;
pub mod style;

pub use compose::{DeckWriter, SlidePlan};
pub use extract::DeckExtractor;
pub use style::StyleCapture;
