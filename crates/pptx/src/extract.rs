//! Per-slide lyric extraction from PPTX decks.
//!
//! Walks every shape's text body paragraph by paragraph, trims and
//! noise-filters each candidate line, and yields one [`SlideUnit`] per slide
//! that kept at least one line.

use praise_core::{is_noise_line, normalize_for_search, Error, Result, SlideUnit};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;
use zip::ZipArchive;

/// Extractor for lyric lines from a PPTX deck.
#[derive(Debug, Clone, Default)]
pub struct DeckExtractor {
    /// Skip lines whose search-normalized form was already seen within the
    /// same slide. Off by default (repeats are usually intentional chorus
    /// lines).
    dedup_lines: bool,
}

impl DeckExtractor {
    /// Create an extractor that preserves duplicate lines.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether identical lines within a slide are deduplicated.
    pub fn with_dedup(mut self, dedup: bool) -> Self {
        self.dedup_lines = dedup;
        self
    }

    /// Extract slide units from a deck on disk.
    pub fn extract_path(&self, path: &Path) -> Result<Vec<SlideUnit>> {
        let file = File::open(path)?;
        self.extract(BufReader::new(file))
    }

    /// Extract slide units from any seekable reader over PPTX bytes.
    pub fn extract<R: Read + Seek>(&self, reader: R) -> Result<Vec<SlideUnit>> {
        let mut archive = ZipArchive::new(reader)
            .map_err(|e| Error::Zip(format!("failed to open archive: {}", e)))?;

        let slide_paths = slide_order(&mut archive)?;
        let mut slides = Vec::new();

        for (idx, slide_path) in slide_paths.iter().enumerate() {
            let content = read_part(&mut archive, slide_path)?;
            let lines = self.extract_slide_lines(&content)?;
            // Slides that kept no lines are omitted entirely.
            if !lines.is_empty() {
                slides.push(SlideUnit::new(idx + 1, lines));
            }
        }

        Ok(slides)
    }

    /// Pull surviving lyric lines out of one slide's XML.
    fn extract_slide_lines(&self, xml_content: &str) -> Result<Vec<String>> {
        let mut reader = Reader::from_str(xml_content);
        reader.trim_text(true);

        let mut lines = Vec::new();
        let mut seen = HashSet::new();

        let mut in_text_body = false;
        let mut in_paragraph = false;
        let mut paragraph = String::new();

        loop {
            match reader.read_event() {
                Ok(Event::Start(ref e)) => match local_name(e.name().as_ref()) {
                    b"txBody" => in_text_body = true,
                    b"p" if in_text_body => {
                        in_paragraph = true;
                        paragraph.clear();
                    }
                    _ => {}
                },
                Ok(Event::Empty(ref e)) => {
                    // A line break inside a paragraph still separates lines.
                    if in_paragraph && local_name(e.name().as_ref()) == b"br" {
                        paragraph.push('\n');
                    }
                }
                Ok(Event::Text(ref e)) => {
                    if in_paragraph {
                        let text = e.unescape().unwrap_or_default();
                        paragraph.push_str(&text);
                    }
                }
                Ok(Event::End(ref e)) => match local_name(e.name().as_ref()) {
                    b"p" if in_paragraph => {
                        in_paragraph = false;
                        for candidate in paragraph.split('\n') {
                            self.push_line(candidate, &mut lines, &mut seen);
                        }
                    }
                    b"txBody" => in_text_body = false,
                    _ => {}
                },
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(Error::Xml(format!("error parsing slide: {}", e)));
                }
                _ => {}
            }
        }

        Ok(lines)
    }

    /// Trim, noise-filter, and optionally dedup one candidate line.
    fn push_line(&self, candidate: &str, lines: &mut Vec<String>, seen: &mut HashSet<String>) {
        let text = candidate.trim();
        if text.is_empty() || is_noise_line(text) {
            return;
        }
        if self.dedup_lines {
            let key = normalize_for_search(text);
            if !seen.insert(key) {
                return;
            }
        }
        lines.push(text.to_string());
    }
}

/// Get the ordered list of slide part paths from the presentation
/// relationships.
pub(crate) fn slide_order<R: Read + Seek>(archive: &mut ZipArchive<R>) -> Result<Vec<String>> {
    let rels_content = read_part(archive, "ppt/_rels/presentation.xml.rels")?;
    let mut slides: Vec<(String, Option<usize>)> = Vec::new();

    let mut reader = Reader::from_str(&rels_content);
    reader.trim_text(true);

    loop {
        match reader.read_event() {
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                if e.name().as_ref() == b"Relationship" =>
            {
                let mut rel_type = String::new();
                let mut target = String::new();
                let mut id = String::new();

                for attr in e.attributes().flatten() {
                    match attr.key.as_ref() {
                        b"Type" => rel_type = String::from_utf8_lossy(&attr.value).to_string(),
                        b"Target" => target = String::from_utf8_lossy(&attr.value).to_string(),
                        b"Id" => id = String::from_utf8_lossy(&attr.value).to_string(),
                        _ => {}
                    }
                }

                if rel_type.ends_with("/slide") {
                    let order = extract_part_number(&id).or_else(|| extract_part_number(&target));
                    let full_path = if let Some(stripped) = target.strip_prefix('/') {
                        stripped.to_string()
                    } else {
                        format!("ppt/{}", target)
                    };
                    slides.push((full_path, order));
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::Xml(format!("error parsing relationships: {}", e)));
            }
            _ => {}
        }
    }

    slides.sort_by(|a, b| match (a.1, b.1) {
        (Some(na), Some(nb)) => na.cmp(&nb),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => a.0.cmp(&b.0),
    });

    Ok(slides.into_iter().map(|(path, _)| path).collect())
}

/// Read one XML part from the package.
pub(crate) fn read_part<R: Read + Seek>(archive: &mut ZipArchive<R>, path: &str) -> Result<String> {
    let mut file = archive
        .by_name(path)
        .map_err(|e| Error::Zip(format!("part not found '{}': {}", path, e)))?;

    let mut content = String::new();
    file.read_to_string(&mut content)
        .map_err(|e| Error::Zip(format!("failed to read '{}': {}", path, e)))?;

    Ok(content)
}

/// Extract the local name from a potentially namespaced XML element name.
pub(crate) fn local_name(name: &[u8]) -> &[u8] {
    match name.iter().position(|&b| b == b':') {
        Some(pos) => &name[pos + 1..],
        None => name,
    }
}

/// Extract a trailing part number from a string like "rId2" or "slide3.xml".
fn extract_part_number(s: &str) -> Option<usize> {
    let s = s.trim_end_matches(".xml").trim_end_matches(".rels");

    let digits: String = s.chars().rev().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    digits.chars().rev().collect::<String>().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skeleton::test_fixtures::deck_from_slides;
    use std::io::Cursor;

    #[test]
    fn extract_part_number_variants() {
        assert_eq!(extract_part_number("rId1"), Some(1));
        assert_eq!(extract_part_number("rId12"), Some(12));
        assert_eq!(extract_part_number("slide3.xml"), Some(3));
        assert_eq!(extract_part_number("nodigits"), None);
    }

    #[test]
    fn local_name_strips_prefix() {
        assert_eq!(local_name(b"p:sp"), b"sp");
        assert_eq!(local_name(b"a:t"), b"t");
        assert_eq!(local_name(b"sp"), b"sp");
    }

    #[test]
    fn extracts_lines_per_slide() {
        let deck = deck_from_slides(&[
            vec!["Amazing grace", "How sweet the sound"],
            vec!["That saved a wretch like me"],
        ]);
        let slides = DeckExtractor::new().extract(Cursor::new(deck)).unwrap();

        assert_eq!(slides.len(), 2);
        assert_eq!(slides[0].slide_number, 1);
        assert_eq!(slides[0].lines, vec!["Amazing grace", "How sweet the sound"]);
        assert_eq!(slides[1].lines, vec!["That saved a wretch like me"]);
    }

    #[test]
    fn noise_lines_are_dropped_and_empty_slides_omitted() {
        let deck = deck_from_slides(&[vec!["---", "!!!", "ㄴㄴㄴ"], vec!["Real lyric"]]);
        let slides = DeckExtractor::new().extract(Cursor::new(deck)).unwrap();

        // First slide had only noise, so only the second survives; its slide
        // number still reflects the source position.
        assert_eq!(slides.len(), 1);
        assert_eq!(slides[0].slide_number, 2);
        assert_eq!(slides[0].lines, vec!["Real lyric"]);
    }

    #[test]
    fn dedup_is_scoped_per_slide() {
        let deck = deck_from_slides(&[vec!["Chorus line", "chorus  line"], vec!["Chorus line"]]);
        let slides = DeckExtractor::new()
            .with_dedup(true)
            .extract(Cursor::new(deck))
            .unwrap();

        assert_eq!(slides.len(), 2);
        // Within the slide the case/whitespace variant is deduped.
        assert_eq!(slides[0].lines, vec!["Chorus line"]);
        // The next slide starts a fresh seen-set.
        assert_eq!(slides[1].lines, vec!["Chorus line"]);
    }

    #[test]
    fn duplicates_preserved_without_dedup() {
        let deck = deck_from_slides(&[vec!["La la land", "La la land"]]);
        let slides = DeckExtractor::new().extract(Cursor::new(deck)).unwrap();
        assert_eq!(slides[0].lines, vec!["La la land", "La la land"]);
    }

    #[test]
    fn malformed_archive_is_an_error() {
        let result = DeckExtractor::new().extract(Cursor::new(b"not a zip".to_vec()));
        assert!(result.is_err());
    }
}
