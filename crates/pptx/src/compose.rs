//! Output deck composition.
//!
//! Builds a new PPTX from a slide plan: either on top of a template package
//! (every part except its slides is carried over, so theme and master
//! styling survive) or on top of the built-in skeleton when no template is
//! available.

use praise_core::style::{Background, Geometry, LineStyle, StyleModel, TextColor, TextRunStyle};
use praise_core::{Error, Result};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use regex::Regex;
use std::fs::File;
use std::io::{BufReader, Cursor, Seek, Write};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use zip::write::FileOptions;
use zip::{ZipArchive, ZipWriter};

use crate::skeleton;

/// Existing slide `<Override>` entries in `[Content_Types].xml`.
static SLIDE_OVERRIDE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<Override[^>]*PartName="/ppt/slides/[^"]*"[^>]*/>"#).unwrap());

/// Existing slide relationships in `presentation.xml.rels` (layouts and
/// masters have longer type suffixes and do not match).
static SLIDE_REL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<Relationship[^>]*Type="[^"]*/slide"[^>]*/>"#).unwrap());

/// Relationship ids, for computing the next free `rId`.
static REL_ID_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"Id="rId(\d+)""#).unwrap());

/// The slide id list in `presentation.xml`, expanded or self-closing.
static SLD_ID_LST_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<p:sldIdLst>.*?</p:sldIdLst>|<p:sldIdLst\s*/>").unwrap());

/// One planned output slide.
#[derive(Debug, Clone, PartialEq)]
pub enum SlidePlan {
    /// Blank styled slide; the visual break between songs.
    Separator,
    /// Lyric slide rendering the given sanitized lines.
    Lyric { lines: Vec<String> },
}

impl SlidePlan {
    /// Plan a lyric slide from sanitized text.
    pub fn lyric(text: &str) -> Self {
        SlidePlan::Lyric {
            lines: text.split('\n').map(str::to_string).collect(),
        }
    }
}

/// Writes a slide plan out as a PPTX package.
pub struct DeckWriter<'a> {
    style: &'a StyleModel,
    template: Option<PathBuf>,
}

impl<'a> DeckWriter<'a> {
    /// Create a writer that composes on the built-in skeleton.
    pub fn new(style: &'a StyleModel) -> Self {
        Self {
            style,
            template: None,
        }
    }

    /// Compose on top of the given template package instead. A missing
    /// template file falls back to the skeleton at write time.
    pub fn with_template(mut self, path: impl Into<PathBuf>) -> Self {
        self.template = Some(path.into());
        self
    }

    /// Assemble and persist the deck. I/O errors surface as [`Error::Io`]
    /// so callers can classify contention.
    pub fn write(&self, slides: &[SlidePlan], output: &Path) -> Result<()> {
        let file = File::create(output)?;
        self.write_to(slides, file)?;
        Ok(())
    }

    /// Assemble the deck into any writer (testable in memory).
    pub fn write_to<W: Write + Seek>(&self, slides: &[SlidePlan], out: W) -> Result<()> {
        match self.template.as_deref().filter(|p| p.exists()) {
            Some(template) => self.write_from_template(template, slides, out),
            None => self.write_from_skeleton(slides, out),
        }
    }

    /// Template-shell mode: carry every template part except its slides,
    /// then append ours.
    fn write_from_template<W: Write + Seek>(
        &self,
        template: &Path,
        slides: &[SlidePlan],
        out: W,
    ) -> Result<()> {
        let file = File::open(template)?;
        let mut archive = ZipArchive::new(BufReader::new(file))
            .map_err(|e| Error::Zip(format!("failed to open template: {}", e)))?;

        let content_types = crate::extract::read_part(&mut archive, "[Content_Types].xml")?;
        let presentation = crate::extract::read_part(&mut archive, "ppt/presentation.xml")?;
        let pres_rels =
            crate::extract::read_part(&mut archive, "ppt/_rels/presentation.xml.rels")?;

        let layout_target = pick_layout_target(&mut archive);

        let mut zip = ZipWriter::new(out);

        // Pass through everything that is not a slide or a patched list.
        for i in 0..archive.len() {
            let entry = archive
                .by_index_raw(i)
                .map_err(|e| Error::Zip(format!("failed to read template entry: {}", e)))?;
            let name = entry.name().to_string();
            if name.starts_with("ppt/slides/")
                || name == "[Content_Types].xml"
                || name == "ppt/presentation.xml"
                || name == "ppt/_rels/presentation.xml.rels"
            {
                continue;
            }
            zip.raw_copy_file(entry)
                .map_err(|e| Error::Zip(format!("failed to copy '{}': {}", name, e)))?;
        }

        self.write_slide_parts(
            &mut zip,
            slides,
            &layout_target,
            &content_types,
            &presentation,
            &pres_rels,
            false,
        )?;

        zip.finish()
            .map_err(|e| Error::Zip(format!("failed to finish package: {}", e)))?;
        Ok(())
    }

    /// Skeleton mode: minimal built-in package, explicit background on each
    /// slide.
    fn write_from_skeleton<W: Write + Seek>(&self, slides: &[SlidePlan], out: W) -> Result<()> {
        let mut zip = ZipWriter::new(out);
        let options: FileOptions = FileOptions::default();

        let parts: [(&str, String); 6] = [
            ("_rels/.rels", skeleton::ROOT_RELS.to_string()),
            (
                "ppt/slideMasters/slideMaster1.xml",
                skeleton::SLIDE_MASTER.to_string(),
            ),
            (
                "ppt/slideMasters/_rels/slideMaster1.xml.rels",
                skeleton::SLIDE_MASTER_RELS.to_string(),
            ),
            (
                "ppt/slideLayouts/slideLayout1.xml",
                skeleton::SLIDE_LAYOUT.to_string(),
            ),
            (
                "ppt/slideLayouts/_rels/slideLayout1.xml.rels",
                skeleton::SLIDE_LAYOUT_RELS.to_string(),
            ),
            ("ppt/theme/theme1.xml", skeleton::THEME.to_string()),
        ];
        for (name, body) in parts {
            zip.start_file(name, options)
                .map_err(|e| Error::Zip(format!("failed to add '{}': {}", name, e)))?;
            zip.write_all(body.as_bytes())?;
        }

        let presentation =
            skeleton::presentation_xml(self.style.slide_size.width, self.style.slide_size.height);

        self.write_slide_parts(
            &mut zip,
            slides,
            skeleton::SKELETON_LAYOUT_TARGET,
            skeleton::CONTENT_TYPES,
            &presentation,
            skeleton::PRESENTATION_RELS,
            true,
        )?;

        zip.finish()
            .map_err(|e| Error::Zip(format!("failed to finish package: {}", e)))?;
        Ok(())
    }

    /// Write the slide XML parts plus the three patched package lists.
    #[allow(clippy::too_many_arguments)]
    fn write_slide_parts<W: Write + Seek>(
        &self,
        zip: &mut ZipWriter<W>,
        slides: &[SlidePlan],
        layout_target: &str,
        content_types: &str,
        presentation: &str,
        pres_rels: &str,
        explicit_background: bool,
    ) -> Result<()> {
        let options: FileOptions = FileOptions::default();

        // Strip whatever slides the source package declared.
        let content_types = SLIDE_OVERRIDE_REGEX.replace_all(content_types, "");
        let pres_rels = SLIDE_REL_REGEX.replace_all(pres_rels, "");

        let next_rid = REL_ID_REGEX
            .captures_iter(pres_rels.as_ref())
            .filter_map(|c| c[1].parse::<usize>().ok())
            .max()
            .unwrap_or(0)
            + 1;

        let mut overrides = String::new();
        let mut rels = String::new();
        let mut sld_ids = String::new();

        for (idx, plan) in slides.iter().enumerate() {
            let n = idx + 1;
            let rid = next_rid + idx;

            let slide_xml = self.slide_xml(plan, explicit_background)?;
            zip.start_file(format!("ppt/slides/slide{n}.xml"), options)
                .map_err(|e| Error::Zip(format!("failed to add slide {}: {}", n, e)))?;
            zip.write_all(slide_xml.as_bytes())?;

            let slide_rels = format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout" Target="{layout_target}"/></Relationships>"#
            );
            zip.start_file(format!("ppt/slides/_rels/slide{n}.xml.rels"), options)
                .map_err(|e| Error::Zip(format!("failed to add slide rels {}: {}", n, e)))?;
            zip.write_all(slide_rels.as_bytes())?;

            overrides.push_str(&format!(
                r#"<Override PartName="/ppt/slides/slide{n}.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slide+xml"/>"#
            ));
            rels.push_str(&format!(
                r#"<Relationship Id="rId{rid}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="slides/slide{n}.xml"/>"#
            ));
            sld_ids.push_str(&format!(r#"<p:sldId id="{}" r:id="rId{rid}"/>"#, 255 + n));
        }

        let content_types = content_types.replace("</Types>", &format!("{overrides}</Types>"));
        zip.start_file("[Content_Types].xml", options)
            .map_err(|e| Error::Zip(format!("failed to add content types: {}", e)))?;
        zip.write_all(content_types.as_bytes())?;

        let pres_rels = pres_rels.replace("</Relationships>", &format!("{rels}</Relationships>"));
        zip.start_file("ppt/_rels/presentation.xml.rels", options)
            .map_err(|e| Error::Zip(format!("failed to add presentation rels: {}", e)))?;
        zip.write_all(pres_rels.as_bytes())?;

        let new_list = format!("<p:sldIdLst>{sld_ids}</p:sldIdLst>");
        let presentation = if SLD_ID_LST_REGEX.is_match(presentation) {
            SLD_ID_LST_REGEX.replace(presentation, new_list.as_str()).to_string()
        } else {
            // A template without a slide list gets one after the masters.
            presentation.replacen(
                "</p:sldMasterIdLst>",
                &format!("</p:sldMasterIdLst>{new_list}"),
                1,
            )
        };
        zip.start_file("ppt/presentation.xml", options)
            .map_err(|e| Error::Zip(format!("failed to add presentation: {}", e)))?;
        zip.write_all(presentation.as_bytes())?;

        Ok(())
    }

    /// Render one slide's XML.
    fn slide_xml(&self, plan: &SlidePlan, explicit_background: bool) -> Result<String> {
        let mut writer = Writer::new(Cursor::new(Vec::new()));

        emit(
            &mut writer,
            Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))),
        )?;

        let mut sld = BytesStart::new("p:sld");
        sld.push_attribute((
            "xmlns:a",
            "http://schemas.openxmlformats.org/drawingml/2006/main",
        ));
        sld.push_attribute((
            "xmlns:r",
            "http://schemas.openxmlformats.org/officeDocument/2006/relationships",
        ));
        sld.push_attribute((
            "xmlns:p",
            "http://schemas.openxmlformats.org/presentationml/2006/main",
        ));
        emit(&mut writer, Event::Start(sld))?;
        start(&mut writer, "p:cSld", &[])?;

        if explicit_background {
            self.emit_background(&mut writer)?;
        }

        start(&mut writer, "p:spTree", &[])?;
        start(&mut writer, "p:nvGrpSpPr", &[])?;
        empty(&mut writer, "p:cNvPr", &[("id", "1"), ("name", "")])?;
        empty(&mut writer, "p:cNvGrpSpPr", &[])?;
        empty(&mut writer, "p:nvPr", &[])?;
        end(&mut writer, "p:nvGrpSpPr")?;
        empty(&mut writer, "p:grpSpPr", &[])?;

        if let SlidePlan::Lyric { lines } = plan {
            let mut shape_id = 2u64;
            for connector in self.style.connectors() {
                self.emit_connector(&mut writer, shape_id, connector.geometry, &connector.line)?;
                shape_id += 1;
            }
            self.emit_lyric_textbox(&mut writer, shape_id, lines)?;
        }

        end(&mut writer, "p:spTree")?;
        end(&mut writer, "p:cSld")?;
        start(&mut writer, "p:clrMapOvr", &[])?;
        empty(&mut writer, "a:masterClrMapping", &[])?;
        end(&mut writer, "p:clrMapOvr")?;
        end(&mut writer, "p:sld")?;

        let bytes = writer.into_inner().into_inner();
        String::from_utf8(bytes).map_err(|e| Error::Xml(format!("invalid slide XML: {}", e)))
    }

    /// Paint the captured background explicitly (skeleton mode only; a
    /// template's own layout/master supplies it otherwise). Image and video
    /// backgrounds cannot be carried without their media parts and fall back
    /// to solid black, matching the capture defaults.
    fn emit_background<W: Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        start(writer, "p:bg", &[])?;
        start(writer, "p:bgPr", &[])?;
        match &self.style.background {
            Background::Solid { color } => {
                start(writer, "a:solidFill", &[])?;
                empty(writer, "a:srgbClr", &[("val", color.as_str())])?;
                end(writer, "a:solidFill")?;
            }
            Background::Gradient { stops } => {
                start(writer, "a:gradFill", &[])?;
                start(writer, "a:gsLst", &[])?;
                for stop in stops {
                    start(writer, "a:gs", &[("pos", stop.position.to_string().as_str())])?;
                    empty(writer, "a:srgbClr", &[("val", stop.color.as_str())])?;
                    end(writer, "a:gs")?;
                }
                end(writer, "a:gsLst")?;
                empty(writer, "a:lin", &[("ang", "5400000"), ("scaled", "1")])?;
                end(writer, "a:gradFill")?;
            }
            Background::Theme { color_ref } => {
                start(writer, "a:solidFill", &[])?;
                empty(writer, "a:schemeClr", &[("val", color_ref.as_str())])?;
                end(writer, "a:solidFill")?;
            }
            Background::Image { .. } | Background::Video { .. } => {
                start(writer, "a:solidFill", &[])?;
                empty(writer, "a:srgbClr", &[("val", "000000")])?;
                end(writer, "a:solidFill")?;
            }
        }
        empty(writer, "a:effectLst", &[])?;
        end(writer, "p:bgPr")?;
        end(writer, "p:bg")?;
        Ok(())
    }

    /// Replay one captured connector at its captured geometry and line
    /// style.
    fn emit_connector<W: Write>(
        &self,
        writer: &mut Writer<W>,
        id: u64,
        geometry: Geometry,
        line: &LineStyle,
    ) -> Result<()> {
        let id_string = id.to_string();
        let name = format!("Straight Connector {}", id);

        start(writer, "p:cxnSp", &[])?;
        start(writer, "p:nvCxnSpPr", &[])?;
        empty(
            writer,
            "p:cNvPr",
            &[("id", id_string.as_str()), ("name", name.as_str())],
        )?;
        empty(writer, "p:cNvCxnSpPr", &[])?;
        empty(writer, "p:nvPr", &[])?;
        end(writer, "p:nvCxnSpPr")?;

        start(writer, "p:spPr", &[])?;
        emit_xfrm(writer, geometry)?;
        start(writer, "a:prstGeom", &[("prst", "line")])?;
        empty(writer, "a:avLst", &[])?;
        end(writer, "a:prstGeom")?;
        start(writer, "a:ln", &[("w", line.width.to_string().as_str())])?;
        start(writer, "a:solidFill", &[])?;
        empty(writer, "a:srgbClr", &[("val", line.color.as_str())])?;
        end(writer, "a:solidFill")?;
        end(writer, "a:ln")?;
        end(writer, "p:spPr")?;
        end(writer, "p:cxnSp")?;
        Ok(())
    }

    /// The lyric textbox: captured geometry and first-run typography when
    /// the template offered a lyric shape, else the default box styled by
    /// the first captured text run, else the documented defaults.
    fn emit_lyric_textbox<W: Write>(
        &self,
        writer: &mut Writer<W>,
        id: u64,
        lines: &[String],
    ) -> Result<()> {
        let lyric_shape = self.style.lyric_shape();
        let geometry = lyric_shape
            .map(|s| s.geometry)
            .unwrap_or_else(|| self.style.default_lyric_geometry());
        // Without a lyric shape the first captured run anywhere on the
        // slide still supplies the typography.
        let run_style = lyric_shape
            .and_then(|s| s.text_runs.first())
            .or_else(|| self.style.text_styles.first());

        let id_string = id.to_string();
        start(writer, "p:sp", &[])?;
        start(writer, "p:nvSpPr", &[])?;
        empty(
            writer,
            "p:cNvPr",
            &[("id", id_string.as_str()), ("name", "Lyrics")],
        )?;
        empty(writer, "p:cNvSpPr", &[("txBox", "1")])?;
        empty(writer, "p:nvPr", &[])?;
        end(writer, "p:nvSpPr")?;

        start(writer, "p:spPr", &[])?;
        emit_xfrm(writer, geometry)?;
        start(writer, "a:prstGeom", &[("prst", "rect")])?;
        empty(writer, "a:avLst", &[])?;
        end(writer, "a:prstGeom")?;
        empty(writer, "a:noFill", &[])?;
        end(writer, "p:spPr")?;

        start(writer, "p:txBody", &[])?;
        empty(writer, "a:bodyPr", &[("wrap", "square"), ("anchor", "ctr")])?;
        empty(writer, "a:lstStyle", &[])?;

        for line in lines {
            start(writer, "a:p", &[])?;
            empty(writer, "a:pPr", &[("algn", "ctr")])?;
            if line.is_empty() {
                // Blank paragraph keeps stanza spacing.
                empty(writer, "a:endParaRPr", &[("lang", "ko-KR")])?;
            } else {
                start(writer, "a:r", &[])?;
                emit_run_properties(writer, run_style)?;
                start(writer, "a:t", &[])?;
                emit(writer, Event::Text(BytesText::new(line)))?;
                end(writer, "a:t")?;
                end(writer, "a:r")?;
            }
            end(writer, "a:p")?;
        }

        end(writer, "p:txBody")?;
        end(writer, "p:sp")?;
        Ok(())
    }
}

/// Emit `a:rPr` for a lyric run: template typography when captured,
/// otherwise Malgun Gothic 18 pt white.
fn emit_run_properties<W: Write>(
    writer: &mut Writer<W>,
    run_style: Option<&TextRunStyle>,
) -> Result<()> {
    let size_pt = run_style.and_then(|s| s.font_size).unwrap_or(18.0);
    let size = ((size_pt * 100.0) as i64).to_string();
    let font = run_style
        .and_then(|s| s.font_name.as_deref())
        .unwrap_or("맑은 고딕");

    let mut rpr = BytesStart::new("a:rPr");
    rpr.push_attribute(("lang", "ko-KR"));
    rpr.push_attribute(("sz", size.as_str()));
    if run_style.is_some_and(|s| s.bold) {
        rpr.push_attribute(("b", "1"));
    }
    if run_style.is_some_and(|s| s.italic) {
        rpr.push_attribute(("i", "1"));
    }
    if run_style.is_some_and(|s| s.underline) {
        rpr.push_attribute(("u", "sng"));
    }
    emit(writer, Event::Start(rpr))?;

    start(writer, "a:solidFill", &[])?;
    match run_style.map(|s| &s.color) {
        Some(TextColor::Theme(token)) => empty(writer, "a:schemeClr", &[("val", token.as_str())])?,
        Some(TextColor::Rgb(hex)) => empty(writer, "a:srgbClr", &[("val", hex.as_str())])?,
        None => empty(writer, "a:srgbClr", &[("val", "FFFFFF")])?,
    }
    end(writer, "a:solidFill")?;

    empty(writer, "a:latin", &[("typeface", font)])?;
    end(writer, "a:rPr")?;
    Ok(())
}

fn emit_xfrm<W: Write>(writer: &mut Writer<W>, geometry: Geometry) -> Result<()> {
    start(writer, "a:xfrm", &[])?;
    empty(
        writer,
        "a:off",
        &[
            ("x", geometry.left.to_string().as_str()),
            ("y", geometry.top.to_string().as_str()),
        ],
    )?;
    empty(
        writer,
        "a:ext",
        &[
            ("cx", geometry.width.to_string().as_str()),
            ("cy", geometry.height.to_string().as_str()),
        ],
    )?;
    end(writer, "a:xfrm")?;
    Ok(())
}

/// Prefer the template's blank layout (`slideLayout7.xml` in stock decks),
/// else the highest-numbered layout, else the skeleton layout name.
fn pick_layout_target<R: std::io::Read + Seek>(archive: &mut ZipArchive<R>) -> String {
    let mut best: Option<usize> = None;
    let mut has_seven = false;

    for name in archive.file_names() {
        if let Some(rest) = name.strip_prefix("ppt/slideLayouts/slideLayout") {
            if let Some(num) = rest.strip_suffix(".xml").and_then(|s| s.parse::<usize>().ok()) {
                if num == 7 {
                    has_seven = true;
                }
                best = Some(best.map_or(num, |b: usize| b.max(num)));
            }
        }
    }

    let chosen = if has_seven { 7 } else { best.unwrap_or(1) };
    format!("../slideLayouts/slideLayout{}.xml", chosen)
}

// quick-xml writer helpers.

fn emit<W: Write>(writer: &mut Writer<W>, event: Event) -> Result<()> {
    writer
        .write_event(event)
        .map_err(|e| Error::Xml(format!("failed to write slide XML: {}", e)))
}

fn start<W: Write>(writer: &mut Writer<W>, name: &str, attrs: &[(&str, &str)]) -> Result<()> {
    let mut elem = BytesStart::new(name);
    for (key, value) in attrs {
        elem.push_attribute((*key, *value));
    }
    emit(writer, Event::Start(elem))
}

fn empty<W: Write>(writer: &mut Writer<W>, name: &str, attrs: &[(&str, &str)]) -> Result<()> {
    let mut elem = BytesStart::new(name);
    for (key, value) in attrs {
        elem.push_attribute((*key, *value));
    }
    emit(writer, Event::Empty(elem))
}

fn end<W: Write>(writer: &mut Writer<W>, name: &str) -> Result<()> {
    emit(writer, Event::End(BytesEnd::new(name)))
}
