//! Template style capture.
//!
//! Reads only the first slide of a template deck and distills it into a
//! [`StyleModel`]: slide size, a background descriptor, and per-shape
//! geometry/fill/line/text-run styling. Capture failures degrade to the
//! documented defaults rather than aborting synthesis.

use praise_core::style::{
    Background, Fill, Geometry, LineStyle, ShapeKind, ShapeStyle, SlideSize, StyleModel, TextColor,
    TextRunStyle,
};
use praise_core::{Error, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;
use zip::ZipArchive;

use crate::extract::{local_name, read_part, slide_order};

/// Captures a [`StyleModel`] from a template deck's first slide.
pub struct StyleCapture;

impl StyleCapture {
    /// Capture from a template on disk.
    pub fn capture_path(path: &Path) -> Result<StyleModel> {
        let file = File::open(path)?;
        Self::capture(BufReader::new(file))
    }

    /// Capture from any seekable reader over template PPTX bytes.
    pub fn capture<R: Read + Seek>(reader: R) -> Result<StyleModel> {
        let mut archive = ZipArchive::new(reader)
            .map_err(|e| Error::Zip(format!("failed to open template: {}", e)))?;

        let slide_size = read_slide_size(&mut archive)?;

        let first_slide = match slide_order(&mut archive)?.into_iter().next() {
            Some(path) => path,
            None => {
                log::warn!("template has no slides; using default styling");
                return Ok(StyleModel {
                    slide_size,
                    ..Default::default()
                });
            }
        };

        let rels = read_slide_rels(&mut archive, &first_slide);
        let content = read_part(&mut archive, &first_slide)?;

        let mut model = parse_slide_styles(&content, &rels, slide_size)?;
        model.slide_size = slide_size;
        Ok(model)
    }
}

/// Read `p:sldSz` from `ppt/presentation.xml`; defaults on absence.
fn read_slide_size<R: Read + Seek>(archive: &mut ZipArchive<R>) -> Result<SlideSize> {
    let content = read_part(archive, "ppt/presentation.xml")?;
    let mut reader = Reader::from_str(&content);
    reader.trim_text(true);

    let mut size = SlideSize::default();
    loop {
        match reader.read_event() {
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                if local_name(e.name().as_ref()) == b"sldSz" =>
            {
                for attr in e.attributes().flatten() {
                    let value = String::from_utf8_lossy(&attr.value);
                    match attr.key.as_ref() {
                        b"cx" => {
                            if let Ok(cx) = value.parse() {
                                size.width = cx;
                            }
                        }
                        b"cy" => {
                            if let Ok(cy) = value.parse() {
                                size.height = cy;
                            }
                        }
                        _ => {}
                    }
                }
                break;
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::Xml(format!("error parsing presentation: {}", e))),
            _ => {}
        }
    }
    Ok(size)
}

/// A slide's relationships: id -> (type, target).
type RelMap = HashMap<String, (String, String)>;

/// Read the rels part belonging to a slide; absent rels yield an empty map.
fn read_slide_rels<R: Read + Seek>(archive: &mut ZipArchive<R>, slide_path: &str) -> RelMap {
    let rels_path = match slide_path.rsplit_once('/') {
        Some((dir, name)) => format!("{}/_rels/{}.rels", dir, name),
        None => return RelMap::new(),
    };

    let content = match read_part(archive, &rels_path) {
        Ok(c) => c,
        Err(_) => return RelMap::new(),
    };

    let mut rels = RelMap::new();
    let mut reader = Reader::from_str(&content);
    reader.trim_text(true);

    loop {
        match reader.read_event() {
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                if e.name().as_ref() == b"Relationship" =>
            {
                let mut id = String::new();
                let mut rel_type = String::new();
                let mut target = String::new();
                for attr in e.attributes().flatten() {
                    match attr.key.as_ref() {
                        b"Id" => id = String::from_utf8_lossy(&attr.value).to_string(),
                        b"Type" => rel_type = String::from_utf8_lossy(&attr.value).to_string(),
                        b"Target" => target = String::from_utf8_lossy(&attr.value).to_string(),
                        _ => {}
                    }
                }
                if !id.is_empty() {
                    rels.insert(id, (rel_type, target));
                }
            }
            Ok(Event::Eof) => break,
            Err(_) => break,
            _ => {}
        }
    }
    rels
}

/// Shape being assembled while walking the slide XML.
#[derive(Debug)]
struct ShapeBuilder {
    kind: ShapeKind,
    geometry: Geometry,
    fill: Fill,
    line: LineStyle,
    runs: Vec<TextRunStyle>,
    is_connector: bool,
    /// Media target of an image blip, if any.
    image_target: Option<String>,
    /// Media target of a linked/embedded video, if any.
    video_target: Option<String>,
}

impl ShapeBuilder {
    fn new(kind: ShapeKind) -> Self {
        Self {
            kind,
            geometry: Geometry::default(),
            fill: Fill::None,
            line: LineStyle::default(),
            runs: Vec::new(),
            is_connector: kind == ShapeKind::Connector,
            image_target: None,
            video_target: None,
        }
    }

    fn finish(self) -> ShapeStyle {
        ShapeStyle {
            kind: self.kind,
            geometry: self.geometry,
            text_runs: self.runs,
            fill: self.fill,
            line: self.line,
            is_connector: self.is_connector,
        }
    }
}

/// Backgrounds competing during capture, resolved by precedence afterwards.
#[derive(Debug, Default)]
struct BackgroundCandidates {
    video: Option<Background>,
    image: Option<Background>,
    fill: Option<Background>,
}

impl BackgroundCandidates {
    /// Resolution order: video, then image, then background fill, then
    /// solid black.
    fn resolve(self) -> Background {
        self.video
            .or(self.image)
            .or(self.fill)
            .unwrap_or_else(Background::default_solid)
    }
}

/// Walk the slide XML once, building shape descriptors and background
/// candidates.
fn parse_slide_styles(xml_content: &str, rels: &RelMap, slide_size: SlideSize) -> Result<StyleModel> {
    let mut reader = Reader::from_str(xml_content);
    reader.trim_text(true);

    let full_slide = Geometry {
        left: 0,
        top: 0,
        width: slide_size.width,
        height: slide_size.height,
    };

    let mut stack: Vec<Vec<u8>> = Vec::new();
    let mut shapes: Vec<ShapeStyle> = Vec::new();
    let mut current: Option<ShapeBuilder> = None;
    let mut current_run: Option<TextRunStyle> = None;
    let mut bg = BackgroundCandidates::default();

    loop {
        let event = reader.read_event();
        match event {
            Ok(Event::Start(ref e)) => {
                handle_element(
                    e,
                    &stack,
                    rels,
                    full_slide,
                    &mut current,
                    &mut current_run,
                    &mut bg,
                );
                stack.push(local_name(e.name().as_ref()).to_vec());
            }
            Ok(Event::Empty(ref e)) => {
                handle_element(
                    e,
                    &stack,
                    rels,
                    full_slide,
                    &mut current,
                    &mut current_run,
                    &mut bg,
                );
            }
            Ok(Event::Text(ref e)) => {
                if stack.last().map(|n| n.as_slice()) == Some(b"t") {
                    if let Some(run) = current_run.as_mut() {
                        let text = e.unescape().unwrap_or_default();
                        run.text.push_str(&text);
                    }
                }
            }
            Ok(Event::End(ref e)) => {
                let name = local_name(e.name().as_ref()).to_vec();
                stack.pop();

                match name.as_slice() {
                    b"sp" | b"pic" | b"cxnSp" => {
                        if let Some(builder) = current.take() {
                            // Picture shapes feed the background candidates.
                            if let Some(video) = &builder.video_target {
                                bg.video.get_or_insert(Background::Video {
                                    path: video.clone(),
                                    geometry: builder.geometry,
                                });
                            } else if let Some(image) = &builder.image_target {
                                bg.image.get_or_insert(Background::Image {
                                    path: image.clone(),
                                    geometry: builder.geometry,
                                });
                            }
                            shapes.push(builder.finish());
                        }
                    }
                    b"r" => {
                        if let Some(run) = current_run.take() {
                            if let Some(shape) = current.as_mut() {
                                if !run.text.trim().is_empty() {
                                    shape.runs.push(run);
                                }
                            }
                        }
                    }
                    _ => {}
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::Xml(format!("error parsing template slide: {}", e))),
            _ => {}
        }
    }

    // Linked videos can also live purely in the relationships.
    if bg.video.is_none() {
        if let Some((_, target)) = rels.values().find(|(t, _)| t.ends_with("/video")) {
            bg.video = Some(Background::Video {
                path: target.clone(),
                geometry: full_slide,
            });
        }
    }

    let text_styles = shapes
        .iter()
        .filter(|s| s.has_text())
        .flat_map(|s| s.text_runs.iter().cloned())
        .collect();

    Ok(StyleModel {
        slide_size,
        background: bg.resolve(),
        shapes,
        text_styles,
    })
}

/// Dispatch on one opening or empty element.
fn handle_element(
    e: &BytesStart,
    stack: &[Vec<u8>],
    rels: &RelMap,
    full_slide: Geometry,
    current: &mut Option<ShapeBuilder>,
    current_run: &mut Option<TextRunStyle>,
    bg: &mut BackgroundCandidates,
) {
    let qname = e.name();
    let name = local_name(qname.as_ref());
    match name {
        b"sp" => *current = Some(ShapeBuilder::new(ShapeKind::TextBox)),
        b"pic" => *current = Some(ShapeBuilder::new(ShapeKind::Picture)),
        b"cxnSp" => *current = Some(ShapeBuilder::new(ShapeKind::Connector)),

        b"off" => {
            if in_shape_transform(stack) {
                if let Some(shape) = current.as_mut() {
                    for attr in e.attributes().flatten() {
                        let value = String::from_utf8_lossy(&attr.value);
                        match attr.key.as_ref() {
                            b"x" => shape.geometry.left = value.parse().unwrap_or(0),
                            b"y" => shape.geometry.top = value.parse().unwrap_or(0),
                            _ => {}
                        }
                    }
                }
            }
        }
        b"ext" => {
            if in_shape_transform(stack) {
                if let Some(shape) = current.as_mut() {
                    for attr in e.attributes().flatten() {
                        let value = String::from_utf8_lossy(&attr.value);
                        match attr.key.as_ref() {
                            b"cx" => shape.geometry.width = value.parse().unwrap_or(0),
                            b"cy" => shape.geometry.height = value.parse().unwrap_or(0),
                            _ => {}
                        }
                    }
                }
            }
        }

        b"ln" => {
            if let Some(shape) = current.as_mut() {
                for attr in e.attributes().flatten() {
                    if attr.key.as_ref() == b"w" {
                        if let Ok(w) = String::from_utf8_lossy(&attr.value).parse() {
                            shape.line.width = w;
                        }
                    }
                }
            }
        }

        b"srgbClr" => {
            let val = attr_value(e, b"val").unwrap_or_default().to_uppercase();
            match color_context(stack) {
                ColorContext::BackgroundFill => {
                    bg.fill.get_or_insert(Background::Solid { color: val });
                }
                ColorContext::ShapeFill => {
                    if let Some(shape) = current.as_mut() {
                        shape.fill = Fill::Solid { color: val };
                    }
                }
                ColorContext::Line => {
                    if let Some(shape) = current.as_mut() {
                        shape.line.color = val;
                    }
                }
                ColorContext::Run => {
                    if let Some(run) = current_run.as_mut() {
                        run.color = TextColor::Rgb(val);
                    }
                }
                ColorContext::Other => {}
            }
        }
        b"schemeClr" => {
            let val = attr_value(e, b"val").unwrap_or_default();
            match color_context(stack) {
                ColorContext::BackgroundFill => {
                    bg.fill.get_or_insert(Background::Theme { color_ref: val });
                }
                ColorContext::Run => {
                    if let Some(run) = current_run.as_mut() {
                        run.color = TextColor::Theme(val);
                    }
                }
                _ => {}
            }
        }

        b"gradFill" => {
            if parent_is(stack, b"bgPr") {
                // Arbitrary gradient reconstruction is out of scope; a fixed
                // two-stop stand-in is recorded instead.
                bg.fill.get_or_insert(Background::synthesized_gradient());
            } else if parent_is(stack, b"spPr") {
                if let Some(shape) = current.as_mut() {
                    shape.fill = Fill::Gradient;
                }
            }
        }
        b"pattFill" => {
            if parent_is(stack, b"spPr") {
                if let Some(shape) = current.as_mut() {
                    shape.fill = Fill::Pattern;
                }
            }
        }
        b"noFill" => {
            if parent_is(stack, b"spPr") {
                if let Some(shape) = current.as_mut() {
                    shape.fill = Fill::None;
                }
            }
        }

        b"blipFill" => {
            // A picture-type background fill covers the whole slide.
            if parent_is(stack, b"bgPr") {
                bg.image.get_or_insert(Background::Image {
                    path: "embedded".to_string(),
                    geometry: full_slide,
                });
            }
        }
        b"blip" => {
            let target = attr_value(e, b"embed")
                .and_then(|rid| rels.get(&rid).map(|(_, t)| t.clone()))
                .unwrap_or_else(|| "embedded".to_string());
            if let Some(shape) = current.as_mut() {
                if shape.kind == ShapeKind::Picture {
                    shape.image_target = Some(target);
                }
            } else if in_background(stack) {
                bg.image = Some(Background::Image {
                    path: target,
                    geometry: full_slide,
                });
            }
        }
        b"videoFile" => {
            let target = attr_value(e, b"link")
                .and_then(|rid| rels.get(&rid).map(|(_, t)| t.clone()))
                .unwrap_or_else(|| "embedded".to_string());
            if let Some(shape) = current.as_mut() {
                shape.video_target = Some(target);
            }
        }

        b"r" => {
            if current.is_some() {
                *current_run = Some(TextRunStyle::default());
            }
        }
        b"rPr" => {
            if let Some(run) = current_run.as_mut() {
                for attr in e.attributes().flatten() {
                    let value = String::from_utf8_lossy(&attr.value).to_string();
                    match attr.key.as_ref() {
                        b"sz" => {
                            // Centipoints in the XML, points in the model.
                            if let Ok(sz) = value.parse::<f32>() {
                                run.font_size = Some(sz / 100.0);
                            }
                        }
                        b"b" => run.bold = value == "1" || value == "true",
                        b"i" => run.italic = value == "1" || value == "true",
                        b"u" => run.underline = value != "none",
                        _ => {}
                    }
                }
            }
        }
        b"latin" => {
            if parent_is(stack, b"rPr") {
                if let Some(run) = current_run.as_mut() {
                    run.font_name = attr_value(e, b"typeface");
                }
            }
        }

        _ => {}
    }
}

/// Where a color element applies, judged from its open-element ancestry.
enum ColorContext {
    BackgroundFill,
    ShapeFill,
    Line,
    Run,
    Other,
}

fn color_context(stack: &[Vec<u8>]) -> ColorContext {
    // The color sits inside a solidFill; its grandparent decides the target.
    let solid_idx = match stack.iter().rposition(|n| n.as_slice() == b"solidFill") {
        Some(idx) => idx,
        None => return ColorContext::Other,
    };
    if solid_idx == 0 {
        return ColorContext::Other;
    }
    match stack[solid_idx - 1].as_slice() {
        b"bgPr" => ColorContext::BackgroundFill,
        b"spPr" => ColorContext::ShapeFill,
        b"ln" => ColorContext::Line,
        b"rPr" | b"defRPr" => ColorContext::Run,
        _ => ColorContext::Other,
    }
}

fn parent_is(stack: &[Vec<u8>], name: &[u8]) -> bool {
    stack.last().map(|n| n.as_slice()) == Some(name)
}

fn in_background(stack: &[Vec<u8>]) -> bool {
    stack.iter().any(|n| n.as_slice() == b"bgPr")
}

/// `a:off`/`a:ext` inside the shape's own `a:xfrm` under `spPr` (the group
/// transform at the tree root has no open shape and is skipped upstream).
fn in_shape_transform(stack: &[Vec<u8>]) -> bool {
    parent_is(stack, b"xfrm")
}

fn attr_value(e: &BytesStart, key: &[u8]) -> Option<String> {
    e.attributes().flatten().find_map(|attr| {
        if local_name(attr.key.as_ref()) == key {
            Some(String::from_utf8_lossy(&attr.value).to_string())
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skeleton::test_fixtures::{deck_with_slide_xml, deck_with_slide_xml_and_rels};
    use std::io::Cursor;

    const SLIDE_NS: &str = r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main""#;

    fn slide(bg: &str, shapes: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sld {SLIDE_NS}><p:cSld>{bg}<p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr/>{shapes}</p:spTree></p:cSld></p:sld>"#
        )
    }

    fn capture(deck: Vec<u8>) -> StyleModel {
        StyleCapture::capture(Cursor::new(deck)).unwrap()
    }

    #[test]
    fn solid_background_is_captured() {
        let xml = slide(
            r#"<p:bg><p:bgPr><a:solidFill><a:srgbClr val="112233"/></a:solidFill></p:bgPr></p:bg>"#,
            "",
        );
        let model = capture(deck_with_slide_xml(&xml));
        assert_eq!(
            model.background,
            Background::Solid {
                color: "112233".to_string()
            }
        );
    }

    #[test]
    fn theme_background_is_captured() {
        let xml = slide(
            r#"<p:bg><p:bgPr><a:solidFill><a:schemeClr val="bg2"/></a:solidFill></p:bgPr></p:bg>"#,
            "",
        );
        let model = capture(deck_with_slide_xml(&xml));
        assert_eq!(
            model.background,
            Background::Theme {
                color_ref: "bg2".to_string()
            }
        );
    }

    #[test]
    fn gradient_background_is_synthesized() {
        let xml = slide(
            r#"<p:bg><p:bgPr><a:gradFill><a:gsLst><a:gs pos="0"><a:srgbClr val="FF0000"/></a:gs></a:gsLst></a:gradFill></p:bgPr></p:bg>"#,
            "",
        );
        let model = capture(deck_with_slide_xml(&xml));
        assert_eq!(model.background, Background::synthesized_gradient());
    }

    #[test]
    fn missing_background_defaults_to_black() {
        let model = capture(deck_with_slide_xml(&slide("", "")));
        assert_eq!(model.background, Background::default_solid());
    }

    #[test]
    fn picture_shape_wins_over_solid_fill() {
        let shapes = r#"<p:pic><p:nvPicPr><p:cNvPr id="2" name="Picture 1"/><p:cNvPicPr/><p:nvPr/></p:nvPicPr><p:blipFill><a:blip r:embed="rId9"/></p:blipFill><p:spPr><a:xfrm><a:off x="100" y="200"/><a:ext cx="300" cy="400"/></a:xfrm></p:spPr></p:pic>"#;
        let bg = r#"<p:bg><p:bgPr><a:solidFill><a:srgbClr val="112233"/></a:solidFill></p:bgPr></p:bg>"#;
        let rels = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout" Target="../slideLayouts/slideLayout1.xml"/><Relationship Id="rId9" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="../media/image1.png"/></Relationships>"#;

        let model = capture(deck_with_slide_xml_and_rels(&slide(bg, shapes), Some(rels)));
        assert_eq!(
            model.background,
            Background::Image {
                path: "../media/image1.png".to_string(),
                geometry: Geometry {
                    left: 100,
                    top: 200,
                    width: 300,
                    height: 400
                }
            }
        );
    }

    #[test]
    fn video_rel_wins_over_everything() {
        let bg = r#"<p:bg><p:bgPr><a:solidFill><a:srgbClr val="112233"/></a:solidFill></p:bgPr></p:bg>"#;
        let rels = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout" Target="../slideLayouts/slideLayout1.xml"/><Relationship Id="rId5" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/video" Target="../media/media1.mp4"/></Relationships>"#;

        let model = capture(deck_with_slide_xml_and_rels(&slide(bg, ""), Some(rels)));
        match model.background {
            Background::Video { ref path, .. } => assert_eq!(path, "../media/media1.mp4"),
            other => panic!("expected video background, got {:?}", other),
        }
    }

    #[test]
    fn text_shape_runs_and_geometry_are_captured() {
        let shapes = r#"<p:sp><p:nvSpPr><p:cNvPr id="3" name="Lyrics"/><p:cNvSpPr txBox="1"/><p:nvPr/></p:nvSpPr><p:spPr><a:xfrm><a:off x="500000" y="600000"/><a:ext cx="6000000" cy="2000000"/></a:xfrm></p:spPr><p:txBody><a:bodyPr/><a:p><a:r><a:rPr lang="ko-KR" sz="2400" b="1" i="1" u="sng"><a:solidFill><a:srgbClr val="ffcc00"/></a:solidFill><a:latin typeface="맑은 고딕"/></a:rPr><a:t>가사 예시</a:t></a:r></a:p></p:txBody></p:sp>"#;
        let model = capture(deck_with_slide_xml(&slide("", shapes)));

        assert_eq!(model.shapes.len(), 1);
        let shape = &model.shapes[0];
        assert_eq!(shape.geometry.width, 6_000_000);
        assert_eq!(shape.text_runs.len(), 1);

        let run = &shape.text_runs[0];
        assert_eq!(run.text, "가사 예시");
        assert_eq!(run.font_name.as_deref(), Some("맑은 고딕"));
        assert_eq!(run.font_size, Some(24.0));
        assert!(run.bold && run.italic && run.underline);
        assert_eq!(run.color, TextColor::Rgb("FFCC00".to_string()));

        // Wide text shape doubles as the lyric template.
        assert!(model.lyric_shape().is_some());
        assert_eq!(model.text_styles.len(), 1);
    }

    #[test]
    fn connector_line_style_is_captured() {
        let shapes = r#"<p:cxnSp><p:nvCxnSpPr><p:cNvPr id="4" name="Straight Connector 3"/><p:cNvCxnSpPr/><p:nvPr/></p:nvCxnSpPr><p:spPr><a:xfrm><a:off x="0" y="5000000"/><a:ext cx="9000000" cy="0"/></a:xfrm><a:prstGeom prst="line"><a:avLst/></a:prstGeom><a:ln w="25400"><a:solidFill><a:srgbClr val="00B0F0"/></a:solidFill></a:ln></p:spPr></p:cxnSp>"#;
        let model = capture(deck_with_slide_xml(&slide("", shapes)));

        let connectors: Vec<_> = model.connectors().collect();
        assert_eq!(connectors.len(), 1);
        assert_eq!(connectors[0].line.width, 25_400);
        assert_eq!(connectors[0].line.color, "00B0F0");
        assert_eq!(connectors[0].geometry.width, 9_000_000);
    }

    #[test]
    fn line_defaults_when_absent() {
        let shapes = r#"<p:cxnSp><p:nvCxnSpPr><p:cNvPr id="4" name="C"/><p:cNvCxnSpPr/><p:nvPr/></p:nvCxnSpPr><p:spPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="100" cy="0"/></a:xfrm></p:spPr></p:cxnSp>"#;
        let model = capture(deck_with_slide_xml(&slide("", shapes)));
        let connector = model.connectors().next().unwrap();
        assert_eq!(connector.line, LineStyle::default());
    }

    #[test]
    fn slide_size_is_read_from_presentation() {
        let model = capture(deck_with_slide_xml(&slide("", "")));
        assert_eq!(model.slide_size.width, 12_192_000);
        assert_eq!(model.slide_size.height, 6_858_000);
    }

    #[test]
    fn shape_solid_fill_is_captured() {
        let shapes = r#"<p:sp><p:nvSpPr><p:cNvPr id="5" name="Box"/><p:cNvSpPr/><p:nvPr/></p:nvSpPr><p:spPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="100" cy="100"/></a:xfrm><a:solidFill><a:srgbClr val="00ff00"/></a:solidFill></p:spPr></p:sp>"#;
        let model = capture(deck_with_slide_xml(&slide("", shapes)));
        assert_eq!(
            model.shapes[0].fill,
            Fill::Solid {
                color: "00FF00".to_string()
            }
        );
    }
}
