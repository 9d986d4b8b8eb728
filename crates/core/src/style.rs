//! Style model captured from a template deck's first slide.
//!
//! All lengths are EMU (English Metric Units), the native PPTX length unit:
//! 914,400 per inch, 360,000 per centimetre.

use serde::{Deserialize, Serialize};

/// EMU per centimetre.
pub const EMU_PER_CM: i64 = 360_000;

/// EMU per point (1/72 inch).
pub const EMU_PER_PT: i64 = 12_700;

/// Default 16:9 slide width in EMU.
pub const DEFAULT_SLIDE_WIDTH: i64 = 12_192_000;

/// Default 16:9 slide height in EMU.
pub const DEFAULT_SLIDE_HEIGHT: i64 = 6_858_000;

/// Text-bearing shapes wider than this are lyric-box candidates.
pub const LARGE_TEXT_BOX_WIDTH: i64 = 5_000_000;

/// Slide dimensions in EMU.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideSize {
    pub width: i64,
    pub height: i64,
}

impl Default for SlideSize {
    fn default() -> Self {
        Self {
            width: DEFAULT_SLIDE_WIDTH,
            height: DEFAULT_SLIDE_HEIGHT,
        }
    }
}

/// Shape position and extent in EMU.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Geometry {
    pub left: i64,
    pub top: i64,
    pub width: i64,
    pub height: i64,
}

/// Background descriptor resolved from the template's first slide.
///
/// Produced by the capture fallback chain: video, then image, then the
/// background fill itself (solid/theme/gradient), then solid black.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Background {
    /// Flat RGB color, hex without `#` (e.g. `"000000"`).
    Solid { color: String },
    /// Picture region; `path` is the media part or an `embedded` marker.
    Image { path: String, geometry: Geometry },
    /// Video region; `path` is the media part or an `embedded` marker.
    Video { path: String, geometry: Geometry },
    /// Synthesized two-stop gradient; arbitrary gradient reconstruction is
    /// out of scope.
    Gradient { stops: Vec<GradientStop> },
    /// Theme-linked color token (e.g. `"bg1"`, `"accent1"`).
    Theme { color_ref: String },
}

impl Background {
    /// Default solid black background.
    pub fn default_solid() -> Self {
        Background::Solid {
            color: "000000".to_string(),
        }
    }

    /// The fixed black-to-dark-gray stand-in for captured gradients.
    pub fn synthesized_gradient() -> Self {
        Background::Gradient {
            stops: vec![
                GradientStop {
                    position: 0,
                    color: "000000".to_string(),
                },
                GradientStop {
                    position: 100_000,
                    color: "1A1A1A".to_string(),
                },
            ],
        }
    }
}

impl Default for Background {
    fn default() -> Self {
        Self::default_solid()
    }
}

/// One gradient stop; position is in thousandths of a percent (PPTX form).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradientStop {
    pub position: u32,
    pub color: String,
}

/// Shape fill descriptor. `None` is the catch-all for unrecognized or
/// failed extraction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum Fill {
    Solid { color: String },
    Pattern,
    Gradient,
    #[default]
    None,
}

/// Shape outline: width in EMU plus RGB color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineStyle {
    pub width: i64,
    pub color: String,
}

impl Default for LineStyle {
    /// Fixed blue, 1 pt.
    fn default() -> Self {
        Self {
            width: EMU_PER_PT,
            color: "0000FF".to_string(),
        }
    }
}

/// Broad shape classification from the slide XML element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShapeKind {
    TextBox,
    Picture,
    Connector,
}

/// Resolved color of a text run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextColor {
    /// Hex RGB without `#`.
    Rgb(String),
    /// Theme color token.
    Theme(String),
}

impl Default for TextColor {
    /// Lyric text defaults to white.
    fn default() -> Self {
        TextColor::Rgb("FFFFFF".to_string())
    }
}

/// Formatting of a single text run in a template shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextRunStyle {
    pub text: String,
    pub font_name: Option<String>,
    /// Size in points.
    pub font_size: Option<f32>,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub color: TextColor,
}

/// One shape captured from the template slide.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShapeStyle {
    pub kind: ShapeKind,
    pub geometry: Geometry,
    pub text_runs: Vec<TextRunStyle>,
    pub fill: Fill,
    pub line: LineStyle,
    pub is_connector: bool,
}

impl ShapeStyle {
    /// Whether this shape carries any non-empty text.
    pub fn has_text(&self) -> bool {
        self.text_runs.iter().any(|r| !r.text.trim().is_empty())
    }
}

/// The captured visual styling of a template deck, immutable per synthesis
/// run and never persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StyleModel {
    pub slide_size: SlideSize,
    pub background: Background,
    pub shapes: Vec<ShapeStyle>,
    /// Flattened run styles from every text-bearing shape, capture order.
    pub text_styles: Vec<TextRunStyle>,
}

impl StyleModel {
    /// The shape selected as the lyric-text template: the first text-bearing
    /// shape wider than the large-text-box threshold.
    ///
    /// This is a heuristic, not a tagged template role; templates with
    /// several large text shapes may pick the wrong one.
    pub fn lyric_shape(&self) -> Option<&ShapeStyle> {
        self.shapes
            .iter()
            .find(|s| s.has_text() && s.geometry.width > LARGE_TEXT_BOX_WIDTH)
    }

    /// Captured connector shapes, replayed on every lyric slide.
    pub fn connectors(&self) -> impl Iterator<Item = &ShapeStyle> {
        self.shapes.iter().filter(|s| s.is_connector)
    }

    /// Default lyric box: 30 cm x 16 cm, centered on the slide.
    pub fn default_lyric_geometry(&self) -> Geometry {
        let width = 30 * EMU_PER_CM;
        let height = 16 * EMU_PER_CM;
        Geometry {
            left: (self.slide_size.width - width) / 2,
            top: (self.slide_size.height - height) / 2,
            width,
            height,
        }
    }
}
