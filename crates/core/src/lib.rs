//! Core domain types, noise filtering, search normalization, and lyric
//! sanitizing for the praise deck catalog.

pub mod error;
pub mod noise;
pub mod normalize;
pub mod sanitize;
pub mod style;
pub mod types;

pub use error::{Error, Result};
pub use noise::is_noise_line;
pub use normalize::normalize_for_search;
pub use sanitize::sanitize_lyrics;
pub use style::{
    Background, Fill, LineStyle, ShapeKind, ShapeStyle, SlideSize, StyleModel, TextColor,
    TextRunStyle,
};
pub use types::{DocumentRecord, SlideUnit};
