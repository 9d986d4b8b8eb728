//! Deck synthesis: turn cataloged lyrics back into a presentation,
//! reusing the visual style of a template deck when one is available.

pub mod retry;
pub mod synth;

pub use retry::RetryPolicy;
pub use synth::Synthesizer;
