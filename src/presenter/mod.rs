//! Result presentation: confidence tones, staggered meter reveals and text
//! cards for the ranked predictions.

pub mod board;
pub mod card;
pub mod reveal;
pub mod tone;

pub use board::ResultBoard;
pub use card::{CardKey, DiagnosisCard, NO_PRECAUTIONS_TEXT};
pub use reveal::{reveal_delay, RevealKey, RevealTimer};
pub use tone::{classify_tone, meter_percent, Tone};
