//! Text-to-speech acquisition over an ordered chain of backends.

pub mod backends;
pub mod payload;
pub mod synthesizer;
pub mod voice;
