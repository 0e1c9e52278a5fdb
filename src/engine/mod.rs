//! Boundary to the external media tooling (transcoder, compositor, duration probe).

pub mod ffmpeg;
pub mod media;
pub(crate) mod process;
