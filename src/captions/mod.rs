//! Caption timing over a measured audio duration, and SRT serialization.

pub mod allocate;
pub mod srt;
