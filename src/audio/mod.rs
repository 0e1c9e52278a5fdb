//! Fixed post-processing chain applied to synthesized speech.

pub mod chain;
pub mod post;
