//! Shortreel turns a seed into a finished vertical short: script, narration, captions and a
//! rendered video with publishing metadata.
//!
//! A run is driven by [`Pipeline::run`]:
//!
//! - Generate a [`Script`] from the template pool
//! - Synthesize speech through an ordered chain of [`SpeechBackend`]s
//! - Post-process and measure the audio through a [`MediaEngine`]
//! - Allocate captions over the measured duration and compose the visual filter graph
//! - Render once and write metadata into the run's [`Workspace`]
#![forbid(unsafe_code)]

mod foundation;

pub mod audio;
pub mod captions;
/// Pipeline configuration file.
pub mod config;
pub mod engine;
pub mod pipeline;
pub mod script;
pub mod speech;
pub mod visual;

pub use crate::foundation::error::{ReelError, ReelResult};
pub use crate::foundation::seed::Seed;

pub use crate::audio::chain::{AudioFilterChain, AudioOptions};
pub use crate::captions::allocate::{CaptionEntry, DEFAULT_MIN_DISPLAY_SECONDS, allocate};
pub use crate::config::PipelineConfig;
pub use crate::engine::ffmpeg::FfmpegEngine;
pub use crate::engine::media::{Canvas, MediaEngine, RenderJob};
pub use crate::pipeline::run::{Pipeline, RunReport, RunRequest};
pub use crate::pipeline::workspace::Workspace;
pub use crate::script::generator::{Script, ScriptMode, generate};
pub use crate::script::pool::TemplatePool;
pub use crate::speech::backends::{BackendConfig, SpeechBackend, SynthesisRequest};
pub use crate::speech::payload::{Payload, PayloadKind};
pub use crate::speech::synthesizer::{FallbackPolicy, SpeechSynthesizer};
pub use crate::speech::voice::{VoiceSelection, select_voice};
pub use crate::visual::compose::{BackgroundStyle, VisualOptions};
pub use crate::visual::graph::FilterGraph;
