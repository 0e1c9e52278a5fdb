use std::path::{Path, PathBuf};

use crate::{
    audio::chain::AudioFilterChain,
    foundation::error::{ReelError, ReelResult},
};

/// Output frame size in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Default for Canvas {
    /// 9:16 vertical 1080p.
    fn default() -> Self {
        Self {
            width: 1080,
            height: 1920,
        }
    }
}

/// Everything the compositor needs for the single render of a run.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderJob {
    /// Serialized visual filter graph.
    pub filter_graph: String,
    /// Post-processed audio track.
    pub audio_path: PathBuf,
    pub canvas: Canvas,
    pub fps: u32,
    /// Length of the synthetic visual source; the output is trimmed to the audio.
    pub canvas_seconds: f64,
    pub preset: String,
    pub out_path: PathBuf,
}

impl RenderJob {
    pub fn validate(&self) -> ReelResult<()> {
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(ReelError::validation("canvas width/height must be non-zero"));
        }
        if !self.canvas.width.is_multiple_of(2) || !self.canvas.height.is_multiple_of(2) {
            return Err(ReelError::validation(
                "canvas width/height must be even (required for yuv420p output)",
            ));
        }
        if self.fps == 0 {
            return Err(ReelError::validation("fps must be non-zero"));
        }
        if !self.canvas_seconds.is_finite() || self.canvas_seconds <= 0.0 {
            return Err(ReelError::validation("canvas length must be positive"));
        }
        if self.filter_graph.trim().is_empty() {
            return Err(ReelError::validation("filter graph must not be empty"));
        }
        Ok(())
    }
}

/// External media operations used by the pipeline.
///
/// Each call is a single blocking invocation. Implementations map failures onto the stage's
/// error variant: [`ReelError::Backend`] for audio processing, [`ReelError::Measurement`] for
/// probing and [`ReelError::Render`] for the final render.
pub trait MediaEngine {
    /// Apply `chain` to `input` and write the normalized result to `output`.
    fn process_audio(&self, chain: &AudioFilterChain, input: &Path, output: &Path)
    -> ReelResult<()>;

    /// Duration of the media file at `path` in seconds, as reported by the container.
    fn probe_duration(&self, path: &Path) -> ReelResult<f64>;

    /// Composite and encode the final video.
    fn render(&self, job: &RenderJob) -> ReelResult<()>;
}

/// Accept a probed duration only if it is finite and strictly positive.
pub fn checked_duration(seconds: f64, path: &Path) -> ReelResult<f64> {
    if seconds.is_finite() && seconds > 0.0 {
        Ok(seconds)
    } else {
        Err(ReelError::measurement(format!(
            "duration of '{}' is not a positive number of seconds: {seconds}",
            path.display()
        )))
    }
}
