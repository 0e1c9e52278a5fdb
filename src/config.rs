use std::path::Path;

use anyhow::Context as _;

use crate::{
    audio::chain::AudioOptions,
    captions::allocate::DEFAULT_MIN_DISPLAY_SECONDS,
    engine::media::Canvas,
    foundation::error::{ReelError, ReelResult},
    script::{generator::ScriptMode, pool::TemplatePool},
    speech::{backends::BackendConfig, synthesizer::FallbackPolicy, voice::DEFAULT_VOICES},
    visual::compose::{self, VisualOptions},
};

/// Deployment configuration for a pipeline run.
///
/// Every field has a default, so an empty JSON object reproduces the stock finance-shorts
/// pipeline.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub mode: ScriptMode,
    pub canvas: Canvas,
    pub fps: u32,
    /// x264 preset for the final render.
    pub preset: String,
    /// Extra synthetic-canvas length past the measured audio.
    pub canvas_padding_seconds: f64,
    pub caption_min_display_seconds: f64,
    pub fallback: FallbackPolicy,
    /// Voice rotation for voice-parametrized backends.
    pub voices: Vec<String>,
    pub voice_override: Option<String>,
    /// Speech backends in priority order.
    pub backends: Vec<BackendConfig>,
    pub audio: AudioOptions,
    pub visual: VisualOptions,
    pub templates: TemplatePool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            mode: ScriptMode::Short,
            canvas: Canvas::default(),
            fps: 30,
            preset: "veryfast".to_string(),
            canvas_padding_seconds: 2.0,
            caption_min_display_seconds: DEFAULT_MIN_DISPLAY_SECONDS,
            fallback: FallbackPolicy::RequirePrimary,
            voices: DEFAULT_VOICES.iter().map(|v| v.to_string()).collect(),
            voice_override: None,
            backends: BackendConfig::default_chain(),
            audio: AudioOptions::default(),
            visual: VisualOptions::default(),
            templates: TemplatePool::default(),
        }
    }
}

impl PipelineConfig {
    /// Read a JSON config file.
    pub fn load(path: &Path) -> ReelResult<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        let cfg: Self = serde_json::from_str(&raw).map_err(|e| {
            ReelError::configuration(format!("invalid config '{}': {e}", path.display()))
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> ReelResult<()> {
        if self.backends.is_empty() {
            return Err(ReelError::configuration("no speech backends configured"));
        }
        if self.fps == 0 {
            return Err(ReelError::configuration("fps must be non-zero"));
        }
        if self.canvas.width == 0
            || self.canvas.height == 0
            || !self.canvas.width.is_multiple_of(2)
            || !self.canvas.height.is_multiple_of(2)
        {
            return Err(ReelError::configuration(
                "canvas width/height must be non-zero and even",
            ));
        }
        compose::check_canvas(self.canvas)
            .map_err(|e| ReelError::configuration(e.to_string()))?;
        if !self.canvas_padding_seconds.is_finite() || self.canvas_padding_seconds < 0.0 {
            return Err(ReelError::configuration(
                "canvas_padding_seconds must be a non-negative number",
            ));
        }
        if !self.caption_min_display_seconds.is_finite() || self.caption_min_display_seconds < 0.0
        {
            return Err(ReelError::configuration(
                "caption_min_display_seconds must be a non-negative number",
            ));
        }
        if self.audio.sample_rate == 0 || self.audio.channels == 0 {
            return Err(ReelError::configuration(
                "audio sample_rate and channels must be non-zero",
            ));
        }
        self.visual.validate()?;
        self.templates.validate()
    }
}
