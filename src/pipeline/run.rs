use std::path::PathBuf;

use crate::{
    audio::{chain::AudioFilterChain, post},
    captions::{allocate::allocate, srt::write_srt},
    config::PipelineConfig,
    engine::media::{MediaEngine, RenderJob, checked_duration},
    foundation::{error::ReelResult, seed::Seed},
    pipeline::workspace::{Workspace, write_atomic},
    script::generator::{Script, ScriptMode, generate},
    speech::{
        backends::create_backend,
        synthesizer::{AttemptFailure, SpeechSynthesizer},
        voice::{VoiceSelection, select_voice},
    },
    visual::compose::{self, write_title_file},
};

/// Inputs that vary per run.
#[derive(Clone, Debug)]
pub struct RunRequest {
    pub mode: ScriptMode,
    /// Drives script content.
    pub seed: Seed,
    /// Drives voice rotation and background style.
    pub day_seed: Seed,
    /// Takes precedence over the configured override.
    pub voice_override: Option<String>,
}

impl RunRequest {
    /// Request keyed by `seed`, with today's UTC bucket for voice and style.
    pub fn new(mode: ScriptMode, seed: Seed) -> Self {
        Self {
            mode,
            seed,
            day_seed: Seed::utc_day_bucket(),
            voice_override: None,
        }
    }
}

/// Summary of a completed run.
#[derive(Clone, Debug, serde::Serialize)]
pub struct RunReport {
    pub seed: Seed,
    pub script: Script,
    pub voice: VoiceSelection,
    /// Speech backend that produced the audio.
    pub engine: String,
    /// Voice actually spoken; `None` when the producing engine has no voice parameter.
    pub spoken_voice: Option<String>,
    pub speech_failures: Vec<AttemptFailure>,
    pub duration_seconds: f64,
    pub caption_count: usize,
    pub video: PathBuf,
    pub meta_title: PathBuf,
    pub meta_description: PathBuf,
}

/// One configured pipeline; reusable across runs with distinct workspaces.
pub struct Pipeline {
    config: PipelineConfig,
    synthesizer: SpeechSynthesizer,
    engine: Box<dyn MediaEngine>,
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("config", &self.config)
            .field("synthesizer", &self.synthesizer)
            .finish_non_exhaustive()
    }
}

impl Pipeline {
    /// Build the backend chain described by `config`.
    pub fn from_config(config: PipelineConfig, engine: Box<dyn MediaEngine>) -> ReelResult<Self> {
        config.validate()?;
        let backends = config.backends.iter().map(create_backend).collect();
        let synthesizer = SpeechSynthesizer::new(backends, config.fallback)?;
        Self::new(config, synthesizer, engine)
    }

    pub fn new(
        config: PipelineConfig,
        synthesizer: SpeechSynthesizer,
        engine: Box<dyn MediaEngine>,
    ) -> ReelResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            synthesizer,
            engine,
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Generate, speak, caption, compose and render one video into `ws`.
    ///
    /// Final artifacts from an earlier run are removed first. Metadata is written only after a
    /// successful render, so its presence marks a complete run.
    #[tracing::instrument(skip(self, ws, req), fields(seed = %req.seed, mode = ?req.mode))]
    pub fn run(&self, ws: &Workspace, req: &RunRequest) -> ReelResult<RunReport> {
        ws.clear_final_artifacts()?;

        let script = generate(&self.config.templates, req.mode, &req.seed)?;
        tracing::info!(title = %script.title, lines = script.lines().count(), "script generated");

        let override_voice = req
            .voice_override
            .as_deref()
            .or(self.config.voice_override.as_deref());
        let voice = select_voice(&self.config.voices, override_voice, &req.day_seed)?;

        let speech = self
            .synthesizer
            .synthesize(&script.body, &voice, &ws.raw_audio(), ws.root())?;

        let chain = AudioFilterChain::from_options(&self.config.audio);
        let track = post::process(self.engine.as_ref(), &chain, &speech.track, &ws.audio())?;

        let duration = checked_duration(self.engine.probe_duration(&track.path)?, &track.path)?;
        tracing::info!(duration, "audio measured");

        let captions = allocate(
            &script.body,
            duration,
            self.config.caption_min_display_seconds,
        )?;
        write_srt(&ws.captions(), &captions)?;
        write_title_file(&ws.title_text(), &script.title)?;

        let graph = compose::build(
            self.config.canvas,
            &ws.title_text(),
            &ws.captions(),
            &req.day_seed,
            &self.config.visual,
        )?;
        let job = RenderJob {
            filter_graph: graph.to_filter_string()?,
            audio_path: track.path.clone(),
            canvas: self.config.canvas,
            fps: self.config.fps,
            canvas_seconds: duration + self.config.canvas_padding_seconds,
            preset: self.config.preset.clone(),
            out_path: ws.video(),
        };
        job.validate()?;
        self.engine.render(&job)?;
        tracing::info!(video = %job.out_path.display(), "video rendered");

        write_atomic(&ws.meta_title(), &script.title)?;
        write_atomic(
            &ws.meta_description(),
            &script.description(&self.config.templates.tagline),
        )?;

        Ok(RunReport {
            seed: req.seed.clone(),
            voice,
            engine: track.engine,
            spoken_voice: track.voice,
            speech_failures: speech.failures,
            duration_seconds: duration,
            caption_count: captions.len(),
            video: ws.video(),
            meta_title: ws.meta_title(),
            meta_description: ws.meta_description(),
            script,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/run.rs"]
mod tests;
