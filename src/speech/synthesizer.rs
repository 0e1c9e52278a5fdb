use std::path::{Path, PathBuf};

use crate::{
    engine::process::has_content,
    foundation::error::{ReelError, ReelResult},
    speech::{
        backends::{SpeechBackend, SynthesisRequest},
        payload::Payload,
        voice::VoiceSelection,
    },
};

/// What happens when the first backend in the chain fails.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FallbackPolicy {
    /// Try every backend in order until one succeeds.
    Ordered,
    /// The primary backend must succeed; weaker backends are never attempted.
    #[default]
    RequirePrimary,
}

/// Audio written by a successful backend, before post-processing.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct AudioTrack {
    pub path: PathBuf,
    /// Name of the backend that produced the file.
    pub engine: String,
    /// Voice the audio was spoken in; `None` when the engine ignores the voice selection.
    pub voice: Option<String>,
}

/// A backend attempt that did not produce audio.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct AttemptFailure {
    pub engine: String,
    pub reason: String,
}

/// Outcome of [`SpeechSynthesizer::synthesize`].
#[derive(Clone, Debug)]
pub struct SynthesisReport {
    pub track: AudioTrack,
    /// Failures swallowed before the successful attempt, in chain order.
    pub failures: Vec<AttemptFailure>,
}

#[derive(Debug)]
enum ChainState {
    Trying(usize),
    Succeeded(AudioTrack),
    ExhaustedFailed,
}

/// Ordered chain of speech backends.
pub struct SpeechSynthesizer {
    backends: Vec<Box<dyn SpeechBackend>>,
    policy: FallbackPolicy,
}

impl std::fmt::Debug for SpeechSynthesizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpeechSynthesizer")
            .field("backends", &self.engine_names())
            .field("policy", &self.policy)
            .finish()
    }
}

impl SpeechSynthesizer {
    /// Build a chain; an empty chain is a configuration fault.
    pub fn new(backends: Vec<Box<dyn SpeechBackend>>, policy: FallbackPolicy) -> ReelResult<Self> {
        if backends.is_empty() {
            return Err(ReelError::configuration("no speech backends configured"));
        }
        Ok(Self { backends, policy })
    }

    pub fn policy(&self) -> FallbackPolicy {
        self.policy
    }

    pub fn engine_names(&self) -> Vec<&str> {
        self.backends.iter().map(|b| b.name()).collect()
    }

    /// Synthesize `text` into `out_path`, falling over to the next backend only when the current
    /// one fails outright.
    ///
    /// A backend that exits cleanly without writing a non-empty file counts as failed. Partial
    /// files are removed before the next attempt and on terminal failure.
    #[tracing::instrument(skip(self, text, scratch_dir), fields(voice = %voice.voice_id))]
    pub fn synthesize(
        &self,
        text: &str,
        voice: &VoiceSelection,
        out_path: &Path,
        scratch_dir: &Path,
    ) -> ReelResult<SynthesisReport> {
        if text.trim().is_empty() {
            return Err(ReelError::validation("cannot synthesize empty text"));
        }

        let mut failures = Vec::new();
        let mut state = ChainState::Trying(0);
        loop {
            state = match state {
                ChainState::Trying(i) => match self.backends.get(i) {
                    None => ChainState::ExhaustedFailed,
                    Some(backend) => {
                        match self.attempt(backend.as_ref(), text, voice, out_path, scratch_dir) {
                            Ok(track) => ChainState::Succeeded(track),
                            Err(err) => {
                                tracing::warn!(engine = backend.name(), error = %err, "speech backend failed");
                                remove_partial(out_path);
                                failures.push(AttemptFailure {
                                    engine: backend.name().to_string(),
                                    reason: err.to_string(),
                                });
                                if self.policy == FallbackPolicy::RequirePrimary {
                                    return Err(ReelError::backend(format!(
                                        "primary speech backend '{}' failed and fallback is disabled: {err}",
                                        backend.name()
                                    )));
                                }
                                ChainState::Trying(i + 1)
                            }
                        }
                    }
                },
                ChainState::Succeeded(track) => {
                    tracing::info!(engine = %track.engine, path = %track.path.display(), "speech synthesized");
                    return Ok(SynthesisReport { track, failures });
                }
                ChainState::ExhaustedFailed => break,
            };
        }

        remove_partial(out_path);
        let summary = failures
            .iter()
            .map(|f| format!("{}: {}", f.engine, f.reason))
            .collect::<Vec<_>>()
            .join("; ");
        Err(ReelError::backend(format!(
            "all {} speech backends failed ({summary})",
            self.backends.len()
        )))
    }

    fn attempt(
        &self,
        backend: &dyn SpeechBackend,
        text: &str,
        voice: &VoiceSelection,
        out_path: &Path,
        scratch_dir: &Path,
    ) -> ReelResult<AudioTrack> {
        let payload = Payload::shape(backend.payload_kind(), text, &voice.voice_id);
        tracing::debug!(engine = backend.name(), kind = ?payload.kind(), "trying speech backend");
        backend.synthesize(&SynthesisRequest {
            payload: &payload,
            voice: &voice.voice_id,
            out_path,
            scratch_dir,
        })?;

        if !has_content(out_path) {
            return Err(ReelError::backend(format!(
                "backend '{}' reported success but wrote no audio to '{}'",
                backend.name(),
                out_path.display()
            )));
        }
        Ok(AudioTrack {
            path: out_path.to_path_buf(),
            engine: backend.name().to_string(),
            voice: backend.uses_voice().then(|| voice.voice_id.clone()),
        })
    }
}

fn remove_partial(path: &Path) {
    if path.exists()
        && let Err(e) = std::fs::remove_file(path)
    {
        tracing::warn!(path = %path.display(), error = %e, "failed to remove partial audio");
    }
}

#[cfg(test)]
#[path = "../../tests/unit/speech/synthesizer.rs"]
mod tests;
