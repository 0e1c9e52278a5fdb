use crate::foundation::{
    error::{ReelError, ReelResult},
    seed::{Seed, pick},
};

/// Default neural voice rotation.
pub const DEFAULT_VOICES: [&str; 3] = ["en-US-AriaNeural", "en-US-GuyNeural", "en-US-JennyNeural"];

/// Where a run's voice came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VoiceSource {
    Override,
    Rotation,
}

/// Voice chosen once per run and handed unchanged to every voice-parametrized backend.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct VoiceSelection {
    pub voice_id: String,
    pub source: VoiceSource,
}

/// Pick the run's voice.
///
/// A non-blank `override_voice` wins. Otherwise the voice is drawn from `voices` with an RNG
/// seeded by `rotation` (a day bucket in production), so it is stable for the whole bucket.
pub fn select_voice(
    voices: &[String],
    override_voice: Option<&str>,
    rotation: &Seed,
) -> ReelResult<VoiceSelection> {
    if let Some(v) = override_voice.map(str::trim).filter(|v| !v.is_empty()) {
        return Ok(VoiceSelection {
            voice_id: v.to_string(),
            source: VoiceSource::Override,
        });
    }

    if voices.is_empty() {
        return Err(ReelError::configuration(
            "no voice override given and the voice list is empty",
        ));
    }
    let mut rng = rotation.rng();
    let voice = pick(&mut rng, voices, "voice")?;
    Ok(VoiceSelection {
        voice_id: voice.clone(),
        source: VoiceSource::Rotation,
    })
}
