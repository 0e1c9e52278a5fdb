use std::path::Path;

use crate::{
    audio::chain::AudioFilterChain,
    engine::{media::MediaEngine, process::has_content},
    foundation::error::{ReelError, ReelResult},
    speech::synthesizer::AudioTrack,
};

/// Run the post-processing chain once over `track`, writing to `out_path`.
///
/// There is no retry: a failure here means the intermediate audio is unusable.
#[tracing::instrument(skip(engine, chain, track), fields(input = %track.path.display()))]
pub fn process(
    engine: &dyn MediaEngine,
    chain: &AudioFilterChain,
    track: &AudioTrack,
    out_path: &Path,
) -> ReelResult<AudioTrack> {
    if chain.sample_rate == 0 || chain.channels == 0 {
        return Err(ReelError::validation(
            "audio sample rate and channel count must be non-zero",
        ));
    }
    if track.path == out_path {
        return Err(ReelError::validation(
            "audio post-processing cannot write over its own input",
        ));
    }

    engine.process_audio(chain, &track.path, out_path)?;

    if !has_content(out_path) {
        return Err(ReelError::backend(format!(
            "audio post-processing produced no output at '{}'",
            out_path.display()
        )));
    }
    tracing::info!(output = %out_path.display(), "audio post-processed");
    Ok(AudioTrack {
        path: out_path.to_path_buf(),
        engine: track.engine.clone(),
        voice: track.voice.clone(),
    })
}
