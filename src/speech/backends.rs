use std::{
    path::{Path, PathBuf},
    process::Command,
};

use anyhow::Context as _;

use crate::{
    engine::process::run_checked,
    foundation::error::{ReelError, ReelResult},
    speech::payload::{Payload, PayloadKind},
};

/// One synthesis call handed to a backend.
#[derive(Debug)]
pub struct SynthesisRequest<'a> {
    /// Text already shaped for this backend's [`SpeechBackend::payload_kind`].
    pub payload: &'a Payload,
    /// Run-wide voice; backends that are not voice-parametrized ignore it.
    pub voice: &'a str,
    /// Where the audio must be written.
    pub out_path: &'a Path,
    /// Run workspace for side files such as SSML documents.
    pub scratch_dir: &'a Path,
}

/// Uniform contract over heterogeneous speech engines.
///
/// Each backend owns its transport (stdin, file, argument) and declares the payload shape it
/// accepts; the synthesizer never special-cases a backend.
pub trait SpeechBackend {
    /// Stable engine identity, recorded in logs and run reports.
    fn name(&self) -> &str;

    /// Payload shape this backend consumes.
    fn payload_kind(&self) -> PayloadKind;

    /// Whether [`SynthesisRequest::voice`] selects the voice.
    fn uses_voice(&self) -> bool {
        false
    }

    /// Write audio for `req.payload` to `req.out_path`.
    fn synthesize(&self, req: &SynthesisRequest<'_>) -> ReelResult<()>;
}

/// Serializable description of a backend in the configured chain.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "engine", rename_all = "kebab-case")]
pub enum BackendConfig {
    /// Microsoft neural voices through the `edge-tts` CLI, text passed by file.
    ///
    /// With `ssml` set the file holds an SSML document and `--ssml` is passed; only edge-tts
    /// builds that still accept custom SSML support this.
    EdgeTts {
        #[serde(default = "default_edge_program")]
        program: String,
        #[serde(default)]
        ssml: bool,
    },
    /// Offline Piper model, plain text on stdin.
    Piper {
        #[serde(default = "default_piper_program")]
        program: String,
        model: PathBuf,
    },
    /// Formant synthesis through `espeak-ng`, plain text as an argument.
    Espeak {
        #[serde(default = "default_espeak_program")]
        program: String,
        #[serde(default = "default_espeak_voice")]
        voice: String,
    },
    /// Google Translate TTS through `gtts-cli`.
    Gtts {
        #[serde(default = "default_gtts_program")]
        program: String,
        #[serde(default = "default_gtts_lang")]
        lang: String,
    },
}

fn default_edge_program() -> String {
    "edge-tts".to_string()
}
fn default_piper_program() -> String {
    "piper".to_string()
}
fn default_espeak_program() -> String {
    "espeak-ng".to_string()
}
fn default_espeak_voice() -> String {
    "en-us".to_string()
}
fn default_gtts_program() -> String {
    "gtts-cli".to_string()
}
fn default_gtts_lang() -> String {
    "en".to_string()
}

impl BackendConfig {
    /// Neural voice first, then the statistical fallback.
    pub fn default_chain() -> Vec<Self> {
        vec![
            Self::EdgeTts {
                program: default_edge_program(),
                ssml: false,
            },
            Self::Gtts {
                program: default_gtts_program(),
                lang: default_gtts_lang(),
            },
        ]
    }
}

/// Factory: instantiate the backend described by `cfg`.
pub fn create_backend(cfg: &BackendConfig) -> Box<dyn SpeechBackend> {
    match cfg.clone() {
        BackendConfig::EdgeTts { program, ssml } => Box::new(EdgeTtsBackend { program, ssml }),
        BackendConfig::Piper { program, model } => Box::new(PiperBackend { program, model }),
        BackendConfig::Espeak { program, voice } => Box::new(EspeakBackend { program, voice }),
        BackendConfig::Gtts { program, lang } => Box::new(GttsBackend { program, lang }),
    }
}

/// `edge-tts --voice V --rate=-1% --pitch=+0Hz --file voice.txt --write-media OUT`, or the
/// SSML form `edge-tts --voice V --file voice.ssml --write-media OUT --ssml`.
#[derive(Clone, Debug)]
pub struct EdgeTtsBackend {
    pub program: String,
    pub ssml: bool,
}

impl EdgeTtsBackend {
    /// Write the payload next to the run's other side files and build the invocation.
    pub fn command(&self, req: &SynthesisRequest<'_>) -> ReelResult<Command> {
        let input = req
            .scratch_dir
            .join(if self.ssml { "voice.ssml" } else { "voice.txt" });
        std::fs::write(&input, req.payload.as_str())
            .with_context(|| format!("write speech input '{}'", input.display()))?;

        let mut cmd = Command::new(&self.program);
        cmd.arg("--voice").arg(req.voice);
        if !self.ssml {
            cmd.arg("--rate=-1%").arg("--pitch=+0Hz");
        }
        cmd.arg("--file")
            .arg(&input)
            .arg("--write-media")
            .arg(req.out_path);
        if self.ssml {
            cmd.arg("--ssml");
        }
        Ok(cmd)
    }
}

impl SpeechBackend for EdgeTtsBackend {
    fn name(&self) -> &str {
        "edge-tts"
    }

    fn payload_kind(&self) -> PayloadKind {
        if self.ssml {
            PayloadKind::Ssml
        } else {
            PayloadKind::PlainText
        }
    }

    fn uses_voice(&self) -> bool {
        true
    }

    fn synthesize(&self, req: &SynthesisRequest<'_>) -> ReelResult<()> {
        let mut cmd = self.command(req)?;
        run_checked(&mut cmd, None).map_err(ReelError::backend)?;
        Ok(())
    }
}

/// `piper --model M --output_file OUT` with the text on stdin.
#[derive(Clone, Debug)]
pub struct PiperBackend {
    pub program: String,
    pub model: PathBuf,
}

impl PiperBackend {
    pub fn command(&self, req: &SynthesisRequest<'_>) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg("--model")
            .arg(&self.model)
            .arg("--output_file")
            .arg(req.out_path);
        cmd
    }
}

impl SpeechBackend for PiperBackend {
    fn name(&self) -> &str {
        "piper"
    }

    fn payload_kind(&self) -> PayloadKind {
        PayloadKind::PlainText
    }

    fn synthesize(&self, req: &SynthesisRequest<'_>) -> ReelResult<()> {
        if !self.model.exists() {
            return Err(ReelError::backend(format!(
                "piper model '{}' does not exist",
                self.model.display()
            )));
        }
        let mut cmd = self.command(req);
        run_checked(&mut cmd, Some(req.payload.as_str().as_bytes())).map_err(ReelError::backend)?;
        Ok(())
    }
}

/// `espeak-ng -v VOICE -w OUT -- TEXT`.
#[derive(Clone, Debug)]
pub struct EspeakBackend {
    pub program: String,
    pub voice: String,
}

impl EspeakBackend {
    pub fn command(&self, req: &SynthesisRequest<'_>) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg("-v")
            .arg(&self.voice)
            .arg("-w")
            .arg(req.out_path)
            .arg("--")
            .arg(req.payload.as_str());
        cmd
    }
}

impl SpeechBackend for EspeakBackend {
    fn name(&self) -> &str {
        "espeak-ng"
    }

    fn payload_kind(&self) -> PayloadKind {
        PayloadKind::PlainText
    }

    fn synthesize(&self, req: &SynthesisRequest<'_>) -> ReelResult<()> {
        run_checked(&mut self.command(req), None).map_err(ReelError::backend)?;
        Ok(())
    }
}

/// `gtts-cli --lang L --output OUT -- TEXT`.
#[derive(Clone, Debug)]
pub struct GttsBackend {
    pub program: String,
    pub lang: String,
}

impl GttsBackend {
    pub fn command(&self, req: &SynthesisRequest<'_>) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg("--lang")
            .arg(&self.lang)
            .arg("--output")
            .arg(req.out_path)
            .arg("--")
            .arg(req.payload.as_str());
        cmd
    }
}

impl SpeechBackend for GttsBackend {
    fn name(&self) -> &str {
        "gtts"
    }

    fn payload_kind(&self) -> PayloadKind {
        PayloadKind::PlainText
    }

    fn synthesize(&self, req: &SynthesisRequest<'_>) -> ReelResult<()> {
        run_checked(&mut self.command(req), None).map_err(ReelError::backend)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/speech/backends.rs"]
mod tests;
