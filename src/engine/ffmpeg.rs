use std::{
    ffi::OsString,
    path::{Path, PathBuf},
    process::Command,
};

use anyhow::Context as _;

use crate::{
    audio::chain::AudioFilterChain,
    engine::{
        media::{MediaEngine, RenderJob, checked_duration},
        process::{has_content, is_on_path, run_checked},
    },
    foundation::error::{ReelError, ReelResult},
};

/// [`MediaEngine`] backed by the system `ffmpeg` and `ffprobe` binaries.
///
/// The binaries are invoked as processes rather than linked, so no FFmpeg development headers
/// are needed to build the crate.
#[derive(Clone, Debug)]
pub struct FfmpegEngine {
    pub ffmpeg: PathBuf,
    pub ffprobe: PathBuf,
}

impl Default for FfmpegEngine {
    fn default() -> Self {
        Self {
            ffmpeg: PathBuf::from("ffmpeg"),
            ffprobe: PathBuf::from("ffprobe"),
        }
    }
}

impl FfmpegEngine {
    /// Whether both binaries can be executed.
    pub fn is_available(&self) -> bool {
        is_on_path(&self.ffmpeg.to_string_lossy()) && is_on_path(&self.ffprobe.to_string_lossy())
    }
}

impl MediaEngine for FfmpegEngine {
    fn process_audio(
        &self,
        chain: &AudioFilterChain,
        input: &Path,
        output: &Path,
    ) -> ReelResult<()> {
        ensure_parent_dir(output)?;
        let mut cmd = Command::new(&self.ffmpeg);
        cmd.args(audio_args(chain, input, output));
        run_checked(&mut cmd, None)
            .map_err(|e| ReelError::backend(format!("audio post-processing failed: {e}")))?;
        Ok(())
    }

    fn probe_duration(&self, path: &Path) -> ReelResult<f64> {
        let mut cmd = Command::new(&self.ffprobe);
        cmd.args([
            "-v",
            "error",
            "-show_entries",
            "format=duration",
            "-of",
            "default=noprint_wrappers=1:nokey=1",
        ])
        .arg(path);
        let out = run_checked(&mut cmd, None)
            .map_err(|e| ReelError::measurement(format!("duration probe failed: {e}")))?;
        parse_probe_duration(&String::from_utf8_lossy(&out.stdout), path)
    }

    fn render(&self, job: &RenderJob) -> ReelResult<()> {
        job.validate()?;
        ensure_parent_dir(&job.out_path)?;
        let mut cmd = Command::new(&self.ffmpeg);
        cmd.args(render_args(job));
        run_checked(&mut cmd, None).map_err(|e| ReelError::render(format!("render failed: {e}")))?;
        if !has_content(&job.out_path) {
            return Err(ReelError::render(format!(
                "render produced no output at '{}'",
                job.out_path.display()
            )));
        }
        Ok(())
    }
}

/// Arguments for the single post-processing pass.
pub fn audio_args(chain: &AudioFilterChain, input: &Path, output: &Path) -> Vec<OsString> {
    let mut args: Vec<OsString> = ["-y", "-loglevel", "error", "-i"]
        .into_iter()
        .map(OsString::from)
        .collect();
    args.push(input.as_os_str().to_owned());
    args.extend(
        [
            "-af".to_string(),
            chain.to_filter_string(),
            "-ar".to_string(),
            chain.sample_rate.to_string(),
            "-ac".to_string(),
            chain.channels.to_string(),
            "-b:a".to_string(),
            chain.bitrate.clone(),
        ]
        .into_iter()
        .map(OsString::from),
    );
    args.push(output.as_os_str().to_owned());
    args
}

/// Arguments for the final render: synthetic canvas + processed audio through the graph.
///
/// The canvas runs longer than the audio; `-shortest` trims the output to the audio track.
pub fn render_args(job: &RenderJob) -> Vec<OsString> {
    let mut args: Vec<OsString> = ["-y", "-loglevel", "error", "-f", "lavfi", "-i"]
        .into_iter()
        .map(OsString::from)
        .collect();
    args.push(
        format!(
            "nullsrc=s={}x{}:r={}:d={:.3}",
            job.canvas.width, job.canvas.height, job.fps, job.canvas_seconds
        )
        .into(),
    );
    args.push("-i".into());
    args.push(job.audio_path.as_os_str().to_owned());
    args.extend(
        [
            "-vf".to_string(),
            job.filter_graph.clone(),
            "-r".to_string(),
            job.fps.to_string(),
            "-c:v".to_string(),
            "libx264".to_string(),
            "-preset".to_string(),
            job.preset.clone(),
            "-pix_fmt".to_string(),
            "yuv420p".to_string(),
            "-c:a".to_string(),
            "aac".to_string(),
            "-shortest".to_string(),
            "-movflags".to_string(),
            "+faststart".to_string(),
        ]
        .into_iter()
        .map(OsString::from),
    );
    args.push(job.out_path.as_os_str().to_owned());
    args
}

/// Parse `ffprobe ... -of default=noprint_wrappers=1:nokey=1` output.
pub fn parse_probe_duration(stdout: &str, path: &Path) -> ReelResult<f64> {
    let raw = stdout.trim();
    let seconds = raw.parse::<f64>().map_err(|e| {
        ReelError::measurement(format!(
            "unreadable duration {raw:?} for '{}': {e}",
            path.display()
        ))
    })?;
    checked_duration(seconds, path)
}

pub fn ensure_parent_dir(path: &Path) -> ReelResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/engine/ffmpeg.rs"]
mod tests;
