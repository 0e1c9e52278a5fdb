use std::path::Path;

use anyhow::Context as _;

use crate::{captions::allocate::CaptionEntry, foundation::error::ReelResult};

/// `HH:MM:SS,mmm`.
///
/// The value is rounded to whole milliseconds before it is split into fields, so rounding is
/// monotonic and equal boundaries always format identically.
pub fn format_timestamp(seconds: f64) -> String {
    let total_ms = (seconds.max(0.0) * 1000.0).round() as u64;
    let ms = total_ms % 1000;
    let total_s = total_ms / 1000;
    let s = total_s % 60;
    let m = (total_s / 60) % 60;
    let h = total_s / 3600;
    format!("{h:02}:{m:02}:{s:02},{ms:03}")
}

/// SubRip document for `entries`.
pub fn to_srt(entries: &[CaptionEntry]) -> String {
    let mut out = String::new();
    for e in entries {
        out.push_str(&format!(
            "{}\n{} --> {}\n{}\n\n",
            e.index,
            format_timestamp(e.start),
            format_timestamp(e.end),
            e.text
        ));
    }
    out
}

/// Write `entries` as SRT to `path`, replacing any previous file.
pub fn write_srt(path: &Path, entries: &[CaptionEntry]) -> ReelResult<()> {
    std::fs::write(path, to_srt(entries))
        .with_context(|| format!("write captions '{}'", path.display()))?;
    Ok(())
}
