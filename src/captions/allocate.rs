use crate::foundation::error::{ReelError, ReelResult};

/// Shortest time a caption line stays on screen unless the track ends first.
pub const DEFAULT_MIN_DISPLAY_SECONDS: f64 = 1.35;

/// One timed caption line.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CaptionEntry {
    /// 1-based position.
    pub index: usize,
    pub start: f64,
    pub end: f64,
    pub text: String,
}

impl CaptionEntry {
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// Partition `total_duration` across the non-blank lines of `text`.
///
/// Each line gets a share proportional to its word count (at least 1), floored at
/// `min_display`. Entries are laid end to end from 0 and the last one ends exactly at
/// `total_duration`; lines that no longer fit collapse to zero length at the track end.
pub fn allocate(
    text: &str,
    total_duration: f64,
    min_display: f64,
) -> ReelResult<Vec<CaptionEntry>> {
    if !total_duration.is_finite() || total_duration <= 0.0 {
        return Err(ReelError::measurement(format!(
            "caption timing needs a positive track duration, got {total_duration}"
        )));
    }
    if !min_display.is_finite() || min_display < 0.0 {
        return Err(ReelError::validation(format!(
            "minimum caption display must be non-negative, got {min_display}"
        )));
    }

    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();
    let weights: Vec<usize> = lines
        .iter()
        .map(|l| l.split_whitespace().count().max(1))
        .collect();
    let total_weight: usize = weights.iter().sum();

    let mut entries = Vec::with_capacity(lines.len());
    let mut cursor = 0.0_f64;
    for (i, (line, weight)) in lines.iter().zip(&weights).enumerate() {
        let share = total_duration * (*weight as f64) / (total_weight as f64);
        let proposed = share.max(min_display);
        let start = cursor;
        let end = (start + proposed).min(total_duration);
        entries.push(CaptionEntry {
            index: i + 1,
            start,
            end,
            text: (*line).to_string(),
        });
        cursor = end;
    }

    // Floors only lengthen earlier entries, so the last end reaches the track end up to float
    // drift; snap it so the sequence tiles the duration exactly.
    if let Some(last) = entries.last_mut() {
        last.end = total_duration;
    }
    Ok(entries)
}

#[cfg(test)]
#[path = "../../tests/unit/captions/allocate.rs"]
mod tests;
