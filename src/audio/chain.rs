/// One ffmpeg audio filter with its parameters.
#[derive(Clone, Debug, PartialEq)]
pub enum AudioFilter {
    HighPass { hz: u32 },
    LowPass { hz: u32 },
    /// FFT denoiser.
    Denoise { noise_floor_db: f64 },
    /// Single peaking band.
    Equalizer { hz: u32, width_hz: u32, gain_db: f64 },
    Compressor {
        threshold_db: f64,
        ratio: f64,
        attack_ms: f64,
        release_ms: f64,
    },
    /// EBU R128 loudness normalization.
    LoudNorm {
        integrated_lufs: f64,
        true_peak_db: f64,
        lra: f64,
    },
}

impl AudioFilter {
    /// ffmpeg `-af` syntax for this filter.
    pub fn to_filter_string(&self) -> String {
        match self {
            Self::HighPass { hz } => format!("highpass=f={hz}"),
            Self::LowPass { hz } => format!("lowpass=f={hz}"),
            Self::Denoise { noise_floor_db } => format!("afftdn=nf={noise_floor_db}"),
            Self::Equalizer {
                hz,
                width_hz,
                gain_db,
            } => format!("equalizer=f={hz}:t=h:w={width_hz}:g={gain_db}"),
            Self::Compressor {
                threshold_db,
                ratio,
                attack_ms,
                release_ms,
            } => format!(
                "acompressor=threshold={threshold_db}dB:ratio={ratio}:attack={attack_ms}:release={release_ms}"
            ),
            Self::LoudNorm {
                integrated_lufs,
                true_peak_db,
                lra,
            } => format!("loudnorm=I={integrated_lufs}:TP={true_peak_db}:LRA={lra}"),
        }
    }
}

/// Toggles and output format for the post-processing chain.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AudioOptions {
    pub denoise: bool,
    pub equalize: bool,
    pub loudness_normalize: bool,
    pub sample_rate: u32,
    pub channels: u16,
    pub bitrate: String,
}

impl Default for AudioOptions {
    fn default() -> Self {
        Self {
            denoise: false,
            equalize: false,
            loudness_normalize: false,
            sample_rate: 44_100,
            channels: 2,
            bitrate: "192k".to_string(),
        }
    }
}

/// Ordered filter chain plus the normalized output format.
#[derive(Clone, Debug, PartialEq)]
pub struct AudioFilterChain {
    pub filters: Vec<AudioFilter>,
    pub sample_rate: u32,
    pub channels: u16,
    pub bitrate: String,
}

impl AudioFilterChain {
    /// Band-limit, optionally clean up, compress, optionally normalize loudness.
    pub fn from_options(opts: &AudioOptions) -> Self {
        let mut filters = vec![
            AudioFilter::HighPass { hz: 70 },
            AudioFilter::LowPass { hz: 12_000 },
        ];
        if opts.denoise {
            filters.push(AudioFilter::Denoise {
                noise_floor_db: -25.0,
            });
        }
        if opts.equalize {
            // Presence lift for speech intelligibility.
            filters.push(AudioFilter::Equalizer {
                hz: 3_000,
                width_hz: 1_500,
                gain_db: 2.0,
            });
        }
        filters.push(AudioFilter::Compressor {
            threshold_db: -18.0,
            ratio: 2.6,
            attack_ms: 10.0,
            release_ms: 120.0,
        });
        if opts.loudness_normalize {
            filters.push(AudioFilter::LoudNorm {
                integrated_lufs: -16.0,
                true_peak_db: -1.5,
                lra: 11.0,
            });
        }

        Self {
            filters,
            sample_rate: opts.sample_rate,
            channels: opts.channels,
            bitrate: opts.bitrate.clone(),
        }
    }

    /// Comma-joined `-af` argument.
    pub fn to_filter_string(&self) -> String {
        self.filters
            .iter()
            .map(AudioFilter::to_filter_string)
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl Default for AudioFilterChain {
    fn default() -> Self {
        Self::from_options(&AudioOptions::default())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/audio/chain.rs"]
mod tests;
