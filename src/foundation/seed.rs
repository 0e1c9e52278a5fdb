use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};

use crate::foundation::error::{ReelError, ReelResult};

/// Reproducibility key for every seeded selection in a run.
///
/// The key is hashed with xxh3 into the 64-bit state of a [`StdRng`], so equal keys always
/// yield equal draw sequences.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Seed(String);

impl Seed {
    /// Wrap an arbitrary key.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Seed for a run: the external run identifier when present, else the UTC minute bucket.
    pub fn for_run(run_id: Option<&str>) -> Self {
        match run_id.map(str::trim) {
            Some(id) if !id.is_empty() => Self::new(id),
            _ => Self::utc_minute_bucket(),
        }
    }

    /// `YYYY-MM-DD-HH-MM` in UTC. Stable within a minute, changes across runs.
    pub fn utc_minute_bucket() -> Self {
        Self(chrono::Utc::now().format("%Y-%m-%d-%H-%M").to_string())
    }

    /// `YYYY-MM-DD` in UTC.
    pub fn utc_day_bucket() -> Self {
        Self(chrono::Utc::now().format("%Y-%m-%d").to_string())
    }

    /// Child seed `"{key}-{index}"`.
    pub fn derive(&self, index: usize) -> Self {
        Self(format!("{}-{index}", self.0))
    }

    /// Raw key.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 64-bit digest of the key.
    pub fn hash64(&self) -> u64 {
        xxhash_rust::xxh3::xxh3_64(self.0.as_bytes())
    }

    /// Fresh generator positioned at the start of this seed's sequence.
    pub fn rng(&self) -> StdRng {
        StdRng::seed_from_u64(self.hash64())
    }
}

impl std::fmt::Display for Seed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Seed {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Draw one element, treating an empty pool as a configuration fault.
pub(crate) fn pick<'a, T>(rng: &mut StdRng, items: &'a [T], pool: &str) -> ReelResult<&'a T> {
    items
        .choose(rng)
        .ok_or_else(|| ReelError::configuration(format!("{pool} pool is empty")))
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/seed.rs"]
mod tests;
