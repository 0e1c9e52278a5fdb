use crate::{
    foundation::{
        error::ReelResult,
        seed::{Seed, pick},
    },
    script::pool::TemplatePool,
};

/// Output length of a generated script.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptMode {
    /// One topic/hook/call-to-action, a single short.
    #[default]
    Short,
    /// Several independently seeded parts joined into one long-form video.
    Long,
}

/// Generated script. Immutable once produced.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Script {
    pub title: String,
    /// Newline-delimited body; each non-blank line becomes one caption.
    pub body: String,
    pub tags: String,
}

impl Script {
    /// Trimmed, non-blank body lines in order.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.body.lines().map(str::trim).filter(|l| !l.is_empty())
    }

    /// Description text published next to the video.
    pub fn description(&self, tagline: &str) -> String {
        format!("{tagline}\n\n{}", self.tags)
    }
}

/// Build the script for `mode`, fully determined by `pool` and `seed`.
#[tracing::instrument(skip(pool), fields(seed = %seed))]
pub fn generate(pool: &TemplatePool, mode: ScriptMode, seed: &Seed) -> ReelResult<Script> {
    pool.validate()?;

    let script = match mode {
        ScriptMode::Short => {
            let part = draw_part(pool, seed)?;
            Script {
                title: part.topic.replace(':', " —").trim().to_string(),
                body: part.body,
                tags: pool.short_tags.clone(),
            }
        }
        ScriptMode::Long => {
            let mut bodies = Vec::with_capacity(pool.long_parts);
            for i in 0..pool.long_parts {
                bodies.push(draw_part(pool, &seed.derive(i))?.body);
            }
            Script {
                title: pool.long_title.clone(),
                body: bodies.join(&pool.part_separator),
                tags: pool.long_tags.clone(),
            }
        }
    };

    tracing::debug!(title = %script.title, lines = script.lines().count(), "script generated");
    Ok(script)
}

struct Part<'a> {
    topic: &'a str,
    body: String,
}

fn draw_part<'a>(pool: &'a TemplatePool, seed: &Seed) -> ReelResult<Part<'a>> {
    let mut rng = seed.rng();
    // Draw order is part of the reproducibility contract.
    let topic = pick(&mut rng, &pool.topics, "topic")?;
    let hook = pick(&mut rng, &pool.hooks, "hook")?;
    let cta = pick(&mut rng, &pool.ctas, "call-to-action")?;

    let mut paragraphs = Vec::with_capacity(pool.middle_paragraphs.len() + 2);
    paragraphs.push(format!("{hook} {topic}."));
    paragraphs.extend(pool.middle_paragraphs.iter().cloned());
    paragraphs.push(cta.clone());

    Ok(Part {
        topic: topic.as_str(),
        body: paragraphs.join("\n\n"),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/script/generator.rs"]
mod tests;
