use crate::foundation::error::{ReelError, ReelResult};

/// Fixed phrase pools and layout constants used to assemble scripts.
///
/// The default pool is the "Silent Money Blueprint" finance channel. A deployment may ship its
/// own pool through the pipeline config; every list must be non-empty.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TemplatePool {
    pub topics: Vec<String>,
    pub hooks: Vec<String>,
    pub ctas: Vec<String>,
    /// Paragraphs placed between the opening line and the call to action. Lines inside a
    /// paragraph are separated by `\n`.
    pub middle_paragraphs: Vec<String>,
    pub short_tags: String,
    pub long_tags: String,
    pub long_title: String,
    pub long_parts: usize,
    pub part_separator: String,
    /// First line of the published description.
    pub tagline: String,
}

impl Default for TemplatePool {
    fn default() -> Self {
        Self {
            topics: strings(&[
                "Money rain: why cash flow beats hustle",
                "The 3 silent habits of wealthy people",
                "ETF myth that keeps people broke",
                "Why most budgets fail (and what works)",
                "The 'one account' rule for saving fast",
                "Stop buying motivation. Build systems.",
                "The 2% rule that compounds your life",
                "Rich people protect attention, not time",
                "Lifestyle inflation: the invisible tax",
                "How to automate wealth in 15 minutes",
            ]),
            hooks: strings(&[
                "Here’s the truth nobody tells you:",
                "If you want money to grow quietly, do this:",
                "This is why most people stay broke:",
                "If your paycheck disappears, listen:",
                "This single shift changes everything:",
            ]),
            ctas: strings(&[
                "Follow Silent Money Blueprint for daily systems.",
                "Save this and watch it again tomorrow.",
                "Comment 'BLUEPRINT' and I’ll drop a checklist.",
                "Share this with someone who needs structure.",
            ]),
            middle_paragraphs: strings(&[
                "Most people chase motivation, but motivation expires.\nSystems don’t.",
                "Automate saving first.\nCap lifestyle inflation.\nInvest consistently.\nLet compounding do the heavy lifting.",
            ]),
            short_tags: "#shorts #money #wealth #investing #personalfinance".to_string(),
            long_tags: "#money #wealth #investing #personalfinance".to_string(),
            long_title: "Silent Money Blueprint — Weekly Money Systems (6 Lessons)".to_string(),
            long_parts: 6,
            part_separator: "\n\n---\n\n".to_string(),
            tagline: "Silent Money Blueprint.".to_string(),
        }
    }
}

impl TemplatePool {
    /// Reject pools that cannot produce a script.
    pub fn validate(&self) -> ReelResult<()> {
        for (name, pool) in [
            ("topic", &self.topics),
            ("hook", &self.hooks),
            ("call-to-action", &self.ctas),
        ] {
            if pool.is_empty() {
                return Err(ReelError::configuration(format!("{name} pool is empty")));
            }
            if let Some(i) = pool.iter().position(|s| s.trim().is_empty()) {
                return Err(ReelError::configuration(format!(
                    "{name} pool entry {i} is blank"
                )));
            }
        }
        if self.middle_paragraphs.iter().any(|p| p.trim().is_empty()) {
            return Err(ReelError::configuration("middle paragraphs must not be blank"));
        }
        if self.long_parts == 0 {
            return Err(ReelError::configuration("long_parts must be > 0"));
        }
        if self.long_title.trim().is_empty() {
            return Err(ReelError::configuration("long_title must not be empty"));
        }
        Ok(())
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}
