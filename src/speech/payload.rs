/// Input shape a backend accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PayloadKind {
    PlainText,
    Ssml,
}

/// Text prepared for one backend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Payload {
    PlainText(String),
    Ssml(String),
}

/// Pause inserted between script lines in SSML payloads.
pub const LINE_BREAK_SSML: &str = "<break time='280ms'/>";

impl Payload {
    /// Shape `text` the way a backend of `kind` expects it.
    pub fn shape(kind: PayloadKind, text: &str, voice: &str) -> Self {
        match kind {
            PayloadKind::PlainText => Self::PlainText(plain_text(text)),
            PayloadKind::Ssml => Self::Ssml(ssml(text, voice)),
        }
    }

    pub fn kind(&self) -> PayloadKind {
        match self {
            Self::PlainText(_) => PayloadKind::PlainText,
            Self::Ssml(_) => PayloadKind::Ssml,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::PlainText(s) | Self::Ssml(s) => s,
        }
    }
}

/// Newline-normalized, trimmed text.
pub fn plain_text(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n").trim().to_string()
}

/// SSML document with escaped text and a short pause between non-blank lines.
pub fn ssml(text: &str, voice: &str) -> String {
    let normalized = plain_text(text);
    let body = normalized
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(escape_xml)
        .collect::<Vec<_>>()
        .join(&format!(" {LINE_BREAK_SSML} "));

    format!(
        "<speak>\n  <voice name=\"{}\">\n    <prosody rate=\"-1%\" pitch=\"+0st\">\n      {body}\n    </prosody>\n  </voice>\n</speak>",
        escape_xml(voice)
    )
}

/// Escape XML markup characters and drop control characters other than tab/newline.
pub fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '\t' | '\n' => out.push(c),
            c if c.is_control() => {}
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/speech/payload.rs"]
mod tests;
