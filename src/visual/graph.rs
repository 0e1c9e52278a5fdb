//! Typed filter stages and their serialization to the ffmpeg filtergraph grammar.
//!
//! A filtergraph string is parsed twice by ffmpeg. The graph parser splits stages on `,` `;`
//! and pads on `[` `]`, honouring `'` quotes and `\` escapes. Each stage's argument string is
//! then split into `key=value` pairs on `:`, again honouring quotes and escapes. Every value
//! emitted here is encoded for both passes according to its [`OptionValue`] kind, and this
//! module is the only place that produces graph text.

use std::path::{Path, PathBuf};

use crate::foundation::error::{ReelError, ReelResult};

/// Encoding class of an option value.
#[derive(Clone, Debug, PartialEq)]
pub enum OptionValue {
    /// Bare token (number, identifier, color). Rejected if it contains graph syntax.
    Token(String),
    /// Filter expression; single-quoted so commas and parentheses survive the graph pass.
    Expr(String),
    /// Arbitrary text or file path, escaped for both parsing passes.
    Literal(String),
}

impl OptionValue {
    fn token(v: impl ToString) -> Self {
        Self::Token(v.to_string())
    }

    fn expr(v: impl Into<String>) -> Self {
        Self::Expr(v.into())
    }

    fn literal(v: impl Into<String>) -> Self {
        Self::Literal(v.into())
    }

    fn path(p: &Path) -> ReelResult<Self> {
        p.to_str().map(Self::literal).ok_or_else(|| {
            ReelError::validation(format!(
                "path '{}' is not valid UTF-8 and cannot be referenced from a filter graph",
                p.display()
            ))
        })
    }

    fn encode(&self) -> ReelResult<String> {
        match self {
            Self::Token(t) => {
                if t.is_empty() || t.chars().any(is_graph_syntax) {
                    return Err(ReelError::validation(format!(
                        "filter token '{t}' contains filtergraph syntax"
                    )));
                }
                Ok(t.clone())
            }
            Self::Expr(e) => {
                // Quoted text is taken verbatim by both passes, so quotes and escapes cannot
                // appear inside it.
                if e.is_empty() || e.contains(['\'', '\\']) {
                    return Err(ReelError::validation(format!(
                        "filter expression {e:?} must be non-empty without quotes or backslashes"
                    )));
                }
                Ok(format!("'{e}'"))
            }
            Self::Literal(s) => Ok(escape_graph_value(&escape_option_value(s))),
        }
    }
}

fn is_graph_syntax(c: char) -> bool {
    matches!(c, '\\' | '\'' | ':' | '=' | ',' | ';' | '[' | ']') || c.is_whitespace()
}

/// Escape for the `key=value:key=value` pass.
pub fn escape_option_value(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '\\' | '\'' | ':') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Escape for the graph pass (stage and pad separators).
pub fn escape_graph_value(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '\\' | '\'' | '[' | ']' | ',' | ';') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// One visual effect stage with explicit parameters.
#[derive(Clone, Debug, PartialEq)]
pub enum FilterStage {
    /// Per-pixel RGB expressions of `X`, `Y`, `W`, `H`, `T`.
    Geq { r: String, g: String, b: String },
    /// Temporal/uniform grain.
    Noise { strength: u32, flags: String },
    Eq {
        contrast: f64,
        brightness: f64,
        saturation: f64,
    },
    Format { pix_fmt: String },
    DrawBox {
        x: i64,
        y: i64,
        w: u32,
        h: u32,
        color: String,
        enable: Option<String>,
    },
    /// Text read from a file, drawn without `%{...}` expansion.
    DrawText {
        font: String,
        text_file: PathBuf,
        font_color: String,
        font_size: u32,
        x: String,
        y: String,
        enable: Option<String>,
    },
    /// Burned-in subtitles from an SRT file with an ASS style override.
    Subtitles { path: PathBuf, force_style: String },
}

impl FilterStage {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Geq { .. } => "geq",
            Self::Noise { .. } => "noise",
            Self::Eq { .. } => "eq",
            Self::Format { .. } => "format",
            Self::DrawBox { .. } => "drawbox",
            Self::DrawText { .. } => "drawtext",
            Self::Subtitles { .. } => "subtitles",
        }
    }

    /// Files this stage reads at render time.
    pub fn referenced_files(&self) -> Vec<&Path> {
        match self {
            Self::DrawText { text_file, .. } => vec![text_file.as_path()],
            Self::Subtitles { path, .. } => vec![path.as_path()],
            _ => Vec::new(),
        }
    }

    fn options(&self) -> ReelResult<Vec<(&'static str, OptionValue)>> {
        let mut opts = match self {
            Self::Geq { r, g, b } => vec![
                ("r", OptionValue::expr(r)),
                ("g", OptionValue::expr(g)),
                ("b", OptionValue::expr(b)),
            ],
            Self::Noise { strength, flags } => vec![
                ("alls", OptionValue::token(strength)),
                ("allf", OptionValue::token(flags)),
            ],
            Self::Eq {
                contrast,
                brightness,
                saturation,
            } => vec![
                ("contrast", OptionValue::token(contrast)),
                ("brightness", OptionValue::token(brightness)),
                ("saturation", OptionValue::token(saturation)),
            ],
            Self::Format { pix_fmt } => vec![("pix_fmts", OptionValue::token(pix_fmt))],
            Self::DrawBox {
                x, y, w, h, color, ..
            } => vec![
                ("x", OptionValue::token(x)),
                ("y", OptionValue::token(y)),
                ("w", OptionValue::token(w)),
                ("h", OptionValue::token(h)),
                ("color", OptionValue::token(color)),
                ("t", OptionValue::token("fill")),
            ],
            Self::DrawText {
                font,
                text_file,
                font_color,
                font_size,
                x,
                y,
                ..
            } => vec![
                ("font", OptionValue::literal(font)),
                ("textfile", OptionValue::path(text_file)?),
                ("reload", OptionValue::token(0)),
                ("expansion", OptionValue::token("none")),
                ("fontcolor", OptionValue::token(font_color)),
                ("fontsize", OptionValue::token(font_size)),
                ("x", OptionValue::expr(x)),
                ("y", OptionValue::expr(y)),
            ],
            Self::Subtitles { path, force_style } => vec![
                ("filename", OptionValue::path(path)?),
                ("force_style", OptionValue::literal(force_style)),
            ],
        };

        if let Self::DrawBox {
            enable: Some(e), ..
        }
        | Self::DrawText {
            enable: Some(e), ..
        } = self
        {
            opts.push(("enable", OptionValue::expr(e)));
        }
        Ok(opts)
    }

    /// `name=key=value:key=value`.
    pub fn to_filter_string(&self) -> ReelResult<String> {
        let args = self
            .options()?
            .iter()
            .map(|(k, v)| -> ReelResult<String> { Ok(format!("{k}={}", v.encode()?)) })
            .collect::<ReelResult<Vec<_>>>()?;
        if args.is_empty() {
            Ok(self.name().to_string())
        } else {
            Ok(format!("{}={}", self.name(), args.join(":")))
        }
    }
}

/// Ordered, non-commutative chain of stages applied to one video stream.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilterGraph {
    stages: Vec<FilterStage>,
}

impl FilterGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, stage: FilterStage) -> &mut Self {
        self.stages.push(stage);
        self
    }

    pub fn stages(&self) -> &[FilterStage] {
        &self.stages
    }

    /// Serialize the chain. Fails on an empty chain or on any value that cannot be encoded.
    pub fn to_filter_string(&self) -> ReelResult<String> {
        if self.stages.is_empty() {
            return Err(ReelError::validation("filter graph has no stages"));
        }
        Ok(self
            .stages
            .iter()
            .map(FilterStage::to_filter_string)
            .collect::<ReelResult<Vec<_>>>()?
            .join(","))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/visual/graph.rs"]
mod tests;
