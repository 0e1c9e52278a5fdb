use std::path::Path;

use anyhow::Context as _;

use crate::{
    engine::media::Canvas,
    foundation::{
        error::{ReelError, ReelResult},
        seed::{Seed, pick},
    },
    visual::graph::{FilterGraph, FilterStage},
};

/// Procedural background palettes. Each is a slow gradient with a drifting sine term, so no
/// frame is ever black and no external asset is needed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundStyle {
    Slate,
    Emerald,
    Midnight,
}

impl BackgroundStyle {
    pub const ALL: [Self; 3] = [Self::Slate, Self::Emerald, Self::Midnight];

    /// Seeded choice among [`Self::ALL`].
    pub fn select(seed: &Seed) -> Self {
        let mut rng = seed.rng();
        // ALL is non-empty, so the draw cannot fail.
        pick(&mut rng, &Self::ALL, "background style")
            .copied()
            .unwrap_or(Self::Slate)
    }

    fn geq(self) -> FilterStage {
        let (r, g, b) = match self {
            Self::Slate => (
                "18+10*(Y/H)+6*sin(T/2)",
                "16+10*(X/W)+6*sin(T/3)",
                "26+12*(Y/H)+6*sin(T/4)",
            ),
            Self::Emerald => (
                "10+6*(Y/H)+4*sin(T/3)",
                "28+14*(X/W)+6*sin(T/2)",
                "22+10*(Y/H)+5*sin(T/4)",
            ),
            Self::Midnight => (
                "14+8*(X/W)+5*sin(T/4)",
                "12+6*(Y/H)+4*sin(T/3)",
                "34+16*(Y/H)+8*sin(T/2)",
            ),
        };
        FilterStage::Geq {
            r: r.to_string(),
            g: g.to_string(),
            b: b.to_string(),
        }
    }
}

/// Overlay settings.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct VisualOptions {
    /// The title panel is visible while `t` is below this many seconds.
    pub title_window_seconds: f64,
    pub title_font: String,
    pub title_font_size: u32,
    pub caption_font: String,
    pub caption_font_size: u32,
    /// Distance of the caption baseline from the bottom edge, in pixels.
    pub caption_margin_v: u32,
    /// Force a palette instead of the seeded choice.
    pub style: Option<BackgroundStyle>,
}

impl Default for VisualOptions {
    fn default() -> Self {
        Self {
            title_window_seconds: 3.5,
            title_font: "DejaVuSans-Bold".to_string(),
            title_font_size: 58,
            caption_font: "DejaVu Sans".to_string(),
            caption_font_size: 52,
            caption_margin_v: 180,
            style: None,
        }
    }
}

impl VisualOptions {
    pub fn validate(&self) -> ReelResult<()> {
        if !self.title_window_seconds.is_finite() || self.title_window_seconds < 0.0 {
            return Err(ReelError::configuration(
                "title_window_seconds must be a non-negative number",
            ));
        }
        if self.title_font_size == 0 || self.caption_font_size == 0 {
            return Err(ReelError::configuration("font sizes must be non-zero"));
        }
        Ok(())
    }
}

/// Horizontal inset of the title panel on each side.
pub const TITLE_PANEL_MARGIN: u32 = 70;

/// The title panel needs a positive width; `drawbox` reads `w=0` as the full frame width.
pub fn check_canvas(canvas: Canvas) -> ReelResult<()> {
    if canvas.width <= 2 * TITLE_PANEL_MARGIN {
        return Err(ReelError::validation(format!(
            "canvas width {} leaves no room for the title panel (needs more than {} px)",
            canvas.width,
            2 * TITLE_PANEL_MARGIN
        )));
    }
    Ok(())
}

/// Build the background → title → captions chain.
///
/// `title_file` and `captions_file` are referenced, not read; they must exist before the
/// graph is rendered.
pub fn build(
    canvas: Canvas,
    title_file: &Path,
    captions_file: &Path,
    style_seed: &Seed,
    opts: &VisualOptions,
) -> ReelResult<FilterGraph> {
    opts.validate()?;
    let style = opts
        .style
        .unwrap_or_else(|| BackgroundStyle::select(style_seed));
    tracing::debug!(?style, "background style selected");

    check_canvas(canvas)?;

    let enable = Some(format!("lt(t,{})", opts.title_window_seconds));
    let margin = i64::from(TITLE_PANEL_MARGIN);
    let panel_w = canvas.width - 2 * TITLE_PANEL_MARGIN;

    let mut graph = FilterGraph::new();
    graph
        .push(style.geq())
        .push(FilterStage::Noise {
            strength: 5,
            flags: "t+u".to_string(),
        })
        .push(FilterStage::Eq {
            contrast: 1.08,
            brightness: -0.02,
            saturation: 1.05,
        })
        .push(FilterStage::Format {
            pix_fmt: "yuv420p".to_string(),
        })
        .push(FilterStage::DrawBox {
            x: margin,
            y: 150,
            w: panel_w,
            h: 250,
            color: "black@0.40".to_string(),
            enable: enable.clone(),
        })
        .push(FilterStage::DrawText {
            font: opts.title_font.clone(),
            text_file: title_file.to_path_buf(),
            font_color: "white".to_string(),
            font_size: opts.title_font_size,
            x: "(w-text_w)/2".to_string(),
            y: "210".to_string(),
            enable,
        })
        .push(FilterStage::Subtitles {
            path: captions_file.to_path_buf(),
            force_style: format!(
                "FontName={},FontSize={},PrimaryColour=&HFFFFFF&,OutlineColour=&H000000&,\
                 BorderStyle=1,Outline=3,Shadow=0,Alignment=2,MarginV={}",
                opts.caption_font, opts.caption_font_size, opts.caption_margin_v
            ),
        });
    Ok(graph)
}

/// Write the title overlay text with normalized newlines and no surrounding whitespace.
pub fn write_title_file(path: &Path, title: &str) -> ReelResult<()> {
    let text = title.replace("\r\n", "\n").replace('\r', "\n");
    std::fs::write(path, text.trim())
        .with_context(|| format!("write title text '{}'", path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/visual/compose.rs"]
mod tests;
