use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::error::ReelResult;

/// Per-run working directory. Every intermediate and final artifact lives under `root`.
///
/// Concurrent runs must use distinct workspaces.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    /// Create (or reuse) `root`.
    pub fn create(root: impl Into<PathBuf>) -> ReelResult<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root)
            .with_context(|| format!("create workspace '{}'", root.display()))?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn raw_audio(&self) -> PathBuf {
        self.root.join("audio_raw.mp3")
    }

    pub fn audio(&self) -> PathBuf {
        self.root.join("audio.mp3")
    }

    pub fn captions(&self) -> PathBuf {
        self.root.join("captions.srt")
    }

    pub fn title_text(&self) -> PathBuf {
        self.root.join("title.txt")
    }

    pub fn video(&self) -> PathBuf {
        self.root.join("video.mp4")
    }

    pub fn meta_title(&self) -> PathBuf {
        self.root.join("meta_title.txt")
    }

    pub fn meta_description(&self) -> PathBuf {
        self.root.join("meta_desc.txt")
    }

    /// Final artifacts consumed by publishing.
    pub fn final_artifacts(&self) -> [PathBuf; 3] {
        [self.video(), self.meta_title(), self.meta_description()]
    }

    /// Remove final artifacts left by a previous run so a failed run cannot be mistaken for a
    /// complete one.
    pub fn clear_final_artifacts(&self) -> ReelResult<()> {
        for path in self.final_artifacts() {
            if path.exists() {
                std::fs::remove_file(&path)
                    .with_context(|| format!("remove stale artifact '{}'", path.display()))?;
            }
        }
        Ok(())
    }
}

/// Write `contents` to a sibling temp file, then rename over `path`.
pub fn write_atomic(path: &Path, contents: &str) -> ReelResult<()> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let tmp = path.with_file_name(format!(".{name}.tmp"));
    std::fs::write(&tmp, contents).with_context(|| format!("write '{}'", tmp.display()))?;
    std::fs::rename(&tmp, path)
        .with_context(|| format!("rename '{}' -> '{}'", tmp.display(), path.display()))?;
    Ok(())
}
