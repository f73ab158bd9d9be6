use std::path::{Path, PathBuf};

/// One playable file. Identity is the path; a learned duration produces a
/// new value through [`Track::with_duration`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    path: PathBuf,
    duration_ms: Option<u64>,
}

impl Track {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            duration_ms: None,
        }
    }

    pub fn with_duration(&self, duration_ms: u64) -> Self {
        Self {
            path: self.path.clone(),
            duration_ms: Some(duration_ms),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn duration_ms(&self) -> Option<u64> {
        self.duration_ms
    }
}
