use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::config::LibrarySettings;
use crate::error::LibraryError;

use super::model::Track;
use super::probe::probe_duration_ms;

fn accepts_extension(path: &Path, settings: &LibrarySettings) -> bool {
    let exts: Vec<String> = settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    // No allow-list configured: every regular file is a track.
    if exts.is_empty() {
        return true;
    }

    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

/// Recursively collect every regular file under `dir`, sorted by path.
pub fn scan(dir: &Path, settings: &LibrarySettings) -> Result<Vec<Track>, LibraryError> {
    scan_cancellable(dir, settings, &AtomicBool::new(false))
}

/// Like [`scan`], but gives up with [`LibraryError::Cancelled`] as soon as
/// `cancel` is raised. Nothing collected so far is returned.
pub fn scan_cancellable(
    dir: &Path,
    settings: &LibrarySettings,
    cancel: &AtomicBool,
) -> Result<Vec<Track>, LibraryError> {
    // Fails for missing roots, permission errors and plain files alike.
    fs::read_dir(dir).map_err(|source| LibraryError::DirectoryUnavailable {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut walker = WalkDir::new(dir).follow_links(settings.follow_links);
    if let Some(d) = settings.max_depth {
        walker = walker.max_depth(d);
    }

    let mut tracks: Vec<Track> = Vec::new();
    let mut skipped = 0usize;

    for entry in walker {
        if cancel.load(Ordering::Relaxed) {
            debug!(root = %dir.display(), "scan cancelled");
            return Err(LibraryError::Cancelled);
        }

        let entry = match entry {
            Ok(entry) => entry,
            Err(source) => {
                let path = source
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| dir.to_path_buf());
                let err = LibraryError::EntryUnreadable { path, source };
                warn!(error = %err, "scan entry skipped");
                skipped += 1;
                continue;
            }
        };

        if !entry.file_type().is_file() || !accepts_extension(entry.path(), settings) {
            continue;
        }

        let mut track = Track::new(entry.path());
        if settings.probe_durations {
            if let Some(ms) = probe_duration_ms(entry.path()) {
                track = track.with_duration(ms);
            }
        }
        tracks.push(track);
    }

    tracks.sort_by(|a, b| a.path().cmp(b.path()));
    info!(
        root = %dir.display(),
        tracks = tracks.len(),
        skipped,
        "scan finished"
    );
    Ok(tracks)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> LibrarySettings {
        LibrarySettings {
            probe_durations: false,
            ..LibrarySettings::default()
        }
    }

    #[test]
    fn accepts_everything_without_allow_list() {
        let s = settings();
        assert!(accepts_extension(Path::new("/tmp/a.mp3"), &s));
        assert!(accepts_extension(Path::new("/tmp/cover.jpg"), &s));
        assert!(accepts_extension(Path::new("/tmp/README"), &s));
    }

    #[test]
    fn allow_list_is_case_insensitive_and_ignores_dots() {
        let s = LibrarySettings {
            extensions: vec![".OGG".into(), "flac".into(), "  ".into()],
            ..settings()
        };
        assert!(accepts_extension(Path::new("/tmp/a.ogg"), &s));
        assert!(accepts_extension(Path::new("/tmp/a.FLAC"), &s));
        assert!(!accepts_extension(Path::new("/tmp/a.mp3"), &s));
        assert!(!accepts_extension(Path::new("/tmp/a"), &s));
    }

    #[test]
    fn raised_cancel_flag_discards_the_scan() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.ogg"), b"x").unwrap();

        let cancel = AtomicBool::new(true);
        let result = scan_cancellable(dir.path(), &settings(), &cancel);
        assert!(matches!(result, Err(LibraryError::Cancelled)));
    }
}
