use super::*;
use crate::config::LibrarySettings;
use crate::error::LibraryError;
use std::fs;
use std::path::PathBuf;
use std::sync::mpsc;
use std::time::Duration;
use tempfile::tempdir;

fn settings() -> LibrarySettings {
    LibrarySettings {
        probe_durations: false,
        ..LibrarySettings::default()
    }
}

fn names(tracks: &[Track], root: &std::path::Path) -> Vec<String> {
    tracks
        .iter()
        .map(|t| {
            t.path()
                .strip_prefix(root)
                .unwrap()
                .to_string_lossy()
                .into_owned()
        })
        .collect()
}

#[test]
fn scan_yields_one_track_per_regular_file_regardless_of_directories() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    fs::create_dir_all(root.join("a/b/c")).unwrap();
    fs::create_dir_all(root.join("empty")).unwrap();
    fs::create_dir_all(root.join("d")).unwrap();
    fs::write(root.join("one.ogg"), b"x").unwrap();
    fs::write(root.join("a/two.mp3"), b"x").unwrap();
    fs::write(root.join("a/b/c/three.flac"), b"x").unwrap();
    fs::write(root.join("d/.hidden"), b"x").unwrap();

    let tracks = scan(root, &settings()).unwrap();
    assert_eq!(tracks.len(), 4);
    assert!(tracks.iter().all(|t| t.path().is_file()));
    assert!(tracks.iter().all(|t| t.duration_ms().is_none()));
}

#[test]
fn scan_orders_tracks_lexicographically_by_path() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    fs::create_dir_all(root.join("b")).unwrap();
    fs::write(root.join("c.ogg"), b"x").unwrap();
    fs::write(root.join("b/z.ogg"), b"x").unwrap();
    fs::write(root.join("a.ogg"), b"x").unwrap();

    let tracks = scan(root, &settings()).unwrap();
    assert_eq!(names(&tracks, root), vec!["a.ogg", "b/z.ogg", "c.ogg"]);
}

#[test]
fn scan_of_empty_directory_is_empty() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("nested/deeper")).unwrap();
    let tracks = scan(dir.path(), &settings()).unwrap();
    assert!(tracks.is_empty());
}

#[test]
fn scan_of_missing_root_is_directory_unavailable() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("does-not-exist");
    match scan(&missing, &settings()) {
        Err(LibraryError::DirectoryUnavailable { path, .. }) => assert_eq!(path, missing),
        other => panic!("expected DirectoryUnavailable, got {other:?}"),
    }
}

#[test]
fn scan_of_plain_file_root_is_directory_unavailable() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("song.ogg");
    fs::write(&file, b"x").unwrap();
    assert!(matches!(
        scan(&file, &settings()),
        Err(LibraryError::DirectoryUnavailable { .. })
    ));
}

#[test]
fn scan_respects_extension_allow_list() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.ogg"), b"x").unwrap();
    fs::write(dir.path().join("cover.jpg"), b"x").unwrap();

    let s = LibrarySettings {
        extensions: vec!["ogg".into()],
        ..settings()
    };
    let tracks = scan(dir.path(), &s).unwrap();
    assert_eq!(names(&tracks, dir.path()), vec!["a.ogg"]);
}

#[test]
fn scan_respects_max_depth() {
    let dir = tempdir().unwrap();
    let d1 = dir.path().join("d1");
    let d2 = d1.join("d2");
    fs::create_dir_all(&d2).unwrap();
    fs::write(dir.path().join("root.ogg"), b"x").unwrap();
    fs::write(d1.join("one.ogg"), b"x").unwrap();
    fs::write(d2.join("two.ogg"), b"x").unwrap();

    // WalkDir depth counts root as 0, children as 1, grandchildren as 2...
    let s = LibrarySettings {
        max_depth: Some(2),
        ..settings()
    };
    let tracks = scan(dir.path(), &s).unwrap();
    assert_eq!(names(&tracks, dir.path()), vec!["d1/one.ogg", "root.ogg"]);
}

#[cfg(unix)]
#[test]
fn scan_skips_dangling_symlinks() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("real.ogg"), b"x").unwrap();
    std::os::unix::fs::symlink(dir.path().join("gone.ogg"), dir.path().join("link.ogg")).unwrap();

    let tracks = scan(dir.path(), &settings()).unwrap();
    assert_eq!(names(&tracks, dir.path()), vec!["real.ogg"]);
}

#[test]
fn probe_on_non_audio_file_leaves_duration_unknown() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("fake.mp3"), b"not really an mp3").unwrap();

    let s = LibrarySettings {
        probe_durations: true,
        ..settings()
    };
    let tracks = scan(dir.path(), &s).unwrap();
    assert_eq!(tracks.len(), 1);
    assert_eq!(tracks[0].duration_ms(), None);
}

#[test]
fn track_with_duration_keeps_identity() {
    let t = Track::new(PathBuf::from("/music/a.ogg"));
    let learned = t.with_duration(125_000);
    assert_eq!(learned.path(), t.path());
    assert_eq!(learned.duration_ms(), Some(125_000));
    assert_eq!(t.duration_ms(), None);
}

#[test]
fn worker_delivers_one_message_with_its_generation() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.ogg"), b"x").unwrap();
    fs::write(dir.path().join("b.ogg"), b"x").unwrap();

    let (tx, rx) = mpsc::channel();
    let worker = ScanWorker::spawn(7, dir.path().to_path_buf(), settings(), tx);
    assert_eq!(worker.generation(), 7);
    worker.join();

    let msg = rx.recv_timeout(Duration::from_secs(5)).unwrap();
    assert_eq!(msg.generation, 7);
    assert_eq!(msg.root, dir.path());
    assert_eq!(msg.result.unwrap().len(), 2);
    assert!(rx.try_recv().is_err());
}

#[test]
fn worker_reports_unavailable_root() {
    let dir = tempdir().unwrap();
    let (tx, rx) = mpsc::channel();
    ScanWorker::spawn(1, dir.path().join("missing"), settings(), tx).join();

    let msg = rx.recv_timeout(Duration::from_secs(5)).unwrap();
    assert!(matches!(
        msg.result,
        Err(LibraryError::DirectoryUnavailable { .. })
    ));
}
