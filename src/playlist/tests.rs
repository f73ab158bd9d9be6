use super::*;
use crate::library::Track;
use crate::slider::Orientation;
use std::path::{Path, PathBuf};

fn tracks(names: &[&str]) -> Vec<Track> {
    names
        .iter()
        .map(|n| Track::new(PathBuf::from("/music").join(n)))
        .collect()
}

fn playlist(names: &[&str]) -> Playlist {
    let mut p = Playlist::new();
    p.replace(Some(PathBuf::from("/music")), tracks(names));
    p
}

#[test]
fn model_has_one_row_per_track_and_two_columns() {
    let p = playlist(&["a.ogg", "b.ogg", "c.ogg"]);
    let model = PlaylistModel::new(&p);
    assert_eq!(model.row_count(), 3);
    assert_eq!(model.column_count(), 2);
}

#[test]
fn headers_name_columns_and_number_rows_from_one() {
    let p = playlist(&["a.ogg", "b.ogg"]);
    let model = PlaylistModel::new(&p);

    assert_eq!(
        model.header_data(0, Orientation::Horizontal).as_deref(),
        Some("file name")
    );
    assert_eq!(
        model.header_data(1, Orientation::Horizontal).as_deref(),
        Some("time")
    );
    assert_eq!(model.header_data(2, Orientation::Horizontal), None);

    assert_eq!(model.header_data(0, Orientation::Vertical).as_deref(), Some("1"));
    assert_eq!(model.header_data(1, Orientation::Vertical).as_deref(), Some("2"));
    assert_eq!(model.header_data(2, Orientation::Vertical), None);
}

#[test]
fn name_column_renders_path_absolute_or_relative() {
    let p = playlist(&["sub/a.ogg"]);

    let absolute = PlaylistModel::new(&p);
    assert_eq!(
        absolute.data(0, Column::Name).as_deref(),
        Some("/music/sub/a.ogg")
    );

    let relative = PlaylistModel::new(&p).relative_paths(true);
    assert_eq!(relative.data(0, Column::Name).as_deref(), Some("sub/a.ogg"));
    assert_eq!(relative.data(1, Column::Name), None);
}

#[test]
fn duration_column_is_empty_until_known() {
    let mut p = playlist(&["a.ogg", "b.ogg"]);
    assert_eq!(
        PlaylistModel::new(&p).data(0, Column::Duration).as_deref(),
        Some("")
    );

    p.record_duration(0, 125_000);
    let model = PlaylistModel::new(&p);
    assert_eq!(model.data(0, Column::Duration).as_deref(), Some("2:05"));
    assert_eq!(model.data(1, Column::Duration).as_deref(), Some(""));
}

#[test]
fn replace_signals_reset_to_every_live_subscriber() {
    let mut p = Playlist::new();
    let first = p.subscribe();
    let second = p.subscribe();
    drop(second);

    p.replace(None, tracks(&["a.ogg", "b.ogg"]));
    assert_eq!(first.try_recv(), Ok(ModelEvent::Reset { rows: 2 }));
    assert!(first.try_recv().is_err());

    p.replace(None, Vec::new());
    assert_eq!(first.try_recv(), Ok(ModelEvent::Reset { rows: 0 }));
}

#[test]
fn replace_clears_current_index() {
    let mut p = playlist(&["a.ogg", "b.ogg"]);
    assert!(p.set_current(1));
    assert_eq!(p.current(), Some(1));

    p.replace(None, tracks(&["c.ogg"]));
    assert_eq!(p.current(), None);
    assert!(p.current_track().is_none());
}

#[test]
fn set_current_rejects_out_of_range() {
    let mut p = playlist(&["a.ogg"]);
    assert!(!p.set_current(1));
    assert_eq!(p.current(), None);
    assert!(p.set_current(0));
    assert_eq!(p.current_track().unwrap().path(), Path::new("/music/a.ogg"));
}

#[test]
fn position_of_finds_tracks_by_path() {
    let p = playlist(&["a.ogg", "b.ogg"]);
    assert_eq!(p.position_of(Path::new("/music/b.ogg")), Some(1));
    assert_eq!(p.position_of(Path::new("/music/z.ogg")), None);
    assert_eq!(
        p.paths(),
        vec![PathBuf::from("/music/a.ogg"), PathBuf::from("/music/b.ogg")]
    );
}

#[test]
fn empty_playlist_has_no_rows() {
    let p = Playlist::new();
    let model = PlaylistModel::new(&p);
    assert_eq!(model.row_count(), 0);
    assert_eq!(model.data(0, Column::Name), None);
    assert!(p.is_empty());
}
