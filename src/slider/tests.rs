use super::*;

fn press(slider: &mut SeekableSlider, x: u16, y: u16, g: Geometry) -> PointerOutcome {
    slider.handle_pointer(Pointer::Press(Point::new(x, y)), g)
}

fn release(slider: &mut SeekableSlider, x: u16, y: u16, g: Geometry) -> PointerOutcome {
    slider.handle_pointer(Pointer::Release(Point::new(x, y)), g)
}

fn click(slider: &mut SeekableSlider, x: u16, y: u16, g: Geometry) {
    press(slider, x, y, g);
    release(slider, x, y, g);
}

#[test]
fn jump_mapping_matches_formula_for_every_horizontal_click() {
    for (min, max) in [(0i64, 100i64), (0, 125_000), (-50, 50), (10, 13)] {
        for width in [1u16, 7, 40, 80] {
            for x in 0..=width {
                let snapshot = ControlSnapshot {
                    value: min,
                    min,
                    max,
                    orientation: Orientation::Horizontal,
                    inverted: false,
                };
                let got = JumpToPointer.value_for_click(&snapshot, Geometry::new(width, 1), Point::new(x, 0));
                let expected = (min + (max - min) * i64::from(x) / i64::from(width)).clamp(min, max);
                assert_eq!(got, expected, "min={min} max={max} width={width} x={x}");
            }
        }
    }
}

#[test]
fn jump_mapping_is_exact_at_both_ends() {
    let snapshot = ControlSnapshot {
        value: 50,
        min: 0,
        max: 100,
        orientation: Orientation::Horizontal,
        inverted: false,
    };
    let g = Geometry::new(40, 1);
    assert_eq!(JumpToPointer.value_for_click(&snapshot, g, Point::new(0, 0)), 0);
    assert_eq!(JumpToPointer.value_for_click(&snapshot, g, Point::new(40, 0)), 100);
    assert_eq!(JumpToPointer.value_for_click(&snapshot, g, Point::new(20, 0)), 50);
    // Past the far edge clamps instead of overshooting.
    assert_eq!(JumpToPointer.value_for_click(&snapshot, g, Point::new(90, 0)), 100);
}

#[test]
fn vertical_mapping_has_origin_at_the_bottom() {
    let snapshot = ControlSnapshot {
        value: 0,
        min: 0,
        max: 100,
        orientation: Orientation::Vertical,
        inverted: false,
    };
    let g = Geometry::new(1, 10);
    assert_eq!(JumpToPointer.value_for_click(&snapshot, g, Point::new(0, 10)), 0);
    assert_eq!(JumpToPointer.value_for_click(&snapshot, g, Point::new(0, 0)), 100);
    assert_eq!(JumpToPointer.value_for_click(&snapshot, g, Point::new(0, 7)), 30);
}

#[test]
fn inverted_appearance_mirrors_the_value() {
    let snapshot = ControlSnapshot {
        value: 0,
        min: 0,
        max: 100,
        orientation: Orientation::Horizontal,
        inverted: true,
    };
    let g = Geometry::new(10, 1);
    assert_eq!(JumpToPointer.value_for_click(&snapshot, g, Point::new(0, 0)), 100);
    assert_eq!(JumpToPointer.value_for_click(&snapshot, g, Point::new(3, 0)), 70);
    assert_eq!(JumpToPointer.value_for_click(&snapshot, g, Point::new(10, 0)), 0);
}

#[test]
fn page_step_moves_one_page_toward_the_pointer() {
    let snapshot = ControlSnapshot {
        value: 50,
        min: 0,
        max: 100,
        orientation: Orientation::Horizontal,
        inverted: false,
    };
    let g = Geometry::new(100, 1);
    let page = PageStep { page: 10 };
    assert_eq!(page.value_for_click(&snapshot, g, Point::new(90, 0)), 60);
    assert_eq!(page.value_for_click(&snapshot, g, Point::new(5, 0)), 40);
    assert_eq!(page.value_for_click(&snapshot, g, Point::new(55, 0)), 55);
}

#[test]
fn click_off_handle_jumps_and_is_consumed() {
    let g = Geometry::new(40, 1);
    let mut slider = SeekableSlider::new(0, 100);

    assert_eq!(press(&mut slider, 30, 0, g), PointerOutcome::Handled);
    assert_eq!(slider.value(), 75);
    assert_eq!(slider.take_changes(), vec![UserChange { value: 75 }]);

    assert_eq!(release(&mut slider, 30, 0, g), PointerOutcome::Handled);
    assert!(slider.take_changes().is_empty());
    assert!(!slider.is_grabbed());
}

#[test]
fn non_tracking_click_commits_once_at_the_click() {
    let g = Geometry::new(40, 1);
    let mut slider = SeekableSlider::new(0, 40_000).with_tracking(false);

    click(&mut slider, 10, 0, g);
    assert_eq!(slider.take_changes(), vec![UserChange { value: 10_000 }]);
}

#[test]
fn non_tracking_drag_commits_only_on_release() {
    let g = Geometry::new(11, 1);
    let mut slider = SeekableSlider::new(0, 100).with_tracking(false);
    slider.set_value(50);
    assert_eq!(slider.handle_offset(g), Some(5));

    // Grab the handle itself: no jump.
    press(&mut slider, 5, 0, g);
    assert!(slider.is_grabbed());
    assert!(slider.take_changes().is_empty());

    slider.handle_pointer(Pointer::Drag(Point::new(7, 0)), g);
    slider.handle_pointer(Pointer::Drag(Point::new(8, 0)), g);
    assert_eq!(slider.position(), 80);
    assert_eq!(slider.value(), 50);
    assert!(slider.take_changes().is_empty());

    release(&mut slider, 8, 0, g);
    assert_eq!(slider.value(), 80);
    assert_eq!(slider.take_changes(), vec![UserChange { value: 80 }]);
}

#[test]
fn tracking_drag_commits_every_move() {
    let g = Geometry::new(11, 1);
    let mut slider = SeekableSlider::new(0, 100);
    slider.set_value(50);

    press(&mut slider, 5, 0, g);
    slider.handle_pointer(Pointer::Drag(Point::new(6, 0)), g);
    slider.handle_pointer(Pointer::Drag(Point::new(4, 0)), g);
    release(&mut slider, 4, 0, g);

    assert_eq!(
        slider.take_changes(),
        vec![UserChange { value: 60 }, UserChange { value: 40 }]
    );
}

#[test]
fn holding_the_handle_without_moving_commits_nothing() {
    let g = Geometry::new(11, 1);
    let mut slider = SeekableSlider::new(0, 100).with_tracking(false);
    slider.set_value(50);

    press(&mut slider, 5, 0, g);
    // Engine keeps reporting while the handle is held.
    slider.set_value(52);
    assert_eq!(slider.position(), 50);
    release(&mut slider, 5, 0, g);

    assert!(slider.take_changes().is_empty());
    assert_eq!(slider.position(), 52);
}

#[test]
fn drag_without_press_is_ignored() {
    let g = Geometry::new(10, 1);
    let mut slider = SeekableSlider::new(0, 100);
    assert_eq!(
        slider.handle_pointer(Pointer::Drag(Point::new(3, 0)), g),
        PointerOutcome::Ignored
    );
    assert_eq!(release(&mut slider, 3, 0, g), PointerOutcome::Ignored);
}

#[test]
fn programmatic_updates_never_raise_user_changes() {
    let mut slider = SeekableSlider::new(0, 1_000).with_tracking(false);
    for i in 0..500 {
        slider.set_value((i * 37) % 1_200 - 100);
        if i % 50 == 0 {
            slider.set_range(0, 1_000 + i);
        }
    }
    assert!(slider.take_changes().is_empty());
}

#[test]
fn set_value_and_range_clamp_silently() {
    let mut slider = SeekableSlider::new(0, 100);
    slider.set_value(150);
    assert_eq!(slider.value(), 100);
    slider.set_range(0, 40);
    assert_eq!(slider.value(), 40);
    assert_eq!(slider.max(), 40);
    slider.set_range(10, 5);
    assert_eq!(slider.max(), 10);
    assert_eq!(slider.value(), 10);
    assert!(slider.take_changes().is_empty());
}

#[test]
fn step_by_is_a_user_change_and_clamps() {
    let mut slider = SeekableSlider::new(0, 100);
    slider.set_value(97);
    slider.step_by(5);
    slider.step_by(5);
    slider.step_by(-10);
    assert_eq!(
        slider.take_changes(),
        vec![UserChange { value: 100 }, UserChange { value: 90 }]
    );
}

#[test]
fn handle_offset_follows_orientation_and_inversion() {
    let g = Geometry::new(11, 11);

    let mut h = SeekableSlider::new(0, 100);
    h.set_value(30);
    assert_eq!(h.handle_offset(g), Some(3));

    let mut hi = SeekableSlider::new(0, 100).with_inverted_appearance(true);
    hi.set_value(30);
    assert_eq!(hi.handle_offset(g), Some(7));

    let mut v = SeekableSlider::new(0, 100).with_orientation(Orientation::Vertical);
    v.set_value(30);
    assert_eq!(v.handle_offset(g), Some(7));

    assert_eq!(h.handle_offset(Geometry::new(0, 1)), None);
}

#[test]
fn custom_click_behavior_is_used_for_track_clicks() {
    let g = Geometry::new(100, 1);
    let mut slider = SeekableSlider::new(0, 100).with_click_behavior(Box::new(PageStep { page: 10 }));
    slider.set_value(50);

    press(&mut slider, 90, 0, g);
    assert_eq!(slider.value(), 60);
    assert_eq!(slider.take_changes(), vec![UserChange { value: 60 }]);
}
