use desk_wm::config::{ResizeLimits, WmConfig};
use desk_wm::geometry::{Bounds, Length};
use desk_wm::input::PointerEvent;
use desk_wm::layout::{HorizontalZone, ResizeHandle, SnapZone, VerticalZone};
use desk_wm::style::StyleOverrides;
use desk_wm::window::{VisualState, WindowId, WindowManager, WindowRequest};

const CONTAINER: Bounds = Bounds::new(0, 0, 1200, 900);

// 400x300 window at (100, 100); heading press point is (200, 110).
fn setup() -> (WindowManager<()>, WindowId) {
    let mut wm = WindowManager::new(CONTAINER);
    let id = wm.create_window(
        WindowRequest::new(()).css(
            StyleOverrides::new()
                .with("left", 100)
                .with("top", 100)
                .with("width", 400)
                .with("height", 300),
        ),
    );
    (wm, id)
}

fn drag(wm: &mut WindowManager<()>, from: (i32, i32), to: (i32, i32)) {
    wm.handle_pointer(&PointerEvent::down(from.0, from.1));
    wm.handle_pointer(&PointerEvent::moved(to.0, to.1));
    wm.handle_pointer(&PointerEvent::up(to.0, to.1));
}

#[test]
fn release_near_left_edge_in_top_band_docks_top_left() {
    let (mut wm, id) = setup();
    drag(&mut wm, (200, 110), (40, 900 / 6));
    let record = wm.window(id).unwrap();
    assert_eq!(
        record.visual_state(),
        VisualState::Docked(SnapZone::new(HorizontalZone::Left, VerticalZone::Top))
    );
    assert_eq!(wm.layout(id), Some(Bounds::new(0, 0, 600, 450)));
}

#[test]
fn release_away_from_edges_does_not_dock() {
    let (mut wm, id) = setup();
    drag(&mut wm, (200, 110), (200, 200));
    assert_eq!(wm.window(id).unwrap().surface().dock(), None);
    assert_eq!(wm.layout(id), Some(Bounds::new(100, 190, 400, 300)));
}

#[test]
fn right_edge_bands_pick_vertical_zone() {
    let (mut wm, id) = setup();
    drag(&mut wm, (200, 110), (1195, 500));
    assert_eq!(wm.layout(id), Some(Bounds::new(600, 0, 600, 900)));
    drag(&mut wm, (700, 10), (1195, 880));
    assert_eq!(wm.layout(id), Some(Bounds::new(600, 450, 600, 450)));
}

#[test]
fn move_keeps_top_inside_container() {
    let (mut wm, id) = setup();
    drag(&mut wm, (200, 110), (300, -50));
    let geometry = *wm.window(id).unwrap().surface().geometry();
    assert_eq!(geometry.top, Some(Length::Px(0)));
    assert_eq!(geometry.left, Some(Length::Px(200)));
}

#[test]
fn each_handle_moves_only_its_edges() {
    // pointer start inside each handle of the (100, 100, 400, 300) window
    let cases = [
        (ResizeHandle::Right, (498, 250), Bounds::new(100, 100, 420, 300)),
        (ResizeHandle::Left, (101, 250), Bounds::new(120, 100, 380, 300)),
        (ResizeHandle::Bottom, (300, 398), Bounds::new(100, 100, 400, 320)),
        (ResizeHandle::Top, (300, 101), Bounds::new(100, 120, 400, 280)),
        (ResizeHandle::TopLeft, (101, 101), Bounds::new(120, 120, 380, 280)),
        (ResizeHandle::TopRight, (498, 101), Bounds::new(100, 120, 420, 280)),
        (ResizeHandle::BottomRight, (498, 398), Bounds::new(100, 100, 420, 320)),
        (ResizeHandle::BottomLeft, (101, 398), Bounds::new(120, 100, 380, 320)),
    ];
    for (handle, (x, y), expected) in cases {
        let (mut wm, id) = setup();
        wm.handle_pointer(&PointerEvent::down(x, y));
        assert_eq!(
            wm.drag().and_then(|d| d.resize_handle()),
            Some(handle),
            "{handle:?}"
        );
        wm.handle_pointer(&PointerEvent::moved(x + 20, y + 20));
        wm.handle_pointer(&PointerEvent::up(x + 20, y + 20));
        assert_eq!(wm.layout(id), Some(expected), "{handle:?}");
    }
}

#[test]
fn maximize_round_trip_restores_rect() {
    let (mut wm, id) = setup();
    drag(&mut wm, (498, 250), (548, 250));
    let before = wm.layout(id);
    wm.toggle(id, None);
    assert_eq!(wm.layout(id), Some(CONTAINER));
    wm.toggle(id, None);
    assert_eq!(wm.layout(id), before);
}

#[test]
fn resize_limits_from_config_apply() {
    let config = WmConfig {
        resize: ResizeLimits {
            max_width: Some(450),
            ..ResizeLimits::default()
        },
        ..WmConfig::default()
    };
    let mut wm = WindowManager::with_config(config, CONTAINER).unwrap();
    let id = wm.create_window(
        WindowRequest::new(()).css(
            StyleOverrides::new()
                .with("left", 100)
                .with("top", 100)
                .with("width", 400)
                .with("height", 300),
        ),
    );
    drag(&mut wm, (498, 250), (700, 250));
    assert_eq!(wm.layout(id).map(|r| r.width), Some(450));
}

#[test]
fn percent_geometry_follows_container() {
    let mut wm = WindowManager::new(CONTAINER);
    let id = wm.create_window(
        WindowRequest::new(()).css(
            StyleOverrides::new()
                .with("left", "25%")
                .with("top", 0)
                .with("width", "50%")
                .with("height", "100%"),
        ),
    );
    assert_eq!(wm.layout(id), Some(Bounds::new(300, 0, 600, 900)));
    wm.set_container(Bounds::new(0, 0, 800, 600));
    assert_eq!(wm.layout(id), Some(Bounds::new(200, 0, 400, 600)));
}

#[test]
fn cancel_restores_dock_after_undocking_drag() {
    let (mut wm, id) = setup();
    drag(&mut wm, (200, 110), (40, 150));
    let docked = wm.layout(id);
    wm.handle_pointer(&PointerEvent::down(300, 10));
    wm.handle_pointer(&PointerEvent::moved(600, 400));
    assert_ne!(wm.layout(id), docked);
    assert!(wm.cancel_gesture());
    assert_eq!(wm.layout(id), docked);
}
