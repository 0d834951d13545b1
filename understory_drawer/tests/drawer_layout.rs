// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for the `understory_drawer` crate.
//!
//! These drive a `DrawerLayout` end to end with a recording listener, covering
//! release decisions, capture exclusivity, state consolidation and the
//! once-per-boundary notification rules.

use core::time::Duration;

use kurbo::{Point, Rect, Size, Vec2};
use understory_drawer::pointer::PointerId;
use understory_drawer::{
    DrawerError, DrawerEvent, DrawerId, DrawerLayout, DrawerSpec, Edge, LayoutConfig, MotionState,
};

const CONTAINER: Size = Size::new(1000.0, 800.0);
const FRAME: Duration = Duration::from_millis(16);
const FINGER: PointerId = PointerId(1);

type Layout = DrawerLayout<&'static str, Vec<DrawerEvent>>;

/// A layout with a left drawer (`"nav"`, 20 px handle) and a right drawer
/// (`"tools"`, no handle).
fn layout() -> (Layout, DrawerId, DrawerId) {
    let mut layout = Layout::new(CONTAINER, LayoutConfig::default(), Vec::new());
    let nav = layout
        .register("nav", DrawerSpec::new(Edge::Left, Size::new(300.0, 800.0), 20.0))
        .unwrap();
    let tools = layout
        .register("tools", DrawerSpec::new(Edge::Right, Size::new(300.0, 800.0), 0.0))
        .unwrap();
    (layout, nav, tools)
}

fn settle(layout: &mut Layout) {
    for _ in 0..200 {
        if !layout.tick(FRAME) {
            return;
        }
    }
    panic!("drawers never came to rest");
}

fn take_events(layout: &mut Layout) -> Vec<DrawerEvent> {
    core::mem::take(layout.listener_mut())
}

fn boundary_events(events: &[DrawerEvent]) -> Vec<DrawerEvent> {
    events
        .iter()
        .copied()
        .filter(|e| !matches!(e, DrawerEvent::Slide { .. }))
        .collect()
}

#[test]
fn fresh_drawers_rest_closed() {
    let (layout, nav, tools) = layout();
    assert_eq!(layout.position(nav).unwrap(), Point::new(-280.0, 0.0));
    assert_eq!(layout.position(tools).unwrap(), Point::new(1000.0, 0.0));
    assert_eq!(layout.offset(nav).unwrap(), 0.0);
    assert!(!layout.is_open(nav).unwrap());
    assert_eq!(layout.motion_state(), MotionState::Idle);
    assert_eq!(layout.scrim_opacity(), 0.0);
    assert!(layout.listener().is_empty());
}

#[test]
fn drag_reports_every_movement() {
    let (mut layout, nav, _) = layout();
    assert!(layout.pointer_down(FINGER, Some(&"nav"), Point::new(10.0, 400.0)));
    assert_eq!(
        take_events(&mut layout),
        [DrawerEvent::StateChanged(MotionState::Dragging)]
    );

    assert!(layout.pointer_move(FINGER, Point::new(150.0, 420.0)));
    assert_eq!(layout.position(nav).unwrap(), Point::new(-140.0, 0.0));
    let events = take_events(&mut layout);
    assert_eq!(events.len(), 1);
    let DrawerEvent::Slide { drawer, offset } = events[0] else {
        panic!("expected a slide, got {events:?}");
    };
    assert_eq!(drawer, nav);
    assert!((offset - 0.5).abs() < 1e-9);

    // Pushing past the open position clamps; further pushes change nothing.
    assert!(layout.pointer_move(FINGER, Point::new(600.0, 420.0)));
    assert_eq!(layout.offset(nav).unwrap(), 1.0);
    take_events(&mut layout);
    assert!(!layout.pointer_move(FINGER, Point::new(700.0, 420.0)));
    assert!(layout.listener().is_empty());
}

#[test]
fn release_at_rest_past_half_opens_once() {
    let (mut layout, nav, _) = layout();
    layout.pointer_down(FINGER, Some(&"nav"), Point::new(10.0, 400.0));
    layout.pointer_move(FINGER, Point::new(240.0, 400.0));
    assert!(layout.pointer_up(FINGER, Vec2::ZERO));
    assert_eq!(layout.helper_state(nav).unwrap(), MotionState::Settling);
    settle(&mut layout);

    assert_eq!(layout.position(nav).unwrap().x, 0.0);
    assert!(layout.is_open(nav).unwrap());
    assert_eq!(
        boundary_events(&take_events(&mut layout)),
        [
            DrawerEvent::StateChanged(MotionState::Dragging),
            DrawerEvent::StateChanged(MotionState::Settling),
            DrawerEvent::Opened(nav),
            DrawerEvent::StateChanged(MotionState::Idle),
        ]
    );

    // Asking an open drawer to open again reports nothing.
    layout.open_drawer(nav).unwrap();
    assert!(layout.listener().is_empty());
}

#[test]
fn release_at_rest_before_half_closes_without_notification() {
    let (mut layout, nav, _) = layout();
    layout.pointer_down(FINGER, Some(&"nav"), Point::new(10.0, 400.0));
    layout.pointer_move(FINGER, Point::new(100.0, 400.0));
    layout.pointer_up(FINGER, Vec2::ZERO);
    settle(&mut layout);

    assert_eq!(layout.position(nav).unwrap().x, -280.0);
    // The drawer was never reported open, so coming back closed is silent.
    assert!(
        !take_events(&mut layout)
            .iter()
            .any(|e| matches!(e, DrawerEvent::Opened(_) | DrawerEvent::Closed(_)))
    );
}

#[test]
fn fling_overrides_offset() {
    let (mut layout, nav, tools) = layout();

    // A fast closing fling wins even when the drawer is mostly open.
    layout.pointer_down(FINGER, Some(&"nav"), Point::new(10.0, 400.0));
    layout.pointer_move(FINGER, Point::new(250.0, 400.0));
    layout.pointer_up(FINGER, Vec2::new(-2000.0, 0.0));
    settle(&mut layout);
    assert_eq!(layout.offset(nav).unwrap(), 0.0);

    // A right drawer opens when flung toward smaller x.
    layout.pointer_down(FINGER, Some(&"tools"), Point::new(995.0, 400.0));
    layout.pointer_move(FINGER, Point::new(960.0, 400.0));
    layout.pointer_up(FINGER, Vec2::new(-2000.0, 0.0));
    settle(&mut layout);
    assert_eq!(layout.position(tools).unwrap().x, 700.0);
    assert!(layout.is_open(tools).unwrap());
}

#[test]
fn slow_release_counts_as_rest() {
    let (mut layout, nav, _) = layout();
    layout.pointer_down(FINGER, Some(&"nav"), Point::new(10.0, 400.0));
    layout.pointer_move(FINGER, Point::new(240.0, 400.0));
    // Below the fling threshold, so the offset decides.
    layout.pointer_up(FINGER, Vec2::new(-300.0, 0.0));
    settle(&mut layout);
    assert!(layout.is_open(nav).unwrap());
}

#[test]
fn fling_threshold_scales_with_density() {
    let config = LayoutConfig::default().with_density(3.0);
    let mut layout: Layout = DrawerLayout::new(CONTAINER, config, Vec::new());
    let nav = layout
        .register("nav", DrawerSpec::new(Edge::Left, Size::new(300.0, 800.0), 20.0))
        .unwrap();

    layout.pointer_down(FINGER, Some(&"nav"), Point::new(10.0, 400.0));
    layout.pointer_move(FINGER, Point::new(100.0, 400.0));
    // 1000 px/s is a fling at density 1 but not at density 3.
    layout.pointer_up(FINGER, Vec2::new(1000.0, 0.0));
    settle(&mut layout);
    assert!(!layout.is_open(nav).unwrap());
}

#[test]
fn capture_closes_the_open_drawer() {
    let (mut layout, nav, tools) = layout();
    layout.open_drawer(nav).unwrap();
    settle(&mut layout);
    take_events(&mut layout);

    assert!(layout.pointer_down(FINGER, Some(&"tools"), Point::new(995.0, 400.0)));
    assert_eq!(layout.helper_state(nav).unwrap(), MotionState::Settling);
    assert_eq!(layout.helper_state(tools).unwrap(), MotionState::Dragging);
    assert_eq!(layout.motion_state(), MotionState::Dragging);
    assert_eq!(
        take_events(&mut layout),
        [DrawerEvent::StateChanged(MotionState::Dragging)]
    );

    // The user's grab masks the other drawer's settle for the whole animation.
    settle(&mut layout);
    assert_eq!(layout.offset(nav).unwrap(), 0.0);
    assert_eq!(
        boundary_events(&take_events(&mut layout)),
        [DrawerEvent::Closed(nav)]
    );
    assert_eq!(layout.motion_state(), MotionState::Dragging);

    layout.pointer_up(FINGER, Vec2::ZERO);
    settle(&mut layout);
    assert_eq!(layout.motion_state(), MotionState::Idle);
}

#[test]
fn open_drawer_closes_the_others() {
    let (mut layout, nav, tools) = layout();
    layout.open_drawer(nav).unwrap();
    settle(&mut layout);
    layout.open_drawer(tools).unwrap();
    settle(&mut layout);

    assert!(!layout.is_open(nav).unwrap());
    assert!(layout.is_open(tools).unwrap());
    let events = boundary_events(&take_events(&mut layout));
    assert_eq!(
        events
            .iter()
            .filter(|e| matches!(e, DrawerEvent::Opened(_) | DrawerEvent::Closed(_)))
            .copied()
            .collect::<Vec<_>>(),
        [
            DrawerEvent::Opened(nav),
            DrawerEvent::Closed(nav),
            DrawerEvent::Opened(tools),
        ]
    );
}

#[test]
fn repeated_open_does_not_restart_the_settle() {
    let (mut layout, nav, _) = layout();
    layout.open_drawer(nav).unwrap();
    layout.tick(FRAME);
    let mid = layout.position(nav).unwrap();
    layout.open_drawer(nav).unwrap();
    assert_eq!(layout.position(nav).unwrap(), mid);
    settle(&mut layout);

    assert_eq!(
        boundary_events(&take_events(&mut layout)),
        [
            DrawerEvent::StateChanged(MotionState::Settling),
            DrawerEvent::Opened(nav),
            DrawerEvent::StateChanged(MotionState::Idle),
        ]
    );
}

#[test]
fn close_all_and_attach_close_everything() {
    let (mut layout, nav, tools) = layout();
    layout.open_drawer(tools).unwrap();
    settle(&mut layout);

    layout.attach();
    assert_eq!(layout.helper_state(tools).unwrap(), MotionState::Settling);
    assert_eq!(layout.helper_state(nav).unwrap(), MotionState::Idle);
    settle(&mut layout);
    assert!(!layout.is_open(tools).unwrap());

    layout.open_drawer(nav).unwrap();
    settle(&mut layout);
    take_events(&mut layout);
    layout.close_all_drawers();
    settle(&mut layout);
    assert_eq!(
        boundary_events(&take_events(&mut layout)),
        [
            DrawerEvent::StateChanged(MotionState::Settling),
            DrawerEvent::Closed(nav),
            DrawerEvent::StateChanged(MotionState::Idle),
        ]
    );
}

#[test]
fn scrim_follows_the_most_open_drawer() {
    let (mut layout, _, _) = layout();
    layout.pointer_down(FINGER, Some(&"nav"), Point::new(10.0, 400.0));
    layout.pointer_move(FINGER, Point::new(150.0, 400.0));

    assert!((layout.scrim_opacity() - 0.5).abs() < 1e-9);
    let alpha = layout.scrim_color().components[3];
    assert!((alpha - 0.3).abs() < 1e-3, "alpha was {alpha}");
}

#[test]
fn second_pointer_cannot_take_a_held_drawer() {
    let (mut layout, nav, _) = layout();
    let other = PointerId(2);
    assert!(layout.pointer_down(FINGER, Some(&"nav"), Point::new(10.0, 400.0)));
    assert!(!layout.pointer_down(other, Some(&"nav"), Point::new(12.0, 300.0)));

    assert!(!layout.pointer_move(other, Point::new(200.0, 300.0)));
    assert_eq!(layout.offset(nav).unwrap(), 0.0);
    assert!(!layout.pointer_up(other, Vec2::ZERO));
    assert_eq!(layout.helper_state(nav).unwrap(), MotionState::Dragging);
}

#[test]
fn pointer_down_outside_drawers_is_ignored() {
    let (mut layout, _, _) = layout();
    assert!(!layout.pointer_down(FINGER, None, Point::new(500.0, 400.0)));
    assert!(!layout.pointer_down(FINGER, Some(&"content"), Point::new(500.0, 400.0)));
    assert_eq!(layout.motion_state(), MotionState::Idle);
}

#[test]
fn cancel_settles_like_a_resting_release() {
    let (mut layout, nav, _) = layout();
    layout.pointer_down(FINGER, Some(&"nav"), Point::new(10.0, 400.0));
    layout.pointer_move(FINGER, Point::new(200.0, 400.0));
    assert!(layout.pointer_cancel(FINGER));
    assert!(!layout.pointer_cancel(FINGER));
    settle(&mut layout);
    assert!(layout.is_open(nav).unwrap());
}

#[test]
fn registration_errors() {
    let (mut layout, nav, _) = layout();
    assert_eq!(
        layout.register("nav", DrawerSpec::new(Edge::Top, Size::new(1000.0, 200.0), 0.0)),
        Err(DrawerError::DuplicateDrawer { existing: nav })
    );
    assert_eq!(layout.len(), 2);
    assert_eq!(layout.drawer_for(&"nav"), Some(nav));

    assert!(layout.unregister(nav));
    assert!(!layout.unregister(nav));
    assert_eq!(layout.open_drawer(nav), Err(DrawerError::UnknownDrawer(nav)));
    assert_eq!(layout.offset(nav), Err(DrawerError::UnknownDrawer(nav)));
    assert_eq!(layout.drawer_for(&"nav"), None);
}

#[test]
fn unregistering_a_settling_drawer_updates_the_state() {
    let (mut layout, nav, _) = layout();
    layout.open_drawer(nav).unwrap();
    assert_eq!(layout.motion_state(), MotionState::Settling);
    take_events(&mut layout);

    layout.unregister(nav);
    assert_eq!(layout.motion_state(), MotionState::Idle);
    assert_eq!(
        take_events(&mut layout),
        [DrawerEvent::StateChanged(MotionState::Idle)]
    );
}

#[test]
fn degenerate_drawer_stays_put() {
    let (mut layout, _, _) = layout();
    let stub = layout
        .register("stub", DrawerSpec::new(Edge::Top, Size::new(1000.0, 40.0), 60.0))
        .unwrap();
    assert_eq!(layout.drag_range(stub), Err(DrawerError::DegenerateGeometry(stub)));

    let rest = layout.position(stub).unwrap();
    layout.pointer_down(FINGER, Some(&"stub"), Point::new(500.0, 20.0));
    assert!(!layout.pointer_move(FINGER, Point::new(500.0, 300.0)));
    layout.pointer_up(FINGER, Vec2::new(0.0, 5000.0));
    settle(&mut layout);
    layout.open_drawer(stub).unwrap();

    assert_eq!(layout.position(stub).unwrap(), rest);
    assert_eq!(layout.offset(stub).unwrap(), 0.0);
    assert!(!layout.is_open(stub).unwrap());
    assert_eq!(layout.motion_state(), MotionState::Idle);
}

#[test]
fn bottom_drawer_with_handle_reports_closed() {
    let (mut layout, _, _) = layout();
    let sheet = layout
        .register("sheet", DrawerSpec::new(Edge::Bottom, Size::new(1000.0, 300.0), 40.0))
        .unwrap();
    assert_eq!(layout.drag_range(sheet), Ok(260.0));

    layout.open_drawer(sheet).unwrap();
    settle(&mut layout);
    assert_eq!(layout.position(sheet).unwrap().y, 500.0);
    layout.close_drawer(sheet).unwrap();
    settle(&mut layout);
    assert_eq!(layout.position(sheet).unwrap().y, 760.0);

    // The closed offset is not zero for this edge, yet the drawer reads as closed.
    assert!(layout.offset(sheet).unwrap() > 0.0);
    assert!(!layout.is_open(sheet).unwrap());
    let events = boundary_events(&take_events(&mut layout));
    assert!(events.contains(&DrawerEvent::Opened(sheet)));
    assert!(events.contains(&DrawerEvent::Closed(sheet)));
}

#[test]
fn resizing_keeps_open_drawers_open() {
    let (mut layout, _, tools) = layout();
    layout.open_drawer(tools).unwrap();
    settle(&mut layout);
    take_events(&mut layout);

    layout.set_container_size(Size::new(1200.0, 800.0));
    assert_eq!(layout.position(tools).unwrap().x, 900.0);
    assert_eq!(layout.offset(tools).unwrap(), 1.0);
    assert!(layout.is_open(tools).unwrap());

    layout.layout_drawer(tools, Size::new(400.0, 800.0)).unwrap();
    assert_eq!(layout.position(tools).unwrap().x, 800.0);
    assert_eq!(
        layout.drawer_rect(tools).unwrap(),
        Rect::new(800.0, 0.0, 1200.0, 800.0)
    );
    assert!(layout.is_open(tools).unwrap());
    assert!(
        !take_events(&mut layout)
            .iter()
            .any(|e| matches!(e, DrawerEvent::Opened(_) | DrawerEvent::Closed(_)))
    );
}

#[test]
fn shadow_sits_past_the_handle() {
    let (mut layout, nav, tools) = layout();
    let shadow = Size::new(8.0, 0.0);
    assert_eq!(
        layout.shadow_rect(nav, shadow).unwrap(),
        Rect::new(0.0, 0.0, 8.0, 800.0)
    );
    layout.open_drawer(tools).unwrap();
    settle(&mut layout);
    assert_eq!(
        layout.shadow_rect(tools, shadow).unwrap(),
        Rect::new(692.0, 0.0, 700.0, 800.0)
    );
}

#[test]
fn opened_waits_for_the_other_drawer_to_close() {
    let (mut layout, nav, tools) = layout();
    layout.open_drawer(nav).unwrap();
    settle(&mut layout);
    take_events(&mut layout);

    // Drag the right drawer all the way out and let go before the left one moved.
    layout.pointer_down(FINGER, Some(&"tools"), Point::new(995.0, 400.0));
    layout.pointer_move(FINGER, Point::new(695.0, 400.0));
    layout.pointer_up(FINGER, Vec2::ZERO);
    assert_eq!(layout.offset(tools).unwrap(), 1.0);
    assert_eq!(layout.helper_state(tools).unwrap(), MotionState::Idle);
    assert!(layout.is_open(nav).unwrap());
    assert!(!layout.is_open(tools).unwrap());

    settle(&mut layout);
    assert!(!layout.is_open(nav).unwrap());
    assert!(layout.is_open(tools).unwrap());
    assert_eq!(
        boundary_events(&take_events(&mut layout)),
        [
            DrawerEvent::StateChanged(MotionState::Dragging),
            DrawerEvent::StateChanged(MotionState::Settling),
            DrawerEvent::Closed(nav),
            DrawerEvent::Opened(tools),
            DrawerEvent::StateChanged(MotionState::Idle),
        ]
    );
}

#[test]
fn resizing_a_closing_drawer_keeps_it_heading_for_closed() {
    let (mut layout, nav, tools) = layout();
    layout.open_drawer(nav).unwrap();
    settle(&mut layout);
    take_events(&mut layout);

    // Capturing the right drawer starts the left one closing; resize it mid-flight.
    layout.pointer_down(FINGER, Some(&"tools"), Point::new(995.0, 400.0));
    assert!(layout.tick(FRAME));
    layout.layout_drawer(nav, Size::new(400.0, 800.0)).unwrap();
    assert_eq!(layout.helper_state(nav).unwrap(), MotionState::Settling);

    layout.pointer_move(FINGER, Point::new(695.0, 400.0));
    layout.pointer_up(FINGER, Vec2::new(-2000.0, 0.0));
    settle(&mut layout);

    assert_eq!(layout.position(nav).unwrap().x, -380.0);
    assert_eq!(layout.offset(nav).unwrap(), 0.0);
    assert!(!layout.is_open(nav).unwrap());
    assert!(layout.is_open(tools).unwrap());
    assert_eq!(
        boundary_events(&take_events(&mut layout)),
        [
            DrawerEvent::StateChanged(MotionState::Dragging),
            DrawerEvent::StateChanged(MotionState::Settling),
            DrawerEvent::Closed(nav),
            DrawerEvent::Opened(tools),
            DrawerEvent::StateChanged(MotionState::Idle),
        ]
    );
    assert!(!layout.tick(FRAME));
}

#[test]
fn resizing_the_container_mid_settle_lands_on_the_new_rest() {
    let (mut layout, _, tools) = layout();
    layout.open_drawer(tools).unwrap();
    layout.tick(FRAME);

    layout.set_container_size(Size::new(1200.0, 800.0));
    assert_eq!(layout.helper_state(tools).unwrap(), MotionState::Settling);
    settle(&mut layout);

    assert_eq!(layout.position(tools).unwrap().x, 900.0);
    assert_eq!(layout.offset(tools).unwrap(), 1.0);
    assert!(layout.is_open(tools).unwrap());
    assert_eq!(layout.motion_state(), MotionState::Idle);
}
