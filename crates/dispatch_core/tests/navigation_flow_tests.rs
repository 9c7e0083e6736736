mod support;

use std::time::Duration;

use dispatch_core::dispatch::DispatchEvent;
use dispatch_core::map_view::{DriverMarker, ViewBox};
use support::{drive_order, quick_trip_state, run_ticks, seeded_state};

#[test]
fn arrival_pays_out_and_refreshes_the_batch() {
    let mut state = seeded_state();
    let id = drive_order(&mut state, 2);
    let price = state.selected_order().map(|o| o.price).expect("selected order");

    assert!(run_ticks(&mut state, 299).is_empty());
    assert!(state.is_navigating());

    let events = run_ticks(&mut state, 1);
    assert_eq!(
        events,
        vec![DispatchEvent::DeliveryCompleted {
            order_id: id.clone(),
            price
        }]
    );
    assert!(!state.is_navigating());
    assert_eq!(state.remaining_km(), 0.0);
    assert!(state.driver_position().is_none());
    assert!(state.selected_id().is_none());
    assert_eq!(state.orders().len(), 5);

    let telemetry = state.telemetry();
    assert_eq!(telemetry.deliveries().len(), 1);
    assert_eq!(telemetry.deliveries()[0].order_id, id);
    assert_eq!(telemetry.total_earnings(), price);
}

#[test]
fn driver_position_tracks_progress_and_remaining_distance() {
    let mut state = seeded_state();
    drive_order(&mut state, 0);
    let order = state.selected_order().cloned().expect("selected order");

    run_ticks(&mut state, 150);
    let position = state.driver_position().expect("driver position");
    let expected_x = order.pickup.x + (order.dropoff.x - order.pickup.x) * 0.5;
    let expected_y = order.pickup.y + (order.dropoff.y - order.pickup.y) * 0.5;
    assert!((position.x - expected_x).abs() < 1e-9);
    assert!((position.y - expected_y).abs() < 1e-9);
    assert!((state.remaining_km() - order.distance_km * 0.5).abs() < 1e-9);

    let view = state.map_view();
    assert_eq!(view.view_box(), ViewBox::centered_on(position, 20.0));
    assert!(matches!(view.driver_marker(), DriverMarker::Navigating(_)));
    assert_eq!(view.opacity(&order.id), 1.0);
}

#[test]
fn cancel_keeps_selection_and_reopens_panel() {
    let mut state = seeded_state();
    let id = drive_order(&mut state, 1);
    assert!(!state.panel_expanded());
    run_ticks(&mut state, 20);

    assert!(state.stop_navigation());
    assert!(!state.is_navigating());
    assert!(state.driver_position().is_none());
    assert_eq!(state.selected_id(), Some(id.as_str()));
    assert!(state.panel_expanded());
    assert_eq!(state.map_view().view_box(), ViewBox::WORLD);

    // Further ticks and wall time do nothing.
    assert!(run_ticks(&mut state, 500).is_empty());
    assert!(state.advance(Duration::from_secs(60)).is_empty());
}

#[test]
fn stopping_when_idle_changes_nothing() {
    let mut state = seeded_state();
    let id = state.orders()[0].id.clone();
    state.select(&id);
    state.close_panel();
    let orders = state.orders().to_vec();

    assert!(!state.stop_navigation());
    assert!(!state.panel_expanded());
    assert_eq!(state.selected_id(), Some(id.as_str()));
    assert_eq!(state.orders(), orders.as_slice());
}

#[test]
fn restarting_navigation_runs_a_single_trip() {
    let mut state = quick_trip_state(10);
    drive_order(&mut state, 0);
    run_ticks(&mut state, 6);

    // Restart from the pickup; the old progress is gone.
    assert!(state.start_navigation());
    assert_eq!(state.navigation_session().map(|s| s.ticks()), Some(0));
    assert!(run_ticks(&mut state, 9).is_empty());
    assert_eq!(run_ticks(&mut state, 1).len(), 1);
    assert!(run_ticks(&mut state, 10).is_empty());
}

#[test]
fn wall_clock_time_drives_ticks() {
    let mut state = quick_trip_state(10);
    drive_order(&mut state, 0);

    assert!(state.advance(Duration::from_millis(449)).is_empty());
    assert_eq!(state.navigation_session().map(|s| s.ticks()), Some(8));

    // Far more time than needed: exactly one arrival, surplus ticks dropped.
    let events = state.advance(Duration::from_secs(5));
    assert_eq!(events.len(), 1);
    assert!(!state.is_navigating());
    assert!(state.advance(Duration::from_secs(5)).is_empty());
}
