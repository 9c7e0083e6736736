#![allow(dead_code)]

use dispatch_core::config::DispatchConfig;
use dispatch_core::dispatch::{DispatchEvent, DispatchState};

pub const SEED: u64 = 42;

/// Seeded state with the default batch size and timing.
pub fn seeded_state() -> DispatchState {
    DispatchState::new(DispatchConfig::default().with_seed(SEED))
}

/// Seeded state with a short trip, for tests that only care about arrival.
pub fn quick_trip_state(ticks_per_trip: u64) -> DispatchState {
    let config = DispatchConfig::default()
        .with_seed(SEED)
        .with_timing(50, 50 * ticks_per_trip);
    DispatchState::new(config)
}

pub fn order_ids(state: &DispatchState) -> Vec<String> {
    state.orders().iter().map(|o| o.id.clone()).collect()
}

/// Select the order at `index` and start driving it.
pub fn drive_order(state: &mut DispatchState, index: usize) -> String {
    let id = state.orders()[index].id.clone();
    assert!(state.select(&id), "select {id}");
    assert!(state.start_navigation(), "start navigation for {id}");
    id
}

pub fn run_ticks(state: &mut DispatchState, n: u64) -> Vec<DispatchEvent> {
    (0..n).filter_map(|_| state.tick()).collect()
}
