//! Dispatch state: the single owner of the order batch, selection,
//! optimize/navigate flags and derived stats.
//!
//! Every UI-facing mutation goes through a method here. Guarded operations
//! (selecting while navigating, optimizing twice, ...) are silent no-ops that
//! report `false`; nothing in this module returns an error.
//!
//! Optimizing is split in two so the oracle call can run off the caller's
//! thread: [`DispatchState::begin_optimize`] hands out an [`OptimizeTicket`],
//! the ticket is [run](OptimizeTicket::run) anywhere, and the outcome comes
//! back through [`DispatchState::finish_optimize`].
//! [`DispatchState::optimize`] does all three inline.

use chrono::{DateTime, Local, NaiveTime};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::clock::TickClock;
use crate::config::DispatchConfig;
use crate::map_view::MapView;
use crate::navigation::{NavigationSession, NavigationSimulator, TickOutcome};
use crate::orders::{generate_orders, Order};
use crate::scoring::{try_score_orders, ScoringOracle};
use crate::spatial::LocationPoint;
use crate::telemetry::SessionTelemetry;
use crate::traffic::TrafficRules;

/// Aggregates over the active batch, scored or not.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DispatchStats {
    pub total_potential_profit: f64,
    pub total_distance_km: f64,
}

impl DispatchStats {
    pub fn from_orders(orders: &[Order]) -> Self {
        Self {
            total_potential_profit: orders.iter().map(|o| o.price).sum(),
            total_distance_km: orders.iter().map(|o| o.distance_km).sum(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DispatchEvent {
    /// The driver reached the dropoff; a fresh batch has already replaced
    /// the old one.
    DeliveryCompleted { order_id: String, price: f64 },
}

/// Snapshot of the batch handed to the oracle.
#[derive(Debug, Clone)]
pub struct OptimizeTicket {
    generation: u64,
    orders: Vec<Order>,
    local_time: NaiveTime,
    rules: TrafficRules,
}

impl OptimizeTicket {
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn local_time(&self) -> NaiveTime {
        self.local_time
    }

    /// Call the oracle. Never fails: on any scoring error the outcome carries
    /// the unmodified snapshot.
    pub fn run(self, oracle: &dyn ScoringOracle) -> OptimizeOutcome {
        match try_score_orders(oracle, &self.orders, self.local_time, &self.rules) {
            Ok(orders) => OptimizeOutcome {
                generation: self.generation,
                orders,
                scored: true,
            },
            Err(error) => {
                warn!(%error, orders = self.orders.len(), "traffic analysis failed; keeping unscored batch");
                OptimizeOutcome {
                    generation: self.generation,
                    orders: self.orders,
                    scored: false,
                }
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct OptimizeOutcome {
    generation: u64,
    orders: Vec<Order>,
    scored: bool,
}

impl OptimizeOutcome {
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// `false` when the oracle failed and the batch came back unscored.
    pub fn scored(&self) -> bool {
        self.scored
    }
}

#[derive(Debug)]
pub struct DispatchState {
    config: DispatchConfig,
    rules: TrafficRules,
    rng: StdRng,
    orders: Vec<Order>,
    /// Bumped on every refresh so late optimize outcomes can be recognised.
    generation: u64,
    selected_id: Option<String>,
    optimizing: bool,
    last_optimized_at: Option<DateTime<Local>>,
    stats: DispatchStats,
    panel_expanded: bool,
    navigation: NavigationSimulator,
    clock: TickClock,
    telemetry: SessionTelemetry,
}

impl DispatchState {
    /// Build the state and generate the first batch.
    pub fn new(config: DispatchConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut state = Self {
            navigation: NavigationSimulator::new(config.ticks_per_trip()),
            clock: TickClock::new(config.tick_period_ms),
            config,
            rules: TrafficRules::default(),
            rng,
            orders: Vec::new(),
            generation: 0,
            selected_id: None,
            optimizing: false,
            last_optimized_at: None,
            stats: DispatchStats::default(),
            panel_expanded: false,
            telemetry: SessionTelemetry::default(),
        };
        state.refresh();
        state
    }

    pub fn with_rules(mut self, rules: TrafficRules) -> Self {
        self.rules = rules;
        self
    }

    // ---------------------------------------------------------------------
    // Read-only views
    // ---------------------------------------------------------------------

    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    pub fn rules(&self) -> &TrafficRules {
        &self.rules
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn stats(&self) -> DispatchStats {
        self.stats
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected_id.as_deref()
    }

    pub fn selected_order(&self) -> Option<&Order> {
        let id = self.selected_id.as_deref()?;
        self.orders.iter().find(|o| o.id == id)
    }

    pub fn is_optimizing(&self) -> bool {
        self.optimizing
    }

    pub fn is_navigating(&self) -> bool {
        self.navigation.is_navigating()
    }

    pub fn last_optimized_at(&self) -> Option<DateTime<Local>> {
        self.last_optimized_at
    }

    pub fn panel_expanded(&self) -> bool {
        self.panel_expanded
    }

    pub fn driver_position(&self) -> Option<&LocationPoint> {
        self.navigation.driver_position()
    }

    pub fn remaining_km(&self) -> f64 {
        self.navigation.remaining_km()
    }

    pub fn navigation_session(&self) -> Option<&NavigationSession> {
        self.navigation.session()
    }

    pub fn telemetry(&self) -> &SessionTelemetry {
        &self.telemetry
    }

    pub fn map_view(&self) -> MapView<'_> {
        MapView {
            orders: &self.orders,
            selected_id: self.selected_id.as_deref(),
            is_navigating: self.is_navigating(),
            driver_position: self.navigation.driver_position(),
        }
    }

    // ---------------------------------------------------------------------
    // Batch lifecycle
    // ---------------------------------------------------------------------

    /// Drop the current batch (and any trip) and generate a new one.
    pub fn refresh(&mut self) {
        self.stop_navigation();
        self.clear_selection();
        self.orders = generate_orders(self.config.batch_size, &mut self.rng);
        self.generation += 1;
        self.stats = DispatchStats::from_orders(&self.orders);
        self.last_optimized_at = None;
        self.panel_expanded = false;
        info!(
            orders = self.orders.len(),
            generation = self.generation,
            "order batch refreshed"
        );
    }

    /// Claim the optimizer. `None` while already optimizing or navigating.
    pub fn begin_optimize(&mut self, now: DateTime<Local>) -> Option<OptimizeTicket> {
        if self.optimizing || self.is_navigating() {
            debug!(
                optimizing = self.optimizing,
                navigating = self.is_navigating(),
                "optimize ignored"
            );
            return None;
        }
        self.optimizing = true;
        self.clear_selection();
        Some(OptimizeTicket {
            generation: self.generation,
            orders: self.orders.clone(),
            local_time: now.time(),
            rules: self.rules.clone(),
        })
    }

    /// Install an optimize outcome. Returns `false` when the batch was
    /// refreshed in the meantime and the outcome was discarded.
    pub fn finish_optimize(&mut self, outcome: OptimizeOutcome, now: DateTime<Local>) -> bool {
        self.optimizing = false;
        if outcome.generation != self.generation {
            info!(
                outcome_generation = outcome.generation,
                generation = self.generation,
                "discarding optimize result for a replaced batch"
            );
            return false;
        }
        self.telemetry.record_optimize(outcome.scored);
        self.orders = outcome.orders;
        self.stats = DispatchStats::from_orders(&self.orders);
        self.last_optimized_at = Some(now);
        info!(
            scored = outcome.scored,
            best = self.orders.first().map(|o| o.id.as_str()).unwrap_or("-"),
            "batch optimized"
        );
        true
    }

    /// Release the optimizer without touching the batch, e.g. when the
    /// worker running the ticket died.
    pub fn abort_optimize(&mut self) {
        if self.optimizing {
            warn!("optimize aborted; batch left unchanged");
        }
        self.optimizing = false;
    }

    /// Score the current batch inline. Returns `false` if guarded.
    pub fn optimize(&mut self, oracle: &dyn ScoringOracle) -> bool {
        let Some(ticket) = self.begin_optimize(Local::now()) else {
            return false;
        };
        let outcome = ticket.run(oracle);
        self.finish_optimize(outcome, Local::now())
    }

    // ---------------------------------------------------------------------
    // Selection and panel
    // ---------------------------------------------------------------------

    /// Select an order of the current batch. Frozen while navigating.
    pub fn select(&mut self, order_id: &str) -> bool {
        if self.is_navigating() || !self.orders.iter().any(|o| o.id == order_id) {
            return false;
        }
        self.selected_id = Some(order_id.to_string());
        self.panel_expanded = true;
        true
    }

    pub fn clear_selection(&mut self) {
        if self.is_navigating() {
            return;
        }
        self.selected_id = None;
    }

    pub fn toggle_panel(&mut self) {
        self.panel_expanded = !self.panel_expanded;
    }

    pub fn close_panel(&mut self) {
        if !self.is_navigating() {
            self.panel_expanded = false;
        }
    }

    // ---------------------------------------------------------------------
    // Navigation
    // ---------------------------------------------------------------------

    /// Drive the selected order. Refused without a selection or while an
    /// optimize is outstanding; restarts cleanly if a trip is already running.
    pub fn start_navigation(&mut self) -> bool {
        if self.optimizing {
            debug!("navigation refused while optimizing");
            return false;
        }
        let Some(order) = self.selected_order().cloned() else {
            return false;
        };
        self.clock.cancel();
        self.navigation.start(&order);
        self.clock.start();
        self.panel_expanded = false;
        info!(order_id = %order.id, distance_km = order.distance_km, "navigation started");
        true
    }

    /// Cancel the trip. No-op when idle. Keeps the selection and reopens the
    /// panel so another order can be chosen.
    pub fn stop_navigation(&mut self) -> bool {
        self.clock.cancel();
        if !self.navigation.cancel() {
            return false;
        }
        if self.selected_id.is_some() {
            self.panel_expanded = true;
        }
        info!("navigation cancelled");
        true
    }

    /// Advance the trip by exactly one tick.
    pub fn tick(&mut self) -> Option<DispatchEvent> {
        match self.navigation.tick() {
            TickOutcome::Arrived(arrival) => {
                self.clock.cancel();
                self.telemetry.record_arrival(&arrival, Local::now());
                info!(
                    order_id = %arrival.order_id,
                    price = arrival.price,
                    "delivery completed"
                );
                self.refresh();
                self.navigation.park();
                Some(DispatchEvent::DeliveryCompleted {
                    order_id: arrival.order_id,
                    price: arrival.price,
                })
            }
            TickOutcome::EnRoute { .. } | TickOutcome::Idle => None,
        }
    }

    /// Feed wall-clock time and run every tick that fell due.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<DispatchEvent> {
        let due = self.clock.advance(elapsed);
        let mut events = Vec::new();
        for _ in 0..due {
            if !self.clock.is_running() {
                break;
            }
            events.extend(self.tick());
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orders::Priority;
    use crate::test_helpers::{reply_scoring, ScriptedOracle};

    fn state() -> DispatchState {
        DispatchState::new(DispatchConfig::default().with_seed(9))
    }

    #[test]
    fn new_state_starts_with_a_fresh_batch() {
        let state = state();
        assert_eq!(state.orders().len(), 5);
        assert!(state.selected_id().is_none());
        assert!(state.last_optimized_at().is_none());
        let expected: f64 = state.orders().iter().map(|o| o.price).sum();
        assert_eq!(state.stats().total_potential_profit, expected);
    }

    #[test]
    fn optimize_replaces_batch_and_stamps_time() {
        let mut state = state();
        let ids: Vec<String> = state.orders().iter().map(|o| o.id.clone()).collect();
        let oracle = ScriptedOracle::replying(&reply_scoring(&[(ids[3].as_str(), 95.0), (ids[1].as_str(), 20.0)]));

        state.select(&ids[0]);
        assert!(state.optimize(&oracle));
        assert!(state.selected_id().is_none());
        assert!(!state.is_optimizing());
        assert!(state.last_optimized_at().is_some());
        assert_eq!(state.orders()[0].id, ids[3]);
        assert_eq!(state.orders()[0].priority, Priority::High);
        assert_eq!(state.orders().last().map(|o| o.id.as_str()), Some(ids[1].as_str()));
    }

    #[test]
    fn second_begin_while_pending_is_refused() {
        let mut state = state();
        let ticket = state.begin_optimize(Local::now()).expect("first ticket");
        assert!(state.is_optimizing());
        assert!(state.begin_optimize(Local::now()).is_none());

        let outcome = ticket.run(&ScriptedOracle::failing("offline"));
        assert!(!outcome.scored());
        assert!(state.finish_optimize(outcome, Local::now()));
        assert!(!state.is_optimizing());
        assert_eq!(state.telemetry().optimize_fallbacks(), 1);
    }

    #[test]
    fn late_outcome_for_a_replaced_batch_is_discarded() {
        let mut state = state();
        let ticket = state.begin_optimize(Local::now()).expect("ticket");
        state.refresh();
        let fresh: Vec<Order> = state.orders().to_vec();

        let outcome = ticket.run(&ScriptedOracle::replying("[]"));
        assert!(!state.finish_optimize(outcome, Local::now()));
        assert_eq!(state.orders(), fresh.as_slice());
        assert!(!state.is_optimizing());
        assert!(state.last_optimized_at().is_none());
    }

    #[test]
    fn selection_rejects_unknown_ids_and_expands_panel() {
        let mut state = state();
        assert!(!state.select("SJ-0042"));
        assert!(!state.panel_expanded());

        let id = state.orders()[2].id.clone();
        assert!(state.select(&id));
        assert!(state.panel_expanded());
        assert_eq!(state.selected_order().map(|o| o.id.as_str()), Some(id.as_str()));

        state.close_panel();
        assert!(!state.panel_expanded());
        state.toggle_panel();
        assert!(state.panel_expanded());
    }

    #[test]
    fn closing_the_panel_keeps_the_selection() {
        let mut state = state();
        let id = state.orders()[1].id.clone();
        state.select(&id);
        state.close_panel();
        assert!(!state.panel_expanded());
        assert_eq!(state.selected_id(), Some(id.as_str()));
        assert!(state.start_navigation());
    }

    #[test]
    fn navigation_requires_selection_and_idle_optimizer() {
        let mut state = state();
        assert!(!state.start_navigation());

        let id = state.orders()[0].id.clone();
        state.select(&id);
        let ticket = state.begin_optimize(Local::now()).expect("ticket");
        // begin_optimize cleared the selection, and the optimizer is busy.
        state.select(&id);
        assert!(!state.start_navigation());

        state.finish_optimize(ticket.run(&ScriptedOracle::failing("offline")), Local::now());
        assert!(state.start_navigation());
        assert!(state.is_navigating());
        assert!(!state.panel_expanded());
    }
}
