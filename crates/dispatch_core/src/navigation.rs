//! Navigation simulator: moves a synthetic driver from pickup to dropoff.
//!
//! Two states, idle and navigating. Each tick advances the session by one
//! step; progress is derived from the tick count (`ticks / ticks_per_trip`)
//! rather than accumulated increments, so position at tick `n` is exact.
//! Arrival happens on the first tick where progress reaches 1.

use crate::orders::Order;
use crate::spatial::{lerp, LocationPoint};

/// 15 s trip at a 50 ms tick.
pub const DEFAULT_TICKS_PER_TRIP: u64 = 300;

#[derive(Debug, Clone, PartialEq)]
pub struct NavigationSession {
    pub order_id: String,
    pub price: f64,
    pub start: LocationPoint,
    pub end: LocationPoint,
    pub distance_km: f64,
    ticks: u64,
    ticks_per_trip: u64,
}

impl NavigationSession {
    fn new(order: &Order, ticks_per_trip: u64) -> Self {
        Self {
            order_id: order.id.clone(),
            price: order.price,
            start: order.pickup.clone(),
            end: order.dropoff.clone(),
            distance_km: order.distance_km,
            ticks: 0,
            ticks_per_trip: ticks_per_trip.max(1),
        }
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Fraction of the route covered, in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        (self.ticks as f64 / self.ticks_per_trip as f64).min(1.0)
    }

    pub fn position(&self) -> LocationPoint {
        lerp(&self.start, &self.end, self.progress())
    }

    pub fn remaining_km(&self) -> f64 {
        self.distance_km * (1.0 - self.progress())
    }
}

/// Published when the driver reaches the dropoff.
#[derive(Debug, Clone, PartialEq)]
pub struct Arrival {
    pub order_id: String,
    pub price: f64,
    pub distance_km: f64,
    pub ticks: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// No session; the tick was ignored.
    Idle,
    EnRoute { progress: f64 },
    Arrived(Arrival),
}

#[derive(Debug, Clone)]
pub struct NavigationSimulator {
    session: Option<NavigationSession>,
    ticks_per_trip: u64,
    driver_position: Option<LocationPoint>,
    remaining_km: f64,
}

impl NavigationSimulator {
    pub fn new(ticks_per_trip: u64) -> Self {
        Self {
            session: None,
            ticks_per_trip: ticks_per_trip.max(1),
            driver_position: None,
            remaining_km: 0.0,
        }
    }

    pub fn is_navigating(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&NavigationSession> {
        self.session.as_ref()
    }

    pub fn ticks_per_trip(&self) -> u64 {
        self.ticks_per_trip
    }

    /// Last published driver position. Kept at the dropoff after arrival
    /// until [`Self::park`], cleared by cancellation.
    pub fn driver_position(&self) -> Option<&LocationPoint> {
        self.driver_position.as_ref()
    }

    pub fn remaining_km(&self) -> f64 {
        self.remaining_km
    }

    /// Begin a trip for `order`, replacing any session already running.
    pub fn start(&mut self, order: &Order) {
        let session = NavigationSession::new(order, self.ticks_per_trip);
        self.driver_position = Some(session.position());
        self.remaining_km = session.distance_km;
        self.session = Some(session);
    }

    pub fn tick(&mut self) -> TickOutcome {
        let Some(session) = self.session.as_mut() else {
            return TickOutcome::Idle;
        };
        session.ticks += 1;

        if session.ticks >= session.ticks_per_trip {
            let arrival = Arrival {
                order_id: session.order_id.clone(),
                price: session.price,
                distance_km: session.distance_km,
                ticks: session.ticks,
            };
            self.driver_position = Some(session.end.clone());
            self.remaining_km = 0.0;
            self.session = None;
            return TickOutcome::Arrived(arrival);
        }

        self.driver_position = Some(session.position());
        self.remaining_km = session.remaining_km();
        TickOutcome::EnRoute {
            progress: session.progress(),
        }
    }

    /// Forget the last published position once the trip is over. No-op
    /// while a session is running.
    pub fn park(&mut self) {
        if self.session.is_none() {
            self.driver_position = None;
            self.remaining_km = 0.0;
        }
    }

    /// Abandon the current trip. Returns `false` (and changes nothing) when idle.
    pub fn cancel(&mut self) -> bool {
        if self.session.take().is_none() {
            return false;
        }
        self.driver_position = None;
        self.remaining_km = 0.0;
        true
    }
}

impl Default for NavigationSimulator {
    fn default() -> Self {
        Self::new(DEFAULT_TICKS_PER_TRIP)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::order_between;

    fn run_ticks(sim: &mut NavigationSimulator, n: u64) -> TickOutcome {
        let mut last = TickOutcome::Idle;
        for _ in 0..n {
            last = sim.tick();
        }
        last
    }

    #[test]
    fn driver_reaches_midpoint_after_half_the_ticks() {
        let order = order_between("SJ-1000", (0.0, 0.0), (100.0, 0.0), 15.0);
        let mut sim = NavigationSimulator::default();
        sim.start(&order);
        assert_eq!(sim.driver_position().map(|p| (p.x, p.y)), Some((0.0, 0.0)));
        assert_eq!(sim.remaining_km(), 15.0);

        let outcome = run_ticks(&mut sim, 150);
        assert_eq!(outcome, TickOutcome::EnRoute { progress: 0.5 });
        assert_eq!(sim.driver_position().map(|p| p.x), Some(50.0));
        assert_eq!(sim.remaining_km(), 7.5);
        assert!(sim.is_navigating());
    }

    #[test]
    fn arrival_snaps_to_dropoff_and_goes_idle() {
        let order = order_between("SJ-1000", (0.0, 0.0), (100.0, 0.0), 15.0);
        let mut sim = NavigationSimulator::default();
        sim.start(&order);

        assert!(matches!(run_ticks(&mut sim, 299), TickOutcome::EnRoute { .. }));
        let outcome = sim.tick();
        let TickOutcome::Arrived(arrival) = outcome else {
            panic!("expected arrival, got {outcome:?}");
        };
        assert_eq!(arrival.order_id, "SJ-1000");
        assert_eq!(arrival.ticks, 300);
        assert_eq!(sim.driver_position(), Some(&order.dropoff));
        assert_eq!(sim.remaining_km(), 0.0);
        assert!(!sim.is_navigating());
        assert_eq!(sim.tick(), TickOutcome::Idle);
    }

    #[test]
    fn cancel_clears_position_and_is_idempotent() {
        let order = order_between("SJ-1000", (10.0, 10.0), (20.0, 20.0), 2.1);
        let mut sim = NavigationSimulator::default();
        assert!(!sim.cancel());

        sim.start(&order);
        run_ticks(&mut sim, 10);
        assert!(sim.cancel());
        assert!(sim.driver_position().is_none());
        assert!(!sim.is_navigating());
        assert!(!sim.cancel());
    }

    #[test]
    fn park_only_clears_an_idle_driver() {
        let order = order_between("SJ-1000", (0.0, 0.0), (100.0, 0.0), 15.0);
        let mut sim = NavigationSimulator::new(10);
        sim.start(&order);
        run_ticks(&mut sim, 3);
        sim.park();
        assert!(sim.driver_position().is_some());

        run_ticks(&mut sim, 7);
        assert_eq!(sim.driver_position(), Some(&order.dropoff));
        sim.park();
        assert!(sim.driver_position().is_none());
        assert_eq!(sim.remaining_km(), 0.0);
    }

    #[test]
    fn restart_replaces_the_running_session() {
        let first = order_between("SJ-1000", (0.0, 0.0), (100.0, 0.0), 15.0);
        let second = order_between("SJ-1001", (0.0, 50.0), (0.0, 100.0), 7.5);
        let mut sim = NavigationSimulator::new(10);
        sim.start(&first);
        run_ticks(&mut sim, 5);

        sim.start(&second);
        let session = sim.session().expect("session");
        assert_eq!(session.order_id, "SJ-1001");
        assert_eq!(session.ticks(), 0);

        // The second trip needs its full ten ticks.
        assert!(matches!(run_ticks(&mut sim, 9), TickOutcome::EnRoute { .. }));
        assert!(matches!(sim.tick(), TickOutcome::Arrived(_)));
    }
}
