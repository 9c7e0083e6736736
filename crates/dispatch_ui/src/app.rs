use std::sync::mpsc::{Receiver, Sender};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use chrono::Local;
use eframe::egui;
use tracing::{info, warn};

use dispatch_core::config::DispatchConfig;
use dispatch_core::dispatch::{DispatchEvent, DispatchState, OptimizeOutcome};
use dispatch_core::scoring::{ScoringError, ScoringOracle};

const NOTICE_TTL: Duration = Duration::from_secs(4);

/// Used when no oracle can be built; every optimize falls back to the
/// unscored batch.
struct OfflineOracle {
    reason: String,
}

impl ScoringOracle for OfflineOracle {
    fn complete(&self, _prompt: &str) -> Result<String, ScoringError> {
        Err(ScoringError::Unavailable(self.reason.clone()))
    }
}

#[cfg(feature = "gemini")]
fn build_oracle(config: &DispatchConfig) -> (Arc<dyn ScoringOracle>, String) {
    use dispatch_core::scoring::GeminiClient;

    match GeminiClient::from_config(&config.oracle) {
        Ok(client) => (Arc::new(client), format!("Gemini ({})", config.oracle.model)),
        Err(error) => {
            warn!(%error, "traffic oracle unavailable; batches will stay unscored");
            let reason = error.to_string();
            (Arc::new(OfflineOracle { reason }), "offline".to_string())
        }
    }
}

#[cfg(not(feature = "gemini"))]
fn build_oracle(_config: &DispatchConfig) -> (Arc<dyn ScoringOracle>, String) {
    let reason = "built without the gemini feature".to_string();
    (Arc::new(OfflineOracle { reason }), "offline".to_string())
}

pub struct Notice {
    pub text: String,
    shown_at: Instant,
}

pub struct DispatchUiApp {
    pub state: DispatchState,
    oracle: Arc<dyn ScoringOracle>,
    pub oracle_status: String,
    sender: Sender<OptimizeOutcome>,
    receiver: Receiver<OptimizeOutcome>,
    worker: Option<JoinHandle<()>>,
    pub last_frame_instant: Option<Instant>,
    pub notice: Option<Notice>,
}

impl DispatchUiApp {
    pub fn new(config: DispatchConfig) -> Self {
        let (oracle, oracle_status) = build_oracle(&config);
        let (sender, receiver) = std::sync::mpsc::channel();
        Self {
            state: DispatchState::new(config),
            oracle,
            oracle_status,
            sender,
            receiver,
            worker: None,
            last_frame_instant: None,
            notice: None,
        }
    }

    /// Hand the current batch to the oracle on a worker thread. The result
    /// is picked up by [`Self::poll_optimize`].
    pub fn request_optimize(&mut self, ctx: &egui::Context) {
        let Some(ticket) = self.state.begin_optimize(Local::now()) else {
            return;
        };
        info!(orders = ticket.orders().len(), "requesting traffic analysis");
        let oracle = Arc::clone(&self.oracle);
        let sender = self.sender.clone();
        let ctx = ctx.clone();
        self.worker = Some(std::thread::spawn(move || {
            let outcome = ticket.run(oracle.as_ref());
            let _ = sender.send(outcome);
            ctx.request_repaint();
        }));
    }

    pub fn poll_optimize(&mut self) {
        // Checked before draining: a worker that finished has already sent.
        let worker_done = self.worker.as_ref().is_some_and(|w| w.is_finished());

        while let Ok(outcome) = self.receiver.try_recv() {
            let scored = outcome.scored();
            if self.state.finish_optimize(outcome, Local::now()) && !scored {
                self.show_notice("Traffic analysis unavailable, showing unscored orders");
            }
        }

        if worker_done {
            if let Some(worker) = self.worker.take() {
                if worker.join().is_err() {
                    warn!("optimize worker panicked");
                }
            }
            if self.state.is_optimizing() {
                self.state.abort_optimize();
            }
        }
    }

    pub fn start_navigation(&mut self) {
        if self.state.start_navigation() {
            self.last_frame_instant = Some(Instant::now());
        }
    }

    /// Feed the frame delta into the trip clock. Returns `true` while a trip
    /// is running so the caller keeps repainting.
    pub fn advance_navigation(&mut self) -> bool {
        if !self.state.is_navigating() {
            self.last_frame_instant = None;
            return false;
        }
        let now = Instant::now();
        let last = self.last_frame_instant.unwrap_or(now);
        self.last_frame_instant = Some(now);

        for event in self.state.advance(now.saturating_duration_since(last)) {
            match event {
                DispatchEvent::DeliveryCompleted { price, .. } => {
                    self.show_notice(format!("Delivery completed! You earned R$ {price:.2}"));
                }
            }
        }
        true
    }

    pub fn show_notice(&mut self, text: impl Into<String>) {
        self.notice = Some(Notice {
            text: text.into(),
            shown_at: Instant::now(),
        });
    }

    /// Drop an expired notice. Returns `true` while one is still showing.
    pub fn expire_notice(&mut self) -> bool {
        if self
            .notice
            .as_ref()
            .is_some_and(|n| n.shown_at.elapsed() >= NOTICE_TTL)
        {
            self.notice = None;
        }
        self.notice.is_some()
    }
}
