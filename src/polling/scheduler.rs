use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

use crate::common::AppState;
use crate::polling::worker;

/// Owns the two independent polling tasks.
///
/// Each task fires its cycle immediately, then once per period. Every cycle
/// runs as its own task so a slow monitor never shifts the cadence; cycles of
/// the same kind may overlap.
pub struct PollingController {
    sensor: JoinHandle<()>,
    log: JoinHandle<()>,
}

impl PollingController {
    /// Spawn the sensor and log pollers on the current runtime.
    #[must_use]
    pub fn start(state: &AppState) -> Self {
        tracing::info!(
            sensor_interval_ms = state.config.sensor_poll_interval_ms,
            log_interval_ms = state.config.log_poll_interval_ms,
            monitor = %state.monitor.base_url(),
            "Starting pollers"
        );

        Self {
            sensor: tokio::spawn(run_sensor_polling(state.clone())),
            log: tokio::spawn(run_log_polling(state.clone())),
        }
    }

    /// Stop scheduling new cycles. Cycles already in flight finish on their own.
    pub fn stop(&self) {
        self.sensor.abort();
        self.log.abort();
    }
}

/// Run the sensor cycle on the sensor polling period.
pub async fn run_sensor_polling(state: AppState) {
    let period = state.config.sensor_poll_interval();
    run_every(period, "sensor", move || worker::sensor_cycle(state.clone())).await;
}

/// Run the log cycle on the log polling period.
pub async fn run_log_polling(state: AppState) {
    let period = state.config.log_poll_interval();
    run_every(period, "log", move || worker::log_cycle(state.clone())).await;
}

async fn run_every<F, Fut>(period: Duration, name: &'static str, mut cycle: F)
where
    F: FnMut() -> Fut,
    Fut: Future<Output = ()> + Send + 'static,
{
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        // First tick completes immediately
        ticker.tick().await;
        tracing::trace!(poller = name, "Spawning cycle");
        tokio::spawn(cycle());
    }
}
