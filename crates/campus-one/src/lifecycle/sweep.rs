//! The background sweep driver.
//!
//! A plain interval task that applies a `Sweep` command with the current
//! wall clock. The driver carries no appointment logic of its own; what a
//! pass does lives entirely in the appointment book, which also makes the
//! sweep testable by applying the command with a chosen instant. Missed
//! ticks are skipped, not replayed, matching the window-based reminder
//! policy.

use crate::clients::AppointmentClient;
use chrono::Local;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

pub struct SweepDriver;

/// Handle to a running sweep; aborting it is the only way it stops.
pub struct SweepHandle {
    handle: tokio::task::JoinHandle<()>,
}

impl SweepDriver {
    /// Spawns the periodic sweep.
    pub fn start(appointments: AppointmentClient, every: Duration) -> SweepHandle {
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                let now = Local::now().naive_local();
                match appointments.sweep(now).await {
                    Ok(report) if !report.is_idle() => {
                        info!(
                            reminders = report.reminders_sent,
                            started = report.started,
                            "Sweep pass advanced appointments"
                        );
                    }
                    Ok(_) => {}
                    Err(e) => {
                        warn!(error = %e, "Sweep pass failed, stopping the driver");
                        break;
                    }
                }
            }
        });
        SweepHandle { handle }
    }
}

impl SweepHandle {
    /// Stops the sweep. Safe to call once the session ends.
    pub fn stop(&self) {
        self.handle.abort();
    }
}
