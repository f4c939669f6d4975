//! Periodic evaluation trigger.
//!
//! One background thread fires the tick closure at a fixed interval for the
//! lifetime of the process (or until [`Scheduler::stop`]). The tick body
//! runs on the scheduler thread itself, so at most one evaluation is ever
//! in flight: a slow tick delays the next fire rather than overlapping it.
//! A failed tick is logged and the schedule continues uninterrupted.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{error, info};

/// Handle to the background schedule thread.
///
/// Dropping the handle signals the thread to stop; [`Scheduler::stop`]
/// additionally joins it.
#[derive(Debug)]
pub struct Scheduler {
    stop_tx: Sender<()>,
    handle: Option<JoinHandle<()>>,
}

impl Scheduler {
    /// Spawn the schedule thread. The first tick fires one full `interval`
    /// after spawning, matching a plain interval timer.
    ///
    /// # Errors
    ///
    /// Returns an error if the OS refuses to spawn the thread.
    pub fn spawn(
        interval: Duration,
        tick: impl FnMut() -> anyhow::Result<()> + Send + 'static,
    ) -> std::io::Result<Self> {
        let (stop_tx, stop_rx) = mpsc::channel();
        let handle = thread::Builder::new()
            .name("vigil-schedule".to_string())
            .spawn(move || run_loop(interval, &stop_rx, tick))?;

        Ok(Self {
            stop_tx,
            handle: Some(handle),
        })
    }

    /// Signal the schedule thread to stop and wait for it to exit.
    pub fn stop(mut self) {
        let _ = self.stop_tx.send(());
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        let _ = self.stop_tx.send(());
    }
}

fn run_loop(
    interval: Duration,
    stop_rx: &Receiver<()>,
    mut tick: impl FnMut() -> anyhow::Result<()>,
) {
    info!(interval_secs = interval.as_secs(), "schedule started");

    loop {
        match stop_rx.recv_timeout(interval) {
            Ok(()) | Err(RecvTimeoutError::Disconnected) => {
                info!("schedule stopping");
                return;
            }
            Err(RecvTimeoutError::Timeout) => {
                if let Err(error) = tick() {
                    // One failed tick must never stop future ticks.
                    error!(%error, "scheduled inactivity check failed");
                }
            }
        }
    }
}
