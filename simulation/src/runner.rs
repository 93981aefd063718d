//! Background thread that ticks the simulation at a fixed interval.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{info, warn};

use crate::world::{SimulationWorld, TickReport};

/// Drives a shared world from its own thread so a UI thread only has to
/// read. The external layer may still lock the world between ticks to
/// adjust configuration or issue a reset.
pub struct SimulationRunner {
    is_running: Arc<AtomicBool>,
    thread_handle: Option<JoinHandle<()>>,
}

impl SimulationRunner {
    pub fn new() -> Self {
        Self {
            is_running: Arc::new(AtomicBool::new(false)),
            thread_handle: None,
        }
    }

    /// Start ticking `world` every `interval_ms` milliseconds, passing each
    /// `TickReport` to `callback` (the observability layer's sampling hook).
    pub fn start<F>(&mut self, world: Arc<Mutex<SimulationWorld>>, interval_ms: u64, callback: F)
    where
        F: Fn(TickReport) + Send + 'static,
    {
        if self.is_running.load(Ordering::Relaxed) {
            warn!("simulation runner already running");
            return;
        }

        info!(interval_ms, "starting simulation runner");
        self.is_running.store(true, Ordering::Relaxed);
        let running = Arc::clone(&self.is_running);

        let handle = thread::spawn(move || {
            while running.load(Ordering::Relaxed) {
                let report = {
                    let mut w = world.lock().unwrap();
                    w.tick()
                };
                callback(report);
                thread::sleep(Duration::from_millis(interval_ms));
            }
            info!("simulation runner thread stopped");
        });

        self.thread_handle = Some(handle);
    }

    /// Stop ticking and wait for the thread to finish.
    pub fn stop(&mut self) {
        if !self.is_running.load(Ordering::Relaxed) {
            return;
        }

        info!("stopping simulation runner...");
        self.is_running.store(false, Ordering::Relaxed);

        if let Some(handle) = self.thread_handle.take() {
            let _ = handle.join(); // thread panic result intentionally ignored during shutdown
        }
    }

    pub fn is_running(&self) -> bool {
        self.is_running.load(Ordering::Relaxed)
    }
}

impl Default for SimulationRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for SimulationRunner {
    fn drop(&mut self) {
        self.stop();
    }
}
