//! Peak memory and thread-count reporting.
//!
//! Memory figures come straight from `/proc/<pid>/status`: the process
//! name and the `VmPeak:`/`VmHWM:` lines are printed verbatim. Thread
//! count is sampled by a single best-effort background thread every
//! 100 ms; the main flow signals it to stop and joins it before reading
//! the peak, so the value is never read while still being updated.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::warn;

/// Status-report lines selected for the memory report, by prefix.
const STATUS_PREFIXES: [&str; 3] = ["Name:", "VmPeak:", "VmHWM:"];

/// Print the process id and the peak-memory lines of the process
/// status report.
///
/// If the status report cannot be opened the failure is reported as a
/// diagnostic line; the run continues.
pub fn print_peak_memory() {
    let pid = std::process::id();
    println!("PID: {}", pid);

    let status_path = format!("/proc/{}/status", pid);
    let file = match File::open(&status_path) {
        Ok(file) => file,
        Err(e) => {
            println!("memory information open error: {}", e);
            return;
        }
    };

    for line in BufReader::new(file).lines().map_while(Result::ok) {
        if STATUS_PREFIXES.iter().any(|p| line.starts_with(p)) {
            println!("{}", line);
        }
    }
}

/// Current thread count from the `Threads:` line of `/proc/self/status`.
fn read_thread_count() -> Option<usize> {
    let file = File::open("/proc/self/status").ok()?;
    for line in BufReader::new(file).lines().map_while(Result::ok) {
        if let Some(rest) = line.strip_prefix("Threads:") {
            return rest.trim().parse().ok();
        }
    }
    None
}

/// Background sampler tracking the peak thread count of the process.
///
/// Single-producer/single-reader: the sampler owns its running maximum
/// and hands it out through the join handle, so the peak is only
/// observable after [`stop`](ThreadCountMonitor::stop) has joined the
/// thread. The stop flag is the only cross-thread state.
pub struct ThreadCountMonitor {
    stop: Arc<AtomicBool>,
    handle: JoinHandle<usize>,
}

impl ThreadCountMonitor {
    /// Sampling interval between thread-count reads.
    const SAMPLE_INTERVAL: Duration = Duration::from_millis(100);

    /// Spawn the sampler thread.
    pub fn spawn() -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let stop_flag = stop.clone();
        let handle = thread::spawn(move || {
            let mut peak = 0usize;
            while !stop_flag.load(Ordering::Relaxed) {
                if let Some(current) = read_thread_count() {
                    peak = peak.max(current);
                }
                thread::sleep(Self::SAMPLE_INTERVAL);
            }
            peak
        });
        Self { stop, handle }
    }

    /// Signal the sampler to stop, wait for it to finish, and return
    /// the peak thread count it observed (0 if sampling failed).
    pub fn stop(self) -> usize {
        self.stop.store(true, Ordering::Relaxed);
        match self.handle.join() {
            Ok(peak) => peak,
            Err(_) => {
                warn!("Thread-count monitor panicked; reporting 0");
                0
            }
        }
    }
}
