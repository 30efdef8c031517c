use std::time::{Duration, Instant};

/// Trailing-edge debouncer for the live search box.
///
/// Each `schedule` call stores the latest query and re-arms the quiescence
/// window, cancelling whatever was pending. `poll` hands the stored query
/// back exactly once, after the window has elapsed with no further calls, so
/// any burst of keystrokes collapses into one filter pass that uses the text
/// of the last one.
#[derive(Debug, Clone)]
pub struct Debouncer {
    /// The duration to wait after the last event before triggering
    delay: Duration,
    /// When the last event occurred
    last_event: Option<Instant>,
    /// The arguments the deferred pass will run with
    pending_query: Option<String>,
}

impl Debouncer {
    /// Create a new debouncer with the specified delay in milliseconds
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay: Duration::from_millis(delay_ms),
            last_event: None,
            pending_query: None,
        }
    }

    /// Record a new query, restarting the quiescence window. Last call wins.
    pub fn schedule(&mut self, query: impl Into<String>) {
        self.last_event = Some(Instant::now());
        self.pending_query = Some(query.into());
    }

    /// Hand back the pending query once the window has elapsed.
    /// Returns None while still waiting or when nothing is pending.
    pub fn poll(&mut self) -> Option<String> {
        let last = self.last_event?;
        if last.elapsed() >= self.delay {
            self.last_event = None;
            self.pending_query.take()
        } else {
            None
        }
    }

    /// Cancel any pending pass outright
    pub fn reset(&mut self) {
        self.last_event = None;
        self.pending_query = None;
    }

    /// Check if there's a pass waiting on the window
    pub fn is_pending(&self) -> bool {
        self.pending_query.is_some()
    }

    /// Time remaining before the pending pass fires, None when idle
    pub fn time_remaining(&self) -> Option<Duration> {
        let last = self.last_event?;
        self.pending_query.as_ref()?;
        Some(self.delay.saturating_sub(last.elapsed()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    #[test]
    fn test_burst_coalesces_to_last_query() {
        let mut debouncer = Debouncer::new(30);
        debouncer.schedule("m");
        debouncer.schedule("mi");
        debouncer.schedule("milk");

        assert_eq!(debouncer.poll(), None); // still inside the window
        sleep(Duration::from_millis(40));
        assert_eq!(debouncer.poll(), Some("milk".to_string()));
        assert_eq!(debouncer.poll(), None); // fires once
    }

    #[test]
    fn test_new_keystroke_rearms_window() {
        let mut debouncer = Debouncer::new(50);
        debouncer.schedule("a");
        sleep(Duration::from_millis(30));
        debouncer.schedule("ab");
        sleep(Duration::from_millis(30));
        // 60ms since first call, but only 30ms since the last one
        assert_eq!(debouncer.poll(), None);
        sleep(Duration::from_millis(30));
        assert_eq!(debouncer.poll(), Some("ab".to_string()));
    }

    #[test]
    fn test_reset_cancels_pending() {
        let mut debouncer = Debouncer::new(10);
        debouncer.schedule("stale");
        debouncer.reset();
        sleep(Duration::from_millis(20));
        assert_eq!(debouncer.poll(), None);
        assert!(!debouncer.is_pending());
    }
}
