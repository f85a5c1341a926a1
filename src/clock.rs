use std::time::{Duration, Instant};

/// Monotonic play timer. Runs from creation until [`SessionClock::stop`].
#[derive(Clone, Copy, Debug)]
pub struct SessionClock {
    started: Instant,
    stopped: Option<Duration>,
}

impl SessionClock {
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
            stopped: None,
        }
    }

    /// Freezes the reading. Stopping twice keeps the first value.
    pub fn stop(&mut self) {
        if self.stopped.is_none() {
            self.stopped = Some(self.started.elapsed());
        }
    }

    pub fn is_running(&self) -> bool {
        self.stopped.is_none()
    }

    pub fn started_at(&self) -> Instant {
        self.started
    }

    pub fn elapsed(&self) -> Duration {
        self.stopped.unwrap_or_else(|| self.started.elapsed())
    }
}
