use std::time::{Duration, Instant};

/// Trailing-edge debounce for coalescing rapid edits: `trigger` arms (or
/// re-arms) the timer, `ready` fires exactly once after the delay has elapsed
/// with no further triggers.
pub struct Debouncer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Debouncer {
            delay,
            deadline: None,
        }
    }

    pub fn trigger(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    pub fn ready(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_debouncer_is_never_ready() {
        let mut debouncer = Debouncer::new(Duration::from_millis(500));
        assert!(!debouncer.ready(Instant::now()));
    }

    #[test]
    fn fires_once_after_the_delay() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(Duration::from_millis(500));

        debouncer.trigger(start);
        assert!(!debouncer.ready(start + Duration::from_millis(100)));
        assert!(debouncer.ready(start + Duration::from_millis(500)));
        assert!(!debouncer.ready(start + Duration::from_millis(600)));
    }

    #[test]
    fn retrigger_extends_the_deadline() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(Duration::from_millis(500));

        debouncer.trigger(start);
        debouncer.trigger(start + Duration::from_millis(400));
        assert!(!debouncer.ready(start + Duration::from_millis(500)));
        assert!(debouncer.ready(start + Duration::from_millis(900)));
    }
}
