// Quiet-period gate: an action becomes due once no signal arrived for
// `quiet_ms`. Every new signal pushes the deadline back.

#[derive(Debug, Clone, Copy)]
pub struct Debounce {
    quiet_ms: f64,
    deadline: Option<f64>,
}

impl Debounce {
    pub fn new(quiet_ms: f64) -> Debounce {
        Debounce {
            quiet_ms,
            deadline: None,
        }
    }

    pub fn quiet_ms(&self) -> f64 {
        self.quiet_ms
    }

    pub fn signal(&mut self, now_ms: f64) {
        self.deadline = Some(now_ms + self.quiet_ms);
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Time left until the pending action is due, `None` when nothing is pending.
    pub fn remaining(&self, now_ms: f64) -> Option<f64> {
        self.deadline.map(|deadline| (deadline - now_ms).max(0.0))
    }

    /// Returns true exactly once per quiet window, when it has elapsed.
    pub fn poll(&mut self, now_ms: f64) -> bool {
        match self.deadline {
            Some(deadline) if now_ms >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
