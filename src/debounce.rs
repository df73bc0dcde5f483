// Deadline-based debounce: a burst of calls collapses into one value, released
// once `wait_ms` have passed since the last call. Time is passed in by the
// caller so the browser clock and test clocks drive it the same way.

#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    wait_ms: f64,
    pending: Option<(f64, T)>,
}

impl<T> Debouncer<T> {
    pub fn new(wait_ms: f64) -> Self {
        Debouncer {
            wait_ms: wait_ms.max(0.0),
            pending: None,
        }
    }

    pub fn wait_ms(&self) -> f64 {
        self.wait_ms
    }

    pub fn call(&mut self, now_ms: f64, value: T) {
        self.pending = Some((now_ms + self.wait_ms, value));
    }

    pub fn deadline(&self) -> Option<f64> {
        self.pending.as_ref().map(|(deadline, _)| *deadline)
    }

    // Milliseconds until the pending value is due, 0 when already due
    pub fn remaining(&self, now_ms: f64) -> Option<f64> {
        self.deadline().map(|deadline| (deadline - now_ms).max(0.0))
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    // Releases the latest value once the quiet period has elapsed.
    pub fn poll(&mut self, now_ms: f64) -> Option<T> {
        match self.pending {
            Some((deadline, _)) if now_ms >= deadline => self.pending.take().map(|(_, v)| v),
            _ => None,
        }
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }
}
