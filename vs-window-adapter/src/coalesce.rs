/// Keeps only the most recent value of a high-frequency signal until it is drained.
///
/// Intermediate values are discarded, never queued. With a non-zero `interval_ms` a drain is
/// refused until that much time has passed since the previous one.
#[derive(Clone, Debug, Default)]
pub struct Coalescer<V> {
    pending: Option<V>,
    superseded: u64,
    interval_ms: u64,
    last_drain_ms: Option<u64>,
}

impl<V> Coalescer<V> {
    pub fn new(interval_ms: u64) -> Self {
        Self {
            pending: None,
            superseded: 0,
            interval_ms,
            last_drain_ms: None,
        }
    }

    pub fn push(&mut self, value: V) {
        if self.pending.replace(value).is_some() {
            self.superseded = self.superseded.saturating_add(1);
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn peek(&self) -> Option<&V> {
        self.pending.as_ref()
    }

    /// Drains the pending value regardless of the interval.
    pub fn take(&mut self) -> Option<V> {
        self.pending.take()
    }

    /// Drains the pending value if the minimal interval since the last drain has elapsed.
    pub fn take_due(&mut self, now_ms: u64) -> Option<V> {
        self.pending.as_ref()?;
        if let Some(last) = self.last_drain_ms {
            if now_ms.saturating_sub(last) < self.interval_ms {
                return None;
            }
        }
        self.last_drain_ms = Some(now_ms);
        self.pending.take()
    }

    pub fn clear(&mut self) {
        self.pending = None;
    }

    /// Number of values replaced before they were drained.
    pub fn superseded(&self) -> u64 {
        self.superseded
    }
}
