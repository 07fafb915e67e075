/// A one-shot deadline measured against the host's frame clock.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Deadline {
    pub start_ms: u64,
    pub duration_ms: u64,
}

impl Deadline {
    pub fn new(start_ms: u64, duration_ms: u64) -> Self {
        Self {
            start_ms,
            duration_ms,
        }
    }

    pub fn is_done(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.start_ms) >= self.duration_ms
    }

    pub fn remaining_ms(&self, now_ms: u64) -> u64 {
        self.duration_ms
            .saturating_sub(now_ms.saturating_sub(self.start_ms))
    }
}

/// A polling retry owned by a single controller.
///
/// Dropping (or replacing) the task cancels it; there is no shared timer handle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RetryTask {
    interval_ms: u64,
    next_at_ms: u64,
    attempts: u32,
}

impl RetryTask {
    /// Schedules the first retry `interval_ms` after `now_ms`.
    pub fn new(interval_ms: u64, now_ms: u64) -> Self {
        let interval_ms = interval_ms.max(1);
        Self {
            interval_ms,
            next_at_ms: now_ms.saturating_add(interval_ms),
            attempts: 0,
        }
    }

    pub fn is_due(&self, now_ms: u64) -> bool {
        now_ms >= self.next_at_ms
    }

    /// Records a failed attempt and schedules the next one.
    pub fn reschedule(&mut self, now_ms: u64) {
        self.attempts = self.attempts.saturating_add(1);
        self.next_at_ms = now_ms.saturating_add(self.interval_ms);
    }

    pub fn next_at_ms(&self) -> u64 {
        self.next_at_ms
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }
}
