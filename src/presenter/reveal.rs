//! # Reveal timer
//! One-shot delayed transition of a card's confidence meter from 0 to its
//! final percentage.
//!
//! Each displayed card owns one [`RevealTimer`]. The timer runs as a small
//! tokio task and publishes through a `watch` channel whose receiving side
//! belongs to the card. Dropping the timer (card removed) or re-keying it
//! (card identity changed) aborts the pending task, so a stale timer never
//! writes to a card that is gone.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use super::tone::meter_percent;

pub const REVEAL_BASE_DELAY_MS: u64 = 150;
pub const REVEAL_STEP_MS: u64 = 80;

/// `150 + index * 80` milliseconds.
pub fn reveal_delay(index: usize) -> Duration {
    let step = (index as u64).saturating_mul(REVEAL_STEP_MS);
    Duration::from_millis(REVEAL_BASE_DELAY_MS.saturating_add(step))
}

/// What a pending reveal is bound to. A new description or index restarts the
/// meter from 0; a new target alone keeps the shown value until it lands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealKey {
    pub description: String,
    pub index: usize,
    pub target: i64,
}

impl RevealKey {
    pub fn new(description: impl Into<String>, index: usize, confidence: f64) -> Self {
        Self {
            description: description.into(),
            index,
            target: meter_percent(confidence),
        }
    }
}

#[derive(Debug)]
pub struct RevealTimer {
    key: RevealKey,
    meter: watch::Receiver<Option<i64>>,
    /// Value kept on screen while a re-targeted reveal is pending.
    shown: Option<i64>,
    task: JoinHandle<()>,
}

impl RevealTimer {
    /// Schedule the reveal. Must be called from within a tokio runtime.
    pub fn schedule(key: RevealKey) -> Self {
        Self::schedule_from(key, None)
    }

    fn schedule_from(key: RevealKey, shown: Option<i64>) -> Self {
        let (tx, rx) = watch::channel(None);
        // Deadline is fixed at mount time, not when the task is first polled.
        let deadline = Instant::now() + reveal_delay(key.index);
        let target = key.target;
        let index = key.index;

        let task = tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            if tx.send(Some(target)).is_err() {
                tracing::debug!(target: "reveal", index, "no reader left, reveal skipped");
            } else {
                tracing::trace!(target: "reveal", index, value = target, "meter revealed");
            }
        });

        Self {
            key,
            meter: rx,
            shown,
            task,
        }
    }

    pub fn key(&self) -> &RevealKey {
        &self.key
    }

    /// Current meter value: 0 (or the carried value) until the timer fires,
    /// then the target.
    pub fn value(&self) -> i64 {
        self.meter.borrow().or(self.shown).unwrap_or(0)
    }

    pub fn is_revealed(&self) -> bool {
        self.meter.borrow().is_some()
    }

    /// Extra read handle on the meter (renderers, tests).
    pub fn observe(&self) -> watch::Receiver<Option<i64>> {
        self.meter.clone()
    }

    /// Wait for the reveal. `None` if the timer was cancelled first.
    pub async fn revealed(&mut self) -> Option<i64> {
        self.meter.wait_for(Option::is_some).await.ok().and_then(|v| *v)
    }

    /// Rebind to a new key. Returns `true` when the old timer was cancelled
    /// and a fresh one scheduled.
    pub fn rekey(&mut self, key: RevealKey) -> bool {
        if self.key == key {
            return false;
        }
        tracing::debug!(
            target: "reveal",
            from = self.key.index,
            to = key.index,
            "card identity changed, rescheduling reveal"
        );
        let same_card = self.key.description == key.description && self.key.index == key.index;
        let shown = same_card.then(|| self.value());
        // Assigning drops the old timer, which aborts its task.
        *self = Self::schedule_from(key, shown);
        true
    }

    pub fn cancel(&self) {
        self.task.abort();
    }
}

impl Drop for RevealTimer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn settle() {
        for _ in 0..4 {
            tokio::task::yield_now().await;
        }
    }

    #[test]
    fn delay_formula() {
        assert_eq!(reveal_delay(0), Duration::from_millis(150));
        assert_eq!(reveal_delay(1), Duration::from_millis(230));
        assert_eq!(reveal_delay(2), Duration::from_millis(310));
    }

    #[tokio::test(start_paused = true)]
    async fn first_card_reveals_at_150ms() {
        let timer = RevealTimer::schedule(RevealKey::new("d", 0, 0.42));
        tokio::time::advance(Duration::from_millis(149)).await;
        settle().await;
        assert_eq!(timer.value(), 0);
        assert!(!timer.is_revealed());

        tokio::time::advance(Duration::from_millis(1)).await;
        settle().await;
        assert_eq!(timer.value(), 42);
        assert!(timer.is_revealed());
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_prevents_write() {
        let timer = RevealTimer::schedule(RevealKey::new("d", 0, 0.9));
        let probe = timer.observe();
        timer.cancel();
        tokio::time::advance(Duration::from_millis(500)).await;
        settle().await;
        assert_eq!(*probe.borrow(), None);
        assert_eq!(timer.value(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn rekey_with_same_identity_keeps_timer() {
        let mut timer = RevealTimer::schedule(RevealKey::new("d", 1, 0.6));
        assert!(!timer.rekey(RevealKey::new("d", 1, 0.6)));
        assert_eq!(timer.revealed().await, Some(60));
    }

    #[tokio::test(start_paused = true)]
    async fn new_target_keeps_revealed_value_until_it_lands() {
        let mut timer = RevealTimer::schedule(RevealKey::new("d", 0, 0.6));
        assert_eq!(timer.revealed().await, Some(60));

        assert!(timer.rekey(RevealKey::new("d", 0, 0.8)));
        assert!(!timer.is_revealed());
        assert_eq!(timer.value(), 60);

        tokio::time::advance(Duration::from_millis(150)).await;
        settle().await;
        assert_eq!(timer.value(), 80);
    }
}
