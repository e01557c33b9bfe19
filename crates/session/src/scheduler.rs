//! Cancellable periodic tick timer.
//!
//! Every `schedule` starts a new timer generation. Ticks carry the generation they
//! were produced under, so a tick that was already queued when its timer got replaced
//! or cancelled is recognisably stale.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::runtime::Event;

pub trait TickScheduler: Send {
    /// Stop any running timer and start ticking every `interval_ms`.
    ///
    /// Returns the new generation.
    fn schedule(&mut self, interval_ms: u32) -> u64;

    /// Stop ticking. Later ticks of the current generation become stale.
    fn cancel(&mut self);

    /// Generation of the most recent `schedule`
    fn generation(&self) -> u64;

    fn is_active(&self) -> bool;

    /// Whether a tick stamped with `generation` should still be acted on
    fn accepts(&self, generation: u64) -> bool {
        self.is_active() && generation == self.generation()
    }
}

/// Timer backed by a tokio task posting [`Event::Tick`] into the session channel.
#[derive(Debug)]
pub struct TokioTicker {
    events: mpsc::Sender<Event>,
    task: Option<JoinHandle<()>>,
    generation: u64,
    interval_ms: u32,
}

impl TokioTicker {
    pub fn new(events: mpsc::Sender<Event>) -> Self {
        Self {
            events,
            task: None,
            generation: 0,
            interval_ms: 0,
        }
    }

    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    fn stop_task(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl TickScheduler for TokioTicker {
    fn schedule(&mut self, interval_ms: u32) -> u64 {
        self.stop_task();
        self.generation += 1;
        self.interval_ms = interval_ms.max(1);

        let generation = self.generation;
        let period = Duration::from_millis(u64::from(self.interval_ms));
        let events = self.events.clone();

        self.task = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately; the first step is one period out.
            interval.tick().await;
            loop {
                interval.tick().await;
                if events.send(Event::Tick(generation)).await.is_err() {
                    break;
                }
            }
        }));

        log::debug!("tick timer gen {} every {}ms", generation, self.interval_ms);
        generation
    }

    fn cancel(&mut self) {
        if self.task.is_some() {
            log::debug!("tick timer gen {} cancelled", self.generation);
        }
        self.stop_task();
    }

    fn generation(&self) -> u64 {
        self.generation
    }

    fn is_active(&self) -> bool {
        self.task.is_some()
    }
}

impl Drop for TokioTicker {
    fn drop(&mut self) {
        self.stop_task();
    }
}

/// Timer that never fires by itself.
///
/// Tests drive ticks by hand. Clones share state, so a test can keep one handle and
/// give the other to a session, then inspect the schedule history.
#[derive(Debug, Default, Clone)]
pub struct ManualTicker {
    inner: Arc<Mutex<ManualState>>,
}

#[derive(Debug, Default)]
struct ManualState {
    generation: u64,
    active: bool,
    history: Vec<u32>,
}

impl ManualTicker {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, ManualState> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Intervals passed to `schedule`, oldest first
    pub fn history(&self) -> Vec<u32> {
        self.state().history.clone()
    }

    /// Current period, `None` while cancelled
    pub fn interval_ms(&self) -> Option<u32> {
        let state = self.state();
        state.active.then(|| state.history.last().copied()).flatten()
    }
}

impl TickScheduler for ManualTicker {
    fn schedule(&mut self, interval_ms: u32) -> u64 {
        let mut state = self.state();
        state.generation += 1;
        state.active = true;
        state.history.push(interval_ms);
        state.generation
    }

    fn cancel(&mut self) {
        self.state().active = false;
    }

    fn generation(&self) -> u64 {
        self.state().generation
    }

    fn is_active(&self) -> bool {
        self.state().active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_ticker_generations() {
        let mut ticker = ManualTicker::new();
        let observer = ticker.clone();
        assert!(!ticker.accepts(0));

        let first = ticker.schedule(150);
        assert!(ticker.accepts(first));

        let second = ticker.schedule(140);
        assert!(!ticker.accepts(first));
        assert!(ticker.accepts(second));
        assert_eq!(observer.interval_ms(), Some(140));

        ticker.cancel();
        assert!(!ticker.accepts(second));
        assert_eq!(ticker.interval_ms(), None);
        assert_eq!(ticker.history(), vec![150, 140]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_tokio_ticker_posts_current_generation() {
        let (tx, mut rx) = mpsc::channel(8);
        let mut ticker = TokioTicker::new(tx);

        let generation = ticker.schedule(100);
        tokio::time::sleep(Duration::from_millis(250)).await;

        assert!(matches!(rx.recv().await, Some(Event::Tick(g)) if g == generation));
        assert!(matches!(rx.recv().await, Some(Event::Tick(g)) if g == generation));
        ticker.cancel();
        assert!(!ticker.is_active());
    }

    #[tokio::test(start_paused = true)]
    async fn test_reschedule_stops_old_timer() {
        let (tx, mut rx) = mpsc::channel(8);
        let mut ticker = TokioTicker::new(tx);

        let old = ticker.schedule(1000);
        let new = ticker.schedule(50);
        assert_ne!(old, new);

        tokio::time::sleep(Duration::from_millis(1200)).await;
        ticker.cancel();

        let mut seen = Vec::new();
        while let Ok(Event::Tick(g)) = rx.try_recv() {
            seen.push(g);
        }
        assert!(!seen.is_empty());
        assert!(seen.iter().all(|&g| g == new));
    }
}
