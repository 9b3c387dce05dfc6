// extensions/tween.rs
//
// Tween scheduler: drives reel positions toward targets over time.
// Tweens are plain tagged records (which reel, which property, numbers, easing);
// nothing holds a live reference into a reel. Completions are queued and
// drained by the owner instead of running closures.
//
// Usage:
//   let mut tweens = TweenScheduler::new();
//   tweens.schedule(Tween::reel_position(0, 0.0, 20.0, 1600.0, Easing::REEL_STOP).with_on_complete(0))?;
//   tweens.tick(now_ms, &mut reels);   // once per frame
//   for done in tweens.drain_completed() { ... }

use std::collections::HashMap;
use crate::api::error::ReelError;
use crate::components::reel::Reel;
use super::easing::{Easing, ease};

/// Which property a tween animates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TweenTarget {
    /// Animate `Reel.position` of the reel at this index.
    ReelPosition { reel: usize },
}

/// A single tween animation.
#[derive(Debug, Clone)]
pub struct Tween {
    /// What to animate.
    pub target: TweenTarget,
    /// Value at phase 0.
    pub from: f64,
    /// Value forced at phase 1.
    pub to: f64,
    /// Frame timestamp the tween started at; `None` until its first tick.
    pub start_ms: Option<f64>,
    /// Duration in milliseconds.
    pub duration_ms: f64,
    /// Easing function.
    pub easing: Easing,
    /// Optional event ID queued after every applied step.
    pub on_update: Option<u32>,
    /// Optional event ID queued once on completion.
    pub on_complete: Option<u32>,
}

impl Tween {
    /// Create a reel position tween.
    pub fn reel_position(reel: usize, from: f64, to: f64, duration_ms: f64, easing: Easing) -> Self {
        Self {
            target: TweenTarget::ReelPosition { reel },
            from,
            to,
            start_ms: None,
            duration_ms,
            easing,
            on_update: None,
            on_complete: None,
        }
    }

    // -- Builder methods --

    pub fn starting_at(mut self, start_ms: f64) -> Self {
        self.start_ms = Some(start_ms);
        self
    }

    pub fn with_on_update(mut self, event_id: u32) -> Self {
        self.on_update = Some(event_id);
        self
    }

    pub fn with_on_complete(mut self, event_id: u32) -> Self {
        self.on_complete = Some(event_id);
        self
    }

    /// Normalized progress [0, 1] at `now_ms`.
    pub fn phase(&self, now_ms: f64) -> f64 {
        let start = self.start_ms.unwrap_or(now_ms);
        if self.duration_ms <= 0.0 {
            1.0
        } else {
            ((now_ms - start) / self.duration_ms).clamp(0.0, 1.0)
        }
    }

    /// Eased value at `phase`; exactly `to` once the phase reaches 1.
    pub fn value_at(&self, phase: f64) -> f64 {
        if phase >= 1.0 {
            self.to
        } else {
            ease(self.from, self.to, phase, self.easing)
        }
    }
}

/// Handle to a tween for later reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TweenId(pub u32);

/// A finished tween, reported after its final value was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TweenCompletion {
    pub id: TweenId,
    pub target: TweenTarget,
    pub event: Option<u32>,
}

/// Manages all active tweens.
#[derive(Debug, Default)]
pub struct TweenScheduler {
    tweens: HashMap<TweenId, Tween>,
    next_id: u32,
    /// Completed tweens to be polled.
    completed: Vec<TweenCompletion>,
    /// Per-step update events to be polled.
    updates: Vec<(TweenId, u32)>,
}

impl TweenScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tween. Refuses a second tween on a property that is already animating.
    pub fn schedule(&mut self, tween: Tween) -> Result<TweenId, ReelError> {
        if let Some(existing) = self.tweens.values().find(|t| t.target == tween.target) {
            let TweenTarget::ReelPosition { reel } = existing.target;
            return Err(ReelError::PropertyBusy { reel });
        }
        let id = TweenId(self.next_id);
        self.next_id += 1;
        self.tweens.insert(id, tween);
        Ok(id)
    }

    /// Whether a tween currently drives `target`.
    pub fn is_animating(&self, target: TweenTarget) -> bool {
        self.tweens.values().any(|t| t.target == target)
    }

    /// Get a tween by handle.
    pub fn get(&self, id: TweenId) -> Option<&Tween> {
        self.tweens.get(&id)
    }

    /// Advance all tweens to `now_ms` and write their values into the reels.
    /// Finished tweens get their exact target value, are removed, and are queued
    /// for `drain_completed`. Returns the number that completed this tick.
    pub fn tick(&mut self, now_ms: f64, reels: &mut [Reel]) -> usize {
        let mut finished = Vec::new();

        for (&id, tween) in self.tweens.iter_mut() {
            tween.start_ms.get_or_insert(now_ms);
            let phase = tween.phase(now_ms);
            let value = tween.value_at(phase);

            match tween.target {
                TweenTarget::ReelPosition { reel } => {
                    if let Some(reel) = reels.get_mut(reel) {
                        reel.position = value;
                    }
                }
            }

            if let Some(event_id) = tween.on_update {
                self.updates.push((id, event_id));
            }

            if phase >= 1.0 {
                finished.push(TweenCompletion {
                    id,
                    target: tween.target,
                    event: tween.on_complete,
                });
            }
        }

        finished.sort_by_key(|c| c.id);
        let count = finished.len();
        for completion in finished {
            self.tweens.remove(&completion.id);
            self.completed.push(completion);
        }

        count
    }

    /// Drain completed tweens, oldest handle first within a tick.
    pub fn drain_completed(&mut self) -> impl Iterator<Item = TweenCompletion> + '_ {
        self.completed.drain(..)
    }

    /// Drain per-step update events.
    pub fn drain_updates(&mut self) -> impl Iterator<Item = (TweenId, u32)> + '_ {
        self.updates.drain(..)
    }

    /// Number of active tweens.
    pub fn len(&self) -> usize {
        self.tweens.len()
    }

    /// Whether there are no active tweens.
    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }

    /// Clear all tweens and anything still queued; nothing fires afterwards.
    pub fn clear(&mut self) {
        self.tweens.clear();
        self.completed.clear();
        self.updates.clear();
    }
}
