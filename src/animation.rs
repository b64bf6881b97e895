//! Enter/exit bookkeeping for hitbox animations.
//!
//! Membership in the entering and exiting sets is only a rendering hint.
//! The one exception is that an elapsed exit commits the removal from the
//! store. Deferred actions are never cancelled. Instead each one is stamped
//! with the epoch it was scheduled in, and `reset` advances the epoch so
//! anything scheduled earlier falls through as a no-op when it comes due.

use std::collections::BTreeMap;
use std::time::Duration;

use crate::hitbox::HitboxId;
use crate::store::HitboxStore;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Entering,
    Exiting,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeferredAction {
    /// Drop the id from the entering set.
    FinishEnter(HitboxId),
    /// Remove the id from the store and the exiting set together.
    CommitExit(HitboxId),
}

#[derive(Clone, Copy, Debug)]
struct Scheduled {
    due: Duration,
    epoch: u64,
    action: DeferredAction,
}

#[derive(Clone, Debug)]
pub struct LifecycleAnimator {
    window: Duration,
    /// id -> time its phase started
    entering: BTreeMap<HitboxId, Duration>,
    exiting: BTreeMap<HitboxId, Duration>,
    queue: Vec<Scheduled>,
    epoch: u64,
}

impl LifecycleAnimator {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            entering: BTreeMap::new(),
            exiting: BTreeMap::new(),
            queue: Vec::new(),
            epoch: 0,
        }
    }

    fn schedule(&mut self, now: Duration, action: DeferredAction) {
        self.queue.push(Scheduled {
            due: now + self.window,
            epoch: self.epoch,
            action,
        });
    }

    /// Marks a freshly created hitbox as entering.
    pub fn begin_enter(&mut self, id: HitboxId, now: Duration) {
        self.entering.insert(id, now);
        self.schedule(now, DeferredAction::FinishEnter(id));
    }

    /// Marks `id` as exiting and schedules its removal. Returns false if an
    /// exit for `id` is already under way.
    pub fn begin_exit(&mut self, id: HitboxId, now: Duration) -> bool {
        if self.exiting.contains_key(&id) {
            return false;
        }
        self.exiting.insert(id, now);
        self.schedule(now, DeferredAction::CommitExit(id));
        true
    }

    pub fn is_entering(&self, id: HitboxId) -> bool {
        self.entering.contains_key(&id)
    }

    pub fn is_exiting(&self, id: HitboxId) -> bool {
        self.exiting.contains_key(&id)
    }

    pub fn exiting(&self) -> impl Iterator<Item = HitboxId> + '_ {
        self.exiting.keys().copied()
    }

    /// Current phase of `id` and how far through it we are, in `0.0..=1.0`.
    /// Exiting takes precedence over entering.
    pub fn progress(&self, id: HitboxId, now: Duration) -> Option<(Phase, f32)> {
        let (phase, started) = match (self.exiting.get(&id), self.entering.get(&id)) {
            (Some(t), _) => (Phase::Exiting, *t),
            (None, Some(t)) => (Phase::Entering, *t),
            (None, None) => return None,
        };
        let t = if self.window.is_zero() {
            1.0
        } else {
            (now.saturating_sub(started).as_secs_f32() / self.window.as_secs_f32()).min(1.0)
        };
        Some((phase, t))
    }

    /// True while any hitbox is mid-fade.
    pub fn is_animating(&self) -> bool {
        !self.entering.is_empty() || !self.exiting.is_empty()
    }

    pub fn has_pending(&self) -> bool {
        !self.queue.is_empty()
    }

    /// Earliest time a pending action comes due.
    pub fn next_due(&self) -> Option<Duration> {
        self.queue.iter().map(|s| s.due).min()
    }

    /// Forgets all transient membership and invalidates every pending action.
    pub fn reset(&mut self) {
        self.epoch += 1;
        self.entering.clear();
        self.exiting.clear();
        log::debug!(
            "animator reset to epoch {}, {} pending action(s) now stale",
            self.epoch,
            self.queue.len()
        );
    }

    /// Runs every action due at `now`, oldest first. Returns the ids whose
    /// removal was committed to the store.
    pub fn tick(&mut self, now: Duration, store: &mut HitboxStore) -> Vec<HitboxId> {
        let mut due: Vec<Scheduled> = Vec::new();
        self.queue.retain(|s| {
            if s.due <= now {
                due.push(*s);
                false
            } else {
                true
            }
        });
        due.sort_by_key(|s| s.due);

        let mut removed = Vec::new();
        for s in due {
            if s.epoch != self.epoch {
                log::trace!("dropping stale {:?} from epoch {}", s.action, s.epoch);
                continue;
            }
            match s.action {
                DeferredAction::FinishEnter(id) => {
                    self.entering.remove(&id);
                }
                DeferredAction::CommitExit(id) => {
                    self.exiting.remove(&id);
                    if store.remove(id).is_some() {
                        log::debug!("hitbox {} removed after exit animation", id);
                        removed.push(id);
                    } else {
                        log::trace!("hitbox {} already gone at exit commit", id);
                    }
                }
            }
        }
        removed
    }
}
