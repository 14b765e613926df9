//! Deferred callback queue keyed by wake time.
//!
//! Short gameplay delays (the ship's immunity window, the pause between
//! levels) are entries in a [`TimerQueue`] instead of per-frame countdowns.
//! Each entry has a wake time on the [`WorldTime`] clock, a [`TimerSignal`]
//! naming what should happen, and optionally the entity it belongs to.
//!
//! [`update_timers`](crate::systems::timers::update_timers) pops due entries
//! every frame and triggers a [`TimerEvent`](crate::events::timer::TimerEvent)
//! for each. Entries owned by an entity are dropped with
//! [`TimerQueue::cancel_owned_by`] when that entity is destroyed, and entries
//! whose owner no longer exists are discarded instead of fired.
//!
//! [`WorldTime`]: crate::resources::worldtime::WorldTime

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use bevy_ecs::prelude::{Entity, Resource};
use smallvec::SmallVec;

/// What a timer means when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerSignal {
    /// The ship's post-hit immunity window is over.
    ImmunityExpired,
    /// The pause after clearing a level is over.
    PostLevelDone,
}

/// Handle returned by [`TimerQueue::schedule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

/// A timer that reached its wake time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DueTimer {
    pub id: TimerId,
    pub owner: Option<Entity>,
    pub signal: TimerSignal,
    pub wake_at: f32,
}

#[derive(Debug, Clone, Copy)]
struct Scheduled {
    wake_at: f32,
    seq: u64,
    owner: Option<Entity>,
    signal: TimerSignal,
}

impl PartialEq for Scheduled {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Scheduled {}

impl PartialOrd for Scheduled {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Scheduled {
    // Reversed: BinaryHeap is a max-heap, the earliest wake time must be on top.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .wake_at
            .total_cmp(&self.wake_at)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Min-heap of pending timers.
#[derive(Debug, Default, Resource)]
pub struct TimerQueue {
    heap: BinaryHeap<Scheduled>,
    next_seq: u64,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `signal` to fire `delay` seconds after `now`.
    pub fn schedule(
        &mut self,
        now: f32,
        delay: f32,
        owner: Option<Entity>,
        signal: TimerSignal,
    ) -> TimerId {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Scheduled {
            wake_at: now + delay.max(0.0),
            seq,
            owner,
            signal,
        });
        TimerId(seq)
    }

    /// Remove every timer owned by `owner`. Returns how many were removed.
    pub fn cancel_owned_by(&mut self, owner: Entity) -> usize {
        let before = self.heap.len();
        self.heap.retain(|t| t.owner != Some(owner));
        before - self.heap.len()
    }

    /// Remove every timer carrying `signal`. Returns how many were removed.
    pub fn cancel_signal(&mut self, signal: TimerSignal) -> usize {
        let before = self.heap.len();
        self.heap.retain(|t| t.signal != signal);
        before - self.heap.len()
    }

    /// Pop every timer whose wake time is `<= now`, earliest first.
    pub fn pop_due(&mut self, now: f32) -> SmallVec<[DueTimer; 4]> {
        let mut due = SmallVec::new();
        while let Some(top) = self.heap.peek() {
            if top.wake_at > now {
                break;
            }
            if let Some(t) = self.heap.pop() {
                due.push(DueTimer {
                    id: TimerId(t.seq),
                    owner: t.owner,
                    signal: t.signal,
                    wake_at: t.wake_at,
                });
            }
        }
        due
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn clear(&mut self) {
        self.heap.clear();
    }
}
