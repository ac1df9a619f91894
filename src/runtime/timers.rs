use crate::foundation::core::{Millis, TimerId};
use std::collections::{BTreeMap, HashMap};

#[derive(Clone, Debug)]
struct Entry<T> {
    id: TimerId,
    task: T,
    period: Option<Millis>,
}

/// A timer that came due, popped from the queue.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fired<T> {
    /// Timer handle (stable across repeats of an interval).
    pub id: TimerId,
    /// Virtual time the timer was due at; the clock has been advanced to it.
    pub at: Millis,
    /// Payload registered with the timer.
    pub task: T,
}

/// Deterministic timer queue over a virtual clock.
///
/// Determinism rule: timers due at the same instant fire in registration order. Interval timers
/// are re-armed after they fire, behind anything already queued for the same instant.
#[derive(Clone, Debug)]
pub struct TimerQueue<T> {
    now: Millis,
    next_seq: u64,
    next_id: u64,
    entries: BTreeMap<(Millis, u64), Entry<T>>,
    slot_by_id: HashMap<TimerId, (Millis, u64)>,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TimerQueue<T> {
    /// Empty queue with the clock at zero.
    pub fn new() -> Self {
        Self {
            now: Millis::ZERO,
            next_seq: 0,
            next_id: 0,
            entries: BTreeMap::new(),
            slot_by_id: HashMap::new(),
        }
    }

    /// Current virtual time.
    pub fn now(&self) -> Millis {
        self.now
    }

    /// Number of pending timers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Return `true` when nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Return `true` when `id` is still pending.
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.slot_by_id.contains_key(&id)
    }

    /// Due time of the earliest pending timer.
    pub fn next_due(&self) -> Option<Millis> {
        self.entries.keys().next().map(|&(due, _)| due)
    }

    /// Fire `task` once, `delay` after now.
    pub fn set_timeout(&mut self, delay: Millis, task: T) -> TimerId {
        self.insert(delay, task, None)
    }

    /// Fire `task` every `period`, first at `now + period`.
    ///
    /// A zero period is clamped to 1ms so the clock always advances between repeats.
    pub fn set_interval(&mut self, period: Millis, task: T) -> TimerId {
        let period = Millis(period.0.max(1));
        self.insert(period, task, Some(period))
    }

    /// Cancel a pending timer. Returns `false` if it already fired or was cancelled.
    pub fn clear(&mut self, id: TimerId) -> bool {
        let Some(slot) = self.slot_by_id.remove(&id) else {
            return false;
        };
        self.entries.remove(&slot).is_some()
    }

    /// Move the clock forward without firing anything. The clock never moves backwards.
    pub fn advance_to(&mut self, t: Millis) {
        if t > self.now {
            self.now = t;
        }
    }

    fn insert(&mut self, delay: Millis, task: T, period: Option<Millis>) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.insert_with_id(id, self.now + delay, task, period);
        id
    }

    fn insert_with_id(&mut self, id: TimerId, due: Millis, task: T, period: Option<Millis>) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.insert((due, seq), Entry { id, task, period });
        self.slot_by_id.insert(id, (due, seq));
    }
}

impl<T: Clone> TimerQueue<T> {
    /// Pop the earliest timer due at or before `limit`, advancing the clock to its due time.
    pub fn pop_due(&mut self, limit: Millis) -> Option<Fired<T>> {
        let (&(due, seq), _) = self.entries.iter().next()?;
        if due > limit {
            return None;
        }
        let entry = self.entries.remove(&(due, seq))?;
        self.slot_by_id.remove(&entry.id);
        self.advance_to(due);

        if let Some(period) = entry.period {
            self.insert_with_id(entry.id, due + period, entry.task.clone(), Some(period));
        }

        Some(Fired {
            id: entry.id,
            at: due,
            task: entry.task,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/timers.rs"]
mod tests;
