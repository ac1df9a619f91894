use std::collections::{BTreeMap, BTreeSet};

/// Payload-free, one-shot completion signals broadcast between flows.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Signal {
    /// The external balloon module finished its animation.
    BalloonsFinished,
    /// The cake reveal completed (gifts call-to-action is up).
    CakeFinished,
}

impl Signal {
    /// Stable kebab-case name, as used in show files and scripted inputs.
    pub fn name(self) -> &'static str {
        match self {
            Signal::BalloonsFinished => "balloons-finished",
            Signal::CakeFinished => "cake-finished",
        }
    }

    /// Parse a kebab-case signal name.
    pub fn from_name(s: &str) -> Option<Self> {
        match s {
            "balloons-finished" => Some(Signal::BalloonsFinished),
            "cake-finished" => Some(Signal::CakeFinished),
            _ => None,
        }
    }
}

/// Explicit publish/subscribe registry for [`Signal`]s.
///
/// Subscribers are plain values (typically tasks for the orchestrator to run). Each signal is
/// delivered at most once: publishing it again returns nothing, and late subscribers of an
/// already-fired signal are not called back.
#[derive(Clone, Debug)]
pub struct SignalBus<T> {
    subscribers: BTreeMap<Signal, Vec<T>>,
    fired: BTreeSet<Signal>,
}

impl<T> Default for SignalBus<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SignalBus<T> {
    /// Empty bus.
    pub fn new() -> Self {
        Self {
            subscribers: BTreeMap::new(),
            fired: BTreeSet::new(),
        }
    }

    /// Register `subscriber` for `signal`.
    pub fn subscribe(&mut self, signal: Signal, subscriber: T) {
        self.subscribers.entry(signal).or_default().push(subscriber);
    }

    /// Return `true` when `signal` has been published.
    pub fn has_fired(&self, signal: Signal) -> bool {
        self.fired.contains(&signal)
    }

    /// Publish `signal`, returning the subscribers to notify in subscription order.
    ///
    /// Returns `None` when the signal had already fired.
    pub fn publish(&mut self, signal: Signal) -> Option<Vec<T>> {
        if !self.fired.insert(signal) {
            return None;
        }
        Some(self.subscribers.remove(&signal).unwrap_or_default())
    }
}
