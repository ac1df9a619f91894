//! Cooperative runtime primitives: the virtual-clock timer queue and the signal bus.

/// One-shot completion signals and their subscription registry.
pub mod signal;
/// Deterministic timer queue.
pub mod timers;
