//! Fixed timing constants of the presentation. None of these are configurable.

use crate::foundation::core::Millis;

/// How long the intro scene is filled with hearts before moving on.
pub const HEARTS_WINDOW: Millis = Millis(10_000);
/// Intro fade-out between the end of the hearts window and the balloon scene.
pub const INTRO_LEAVE: Millis = Millis(600);
/// Delay between starting the balloon flow and revealing its call-to-action.
pub const BALLOON_CTA_DELAY: Millis = Millis(11_000);

/// Heart emitter cadence.
pub const HEART_TICK: Millis = Millis(350);
/// Number of hearts spawned immediately on start.
pub const HEART_BURST_COUNT: u64 = 6;
/// Spacing between the immediate hearts.
pub const HEART_BURST_SPACING: Millis = Millis(120);
/// Extra time a particle stays around after its rise duration.
pub const PARTICLE_RETIRE_BUFFER: Millis = Millis(200);

/// Delay before switching to the cake scene, letting the balloon canvas fade.
pub const CAKE_SCENE_DELAY: Millis = Millis(200);
/// Delay between showing the cake scene and beginning its animation chain.
pub const CAKE_BEGIN_DELAY: Millis = Millis(250);
/// Added to the summed chain duration when computing the fallback deadline.
pub const CAKE_FALLBACK_BUFFER: Millis = Millis(300);
/// Fallback when the final element exists but no chain element declares a duration.
pub const CAKE_FALLBACK_NO_DURATIONS: Millis = Millis(4_500);
/// Fallback when the final chain element is missing.
pub const CAKE_FALLBACK_MISSING_FINAL: Millis = Millis(3_000);

/// Music volume applied before the first playback attempt.
pub const MUSIC_VOLUME: f64 = 0.5;
