use crate::foundation::core::Millis;
use crate::foundation::error::{FestoonError, FestoonResult};
use crate::foundation::timing::{
    CAKE_FALLBACK_BUFFER, CAKE_FALLBACK_MISSING_FINAL, CAKE_FALLBACK_NO_DURATIONS,
};
use std::collections::BTreeMap;

/// A declarative (SMIL-like) animation element on the stage.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct AnimationElement {
    id: String,
    dur: Option<String>,
    begin_supported: bool,
    began_at: Option<Millis>,
}

impl AnimationElement {
    /// Element with a raw `dur` attribute (if any).
    pub fn new(id: impl Into<String>, dur: Option<String>, begin_supported: bool) -> Self {
        Self {
            id: id.into(),
            dur,
            begin_supported,
            began_at: None,
        }
    }

    /// Element id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Raw `dur` attribute.
    pub fn dur_attr(&self) -> Option<&str> {
        self.dur.as_deref()
    }

    /// Declared duration, if the attribute is present and parses as a clock value.
    pub fn declared_duration(&self) -> Option<Millis> {
        let secs = parse_clock_value(self.dur.as_deref()?)?;
        Some(Millis::from_secs_f64(secs))
    }

    /// When `begin` was last invoked.
    pub fn began_at(&self) -> Option<Millis> {
        self.began_at
    }

    /// Imperatively start the element.
    pub fn begin(&mut self, now: Millis) -> FestoonResult<()> {
        if !self.begin_supported {
            return Err(FestoonError::stage(format!(
                "animation '{}' does not support begin",
                self.id
            )));
        }
        self.began_at = Some(now);
        Ok(())
    }
}

/// Parse a SMIL clock value into seconds.
///
/// Accepts full (`01:02:03.5`) and partial (`02:03.5`) clock values and timecounts with an
/// optional metric (`1.5`, `1.5s`, `800ms`, `2min`, `1h`). Returns `None` for anything else,
/// including `indefinite`.
pub fn parse_clock_value(raw: &str) -> Option<f64> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if s.contains(':') {
        let parts: Vec<&str> = s.split(':').collect();
        let (hours, minutes, seconds) = match parts.as_slice() {
            [m, sec] => (0.0, parse_decimal(m)?, parse_decimal(sec)?),
            [h, m, sec] => (parse_decimal(h)?, parse_decimal(m)?, parse_decimal(sec)?),
            _ => return None,
        };
        if minutes.fract() != 0.0 || minutes >= 60.0 || seconds >= 60.0 || hours.fract() != 0.0 {
            return None;
        }
        return Some(hours * 3600.0 + minutes * 60.0 + seconds);
    }

    let (num, scale) = if let Some(n) = s.strip_suffix("ms") {
        (n, 0.001)
    } else if let Some(n) = s.strip_suffix("min") {
        (n, 60.0)
    } else if let Some(n) = s.strip_suffix('h') {
        (n, 3600.0)
    } else if let Some(n) = s.strip_suffix('s') {
        (n, 1.0)
    } else {
        (s, 1.0)
    };
    Some(parse_decimal(num)? * scale)
}

fn parse_decimal(s: &str) -> Option<f64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit() || b == b'.') {
        return None;
    }
    if s.bytes().filter(|&b| b == b'.').count() > 1 || !s.bytes().any(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse::<f64>().ok()
}

/// Ordered chain of sub-animation ids; the first is begun imperatively, the last ends the chain.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct AnimationChain {
    ids: Vec<String>,
}

impl AnimationChain {
    /// Build a chain from ordered ids.
    pub fn new(ids: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
        }
    }

    /// Ids in chain order.
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// The element begun to start the chain.
    pub fn first_id(&self) -> Option<&str> {
        self.ids.first().map(String::as_str)
    }

    /// The element whose end event completes the chain.
    pub fn final_id(&self) -> Option<&str> {
        self.ids.last().map(String::as_str)
    }
}

/// How a fallback deadline was derived.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "basis", rename_all = "snake_case")]
pub enum FallbackBasis {
    /// Sum of declared chain durations plus the buffer.
    ChainSum {
        /// Summed declared durations (without buffer).
        declared: Millis,
    },
    /// Final element present but no chain element declared a non-zero duration.
    NoDurations,
    /// Final chain element not on the stage.
    MissingFinal,
}

/// Timeout used when the final element's end event may never arrive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct FallbackDeadline {
    /// Delay from arming to firing.
    pub delay: Millis,
    /// How `delay` was chosen.
    #[serde(flatten)]
    pub basis: FallbackBasis,
}

/// Compute the fallback deadline for `chain` against the elements present on the stage.
pub fn fallback_deadline(
    chain: &AnimationChain,
    elements: &BTreeMap<String, AnimationElement>,
) -> FallbackDeadline {
    let final_present = chain
        .final_id()
        .is_some_and(|id| elements.contains_key(id));
    if !final_present {
        return FallbackDeadline {
            delay: CAKE_FALLBACK_MISSING_FINAL,
            basis: FallbackBasis::MissingFinal,
        };
    }

    let declared = chain
        .ids()
        .iter()
        .filter_map(|id| elements.get(id))
        .filter_map(AnimationElement::declared_duration)
        .fold(Millis::ZERO, |acc, d| acc + d);

    if declared == Millis::ZERO {
        return FallbackDeadline {
            delay: CAKE_FALLBACK_NO_DURATIONS,
            basis: FallbackBasis::NoDurations,
        };
    }

    FallbackDeadline {
        delay: declared + CAKE_FALLBACK_BUFFER,
        basis: FallbackBasis::ChainSum { declared },
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stage/animation.rs"]
mod tests;
