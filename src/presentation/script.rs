use crate::foundation::core::Millis;
use crate::foundation::error::{FestoonError, FestoonResult};
use crate::presentation::{Input, Presentation};
use crate::runtime::signal::Signal;
use crate::stage::control::ControlId;
use std::str::FromStr;

/// An [`Input`] to deliver at a fixed virtual time.
///
/// Textual form: `<ms>:click:<control>`, `<ms>:key:<name>`, `<ms>:signal:<signal>` or
/// `<ms>:end:<element id>`.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ScriptedInput {
    /// Delivery time.
    pub at: Millis,
    /// What to deliver.
    pub input: Input,
}

impl FromStr for ScriptedInput {
    type Err = FestoonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.trim().splitn(3, ':');
        let (Some(at), Some(kind), Some(arg)) = (parts.next(), parts.next(), parts.next()) else {
            return Err(FestoonError::validation(format!(
                "scripted input '{s}' is not '<ms>:<kind>:<arg>'"
            )));
        };
        let at = at
            .parse::<u64>()
            .map(Millis)
            .map_err(|e| FestoonError::validation(format!("scripted input '{s}': time: {e}")))?;
        if arg.is_empty() {
            return Err(FestoonError::validation(format!(
                "scripted input '{s}' has an empty argument"
            )));
        }
        let input = match kind {
            "click" => Input::Click {
                control: ControlId::from_name(arg).ok_or_else(|| {
                    FestoonError::validation(format!("unknown control '{arg}'"))
                })?,
            },
            "key" => Input::KeyDown {
                key: arg.to_owned(),
            },
            "signal" => Input::Signal {
                signal: Signal::from_name(arg)
                    .ok_or_else(|| FestoonError::validation(format!("unknown signal '{arg}'")))?,
            },
            "end" => Input::AnimationEnd { id: arg.to_owned() },
            other => {
                return Err(FestoonError::validation(format!(
                    "unknown input kind '{other}' (expected click, key, signal or end)"
                )));
            }
        };
        Ok(Self { at, input })
    }
}

impl Presentation {
    /// Run to `until`, delivering each scripted input at its time.
    ///
    /// Inputs are delivered in time order; ties keep their order in `script`. Inputs scheduled
    /// after `until` are dropped.
    pub fn run_script(&mut self, script: &[ScriptedInput], until: Millis) -> FestoonResult<()> {
        let mut ordered: Vec<&ScriptedInput> = script.iter().collect();
        ordered.sort_by_key(|s| s.at);
        for s in ordered {
            if s.at > until {
                tracing::debug!(at = %s.at, "scripted input past the end of the run, dropped");
                continue;
            }
            self.run_until(s.at)?;
            self.dispatch(s.input.clone())?;
        }
        self.run_until(until)
    }
}
