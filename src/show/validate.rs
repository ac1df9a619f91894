use crate::show::model::{SHOW_VERSION, ShowDef};
use crate::stage::animation::parse_clock_value;
use crate::stage::scene::SceneId;
use std::collections::HashSet;
use std::fmt;

/// Every problem found in a show, each rendered as `$.<path>: <message>`.
#[derive(Debug, Clone, Default)]
pub(crate) struct ShowProblems {
    pub(crate) errors: Vec<String>,
}

impl ShowProblems {
    fn push(&mut self, path: impl fmt::Display, message: impl fmt::Display) {
        self.errors.push(format!("$.{path}: {message}"));
    }
}

impl fmt::Display for ShowProblems {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.errors.join("\n"))
    }
}

pub(crate) fn validate_show(def: &ShowDef) -> Result<(), ShowProblems> {
    let mut problems = ShowProblems::default();

    if def.version != SHOW_VERSION {
        problems.push("version", format_args!("version must be \"{SHOW_VERSION}\""));
    }

    let stage = &def.stage;
    let mut seen_scenes = HashSet::new();
    for (i, s) in stage.scenes.iter().enumerate() {
        if !seen_scenes.insert(*s) {
            problems.push(format_args!("stage.scenes[{i}]"), format_args!("duplicate scene '{s}'"));
        }
    }
    // The orchestrator switches to these unconditionally.
    for required in [SceneId::Intro, SceneId::Balloons] {
        if !seen_scenes.contains(&required) {
            problems.push("stage.scenes", format_args!("scene '{required}' is required"));
        }
    }

    let mut seen_controls = HashSet::new();
    for (i, c) in stage.controls.iter().enumerate() {
        if !seen_controls.insert(c.id) {
            problems.push(
                format_args!("stage.controls[{i}]"),
                format_args!("duplicate control '{}'", c.id),
            );
        }
    }

    let mut seen_elements = HashSet::new();
    for (i, el) in stage.cake.elements.iter().enumerate() {
        let path = format!("stage.cake.elements[{i}]");
        if el.id.trim().is_empty() {
            problems.push(&path, "animation id must be non-empty");
        } else if !seen_elements.insert(el.id.as_str()) {
            problems.push(&path, format_args!("duplicate animation id '{}'", el.id));
        }
        if let Some(dur) = el.dur.as_deref()
            && parse_clock_value(dur).is_none()
        {
            problems.push(
                format_args!("{path}.dur"),
                format_args!("'{dur}' is not a clock value"),
            );
        }
    }

    let mut seen_chain = HashSet::new();
    for (i, id) in stage.cake.chain.iter().enumerate() {
        let path = format!("stage.cake.chain[{i}]");
        if id.trim().is_empty() {
            problems.push(&path, "chain id must be non-empty");
        } else if !seen_chain.insert(id.as_str()) {
            problems.push(&path, format_args!("duplicate chain id '{id}'"));
        }
    }

    if problems.errors.is_empty() {
        Ok(())
    } else {
        Err(problems)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/show/validate.rs"]
mod tests;
