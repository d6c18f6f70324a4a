#![forbid(unsafe_code)]

use rm_core::publish::check_ready_to_publish;
use rm_core::{DefaultLabels, EditIntent, Roadmap, RoadmapEditor, build_roadmap_layout};
use serde::Serialize;
use serde_json::{Value, json};

use crate::config::{CliConfig, Command};

/// Result of one command: the JSON document to print and whether the process should exit 0.
#[derive(Debug)]
pub(crate) struct Outcome {
    pub(crate) output: Value,
    pub(crate) success: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SkippedIntent {
    pub(crate) index: usize,
    pub(crate) op: &'static str,
    pub(crate) code: &'static str,
    pub(crate) message: String,
}

pub(crate) fn parse_roadmap(raw: &str) -> Result<Roadmap, String> {
    serde_json::from_str(raw).map_err(|e| format!("invalid roadmap json: {e}"))
}

pub(crate) fn parse_intents(raw: &str) -> Result<Vec<EditIntent>, String> {
    serde_json::from_str(raw).map_err(|e| format!("invalid edits json: {e}"))
}

pub(crate) fn run(config: &CliConfig, roadmap: Roadmap, edits: Option<&str>) -> Result<Outcome, String> {
    match config.command {
        Command::Layout => layout(roadmap, config.editable, config.fresh),
        Command::Apply => {
            let raw = edits.ok_or("apply requires --edits FILE")?;
            apply(roadmap, parse_intents(raw)?, config.editable, config.strict)
        }
        Command::Check => Ok(check(&roadmap)),
    }
}

pub(crate) fn layout(mut roadmap: Roadmap, editable: bool, fresh: bool) -> Result<Outcome, String> {
    if fresh {
        roadmap.layout = None;
    }
    let layout = build_roadmap_layout(&roadmap, editable).map_err(|e| e.to_string())?;
    log::info!(
        "layout roadmap={} nodes={} edges={}",
        roadmap.id,
        layout.nodes.len(),
        layout.edges.len()
    );
    Ok(Outcome {
        output: json!(layout),
        success: true,
    })
}

pub(crate) fn apply(
    roadmap: Roadmap,
    intents: Vec<EditIntent>,
    editable: bool,
    strict: bool,
) -> Result<Outcome, String> {
    let mut editor = RoadmapEditor::open(roadmap, editable, DefaultLabels).map_err(|e| e.to_string())?;
    let mut skipped = Vec::new();

    for (index, intent) in intents.into_iter().enumerate() {
        let op = intent.op();
        if let Err(err) = editor.apply(intent) {
            log::warn!("skipped edit index={index} op={op}: {err}");
            if strict {
                return Err(format!("edit #{index} ({op}) failed: {err}"));
            }
            skipped.push(SkippedIntent {
                index,
                op,
                code: err.code(),
                message: err.to_string(),
            });
        }
    }

    let steps = editor.steps();
    let steps_caption = editor.steps_caption();
    let roadmap = editor.into_roadmap();
    Ok(Outcome {
        output: json!({
            "roadmap": roadmap,
            "steps": steps,
            "stepsCaption": steps_caption,
            "skipped": skipped,
        }),
        success: true,
    })
}

pub(crate) fn check(roadmap: &Roadmap) -> Outcome {
    let check = check_ready_to_publish(roadmap);
    Outcome {
        success: check.ok,
        output: json!(check),
    }
}

pub(crate) fn render(value: &Value, pretty: bool) -> Result<String, String> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    rendered.map_err(|e| format!("failed to render output: {e}"))
}
