use crate::commands;
use crate::config::{CliConfig, Command, ParsedArgs, parse_args_from};
use serde_json::json;
use std::path::PathBuf;

fn args(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|s| s.to_string()).collect()
}

fn run_config(raw: &[&str]) -> CliConfig {
    match parse_args_from(&args(raw), None, None).expect("parse args") {
        ParsedArgs::Run(config) => config,
        other => panic!("expected run config, got {other:?}"),
    }
}

fn sample_roadmap() -> rm_core::Roadmap {
    commands::parse_roadmap(
        &json!({
            "id": "rm",
            "title": "Rust",
            "objectives": [
                {
                    "id": "o1",
                    "title": "Basics",
                    "orderIndex": 1,
                    "tasks": [{ "id": "t1", "title": "Install", "orderIndex": 1 }]
                },
                { "id": "o2", "title": "Ownership", "orderIndex": 2 }
            ]
        })
        .to_string(),
    )
    .expect("roadmap")
}

#[test]
fn help_and_version_win_over_everything() {
    assert_eq!(
        parse_args_from(&args(&["layout", "--bogus", "-h"]), None, None),
        Ok(ParsedArgs::Help)
    );
    assert_eq!(
        parse_args_from(&args(&["--version"]), None, None),
        Ok(ParsedArgs::Version)
    );
}

#[test]
fn parses_layout_flags() {
    let config = run_config(&["layout", "--input", "rm.json", "--fresh", "--pretty"]);
    assert_eq!(config.command, Command::Layout);
    assert_eq!(config.input, Some(PathBuf::from("rm.json")));
    assert!(config.fresh);
    assert!(config.pretty);
    assert!(!config.editable);
}

#[test]
fn dash_input_means_stdin() {
    assert_eq!(run_config(&["check", "--input", "-"]).input, None);
}

#[test]
fn env_defaults_can_be_overridden() {
    let parsed = parse_args_from(&args(&["layout"]), Some("yes".to_string()), Some("0".to_string()));
    let Ok(ParsedArgs::Run(config)) = parsed else {
        panic!("expected run config");
    };
    assert!(config.editable);
    assert!(!config.pretty);

    let parsed = parse_args_from(
        &args(&["layout", "--read-only"]),
        Some("1".to_string()),
        None,
    );
    let Ok(ParsedArgs::Run(config)) = parsed else {
        panic!("expected run config");
    };
    assert!(!config.editable);
}

#[test]
fn rejects_bad_invocations() {
    let err = parse_args_from(&args(&[]), None, None).unwrap_err();
    assert!(err.starts_with("missing command"));
    let err = parse_args_from(&args(&["explode"]), None, None).unwrap_err();
    assert_eq!(err, "unknown command: explode");
    let err = parse_args_from(&args(&["apply"]), None, None).unwrap_err();
    assert_eq!(err, "apply requires --edits FILE");
    let err = parse_args_from(&args(&["layout", "--input"]), None, None).unwrap_err();
    assert_eq!(err, "--input requires FILE");
    let err = parse_args_from(&args(&["layout", "check"]), None, None).unwrap_err();
    assert_eq!(err, "unexpected argument: check");
}

#[test]
fn layout_command_emits_nodes_and_edges() {
    let outcome = commands::layout(sample_roadmap(), true, false).expect("layout");
    assert!(outcome.success);
    assert_eq!(outcome.output["nodes"].as_array().map(Vec::len), Some(3));
    assert_eq!(outcome.output["edges"].as_array().map(Vec::len), Some(2));
    assert_eq!(outcome.output["nodes"][0]["type"], "Objective");
    assert_eq!(outcome.output["nodes"][0]["data"]["isEditable"], true);
}

#[test]
fn fresh_layout_ignores_persisted_positions() {
    let mut roadmap = sample_roadmap();
    let mut persisted = rm_core::build_roadmap_layout(&roadmap, false).expect("layout");
    persisted.nodes[0].position = rm_core::Position::new(123.0, 456.0);
    roadmap.layout = Some(persisted);

    let kept = commands::layout(roadmap.clone(), false, false).expect("layout");
    assert_eq!(kept.output["nodes"][0]["position"]["x"], 123.0);
    let fresh = commands::layout(roadmap, false, true).expect("layout");
    assert_eq!(fresh.output["nodes"][0]["position"]["x"], 0.0);
}

#[test]
fn apply_reports_skipped_intents() {
    let intents = commands::parse_intents(
        &json!([
            { "op": "rename_node", "id": "nope", "title": "x" },
            { "op": "disconnect", "edgeId": "e-o1-t1" },
            { "op": "connect", "source": "o2", "sourceHandle": "right", "target": "t1", "targetHandle": "left" }
        ])
        .to_string(),
    )
    .expect("intents");

    let outcome = commands::apply(sample_roadmap(), intents, true, false).expect("apply");
    assert!(outcome.success);
    assert_eq!(outcome.output["steps"], 1);
    assert_eq!(outcome.output["stepsCaption"], "1 step");

    let skipped = outcome.output["skipped"].as_array().expect("skipped array");
    assert_eq!(skipped.len(), 1);
    assert_eq!(skipped[0]["index"], 0);
    assert_eq!(skipped[0]["op"], "rename_node");
    assert_eq!(skipped[0]["code"], "UNKNOWN_NODE");

    let o2_tasks = &outcome.output["roadmap"]["objectives"][1]["tasks"];
    assert_eq!(o2_tasks[0]["id"], "t1");
    assert!(outcome.output["roadmap"]["layout"]["nodes"].is_array());
}

#[test]
fn strict_apply_fails_on_first_rejection() {
    let intents = commands::parse_intents(
        &json!([{ "op": "delete_node", "id": "ghost" }]).to_string(),
    )
    .expect("intents");
    let err = commands::apply(sample_roadmap(), intents, true, true).unwrap_err();
    assert_eq!(err, "edit #0 (delete_node) failed: unknown node (id=ghost)");
}

#[test]
fn check_flags_unready_roadmap() {
    let ready = commands::check(&sample_roadmap());
    assert!(ready.success);
    assert_eq!(ready.output["ok"], true);

    let mut roadmap = sample_roadmap();
    roadmap.title.clear();
    let outcome = commands::check(&roadmap);
    assert!(!outcome.success);
    assert_eq!(outcome.output["errors"][0]["code"], "ROADMAP_TITLE_EMPTY");
}

#[test]
fn invalid_json_is_reported() {
    let err = commands::parse_roadmap("{not json").unwrap_err();
    assert!(err.starts_with("invalid roadmap json:"));
    let err = commands::parse_intents(r#"[{"op":"teleport"}]"#).unwrap_err();
    assert!(err.starts_with("invalid edits json:"));
}
