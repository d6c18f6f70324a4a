#![forbid(unsafe_code)]

use std::path::PathBuf;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Command {
    Layout,
    Apply,
    Check,
}

impl Command {
    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "layout" => Some(Self::Layout),
            "apply" => Some(Self::Apply),
            "check" => Some(Self::Check),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct CliConfig {
    pub(crate) command: Command,
    /// `None` reads the roadmap from stdin.
    pub(crate) input: Option<PathBuf>,
    pub(crate) edits: Option<PathBuf>,
    pub(crate) editable: bool,
    pub(crate) fresh: bool,
    pub(crate) pretty: bool,
    pub(crate) strict: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum ParsedArgs {
    Help,
    Version,
    Run(CliConfig),
}

pub(crate) fn usage() -> &'static str {
    "rm_layout — lay out and edit learning roadmaps as node/edge graphs\n\n\
USAGE:\n\
  rm_layout layout [--input FILE] [--editable] [--fresh] [--pretty]\n\
  rm_layout apply  [--input FILE] --edits FILE [--editable] [--strict] [--pretty]\n\
  rm_layout check  [--input FILE] [--pretty]\n\n\
NOTES:\n\
  - The roadmap is read as JSON from FILE, or from stdin when --input is absent or `-`.\n\
  - `layout` reuses a persisted layout unless --fresh is given.\n\
  - `apply` replays a JSON array of edit intents; rejected ones are reported, not fatal,\n\
    unless --strict is set.\n\
  - `check` exits 1 when the roadmap is not ready to publish.\n\
  - RM_EDITABLE / RM_PRETTY set defaults; RUST_LOG controls logging (default: warn).\n"
}

pub(crate) fn env_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn env_flag(value: Option<String>) -> bool {
    value.is_some_and(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
}

pub(crate) fn parse_args() -> Result<ParsedArgs, String> {
    let args = std::env::args().skip(1).collect::<Vec<_>>();
    parse_args_from(&args, env_var("RM_EDITABLE"), env_var("RM_PRETTY"))
}

pub(crate) fn parse_args_from(
    args: &[String],
    editable_env: Option<String>,
    pretty_env: Option<String>,
) -> Result<ParsedArgs, String> {
    if args.iter().any(|a| a == "-h" || a == "--help") {
        return Ok(ParsedArgs::Help);
    }
    if args.iter().any(|a| a == "-V" || a == "--version") {
        return Ok(ParsedArgs::Version);
    }

    let mut command: Option<Command> = None;
    let mut input: Option<PathBuf> = None;
    let mut edits: Option<PathBuf> = None;
    let mut editable = env_flag(editable_env);
    let mut fresh = false;
    let mut pretty = env_flag(pretty_env);
    let mut strict = false;

    let mut i = 0usize;
    while i < args.len() {
        let a = args[i].as_str();
        match a {
            "--input" => {
                i += 1;
                let v = args.get(i).ok_or("--input requires FILE")?;
                input = (v != "-").then(|| PathBuf::from(v));
            }
            "--edits" => {
                i += 1;
                let v = args.get(i).ok_or("--edits requires FILE")?;
                edits = Some(PathBuf::from(v));
            }
            "--editable" => editable = true,
            "--read-only" => editable = false,
            "--fresh" => fresh = true,
            "--pretty" => pretty = true,
            "--strict" => strict = true,
            _ if a.starts_with('-') => {
                return Err(format!("unknown flag: {a}\n\n{}", usage()));
            }
            _ => {
                if command.is_some() {
                    return Err(format!("unexpected argument: {a}"));
                }
                command = Some(Command::parse(a).ok_or_else(|| format!("unknown command: {a}"))?);
            }
        }
        i += 1;
    }

    let command = command.ok_or_else(|| format!("missing command\n\n{}", usage()))?;
    if command == Command::Apply && edits.is_none() {
        return Err("apply requires --edits FILE".to_string());
    }

    Ok(ParsedArgs::Run(CliConfig {
        command,
        input,
        edits,
        editable,
        fresh,
        pretty,
        strict,
    }))
}
