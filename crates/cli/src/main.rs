#![forbid(unsafe_code)]

mod commands;
mod config;

use config::{CliConfig, ParsedArgs, parse_args, usage};
use std::io::Read;
use std::path::Path;

fn read_source(path: Option<&Path>) -> Result<String, String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .map_err(|e| format!("failed to read {}: {e}", path.display())),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| format!("failed to read stdin: {e}"))?;
            Ok(buf)
        }
    }
}

fn execute(config: &CliConfig) -> Result<bool, String> {
    let raw = read_source(config.input.as_deref())?;
    let roadmap = commands::parse_roadmap(&raw)?;
    let edits = config
        .edits
        .as_deref()
        .map(|path| read_source(Some(path)))
        .transpose()?;

    log::debug!(
        "command={:?} roadmap={} objectives={}",
        config.command,
        roadmap.id,
        roadmap.objectives.len()
    );
    let outcome = commands::run(config, roadmap, edits.as_deref())?;
    println!("{}", commands::render(&outcome.output, config.pretty)?);
    Ok(outcome.success)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = match parse_args() {
        Ok(ParsedArgs::Help) => {
            print!("{}", usage());
            return;
        }
        Ok(ParsedArgs::Version) => {
            println!("rm_layout {}", env!("CARGO_PKG_VERSION"));
            return;
        }
        Ok(ParsedArgs::Run(config)) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    match execute(&config) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    }
}

#[cfg(test)]
mod tests;
