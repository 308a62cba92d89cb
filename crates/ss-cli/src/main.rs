//! SplitScreener headless driver.
//!
//! Loads a geometry config, runs a command script against the controller
//! with the node-graph engine and the in-memory preview, then prints a JSON
//! summary of the resulting screens.

mod script;
mod summary;

use anyhow::{Context, Result};
use clap::Parser;
use script::ScriptLine;
use ss_core::GeometryConfig;
use ss_editor::{Command, Controller};
use ss_engine::{EngineSession, NodeGraphEngine};
use ss_render::DisplayList;
use std::io::Read;
use std::path::PathBuf;
use summary::{LineError, Summary};

/// Run SplitScreener command scripts without a UI
#[derive(Parser)]
#[command(name = "splitscreener")]
#[command(about = "Drive the SplitScreener grid and screen controller from a script")]
struct Cli {
    /// Geometry config as JSON (built-in defaults when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Command script, one command per line (default: stdin)
    #[arg(short, long)]
    script: Option<PathBuf>,

    /// Log every synchronization step
    #[arg(short, long)]
    verbose: bool,

    /// Stop at the first rejected command instead of reporting it
    #[arg(long)]
    strict: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(cli.config.as_ref())?;
    let source = read_script(cli.script.as_ref())?;
    let lines = script::parse_script(&source).map_err(anyhow::Error::msg)?;

    let engine = NodeGraphEngine::new(EngineSession::open("splitscreener"));
    let mut ctl = Controller::from_config(&config, engine, DisplayList::default())
        .context("failed to start controller")?;

    let errors = run(&mut ctl, &lines, cli.strict)?;
    let summary = Summary::collect(&ctl, errors);
    println!("{}", serde_json::to_string_pretty(&summary)?);

    let (_, mut engine, _) = ctl.into_parts();
    engine.session_mut().close()?;
    Ok(())
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn load_config(path: Option<&PathBuf>) -> Result<GeometryConfig> {
    let Some(path) = path else {
        return Ok(GeometryConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read config {}", path.display()))?;
    GeometryConfig::from_json(&text).with_context(|| format!("invalid config {}", path.display()))
}

fn read_script(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("cannot read script {}", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("cannot read script from stdin")?;
            Ok(text)
        }
    }
}

/// Execute every line in order. Rejected commands are collected, or abort
/// the run when `strict`.
fn run(
    ctl: &mut Controller<NodeGraphEngine, DisplayList>,
    lines: &[ScriptLine],
    strict: bool,
) -> Result<Vec<LineError>> {
    let mut errors = Vec::new();
    for line in lines {
        let outcome = Command::from_key(&line.key, line.value).and_then(|cmd| ctl.do_command(cmd));
        match outcome {
            Ok(outcome) => log::debug!("line {}: {} -> {outcome:?}", line.line, line.key),
            Err(e) if strict => {
                return Err(e).with_context(|| format!("line {}: `{}` rejected", line.line, line.key));
            }
            Err(e) => {
                log::warn!("line {}: {e}", line.line);
                errors.push(LineError {
                    line: line.line,
                    message: e.to_string(),
                });
            }
        }
    }
    Ok(errors)
}
