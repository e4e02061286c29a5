//! Radio browser demo: coordinator-driven navigation on a terminal stack.

mod application;
mod factory;
mod model;
mod pages;

use anyhow::{bail, Context};
use navflow::CoordinatorConfig;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

use crate::application::Application;

const HELP: &str = "\
navflow-demo

USAGE:
  navflow-demo [OPTIONS]

OPTIONS:
  --config <PATH>   Coordinator config (TOML)
  --log <PATH>      Log file [default: <tmp>/navflow-demo.log]
  -h, --help        Print help

KEYS:
  Up/Down, k/j      Select
  Enter             Open
  Esc, Backspace    Back / close dialog
  q                 Quit
";

struct Args {
    config: Option<PathBuf>,
    log: PathBuf,
}

fn parse_args() -> anyhow::Result<Option<Args>> {
    let mut pargs = pico_args::Arguments::from_env();
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        return Ok(None);
    }

    let args = Args {
        config: pargs.opt_value_from_str("--config")?,
        log: pargs
            .opt_value_from_str("--log")?
            .unwrap_or_else(|| std::env::temp_dir().join("navflow-demo.log")),
    };

    let rest = pargs.finish();
    if !rest.is_empty() {
        bail!("unexpected arguments: {rest:?}");
    }
    Ok(Some(args))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let Some(args) = parse_args()? else {
        return Ok(());
    };

    // stdout belongs to the terminal UI
    let log = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&args.log)
        .with_context(|| format!("failed to open log file {}", args.log.display()))?;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("navflow=debug,navflow_demo=debug"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(log))
        .with_ansi(false)
        .init();

    let config = match &args.config {
        Some(path) => CoordinatorConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => CoordinatorConfig::default(),
    };
    tracing::debug!(?config, "navflow-demo v{} starting", env!("CARGO_PKG_VERSION"));

    Application::new(config).run().await
}
