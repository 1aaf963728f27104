//! propsync demo binary.
//!
//! Wires the TOML file adapter and the shutdown hook list to the two demo
//! records, then runs one subcommand.
//!
//! # Architecture
//!
//! ```text
//! main()
//!  └─ TomlFileStorage          -- --config / PROPSYNC_CONFIG / platform path
//!  └─ Demo::new()              -- one ConfigRegistry per record, one exit hook each
//!  └─ subcommand
//!       ├─ show | set | reset  -- single operation
//!       └─ shell               -- line loop until `exit`, EOF or Ctrl-C
//!  └─ ShutdownHooks::run()     -- flushes unsaved ExampleConfig edits
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use propsync::demo::{Demo, ShellOutcome};
use propsync::{ShutdownHooks, TomlFileStorage};

/// Application name used for the platform config directory.
const APP_NAME: &str = "propsync";

/// Keep a config file section in sync with a Rust struct.
#[derive(Debug, Parser)]
#[command(name = "propsync", version, about)]
struct Cli {
    /// Path of the TOML config file.  Defaults to the platform config directory.
    #[arg(long, env = "PROPSYNC_CONFIG", value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print every field of both demo sections.
    Show,
    /// Set one field and write it through.  NAME may be `Section.Field`.
    Set { name: String, value: String },
    /// Overwrite both demo sections with default values.
    Reset,
    /// Interactive loop; type `help` for commands.
    Shell,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialise structured logging.  Level is overridden by `RUST_LOG`.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let storage = match cli.config {
        Some(path) => TomlFileStorage::new(path),
        None => TomlFileStorage::for_app(APP_NAME).context("resolving config path")?,
    };
    info!(path = %storage.path().display(), "using config file");

    let hooks = ShutdownHooks::new();
    let demo = Demo::new(Arc::new(storage), &hooks);

    let result = match cli.command {
        Command::Show => demo.show().map(|out| print!("{out}")).map_err(anyhow::Error::from),
        Command::Set { name, value } => demo
            .set_property(&name, &value)
            .map_err(anyhow::Error::from),
        Command::Reset => demo.reset().map_err(anyhow::Error::from),
        Command::Shell => run_shell(&demo).await,
    };

    // Orderly exit on every path, including a failed command.
    let ran = hooks.run();
    info!(hooks = ran, "propsync stopped");
    result
}

/// Reads commands from stdin until `exit`, end of input or Ctrl-C.
async fn run_shell(demo: &Demo) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    info!("propsync shell ready.  Type `help` for commands, Ctrl-C to exit.");

    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = tokio::signal::ctrl_c() => {
                info!("shutdown signal received");
                break;
            }
        };
        let Some(line) = line else {
            break;
        };

        match demo.execute(&line) {
            Ok(ShellOutcome::Exit) => break,
            Ok(ShellOutcome::Continue(text)) if text.is_empty() => {}
            Ok(ShellOutcome::Continue(text)) => {
                stdout.write_all(format!("{text}\n").as_bytes()).await?;
            }
            Err(e) => error!("{e}"),
        }
    }
    Ok(())
}
