//! Casement - headless driver for the floating window host
//!
//! Loads configuration, replays scripted event streams against
//! `casement-core` and prints the resulting actions and scene, or runs the
//! terminal window's content interactively on stdin.
//!
//! # Modes
//! - `--script <file>`: replay a JSON event script
//! - `--terminal`: interactive session with the terminal window
//! - `--validate` / `--print-default-config`: configuration tooling
//!
//! Without a mode the default scene is drawn once.

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use casement_core::config::Config;
use casement_core::{Host, WindowId};
use clap::Parser;
use tracing::{debug, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod draw;
mod repl;
mod replay;

use draw::SceneText;
use replay::Script;

/// Casement - a draggable, resizable floating window host
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Run in debug mode with verbose logging
    #[arg(short, long)]
    debug: bool,

    /// Validate configuration and exit
    #[arg(long)]
    validate: bool,

    /// Print default configuration to stdout
    #[arg(long)]
    print_default_config: bool,

    /// Replay a JSON event script
    #[arg(short, long, conflicts_with = "terminal")]
    script: Option<PathBuf>,

    /// Interact with the terminal window on stdin
    #[arg(short, long)]
    terminal: bool,

    /// Id of the window `--terminal` talks to
    #[arg(long, default_value = "terminal")]
    window: String,

    /// Print actions and the scene as JSON lines
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging; RUST_LOG overrides the flag
    let default_level = if args.debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .compact()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Casement v{} starting...", env!("CARGO_PKG_VERSION"));

    // Handle special commands
    if args.print_default_config {
        println!("{}", Config::default_config_string());
        return Ok(());
    }

    if args.validate {
        let config = Config::load(args.config.as_deref()).context("Failed to load config")?;
        config.validate().context("Invalid configuration")?;
        info!("Configuration is valid");
        return Ok(());
    }

    // Load configuration
    let config = match Config::load(args.config.as_deref()) {
        Ok(cfg) => {
            info!("Configuration loaded successfully");
            cfg
        },
        Err(e) => {
            warn!("Failed to load config: {}, using defaults", e);
            Config::default()
        },
    };
    if let Err(e) = config.validate() {
        warn!("Configuration problem: {}", e);
    }

    let mut host = Host::new(config);
    for window in host.descriptors() {
        debug!(
            "{} {:?} at {},{} {}x{}",
            window.id,
            window.state,
            window.position.x,
            window.position.y,
            window.size.width,
            window.size.height
        );
    }

    if args.terminal {
        let id = WindowId::from(args.window);
        return repl::run(&mut host, &id, io::stdin().lock(), io::stdout().lock());
    }

    if let Some(path) = &args.script {
        let script = Script::load(path)?;
        info!("Replaying {} events from {}", script.events.len(), path.display());
        for step in replay::run(&mut host, &script) {
            if args.json {
                println!("{}", serde_json::to_string(&step)?);
            } else {
                println!("{step}");
            }
        }
    }

    let scene = host.render();
    if args.json {
        println!("{}", serde_json::to_string(&scene)?);
    } else {
        print!("{}", SceneText(&scene));
    }

    Ok(())
}
