// Smilekeys CLI
// Types configured smileys into the focused X11 window

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::info;

use smilekeys_core::{Config, SmileyEngine, X11Session};

/// Smiley keystroke injector for X11
#[derive(Parser, Debug)]
#[command(name = "smilekeys")]
#[command(author = "smilekeys contributors")]
#[command(version)]
#[command(about = "Types configured smileys into the focused window", long_about = None)]
struct Args {
    /// Smiley to type (as named in the configuration)
    name: Option<String>,

    /// TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// List configured smileys and exit
    #[arg(short, long)]
    list: bool,

    /// Validate config and exit
    #[arg(long)]
    check_config: bool,

    /// Stay connected and re-resolve on every keyboard layout change
    #[arg(short, long)]
    watch: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn load_config(args: &Args) -> anyhow::Result<Config> {
    match &args.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("failed to load config from {}", path.display())),
        None => Config::load_default().context("failed to load default config"),
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let config = load_config(&args)?;

    if args.list {
        if config.is_empty() {
            println!("No smileys configured.");
            if let Some(path) = Config::default_path() {
                println!("Expected configuration at {}", path.display());
            }
            return Ok(());
        }
        for (name, text) in config.smileys() {
            println!("{:<16} {}", name, text);
        }
        return Ok(());
    }

    let registry = config.into_registry().context("invalid configuration")?;

    if args.check_config {
        println!("Configuration is valid ({} smileys)", registry.len());
        return Ok(());
    }

    anyhow::ensure!(
        !registry.is_empty(),
        "no smileys configured (try --list to see where the config is expected)"
    );
    anyhow::ensure!(
        args.name.is_some() || args.watch,
        "nothing to do: give a smiley name, or --watch"
    );

    let session = X11Session::connect().context("failed to connect to the X11 display")?;
    let engine = SmileyEngine::new(registry, session);
    engine
        .initialize()
        .context("initial keyboard layout query failed")?;

    if let Some(name) = &args.name {
        let summary = engine.send_named(name)?;
        info!(
            "typed '{}': {} key presses sent, {} symbols skipped",
            name, summary.sent, summary.skipped
        );
    }

    if args.watch {
        info!("watching for keyboard layout changes (Ctrl-C to stop)");
        loop {
            engine
                .with_session(X11Session::wait_mapping_changed)
                .context("lost connection while waiting for layout changes")?;
            engine
                .mapping_changed()
                .context("layout re-resolution failed")?;
        }
    }

    Ok(())
}
