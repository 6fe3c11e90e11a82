//! CLI entry point for hotkey-dispatch
//!
//! Provides commands for validating a configuration, listing its
//! hotkeys, and simulating key sequences against it.

use clap::{Parser, Subcommand};
use colored::*;
use hotkey_dispatch::config::{Config, DEFAULT_CONFIG_PATH};
use hotkey_dispatch::core::{
    find_shadowed, parse_key_sequence, Action, DispatchOutcome, HandlerRegistry, HotkeyEngine,
};
use hotkey_dispatch::listener::LogListener;
use hotkey_dispatch::logging;
use std::path::PathBuf;
use std::rc::Rc;

#[derive(Parser)]
#[command(name = "hotkey-dispatch")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the config and report shadowed hotkeys
    Check {
        /// Path to config file
        #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
        config: PathBuf,
    },

    /// List all hotkeys
    List {
        /// Path to config file
        #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
        config: PathBuf,
    },

    /// Dispatch key sequences against the config without touching the keyboard
    Simulate {
        /// Path to config file
        #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
        config: PathBuf,

        /// Key sequences, e.g. "LControl+Escape"
        #[arg(required = true)]
        keys: Vec<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match cli.command {
        Commands::Check { config } => check_config(&config)?,
        Commands::List { config } => list_hotkeys(&config)?,
        Commands::Simulate { config, keys } => simulate(&config, &keys)?,
    }

    Ok(())
}

/// Action that reports its own name when fired
fn echo_action(name: &str) -> Option<Action> {
    let label = name.to_string();
    Some(Action::new(name, move || {
        println!("    {} {}", "▸".green(), label);
        Ok(())
    }))
}

/// Loads the config and builds an engine with the prompt hotkey registered
fn build_engine(config_path: &PathBuf) -> anyhow::Result<HotkeyEngine> {
    println!("{} Loading config: {}", "→".cyan(), config_path.display());
    let config = Config::load(config_path)?;

    let tree = config.build_tree(echo_action)?;
    let registry = Rc::new(HandlerRegistry::new(Rc::new(LogListener)));
    let engine = HotkeyEngine::new(tree, registry);

    let prompt_keys = config.general_sequence()?;
    let prompt_action = echo_action(&config.general.prompt_action)
        .ok_or_else(|| anyhow::anyhow!("Invalid prompt action"))?;
    engine.on_keys(&prompt_keys, prompt_action)?;

    Ok(engine)
}

/// Check config for malformed trees and shadowed hotkeys
fn check_config(config_path: &PathBuf) -> anyhow::Result<()> {
    let engine = build_engine(config_path)?;

    let static_count = engine.tree().map(|t| t.len()).unwrap_or(0);
    println!(
        "{} Found {} static and {} dynamic hotkeys\n",
        "✓".green(),
        static_count,
        engine.registry().len()
    );

    let shadowed = match engine.tree() {
        Some(tree) => find_shadowed(tree, engine.registry()),
        None => Vec::new(),
    };

    if shadowed.is_empty() {
        println!("{} {}", "✓".green().bold(), "No shadowed hotkeys!".bold());
        return Ok(());
    }

    println!(
        "{} Found {} shadowed hotkey{}:\n",
        "✗".red().bold(),
        shadowed.len(),
        if shadowed.len() == 1 { "" } else { "s" }
    );

    for (i, entry) in shadowed.iter().enumerate() {
        println!(
            "{} {}",
            format!("Shadowed {}", i + 1).yellow().bold(),
            format!("{}", entry.sequence).cyan()
        );
        println!("  {} {}", "runs:".dimmed(), join_labels(&entry.tree_handlers));
        println!("  {} {}", "never runs:".dimmed(), join_labels(&entry.registry_handlers));
        println!();
    }

    println!("{}", "⚠ Static hotkeys take precedence over dynamic ones!".yellow());
    std::process::exit(1);
}

/// List all hotkeys in the config
fn list_hotkeys(config_path: &PathBuf) -> anyhow::Result<()> {
    let engine = build_engine(config_path)?;

    println!("{}", "Static hotkeys:".bold());
    if let Some(tree) = engine.tree() {
        for (sequence, handlers) in tree.bindings() {
            let keys = format!("{}", sequence).cyan().bold();
            println!("{} → {}", keys, join_labels(&handlers).green());
        }
    }

    println!("\n{}", "Dynamic hotkeys:".bold());
    let registry = engine.registry();
    for sequence in registry.sequences() {
        let handlers = registry.handlers(&sequence)?;
        let keys = format!("{}", sequence).cyan().bold();
        println!("{} → {}", keys, join_labels(&handlers).green());
    }

    let total = engine.tree().map(|t| t.len()).unwrap_or(0) + registry.len();
    println!("\n{} Total: {} hotkeys", "✓".green(), total);

    Ok(())
}

/// Dispatch each key sequence in turn
fn simulate(config_path: &PathBuf, keys: &[String]) -> anyhow::Result<()> {
    let engine = build_engine(config_path)?;

    for raw in keys {
        let sequence = parse_key_sequence(raw)?;
        println!("{} {}", "⌨".cyan(), format!("{}", sequence).bold());

        match engine.on_key_sequence(&sequence)? {
            DispatchOutcome::Handled { source, invoked } => {
                println!(
                    "  {} {} handler{} from {}",
                    "✓".green(),
                    invoked,
                    if invoked == 1 { "" } else { "s" },
                    source
                );
            }
            DispatchOutcome::Unmatched => {
                println!("  {} {}", "–".dimmed(), "no hotkey bound".dimmed());
            }
        }
    }

    Ok(())
}

fn join_labels(handlers: &[Action]) -> String {
    handlers
        .iter()
        .map(|a| a.label())
        .collect::<Vec<_>>()
        .join(", ")
}
