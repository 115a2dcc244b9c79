// Modswap CLI
// Replays a script of host events through the modifier swap behavior

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;

use modswap_core::config::parser::default_config_content;
use modswap_core::{parse_script, ConfigError, HostBus, ModSwapBehavior, ModSwapConfig};

/// Toggleable modifier swap for keyboard event pipelines
#[derive(Parser, Debug)]
#[command(name = "modswap")]
#[command(version)]
#[command(about = "Replay keyboard events through a toggleable modifier swap", long_about = None)]
struct Args {
    /// TOML configuration file (default: ~/.config/modswap/config.toml)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Event script to replay; reads stdin when omitted
    #[arg(short, long, value_name = "SCRIPT")]
    script: Option<PathBuf>,

    /// Start with swapping enabled
    #[arg(long)]
    start_active: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Validate config and exit
    #[arg(long)]
    check_config: bool,

    /// Print an example configuration and exit
    #[arg(long)]
    print_default_config: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    if args.print_default_config {
        print!("{}", default_config_content());
        return Ok(());
    }

    let (mut config, mut problems) = load_config(args.config.as_deref())?;
    if args.start_active {
        config.start_active = true;
    }

    let (behavior, rejected) = ModSwapBehavior::from_config(&config);
    problems.extend(rejected);

    if args.check_config {
        report_config(&behavior, &problems);
        if !problems.is_empty() {
            bail!("{} swap entries rejected", problems.len());
        }
        return Ok(());
    }

    let script = read_script(args.script.as_deref())?;
    let events = parse_script(&script)?;
    log::debug!("replaying {} events", events.len());

    let mut bus = HostBus::new(behavior);
    for event in events {
        if let Some(delivered) = bus.dispatch(event) {
            println!("{}", delivered);
        }
    }

    log::debug!(
        "done: {} events delivered, swapping {}",
        bus.delivered().len(),
        if bus.behavior().is_active() {
            "active"
        } else {
            "inactive"
        }
    );
    Ok(())
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

fn load_config(path: Option<&Path>) -> Result<(ModSwapConfig, Vec<ConfigError>)> {
    match path {
        Some(path) => ModSwapConfig::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => ModSwapConfig::load_default().context("failed to load default config"),
    }
}

fn read_script(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read script {}", path.display())),
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read script from stdin")?;
            Ok(buf)
        }
    }
}

fn report_config(behavior: &ModSwapBehavior, problems: &[ConfigError]) {
    let registry = behavior.registry();
    println!(
        "{} of {} swap slots in use, starting {}",
        registry.len(),
        registry.capacity(),
        if behavior.is_active() {
            "active"
        } else {
            "inactive"
        }
    );
    for unit in registry.iter() {
        println!("  {}", unit.config());
    }
    if problems.is_empty() {
        println!("Configuration is valid");
    } else {
        for problem in problems {
            println!("  rejected: {}", problem);
        }
    }
}
