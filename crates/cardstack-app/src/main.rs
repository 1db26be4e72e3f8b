mod cli;
mod simulation;

use cardstack_common::ConfigError;
use cardstack_config::CardStackConfig;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;

use simulation::{Simulation, Step};

fn read_config(args: &cli::Args) -> Result<CardStackConfig, ConfigError> {
    match &args.config {
        Some(path) => cardstack_config::load_from_path(path),
        None => cardstack_config::load_config(),
    }
}

/// The config's logging level seeds the filter, so logging starts after the
/// config is read.
fn init_logging(args: &cli::Args, config: &CardStackConfig) {
    let directive = args
        .log_level
        .as_deref()
        .and_then(|level| match level.parse::<Directive>() {
            Ok(directive) => Some(directive),
            Err(e) => {
                eprintln!("invalid log level '{level}' ({e}), using config level");
                None
            }
        })
        .or_else(|| config.logging.level.directive().parse::<Directive>().ok());

    let mut filter = EnvFilter::from_default_env();
    if let Some(directive) = directive {
        filter = filter.add_directive(directive);
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(config.logging.with_target)
        .init();
}

fn main() -> cardstack_common::Result<()> {
    let args = cli::parse();

    let loaded = read_config(&args);
    let config = loaded.as_ref().cloned().unwrap_or_default();
    init_logging(&args, &config);

    tracing::info!("Cardstack v{} starting...", env!("CARGO_PKG_VERSION"));
    if let Some(path) = &args.config {
        tracing::info!("Using config override: {}", path.display());
    }
    if let Err(e) = &loaded {
        tracing::warn!("Config load failed, using defaults: {e}");
    }

    let steps = Step::parse_script(&args.script)?;
    let mut sim = Simulation::new(&config.stack, args.items, args.exit_ms, args.drop_signals)?;
    tracing::info!(
        "Stack ready ({} items, {} visible, {})",
        sim.controller().total(),
        sim.controller().visible(),
        if sim.controller().is_infinite() {
            "infinite"
        } else {
            "finite"
        }
    );

    for report in sim.run_script(&steps) {
        println!("{report}");
    }

    if args.json {
        let json = serde_json::to_string_pretty(&sim.snapshot())
            .map_err(|e| cardstack_common::CardStackError::Other(e.to_string()))?;
        println!("{json}");
    }

    tracing::info!(
        "Done after {} ms of simulated time, end of stack reached {} times",
        sim.now_ms(),
        sim.end_of_stack_count()
    );
    Ok(())
}
