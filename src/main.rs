//! lbm - Main entry point
//!
//! Thin command-line front end over the path engine. Each subcommand prints
//! exactly one resulting string on stdout.

use std::path::Path;

use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use lbm::cli::{Cli, Commands};
use lbm::{Engine, EngineConfig, OutputArgs, VariableTable};

/// Initialize the tracing subscriber. `RUST_LOG` overrides the default level.
fn init_logger(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Main application entry point
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse_args();
    init_logger(cli.verbose);
    debug!("CLI arguments parsed");

    let engine = match build_engine(&cli) {
        Ok(engine) => engine,
        Err(e) => {
            error!("Failed to load configuration: {:#}", e);
            eprintln!("✗ Failed to load configuration: {:#}", e);
            std::process::exit(1);
        }
    };
    info!("Using {} path convention", engine.style());

    let result: Result<String, Box<dyn std::error::Error>> = match &cli.command {
        Commands::Interp {
            template,
            vars,
            vars_file,
        } => run_interp(&engine, template, vars, vars_file.as_deref()),
        Commands::Canonicalize { path, base } => run_canonicalize(&engine, path, base.as_deref()),
        Commands::Resolve {
            template,
            path,
            root,
        } => {
            let args = OutputArgs {
                path: path.clone(),
                root: root.clone(),
            };
            engine.resolve_output_path(template, &args).map_err(Into::into)
        }
    };

    match result {
        Ok(output) => {
            println!("{}", output);
            Ok(())
        }
        Err(e) => {
            error!("Command failed: {}", e);
            eprintln!("✗ {}", e);
            std::process::exit(1);
        }
    }
}

/// Load the config file (if any), apply `--style`, and validate.
fn build_engine(cli: &Cli) -> anyhow::Result<Engine> {
    let mut config = match &cli.config {
        Some(path) => {
            info!("Loading engine configuration from: {:?}", path);
            EngineConfig::load_from_file(path)?
        }
        None => EngineConfig::default(),
    };
    if let Some(style) = cli.style {
        config.style = style;
    }
    config.validate()?;
    Ok(Engine::new(config))
}

fn run_interp(
    engine: &Engine,
    template: &str,
    bindings: &[(String, String)],
    vars_file: Option<&Path>,
) -> Result<String, Box<dyn std::error::Error>> {
    let mut vars = match vars_file {
        Some(path) => {
            info!("Loading variables from: {:?}", path);
            VariableTable::load_from_file(path)?
        }
        None => VariableTable::new(),
    };
    vars.extend(bindings.iter().cloned());

    Ok(engine.interpolate(template, &vars)?)
}

/// Canonicalize against `--base`, or the working directory like build scripts see it.
fn run_canonicalize(
    engine: &Engine,
    path: &str,
    base: Option<&str>,
) -> Result<String, Box<dyn std::error::Error>> {
    let base = match base {
        Some(base) => base.to_string(),
        None => std::env::current_dir()?.to_string_lossy().into_owned(),
    };
    Ok(engine.canonicalize_path(path, &base))
}
