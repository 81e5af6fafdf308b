//! sensorgen CLI entry point.

use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use sensorgen_common::Result;
use sensorgen_config::resolve_config;
use sensorgen_core::cli::{Cli, Commands, GenerateArgs, OutputFormat};
use sensorgen_core::exit_codes::ExitCode;
use sensorgen_core::logging::{init_logging, level_for};
use sensorgen_core::{generate_batch, latest_batch};
use std::path::Path;
use tracing::error;

fn main() {
    let cli = Cli::parse_checked();
    init_logging(level_for(cli.verbose, cli.quiet), cli.log_format);

    let outcome = match &cli.command {
        Some(Commands::Generate(args)) => run_generate(args, cli.format),
        Some(Commands::Latest { output_dir }) => run_latest(output_dir, cli.format),
        None => run_generate(&cli.generate, cli.format),
    };

    let code = match outcome {
        Ok(code) => code,
        Err(e) => {
            error!(error = %e, code = e.code(), "run failed");
            match cli.format {
                OutputFormat::Json => println!(
                    "{}",
                    serde_json::json!({ "error": e.to_string(), "code": e.code() })
                ),
                OutputFormat::Text => eprintln!("error: {}", e),
            }
            ExitCode::for_error(&e)
        }
    };
    std::process::exit(code.as_i32());
}

fn run_generate(args: &GenerateArgs, format: OutputFormat) -> Result<ExitCode> {
    let overrides = args.overrides()?;
    let config = resolve_config(args.config.as_deref(), &overrides)?;

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let summary = generate_batch(&config, &mut rng, Utc::now())?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
        OutputFormat::Text => println!("{}", summary.render_text()),
    }
    Ok(ExitCode::Clean)
}

fn run_latest(output_dir: &Path, format: OutputFormat) -> Result<ExitCode> {
    let latest = latest_batch(output_dir)?;

    match format {
        OutputFormat::Json => {
            let value = match &latest {
                Some((n, path)) => serde_json::json!({ "batch_number": n, "path": path }),
                None => serde_json::json!({ "batch_number": null, "path": null }),
            };
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        OutputFormat::Text => match &latest {
            Some((_, path)) => println!("{}", path.display()),
            None => eprintln!("no batch files in {}", output_dir.display()),
        },
    }

    Ok(if latest.is_some() {
        ExitCode::Clean
    } else {
        ExitCode::NoBatches
    })
}
