use crate::{commands::Commands, error::CliError};
use clap::Parser;
use connectors::sql::postgres::{ConnectionParams, PgAdapter};
use engine::{
    config::{Environment, PipelineConfig},
    runner,
    stages::{check, load, transform, validate},
};
use std::{path::Path, time::Duration};
use tracing::{Level, info};

mod commands;
mod env;
mod error;
mod output;

#[derive(Parser)]
#[command(name = "hopper", version = "0.1.0", about = "CSV to Postgres ingestion pipeline")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    // Initialize logger
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check { config } => {
            let config = PipelineConfig::from_file(Path::new(&config))?;
            check::run(&config)?;
        }
        Commands::Validate { config } => {
            let config = PipelineConfig::from_file(Path::new(&config))?;
            validate::run(&config)?;
        }
        Commands::Transform { config } => {
            let config = PipelineConfig::from_file(Path::new(&config))?;
            transform::run(&config)?;
        }
        Commands::Load { config, env_file } => {
            let config = PipelineConfig::from_file(Path::new(&config))?;
            let env = capture_environment(env_file).await?;
            load::run(&config, &env).await?;
        }
        Commands::Run {
            config,
            env_file,
            output,
        } => {
            info!("Running ingestion pipeline: {}, output: {:?}", config, output);

            let config = PipelineConfig::from_file(Path::new(&config))?;
            let env = capture_environment(env_file).await?;
            let summary = runner::run(&config, &env).await?;

            match output {
                Some(path) => output::write_report(&summary, path).await?,
                None => output::print_report(&summary)?,
            }
        }
        Commands::TestConn { env_file } => {
            let env = capture_environment(env_file).await?;
            let params = env.connection_params(Duration::from_secs(30))?;
            test_connection(&params).await?;
        }
    }

    Ok(())
}

async fn capture_environment(env_file: Option<String>) -> Result<Environment, CliError> {
    let mut env = Environment::capture();
    if let Some(path) = env_file {
        env::apply_env_file(&mut env, &path).await?;
    }
    Ok(env)
}

async fn test_connection(params: &ConnectionParams) -> Result<(), CliError> {
    info!(endpoint = %params.endpoint(), "Testing Postgres connection");
    let adapter = PgAdapter::connect(params).await?;
    adapter.ping().await?;
    info!("Connection OK");
    Ok(())
}
