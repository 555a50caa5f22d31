mod cli;
mod config;
mod presenter;
mod request;

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use convert_engine::ConversionWorkflow;
use convert_logging::{convert_error, convert_info};
use log::LevelFilter;

use crate::cli::Args;
use crate::config::AppConfig;
use crate::presenter::TerminalPresenter;
use crate::request::build_request;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();
    match run(args).await {
        Ok(code) => code,
        Err(err) => {
            convert_error!("{:#}", err);
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> anyhow::Result<ExitCode> {
    let mut config = AppConfig::load(&args.config)?;
    config.apply_overrides(&args);
    config.validate()?;

    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    convert_logging::initialize(config.log.into(), level);

    let request = build_request(args.command)?;
    let workflow = ConversionWorkflow::new(&config.client_settings(), config.poll_settings())
        .context("setting up the backend client")?;
    let presenter = TerminalPresenter::stdout();

    convert_info!("Submitting to {}", config.api_url);
    match workflow.run(request, &presenter).await {
        Ok(links) => {
            convert_info!("Finished with {} result links", links.len());
            Ok(ExitCode::SUCCESS)
        }
        // Already rendered by the presenter.
        Err(err) => {
            convert_error!("Workflow failed: {}", err);
            Ok(ExitCode::FAILURE)
        }
    }
}
