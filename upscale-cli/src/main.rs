// ABOUTME: Main entry point for the upscale CLI application
// ABOUTME: Parses arguments, loads config, runs the requested command, and reports errors

use anyhow::Result;
use clap::{CommandFactory, Parser};
use std::env;
use upscale_cli::cli::{Cli, Commands};
use upscale_cli::cli_output::CliOutput;
use upscale_cli::completions::generate_completions;
use upscale_cli::config::Config;
use upscale_cli::output::should_show_progress;
use upscale_cli::upscale::{self, RunOptions};
use upscale_sdk::UpscaleError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let output = CliOutput::with_color(use_color(&cli));

    if let Err(err) = run(cli, &output).await {
        output.error(&format!("{:#}", err));
        if let Some(help) = err
            .downcast_ref::<UpscaleError>()
            .and_then(UpscaleError::help_text)
        {
            output.hint(help);
        }
        std::process::exit(1);
    }
}

fn use_color(cli: &Cli) -> bool {
    if cli.force_color {
        return true;
    }
    !cli.no_color
        && env::var("NO_COLOR").is_err()
        && env::var("TERM").unwrap_or_default() != "dumb"
        && CliOutput::new().use_color()
}

fn load_config(cli: &Cli) -> Result<Config> {
    match &cli.config {
        Some(path) => Config::load_from_file(path),
        None => Config::load(),
    }
}

async fn run(cli: Cli, output: &CliOutput) -> Result<()> {
    match &cli.command {
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            generate_completions(*shell, &mut cmd, &mut std::io::stdout());
            Ok(())
        }
        Commands::Run {
            input,
            scale,
            output: output_path,
            data_uri,
            json,
            api_key,
            model,
            api_url,
        } => {
            let config = load_config(&cli)?;
            let options = RunOptions {
                input: input.clone(),
                scale: scale.map(Into::into),
                output: output_path.clone(),
                data_uri: *data_uri,
                json: *json,
                api_key: api_key.clone(),
                model: model.clone(),
                api_url: api_url.clone(),
                verbose: cli.verbose,
                show_progress: should_show_progress(),
            };

            let client = upscale::build_client(&options, &config, |var| env::var(var).ok())?;
            upscale::run(&options, &config, &client, output).await?;
            Ok(())
        }
    }
}
