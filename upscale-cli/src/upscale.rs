// ABOUTME: Implements the `run` command: resolve settings, call the SDK, deliver the result
// ABOUTME: Kept in the library so integration tests can drive it against a mock server

use anyhow::Result;
use std::path::{Path, PathBuf};
use upscale_sdk::constants::limits;
use upscale_sdk::{ImageFile, ImageSource, ScaleFactor, UpscaleClient, UpscaleResult};

use crate::cli_output::CliOutput;
use crate::config::Config;
use crate::output::{self, UpscaleSummary};

#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub input: PathBuf,
    pub scale: Option<ScaleFactor>,
    pub output: Option<PathBuf>,
    pub data_uri: bool,
    pub json: bool,
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub api_url: Option<String>,
    pub verbose: bool,
    pub show_progress: bool,
}

#[derive(Debug)]
pub enum RunOutcome {
    /// Result printed to stdout as a data-URI
    Printed(UpscaleResult),
    /// Result written to disk
    Saved { path: PathBuf, bytes: usize },
}

pub fn build_client(
    options: &RunOptions,
    config: &Config,
    env_lookup: impl Fn(&str) -> Option<String>,
) -> Result<UpscaleClient> {
    let api_key = config.resolve_api_key(options.api_key.as_deref(), env_lookup);
    let proxy = config
        .proxy
        .as_deref()
        .map(UpscaleClient::create_proxy)
        .transpose()?;

    let client = UpscaleClient::builder()
        .api_key(api_key)
        .verbose(options.verbose)
        .timeout(config.timeout())
        .proxy(proxy)
        .base_url(options.api_url.clone().or_else(|| config.api_url.clone()))
        .model(options.model.clone().or_else(|| config.model.clone()))
        .max_image_bytes(
            config
                .max_image_bytes()
                .unwrap_or(limits::DEFAULT_MAX_IMAGE_BYTES),
        )
        .build()?;

    Ok(client)
}

pub async fn run(
    options: &RunOptions,
    config: &Config,
    client: &UpscaleClient,
    cli_output: &CliOutput,
) -> Result<RunOutcome> {
    let image = ImageFile::new(&options.input)?;
    let scale = options.scale.unwrap_or_else(|| config.scale());

    log::debug!(
        "Upscaling {} ({}) by {} with {}",
        options.input.display(),
        image.mime_type(),
        scale,
        client.model()
    );

    let pb = output::spinner(
        format!("Upscaling {} ({})", image.name(), scale),
        options.show_progress,
    );
    let result = client.upscale(&image, scale).await;
    pb.finish_and_clear();
    let result = result?;

    if options.data_uri {
        println!("{}", result);
        return Ok(RunOutcome::Printed(result));
    }

    let path = options
        .output
        .clone()
        .unwrap_or_else(|| output::default_output_path(&options.input, config.output_dir.as_deref()));

    warn_on_extension_mismatch(&path, &result, cli_output);
    let bytes = output::write_result(&result, &path).await?;

    if options.json {
        let summary =
            UpscaleSummary::new(&options.input, Some(&path), scale, client.model(), &result, bytes);
        println!("{}", summary.to_json(true)?);
    } else {
        cli_output.success(&format!("Saved {} ({} bytes)", path.display(), bytes));
    }

    Ok(RunOutcome::Saved { path, bytes })
}

fn warn_on_extension_mismatch(path: &Path, result: &UpscaleResult, cli_output: &CliOutput) {
    let Some(returned) = result.file_extension() else {
        return;
    };
    let requested = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    let matches = match requested.as_deref() {
        Some("jpeg") => returned == "jpg",
        Some(ext) => ext == returned,
        None => false,
    };

    if !matches {
        cli_output.warning(&format!(
            "Service returned {} but output is {}",
            result.mime_type,
            path.display()
        ));
    }
}
