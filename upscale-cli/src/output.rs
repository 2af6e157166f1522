// ABOUTME: Result handling for the CLI: output naming, file writing, JSON summaries, spinner
// ABOUTME: Decodes the returned data-URI payload and saves it where the user asked

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use upscale_sdk::{ScaleFactor, UpscaleResult};

use crate::constants;

/// Default output location: `upscaled_<name>` in `output_dir`, or beside the input
pub fn default_output_path(input: &Path, output_dir: Option<&Path>) -> PathBuf {
    let name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| constants::output::FALLBACK_NAME.to_string());
    let file_name = format!("{}{}", constants::output::FILE_PREFIX, name);

    match output_dir {
        Some(dir) => dir.join(file_name),
        None => input
            .parent()
            .unwrap_or_else(|| Path::new(""))
            .join(file_name),
    }
}

/// Decode the result and write it to `path`, returning the number of bytes written
pub async fn write_result(result: &UpscaleResult, path: &Path) -> Result<usize> {
    let bytes = result
        .decode()
        .context("Upscaled image payload is not valid base64")?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
    }

    tokio::fs::write(path, &bytes)
        .await
        .with_context(|| format!("Failed to write upscaled image: {}", path.display()))?;

    Ok(bytes.len())
}

#[derive(Debug, Serialize)]
pub struct UpscaleSummary {
    pub input: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
    pub scale: u8,
    pub model: String,
    pub mime_type: String,
    pub bytes: usize,
}

impl UpscaleSummary {
    pub fn new(
        input: &Path,
        output: Option<&Path>,
        scale: ScaleFactor,
        model: &str,
        result: &UpscaleResult,
        bytes: usize,
    ) -> Self {
        Self {
            input: input.to_path_buf(),
            output: output.map(Path::to_path_buf),
            scale: scale.factor(),
            model: model.to_string(),
            mime_type: result.mime_type.clone(),
            bytes,
        }
    }

    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }
}

/// Spinner shown while the request is in flight
pub fn spinner(message: String, show: bool) -> ProgressBar {
    if !show {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg} {elapsed}")
    {
        pb.set_style(style);
    }
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(
        constants::timeouts::PROGRESS_BAR_TICK_MS,
    ));
    pb
}

/// Whether a spinner should be drawn: stderr is a TTY and quiet mode is off
pub fn should_show_progress() -> bool {
    use std::io::IsTerminal;
    std::io::stderr().is_terminal() && std::env::var_os(constants::env::QUIET).is_none()
}
