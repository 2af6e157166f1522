// ABOUTME: CLI argument definitions for the upscale command-line application
// ABOUTME: Defines the command-line interface structure using clap derive macros

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use upscale_sdk::ScaleFactor;

#[derive(Parser, Debug)]
#[command(name = "upscale")]
#[command(about = "Upscale images 2x or 4x with Gemini", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Force colored output even when piped
    #[arg(long, global = true, conflicts_with = "no_color")]
    pub force_color: bool,

    /// Enable verbose output for debugging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Read configuration from this file instead of the standard locations
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Upscale a PNG, JPEG, or WEBP image
    Run {
        /// Image to upscale
        input: PathBuf,

        /// Upscale factor (defaults to the config's default_scale, then 2)
        #[arg(short, long, value_enum)]
        scale: Option<ScaleArg>,

        /// Where to write the result (default: upscaled_<input name>)
        #[arg(short, long, value_name = "FILE", conflicts_with = "data_uri")]
        output: Option<PathBuf>,

        /// Print the result as a data-URI instead of writing a file
        #[arg(long)]
        data_uri: bool,

        /// Print a JSON summary of the result
        #[arg(long, conflicts_with = "data_uri")]
        json: bool,

        /// Gemini API key (can also be set via GEMINI_API_KEY env var)
        #[arg(long)]
        api_key: Option<String>,

        /// Model to request the upscale from
        #[arg(long)]
        model: Option<String>,

        /// Override the Gemini API base URL
        #[arg(long)]
        api_url: Option<String>,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: crate::completions::Shell,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScaleArg {
    #[value(name = "2", alias = "2x")]
    Two,
    #[value(name = "4", alias = "4x")]
    Four,
}

impl From<ScaleArg> for ScaleFactor {
    fn from(arg: ScaleArg) -> Self {
        match arg {
            ScaleArg::Two => ScaleFactor::X2,
            ScaleArg::Four => ScaleFactor::X4,
        }
    }
}
