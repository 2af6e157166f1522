// ABOUTME: Centralized constants for the upscale CLI application
// ABOUTME: Contains environment variable names, config locations, output naming, and UI timing

/// Environment variables consulted for the API key, in order of precedence
pub mod env {
    pub const GEMINI_API_KEY: &str = "GEMINI_API_KEY";
    pub const API_KEY: &str = "API_KEY";

    pub const API_KEY_VARS: &[&str] = &[GEMINI_API_KEY, API_KEY];

    /// Suppresses the progress spinner when set
    pub const QUIET: &str = "UPSCALE_CLI_QUIET";
}

/// Config file locations
pub mod config {
    /// Project-local config file name
    pub const PROJECT_FILE: &str = "upscale-cli.toml";

    /// Directory under the XDG/user config home
    pub const APP_DIR: &str = "upscale-cli";

    pub const USER_FILE: &str = "config.toml";
}

/// Output naming
pub mod output {
    /// Prefix for default output file names
    pub const FILE_PREFIX: &str = "upscaled_";

    pub const FALLBACK_NAME: &str = "image.png";
}

/// Timeout configurations for various operations
pub mod timeouts {
    /// Progress spinner tick interval for smooth animation
    pub const PROGRESS_BAR_TICK_MS: u64 = 80;
}
