// ABOUTME: Library exports for upscale CLI modules for testing and external use
// ABOUTME: Makes internal modules available to integration tests

pub mod cli;
pub mod cli_output;
pub mod completions;
pub mod config;
pub mod constants;
pub mod output;
pub mod upscale;
