//! CLI module for healthboard
//!
//! Provides the command-line interface for the dashboard server.

pub mod check;
pub mod serve;

use clap::{Parser, Subcommand};

/// Healthboard - traffic-light health dashboard for services behind an API gateway
#[derive(Parser, Debug)]
#[command(name = "healthboard")]
#[command(version, about, long_about = None)]
#[command(after_help = r#"ENVIRONMENT VARIABLES:
    HEALTHBOARD_USERNAME               Gateway login user (required)
    HEALTHBOARD_PASSWORD               Gateway login password (required)
    HEALTHBOARD_GATEWAY_URL            Gateway base URL (default: https://apiv2.emil.de)
    HEALTHBOARD_LOGIN_URL              Login endpoint override
    HEALTHBOARD_REFRESH_URL            Token refresh endpoint override
    HEALTHBOARD_ENDPOINTS_FILE         YAML list of {name, url} to monitor
    HEALTHBOARD_PROBE_INTERVAL_SECS    Probe interval (default: 30)
    HEALTHBOARD_REFRESH_INTERVAL_SECS  Token refresh interval (default: 600)
    HEALTHBOARD_REQUEST_TIMEOUT_SECS   Per-request timeout (default: 5)
    HEALTHBOARD_STARTUP_DELAY_SECS     Delay before first login (default: 1)
    HEALTHBOARD_HOST                   Bind address (default: 0.0.0.0)
    HEALTHBOARD_PORT                   Listen port (default: 5000)
    HEALTHBOARD_LOG_LEVEL              Log level (default: info)
"#)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the dashboard server (default)
    Serve(serve::ServeArgs),
    /// Run one probe cycle and print the feed
    Check(check::CheckArgs),
}
