use std::path::PathBuf;

use clap::Parser;

use super::config::UserConfig;

/// nowplaying - what's on Spotify right now, in your terminal 🎵
#[derive(Parser, Debug)]
#[command(name = "nowplaying", version, about)]
pub struct Args {
    /// Now-playing endpoint (overrides config.toml)
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Poll interval in milliseconds (overrides config.toml)
    #[arg(long)]
    pub interval_ms: Option<u64>,

    /// Read this config file instead of ~/.config/nowplaying/config.toml
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print one line per change instead of drawing the widget
    #[arg(long, conflicts_with = "once")]
    pub plain: bool,

    /// Fetch once, print the result as JSON and exit
    #[arg(long)]
    pub once: bool,

    /// Log filter, e.g. `debug` (overrides config.toml)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Generate default config.toml to stdout
    #[arg(long)]
    pub generate_config: bool,
}

impl Args {
    /// Fold command line overrides into the loaded config.
    pub fn apply(&self, mut config: UserConfig) -> UserConfig {
        if let Some(endpoint) = &self.endpoint {
            config.endpoint = endpoint.clone();
        }
        if let Some(interval_ms) = self.interval_ms {
            config.interval_ms = interval_ms;
        }
        if let Some(level) = &self.log_level {
            config.log_level = level.clone();
        }
        config
    }
}
