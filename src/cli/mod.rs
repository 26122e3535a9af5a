// CLI module for Visionary Insights
// Author: kelexine (https://github.com/kelexine)

use crate::config::AppConfig;
use clap::Parser;
use std::path::PathBuf;

/// Visionary Insights - AI-powered medical imaging assistant
#[derive(Parser, Debug, Default)]
#[command(name = "visionary-insights", version, about, long_about = None)]
pub struct Args {
    /// Path to a TOML config file (default: ~/.visionary-insights/config.toml)
    #[arg(short, long, env = "VISIONARY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Address to bind, overriding the config file
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on, overriding the config file
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Print the effective configuration (API key redacted) and exit
    #[arg(long)]
    pub print_config: bool,
}

impl Args {
    /// Apply command-line overrides, which take precedence over every other source.
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_win() {
        let args = Args::parse_from(["visionary-insights", "--host", "0.0.0.0", "--port", "9000"]);
        let mut config = AppConfig::default();
        args.apply(&mut config);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9000);
    }

    #[test]
    fn test_no_overrides_keep_config() {
        let args = Args::parse_from(["visionary-insights", "--print-config"]);
        let mut config = AppConfig::default();
        args.apply(&mut config);
        assert!(args.print_config);
        assert_eq!(config.server.port, 8501);
    }
}
