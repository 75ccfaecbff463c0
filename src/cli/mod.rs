// CLI module for prompt-proxy
// Author: kelexine (https://github.com/kelexine)

use clap::Parser;
use std::path::PathBuf;

/// prompt-proxy - Rate-limited, caching HTTP front-end for the Anthropic Messages API
#[derive(Parser, Debug)]
#[command(name = "prompt-proxy", version, about, long_about = None)]
pub struct Args {
    /// Path to a TOML config file (default: ./config.toml if present)
    #[arg(short, long, env = "PROMPT_PROXY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Address to bind, overriding server.host
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on, overriding server.port
    #[arg(short, long)]
    pub port: Option<u16>,
}

impl Args {
    /// Apply command-line overrides on top of the loaded config.
    pub fn apply(&self, config: &mut crate::config::AppConfig) {
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
    use crate::config::AppConfig;

    #[test]
    fn test_overrides_apply() {
        let args = Args::parse_from(["prompt-proxy", "--port", "9000", "--host", "0.0.0.0"]);
        let mut config = AppConfig::default();
        args.apply(&mut config);
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
    }

    #[test]
    fn test_no_overrides_keep_config() {
        let args = Args::parse_from(["prompt-proxy"]);
        let mut config = AppConfig::default();
        args.apply(&mut config);
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
    }
}
