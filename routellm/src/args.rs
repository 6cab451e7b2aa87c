#![allow(clippy::similar_names)]

use std::path::PathBuf;

use clap::Parser;

/// `RouteLLM` gateway
#[derive(Debug, Parser)]
#[command(name = "routellm", about = "Routes prompts to a small or large model by complexity and meters token usage")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "routellm.toml", env = "ROUTELLM_CONFIG")]
    pub config: PathBuf,

    /// Override the listen address
    #[arg(long, env = "ROUTELLM_LISTEN")]
    pub listen: Option<std::net::SocketAddr>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["routellm"]).unwrap();
        assert_eq!(args.config, PathBuf::from("routellm.toml"));
        assert!(args.listen.is_none());
    }

    #[test]
    fn listen_override() {
        let args = Args::try_parse_from(["routellm", "-c", "prod.toml", "--listen", "127.0.0.1:9000"]).unwrap();
        assert_eq!(args.config, PathBuf::from("prod.toml"));
        assert_eq!(args.listen.map(|addr| addr.port()), Some(9000));
    }
}
