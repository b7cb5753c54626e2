use std::path::PathBuf;

use clap::Parser;

/// R3ÆLƎR AI: terminal chat client.
#[derive(Parser, Debug)]
#[command(name = "r3aler", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level override (debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Relay server base URL, e.g. `https://r3aler.example/api`.
    #[arg(long)]
    pub base_url: Option<String>,
}

pub fn parse() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_flags_optional() {
        let args = Args::try_parse_from(["r3aler"]).unwrap();
        assert!(args.config.is_none());
        assert!(args.log_level.is_none());
        assert!(args.base_url.is_none());
    }

    #[test]
    fn overrides_parse() {
        let args = Args::try_parse_from([
            "r3aler",
            "--config",
            "/tmp/r3aler.toml",
            "--log-level",
            "debug",
            "--base-url",
            "https://relay.test/api",
        ])
        .unwrap();
        assert_eq!(args.config, Some(PathBuf::from("/tmp/r3aler.toml")));
        assert_eq!(args.log_level.as_deref(), Some("debug"));
        assert_eq!(args.base_url.as_deref(), Some("https://relay.test/api"));
    }
}
