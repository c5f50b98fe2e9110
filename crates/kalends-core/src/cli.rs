use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::anyhow;
use clap::{ArgAction, Parser};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone)]
pub struct KeyVal {
    pub key: String,
    pub value: String,
}

impl std::str::FromStr for KeyVal {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (k, v) = s
            .split_once('=')
            .ok_or_else(|| anyhow!("expected KEY=VALUE, got: {s}"))?;
        Ok(Self {
            key: k.trim().to_string(),
            value: v.trim().to_string(),
        })
    }
}

#[derive(Parser, Debug, Clone)]
#[command(
    name = "kalends",
    version,
    about = "multi-month calendar widget for the terminal"
)]
pub struct GlobalCli {
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,

    #[arg(short = 'q', long = "quiet", action = ArgAction::Count)]
    pub quiet: u8,

    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[arg(
        long = "set",
        value_name = "KEY=VALUE",
        value_parser = clap::builder::ValueParser::new(|s: &str| s.parse::<KeyVal>()),
        action = ArgAction::Append
    )]
    pub set: Vec<KeyVal>,

    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub rest: Vec<String>,
}

pub fn init_tracing(verbose: u8, quiet: u8) -> anyhow::Result<()> {
    let default_level = if quiet >= 2 {
        "error"
    } else if quiet == 1 {
        "warn"
    } else if verbose >= 3 {
        "trace"
    } else if verbose == 2 {
        "debug"
    } else if verbose == 1 {
        "info"
    } else {
        "warn"
    };

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|e| anyhow!("invalid RUST_LOG / log filter: {e}"))?;

    let init_result = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_level(true)
        .with_ansi(std::io::stderr().is_terminal())
        .try_init();

    if let Err(err) = init_result {
        debug!(error = %err, "tracing subscriber already set, continuing");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|word| word.to_string()).collect()
    }

    #[test]
    fn bare_invocation_parses_empty() {
        let cli = GlobalCli::parse_from(words(&["kalends"]));
        assert_eq!(cli.verbose, 0);
        assert_eq!(cli.quiet, 0);
        assert!(cli.config.is_none());
        assert!(cli.set.is_empty());
        assert!(cli.rest.is_empty());
    }

    #[test]
    fn flags_stack_and_rest_trails() {
        let cli = GlobalCli::parse_from(words(&[
            "kalends",
            "-vv",
            "--set",
            "color=off",
            "--set",
            "language=en",
            "pick",
            "2024-03-15",
        ]));
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.set.len(), 2);
        assert_eq!(cli.set[0].key, "color");
        assert_eq!(cli.set[1].value, "en");
        assert_eq!(cli.rest, words(&["pick", "2024-03-15"]));
    }

    #[test]
    fn config_flag_takes_a_path() {
        let cli = GlobalCli::parse_from(words(&[
            "kalends",
            "--config",
            "/tmp/k.toml",
            "show",
        ]));
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/k.toml")));
        assert_eq!(cli.rest, words(&["show"]));
    }

    #[test]
    fn keyval_trims_and_rejects() {
        let pair: KeyVal = "language = en".parse().expect("keyval");
        assert_eq!(pair.key, "language");
        assert_eq!(pair.value, "en");
        assert!("no-equals".parse::<KeyVal>().is_err());
    }
}
