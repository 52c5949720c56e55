use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::anyhow;
use clap::{ArgAction, Parser, Subcommand};
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
    name = "sentimation",
    version,
    about = "Terminal dashboard for the SentiMation generation scheduler"
)]
pub struct GlobalCli {
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[arg(short = 'q', long = "quiet", action = ArgAction::Count, global = true)]
    pub quiet: u8,

    #[arg(
        long = "rc",
        value_parser = clap::builder::ValueParser::new(|s: &str| s.parse::<KeyVal>()),
        action = ArgAction::Append,
        global = true
    )]
    pub rc_overrides: Vec<KeyVal>,

    /// Path to a TOML config file.
    #[arg(long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// Backend base URL, e.g. http://localhost:5000.
    #[arg(long = "api-url", global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show counters and the task table once.
    List,
    /// Show one task in full.
    Show { id: String },
    /// Ask the backend to cancel a pending task.
    Cancel {
        id: String,
        /// Skip the confirmation prompt.
        #[arg(short = 'y', long = "yes")]
        yes: bool,
    },
    /// Start a pending task right away.
    RunNow { id: String },
    /// Schedule a one-time generation.
    Schedule {
        #[arg(short = 'g', long = "generator")]
        generator: String,
        #[arg(short = 'p', long = "prompt")]
        prompt: String,
        /// Local time, YYYY-MM-DDTHH:MM.
        #[arg(short = 'a', long = "at")]
        at: String,
    },
    /// List the generators the backend knows about.
    Generators,
    /// Redraw the dashboard on an interval until Ctrl-C.
    Watch {
        /// Poll interval in milliseconds; defaults to the config value.
        #[arg(short = 'i', long = "interval")]
        interval_ms: Option<u32>,
    },
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
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(true)
        .with_ansi(std::io::stderr().is_terminal())
        .try_init();

    if let Err(err) = init_result {
        debug!(error = %err, "tracing subscriber already set, continuing");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::{Command, GlobalCli, KeyVal};

    #[test]
    fn parses_key_value_overrides() {
        let kv: KeyVal = " refresh_interval_ms = 5000 ".parse().expect("parse kv");
        assert_eq!(kv.key, "refresh_interval_ms");
        assert_eq!(kv.value, "5000");
        assert!("no-equals".parse::<KeyVal>().is_err());
    }

    #[test]
    fn global_flags_work_after_subcommand() {
        let cli = GlobalCli::parse_from([
            "sentimation",
            "cancel",
            "task_3",
            "--yes",
            "--api-url",
            "http://studio:5000",
            "-vv",
        ]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.api_url.as_deref(), Some("http://studio:5000"));
        assert_eq!(
            cli.command,
            Command::Cancel {
                id: "task_3".to_string(),
                yes: true
            }
        );
    }

    #[test]
    fn watch_interval_is_optional() {
        let cli = GlobalCli::parse_from(["sentimation", "watch"]);
        assert_eq!(cli.command, Command::Watch { interval_ms: None });

        let cli = GlobalCli::parse_from(["sentimation", "watch", "-i", "1000"]);
        assert_eq!(
            cli.command,
            Command::Watch {
                interval_ms: Some(1000)
            }
        );
    }
}
