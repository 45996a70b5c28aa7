use std::{env, path::PathBuf};

use anyhow::{Result, anyhow};

const USAGE: &str = "usage: noema [--config <path>] [--log-dir <path>] [--no-arbitration]";

/// Command-line overrides applied on top of the loaded config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliArgs {
    pub config_path: PathBuf,
    pub log_dir: Option<PathBuf>,
    pub disable_arbitration: bool,
}

pub fn parse_args() -> Result<CliArgs> {
    parse_from(env::args().skip(1))
}

fn parse_from(mut args: impl Iterator<Item = String>) -> Result<CliArgs> {
    let mut config_path = None;
    let mut log_dir = None;
    let mut disable_arbitration = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let value = args
                    .next()
                    .ok_or_else(|| anyhow!("missing value for --config. {USAGE}"))?;
                config_path = Some(PathBuf::from(value));
            }
            "--log-dir" => {
                let value = args
                    .next()
                    .ok_or_else(|| anyhow!("missing value for --log-dir. {USAGE}"))?;
                log_dir = Some(PathBuf::from(value));
            }
            "--no-arbitration" => disable_arbitration = true,
            other => {
                return Err(anyhow!("unknown argument: {other}. {USAGE}"));
            }
        }
    }

    Ok(CliArgs {
        config_path: config_path.unwrap_or_else(|| PathBuf::from("./noema.json5")),
        log_dir,
        disable_arbitration,
    })
}
