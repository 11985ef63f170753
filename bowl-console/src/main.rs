//! Bowl console - terminal front end for the Bamee 5 Num ordering service

mod commands;
mod logger;
mod prompt;
mod shell;

use std::sync::Arc;
use std::time::Duration;

use bowl_client::{ClientConfig, CsrfToken};
use clap::Parser;

use crate::prompt::{ConsoleNotifier, LineConfirm, StdinInput};
use crate::shell::Shell;

/// Command-line options; each overrides the matching `BOWL_*` variable
#[derive(Parser, Debug)]
#[command(name = "bowl", version, about = "Console for the Bamee 5 Num ordering service")]
struct Args {
    /// Server base URL
    #[arg(long)]
    base_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// New-order poll interval in seconds
    #[arg(long)]
    poll_secs: Option<u64>,

    /// Directory for the session cache
    #[arg(long)]
    work_dir: Option<String>,

    #[arg(long)]
    log_level: Option<String>,

    /// Write logs to a daily file in this directory instead of stderr
    #[arg(long)]
    log_dir: Option<String>,

    /// JSON log lines
    #[arg(long, env = "BOWL_LOG_JSON")]
    json_logs: bool,

    /// CSRF token to replay, as HEADER=TOKEN
    #[arg(long, value_parser = parse_csrf)]
    csrf: Option<CsrfToken>,

    /// Answer yes to every confirmation
    #[arg(short = 'y', long)]
    yes: bool,
}

fn parse_csrf(raw: &str) -> Result<CsrfToken, String> {
    match raw.split_once('=') {
        Some((header, token)) if !header.trim().is_empty() && !token.is_empty() => {
            Ok(CsrfToken::new(header.trim(), token))
        }
        _ => Err("expected HEADER=TOKEN".to_string()),
    }
}

impl Args {
    fn apply(self, mut config: ClientConfig) -> ClientConfig {
        if let Some(url) = self.base_url {
            config.base_url = url;
        }
        if let Some(secs) = self.timeout_secs {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        if let Some(secs) = self.poll_secs {
            config = config.with_poll_interval(Duration::from_secs(secs));
        }
        if let Some(dir) = self.work_dir {
            config = config.with_work_dir(dir);
        }
        if let Some(level) = self.log_level {
            config = config.with_log_level(level);
        }
        if let Some(dir) = self.log_dir {
            config = config.with_log_dir(dir);
        }
        if let Some(csrf) = self.csrf {
            config = config.with_csrf(csrf);
        }
        config
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. .env first so ClientConfig::from_env sees it
    dotenv::dotenv().ok();

    let args = Args::parse();
    let json_logs = args.json_logs;
    let assume_yes = args.yes;
    let config = args.apply(ClientConfig::from_env());

    // 2. Logging
    let _log_guard =
        logger::init_logger_with_file(&config.log_level, json_logs, config.log_dir.as_deref());
    tracing::info!(base_url = %config.base_url, "bowl console starting");

    // 3. Shell
    let input = StdinInput::stdin();
    let mut shell = Shell::new(
        config,
        Arc::new(ConsoleNotifier),
        Arc::new(LineConfirm::new(input.clone(), assume_yes)),
        input,
    )?;
    shell.run().await?;

    tracing::info!("bowl console stopped");
    Ok(())
}
