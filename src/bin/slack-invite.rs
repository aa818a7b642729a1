use std::{env, io, path::PathBuf};

use anyhow::{Context, Result};
use clap::{AppSettings, Clap};
use tracing_subscriber::EnvFilter;

use slack_invite::{
    api::ApiClient,
    config::{Config, InviteArguments, TOKEN_ENV},
    config_global::{read_global_config, GlobalConfig},
    *,
};

/// Invites everyone on an email list who already has a Slack account to a
/// private group, then prints a CSV report.
///
/// The Slack token is read from $SLACK_API_TOKEN, or from ~/.slack-invite/config.
#[derive(Clap, Debug)]
#[clap(setting = AppSettings::ColoredHelp)]
#[clap(version = "0.1.0")]
struct Opts {
    /// Name of the private group to invite people to
    group: String,

    /// File with one email address per line
    #[clap(long, default_value = "./invitees.txt")]
    invitees: PathBuf,

    /// Base url of the Slack Web API
    #[clap(long)]
    api_base: Option<String>,
}

fn init_logging() {
    // stdout is the report, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let opts: Opts = Opts::parse();
    init_logging();

    // The config file is optional, so a missing $HOME only means there is none
    let global_config = match get_global_config_dir() {
        Ok(dir) => read_global_config(dir).context("Failed to read ~/.slack-invite/config")?,
        Err(e) => {
            tracing::debug!("skipping the global config: {}", e);
            GlobalConfig::default()
        }
    };

    let config = Config::resolve(
        InviteArguments {
            group: opts.group,
            invitees: opts.invitees,
            api_base: opts.api_base,
        },
        env::var(TOKEN_ENV).ok(),
        global_config,
    )?;
    tracing::debug!(?config, "resolved config");

    let client = ApiClient::new(&config);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    run_invite(&client, &config, &mut out).await?;

    Ok(())
}
