use std::{fmt, fs::File, path::PathBuf};

use anyhow::{anyhow, Context, Result};
use url::Url;

use crate::config_global::GlobalConfig;

pub const TOKEN_ENV: &str = "SLACK_API_TOKEN";
pub const DEFAULT_API_BASE: &str = "https://slack.com/api";

/// What the user asked for on the command line.
pub struct InviteArguments {
    pub group: String,
    pub invitees: PathBuf,
    pub api_base: Option<String>,
}

/// Everything a run needs, validated up front so no request is sent with a
/// half-formed configuration.
#[derive(Clone)]
pub struct Config {
    pub token: String,
    pub group_name: String,
    pub invitee_list: PathBuf,
    pub api_base: Url,
}

// Never print the token
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("token", &"<redacted>")
            .field("group_name", &self.group_name)
            .field("invitee_list", &self.invitee_list)
            .field("api_base", &self.api_base.as_str())
            .finish()
    }
}

impl Config {
    pub fn resolve(
        args: InviteArguments,
        env_token: Option<String>,
        global_config: GlobalConfig,
    ) -> Result<Config> {
        let token = env_token
            .filter(|t| !t.is_empty())
            .or_else(|| global_config.access_token().filter(|t| !t.is_empty()))
            .ok_or(anyhow!(
                "{} is missing. Export it, or set 'access_token' under [connection] in ~/.slack-invite/config",
                TOKEN_ENV
            ))?;

        if args.group.is_empty() {
            return Err(anyhow!("Param channel name is missing"));
        }

        let raw_base = args
            .api_base
            .or_else(|| global_config.host())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        let api_base = Url::parse(&raw_base)
            .context(format!("'{}' is not a valid API base url", raw_base))?;

        // make sure we can read this
        File::open(&args.invitees).context(format!(
            "Can't read the invitee list at {:?}",
            args.invitees
        ))?;

        Ok(Config {
            token,
            group_name: args.group,
            invitee_list: args.invitees,
            api_base,
        })
    }
}
