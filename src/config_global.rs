use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fmt::Debug,
    fs,
    path::{Path, PathBuf},
};

#[derive(Deserialize, Serialize, Clone, Debug, Default)]
pub struct ConnectionConfig {
    pub access_token: Option<String>,

    // Base of the Slack Web API, e.g. https://slack.com/api
    pub host: Option<String>,
}

// What's stored in their home directory
#[derive(Deserialize, Serialize, Clone, Debug, Default)]
pub struct GlobalConfig {
    pub connection: Option<ConnectionConfig>,
}

impl GlobalConfig {
    pub fn host(&self) -> Option<String> {
        self.connection.clone()?.host
    }

    pub fn access_token(&self) -> Option<String> {
        self.connection.clone()?.access_token
    }
}

pub fn get_global_config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().ok_or(anyhow!(
        "slack-invite looks for an optional config file in your $HOME directory, but it
can't find the environment variable $HOME (aka: '~'). Set $SLACK_API_TOKEN instead.",
    ))?;

    Ok(Path::new(&home).join(".slack-invite"))
}

/// Reads `<dir>/config`. A missing file is an empty config; the file is never
/// created.
pub fn read_global_config(dir: PathBuf) -> Result<GlobalConfig> {
    let filepath = dir.join("config");
    if !filepath.is_file() {
        return Ok(GlobalConfig::default());
    }

    let f = fs::read_to_string(filepath.clone())
        .context(format!("Can't read path {:?}", filepath))?;
    let config: GlobalConfig = toml::from_str(f.as_str())
        .context(format!("Failed to parse the config file {:?} as TOML", filepath))?;

    Ok(config)
}
