use std::fmt;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::config::Config;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Failed to connect to Slack for '{request}'. Perhaps your internet is down, or Slack is having an outage.")]
    FailedToConnect {
        request: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("Slack refused '{request}'. Something is wrong with your SLACK_API_TOKEN.")]
    Unauthorized { request: String },
    #[error("Failed to '{request}' got a status code of: {status}")]
    BadResponse { status: StatusCode, request: String },
    #[error("'{request}' returned no '{field}' list (slack error: {error})")]
    MissingField {
        request: String,
        field: &'static str,
        error: String,
    },
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Profile {
    // Bots and some integrations have no email
    pub email: Option<String>,
}

/// A member of the workspace, as listed by `users.list`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub profile: Profile,
}

/// A private channel, as listed by `groups.list`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Group {
    pub id: String,
    pub name: String,
}

/// A directory user whose email is on the invitee list.
#[derive(Clone, Debug, PartialEq)]
pub struct MatchedUser {
    pub id: String,
    pub name: String,
    pub email: String,
}

#[derive(Deserialize, Debug)]
struct UsersListResponse {
    members: Option<Vec<User>>,
    error: Option<String>,
}

#[derive(Deserialize, Debug)]
struct GroupsListResponse {
    groups: Option<Vec<Group>>,
    error: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
pub struct InviteResponse {
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub already_in_group: bool,
    pub error: Option<String>,
}

/// Outcome of inviting one user. A refusal from Slack is still a result.
#[derive(Clone, Debug, PartialEq)]
pub struct InviteResult {
    pub name: String,
    pub email: String,
    pub user_id: String,
    pub is_ok: bool,
    pub already_in_group: bool,
    pub error: Option<String>,
}

impl InviteResult {
    pub fn from_response(user: &MatchedUser, resp: InviteResponse) -> InviteResult {
        InviteResult {
            name: user.name.clone(),
            email: user.email.clone(),
            user_id: user.id.clone(),
            is_ok: resp.ok,
            already_in_group: resp.already_in_group,
            error: resp.error,
        }
    }

    pub fn status(&self) -> &'static str {
        if self.is_ok {
            "ok"
        } else {
            "not ok"
        }
    }
}

#[async_trait]
pub trait Slack: Send + Sync {
    async fn list_users(&self) -> Result<Vec<User>>;
    async fn list_groups(&self) -> Result<Vec<Group>>;
    async fn invite_to_group(&self, user: &MatchedUser, group: &Group) -> Result<InviteResult>;

    /// First group whose name is exactly `name`.
    async fn find_group_by_name(&self, name: &str) -> Result<Option<Group>> {
        let groups = self.list_groups().await?;

        Ok(groups.into_iter().find(|g| g.name == name))
    }
}

#[derive(Clone)]
pub struct ApiClient {
    base: Url,
    token: String,
    client: reqwest::Client,
}

// Never print the token
impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base", &self.base.as_str())
            .field("token", &"<redacted>")
            .finish()
    }
}

impl ApiClient {
    pub fn new(config: &Config) -> ApiClient {
        ApiClient {
            base: config.api_base.clone(),
            token: config.token.clone(),
            client: reqwest::Client::new(),
        }
    }

    pub fn endpoint(&self, method: &str) -> String {
        format!("{}/{}", self.base.as_str().trim_end_matches('/'), method)
    }

    // The token travels as a query parameter, so only the method name goes
    // into errors and logs.
    async fn send(&self, method: &str, params: &[(&str, &str)]) -> Result<reqwest::Response> {
        let request = format!("GET {}", method);
        debug!(%request, ?params, "calling slack");

        let resp = self
            .client
            .get(self.endpoint(method))
            .query(&[("token", self.token.as_str())])
            .query(params)
            .send()
            .await
            .map_err(|source| ApiError::FailedToConnect { request, source })?;

        Ok(resp)
    }

    async fn get<T: DeserializeOwned>(&self, method: &str, params: &[(&str, &str)]) -> Result<T> {
        let request = format!("GET {}", method);
        let resp = self.send(method, params).await?;

        if resp.status() == 401 {
            return Err(ApiError::Unauthorized { request }.into());
        }
        if !resp.status().is_success() {
            return Err(ApiError::BadResponse {
                status: resp.status(),
                request,
            }
            .into());
        }

        let body = resp.json::<T>().await.context(format!(
            "Failed to '{}'. The response unexpectedly did not return a JSON body.",
            request
        ))?;

        Ok(body)
    }
}

#[async_trait]
impl Slack for ApiClient {
    async fn list_users(&self) -> Result<Vec<User>> {
        let UsersListResponse { members, error } = self.get("users.list", &[]).await?;

        let members = members.ok_or_else(|| ApiError::MissingField {
            request: "GET users.list".to_string(),
            field: "members",
            error: error.unwrap_or_default(),
        })?;
        debug!(count = members.len(), "listed users");

        Ok(members)
    }

    async fn list_groups(&self) -> Result<Vec<Group>> {
        let GroupsListResponse { groups, error } = self.get("groups.list", &[]).await?;

        let groups = groups.ok_or_else(|| ApiError::MissingField {
            request: "GET groups.list".to_string(),
            field: "groups",
            error: error.unwrap_or_default(),
        })?;
        debug!(count = groups.len(), "listed groups");

        Ok(groups)
    }

    async fn invite_to_group(&self, user: &MatchedUser, group: &Group) -> Result<InviteResult> {
        // Slack answers refusals (rate limits included) with a JSON body even
        // on a non-2xx status; those become rows. Only a body we can't read aborts.
        let resp = self
            .send(
                "groups.invite",
                &[("channel", group.id.as_str()), ("user", user.id.as_str())],
            )
            .await?;
        let status = resp.status();

        let mut resp = resp.json::<InviteResponse>().await.context(format!(
            "Failed to 'GET groups.invite' for {} (status {}). The response unexpectedly did not return a JSON body.",
            user.id, status
        ))?;
        if !status.is_success() {
            resp.ok = false;
        }

        let result = InviteResult::from_response(user, resp);
        debug!(user = %result.user_id, status = result.status(), "invited");

        Ok(result)
    }
}
