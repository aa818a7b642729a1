use std::io::Write;

use anyhow::{anyhow, Context, Result};
use futures::future::try_join_all;
use tracing::info;

use crate::{
    api::{InviteResult, Slack},
    config::Config,
    invitees::load_invitees,
    matcher::match_invitees,
    report::write_report,
};

/// Invites every directory user on the invitee list to the configured group
/// and writes the report to `out`.
///
/// Users, invitees and the group are loaded concurrently; the invites are
/// then all sent at once. Slack refusing an invite, even with an error status,
/// is a report row; an invite that can't reach Slack or read its answer
/// aborts the run before the report is written.
pub async fn run_invite<S: Slack, W: Write>(
    slack: &S,
    config: &Config,
    out: &mut W,
) -> Result<Vec<InviteResult>> {
    let (users, invitees, group) = tokio::try_join!(
        slack.list_users(),
        load_invitees(&config.invitee_list),
        slack.find_group_by_name(&config.group_name)
    )?;

    let group = group.ok_or(anyhow!("Group not found: '{}'", config.group_name))?;

    // Not a debug log, this is the output of this command
    writeln!(out, "{} slack users, {} invitees", users.len(), invitees.len())?;
    writeln!(out, "found group '{}' with id {}", group.name, group.id)?;

    let matched = match_invitees(&users, &invitees);
    writeln!(out, "{} invitees in slack", matched.len())?;
    info!(count = matched.len(), group = %group.id, "sending invites");

    let results = try_join_all(
        matched
            .iter()
            .map(|user| slack.invite_to_group(user, &group)),
    )
    .await
    .context(format!("Failed to invite users to '{}'", group.name))?;

    write_report(out, &results)?;

    Ok(results)
}
