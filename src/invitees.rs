use std::path::Path;

use anyhow::{Context, Result};
use itertools::Itertools;

/// Splits the list on `\n` and drops repeats, keeping the first occurrence.
/// Lines are taken as-is: no trimming, and a trailing newline yields an
/// empty entry.
pub fn parse_invitees(contents: &str) -> Vec<String> {
    contents.split('\n').unique().map(String::from).collect()
}

pub async fn load_invitees(path: &Path) -> Result<Vec<String>> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .context(format!("Failed to read the invitee list {:?}", path))?;

    Ok(parse_invitees(&contents))
}
