use std::{borrow::Cow, io::Write};

use anyhow::Result;

use crate::api::InviteResult;

pub const HEADER: &str = "name,email,user_id,status,already_in_group,error";

/// Quotes a field only when it holds a comma, a quote or a line break, doubling
/// any inner quotes.
pub fn escape_field(field: &str) -> Cow<'_, str> {
    if field.contains(&[',', '"', '\r', '\n'][..]) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

pub fn format_row(result: &InviteResult) -> String {
    let already_in_group = if result.already_in_group { "y" } else { "n" };

    [
        result.name.as_str(),
        result.email.as_str(),
        result.user_id.as_str(),
        result.status(),
        already_in_group,
        result.error.as_deref().unwrap_or(""),
    ]
    .iter()
    .map(|f| escape_field(f))
    .collect::<Vec<_>>()
    .join(",")
}

pub fn write_report<W: Write>(out: &mut W, results: &[InviteResult]) -> Result<()> {
    writeln!(out, "{}", HEADER)?;
    for result in results {
        writeln!(out, "{}", format_row(result))?;
    }
    out.flush()?;

    Ok(())
}
