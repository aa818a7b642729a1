use std::collections::HashSet;

use crate::api::{MatchedUser, User};

/// Directory users whose email is on the invitee list, in directory order.
/// Emails are compared exactly.
pub fn match_invitees(users: &[User], invitees: &[String]) -> Vec<MatchedUser> {
    let wanted: HashSet<&str> = invitees.iter().map(String::as_str).collect();

    users
        .iter()
        .filter_map(|user| {
            let email = user.profile.email.as_deref()?;
            if !wanted.contains(email) {
                return None;
            }

            Some(MatchedUser {
                id: user.id.clone(),
                name: user.name.clone(),
                email: email.to_string(),
            })
        })
        .collect()
}
