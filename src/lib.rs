pub use crate::{config_global::get_global_config_dir, invite::run_invite};

pub mod api;
pub mod config;
pub mod config_global;
pub mod invite;
pub mod invitees;
pub mod matcher;
pub mod report;
