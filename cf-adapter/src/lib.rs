#![doc = include_str!("../README.md")]

mod apps;
mod buildpacks;
mod exec;
mod orgs;
mod security_groups;
mod services;
mod session;

pub use crate::apps::*;
pub use crate::buildpacks::*;
pub use crate::exec::{CommandError, LogOutput};
pub use crate::orgs::*;
pub use crate::security_groups::*;
pub use crate::services::*;
pub use crate::session::*;
