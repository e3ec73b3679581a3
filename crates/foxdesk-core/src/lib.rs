pub mod config;
pub mod error;
pub mod launcher;
pub mod profile;

pub use config::{Config, ToolConfig};
pub use error::{FoxdeskError, Result};
pub use launcher::{Launcher, ToolCommand, ToolOutput};
pub use profile::{
    parse_profile_list, ProfileForm, ProfileRecord, ProfileRow, DEFAULT_STORAGE_SENTINEL,
};
