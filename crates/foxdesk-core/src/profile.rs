use serde::Deserialize;

use crate::error::{FoxdeskError, Result};

/// Storage path the management script reports for profiles that live in
/// its default location.
pub const DEFAULT_STORAGE_SENTINEL: &str = "default";

/// Wire form of one element of `list --json` output.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileRecord {
    pub id: String,
    pub name: String,
    pub storage_path: String,
    #[serde(default)]
    pub proxy_host: Option<String>,
}

/// One row of the profiles table.
///
/// The proxy host itself is never kept; only its presence is displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileRow {
    pub id: String,
    pub name: String,
    pub storage_path: String,
    pub proxy_present: bool,
}

impl From<ProfileRecord> for ProfileRow {
    fn from(record: ProfileRecord) -> Self {
        let proxy_present = record
            .proxy_host
            .as_deref()
            .is_some_and(|host| !host.trim().is_empty());

        Self {
            id: record.id,
            name: record.name,
            storage_path: record.storage_path,
            proxy_present,
        }
    }
}

impl ProfileRow {
    /// Value shown in the proxy column.
    pub fn proxy_label(&self) -> &'static str {
        if self.proxy_present {
            "yes"
        } else {
            "no"
        }
    }

    /// Whether the profile stores data at the script's default location.
    pub fn uses_default_storage(&self) -> bool {
        self.storage_path == DEFAULT_STORAGE_SENTINEL
    }
}

/// Parse `list --json` stdout into table rows.
///
/// Strict: any JSON failure is surfaced whole so the caller can keep the
/// previously displayed rows instead of partially updating them.
pub fn parse_profile_list(stdout: &str) -> Result<Vec<ProfileRow>> {
    let records: Vec<ProfileRecord> =
        serde_json::from_str(stdout).map_err(|e| FoxdeskError::ProfileListParse {
            message: e.to_string(),
        })?;

    Ok(records.into_iter().map(ProfileRow::from).collect())
}

/// Input collected by the create/edit dialog.
///
/// Blank optional fields mean "omit the flag". The proxy value is consumed
/// by a single submission and never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileForm {
    pub name: String,
    pub storage_path: String,
    pub proxy: String,
}
