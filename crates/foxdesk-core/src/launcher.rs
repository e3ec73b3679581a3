//! Subprocess bridge to the profile-management script.
//!
//! Every operation is a single synchronous invocation of
//! `<runtime> <script> <op> [flags...]` with the working directory pinned
//! to the project root. The script owns persistence and validation; this
//! module only builds argument vectors and relays output.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::config::Config;
use crate::error::{FoxdeskError, Result};
use crate::profile::{parse_profile_list, ProfileForm, ProfileRow};

/// Argument vector for one management-script operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    args: Vec<String>,
}

impl ToolCommand {
    /// `list --json`; the GUI always asks for machine-readable output.
    pub fn list() -> Self {
        Self {
            args: vec!["list".into(), "--json".into()],
        }
    }

    pub fn create(form: &ProfileForm) -> Self {
        let mut args = vec!["create".to_string(), form.name.clone()];
        push_flag(&mut args, "--proxy", &form.proxy);
        push_flag(&mut args, "--storage-path", &form.storage_path);
        Self { args }
    }

    pub fn edit(id: &str, form: &ProfileForm) -> Self {
        let mut args = vec!["edit".to_string(), id.to_string()];
        push_flag(&mut args, "--name", &form.name);
        push_flag(&mut args, "--proxy", &form.proxy);
        push_flag(&mut args, "--storage-path", &form.storage_path);
        Self { args }
    }

    pub fn delete(id: &str, remove_storage: bool) -> Self {
        let mut args = vec!["delete".to_string(), id.to_string()];
        if remove_storage {
            args.push("--remove-storage".to_string());
        }
        Self { args }
    }

    pub fn open(id: &str) -> Self {
        Self {
            args: vec!["open".to_string(), id.to_string()],
        }
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Display form for status lines and logs.
    pub fn display(&self) -> String {
        self.args.join(" ")
    }
}

/// Append `flag <value>` only when the value is non-blank.
fn push_flag(args: &mut Vec<String>, flag: &str, value: &str) {
    let value = value.trim();
    if !value.is_empty() {
        args.push(flag.to_string());
        args.push(value.to_string());
    }
}

/// Captured output of one completed invocation.
#[derive(Debug, Clone)]
pub struct ToolOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Resolved paths for invoking the management script.
#[derive(Debug, Clone)]
pub struct Launcher {
    python: PathBuf,
    script: PathBuf,
    project_root: PathBuf,
}

impl Launcher {
    /// Verify startup preconditions and build a launcher.
    ///
    /// Both the script and the runtime must exist before any window opens;
    /// a missing path is a fatal startup error, never a partial start.
    pub fn discover(project_root: &Path, config: &Config) -> Result<Self> {
        let script = project_root.join(config.tool.script_path());
        if !script.exists() {
            return Err(FoxdeskError::ToolMissing { path: script });
        }

        let python = project_root.join(config.tool.runtime_path());
        if !python.exists() {
            return Err(FoxdeskError::RuntimeMissing { path: python });
        }

        Ok(Self {
            python,
            script,
            project_root: project_root.to_path_buf(),
        })
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Run one operation to completion and capture its output.
    ///
    /// Nonzero exit surfaces the script's own message: stderr first,
    /// stdout when stderr is blank. No retries, no timeout.
    pub fn run(&self, command: &ToolCommand) -> Result<ToolOutput> {
        log::debug!("running: {}", command.display());

        let output = Command::new(&self.python)
            .arg(&self.script)
            .args(command.args())
            .current_dir(&self.project_root)
            .output()
            .map_err(|e| FoxdeskError::Spawn {
                message: format!("failed to run {}: {}", self.script.display(), e),
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        if !output.status.success() {
            let message = if stderr.trim().is_empty() {
                stdout.trim()
            } else {
                stderr.trim()
            };
            return Err(FoxdeskError::Tool {
                message: message.to_string(),
            });
        }

        Ok(ToolOutput { stdout, stderr })
    }

    pub fn list_profiles(&self) -> Result<Vec<ProfileRow>> {
        let output = self.run(&ToolCommand::list())?;
        parse_profile_list(&output.stdout)
    }

    pub fn create_profile(&self, form: &ProfileForm) -> Result<()> {
        self.run(&ToolCommand::create(form))?;
        Ok(())
    }

    pub fn edit_profile(&self, id: &str, form: &ProfileForm) -> Result<()> {
        self.run(&ToolCommand::edit(id, form))?;
        Ok(())
    }

    pub fn delete_profile(&self, id: &str, remove_storage: bool) -> Result<()> {
        self.run(&ToolCommand::delete(id, remove_storage))?;
        Ok(())
    }

    /// Open a profile's browser window; returns the script's status text.
    pub fn open_profile(&self, id: &str) -> Result<String> {
        let output = self.run(&ToolCommand::open(id))?;
        Ok(output.stdout.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, storage: &str, proxy: &str) -> ProfileForm {
        ProfileForm {
            name: name.to_string(),
            storage_path: storage.to_string(),
            proxy: proxy.to_string(),
        }
    }

    #[test]
    fn list_always_requests_json() {
        assert_eq!(ToolCommand::list().args(), ["list", "--json"]);
    }

    #[test]
    fn create_with_all_fields() {
        let cmd = ToolCommand::create(&form("work", "/data/work", "1.2.3.4:8080:u:p"));
        assert_eq!(
            cmd.args(),
            [
                "create",
                "work",
                "--proxy",
                "1.2.3.4:8080:u:p",
                "--storage-path",
                "/data/work",
            ]
        );
    }

    #[test]
    fn create_omits_blank_optional_flags() {
        let cmd = ToolCommand::create(&form("work", "", "  "));
        assert_eq!(cmd.args(), ["create", "work"]);
    }

    #[test]
    fn edit_omits_blank_fields() {
        let cmd = ToolCommand::edit("p1", &form("renamed", "", ""));
        assert_eq!(cmd.args(), ["edit", "p1", "--name", "renamed"]);
    }

    #[test]
    fn edit_with_all_fields() {
        let cmd = ToolCommand::edit("p1", &form("renamed", "/tmp/s", "h:1:u:p"));
        assert_eq!(
            cmd.args(),
            [
                "edit",
                "p1",
                "--name",
                "renamed",
                "--proxy",
                "h:1:u:p",
                "--storage-path",
                "/tmp/s",
            ]
        );
    }

    #[test]
    fn flag_values_are_trimmed() {
        let cmd = ToolCommand::edit("p1", &form("  renamed  ", "", ""));
        assert_eq!(cmd.args(), ["edit", "p1", "--name", "renamed"]);
    }

    #[test]
    fn delete_with_and_without_storage_removal() {
        assert_eq!(
            ToolCommand::delete("p1", true).args(),
            ["delete", "p1", "--remove-storage"]
        );
        assert_eq!(ToolCommand::delete("p1", false).args(), ["delete", "p1"]);
    }

    #[test]
    fn open_takes_only_the_id() {
        assert_eq!(ToolCommand::open("p1").args(), ["open", "p1"]);
    }

    #[test]
    fn display_joins_args() {
        assert_eq!(ToolCommand::list().display(), "list --json");
    }
}
