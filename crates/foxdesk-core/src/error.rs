use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FoxdeskError {
    #[error("Management script not found: {path}\nRun foxdesk from the project root, or set [tool].script in foxdesk.toml")]
    ToolMissing { path: PathBuf },

    #[error("Python runtime not found: {path}\nMake sure the virtual environment is set up, or set [tool].runtime in foxdesk.toml")]
    RuntimeMissing { path: PathBuf },

    #[error("Failed to run management script: {message}")]
    Spawn { message: String },

    #[error("{message}")]
    Tool { message: String },

    #[error("Failed to parse profile list: {message}")]
    ProfileListParse { message: String },

    #[error("Config parse error in {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("GUI error: {0}")]
    Gui(String),
}

pub type Result<T> = std::result::Result<T, FoxdeskError>;

impl FoxdeskError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ToolMissing { .. } => 2,
            Self::RuntimeMissing { .. } => 3,
            Self::ConfigParse { .. } => 4,
            _ => 1,
        }
    }
}
