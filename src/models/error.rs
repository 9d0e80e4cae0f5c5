use derive_more::Display;
use serde::{Deserialize, Serialize};
use specta::Type;

#[derive(Type, Serialize, Deserialize, Display, Debug)]
pub enum WError {
    #[display("IO error: {_0}")]
    Io(String),
    #[display("parse error: {_0}")]
    Parse(String),
    #[display("configuration error: {_0}")]
    Config(String),
    #[display("mods folder is not configured")]
    NotConfigured,
    #[display("not found: {_0}")]
    NotFound(String),
    #[display("mod operation failed: {_0}")]
    ModOperation(String),
    #[display("archive error: {_0}")]
    Archive(String),
    #[display("invalid input: {_0}")]
    InvalidInput(String),
    #[display("launcher is already running")]
    LauncherAlreadyRunning,
    #[display("async runtime error: {_0}")]
    AsyncRuntime(String),
    #[display("failed to push task status: {_0}")]
    StatusChannel(String),
    #[display("task context not provided")]
    ContextUnprovided,
}

impl std::error::Error for WError {}

impl From<std::io::Error> for WError {
    fn from(e: std::io::Error) -> Self {
        WError::Io(e.to_string())
    }
}

impl From<walkdir::Error> for WError {
    fn from(e: walkdir::Error) -> Self {
        WError::Io(e.to_string())
    }
}

impl From<zip::result::ZipError> for WError {
    fn from(e: zip::result::ZipError) -> Self {
        WError::Archive(e.to_string())
    }
}

impl From<serde_json::Error> for WError {
    fn from(e: serde_json::Error) -> Self {
        WError::Parse(e.to_string())
    }
}

impl From<toml::de::Error> for WError {
    fn from(e: toml::de::Error) -> Self {
        WError::Parse(e.to_string())
    }
}

impl From<toml::ser::Error> for WError {
    fn from(e: toml::ser::Error) -> Self {
        WError::Parse(e.to_string())
    }
}

impl From<ini::Error> for WError {
    fn from(e: ini::Error) -> Self {
        WError::Parse(e.to_string())
    }
}

impl From<confy::ConfyError> for WError {
    fn from(e: confy::ConfyError) -> Self {
        WError::Config(e.to_string())
    }
}
