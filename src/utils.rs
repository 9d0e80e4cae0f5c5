pub mod context;
pub mod file;
pub mod icon;
pub mod process;
pub mod toml;
