//! Project settings (`.vaultaudit.toml`).

pub mod settings;

pub use settings::{OutputFormat, Settings};
