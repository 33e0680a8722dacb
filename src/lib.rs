pub mod audit;
pub mod cli;
pub mod config;
pub mod crypto;
pub mod errors;
pub mod vault;

#[cfg(feature = "history")]
pub mod history;
