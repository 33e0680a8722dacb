//! Command implementations, one module per subcommand.

pub mod audit_cmd;
pub mod check;
pub mod completions;
#[cfg(feature = "history")]
pub mod history_cmd;
pub mod keygen;
pub mod seal;
