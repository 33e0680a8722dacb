//! `vaultaudit keygen` — print a fresh base64 encryption key.

use crate::crypto::generate_key;
use crate::errors::Result;

/// Execute the `keygen` command.
///
/// The key goes to stdout alone so it can be piped or captured.
pub fn execute() -> Result<()> {
    println!("{}", generate_key());
    Ok(())
}
