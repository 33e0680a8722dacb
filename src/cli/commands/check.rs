//! `vaultaudit check` — run the password checks on one password.
//!
//! Usage:
//!   vaultaudit check              # prompts without echo
//!   vaultaudit check 'hunter2'

use crate::audit::{estimate_entropy, password_checks};
use crate::cli::output;
use crate::cli::prompt_password;
use crate::errors::Result;

/// Execute the `check` command.
pub fn execute(password: Option<&str>) -> Result<()> {
    let password = prompt_password(password)?;

    let checks = password_checks(Some(password.as_str()));
    output::print_checks(&checks);

    let passed = checks.iter().filter(|c| c.passed).count();
    if passed == checks.len() {
        output::success(&format!("All {} checks passed.", checks.len()));
    } else {
        output::warning(&format!(
            "{passed}/{} checks passed (estimated entropy {} bits).",
            checks.len(),
            estimate_entropy(&password)
        ));
    }

    Ok(())
}
