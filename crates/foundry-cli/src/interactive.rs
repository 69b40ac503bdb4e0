//! Confirmation prompts
//!
//! Uses dialoguer when attached to a terminal. Without one, a prompt can
//! only be satisfied with `--yes`.

use std::io::IsTerminal;

use dialoguer::Confirm;

use crate::error::{CliError, Result};

/// Ask before a destructive or writing step
pub fn confirm(prompt: &str, assume_yes: bool) -> Result<bool> {
    if assume_yes {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::user(
            "Confirmation required but stdin is not a terminal; pass --yes",
        ));
    }
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()?)
}
