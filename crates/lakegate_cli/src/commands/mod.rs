pub mod init;
pub mod run;
pub mod transform;
pub mod validate;

use anyhow::{Result, bail};

/// Rejects unknown output formats before any work happens.
pub fn check_format(format: &str) -> Result<()> {
    match format {
        "text" | "json" => Ok(()),
        other => bail!("unsupported output format: {other} (expected text or json)"),
    }
}
