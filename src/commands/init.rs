use crate::libs::config::Config;
use anyhow::Result;

/// Interactive configuration setup.
pub fn cmd() -> Result<()> {
    Config::init()?;
    Ok(())
}
