use anyhow::{Context, Result};
use std::path::PathBuf;

pub fn dompet_home() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".dompet"))
}

pub fn default_config_path() -> Result<PathBuf> {
    Ok(dompet_home()?.join("config.toml"))
}
