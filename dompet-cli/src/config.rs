use anyhow::{Context, Result, anyhow, bail};
use chrono_tz::Tz;
use dompet_core::CategoryTaxonomy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::state::default_config_path;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub locale: LocaleSection,
    #[serde(default)]
    pub limits: LimitsSection,
    #[serde(default)]
    pub categories: CategoryTaxonomy,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LocaleSection {
    /// IANA zone used for "today" when a message has no date
    pub timezone: String,
    pub currency_symbol: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LimitsSection {
    /// Dates further ahead than this are rejected
    pub max_future_days: i64,
    pub min_amount: f64,
    pub max_amount: f64,
}

impl Default for LocaleSection {
    fn default() -> Self {
        Self {
            timezone: "Asia/Jakarta".to_string(),
            currency_symbol: "Rp".to_string(),
        }
    }
}

impl Default for LimitsSection {
    fn default() -> Self {
        Self {
            max_future_days: 365,
            min_amount: 0.01,
            max_amount: 1_000_000_000.0,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        self.locale
            .timezone
            .parse::<Tz>()
            .map_err(|_| anyhow!("invalid timezone: {}", self.locale.timezone))?;

        let limits = &self.limits;
        if limits.max_future_days < 0 {
            bail!("limits.max_future_days must not be negative");
        }
        if !(limits.min_amount >= 0.0 && limits.min_amount <= limits.max_amount) {
            bail!(
                "limits.min_amount ({}) must be between 0 and max_amount ({})",
                limits.min_amount,
                limits.max_amount
            );
        }

        self.categories.validate().context("invalid [categories]")?;
        Ok(())
    }
}

/// `--config` when given, otherwise `~/.dompet/config.toml`
pub fn config_path(explicit: Option<&Path>) -> Result<PathBuf> {
    match explicit {
        Some(p) => Ok(p.to_path_buf()),
        None => default_config_path(),
    }
}

/// Load and validate; a missing file means defaults.
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: Config =
        toml::from_str(&s).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("validate {}", path.display()))?;
    Ok(cfg)
}

pub fn save_config(cfg: &Config, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    }
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(path, s).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

/// Write the default config unless one exists. Returns whether it wrote.
pub fn init_config(path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    save_config(&Config::default(), path)?;
    Ok(true)
}
