use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use illimity_core::EngineConfig;
use illimity_core::config::DEFAULT_IMPORT_PREFIX;

use crate::state::ensure_illimity_home;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub ynab: YnabSection,
    #[serde(default)]
    pub source: SourceSection,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct YnabSection {
    /// Account the notifications belong to
    pub account_id: String,
    /// Payee id of the "Transfer : Cash" payee, used for ATM withdrawals
    pub cash_account_transfer_payee_id: String,
    #[serde(default = "default_import_id_prefix")]
    pub import_id_prefix: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SourceSection {
    /// Directory of exported notifications (.eml / .txt)
    pub inbox: PathBuf,
    /// Where processed notifications are moved by `sync --archive`
    pub archive: PathBuf,
}

fn default_import_id_prefix() -> String {
    DEFAULT_IMPORT_PREFIX.to_string()
}

impl Default for SourceSection {
    fn default() -> Self {
        Self {
            inbox: PathBuf::from("inbox"),
            archive: PathBuf::from("processed"),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ynab: YnabSection {
                account_id: String::new(),
                cash_account_transfer_payee_id: String::new(),
                import_id_prefix: default_import_id_prefix(),
            },
            source: SourceSection::default(),
        }
    }
}

/// Command-line values that take precedence over the file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub account_id: Option<String>,
    pub cash_payee_id: Option<String>,
}

impl Config {
    pub fn engine_config(&self, overrides: &Overrides) -> EngineConfig {
        let account_id = overrides
            .account_id
            .clone()
            .unwrap_or_else(|| self.ynab.account_id.clone());
        let cash_payee_id = overrides
            .cash_payee_id
            .clone()
            .unwrap_or_else(|| self.ynab.cash_account_transfer_payee_id.clone());

        EngineConfig::new(account_id, cash_payee_id).with_import_prefix(self.ynab.import_id_prefix.clone())
    }

    /// Same as [`engine_config`](Self::engine_config) but refuses an empty account id.
    pub fn sync_engine_config(&self, overrides: &Overrides) -> Result<EngineConfig> {
        let cfg = self.engine_config(overrides);
        if cfg.account_id.trim().is_empty() {
            bail!(
                "ynab.account_id is not set. Edit {} or pass --account-id",
                config_path()?.display()
            );
        }
        Ok(cfg)
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_illimity_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    load_config_from(&config_path()?)
}

pub fn load_config_from(p: &Path) -> Result<Config> {
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn save_config_to(cfg: &Config, p: &Path) -> Result<()> {
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config_to(&Config::default(), &p)?;
    println!("Wrote {}", p.display());
    println!("Fill in ynab.account_id and ynab.cash_account_transfer_payee_id before running sync.");
    Ok(())
}
