use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::{
    core::utils::{ensure_dir, PathResolver},
    currency::{self, LocaleConfig},
    errors::ConfigError,
};

const TMP_SUFFIX: &str = "tmp";
const DEFAULT_ROWS_PER_PAGE: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub locale: String,
    pub currency: String,
    /// Overrides the default `transactions.json` inside the data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_file: Option<PathBuf>,
    #[serde(default = "default_rows_per_page")]
    pub rows_per_page: usize,
}

fn default_rows_per_page() -> usize {
    DEFAULT_ROWS_PER_PAGE
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "ja-JP".into(),
            currency: "JPY".into(),
            data_file: None,
            rows_per_page: DEFAULT_ROWS_PER_PAGE,
        }
    }
}

impl Config {
    /// Location of the JSON transaction store for a data directory.
    pub fn transactions_path(&self, base: &Path) -> PathBuf {
        match &self.data_file {
            Some(path) if path.is_absolute() => path.clone(),
            Some(path) => base.join(path),
            None => PathResolver::transactions_file_in(base),
        }
    }

    pub fn locale_config(&self) -> LocaleConfig {
        LocaleConfig::for_tag(&self.locale)
    }

    /// Renders `amount` in the configured currency and locale.
    pub fn format_amount(&self, amount: i64) -> String {
        currency::format_currency(&self.locale_config(), &self.currency, amount)
    }
}

pub struct ConfigManager {
    base: PathBuf,
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, ConfigError> {
        Self::with_base_dir(PathResolver::base_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, ConfigError> {
        ensure_dir(&base)?;
        Ok(Self {
            path: PathResolver::config_file_in(&base),
            base,
        })
    }

    pub fn load(&self) -> Result<Config, ConfigError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent() {
            ensure_dir(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    pub fn base_dir(&self) -> &Path {
        &self.base
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        assert_eq!(manager.load().unwrap(), Config::default());
    }

    #[test]
    fn save_then_load_preserves_settings() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().join("nested")).unwrap();
        let config = Config {
            rows_per_page: 10,
            data_file: Some(PathBuf::from("household.json")),
            ..Config::default()
        };
        manager.save(&config).unwrap();
        assert_eq!(manager.load().unwrap(), config);
        assert_eq!(
            config.transactions_path(manager.base_dir()),
            temp.path().join("nested").join("household.json")
        );
    }

    #[test]
    fn rows_per_page_defaults_when_absent() {
        let parsed: Config =
            serde_json::from_str(r#"{"locale":"en-US","currency":"USD"}"#).unwrap();
        assert_eq!(parsed.rows_per_page, 5);
        assert!(parsed.data_file.is_none());
        assert_eq!(parsed.format_amount(-1_250), "-$1,250");
    }

    #[test]
    fn amounts_follow_locale_and_currency() {
        assert_eq!(Config::default().format_amount(292_000), "¥292,000");
        let german = Config {
            locale: "de-DE".into(),
            currency: "EUR".into(),
            ..Config::default()
        };
        assert_eq!(german.format_amount(292_000), "292.000 €");
    }
}
