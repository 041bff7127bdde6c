use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use crate::{
    core::utils::{app_data_dir, config_file_in, data_dir_in},
    currency::LocaleConfig,
    domain::CategoryLabels,
    errors::{FinanceError, Result},
    storage::DEFAULT_STORAGE_KEY,
    utils::persistence::{ensure_dir, write_atomic},
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub locale: String,
    pub currency_symbol: String,
    pub decimal_separator: char,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grouping_separator: Option<char>,
    pub storage_key: String,
    /// Overrides `<home>/data` when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    /// Extra or replacement category display labels, keyed by category key.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub category_labels: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_filter: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        let locale = LocaleConfig::default();
        Self {
            locale: locale.language_tag,
            currency_symbol: locale.currency_symbol,
            decimal_separator: locale.decimal_separator,
            grouping_separator: locale.grouping_separator,
            storage_key: DEFAULT_STORAGE_KEY.into(),
            data_dir: None,
            category_labels: BTreeMap::new(),
            log_filter: None,
        }
    }
}

impl Config {
    pub fn locale_config(&self) -> LocaleConfig {
        LocaleConfig {
            language_tag: self.locale.clone(),
            currency_symbol: self.currency_symbol.clone(),
            decimal_separator: self.decimal_separator,
            grouping_separator: self.grouping_separator,
            ..LocaleConfig::default()
        }
    }

    /// Default labels with this config's overrides applied.
    pub fn category_labels(&self) -> CategoryLabels {
        CategoryLabels::default().with_overrides(self.category_labels.clone())
    }
}

/// Loads and saves [`Config`] under `<home>/config/config.json`.
pub struct ConfigManager {
    base: PathBuf,
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        Self::with_base_dir(app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        ensure_dir(&base)?;
        let path = config_file_in(&base);
        Ok(Self { base, path })
    }

    /// Returns defaults when no file exists yet.
    pub fn load(&self) -> Result<Config> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            serde_json::from_str(&data).map_err(|err| {
                FinanceError::Config(format!("`{}`: {}", self.path.display(), err))
            })
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        let json = serde_json::to_string_pretty(config)?;
        write_atomic(&self.path, &json)?;
        tracing::debug!(path = %self.path.display(), "configuration saved");
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory for the backup document: the configured override or `<home>/data`.
    pub fn data_dir(&self, config: &Config) -> PathBuf {
        config
            .data_dir
            .clone()
            .unwrap_or_else(|| data_dir_in(&self.base))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Category;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        let config = manager.load().unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.storage_key, "financialData");
        assert_eq!(manager.data_dir(&config), dir.path().join("data"));
    }

    #[test]
    fn save_then_load_keeps_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        let mut config = Config::default();
        config.grouping_separator = Some('.');
        config
            .category_labels
            .insert("pets".into(), "Animais".into());
        manager.save(&config).unwrap();

        let loaded = manager.load().unwrap();
        assert_eq!(loaded, config);
        assert_eq!(
            loaded.category_labels().label(&Category::from("pets")),
            "Animais"
        );
        assert_eq!(loaded.locale_config().grouping_separator, Some('.'));
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        std::fs::create_dir_all(manager.path().parent().unwrap()).unwrap();
        std::fs::write(manager.path(), r#"{"currency_symbol":"US$"}"#).unwrap();
        let config = manager.load().unwrap();
        assert_eq!(config.currency_symbol, "US$");
        assert_eq!(config.decimal_separator, ',');
    }

    #[test]
    fn malformed_file_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        std::fs::create_dir_all(manager.path().parent().unwrap()).unwrap();
        std::fs::write(manager.path(), "{").unwrap();
        assert!(matches!(manager.load(), Err(FinanceError::Config(_))));
    }
}
