use crate::domain::{format_labels, has_duplicate_labels, Catalog};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const MAX_PICKUP_DAYS: u32 = 14;

/// Shop configuration read from a JSON file. Every field is optional.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ShopConfig {
    pub catalog: Catalog,
    /// Where tracing output goes; no logging when unset
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config format: {0}")]
    Format(#[from] serde_json::Error),
    #[error("invalid catalog: {0}")]
    Invalid(String),
}

impl ShopConfig {
    /// Checks the catalog describes closed, unambiguous option sets.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let catalog = &self.catalog;

        if catalog.quantity_options.is_empty() {
            return Err(ConfigError::Invalid("no quantity options".to_string()));
        }
        let mut counts = HashSet::new();
        for option in &catalog.quantity_options {
            if option.count == 0 {
                return Err(ConfigError::Invalid(format!(
                    "quantity option `{}` must order at least one cupcake",
                    option.label
                )));
            }
            if !counts.insert(option.count) {
                return Err(ConfigError::Invalid(format!(
                    "quantity {} is offered twice",
                    option.count
                )));
            }
        }

        if catalog.flavors.is_empty() {
            return Err(ConfigError::Invalid("no flavors".to_string()));
        }
        let mut flavors = HashSet::new();
        for flavor in &catalog.flavors {
            if flavor.trim().is_empty() {
                return Err(ConfigError::Invalid("blank flavor name".to_string()));
            }
            if !flavors.insert(flavor.as_str()) {
                return Err(ConfigError::Invalid(format!("flavor `{}` is listed twice", flavor)));
            }
        }

        let pickup = &catalog.pickup;
        if pickup.days == 0 || pickup.days > MAX_PICKUP_DAYS {
            return Err(ConfigError::Invalid(format!(
                "pickup days must be between 1 and {}, got {}",
                MAX_PICKUP_DAYS, pickup.days
            )));
        }
        if pickup.date_format.trim().is_empty() {
            return Err(ConfigError::Invalid("blank date format".to_string()));
        }
        // Labels must render and stay distinct wherever in the calendar the
        // window starts, leap days included.
        for start in NaiveDate::default().iter_days().take(4 * 366) {
            let labels = format_labels(start, pickup.days, &pickup.date_format).map_err(|_| {
                ConfigError::Invalid(format!(
                    "date format `{}` cannot label a calendar date",
                    pickup.date_format
                ))
            })?;
            if has_duplicate_labels(&labels) {
                return Err(ConfigError::Invalid(format!(
                    "date format `{}` gives two of {} pickup days the same label",
                    pickup.date_format, pickup.days
                )));
            }
        }

        Ok(())
    }
}

pub struct ConfigRepository;

impl ConfigRepository {
    pub fn load(path: &Path) -> Result<ShopConfig, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: ShopConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(config: &ShopConfig, path: &Path) -> Result<(), ConfigError> {
        let json = Self::to_json(config)?;
        fs::write(path, json).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn to_json(config: &ShopConfig) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(config)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::QuantityOption;
    use tempfile::tempdir;

    #[test]
    fn test_default_config_is_valid() {
        assert!(ShopConfig::default().validate().is_ok());
    }

    #[test]
    fn test_load_partial_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("shop.json");
        fs::write(
            &path,
            r#"{ "catalog": { "pricing": { "unit_price": 3, "same_day_surcharge": 5 } }, "log_file": "cupcake.log" }"#,
        )
        .unwrap();

        let config = ConfigRepository::load(&path).unwrap();
        assert_eq!(config.catalog.pricing.unit_price, 3);
        assert_eq!(config.catalog.pricing.same_day_surcharge, 5);
        assert_eq!(config.catalog.flavors.len(), 5);
        assert_eq!(config.log_file, Some(PathBuf::from("cupcake.log")));
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("shop.json");
        let mut config = ShopConfig::default();
        config.catalog.flavors.push("Lemon".to_string());

        ConfigRepository::save(&config, &path).unwrap();
        assert_eq!(ConfigRepository::load(&path).unwrap(), config);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let err = ConfigRepository::load(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_load_malformed_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("shop.json");
        fs::write(&path, "{ not json").unwrap();
        let err = ConfigRepository::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Format(_)));
    }

    #[test]
    fn test_rejects_duplicate_quantities() {
        let mut config = ShopConfig::default();
        config.catalog.quantity_options.push(QuantityOption::new("Half dozen", 6));
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_zero_quantity_and_empty_sets() {
        let mut config = ShopConfig::default();
        config.catalog.quantity_options = vec![QuantityOption::new("None", 0)];
        assert!(config.validate().is_err());

        let mut config = ShopConfig::default();
        config.catalog.flavors.clear();
        assert!(config.validate().is_err());

        let mut config = ShopConfig::default();
        config.catalog.flavors.push("  ".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_pickup_schedule() {
        let mut config = ShopConfig::default();
        config.catalog.pickup.days = 0;
        assert!(config.validate().is_err());

        config.catalog.pickup.days = MAX_PICKUP_DAYS + 1;
        assert!(config.validate().is_err());

        config.catalog.pickup.days = 3;
        config.catalog.pickup.date_format = "%Q".to_string();
        assert!(config.validate().is_err());

        config.catalog.pickup.date_format = "%d/%m".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_time_only_date_format() {
        let mut config = ShopConfig::default();
        config.catalog.pickup.date_format = "%H:%M".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        config.catalog.pickup.date_format = "%a %b %-d %z".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_formats_that_repeat_labels() {
        let mut config = ShopConfig::default();
        config.catalog.pickup.date_format = "%a".to_string();
        config.catalog.pickup.days = 7;
        assert!(config.validate().is_ok());

        config.catalog.pickup.days = 8;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        config.catalog.pickup.date_format = "Pickup".to_string();
        config.catalog.pickup.days = 2;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_load_rejects_time_format() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("shop.json");
        fs::write(&path, r#"{ "catalog": { "pickup": { "date_format": "%H:%M" } } }"#).unwrap();
        assert!(matches!(
            ConfigRepository::load(&path),
            Err(ConfigError::Invalid(_))
        ));
    }
}
