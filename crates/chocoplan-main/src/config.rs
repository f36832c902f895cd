// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of ChocoPlan.
//
// Licensed under the Creative Commons Attribution-NonCommercial-NoDerivatives 4.0 International
// (CC BY-NC-ND 4.0). You may use and share this file for non-commercial purposes only and you may not
// create derivatives. See <https://creativecommons.org/licenses/by-nc-nd/4.0/>.
//
// This software is provided "AS IS", without warranty of any kind.
//
// For commercial licensing, please contact: info@solare.cz


//! Configuration loading for the `chocoplan` binary
//!
//! Lookup order: an explicit `--config` path, then `chocoplan.toml` and
//! `chocoplan.json` in the working directory, else built-in defaults with
//! environment overrides. Whatever is loaded is validated before use.

use std::path::Path;

use anyhow::{Context, Result, bail};
use chocoplan_core::ValidateConfig;
use chocoplan_types::PlannerConfig;
use tracing::{info, warn};

const TOML_FILE: &str = "chocoplan.toml";
const JSON_FILE: &str = "chocoplan.json";

pub fn load_config(explicit: Option<&Path>) -> Result<PlannerConfig> {
    load_config_in(Path::new("."), explicit)
}

fn load_config_in(dir: &Path, explicit: Option<&Path>) -> Result<PlannerConfig> {
    if let Some(path) = explicit {
        let config = load_file(path)?;
        info!("✅ Loaded configuration from {}", path.display());
        return checked(config);
    }

    for name in [TOML_FILE, JSON_FILE] {
        let path = dir.join(name);
        if path.is_file() {
            let config = load_file(&path)?;
            info!("✅ Loaded configuration from {name}");
            return checked(config);
        }
    }

    warn!("No configuration file found, using defaults with environment overrides");
    checked(from_env())
}

fn load_file(path: &Path) -> Result<PlannerConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => {
            toml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
        }
        Some("json") => serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display())),
        _ => bail!(
            "Unsupported configuration format for {} (expected .toml or .json)",
            path.display()
        ),
    }
}

fn checked(config: PlannerConfig) -> Result<PlannerConfig> {
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

/// Defaults with `CHOCOPLAN_*` environment overrides
fn from_env() -> PlannerConfig {
    with_overrides(PlannerConfig::default(), |key| std::env::var(key).ok())
}

fn with_overrides(mut config: PlannerConfig, lookup: impl Fn(&str) -> Option<String>) -> PlannerConfig {
    // Override batch size
    if let Some(value) = lookup("CHOCOPLAN_BATCH_SIZE_KG")
        && let Ok(kg) = value.parse::<f64>()
    {
        config.production.batch_size_kg = kg;
    }

    // Override daily target
    if let Some(value) = lookup("CHOCOPLAN_DAILY_TARGET_KG")
        && let Ok(kg) = value.parse::<f64>()
    {
        config.production.daily_target_kg = kg;
    }

    // Override price ceiling used for hour scoring
    if let Some(value) = lookup("CHOCOPLAN_PRICE_CEILING")
        && let Ok(ceiling) = value.parse::<f64>()
    {
        config.scoring.price_ceiling = ceiling;
    }

    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::{Builder, TempDir};

    #[test]
    fn test_explicit_toml_file() {
        let mut file = Builder::new().suffix(".toml").tempfile().unwrap();
        write!(
            file,
            "[production]\nbatch_size_kg = 25.0\ndaily_target_kg = 500.0\n\n[collaborators]\ntimeout_ms = 500\n"
        )
        .unwrap();

        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.production.batch_size_kg, 25.0);
        assert_eq!(config.production.daily_target_kg, 500.0);
        assert_eq!(config.collaborators.timeout_ms, 500);
        assert_eq!(config.production.default_quality, "standard");
    }

    #[test]
    fn test_explicit_json_file() {
        let mut file = Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"scoring": {{"price_ceiling": 0.5}}}}"#).unwrap();

        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.scoring.price_ceiling, 0.5);
        assert_eq!(config.scoring.price_weight, 0.6);
    }

    #[test]
    fn test_unknown_extension_rejected() {
        let file = Builder::new().suffix(".yaml").tempfile().unwrap();
        let err = load_config(Some(file.path())).unwrap_err();
        assert!(err.to_string().contains("Unsupported configuration format"));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let mut file = Builder::new().suffix(".toml").tempfile().unwrap();
        write!(file, "[production]\nbatch_size_kg = 0.0\n").unwrap();

        let err = load_config(Some(file.path())).unwrap_err();
        assert!(err.to_string().contains("Invalid configuration"));
    }

    #[test]
    fn test_toml_preferred_over_json() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(TOML_FILE),
            "[production]\ndaily_target_kg = 120.0\n",
        )
        .unwrap();
        std::fs::write(
            dir.path().join(JSON_FILE),
            r#"{"production": {"daily_target_kg": 80.0}}"#,
        )
        .unwrap();

        let config = load_config_in(dir.path(), None).unwrap();
        assert_eq!(config.production.daily_target_kg, 120.0);

        std::fs::remove_file(dir.path().join(TOML_FILE)).unwrap();
        let config = load_config_in(dir.path(), None).unwrap();
        assert_eq!(config.production.daily_target_kg, 80.0);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(TOML_FILE), "[production\n").unwrap();

        let err = load_config_in(dir.path(), None).unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
    }

    #[test]
    fn test_env_overrides() {
        let env = HashMap::from([
            ("CHOCOPLAN_BATCH_SIZE_KG", "20"),
            ("CHOCOPLAN_PRICE_CEILING", "0.45"),
            ("CHOCOPLAN_DAILY_TARGET_KG", "lots"),
        ]);
        let config = with_overrides(PlannerConfig::default(), |key| {
            env.get(key).map(|v| (*v).to_owned())
        });

        assert_eq!(config.production.batch_size_kg, 20.0);
        assert_eq!(config.scoring.price_ceiling, 0.45);
        // Unparseable values keep the default
        assert_eq!(config.production.daily_target_kg, 200.0);
    }
}
