use super::error::Error;
use crate::io::{BurnupConfig, CollapseConfig, ScenarioConfig};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Where the scenario blocks of the main deck come from.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioSource {
    /// Built from an irradiation time and cooling schedule.
    Generated(ScenarioConfig),
    /// Copied verbatim from a user file.
    External(PathBuf),
}

impl Default for ScenarioSource {
    fn default() -> Self {
        ScenarioSource::Generated(ScenarioConfig::default())
    }
}

/// Options for every deck written per cell.
///
/// ```toml
/// [collapse]
/// library = "eaf"
///
/// [scenario.generated]
/// irradiation = 3.1536e7
/// cooling_times = [3600.0, 86400.0]
/// outputs = [0, 1, 1]
///
/// [burnup]
/// library = 2232
/// ```
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct DeckConfig {
    pub collapse: CollapseConfig,
    pub scenario: ScenarioSource,
    pub burnup: BurnupConfig,
}

impl DeckConfig {
    pub fn from_toml(text: &str) -> Result<Self, Error> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::DataLibrary;

    #[test]
    fn empty_config_uses_defaults() {
        let config = DeckConfig::from_toml("").unwrap();
        assert_eq!(config, DeckConfig::default());
        assert_eq!(config.scenario, ScenarioSource::Generated(ScenarioConfig::default()));
    }

    #[test]
    fn generated_scenario_from_toml() {
        let config = DeckConfig::from_toml(
            r#"
[collapse]
library = "other"

[scenario.generated]
irradiation = 7200.0
cooling_times = [3600.0, 86400.0]
outputs = [0, 1, 1]

[burnup]
title = "Beam dump"
"#,
        )
        .unwrap();
        assert_eq!(config.collapse.library, DataLibrary::Other);
        let ScenarioSource::Generated(scenario) = &config.scenario else {
            panic!("expected a generated scenario");
        };
        assert_eq!(scenario.irradiation, 7200.0);
        assert_eq!(scenario.outputs, vec![0, 1, 1]);
        assert_eq!(config.burnup.title, "Beam dump");
        assert_eq!(config.burnup.library, 2232);
    }

    #[test]
    fn external_scenario_from_toml() {
        let config = DeckConfig::from_toml("scenario = { external = \"pulses.sce\" }").unwrap();
        assert_eq!(config.scenario, ScenarioSource::External(PathBuf::from("pulses.sce")));
    }

    #[test]
    fn load_reads_a_file_and_reports_missing_ones() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deck.toml");
        std::fs::write(&path, "[burnup]\ntitle = \"Target\"\n").unwrap();
        assert_eq!(DeckConfig::load(&path).unwrap().burnup.title, "Target");

        let missing = dir.path().join("absent.toml");
        match DeckConfig::load(&missing) {
            Err(Error::ConfigRead { path, .. }) => assert_eq!(path, missing),
            other => panic!("expected a config read error, got {other:?}"),
        }
    }

    #[test]
    fn unknown_library_is_a_config_error() {
        assert!(matches!(
            DeckConfig::from_toml("[collapse]\nlibrary = \"jeff\""),
            Err(Error::Config(_))
        ));
    }
}
