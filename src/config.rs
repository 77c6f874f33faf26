//! Configuration management for the ATS analyzer

use crate::error::{AtsError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const WEIGHT_TOLERANCE: f64 = 0.001;

const TEXT_WEIGHT_KEYS: [&str; 5] = ["keywords", "formatting", "completeness", "structure", "readability"];
const RECORD_WEIGHT_KEYS: [&str; 5] = ["keywords", "formatting", "completeness", "structure", "best_practices"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub extraction: ExtractionConfig,
    pub scoring: ScoringConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionConfig {
    pub enable_cache: bool,
    /// Ask `pdf-extract` for PDF text before falling back to the stream scanner.
    pub structured_pdf: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub text_weights: TextWeights,
    pub record_weights: RecordWeights,
}

/// Weights of the five free-text sub-scores.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextWeights {
    pub keywords: f64,
    pub formatting: f64,
    pub completeness: f64,
    pub structure: f64,
    pub readability: f64,
}

/// Weights of the five structured-record sub-scores.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecordWeights {
    pub keywords: f64,
    pub formatting: f64,
    pub completeness: f64,
    pub structure: f64,
    pub best_practices: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
    Html,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Result<Self> {
        match value.to_lowercase().as_str() {
            "console" => Ok(OutputFormat::Console),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "html" => Ok(OutputFormat::Html),
            other => Err(AtsError::InvalidInput(format!(
                "Unknown output format: {}. Use console, json, markdown or html",
                other
            ))),
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Console => "txt",
            OutputFormat::Json => "json",
            OutputFormat::Markdown => "md",
            OutputFormat::Html => "html",
        }
    }
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            enable_cache: true,
            structured_pdf: false,
        }
    }
}

impl Default for TextWeights {
    fn default() -> Self {
        Self {
            keywords: 0.30,
            formatting: 0.20,
            completeness: 0.20,
            structure: 0.15,
            readability: 0.15,
        }
    }
}

impl TextWeights {
    pub fn total(&self) -> f64 {
        self.keywords + self.formatting + self.completeness + self.structure + self.readability
    }

    /// Fields in [`TEXT_WEIGHT_KEYS`] order.
    fn fields_mut(&mut self) -> [&mut f64; 5] {
        [
            &mut self.keywords,
            &mut self.formatting,
            &mut self.completeness,
            &mut self.structure,
            &mut self.readability,
        ]
    }
}

impl Default for RecordWeights {
    fn default() -> Self {
        Self {
            keywords: 0.30,
            formatting: 0.25,
            completeness: 0.20,
            structure: 0.15,
            best_practices: 0.10,
        }
    }
}

impl RecordWeights {
    pub fn total(&self) -> f64 {
        self.keywords + self.formatting + self.completeness + self.structure + self.best_practices
    }

    /// Fields in [`RECORD_WEIGHT_KEYS`] order.
    fn fields_mut(&mut self) -> [&mut f64; 5] {
        [
            &mut self.keywords,
            &mut self.formatting,
            &mut self.completeness,
            &mut self.structure,
            &mut self.best_practices,
        ]
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Console,
            detailed: false,
            color_output: true,
        }
    }
}

impl Config {
    /// Load from the default location, writing defaults if no file exists yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)?;
            config.validate()?;
            log::debug!("Loaded configuration from {}", path.display());
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(path)?;
            log::info!("Wrote default configuration to {}", path.display());
            Ok(config)
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| AtsError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("ats-analyzer")
            .join("config.toml")
    }

    /// Both weight sets must sum to one.
    pub fn validate(&self) -> Result<()> {
        let text_total = self.scoring.text_weights.total();
        if (text_total - 1.0).abs() > WEIGHT_TOLERANCE {
            return Err(AtsError::Configuration(format!(
                "scoring.text_weights must sum to 1.0 (got {:.3})",
                text_total
            )));
        }

        let record_total = self.scoring.record_weights.total();
        if (record_total - 1.0).abs() > WEIGHT_TOLERANCE {
            return Err(AtsError::Configuration(format!(
                "scoring.record_weights must sum to 1.0 (got {:.3})",
                record_total
            )));
        }

        Ok(())
    }

    /// Update one scalar setting addressed by a dotted key such as
    /// `scoring.text_weights.keywords`.
    ///
    /// Setting one weight rescales the other four in its set proportionally, so the
    /// set still sums to one and the result passes [`Config::validate`].
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        if let Some(name) = key.strip_prefix("scoring.text_weights.") {
            let index = weight_index(key, name, &TEXT_WEIGHT_KEYS)?;
            let weight = parse_weight(key, value)?;
            rebalance(self.scoring.text_weights.fields_mut(), index, weight);
            return Ok(());
        }
        if let Some(name) = key.strip_prefix("scoring.record_weights.") {
            let index = weight_index(key, name, &RECORD_WEIGHT_KEYS)?;
            let weight = parse_weight(key, value)?;
            rebalance(self.scoring.record_weights.fields_mut(), index, weight);
            return Ok(());
        }

        match key {
            "extraction.enable_cache" => self.extraction.enable_cache = parse_bool(key, value)?,
            "extraction.structured_pdf" => self.extraction.structured_pdf = parse_bool(key, value)?,

            "output.format" => self.output.format = OutputFormat::parse(value)?,
            "output.detailed" => self.output.detailed = parse_bool(key, value)?,
            "output.color_output" => self.output.color_output = parse_bool(key, value)?,

            _ => {
                return Err(AtsError::Configuration(format!("Unknown config key: {}", key)));
            }
        }
        Ok(())
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    value
        .parse::<bool>()
        .map_err(|_| AtsError::Configuration(format!("{} expects true or false, got '{}'", key, value)))
}

fn weight_index(key: &str, name: &str, names: &[&str; 5]) -> Result<usize> {
    names
        .iter()
        .position(|n| *n == name)
        .ok_or_else(|| AtsError::Configuration(format!("Unknown config key: {}", key)))
}

/// Set `weights[index]` to `value` and scale the rest to fill `1 - value`.
fn rebalance(mut weights: [&mut f64; 5], index: usize, value: f64) {
    let others: f64 = weights
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != index)
        .map(|(_, w)| **w)
        .sum();
    let remaining = 1.0 - value;

    for (i, weight) in weights.iter_mut().enumerate() {
        if i == index {
            **weight = value;
        } else if others > 0.0 {
            **weight *= remaining / others;
        } else {
            **weight = remaining / 4.0;
        }
    }
}

fn parse_weight(key: &str, value: &str) -> Result<f64> {
    let weight = value
        .parse::<f64>()
        .map_err(|_| AtsError::Configuration(format!("{} expects a number, got '{}'", key, value)))?;
    if !(0.0..=1.0).contains(&weight) {
        return Err(AtsError::Configuration(format!(
            "{} must be between 0 and 1, got {}",
            key, weight
        )));
    }
    Ok(weight)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_weights_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert!((config.scoring.text_weights.total() - 1.0).abs() < 1e-9);
        assert!((config.scoring.record_weights.total() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_unbalanced_weights_rejected() {
        let mut config = Config::default();
        config.scoring.text_weights.keywords = 0.5;
        assert!(matches!(config.validate(), Err(AtsError::Configuration(_))));
    }

    #[test]
    fn test_missing_file_writes_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load_from(&path).unwrap();

        assert_eq!(config, Config::default());
        assert!(path.exists());
    }

    #[test]
    fn test_round_trip_through_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.set_value("output.format", "markdown").unwrap();
        config.set_value("extraction.structured_pdf", "true").unwrap();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.output.format, OutputFormat::Markdown);
        assert!(loaded.extraction.structured_pdf);
    }

    #[test]
    fn test_invalid_file_is_configuration_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "this is = = not toml").unwrap();

        assert!(matches!(Config::load_from(&path), Err(AtsError::Configuration(_))));
    }

    #[test]
    fn test_set_value_rejects_bad_input() {
        let mut config = Config::default();
        assert!(config.set_value("output.detailed", "yes").is_err());
        assert!(config.set_value("scoring.text_weights.keywords", "1.5").is_err());
        assert!(config.set_value("no.such.key", "1").is_err());

        assert!(config.set_value("scoring.text_weights.bogus", "0.1").is_err());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_set_weight_rescales_the_rest() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.set_value("scoring.text_weights.keywords", "0.35").unwrap();
        config.validate().unwrap();
        config.save_to(&path).unwrap();

        let weights = Config::load_from(&path).unwrap().scoring.text_weights;
        assert_eq!(weights.keywords, 0.35);
        assert!((weights.formatting - 0.20 * 0.65 / 0.70).abs() < 1e-9);
        assert!((weights.readability - 0.15 * 0.65 / 0.70).abs() < 1e-9);
        assert!((weights.total() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_set_record_weight_to_one() {
        let mut config = Config::default();
        config.set_value("scoring.record_weights.best_practices", "1.0").unwrap();
        config.validate().unwrap();
        assert_eq!(config.scoring.record_weights.keywords, 0.0);

        // with every other weight at zero the remainder is split evenly
        config.set_value("scoring.record_weights.best_practices", "0.6").unwrap();
        config.validate().unwrap();
        assert!((config.scoring.record_weights.structure - 0.1).abs() < 1e-9);
    }
}
