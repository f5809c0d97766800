use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::analysis::window::{AnalysisOptions, EdgePolicy, TimeAxis};
use crate::data::loader::DEFAULT_HEADER_LINES;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Settings read from an optional JSON file. Every field has a default, so
/// `{}` is a valid configuration.
///
/// ```json
/// {
///   "header_lines": 7,
///   "signal_label": "BIO 1",
///   "output_dir": "exports",
///   "time_axis": "row_index",
///   "edge_policy": "clip"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Metadata lines before the first data row.
    pub header_lines: usize,
    /// Name of the signal column in exported files.
    pub signal_label: String,
    /// Directory exported CSV files are written to.
    pub output_dir: PathBuf,
    pub time_axis: TimeAxis,
    pub edge_policy: EdgePolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            header_lines: DEFAULT_HEADER_LINES,
            signal_label: "BIO 1".to_string(),
            output_dir: PathBuf::from("."),
            time_axis: TimeAxis::default(),
            edge_policy: EdgePolicy::default(),
        }
    }
}

impl Config {
    /// Read a configuration file, or use defaults when `path` is `None`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Config = serde_json::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        log::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn analysis_options(&self) -> AnalysisOptions {
        AnalysisOptions {
            time_axis: self.time_axis,
            edge_policy: self.edge_policy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_yields_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.header_lines, 7);
        assert_eq!(config.edge_policy, EdgePolicy::Clip);
    }

    #[test]
    fn enums_use_snake_case_names() {
        let config: Config =
            serde_json::from_str(r#"{"time_axis": "elapsed", "edge_policy": "fail"}"#).unwrap();
        assert_eq!(config.time_axis, TimeAxis::Elapsed);
        assert_eq!(config.analysis_options().edge_policy, EdgePolicy::Fail);
    }

    #[test]
    fn load_reads_file_and_reports_bad_json() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.json");
        std::fs::write(&good, r#"{"signal_label": "BIO 2", "output_dir": "out"}"#).unwrap();
        let config = Config::load(Some(&good)).unwrap();
        assert_eq!(config.signal_label, "BIO 2");
        assert_eq!(config.output_dir, PathBuf::from("out"));

        let bad = dir.path().join("bad.json");
        std::fs::write(&bad, "{ nope").unwrap();
        let err = Config::load(Some(&bad)).unwrap_err();
        assert!(format!("{err:#}").contains("parsing config"));
    }

    #[test]
    fn no_path_means_defaults() {
        assert_eq!(Config::load(None).unwrap(), Config::default());
    }
}
