use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::output::table::TableOptions;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportConfig {
    #[serde(default = "default_top_pages")]
    pub top_pages: usize,
    #[serde(default)]
    pub show_unflagged: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExportConfig {
    #[serde(default = "default_export_directory")]
    pub directory: String,
}

#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub top_pages: Option<usize>,
    pub show_unflagged: Option<bool>,
    pub export_directory: Option<String>,
}

impl Config {
    pub fn default_path() -> PathBuf {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.join(".config/core-update-analyzer/config.toml")
    }

    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path
            .map(|p| p.to_path_buf())
            .unwrap_or_else(Self::default_path);
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = fs::read_to_string(&path)
            .with_context(|| format!("failed reading config: {}", path.display()))?;
        let parsed: Self = toml::from_str(&data)
            .with_context(|| format!("failed parsing TOML config: {}", path.display()))?;
        Ok(parsed)
    }

    pub fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(top_pages) = overrides.top_pages {
            self.report.top_pages = top_pages;
        }
        if let Some(show_unflagged) = overrides.show_unflagged {
            self.report.show_unflagged = show_unflagged;
        }
        if let Some(directory) = overrides.export_directory {
            self.export.directory = directory;
        }
    }

    pub fn write_template(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("failed creating config directory: {}", parent.display())
            })?;
        }
        fs::write(path, Self::default_template())
            .with_context(|| format!("failed writing config template: {}", path.display()))
    }

    pub fn resolved_export_dir(&self) -> PathBuf {
        expand_tilde(&self.export.directory)
    }

    pub fn table_options(&self) -> TableOptions {
        TableOptions {
            top_pages: self.report.top_pages,
            show_unflagged: self.report.show_unflagged,
        }
    }

    pub fn default_template() -> String {
        let template = r#"[report]
# Pages shown in the terminal table. The CSV export is never truncated.
top_pages = 20
# Also list pages without any detected problem.
show_unflagged = false

[export]
# Where --export writes core-update-analysis-<date>.csv
directory = "."
"#;
        template.to_string()
    }
}

pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            top_pages: default_top_pages(),
            show_unflagged: false,
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            directory: default_export_directory(),
        }
    }
}

fn default_top_pages() -> usize {
    20
}

fn default_export_directory() -> String {
    ".".to_string()
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::{expand_tilde, Config, ConfigOverrides};

    #[test]
    fn template_parses_to_defaults() {
        let parsed: Config =
            toml::from_str(&Config::default_template()).expect("template should parse");
        assert_eq!(parsed, Config::default());
    }

    #[test]
    fn partial_config_fills_defaults() {
        let parsed: Config = toml::from_str("[report]\nshow_unflagged = true\n")
            .expect("partial config should parse");
        assert!(parsed.report.show_unflagged);
        assert_eq!(parsed.report.top_pages, 20);
        assert_eq!(parsed.export.directory, ".");
    }

    #[test]
    fn overrides_replace_only_supplied_values() {
        let mut config = Config::default();
        config.apply_overrides(ConfigOverrides {
            top_pages: Some(5),
            show_unflagged: None,
            export_directory: Some("reports".to_string()),
        });
        assert_eq!(config.report.top_pages, 5);
        assert!(!config.report.show_unflagged);
        assert_eq!(config.resolved_export_dir(), PathBuf::from("reports"));
    }

    #[test]
    fn missing_config_file_falls_back_to_defaults() {
        let path = std::env::temp_dir().join("core-update-analyzer-missing/config.toml");
        let config = Config::load(Some(&path)).expect("load should not fail");
        assert_eq!(config, Config::default());
    }

    #[test]
    fn relative_paths_are_not_expanded() {
        assert_eq!(expand_tilde("out/csv"), PathBuf::from("out/csv"));
    }
}
