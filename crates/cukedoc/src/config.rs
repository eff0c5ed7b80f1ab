//! Run configuration.
//!
//! [`ReportConfig`] is what one report generation needs to know. The CLI
//! fills it from an optional TOML file and then from flags; library callers
//! build it directly.

use std::fs;
use std::path::{Path, PathBuf};

use cukedoc_error::{CukedocError, Result};
use cukedoc_render::{RenderSettings, StatusPalette};
use serde::{Deserialize, Serialize};

use crate::logging::LogLevel;

/// Colors of the three basic statuses, as `#RGB` or `#RRGGBB`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StatusColors {
    pub passed: String,
    pub failed: String,
    pub skipped: String,
}

impl Default for StatusColors {
    fn default() -> Self {
        let palette = StatusPalette::default();
        Self {
            passed: palette.passed,
            failed: palette.failed,
            skipped: palette.skipped,
        }
    }
}

/// One key/value pair shown on the start page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CustomParameter {
    pub key: String,
    pub value: String,
}

impl CustomParameter {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Configuration of one report generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
    /// Directory holding the Cucumber JSON files. Not searched recursively.
    pub source_dir: PathBuf,
    /// Directory the report is written to. Created when missing.
    pub destination_dir: PathBuf,
    pub custom_page_title: String,
    pub status_colors: StatusColors,
    pub expand_before_after_hooks: bool,
    pub expand_step_hooks: bool,
    pub expand_doc_strings: bool,
    pub expand_attachments: bool,
    /// Shown on the start page in this order.
    pub custom_parameters: Vec<CustomParameter>,
    /// Properties file with more parameters, appended after the inline ones.
    pub custom_parameters_file: Option<PathBuf>,
    pub fail_scenarios_on_pending_or_undefined_steps: bool,
    /// Stylesheet copied to `css/custom.css` and linked from every page.
    pub custom_css: Option<PathBuf>,
    /// `default`, `compact`, `minimal` or `off`.
    pub log_level: String,
    /// Do nothing at all.
    pub skip: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::new(),
            destination_dir: PathBuf::new(),
            custom_page_title: "Cucumber Report".to_owned(),
            status_colors: StatusColors::default(),
            expand_before_after_hooks: false,
            expand_step_hooks: false,
            expand_doc_strings: false,
            expand_attachments: true,
            custom_parameters: Vec::new(),
            custom_parameters_file: None,
            fail_scenarios_on_pending_or_undefined_steps: false,
            custom_css: None,
            log_level: LogLevel::Default.as_str().to_owned(),
            skip: false,
        }
    }
}

impl ReportConfig {
    pub fn new(source_dir: impl Into<PathBuf>, destination_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            destination_dir: destination_dir.into(),
            ..Self::default()
        }
    }

    /// Parse a TOML document. Keys missing from the document keep their
    /// defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text)
            .map_err(|err| CukedocError::invalid_config("config", "", err.message().to_owned()))
    }

    /// Read and parse a TOML configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        toml::from_str(&text).map_err(|err| {
            CukedocError::invalid_config(
                "config",
                path.display().to_string(),
                err.message().to_owned(),
            )
        })
    }

    /// Reject configurations that cannot produce a report.
    pub fn validate(&self) -> Result<()> {
        if self.source_dir.as_os_str().is_empty() {
            return Err(CukedocError::invalid_config(
                "source_dir",
                "",
                "a source directory is required",
            ));
        }
        if self.destination_dir.as_os_str().is_empty() {
            return Err(CukedocError::invalid_config(
                "destination_dir",
                "",
                "a destination directory is required",
            ));
        }
        for (key, color) in [
            ("status_colors.passed", &self.status_colors.passed),
            ("status_colors.failed", &self.status_colors.failed),
            ("status_colors.skipped", &self.status_colors.skipped),
        ] {
            if !is_hex_color(color) {
                return Err(CukedocError::invalid_config(
                    key,
                    color.as_str(),
                    "expected a hex color like #RGB or #RRGGBB",
                ));
            }
        }
        Ok(())
    }

    /// Log level, falling back to `default` with a warning when unknown.
    pub fn log_level(&self) -> LogLevel {
        LogLevel::parse_or_default(&self.log_level)
    }

    /// Settings handed to the page templates.
    pub fn render_settings(&self, custom_parameters: Vec<(String, String)>) -> RenderSettings {
        RenderSettings {
            page_title: self.custom_page_title.clone(),
            palette: StatusPalette {
                passed: self.status_colors.passed.clone(),
                failed: self.status_colors.failed.clone(),
                skipped: self.status_colors.skipped.clone(),
            },
            expand_before_after_hooks: self.expand_before_after_hooks,
            expand_step_hooks: self.expand_step_hooks,
            expand_doc_strings: self.expand_doc_strings,
            expand_attachments: self.expand_attachments,
            fail_scenarios_on_pending_or_undefined_steps: self
                .fail_scenarios_on_pending_or_undefined_steps,
            custom_parameters,
            custom_css: self.custom_css.is_some(),
        }
    }

    /// `key = value` lines for the startup log.
    pub fn describe(&self) -> Vec<(&'static str, String)> {
        let flag = |value: bool| value.to_string();
        let mut lines = vec![
            ("source_dir", self.source_dir.display().to_string()),
            ("destination_dir", self.destination_dir.display().to_string()),
            ("custom_page_title", self.custom_page_title.clone()),
            ("status_colors.passed", self.status_colors.passed.clone()),
            ("status_colors.failed", self.status_colors.failed.clone()),
            ("status_colors.skipped", self.status_colors.skipped.clone()),
            ("expand_before_after_hooks", flag(self.expand_before_after_hooks)),
            ("expand_step_hooks", flag(self.expand_step_hooks)),
            ("expand_doc_strings", flag(self.expand_doc_strings)),
            ("expand_attachments", flag(self.expand_attachments)),
            (
                "fail_scenarios_on_pending_or_undefined_steps",
                flag(self.fail_scenarios_on_pending_or_undefined_steps),
            ),
        ];
        if let Some(file) = &self.custom_parameters_file {
            lines.push(("custom_parameters_file", file.display().to_string()));
        }
        if let Some(css) = &self.custom_css {
            lines.push(("custom_css", css.display().to_string()));
        }
        lines
    }
}

/// `#RGB` or `#RRGGBB`.
pub fn is_hex_color(raw: &str) -> bool {
    raw.strip_prefix('#').is_some_and(|digits| {
        matches!(digits.len(), 3 | 6) && digits.chars().all(|ch| ch.is_ascii_hexdigit())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ReportConfig::default();
        assert_eq!(config.custom_page_title, "Cucumber Report");
        assert_eq!(config.status_colors.passed, "#04B404");
        assert_eq!(config.status_colors.failed, "#C94A38");
        assert_eq!(config.status_colors.skipped, "#F48F00");
        assert!(config.expand_attachments);
        assert!(!config.expand_doc_strings);
        assert!(!config.skip);
        assert_eq!(config.log_level(), LogLevel::Default);
    }

    #[test]
    fn hex_colors() {
        assert!(is_hex_color("#fff"));
        assert!(is_hex_color("#04B404"));
        assert!(!is_hex_color("04B404"));
        assert!(!is_hex_color("#04B40"));
        assert!(!is_hex_color("#GGGGGG"));
        assert!(!is_hex_color(""));
    }

    #[test]
    fn validate_rejects_missing_dirs_and_bad_colors() {
        assert!(matches!(
            ReportConfig::default().validate(),
            Err(CukedocError::InvalidConfig { ref key, .. }) if key == "source_dir"
        ));
        assert!(matches!(
            ReportConfig::new("in", "").validate(),
            Err(CukedocError::InvalidConfig { ref key, .. }) if key == "destination_dir"
        ));

        let mut config = ReportConfig::new("in", "out");
        assert!(config.validate().is_ok());
        config.status_colors.failed = "red".to_owned();
        assert!(matches!(
            config.validate(),
            Err(CukedocError::InvalidConfig { ref key, ref value, .. })
                if key == "status_colors.failed" && value == "red"
        ));
    }

    #[test]
    fn toml_overrides_only_what_it_names() {
        let config = ReportConfig::from_toml_str(
            r##"
source_dir = "target/cucumber"
destination_dir = "target/report"
custom_page_title = "Nightly"
fail_scenarios_on_pending_or_undefined_steps = true

[status_colors]
passed = "#00ff00"

[[custom_parameters]]
key = "Build_Number"
value = "42"
"##,
        )
        .expect("config should parse");
        assert_eq!(config.source_dir, PathBuf::from("target/cucumber"));
        assert_eq!(config.custom_page_title, "Nightly");
        assert_eq!(config.status_colors.passed, "#00ff00");
        assert_eq!(config.status_colors.failed, "#C94A38");
        assert!(config.fail_scenarios_on_pending_or_undefined_steps);
        assert!(config.expand_attachments);
        assert_eq!(
            config.custom_parameters,
            vec![CustomParameter::new("Build_Number", "42")]
        );
    }

    #[test]
    fn toml_unknown_key_is_rejected() {
        let err = ReportConfig::from_toml_str("sauce_dir = \"x\"").expect_err("unknown key");
        assert!(matches!(err, CukedocError::InvalidConfig { .. }));
    }

    #[test]
    fn render_settings_carry_config_values() {
        let mut config = ReportConfig::new("in", "out");
        config.custom_css = Some(PathBuf::from("style.css"));
        config.expand_step_hooks = true;
        let settings =
            config.render_settings(vec![("Build Number".to_owned(), "42".to_owned())]);
        assert!(settings.custom_css);
        assert!(settings.expand_step_hooks);
        assert_eq!(settings.palette.skipped, "#F48F00");
        assert_eq!(settings.custom_parameters.len(), 1);
    }
}
