use crate::core::ConfigProvider;
use crate::domain::model::{AuditSettings, ThrottlingMethod};
use crate::utils::error::{AuditError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub audit: AuditSection,
    pub source: SourceSection,
    #[serde(default)]
    pub settings: SettingsSection,
    #[serde(default)]
    pub scoring: ScoringSection,
    pub load: LoadSection,
    pub monitoring: Option<MonitoringSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditSection {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceSection {
    /// 檔案路徑或 http(s) 端點
    pub endpoint: String,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettingsSection {
    pub throttling_method: Option<ThrottlingMethod>,
    pub cpu_slowdown_multiplier: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoringSection {
    pub podr: Option<f64>,
    pub median: Option<f64>,
    pub threshold_ms: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadSection {
    pub output_path: String,
    pub output_formats: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringSection {
    pub enabled: bool,
    pub json_logs: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(AuditError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| AuditError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${TRACE_ENDPOINT})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid");

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_string("audit.name", &self.audit.name)?;
        validation::validate_trace_source("source.endpoint", &self.source.endpoint)?;
        validation::validate_path("load.output_path", &self.load.output_path)?;

        if let Some(timeout) = self.source.timeout_seconds {
            validation::validate_positive_number("source.timeout_seconds", timeout as usize, 1)?;
        }

        if let Some(multiplier) = self.settings.cpu_slowdown_multiplier {
            validation::validate_range("settings.cpu_slowdown_multiplier", multiplier, 1.0, 20.0)?;
        }

        let defaults = AuditSettings::default();
        validation::validate_control_points(
            self.scoring.podr.unwrap_or(defaults.score_podr),
            self.scoring.median.unwrap_or(defaults.score_median),
        )?;

        validation::validate_output_formats("load.output_formats", &self.load.output_formats)?;

        Ok(())
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }

    pub fn json_logs(&self) -> bool {
        self.monitoring
            .as_ref()
            .and_then(|m| m.json_logs)
            .unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn trace_source(&self) -> &str {
        &self.source.endpoint
    }

    fn output_path(&self) -> &str {
        &self.load.output_path
    }

    fn audit_settings(&self) -> AuditSettings {
        let defaults = AuditSettings::default();
        AuditSettings {
            throttling_method: self
                .settings
                .throttling_method
                .unwrap_or(defaults.throttling_method),
            cpu_slowdown_multiplier: self
                .settings
                .cpu_slowdown_multiplier
                .unwrap_or(defaults.cpu_slowdown_multiplier),
            score_podr: self.scoring.podr.unwrap_or(defaults.score_podr),
            score_median: self.scoring.median.unwrap_or(defaults.score_median),
            threshold_ms: self.scoring.threshold_ms.unwrap_or(defaults.threshold_ms),
        }
    }

    fn request_timeout(&self) -> Option<std::time::Duration> {
        self.source
            .timeout_seconds
            .map(std::time::Duration::from_secs)
    }

    fn output_formats(&self) -> &[String] {
        &self.load.output_formats
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
