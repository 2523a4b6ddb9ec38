pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::domain::model::{AuditSettings, ThrottlingMethod};
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "bootup-audit")]
#[command(about = "Compute the JavaScript boot-up time audit from a Chrome trace")]
pub struct CliConfig {
    #[arg(long, default_value = "./trace.json", help = "Trace file path or HTTP(S) endpoint")]
    pub trace_source: String,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long, value_enum, default_value = "provided")]
    pub throttling_method: ThrottlingMethod,

    #[arg(long, default_value = "1.0", help = "Applied when throttling method is 'simulate'")]
    pub cpu_slowdown_multiplier: f64,

    #[arg(long, default_value = "600.0")]
    pub score_podr: f64,

    #[arg(long, default_value = "3500.0")]
    pub score_median: f64,

    #[arg(long, default_value = "50.0", help = "Rows below this total are left out of the table")]
    pub threshold_ms: f64,

    #[arg(long, help = "Request timeout in seconds for HTTP trace sources")]
    pub timeout_seconds: Option<u64>,

    #[arg(
        long,
        value_delimiter = ',',
        default_values_t = [String::from("json"), String::from("csv")],
        help = "Report formats to emit (json, csv)"
    )]
    pub output_formats: Vec<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Enable system monitoring")]
    pub monitor: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn trace_source(&self) -> &str {
        &self.trace_source
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn audit_settings(&self) -> AuditSettings {
        AuditSettings {
            throttling_method: self.throttling_method,
            cpu_slowdown_multiplier: self.cpu_slowdown_multiplier,
            score_podr: self.score_podr,
            score_median: self.score_median,
            threshold_ms: self.threshold_ms,
        }
    }

    fn request_timeout(&self) -> Option<std::time::Duration> {
        self.timeout_seconds.map(std::time::Duration::from_secs)
    }

    fn output_formats(&self) -> &[String] {
        &self.output_formats
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> crate::utils::error::Result<()> {
        validation::validate_trace_source("trace_source", &self.trace_source)?;
        validation::validate_path("output_path", &self.output_path)?;
        validation::validate_range(
            "cpu_slowdown_multiplier",
            self.cpu_slowdown_multiplier,
            1.0,
            20.0,
        )?;
        validation::validate_range("threshold_ms", self.threshold_ms, 0.0, 10_000.0)?;
        validation::validate_control_points(self.score_podr, self.score_median)?;
        validation::validate_output_formats("output_formats", &self.output_formats)?;
        if let Some(timeout) = self.timeout_seconds {
            validation::validate_range("timeout_seconds", timeout as f64, 1.0, 300.0)?;
        }
        Ok(())
    }
}
