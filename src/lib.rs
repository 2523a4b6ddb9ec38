pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::config::cli::LocalStorage;
pub use crate::config::toml_config::TomlConfig;
pub use crate::core::{engine::AuditEngine, pipeline::BootupAuditPipeline};
pub use crate::domain::model::{AuditReport, AuditResult, AuditSettings, ThrottlingMethod};
pub use crate::utils::error::{AuditError, Result};
