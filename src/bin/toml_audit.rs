use anyhow::Context;
use bootup_audit::core::ConfigProvider;
use bootup_audit::utils::{logger, validation::Validate};
use bootup_audit::{AuditEngine, BootupAuditPipeline, LocalStorage, TomlConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path = std::env::args().nth(1).unwrap_or_else(|| {
        eprintln!("Usage: toml_audit <config.toml>");
        std::process::exit(1);
    });

    let config = TomlConfig::from_file(&config_path)
        .with_context(|| format!("failed to load config from {}", config_path))?;

    if config.json_logs() {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(false);
    }

    tracing::info!("Running audit '{}' from {}", config.audit.name, config_path);

    config.validate().context("configuration is invalid")?;

    let monitoring = config.monitoring_enabled();
    // trace 路徑以工作目錄為根,報告寫進 output_path
    let input_storage = LocalStorage::new(".".to_string());
    let output_storage = LocalStorage::new(config.output_path().to_string());
    let pipeline = BootupAuditPipeline::new(input_storage, output_storage, config);
    let engine = AuditEngine::new_with_monitoring(pipeline, monitoring);

    let output_path = engine.run().await.context("audit run failed")?;
    println!("✅ Report saved to: {}", output_path);

    Ok(())
}
