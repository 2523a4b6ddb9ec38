use crate::core::Pipeline;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

/// 驅動 extract → transform → load 三階段並記錄進度
pub struct AuditEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> AuditEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(false),
        }
    }

    pub fn new_with_monitoring(pipeline: P, monitoring: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitoring),
        }
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("Starting bootup-time audit...");

        tracing::info!("Extracting trace...");
        let trace = self.pipeline.extract().await?;
        tracing::info!("Extracted {} trace events", trace.events.len());
        self.monitor.log_stats("Extract");

        tracing::info!("Running audit...");
        let result = self.pipeline.transform(trace).await?;
        tracing::info!(
            "Boot-up time: {} (score {:.2})",
            result.display_value,
            result.score
        );
        self.monitor.log_stats("Audit");

        tracing::info!("Writing report...");
        let output_path = self.pipeline.load(result).await?;
        tracing::info!("Report saved to: {}", output_path);
        self.monitor.log_final_stats();

        Ok(output_path)
    }
}
