use crate::core::{bootup_time, trace, ConfigProvider, Pipeline, Storage};
use crate::domain::model::{AuditReport, AuditResult, TraceArtifact};
use crate::utils::error::{AuditError, Result};
use chrono::Utc;
use reqwest::Client;

const REPORT_FILENAME: &str = "report.json";
const BREAKDOWN_FILENAME: &str = "breakdown.csv";

/// 完整的 bootup-time audit 管道:取 trace、跑 audit、寫報告
///
/// 輸入與輸出分開掛存儲:trace 檔案相對於工作目錄解析,
/// 報告則寫進 output_path 底下。
pub struct BootupAuditPipeline<S: Storage, C: ConfigProvider> {
    input: S,
    output: S,
    config: C,
    client: Client,
}

impl<S: Storage, C: ConfigProvider> BootupAuditPipeline<S, C> {
    pub fn new(input: S, output: S, config: C) -> Self {
        Self {
            input,
            output,
            config,
            client: Client::new(),
        }
    }

    fn is_http_source(source: &str) -> bool {
        matches!(url::Url::parse(source), Ok(u) if u.scheme() == "http" || u.scheme() == "https")
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for BootupAuditPipeline<S, C> {
    async fn extract(&self) -> Result<TraceArtifact> {
        let source = self.config.trace_source();

        let raw = if Self::is_http_source(source) {
            tracing::debug!("Fetching trace from: {}", source);
            let mut request = self.client.get(source);
            if let Some(timeout) = self.config.request_timeout() {
                request = request.timeout(timeout);
            }
            let response = request.send().await?;
            tracing::debug!("Trace endpoint status: {}", response.status());

            if !response.status().is_success() {
                return Err(AuditError::ProcessingError {
                    message: format!("trace endpoint returned {}", response.status()),
                });
            }
            response.bytes().await?.to_vec()
        } else {
            tracing::debug!("Reading trace file: {}", source);
            self.input.read_file(source).await?
        };

        let artifact = trace::parse_trace(&raw)?;
        tracing::debug!(
            "Parsed {} trace events (main thread {}:{})",
            artifact.events.len(),
            artifact.main_pid,
            artifact.main_tid
        );
        Ok(artifact)
    }

    async fn transform(&self, trace: TraceArtifact) -> Result<AuditResult> {
        Ok(bootup_time::audit(&trace, &self.config.audit_settings()))
    }

    async fn load(&self, result: AuditResult) -> Result<String> {
        let report = AuditReport {
            audit_id: bootup_time::AUDIT_ID.to_string(),
            title: bootup_time::AUDIT_TITLE.to_string(),
            generated_time: Utc::now(),
            result,
        };

        let formats = self.config.output_formats();
        let write_json = formats.iter().any(|f| f == "json");
        let write_csv = formats.iter().any(|f| f == "csv");

        if write_json {
            let json_data = serde_json::to_vec_pretty(&report)?;
            self.output.write_file(REPORT_FILENAME, &json_data).await?;
            tracing::debug!("Report written ({} bytes JSON)", json_data.len());
        }

        if write_csv {
            // 明細表另存 CSV,方便丟進試算表
            let csv_data = {
                let mut writer = csv::Writer::from_writer(Vec::new());
                writer.write_record([
                    "URL",
                    "Script Evaluation (ms)",
                    "Script Parse & Compile (ms)",
                    "Total (ms)",
                ])?;
                for row in &report.result.details.items {
                    writer.write_record([
                        row.url.as_str(),
                        &format!("{:.1}", row.scripting_ms),
                        &format!("{:.1}", row.parse_compile_ms),
                        &format!("{:.1}", row.total_ms),
                    ])?;
                }
                writer
                    .into_inner()
                    .map_err(|e| AuditError::ProcessingError {
                        message: format!("failed to finish CSV output: {}", e),
                    })?
            };
            self.output
                .write_file(BREAKDOWN_FILENAME, &csv_data)
                .await?;
            tracing::debug!("Breakdown written ({} bytes CSV)", csv_data.len());
        }

        let primary = if write_json {
            REPORT_FILENAME
        } else {
            BREAKDOWN_FILENAME
        };
        Ok(format!("{}/{}", self.config.output_path(), primary))
    }
}
