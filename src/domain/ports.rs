use crate::domain::model::{AuditResult, AuditSettings, TraceArtifact};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn trace_source(&self) -> &str;
    fn output_path(&self) -> &str;
    fn audit_settings(&self) -> AuditSettings;
    /// Applied to HTTP trace fetches; file reads are not limited.
    fn request_timeout(&self) -> Option<Duration>;
    /// Which report files to emit ("json", "csv").
    fn output_formats(&self) -> &[String];
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<TraceArtifact>;
    async fn transform(&self, trace: TraceArtifact) -> Result<AuditResult>;
    async fn load(&self, result: AuditResult) -> Result<String>;
}
