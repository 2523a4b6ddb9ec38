use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 單一 Chrome trace 事件 (ts/dur 單位為微秒)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceEvent {
    pub name: String,
    #[serde(default)]
    pub cat: String,
    pub ph: String,
    #[serde(default)]
    pub ts: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dur: Option<u64>,
    #[serde(default)]
    pub pid: u64,
    #[serde(default)]
    pub tid: u64,
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub args: serde_json::Value,
}

/// 解析後的 trace，extract 階段的輸出
#[derive(Debug, Clone)]
pub struct TraceArtifact {
    pub events: Vec<TraceEvent>,
    pub main_pid: u64,
    pub main_tid: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum ThrottlingMethod {
    /// Observed timings are multiplied by the CPU slowdown multiplier.
    Simulate,
    /// Throttling was applied by DevTools while recording; timings are used as-is.
    Devtools,
    /// The environment provided its own throttling; timings are used as-is.
    Provided,
}

/// 音量旋鈕：節流方式與評分曲線控制點
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditSettings {
    pub throttling_method: ThrottlingMethod,
    pub cpu_slowdown_multiplier: f64,
    pub score_podr: f64,
    pub score_median: f64,
    pub threshold_ms: f64,
}

impl Default for AuditSettings {
    fn default() -> Self {
        Self {
            throttling_method: ThrottlingMethod::Provided,
            cpu_slowdown_multiplier: 1.0,
            score_podr: 600.0,
            score_median: 3500.0,
            threshold_ms: 50.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableColumn {
    pub key: String,
    pub item_type: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRow {
    pub url: String,
    pub scripting_ms: f64,
    pub parse_compile_ms: f64,
    pub total_ms: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableSummary {
    pub wasted_ms: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableDetails {
    pub headings: Vec<TableColumn>,
    pub items: Vec<TableRow>,
    pub summary: TableSummary,
}

/// bootup-time audit 的輸出
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditResult {
    /// Normalized score in [0, 1]; 1 is best.
    pub score: f64,
    /// Total JavaScript boot-up time in milliseconds.
    pub raw_value: f64,
    pub display_value: String,
    pub details: TableDetails,
    /// Per-URL task-group buckets (ms), including groups outside the total.
    pub extended_info: BTreeMap<String, BTreeMap<String, f64>>,
}

/// load 階段寫出的完整報告
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditReport {
    pub audit_id: String,
    pub title: String,
    pub generated_time: chrono::DateTime<chrono::Utc>,
    #[serde(flatten)]
    pub result: AuditResult,
}
