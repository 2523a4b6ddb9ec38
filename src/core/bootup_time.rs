//! JavaScript boot-up time audit:依 URL 與工作分類彙總主執行緒的
//! script CPU 時間,輸出分數與明細表。

use crate::core::bottom_up::group_by_url;
use crate::core::scoring::{compute_log_normal_score, format_milliseconds};
use crate::core::task_groups::{event_style, TaskGroup};
use crate::core::timeline::TimelineModel;
use crate::domain::model::{
    AuditResult, AuditSettings, TableColumn, TableDetails, TableRow, TableSummary, ThrottlingMethod,
    TraceArtifact,
};
use std::cmp::Ordering;
use std::collections::BTreeMap;

pub const AUDIT_ID: &str = "bootup-time";
pub const AUDIT_TITLE: &str = "JavaScript boot-up time";

const PLACEHOLDER_URL: &str = "about:blank";

/// 每個 URL 的工作分類時間桶 (標題 -> 毫秒)
pub type ExecutionTimings = BTreeMap<String, BTreeMap<String, f64>>;

/// bottom-up 依 URL 分組後,把每個事件的 self time 乘上節流倍率塞進分類桶。
/// 空 URL 與 about:blank 佔位頁直接跳過。
pub fn get_execution_timings_by_url(model: &TimelineModel, multiplier: f64) -> ExecutionTimings {
    let mut timings = ExecutionTimings::new();

    for node in group_by_url(&model.tasks) {
        if node.id.is_empty() || node.id == PLACEHOLDER_URL {
            continue;
        }

        let buckets = timings.entry(node.id.clone()).or_default();
        for child in &node.children {
            let group = event_style(&child.id);
            *buckets.entry(group.title().to_string()).or_default() += child.self_ms * multiplier;
        }
    }

    timings
}

fn table_headings() -> Vec<TableColumn> {
    vec![
        TableColumn {
            key: "url".to_string(),
            item_type: "url".to_string(),
            text: "URL".to_string(),
        },
        TableColumn {
            key: "scriptingMs".to_string(),
            item_type: "ms".to_string(),
            text: TaskGroup::ScriptEvaluation.title().to_string(),
        },
        TableColumn {
            key: "parseCompileMs".to_string(),
            item_type: "ms".to_string(),
            text: TaskGroup::ScriptParseCompile.title().to_string(),
        },
        TableColumn {
            key: "totalMs".to_string(),
            item_type: "ms".to_string(),
            text: "Total".to_string(),
        },
    ]
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub fn audit(trace: &TraceArtifact, settings: &AuditSettings) -> AuditResult {
    let model = TimelineModel::from_trace(trace);

    let multiplier = if settings.throttling_method == ThrottlingMethod::Simulate {
        settings.cpu_slowdown_multiplier
    } else {
        1.0
    };
    let timings = get_execution_timings_by_url(&model, multiplier);

    let mut total_bootup_ms = 0.0;
    let mut extended_info = ExecutionTimings::new();
    let mut rows: Vec<TableRow> = Vec::new();

    for (url, buckets) in &timings {
        let scripting = buckets
            .get(TaskGroup::ScriptEvaluation.title())
            .copied()
            .unwrap_or(0.0);
        let parse_compile = buckets
            .get(TaskGroup::ScriptParseCompile.title())
            .copied()
            .unwrap_or(0.0);
        let sum = scripting + parse_compile;

        // 總時間在門檻過濾之前累計,小項也算進總分
        total_bootup_ms += sum;
        extended_info.insert(url.clone(), buckets.clone());
        rows.push(TableRow {
            url: url.clone(),
            scripting_ms: round_tenth(scripting),
            parse_compile_ms: round_tenth(parse_compile),
            total_ms: round_tenth(sum),
        });
    }

    rows.retain(|r| r.total_ms >= settings.threshold_ms);
    rows.sort_by(|a, b| {
        b.total_ms
            .partial_cmp(&a.total_ms)
            .unwrap_or(Ordering::Equal)
    });

    tracing::debug!(
        "bootup-time: {:.1} ms across {} urls ({} above the {} ms threshold)",
        total_bootup_ms,
        extended_info.len(),
        rows.len(),
        settings.threshold_ms
    );

    AuditResult {
        score: compute_log_normal_score(settings.score_podr, settings.score_median, total_bootup_ms),
        raw_value: total_bootup_ms,
        display_value: format_milliseconds(total_bootup_ms, 10.0),
        details: TableDetails {
            headings: table_headings(),
            items: rows,
            summary: TableSummary {
                wasted_ms: total_bootup_ms,
            },
        },
        extended_info,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::trace;
    use crate::domain::model::TraceEvent;

    const PID: u64 = 1;
    const TID: u64 = 2;

    fn x_event(name: &str, ts: u64, dur_us: u64, url: &str) -> TraceEvent {
        let args = if url.is_empty() {
            serde_json::json!({})
        } else {
            serde_json::json!({"data": {"url": url}})
        };
        serde_json::from_value(serde_json::json!({
            "name": name, "ph": "X", "ts": ts, "dur": dur_us,
            "pid": PID, "tid": TID, "args": args
        }))
        .unwrap()
    }

    fn artifact(mut events: Vec<TraceEvent>) -> TraceArtifact {
        events.insert(
            0,
            serde_json::from_value(serde_json::json!({
                "name": "TracingStartedInPage", "ph": "I", "ts": 0,
                "pid": PID, "tid": TID, "args": {}
            }))
            .unwrap(),
        );
        trace::from_events(events).unwrap()
    }

    fn settings() -> AuditSettings {
        AuditSettings {
            threshold_ms: 0.0,
            ..AuditSettings::default()
        }
    }

    #[test]
    fn test_sums_script_groups_only() {
        let trace = artifact(vec![
            x_event("EvaluateScript", 0, 100_000, "https://a.com/app.js"),
            x_event("v8.compile", 200_000, 50_000, "https://a.com/app.js"),
            x_event("Paint", 300_000, 30_000, "https://a.com/app.js"),
        ]);

        let result = audit(&trace, &settings());

        assert!((result.raw_value - 150.0).abs() < 1e-9);
        assert_eq!(result.display_value, "150 ms");
        assert_eq!(result.details.items.len(), 1);

        let row = &result.details.items[0];
        assert!((row.scripting_ms - 100.0).abs() < 1e-9);
        assert!((row.parse_compile_ms - 50.0).abs() < 1e-9);
        assert!((row.total_ms - 150.0).abs() < 1e-9);

        // Paint 仍出現在 extended info,只是不進總分
        let buckets = &result.extended_info["https://a.com/app.js"];
        assert!((buckets["Paint, Composite & Render"] - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_skips_placeholder_and_unattributed_urls() {
        let trace = artifact(vec![
            x_event("EvaluateScript", 0, 40_000, "about:blank"),
            x_event("EvaluateScript", 100_000, 30_000, ""),
            x_event("EvaluateScript", 200_000, 20_000, "https://a.com/a.js"),
        ]);

        let result = audit(&trace, &settings());

        assert!((result.raw_value - 20.0).abs() < 1e-9);
        assert_eq!(result.extended_info.len(), 1);
        assert!(result.extended_info.contains_key("https://a.com/a.js"));
    }

    #[test]
    fn test_simulated_throttling_multiplies_timings() {
        let trace = artifact(vec![x_event(
            "EvaluateScript",
            0,
            100_000,
            "https://a.com/app.js",
        )]);

        let mut cfg = settings();
        cfg.throttling_method = ThrottlingMethod::Simulate;
        cfg.cpu_slowdown_multiplier = 4.0;

        let result = audit(&trace, &cfg);
        assert!((result.raw_value - 400.0).abs() < 1e-9);

        // 非 simulate 模式忽略倍率
        cfg.throttling_method = ThrottlingMethod::Devtools;
        let result = audit(&trace, &cfg);
        assert!((result.raw_value - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_threshold_filters_rows_but_not_total() {
        let trace = artifact(vec![
            x_event("EvaluateScript", 0, 100_000, "https://a.com/big.js"),
            x_event("EvaluateScript", 200_000, 10_000, "https://a.com/small.js"),
        ]);

        let mut cfg = settings();
        cfg.threshold_ms = 50.0;

        let result = audit(&trace, &cfg);
        assert!((result.raw_value - 110.0).abs() < 1e-9);
        assert_eq!(result.details.items.len(), 1);
        assert_eq!(result.details.items[0].url, "https://a.com/big.js");
        assert!((result.details.summary.wasted_ms - 110.0).abs() < 1e-9);
    }

    #[test]
    fn test_rows_sorted_by_total_descending() {
        let trace = artifact(vec![
            x_event("EvaluateScript", 0, 20_000, "https://a.com/a.js"),
            x_event("EvaluateScript", 100_000, 80_000, "https://b.com/b.js"),
            x_event("EvaluateScript", 300_000, 50_000, "https://c.com/c.js"),
        ]);

        let result = audit(&trace, &settings());
        let urls: Vec<&str> = result.details.items.iter().map(|r| r.url.as_str()).collect();
        assert_eq!(
            urls,
            vec!["https://b.com/b.js", "https://c.com/c.js", "https://a.com/a.js"]
        );
    }

    #[test]
    fn test_empty_trace_scores_perfectly() {
        let trace = artifact(vec![]);
        let result = audit(&trace, &settings());

        assert_eq!(result.raw_value, 0.0);
        assert_eq!(result.score, 1.0);
        assert!(result.details.items.is_empty());
        assert!(result.extended_info.is_empty());
    }

    #[test]
    fn test_score_uses_log_normal_curve() {
        // 3500ms 正好是中位數控制點,分數應為 0.5
        let trace = artifact(vec![x_event(
            "EvaluateScript",
            0,
            3_500_000,
            "https://a.com/slow.js",
        )]);

        let result = audit(&trace, &settings());
        assert!((result.score - 0.5).abs() < 1e-6);
    }
}
