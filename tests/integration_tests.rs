use bootup_audit::{
    AuditEngine, AuditReport, BootupAuditPipeline, CliConfig, LocalStorage, ThrottlingMethod,
};
use httpmock::prelude::*;
use tempfile::TempDir;

fn sample_trace() -> serde_json::Value {
    serde_json::json!([
        {"name": "TracingStartedInPage", "ph": "I", "ts": 0, "pid": 1, "tid": 2,
         "args": {"data": {"page": "0x1"}}},
        {"name": "EvaluateScript", "ph": "X", "ts": 1_000, "dur": 200_000, "pid": 1, "tid": 2,
         "args": {"data": {"url": "https://a.com/app.js"}}},
        {"name": "v8.compile", "ph": "X", "ts": 300_000, "dur": 80_000, "pid": 1, "tid": 2,
         "args": {"data": {"url": "https://a.com/app.js"}}},
        {"name": "EvaluateScript", "ph": "X", "ts": 500_000, "dur": 60_000, "pid": 1, "tid": 2,
         "args": {"data": {"url": "https://cdn.com/lib.js"}}},
        {"name": "EvaluateScript", "ph": "X", "ts": 600_000, "dur": 40_000, "pid": 1, "tid": 2,
         "args": {"data": {"url": "about:blank"}}},
        {"name": "Paint", "ph": "X", "ts": 700_000, "dur": 30_000, "pid": 1, "tid": 2,
         "args": {}}
    ])
}

fn config(trace_source: String, output_path: String) -> CliConfig {
    CliConfig {
        trace_source,
        output_path,
        throttling_method: ThrottlingMethod::Provided,
        cpu_slowdown_multiplier: 1.0,
        score_podr: 600.0,
        score_median: 3500.0,
        threshold_ms: 0.0,
        timeout_seconds: None,
        output_formats: vec!["json".to_string(), "csv".to_string()],
        verbose: false,
        monitor: false,
    }
}

fn pipeline_for(config: CliConfig) -> BootupAuditPipeline<LocalStorage, CliConfig> {
    let input = LocalStorage::new(".".to_string());
    let output = LocalStorage::new(config.output_path.clone());
    BootupAuditPipeline::new(input, output, config)
}

#[tokio::test]
async fn test_end_to_end_audit_with_real_http() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    let trace_mock = server.mock(|when, then| {
        when.method(GET).path("/trace.json");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(sample_trace());
    });

    let config = config(server.url("/trace.json"), output_path.clone());
    let pipeline = pipeline_for(config);
    let engine = AuditEngine::new(pipeline);

    let result = engine.run().await;

    assert!(result.is_ok());
    trace_mock.assert();

    let report_path = result.unwrap();
    assert!(report_path.contains("report.json"));

    // 驗證 JSON 報告內容
    let full_path = std::path::Path::new(&output_path).join("report.json");
    let report: AuditReport =
        serde_json::from_slice(&std::fs::read(&full_path).unwrap()).unwrap();

    assert_eq!(report.audit_id, "bootup-time");
    assert_eq!(report.title, "JavaScript boot-up time");
    // app.js: 200 + 80, lib.js: 60; about:blank 與未歸屬的 Paint 跳過
    assert!((report.result.raw_value - 340.0).abs() < 1e-9);
    assert_eq!(report.result.details.items.len(), 2);
    assert_eq!(report.result.details.items[0].url, "https://a.com/app.js");
    assert_eq!(report.result.details.items[1].url, "https://cdn.com/lib.js");
    assert!(report.result.score > 0.9); // 340ms 遠低於中位數
    assert!(!report.result.extended_info.contains_key("about:blank"));

    // 驗證 CSV 明細
    let csv_path = std::path::Path::new(&output_path).join("breakdown.csv");
    let csv_content = std::fs::read_to_string(&csv_path).unwrap();
    assert!(csv_content.starts_with("URL,Script Evaluation (ms)"));
    assert!(csv_content.contains("https://a.com/app.js"));
    assert!(csv_content.contains("https://cdn.com/lib.js"));
}

#[tokio::test]
async fn test_end_to_end_with_endpoint_failure() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    let trace_mock = server.mock(|when, then| {
        when.method(GET).path("/failed");
        then.status(500);
    });

    let config = config(server.url("/failed"), output_path.clone());
    let pipeline = pipeline_for(config);
    let engine = AuditEngine::new(pipeline);

    let result = engine.run().await;

    // 上游失敗直接傳給呼叫者,不產生報告
    assert!(result.is_err());
    trace_mock.assert();
    assert!(!std::path::Path::new(&output_path)
        .join("report.json")
        .exists());
}

#[tokio::test]
async fn test_end_to_end_with_simulated_throttling() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    let trace_mock = server.mock(|when, then| {
        when.method(GET).path("/trace.json");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(sample_trace());
    });

    let mut config = config(server.url("/trace.json"), output_path.clone());
    config.throttling_method = ThrottlingMethod::Simulate;
    config.cpu_slowdown_multiplier = 4.0;

    let pipeline = pipeline_for(config);
    let engine = AuditEngine::new(pipeline);

    engine.run().await.unwrap();
    trace_mock.assert();

    let full_path = std::path::Path::new(&output_path).join("report.json");
    let report: AuditReport =
        serde_json::from_slice(&std::fs::read(&full_path).unwrap()).unwrap();

    assert!((report.result.raw_value - 1360.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_end_to_end_with_monitoring() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    let trace_mock = server.mock(|when, then| {
        when.method(GET).path("/trace.json");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(sample_trace());
    });

    let config = config(server.url("/trace.json"), output_path.clone());
    let pipeline = pipeline_for(config);
    let engine = AuditEngine::new_with_monitoring(pipeline, true);

    let result = engine.run().await;

    assert!(result.is_ok());
    trace_mock.assert();
}

#[tokio::test]
async fn test_threshold_drops_small_rows_from_table() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    let trace_mock = server.mock(|when, then| {
        when.method(GET).path("/trace.json");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(sample_trace());
    });

    let mut config = config(server.url("/trace.json"), output_path.clone());
    config.threshold_ms = 100.0;

    let pipeline = pipeline_for(config);
    let engine = AuditEngine::new(pipeline);

    engine.run().await.unwrap();
    trace_mock.assert();

    let full_path = std::path::Path::new(&output_path).join("report.json");
    let report: AuditReport =
        serde_json::from_slice(&std::fs::read(&full_path).unwrap()).unwrap();

    // lib.js (60ms) 被門檻擋掉,但總時間不變
    assert_eq!(report.result.details.items.len(), 1);
    assert!((report.result.raw_value - 340.0).abs() < 1e-9);
}
