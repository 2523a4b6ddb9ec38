use crate::domain::model::{TraceArtifact, TraceEvent};
use crate::utils::error::{AuditError, Result};
use serde::Deserialize;

/// Chrome 輸出兩種容器格式：物件包 traceEvents，或直接就是事件陣列
#[derive(Deserialize)]
#[serde(untagged)]
enum TraceFile {
    Container {
        #[serde(rename = "traceEvents")]
        trace_events: Vec<TraceEvent>,
    },
    Flat(Vec<TraceEvent>),
}

pub fn parse_trace(raw: &[u8]) -> Result<TraceArtifact> {
    let file: TraceFile = serde_json::from_slice(raw)?;
    let events = match file {
        TraceFile::Container { trace_events } => trace_events,
        TraceFile::Flat(events) => events,
    };
    from_events(events)
}

pub fn from_events(events: Vec<TraceEvent>) -> Result<TraceArtifact> {
    let (main_pid, main_tid) = find_main_thread(&events)?;
    Ok(TraceArtifact {
        events,
        main_pid,
        main_tid,
    })
}

/// TracingStartedInPage 指向 renderer 主執行緒；舊 trace 退回 thread_name 中繼資料
fn find_main_thread(events: &[TraceEvent]) -> Result<(u64, u64)> {
    if let Some(ev) = events.iter().find(|e| e.name == "TracingStartedInPage") {
        return Ok((ev.pid, ev.tid));
    }

    for ev in events
        .iter()
        .filter(|e| e.ph == "M" && e.name == "thread_name")
    {
        let name = ev
            .args
            .get("name")
            .and_then(|v| v.as_str())
            .or_else(|| ev.args.get("data").and_then(|d| d.get("name")).and_then(|v| v.as_str()));
        if name == Some("CrRendererMain") {
            return Ok((ev.pid, ev.tid));
        }
    }

    Err(AuditError::TraceError {
        message: "renderer main thread not found in trace".to_string(),
    })
}
