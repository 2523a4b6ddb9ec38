use crate::domain::model::{TraceArtifact, TraceEvent};

/// 主執行緒上一段有持續時間的工作，時間已換算為毫秒
#[derive(Debug, Clone)]
pub struct TimelineTask {
    pub name: String,
    pub dur_ms: f64,
    /// Duration minus the duration of directly nested child tasks.
    pub self_ms: f64,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct TimelineModel {
    pub tasks: Vec<TimelineTask>,
}

#[derive(Debug, Clone)]
struct TaskRange {
    name: String,
    start_us: u64,
    dur_us: u64,
    url: Option<String>,
}

impl TaskRange {
    fn end_us(&self) -> u64 {
        self.start_us + self.dur_us
    }
}

impl TimelineModel {
    /// 只看主執行緒：X 事件與配對好的 B/E 事件構成巢狀工作
    pub fn from_trace(trace: &TraceArtifact) -> Self {
        let ranges = collect_ranges(trace);
        Self {
            tasks: resolve_nesting(ranges),
        }
    }
}

fn collect_ranges(trace: &TraceArtifact) -> Vec<TaskRange> {
    let mut main_thread: Vec<&TraceEvent> = trace
        .events
        .iter()
        .filter(|e| e.pid == trace.main_pid && e.tid == trace.main_tid)
        .collect();
    main_thread.sort_by_key(|e| e.ts);

    let mut ranges = Vec::new();
    let mut begin_stack: Vec<&TraceEvent> = Vec::new();

    for ev in main_thread {
        match ev.ph.as_str() {
            "X" => {
                if let Some(dur) = ev.dur {
                    if dur > 0 {
                        ranges.push(TaskRange {
                            name: ev.name.clone(),
                            start_us: ev.ts,
                            dur_us: dur,
                            url: attributable_url(&ev.args),
                        });
                    }
                }
            }
            "B" => begin_stack.push(ev),
            "E" => {
                // 沒有配對 B 的 E 直接忽略
                if let Some(begin) = begin_stack.pop() {
                    let dur = ev.ts.saturating_sub(begin.ts);
                    if dur > 0 {
                        ranges.push(TaskRange {
                            name: begin.name.clone(),
                            start_us: begin.ts,
                            dur_us: dur,
                            url: attributable_url(&begin.args)
                                .or_else(|| attributable_url(&ev.args)),
                        });
                    }
                }
            }
            _ => {}
        }
    }

    ranges
}

/// 由排序決定巢狀關係：起點遞增、同起點時較長者在前，所以父工作必先於子工作出現
fn resolve_nesting(mut ranges: Vec<TaskRange>) -> Vec<TimelineTask> {
    ranges.sort_by(|a, b| {
        a.start_us
            .cmp(&b.start_us)
            .then_with(|| b.end_us().cmp(&a.end_us()))
    });

    let n = ranges.len();
    let mut child_dur_us = vec![0u64; n];
    let mut resolved_url: Vec<Option<String>> = vec![None; n];
    let mut stack: Vec<usize> = Vec::new();

    for i in 0..n {
        while let Some(&top) = stack.last() {
            if ranges[top].end_us() <= ranges[i].start_us {
                stack.pop();
            } else {
                break;
            }
        }

        resolved_url[i] = ranges[i].url.clone();
        if let Some(&parent) = stack.last() {
            // 子工作超出父範圍時只計重疊部分
            let overlap = ranges[i]
                .end_us()
                .min(ranges[parent].end_us())
                .saturating_sub(ranges[i].start_us);
            child_dur_us[parent] += overlap;

            if resolved_url[i].is_none() {
                resolved_url[i] = resolved_url[parent].clone();
            }
        }
        stack.push(i);
    }

    ranges
        .into_iter()
        .enumerate()
        .map(|(i, r)| TimelineTask {
            dur_ms: r.dur_us as f64 / 1000.0,
            self_ms: r.dur_us.saturating_sub(child_dur_us[i]) as f64 / 1000.0,
            url: resolved_url[i].take(),
            name: r.name,
        })
        .collect()
}

/// 從事件 args 找出可歸屬的 URL (data.url, data.fileName, 堆疊第一幀, fileName)
pub(crate) fn attributable_url(args: &serde_json::Value) -> Option<String> {
    let data = args.get("data");
    let candidates = [
        data.and_then(|d| d.get("url")),
        data.and_then(|d| d.get("fileName")),
        data.and_then(|d| d.get("stackTrace"))
            .and_then(|s| s.get(0))
            .and_then(|f| f.get("url")),
        args.get("fileName"),
    ];

    for candidate in candidates.into_iter().flatten() {
        if let Some(s) = candidate.as_str() {
            if !s.is_empty() {
                return Some(s.to_string());
            }
        }
    }
    None
}
