use crate::core::timeline::TimelineTask;
use std::collections::BTreeMap;

/// 一個 bottom-up 分組節點：id 是分組鍵，children 依事件名稱細分
#[derive(Debug, Clone, PartialEq)]
pub struct BottomUpNode {
    pub id: String,
    pub self_ms: f64,
    pub children: Vec<BottomUpNode>,
}

/// 以 key_fn 聚合工作的 self time；BTreeMap 保證輸出順序穩定
pub fn bottom_up_group_by<F>(tasks: &[TimelineTask], key_fn: F) -> Vec<BottomUpNode>
where
    F: Fn(&TimelineTask) -> String,
{
    let mut groups: BTreeMap<String, BTreeMap<String, f64>> = BTreeMap::new();

    for task in tasks {
        if task.self_ms <= 0.0 {
            continue;
        }
        *groups
            .entry(key_fn(task))
            .or_default()
            .entry(task.name.clone())
            .or_default() += task.self_ms;
    }

    groups
        .into_iter()
        .map(|(id, by_event)| {
            let children: Vec<BottomUpNode> = by_event
                .into_iter()
                .map(|(name, self_ms)| BottomUpNode {
                    id: name,
                    self_ms,
                    children: Vec::new(),
                })
                .collect();
            let self_ms = children.iter().map(|c| c.self_ms).sum();
            BottomUpNode {
                id,
                self_ms,
                children,
            }
        })
        .collect()
}

/// audit 需要的分組：URL 在外層，事件名稱在內層；無 URL 的工作落在空字串鍵
pub fn group_by_url(tasks: &[TimelineTask]) -> Vec<BottomUpNode> {
    bottom_up_group_by(tasks, |t| t.url.clone().unwrap_or_default())
}
