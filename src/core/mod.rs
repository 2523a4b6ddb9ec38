pub mod bootup_time;
pub mod bottom_up;
pub mod engine;
pub mod pipeline;
pub mod scoring;
pub mod task_groups;
pub mod timeline;
pub mod trace;

pub use crate::domain::model::{
    AuditReport, AuditResult, AuditSettings, ThrottlingMethod, TraceArtifact, TraceEvent,
};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
