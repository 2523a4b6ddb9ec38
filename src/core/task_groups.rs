/// DevTools 風格的工作分類；bootup time 只計 scripting 與 parse/compile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskGroup {
    ScriptEvaluation,
    ScriptParseCompile,
    GarbageCollection,
    StyleLayout,
    ParseHtmlCss,
    PaintCompositeRender,
    Other,
}

impl TaskGroup {
    pub fn title(self) -> &'static str {
        match self {
            TaskGroup::ScriptEvaluation => "Script Evaluation",
            TaskGroup::ScriptParseCompile => "Script Parse & Compile",
            TaskGroup::GarbageCollection => "Garbage Collection",
            TaskGroup::StyleLayout => "Style & Layout",
            TaskGroup::ParseHtmlCss => "Parse HTML & CSS",
            TaskGroup::PaintCompositeRender => "Paint, Composite & Render",
            TaskGroup::Other => "Other",
        }
    }

    pub fn counts_toward_bootup(self) -> bool {
        matches!(
            self,
            TaskGroup::ScriptEvaluation | TaskGroup::ScriptParseCompile
        )
    }
}

/// 事件名稱對應的分類；未知名稱歸入 Other
pub fn event_style(event_name: &str) -> TaskGroup {
    match event_name {
        "EvaluateScript"
        | "FunctionCall"
        | "TimerFire"
        | "EventDispatch"
        | "V8.Execute"
        | "RunMicrotasks"
        | "FireAnimationFrame"
        | "XHRReadyStateChange"
        | "XHRLoad" => TaskGroup::ScriptEvaluation,

        "v8.compile" | "v8.compileModule" | "v8.parseOnBackground" | "V8.CompileScript" => {
            TaskGroup::ScriptParseCompile
        }

        "MajorGC" | "MinorGC" | "GCEvent" | "V8.GCFullGC" | "BlinkGC.AtomicPhase" => {
            TaskGroup::GarbageCollection
        }

        "ScheduleStyleRecalculation"
        | "RecalculateStyles"
        | "UpdateLayoutTree"
        | "InvalidateLayout"
        | "Layout" => TaskGroup::StyleLayout,

        "ParseHTML" | "ParseAuthorStyleSheet" => TaskGroup::ParseHtmlCss,

        "Paint" | "PaintImage" | "CompositeLayers" | "RasterTask" | "UpdateLayer"
        | "UpdateLayerTree" => TaskGroup::PaintCompositeRender,

        _ => TaskGroup::Other,
    }
}
