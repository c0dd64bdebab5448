use sv_core::Mode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStage {
    Serializing,
    RunningEngine,
    ParsingReport,
    Completed,
}

impl RunStage {
    pub fn label(&self) -> &'static str {
        match self {
            RunStage::Serializing => "serializing request",
            RunStage::RunningEngine => "running engine",
            RunStage::ParsingReport => "parsing report",
            RunStage::Completed => "completed",
        }
    }
}

#[derive(Debug, Clone)]
pub struct RunProgressEvent {
    pub mode: Mode,
    pub stage: RunStage,
    pub elapsed_wall_s: f64,
    pub message: Option<String>,
}
