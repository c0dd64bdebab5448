use crate::GatewayResult;

/// Everything the engine produced during one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineOutput {
    pub stdout: String,
    pub stderr: String,
    /// `None` when the process was ended by a signal.
    pub exit_code: Option<i32>,
}

impl EngineOutput {
    /// The engine reports failures on stderr; any text at all counts.
    pub fn has_error_output(&self) -> bool {
        !self.stderr.is_empty()
    }
}

/// A scheduling engine reachable through a batch text protocol.
pub trait Engine {
    /// Submit one request and collect both output streams. One call, one run;
    /// implementations never retry.
    fn run(&self, request_text: &str) -> GatewayResult<EngineOutput>;
}

impl<E: Engine + ?Sized> Engine for &E {
    fn run(&self, request_text: &str) -> GatewayResult<EngineOutput> {
        (**self).run(request_text)
    }
}

impl<E: Engine + ?Sized> Engine for Box<E> {
    fn run(&self, request_text: &str) -> GatewayResult<EngineOutput> {
        (**self).run(request_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn any_stderr_text_is_an_error() {
        let mut out = EngineOutput::default();
        assert!(!out.has_error_output());
        out.stderr = " \n".to_string();
        assert!(out.has_error_output());
        out.stderr = "Error: Unknown Policy.\n".to_string();
        assert!(out.has_error_output());
    }
}
