//! YAML request file definitions.

use serde::{Deserialize, Serialize};
use sv_core::{Mode, Policy, ProcessDescriptor, SimulationParams};

use crate::builder::{RequestBuilder, SimulationRequest};
use crate::RequestResult;

/// On-disk form of a request.
///
/// `process_count` may be omitted, in which case the number of listed
/// processes is taken as the declared count.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RequestFile {
    pub mode: Mode,
    pub policy: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantum: Option<u32>,
    pub simulation_end: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub process_count: Option<usize>,
    #[serde(default)]
    pub processes: Vec<ProcessDescriptor>,
}

impl RequestFile {
    /// Feed the file through a [`RequestBuilder`] so file input obeys the
    /// same rules as interactive input.
    pub fn into_request(self) -> RequestResult<SimulationRequest> {
        let mut policy = Policy::new(self.policy)?;
        if let Some(q) = self.quantum {
            policy = policy.with_quantum(q)?;
        }
        let declared = self.process_count.unwrap_or(self.processes.len());
        let params = SimulationParams::new(self.mode, policy, self.simulation_end, declared)?;

        let mut builder = RequestBuilder::new(params);
        for p in &self.processes {
            builder.add_process(&p.name, p.arrival, p.service)?;
        }
        Ok(builder.build()?)
    }

    pub fn from_request(request: &SimulationRequest) -> Self {
        Self {
            mode: request.mode(),
            policy: request.policy().id(),
            quantum: request.policy().quantum(),
            simulation_end: request.simulation_end(),
            process_count: Some(request.process_count()),
            processes: request.processes().to_vec(),
        }
    }
}
