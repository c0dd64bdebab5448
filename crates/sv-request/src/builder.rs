//! Request builder: collects process descriptors until the declared count is
//! reached, then hands out an immutable [`SimulationRequest`].

use sv_core::{MAX_SIMULATION_END, Mode, Policy, ProcessDescriptor, SimulationParams};

use crate::validate::{self, ValidationError};
use crate::wire;

/// Where a builder is in its lifecycle.
///
/// There is no way back to `Collecting` from a finished request; a retry
/// starts a new builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuilderState {
    Collecting { remaining: usize },
    Ready,
}

#[derive(Debug, Clone)]
pub struct RequestBuilder {
    params: SimulationParams,
    processes: Vec<ProcessDescriptor>,
}

impl RequestBuilder {
    pub fn new(params: SimulationParams) -> Self {
        if params.simulation_end() > MAX_SIMULATION_END {
            tracing::warn!(
                simulation_end = params.simulation_end(),
                limit = MAX_SIMULATION_END,
                "simulation end is above the interactive limit; the engine may not cope"
            );
        }
        Self {
            params,
            processes: Vec::with_capacity(params.process_count()),
        }
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    pub fn processes(&self) -> &[ProcessDescriptor] {
        &self.processes
    }

    pub fn count(&self) -> usize {
        self.processes.len()
    }

    pub fn remaining(&self) -> usize {
        self.params.process_count() - self.processes.len()
    }

    pub fn is_complete(&self) -> bool {
        self.processes.len() == self.params.process_count()
    }

    pub fn state(&self) -> BuilderState {
        if self.is_complete() {
            BuilderState::Ready
        } else {
            BuilderState::Collecting {
                remaining: self.remaining(),
            }
        }
    }

    /// Append a process and return the new count.
    ///
    /// Once the declared count is reached further adds fail with
    /// `CapacityReached`; a failed add never changes the builder.
    pub fn add_process(
        &mut self,
        name: &str,
        arrival: u32,
        service: u32,
    ) -> Result<usize, ValidationError> {
        if self.is_complete() {
            return Err(ValidationError::CapacityReached {
                expected: self.params.process_count(),
            });
        }
        let name = validate::validate_name(name)?;
        validate::validate_service(service)?;

        self.processes.push(ProcessDescriptor {
            name,
            arrival,
            service,
        });
        tracing::debug!(
            count = self.processes.len(),
            expected = self.params.process_count(),
            "process added"
        );
        Ok(self.processes.len())
    }

    /// Wire text for the collected request. Fails fast while still collecting.
    pub fn serialize(&self) -> Result<String, ValidationError> {
        self.ensure_complete()?;
        Ok(wire::encode(self.params(), &self.processes))
    }

    pub fn build(self) -> Result<SimulationRequest, ValidationError> {
        self.ensure_complete()?;
        Ok(SimulationRequest {
            params: self.params,
            processes: self.processes,
        })
    }

    fn ensure_complete(&self) -> Result<(), ValidationError> {
        if !self.is_complete() {
            return Err(ValidationError::Incomplete {
                have: self.processes.len(),
                expected: self.params.process_count(),
            });
        }
        Ok(())
    }
}

/// A complete request. Only [`RequestBuilder::build`] creates one, so the
/// process list always matches the declared count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationRequest {
    params: SimulationParams,
    processes: Vec<ProcessDescriptor>,
}

impl SimulationRequest {
    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    pub fn mode(&self) -> Mode {
        self.params.mode()
    }

    pub fn policy(&self) -> Policy {
        self.params.policy()
    }

    pub fn simulation_end(&self) -> u32 {
        self.params.simulation_end()
    }

    pub fn process_count(&self) -> usize {
        self.params.process_count()
    }

    pub fn processes(&self) -> &[ProcessDescriptor] {
        &self.processes
    }

    pub fn serialize(&self) -> String {
        wire::encode(&self.params, &self.processes)
    }

    pub fn from_wire(text: &str) -> crate::RequestResult<Self> {
        wire::decode(text)
    }
}
