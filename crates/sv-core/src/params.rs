//! Simulation parameters and process descriptors.

use crate::{CoreError, CoreResult, Mode, Policy};

pub const MAX_PROCESSES: usize = 10;

/// Interactive entry limits. The engine sizes every process timeline by the
/// simulation end, so larger values are only accepted from files.
pub const MAX_SIMULATION_END: u32 = 50;
pub const MAX_ARRIVAL: u32 = 50;
pub const MAX_SERVICE: u32 = 100;

/// One simulated process as entered by the operator.
///
/// For the Aging policy the engine reads the third field as the initial
/// priority; it still travels in `service`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProcessDescriptor {
    pub name: String,
    pub arrival: u32,
    pub service: u32,
}

/// Run-wide parameters, validated on construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SimulationParams {
    mode: Mode,
    policy: Policy,
    simulation_end: u32,
    process_count: usize,
}

impl SimulationParams {
    pub fn new(
        mode: Mode,
        policy: Policy,
        simulation_end: u32,
        process_count: usize,
    ) -> CoreResult<Self> {
        CoreError::check_range("simulation end", simulation_end as i64, 1, u32::MAX as i64)?;
        CoreError::check_range(
            "process count",
            process_count as i64,
            1,
            MAX_PROCESSES as i64,
        )?;
        Ok(Self {
            mode,
            policy,
            simulation_end,
            process_count,
        })
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn policy(&self) -> Policy {
        self.policy
    }

    pub fn simulation_end(&self) -> u32 {
        self.simulation_end
    }

    pub fn process_count(&self) -> usize {
        self.process_count
    }
}
