use core::fmt;
use core::str::FromStr;

use crate::{CoreError, CoreResult};

/// Display names indexed by `id - 1`.
const NAMES: [&str; 8] = ["FCFS", "RR", "SPN", "SRT", "HRRN", "FB-1", "FB-2i", "Aging"];

pub const POLICY_MIN: u8 = 1;
pub const POLICY_MAX: u8 = 8;

const ROUND_ROBIN: u8 = 2;
const AGING: u8 = 8;

/// Scheduling policy selector.
///
/// The integer is opaque to everything except the engine. Round Robin and
/// Aging additionally take a quantum, written as `<id>-<quantum>`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Policy {
    id: u8,
    quantum: Option<u32>,
}

impl Policy {
    pub fn new(id: u8) -> CoreResult<Self> {
        CoreError::check_range("policy", id as i64, POLICY_MIN as i64, POLICY_MAX as i64)?;
        Ok(Self { id, quantum: None })
    }

    /// Attach a time quantum. Only Round Robin and Aging accept one.
    pub fn with_quantum(self, quantum: u32) -> CoreResult<Self> {
        if !self.takes_quantum() {
            return Err(CoreError::InvalidArg {
                what: format!("policy {} ({}) does not take a quantum", self.id, self.name()),
            });
        }
        CoreError::check_range("quantum", quantum as i64, 1, u32::MAX as i64)?;
        Ok(Self {
            quantum: Some(quantum),
            ..self
        })
    }

    pub fn id(self) -> u8 {
        self.id
    }

    pub fn quantum(self) -> Option<u32> {
        self.quantum
    }

    pub fn takes_quantum(self) -> bool {
        matches!(self.id, ROUND_ROBIN | AGING)
    }

    pub fn is_aging(self) -> bool {
        self.id == AGING
    }

    pub fn name(self) -> &'static str {
        NAMES[(self.id - POLICY_MIN) as usize]
    }

    /// Token written on the second line of a request.
    pub fn as_wire(self) -> String {
        match self.quantum {
            Some(q) => format!("{}-{}", self.id, q),
            None => self.id.to_string(),
        }
    }

    /// All selectable policies, without quanta.
    pub fn all() -> impl Iterator<Item = Policy> {
        (POLICY_MIN..=POLICY_MAX).map(|id| Policy { id, quantum: None })
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.quantum {
            Some(q) => write!(f, "{} - {}-{}", self.id, self.name(), q),
            None => write!(f, "{} - {}", self.id, self.name()),
        }
    }
}

impl FromStr for Policy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CoreError::InvalidArg {
            what: format!("malformed policy '{}'", s.trim()),
        };

        let (id_part, quantum_part) = match s.trim().split_once('-') {
            Some((id, q)) => (id, Some(q)),
            None => (s.trim(), None),
        };
        let id: u8 = id_part.trim().parse().map_err(|_| invalid())?;
        let policy = Policy::new(id)?;
        match quantum_part {
            Some(q) => {
                let q: u32 = q.trim().parse().map_err(|_| invalid())?;
                policy.with_quantum(q)
            }
            None => Ok(policy),
        }
    }
}
