use core::fmt;
use core::str::FromStr;

use crate::CoreError;

/// Report shape requested from the engine.
///
/// The reply itself carries no tag, so the mode sent with the request is the
/// only thing that tells the parser which format to expect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Mode {
    Trace,
    Stats,
}

impl Mode {
    pub const ALL: [Mode; 2] = [Mode::Trace, Mode::Stats];

    /// Token written on the first line of a request.
    pub fn as_wire(self) -> &'static str {
        match self {
            Mode::Trace => "trace",
            Mode::Stats => "stats",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Mode::Trace => "Trace",
            Mode::Stats => "Stats",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}

impl FromStr for Mode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(Mode::Trace),
            "stats" => Ok(Mode::Stats),
            other => Err(CoreError::InvalidArg {
                what: format!("unknown mode '{}' (expected trace or stats)", other),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("Trace".parse::<Mode>().unwrap(), Mode::Trace);
        assert_eq!(" STATS ".parse::<Mode>().unwrap(), Mode::Stats);
        assert!("timeline".parse::<Mode>().is_err());
    }

    #[test]
    fn wire_token_is_lowercase() {
        for mode in Mode::ALL {
            assert_eq!(mode.as_wire(), mode.as_wire().to_lowercase());
            assert_eq!(mode.as_wire().parse::<Mode>().unwrap(), mode);
        }
    }
}
