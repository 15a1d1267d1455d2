use std::fmt;

use serde::Serialize;

/// The four operation modes the system instruction defines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Vision,
    Collusion,
    HealthNarrative,
    InvestorSignal,
}

impl Mode {
    /// Position of the mode in the system instruction (`MODE 1` .. `MODE 4`).
    pub fn number(&self) -> u8 {
        match self {
            Self::Vision => 1,
            Self::Collusion => 2,
            Self::HealthNarrative => 3,
            Self::InvestorSignal => 4,
        }
    }

    /// Whether the mode's answer is parsed as a JSON object.
    pub fn is_structured(&self) -> bool {
        !matches!(self, Self::HealthNarrative)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vision => write!(f, "vision"),
            Self::Collusion => write!(f, "collusion"),
            Self::HealthNarrative => write!(f, "health narrative"),
            Self::InvestorSignal => write!(f, "investor signal"),
        }
    }
}
