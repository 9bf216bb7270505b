use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Cities with a bulk-data station wired up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
pub enum City {
    Toronto,
}

impl City {
    pub fn name(&self) -> &'static str {
        match self {
            City::Toronto => "Toronto",
        }
    }

    /// Station identifier used by the bulk-data endpoint
    pub fn station_id(&self) -> u32 {
        match self {
            City::Toronto => 31688,
        }
    }
}

impl std::fmt::Display for City {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
