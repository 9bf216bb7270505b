use serde::{Deserialize, Serialize};

use crate::utils::constants::WINDOW_YEARS;

/// The target year together with the two years preceding it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearWindow {
    pub target: i32,
}

impl YearWindow {
    pub fn new(target: i32) -> Self {
        Self { target }
    }

    /// Oldest to newest
    pub fn years(&self) -> Vec<i32> {
        (self.target - (WINDOW_YEARS - 1)..=self.target).collect()
    }

    /// Baseline years, most recent first
    pub fn previous(&self) -> [i32; 2] {
        [self.target - 1, self.target - 2]
    }
}
