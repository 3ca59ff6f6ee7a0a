use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{ApiError, ApiResult};

pub const MIN_PRIORITY: u8 = 1;
pub const MAX_PRIORITY: u8 = 10;

/// Subjective weights a user attaches to a move.
///
/// Held and validated locally only. The analysis payload is [`crate::LocationData`]
/// and carries no weights; wiring these into a request is deferred until the
/// backend accepts them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Priorities {
    #[validate(range(min = 1, max = 10))]
    pub climate: u8,
    #[validate(range(min = 1, max = 10))]
    pub economy: u8,
    #[validate(range(min = 1, max = 10))]
    pub democracy: u8,
    #[validate(range(min = 1, max = 10))]
    pub happiness: u8,
    #[validate(range(min = 1, max = 10))]
    pub safety: u8,
}

impl Default for Priorities {
    fn default() -> Self {
        Self {
            climate: 8,
            economy: 7,
            democracy: 6,
            happiness: 8,
            safety: 7,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PriorityKey {
    Climate,
    Economy,
    Democracy,
    Happiness,
    Safety,
}

impl PriorityKey {
    pub const ALL: [PriorityKey; 5] = [
        PriorityKey::Climate,
        PriorityKey::Economy,
        PriorityKey::Democracy,
        PriorityKey::Happiness,
        PriorityKey::Safety,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Climate => "Climate Resilience",
            Self::Economy => "Economic Opportunity",
            Self::Democracy => "Democracy & Freedom",
            Self::Happiness => "Quality of Life",
            Self::Safety => "Safety & Security",
        }
    }
}

impl Priorities {
    pub fn get(&self, key: PriorityKey) -> u8 {
        match key {
            PriorityKey::Climate => self.climate,
            PriorityKey::Economy => self.economy,
            PriorityKey::Democracy => self.democracy,
            PriorityKey::Happiness => self.happiness,
            PriorityKey::Safety => self.safety,
        }
    }

    /// Sets a weight, clamping into `1..=10`.
    pub fn set(&mut self, key: PriorityKey, value: u8) {
        let value = value.clamp(MIN_PRIORITY, MAX_PRIORITY);
        let slot = match key {
            PriorityKey::Climate => &mut self.climate,
            PriorityKey::Economy => &mut self.economy,
            PriorityKey::Democracy => &mut self.democracy,
            PriorityKey::Happiness => &mut self.happiness,
            PriorityKey::Safety => &mut self.safety,
        };
        *slot = value;
    }

    /// Returns `self` when every weight is within range.
    pub fn checked(self) -> ApiResult<Self> {
        self.validate()
            .map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
        Ok(self)
    }
}
