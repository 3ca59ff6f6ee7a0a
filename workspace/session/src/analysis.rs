//! Analysis orchestration for the current and target locations.
//!
//! Each slot holds exactly one [`SlotState`]. Whether the page is loading and
//! which error to show are read off the slots, never stored beside them. Every
//! request carries a per-slot [`RequestToken`]; responses for a retired token
//! are dropped.

use std::fmt;

use common::{
    ApiResult, ClimateAnalysis, HealthStatus, LocationData, LocationOption, Priorities,
    PriorityKey,
};
use tracing::{debug, error, info, warn};

use crate::sequence::{RequestSequencer, RequestToken};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Current,
    Target,
}

impl Slot {
    pub const ALL: [Slot; 2] = [Slot::Current, Slot::Target];

    pub fn label(self) -> &'static str {
        match self {
            Self::Current => "Current Location",
            Self::Target => "Target Location",
        }
    }

    fn other(self) -> Self {
        match self {
            Self::Current => Self::Target,
            Self::Target => Self::Current,
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Current => f.write_str("current"),
            Self::Target => f.write_str("target"),
        }
    }
}

/// Lifecycle of one analysis slot.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SlotState {
    #[default]
    Idle,
    Loading,
    Succeeded(ClimateAnalysis),
    Failed(String),
}

impl SlotState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn data(&self) -> Option<&ClimateAnalysis> {
        match self {
            Self::Succeeded(analysis) => Some(analysis),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Backend reachability as last observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Connectivity {
    #[default]
    Connected,
    Connecting,
    Error,
}

impl Connectivity {
    pub fn label(self) -> &'static str {
        match self {
            Self::Connected => "Connected",
            Self::Connecting => "Connecting...",
            Self::Error => "Connection Error",
        }
    }
}

/// One analysis call the host must perform and report back.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisRequest {
    pub slot: Slot,
    pub token: RequestToken,
    pub location: LocationData,
}

#[derive(Debug, Clone, Default)]
struct SlotEntry {
    state: SlotState,
    sequencer: RequestSequencer,
}

impl SlotEntry {
    fn begin(&mut self) -> RequestToken {
        self.state = SlotState::Loading;
        self.sequencer.issue()
    }

    fn reset(&mut self) {
        self.state = SlotState::Idle;
        self.sequencer.invalidate();
    }

    fn fail(&mut self, message: String) {
        self.state = SlotState::Failed(message);
        self.sequencer.invalidate();
    }
}

#[derive(Debug, Clone, Default)]
pub struct AnalysisOrchestrator {
    current_location: Option<LocationOption>,
    target_location: Option<LocationOption>,
    priorities: Priorities,
    connectivity: Connectivity,
    show_comparison: bool,
    current: SlotEntry,
    target: SlotEntry,
}

impl AnalysisOrchestrator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_location(&self) -> Option<&LocationOption> {
        self.current_location.as_ref()
    }

    pub fn target_location(&self) -> Option<&LocationOption> {
        self.target_location.as_ref()
    }

    pub fn set_current_location(&mut self, location: Option<LocationOption>) {
        self.current_location = location;
    }

    pub fn set_target_location(&mut self, location: Option<LocationOption>) {
        self.target_location = location;
    }

    pub fn priorities(&self) -> &Priorities {
        &self.priorities
    }

    pub fn set_priority(&mut self, key: PriorityKey, value: u8) {
        self.priorities.set(key, value);
    }

    pub fn connectivity(&self) -> Connectivity {
        self.connectivity
    }

    pub fn show_comparison(&self) -> bool {
        self.show_comparison
    }

    pub fn state(&self, slot: Slot) -> &SlotState {
        &self.entry(slot).state
    }

    pub fn loading(&self) -> bool {
        Slot::ALL.iter().any(|slot| self.state(*slot).is_loading())
    }

    pub fn error(&self) -> Option<&str> {
        Slot::ALL.iter().find_map(|slot| self.state(*slot).error())
    }

    /// Starts a run and returns the requests to send.
    ///
    /// Without a current location nothing changes and nothing is returned. A
    /// location that fails validation fails its slot locally.
    pub fn start(&mut self) -> Vec<AnalysisRequest> {
        let Some(current) = self.current_location.as_ref() else {
            debug!("Analysis requested without a current location");
            return Vec::new();
        };

        let current = current.to_location_data().checked();
        let target = self
            .target_location
            .as_ref()
            .map(|target| target.to_location_data().checked());

        self.show_comparison = true;

        let (current, target) = match (current, target.transpose()) {
            (Ok(current), Ok(target)) => (current, target),
            (Err(e), _) => {
                warn!(error = %e, "Current location rejected");
                self.entry_mut(Slot::Current).fail(e.user_message());
                self.entry_mut(Slot::Target).reset();
                return Vec::new();
            }
            (Ok(_), Err(e)) => {
                warn!(error = %e, "Target location rejected");
                self.entry_mut(Slot::Target).fail(e.user_message());
                self.entry_mut(Slot::Current).reset();
                return Vec::new();
            }
        };

        self.connectivity = Connectivity::Connecting;

        let mut requests = vec![AnalysisRequest {
            slot: Slot::Current,
            token: self.current.begin(),
            location: current,
        }];
        match target {
            Some(location) => requests.push(AnalysisRequest {
                slot: Slot::Target,
                token: self.target.begin(),
                location,
            }),
            None => self.target.reset(),
        }

        debug!(requests = requests.len(), "Analysis run started");
        requests
    }

    /// An analysis response arrived. Returns whether it was applied.
    ///
    /// A failure aborts the run: the other slot, if still loading, goes back to
    /// idle and its response will be dropped.
    pub fn complete(
        &mut self,
        slot: Slot,
        token: RequestToken,
        result: ApiResult<ClimateAnalysis>,
    ) -> bool {
        let entry = self.entry(slot);
        if !entry.sequencer.is_current(token) || !entry.state.is_loading() {
            debug!(%slot, %token, "Discarding superseded analysis response");
            return false;
        }

        match result {
            Ok(analysis) => {
                info!(%slot, location = %analysis.location.label(), "Analysis completed");
                self.entry_mut(slot).state = SlotState::Succeeded(analysis);
                if !self.loading() {
                    self.connectivity = Connectivity::Connected;
                }
            }
            Err(e) => {
                error!(%slot, error = %e, "Analysis failed");
                self.entry_mut(slot).fail(e.user_message());
                let other = self.entry_mut(slot.other());
                if other.state.is_loading() {
                    other.reset();
                }
                self.connectivity = Connectivity::Error;
            }
        }
        true
    }

    /// Outcome of the startup health probe. Ignored while a run is in flight.
    pub fn health_checked(&mut self, result: ApiResult<HealthStatus>) {
        if self.loading() {
            debug!("Health probe finished during a run, ignoring");
            return;
        }
        self.connectivity = match result {
            Ok(health) if health.is_healthy() => Connectivity::Connected,
            Ok(health) => {
                warn!(status = %health.status, "Backend reports unhealthy");
                Connectivity::Error
            }
            Err(e) => {
                warn!(error = %e, "Health probe failed");
                Connectivity::Error
            }
        };
    }

    fn entry(&self, slot: Slot) -> &SlotEntry {
        match slot {
            Slot::Current => &self.current,
            Slot::Target => &self.target,
        }
    }

    fn entry_mut(&mut self, slot: Slot) -> &mut SlotEntry {
        match slot {
            Slot::Current => &mut self.current,
            Slot::Target => &mut self.target,
        }
    }
}
