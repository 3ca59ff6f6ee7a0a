//! Client-side state machines for the climate advisor.
//!
//! Nothing here owns a clock, a socket or a runtime. The browser host drives
//! these types from Yew callbacks and `gloo` timers, the terminal host from
//! tokio; both execute the effects and requests the machines hand back.

pub mod analysis;
pub mod search;
pub mod sequence;

#[cfg(test)]
mod testing;

pub use analysis::{AnalysisOrchestrator, AnalysisRequest, Connectivity, Slot, SlotState};
pub use search::{DEFAULT_DEBOUNCE, SearchConfig, SearchEffect, SearchSession};
pub use sequence::{RequestSequencer, RequestToken};
