//! Terminal host for the session state machines.

use std::collections::VecDeque;

use futures::StreamExt;
use futures::stream::FuturesUnordered;
use session::{AnalysisOrchestrator, SearchEffect, SearchSession};
use tracing::{debug, trace};

use crate::client::ClimateClient;

/// Feeds one typed query through `session` and executes its effects.
///
/// The debounce timer is treated as already elapsed. Failures end up as an
/// empty suggestion list, the same as in the browser.
pub async fn search_once(client: &ClimateClient, session: &mut SearchSession, query: &str) {
    let mut pending: VecDeque<SearchEffect> = session.input(query).into();

    while let Some(effect) = pending.pop_front() {
        match effect {
            SearchEffect::ScheduleSearch { token, .. } => {
                trace!(%token, "Firing debounce immediately");
                pending.extend(session.debounce_elapsed(token));
            }
            SearchEffect::IssueSearch { token, query, limit } => {
                let result = client.search(&query, limit).await;
                session.search_completed(token, result);
            }
            SearchEffect::CancelPendingSearch | SearchEffect::SelectionChanged(_) => {}
        }
    }
}

/// Starts a run and applies responses in the order they arrive.
pub async fn run_analysis(client: &ClimateClient, orchestrator: &mut AnalysisOrchestrator) {
    let requests = orchestrator.start();
    debug!(count = requests.len(), "Sending analysis requests");

    let mut in_flight: FuturesUnordered<_> = requests
        .into_iter()
        .map(|request| async move {
            let result = client.analyze(&request.location).await;
            (request, result)
        })
        .collect();

    while let Some((request, result)) = in_flight.next().await {
        orchestrator.complete(request.slot, request.token, result);
    }
}
