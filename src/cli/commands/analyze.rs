use std::io::Write;

use anyhow::{Result, bail};
use common::LocationOption;
use session::{AnalysisOrchestrator, SearchEffect, SearchSession, Slot};
use tracing::{debug, error, info};

use crate::client::ClimateClient;
use crate::config::Settings;
use crate::report::write_slot;
use crate::runner::{run_analysis, search_once};

/// Resolves `query` to its `pick`-th suggestion (1-based).
async fn resolve(
    client: &ClimateClient,
    settings: &Settings,
    query: &str,
    pick: usize,
) -> Result<LocationOption> {
    let mut session = SearchSession::new(settings.search_config());
    search_once(client, &mut session, query).await;

    let suggestions = session.suggestions();
    if suggestions.is_empty() {
        bail!("No locations found for '{}'", query);
    }
    let Some(option) = suggestions.get(pick.saturating_sub(1)).cloned() else {
        bail!(
            "Only {} location(s) found for '{}', cannot pick #{}",
            suggestions.len(),
            query,
            pick
        );
    };

    debug!(query, location = %option.label(), "Resolved location");
    let selected = session
        .select(option.clone())
        .into_iter()
        .find_map(|effect| match effect {
            SearchEffect::SelectionChanged(selected) => selected,
            _ => None,
        });
    Ok(selected.unwrap_or(option))
}

pub async fn analyze(
    client: &ClimateClient,
    settings: &Settings,
    current: &str,
    target: Option<&str>,
    pick: usize,
    out: &mut impl Write,
) -> Result<()> {
    let mut orchestrator = AnalysisOrchestrator::new();
    orchestrator.set_current_location(Some(resolve(client, settings, current, pick).await?));
    if let Some(target) = target {
        orchestrator.set_target_location(Some(resolve(client, settings, target, pick).await?));
    }

    run_analysis(client, &mut orchestrator).await;

    write_slot(out, &orchestrator, Slot::Current)?;
    if orchestrator.target_location().is_some() {
        writeln!(out)?;
        write_slot(out, &orchestrator, Slot::Target)?;
    }

    if let Some(message) = orchestrator.error() {
        error!(error = message, "Analysis run failed");
        bail!("{}", message);
    }
    info!(connectivity = orchestrator.connectivity().label(), "Analysis run finished");
    Ok(())
}
