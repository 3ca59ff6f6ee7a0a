use std::io::Write;

use anyhow::Result;
use common::is_searchable;
use session::SearchSession;
use tracing::{debug, info};

use crate::client::ClimateClient;
use crate::config::Settings;
use crate::report::write_locations;
use crate::runner::search_once;

pub async fn search(
    client: &ClimateClient,
    settings: &Settings,
    query: &str,
    limit: Option<u32>,
    out: &mut impl Write,
) -> Result<()> {
    let mut config = settings.search_config();
    if let Some(limit) = limit {
        config.limit = limit;
    }

    if !is_searchable(query) {
        debug!(query, "Query too short, not searching");
        writeln!(out, "no matches")?;
        return Ok(());
    }

    let mut session = SearchSession::new(config);
    search_once(client, &mut session, query).await;

    let suggestions = session.suggestions();
    info!(query, count = suggestions.len(), "Search finished");
    if suggestions.is_empty() {
        writeln!(out, "no matches")?;
    } else {
        write_locations(out, suggestions)?;
    }
    Ok(())
}
