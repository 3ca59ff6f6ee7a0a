use std::io::Write;

use anyhow::{Context, Result};
use tracing::info;

use crate::client::ClimateClient;
use crate::report::write_comparison;

pub async fn compare(
    client: &ClimateClient,
    current: &str,
    target: &str,
    out: &mut impl Write,
) -> Result<()> {
    let report = client
        .compare(current, target)
        .await
        .with_context(|| format!("Failed to compare '{}' with '{}'", current, target))?;

    info!(current, target, "Comparison received");
    write_comparison(out, &report)?;
    Ok(())
}
