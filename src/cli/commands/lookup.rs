use std::io::Write;

use anyhow::Result;
use tracing::info;

use crate::client::ClimateClient;
use crate::report::write_location_data;

/// Superseded single-city lookup, kept for backends that still expose it.
pub async fn lookup(client: &ClimateClient, city: &str, out: &mut impl Write) -> Result<()> {
    let location = client.legacy_lookup(city).await?;
    info!(city, location = %location.label(), "Lookup finished");
    write_location_data(out, &location)?;
    Ok(())
}
