use std::io::Write;

use anyhow::{Result, bail};
use tracing::{info, warn};

use crate::client::ClimateClient;

pub async fn health(client: &ClimateClient, out: &mut impl Write) -> Result<()> {
    let status = client.health().await?;

    match &status.service {
        Some(service) => writeln!(out, "{}: {} ({})", client.base_url(), status.status, service)?,
        None => writeln!(out, "{}: {}", client.base_url(), status.status)?,
    }

    if !status.is_healthy() {
        warn!(status = %status.status, "Backend reports unhealthy");
        bail!("Backend at {} is not healthy", client.base_url());
    }
    info!("Backend healthy");
    Ok(())
}
