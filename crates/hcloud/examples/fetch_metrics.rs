//! Print the CPU usage of a server over the last hour.
//!
//! ```sh
//! HCLOUD_TOKEN=... cargo run --example fetch_metrics -- 14201534
//! ```

use anyhow::Context;
use chrono::{Duration, Utc};
use hcloud::{Client, MetricType, MetricsParams};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let server_id: u64 = std::env::args()
        .nth(1)
        .context("usage: fetch_metrics <server-id>")?
        .parse()
        .context("server id must be a number")?;

    let client = Client::from_env().context("failed to create client")?;

    let server = client.servers().get(server_id).await?;
    tracing::info!(name = %server.name, status = ?server.status, "Found server");

    let end = Utc::now();
    let params = MetricsParams::new(vec![MetricType::Cpu], end - Duration::hours(1), end)
        .with_step(60);
    let metrics = client.servers().get_metrics(server.id, &params).await?;

    for (name, series) in &metrics.time_series {
        for (timestamp, value) in series.points() {
            match value {
                Some(value) => println!("{name}\t{timestamp}\t{value}"),
                None => println!("{name}\t{timestamp}\t-"),
            }
        }
    }

    Ok(())
}
