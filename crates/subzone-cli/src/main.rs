//! subzone - register hostnames and publish the zone

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    subzone_cli::run().await
}
