/*
 * Responsibility
 * - tokio runtime startup
 * - app::run() (no logic here)
 */
use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    lti_header_gateway::app::run().await?;
    Ok(())
}
