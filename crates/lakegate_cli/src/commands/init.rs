use anyhow::Result;
use lakegate_core::PipelineConfig;
use lakegate_store::{connect, create_trusted_schema};
use tracing::info;

use crate::output;

pub async fn execute(config: &PipelineConfig) -> Result<()> {
    info!("Initializing warehouse: {}", config.database);

    let pool = connect(&config.database).await?;
    create_trusted_schema(&pool).await?;

    output::print_success(&format!(
        "Trusted schema ready in {}",
        config.database
    ));
    Ok(())
}
