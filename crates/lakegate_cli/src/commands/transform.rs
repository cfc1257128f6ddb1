use anyhow::Result;
use lakegate_core::PipelineConfig;
use lakegate_store::connect;
use lakegate_transform::{TransformEngine, jobs};
use tracing::info;

use crate::output;

pub async fn execute(config: &PipelineConfig, format: &str) -> Result<()> {
    super::check_format(format)?;
    info!("Rebuilding refined layer in {}", config.database);

    let pool = connect(&config.database).await?;
    let summary = TransformEngine::new(pool).run_all(&jobs()).await;

    output::print_transform_summary(&summary, format);

    if !summary.all_succeeded() {
        std::process::exit(1);
    }
    Ok(())
}
