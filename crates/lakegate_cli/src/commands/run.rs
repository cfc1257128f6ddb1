use anyhow::Result;
use lakegate_core::PipelineConfig;
use lakegate_store::connect;
use lakegate_transform::{TransformEngine, jobs};
use lakegate_validator::{Validator, refined_rules, trusted_rules};
use tracing::info;

use crate::output;

/// Full pipeline: the trusted gate must pass before any refined table is
/// rebuilt, and the refined gate decides the exit code.
pub async fn execute(config: &PipelineConfig, format: &str) -> Result<()> {
    super::check_format(format)?;
    info!("Running full pipeline against {}", config.database);

    let pool = connect(&config.database).await?;
    let validator = Validator::new(pool.clone());
    let tolerances = &config.tolerances;

    let trusted = validator.run_all(&trusted_rules(tolerances)).await;
    output::print_validation_report(&trusted.log, trusted.verdict, format);
    if !trusted.verdict.passed() {
        output::print_error("Trusted layer failed validation; refusing to transform");
        std::process::exit(trusted.verdict.exit_code());
    }

    let summary = TransformEngine::new(pool).run_all(&jobs()).await;
    output::print_transform_summary(&summary, format);
    if !summary.all_succeeded() {
        std::process::exit(1);
    }

    let refined = validator.run_all(&refined_rules(tolerances)).await;
    output::print_validation_report(&refined.log, refined.verdict, format);

    if !refined.verdict.passed() {
        std::process::exit(refined.verdict.exit_code());
    }
    output::print_info("Pipeline complete: refined layer is safe to consume");
    Ok(())
}
