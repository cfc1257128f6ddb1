use anyhow::{Result, bail};
use lakegate_core::{PipelineConfig, ResultLog};
use lakegate_store::connect;
use lakegate_validator::{Validator, refined_rules, trusted_rules};
use tracing::info;

use crate::output;

pub async fn execute(config: &PipelineConfig, layer: &str, format: &str) -> Result<()> {
    super::check_format(format)?;
    if !matches!(layer, "trusted" | "refined" | "all") {
        bail!("unknown layer: {layer} (expected trusted, refined or all)");
    }
    info!("Validating {layer} layer(s) in {}", config.database);

    let pool = connect(&config.database).await?;
    let validator = Validator::new(pool);
    let tolerances = &config.tolerances;

    let mut log = ResultLog::new();
    match layer {
        "trusted" => validator.run_into(&trusted_rules(tolerances), &mut log).await,
        "refined" => validator.run_into(&refined_rules(tolerances), &mut log).await,
        _ => {
            validator.run_into(&trusted_rules(tolerances), &mut log).await;
            validator.run_into(&refined_rules(tolerances), &mut log).await;
        }
    }

    let verdict = log.verdict();
    output::print_validation_report(&log, verdict, format);

    if !verdict.passed() {
        std::process::exit(verdict.exit_code());
    }
    Ok(())
}
