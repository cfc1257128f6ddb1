use colored::*;
use lakegate_core::{ResultLog, Status, Verdict};
use lakegate_transform::TransformSummary;
use serde_json::json;

pub fn print_validation_report(log: &ResultLog, verdict: Verdict, format: &str) {
    match format {
        "json" => print_json_report(log, verdict),
        _ => print_text_report(log, verdict),
    }
}

fn print_text_report(log: &ResultLog, verdict: Verdict) {
    println!("\n{}", "═".repeat(60));
    println!("{}", "  VALIDATION REPORT".bold());
    println!("{}", "═".repeat(60));

    if verdict.passed() {
        println!("\n{} {}", "✓".green().bold(), "Gate PASSED".green().bold());
    } else {
        println!("\n{} {}", "✗".red().bold(), "Gate FAILED".red().bold());
    }

    let errors: Vec<_> = log
        .entries()
        .iter()
        .filter(|r| r.status == Status::Error)
        .collect();
    if !errors.is_empty() {
        println!("\n{}", "Errors:".red().bold());
        for (i, result) in errors.iter().enumerate() {
            println!("  {}. {}", i + 1, result.message.red());
        }
    }

    let warnings: Vec<_> = log
        .entries()
        .iter()
        .filter(|r| r.status == Status::Warning)
        .collect();
    if !warnings.is_empty() {
        println!("\n{}", "Warnings:".yellow().bold());
        for (i, result) in warnings.iter().enumerate() {
            println!("  {}. {}", i + 1, result.message.yellow());
        }
    }

    println!("\n{}", "Summary:".bold());
    println!("  Checks run:     {}", log.len());
    println!("  Total errors:   {}", log.errors());
    println!("  Total warnings: {}", log.warnings());
    println!("{}", "═".repeat(60));
}

fn print_json_report(log: &ResultLog, verdict: Verdict) {
    let output = json!({
        "verdict": verdict,
        "passed": verdict.passed(),
        "results": log.entries(),
        "summary": {
            "check_count": log.len(),
            "error_count": log.errors(),
            "warning_count": log.warnings(),
        }
    });

    println!("{}", serde_json::to_string_pretty(&output).unwrap());
}

pub fn print_transform_summary(summary: &TransformSummary, format: &str) {
    if format == "json" {
        let output = json!({
            "succeeded": summary.all_succeeded(),
            "jobs": summary.outcomes.iter().map(|o| json!({
                "job": o.job,
                "target": &o.target,
                "rows": o.rows,
                "error": &o.error,
            })).collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&output).unwrap());
        return;
    }

    println!("\n{}", "═".repeat(60));
    println!("{}", "  TRANSFORMATION SUMMARY".bold());
    println!("{}", "═".repeat(60));
    for outcome in &summary.outcomes {
        match &outcome.error {
            None => println!(
                "  {} {} ({} rows)",
                "✓".green().bold(),
                outcome.target,
                outcome.rows
            ),
            Some(error) => println!(
                "  {} {} {}",
                "✗".red().bold(),
                outcome.target,
                error.red()
            ),
        }
    }
    println!(
        "\n  {} of {} tables rebuilt",
        summary.attempted() - summary.failed(),
        summary.attempted()
    );
    println!("{}", "═".repeat(60));
}

pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message.green());
}

pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message.red());
}

pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}
