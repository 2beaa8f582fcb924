use crate::ui::{self, CheckMark};
use anyhow::Result;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;
use userapi_harness::{
    parse_contract_from_file, Contract, FailureScenario, HarnessRunner, JsonExporter,
    MarkdownExporter, RunOptions,
};

pub async fn execute(
    contract_file: Option<PathBuf>,
    scenario: Option<FailureScenario>,
    port: u16,
    grace: Duration,
    environment: String,
    output_json: Option<PathBuf>,
    output_markdown: Option<PathBuf>,
) -> Result<()> {
    println!("{}", "=== User API Test Harness ===".bold().cyan());

    let contract = match (contract_file, scenario) {
        (Some(path), _) => {
            println!("Loading contract: {}", path.display());
            parse_contract_from_file(&path).await?
        }
        (None, Some(scenario)) => {
            ui::print_warning(&format!(
                "Running failure scenario '{}': this run is expected to fail",
                scenario
            ));
            Contract::for_scenario(scenario)
        }
        (None, None) => Contract::passing(),
    };

    println!("\n{}", "Contract Details:".bold());
    println!("  Name: {}", contract.name.green());
    if let Some(desc) = &contract.description {
        println!("  Description: {}", desc);
    }
    println!(
        "  Checks: {}",
        contract
            .checks
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(" → ")
    );
    println!("  Test port: {}", port);
    println!("  Grace period: {}", humantime::format_duration(grace));

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")?,
    );
    pb.set_message("Running checks...");
    pb.enable_steady_tick(Duration::from_millis(100));

    let runner = HarnessRunner::new(RunOptions {
        port,
        grace_period: grace,
        environment,
    });
    let result = runner.run(&contract).await;

    pb.finish_and_clear();
    let report = result?;

    // Display results
    println!("\n{}", "=== Test Results ===".bold().green());
    println!("Contract: {}", report.contract_name.cyan());
    println!("Total Duration: {:?}", report.total_duration);
    println!("Passed Assertions: {}", report.passed_assertions.len());

    println!("\n{}", "Checks:".bold());
    for check in &report.completed_checks {
        ui::print_check(CheckMark::Passed, check.name());
    }
    if let Some(failure) = &report.failure {
        let name = failure.check.map(|c| c.name()).unwrap_or("setup");
        ui::print_check(CheckMark::Failed, name);
    }
    for check in &report.skipped_checks {
        ui::print_check(CheckMark::Skipped, check.name());
    }

    // Save outputs
    if let Some(json_path) = output_json {
        println!("\nSaving JSON report to: {}", json_path.display());
        JsonExporter::export(&report, &json_path).await?;
    }

    if let Some(md_path) = output_markdown {
        println!("Saving Markdown report to: {}", md_path.display());
        MarkdownExporter::export(&report, &md_path).await?;
    }

    match &report.failure {
        None => {
            println!();
            ui::print_success("All tests passed!");
            info!("Exiting with status {}", report.exit_code());
            Ok(())
        }
        Some(failure) => {
            println!();
            ui::print_error(&format!("Test failed: {}", failure.message));
            anyhow::bail!(
                "contract '{}' failed (exit status {})",
                report.contract_name,
                report.exit_code()
            )
        }
    }
}
