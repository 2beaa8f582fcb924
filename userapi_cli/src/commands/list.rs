use anyhow::Result;
use colored::Colorize;
use tabled::{Table, Tabled};
use userapi_harness::{CheckKind, Contract, FailureScenario};

#[derive(Tabled)]
struct CheckRow {
    #[tabled(rename = "Check")]
    name: &'static str,
    #[tabled(rename = "In passing contract")]
    default: &'static str,
    #[tabled(rename = "Description")]
    description: &'static str,
}

#[derive(Tabled)]
struct ScenarioRow {
    #[tabled(rename = "Scenario")]
    name: &'static str,
    #[tabled(rename = "Checks")]
    checks: String,
    #[tabled(rename = "Description")]
    description: &'static str,
}

pub async fn execute() -> Result<()> {
    println!("{}", "=== Available Checks ===".bold().cyan());

    let passing = Contract::passing();
    let checks: Vec<CheckRow> = CheckKind::ALL
        .iter()
        .map(|check| CheckRow {
            name: check.name(),
            default: if passing.checks.contains(check) { "yes" } else { "no" },
            description: check.description(),
        })
        .collect();
    println!("\n{}", Table::new(checks));

    println!("\n{}", "=== Failure Scenarios ===".bold().cyan());

    let scenarios: Vec<ScenarioRow> = FailureScenario::ALL
        .iter()
        .map(|scenario| ScenarioRow {
            name: scenario.name(),
            checks: scenario
                .contract()
                .checks
                .iter()
                .map(|c| c.to_string())
                .collect::<Vec<_>>()
                .join(", "),
            description: scenario.description(),
        })
        .collect();
    println!("\n{}", Table::new(scenarios));

    println!(
        "\n{}",
        "Use 'userapi test --scenario <name>' to run a failing scenario".yellow()
    );

    Ok(())
}
