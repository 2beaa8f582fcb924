use anyhow::Result;
use colored::Colorize;
use std::path::PathBuf;
use userapi_harness::parse_contract_from_file;

pub async fn execute(contract_file: PathBuf) -> Result<()> {
    println!("{}", "=== Validating Contract ===".bold().cyan());
    println!("File: {}", contract_file.display());

    match parse_contract_from_file(&contract_file).await {
        Ok(contract) => {
            println!("\n{}", "✓ Contract is valid!".green().bold());
            println!("\nContract Details:");
            println!("  Name: {}", contract.name);
            println!("  Checks: {}", contract.checks.len());

            for (i, check) in contract.checks.iter().enumerate() {
                println!("    {}: {} - {}", i + 1, check, check.description());
            }

            let exp = &contract.expectations;
            println!("\n  Expectations:");
            println!("    version: {}", exp.version);
            println!("    seeded users: {}", exp.seeded_users);
            println!(
                "    statuses: root={} health={} list={} create={} not_found={} invalid_create={}",
                exp.root_status,
                exp.health_status,
                exp.list_status,
                exp.create_status,
                exp.not_found_status,
                exp.invalid_create_status
            );
            if exp.sanitized_input {
                println!(
                    "\n{}",
                    "⚠ Warning: expects sanitized input, which the service does not do".yellow()
                );
            }

            Ok(())
        }
        Err(e) => {
            println!("\n{}", "✗ Contract is invalid!".red().bold());
            println!("\nError: {}", e);
            Err(e.into())
        }
    }
}
