use crate::{error::Result, runner::RunReport};
use std::path::Path;

pub struct JsonExporter;

impl JsonExporter {
    pub async fn export(report: &RunReport, path: impl AsRef<Path>) -> Result<()> {
        let json = Self::to_string(report)?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    pub fn to_string(report: &RunReport) -> Result<String> {
        Ok(serde_json::to_string_pretty(report)?)
    }
}

pub struct MarkdownExporter;

impl MarkdownExporter {
    pub async fn export(report: &RunReport, path: impl AsRef<Path>) -> Result<()> {
        tokio::fs::write(path, Self::format(report)).await?;
        Ok(())
    }

    pub fn format(report: &RunReport) -> String {
        let outcome = if report.succeeded() { "PASSED" } else { "FAILED" };

        let list = |items: Vec<String>| {
            if items.is_empty() {
                "_none_".to_string()
            } else {
                items
                    .iter()
                    .map(|item| format!("- {}", item))
                    .collect::<Vec<_>>()
                    .join("\n")
            }
        };

        let failure = match &report.failure {
            Some(failure) => format!(
                "| Failed Check | {} |\n| Failure | {} |\n",
                failure
                    .check
                    .map(|c| c.to_string())
                    .unwrap_or_else(|| "-".to_string()),
                failure.message
            ),
            None => String::new(),
        };

        format!(
            r#"# Test Report: {}

## Summary

| Metric | Value |
|--------|-------|
| Outcome | {} |
| Exit Code | {} |
| Started | {} |
| Duration | {:?} |
| Passed Assertions | {} |
{}
## Completed Checks

{}

## Skipped Checks

{}

## Passed Assertions

{}
"#,
            report.contract_name,
            outcome,
            report.exit_code(),
            report.started_at.to_rfc3339(),
            report.total_duration,
            report.passed_assertions.len(),
            failure,
            list(report.completed_checks.iter().map(|c| c.to_string()).collect()),
            list(report.skipped_checks.iter().map(|c| c.to_string()).collect()),
            list(report.passed_assertions.clone()),
        )
    }
}
