use crate::{
    contract::{Contract, ContractConfig},
    error::{HarnessError, Result},
};
use std::path::Path;

pub async fn parse_contract_from_file(path: impl AsRef<Path>) -> Result<Contract> {
    let path = path.as_ref();
    let contents = tokio::fs::read_to_string(path).await?;

    let extension = path.extension().and_then(|s| s.to_str());

    match extension {
        Some("yaml") | Some("yml") => parse_yaml(&contents),
        Some("toml") => parse_toml(&contents),
        Some("json") => parse_json(&contents),
        _ => Err(HarnessError::InvalidContract(
            "Unsupported file format. Use .yaml, .yml, .toml, or .json".to_string(),
        )),
    }
}

pub fn parse_contract_from_str(content: &str, format: &str) -> Result<Contract> {
    match format.to_lowercase().as_str() {
        "yaml" | "yml" => parse_yaml(content),
        "toml" => parse_toml(content),
        "json" => parse_json(content),
        _ => Err(HarnessError::InvalidContract(format!(
            "Unsupported format: {}",
            format
        ))),
    }
}

fn parse_yaml(content: &str) -> Result<Contract> {
    let contract: Contract = serde_yaml::from_str(content)
        .map_err(|e| HarnessError::InvalidContract(e.to_string()))?;
    validated(contract)
}

fn parse_toml(content: &str) -> Result<Contract> {
    let config: ContractConfig =
        toml::from_str(content).map_err(|e| HarnessError::InvalidContract(e.to_string()))?;
    validated(config.contract)
}

fn parse_json(content: &str) -> Result<Contract> {
    let contract: Contract = serde_json::from_str(content)?;
    validated(contract)
}

fn validated(contract: Contract) -> Result<Contract> {
    contract.validate().map_err(HarnessError::InvalidContract)?;
    Ok(contract)
}
