use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One endpoint-focused group of assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckKind {
    Root,
    Health,
    ListUsers,
    CreateUser,
    NotFound,
    InvalidCreate,
    SanitizedCreate,
}

impl CheckKind {
    pub const ALL: [CheckKind; 7] = [
        CheckKind::Root,
        CheckKind::Health,
        CheckKind::ListUsers,
        CheckKind::CreateUser,
        CheckKind::NotFound,
        CheckKind::InvalidCreate,
        CheckKind::SanitizedCreate,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            CheckKind::Root => "root",
            CheckKind::Health => "health",
            CheckKind::ListUsers => "list_users",
            CheckKind::CreateUser => "create_user",
            CheckKind::NotFound => "not_found",
            CheckKind::InvalidCreate => "invalid_create",
            CheckKind::SanitizedCreate => "sanitized_create",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            CheckKind::Root => "GET / returns the service info",
            CheckKind::Health => "GET /health reports healthy with uptime",
            CheckKind::ListUsers => "GET /api/users returns the seeded users",
            CheckKind::CreateUser => "POST /api/users creates a user",
            CheckKind::NotFound => "Unknown routes return 404",
            CheckKind::InvalidCreate => "POST /api/users without email is rejected",
            CheckKind::SanitizedCreate => "POST /api/users strips script tags from input",
        }
    }
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What the service is expected to answer. Defaults describe the real service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Expectations {
    pub version: String,
    pub root_status: u16,
    pub health_status: u16,
    pub list_status: u16,
    pub seeded_users: usize,
    pub create_status: u16,
    pub not_found_status: u16,
    pub invalid_create_status: u16,
    pub sanitized_input: bool,
}

impl Default for Expectations {
    fn default() -> Self {
        Self {
            version: userapi_core::info::API_VERSION.to_string(),
            root_status: 200,
            health_status: 200,
            list_status: 200,
            seeded_users: 2,
            create_status: 201,
            not_found_status: 404,
            invalid_create_status: 400,
            sanitized_input: false,
        }
    }
}

impl Expectations {
    fn statuses(&self) -> [(&'static str, u16); 6] {
        [
            ("root_status", self.root_status),
            ("health_status", self.health_status),
            ("list_status", self.list_status),
            ("create_status", self.create_status),
            ("not_found_status", self.not_found_status),
            ("invalid_create_status", self.invalid_create_status),
        ]
    }
}

/// The checks a run executes, in order, and what they expect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contract {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub checks: Vec<CheckKind>,
    #[serde(default)]
    pub expectations: Expectations,
}

/// Wrapper for the `[contract]` table in TOML files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractConfig {
    pub contract: Contract,
}

impl Contract {
    pub fn builder() -> ContractBuilder {
        ContractBuilder::default()
    }

    /// The contract the real service satisfies.
    pub fn passing() -> Self {
        Contract::builder()
            .name("passing")
            .description("Full check sequence against the real service contract")
            .check(CheckKind::Root)
            .check(CheckKind::Health)
            .check(CheckKind::ListUsers)
            .check(CheckKind::CreateUser)
            .check(CheckKind::NotFound)
            .check(CheckKind::InvalidCreate)
            .build()
    }

    pub fn for_scenario(scenario: FailureScenario) -> Self {
        scenario.contract()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.name.is_empty() {
            return Err("Contract name cannot be empty".to_string());
        }

        if self.checks.is_empty() {
            return Err("Contract must have at least one check".to_string());
        }

        for (field, status) in self.expectations.statuses() {
            if !(100..=599).contains(&status) {
                return Err(format!("{} must be a valid HTTP status, got {}", field, status));
            }
        }

        Ok(())
    }
}

#[derive(Default)]
pub struct ContractBuilder {
    name: Option<String>,
    description: Option<String>,
    checks: Vec<CheckKind>,
    expectations: Expectations,
}

impl ContractBuilder {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn check(mut self, check: CheckKind) -> Self {
        self.checks.push(check);
        self
    }

    pub fn expectations(mut self, expectations: Expectations) -> Self {
        self.expectations = expectations;
        self
    }

    pub fn build(self) -> Contract {
        Contract {
            name: self.name.unwrap_or_else(|| "unnamed".to_string()),
            description: self.description,
            checks: self.checks,
            expectations: self.expectations,
        }
    }
}

/// Contracts the service is known to violate, used to show how a failing
/// gate looks in the pipeline. One runs per invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailureScenario {
    /// Expects a version the service does not report
    Version,
    /// Expects 200 instead of 201 on user creation
    StatusCode,
    /// Expects script tags to be stripped, which the service does not do
    Security,
}

impl FailureScenario {
    pub const ALL: [FailureScenario; 3] = [
        FailureScenario::Version,
        FailureScenario::StatusCode,
        FailureScenario::Security,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            FailureScenario::Version => "version",
            FailureScenario::StatusCode => "status-code",
            FailureScenario::Security => "security",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            FailureScenario::Version => "Expects API version 2.0.0",
            FailureScenario::StatusCode => "Expects 200 from user creation",
            FailureScenario::Security => "Expects script tags to be sanitized",
        }
    }

    pub fn contract(&self) -> Contract {
        let builder = Contract::builder()
            .name(format!("failing-{}", self.name()))
            .description(self.description());

        match self {
            FailureScenario::Version => builder
                .check(CheckKind::Root)
                .expectations(Expectations {
                    version: "2.0.0".to_string(),
                    ..Expectations::default()
                })
                .build(),
            FailureScenario::StatusCode => builder
                .check(CheckKind::Root)
                .check(CheckKind::CreateUser)
                .expectations(Expectations {
                    create_status: 200,
                    ..Expectations::default()
                })
                .build(),
            FailureScenario::Security => builder
                .check(CheckKind::SanitizedCreate)
                .expectations(Expectations {
                    sanitized_input: true,
                    ..Expectations::default()
                })
                .build(),
        }
    }
}

impl fmt::Display for FailureScenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FailureScenario {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.to_lowercase();
        FailureScenario::ALL
            .into_iter()
            .find(|scenario| scenario.name() == wanted)
            .ok_or_else(|| {
                format!(
                    "Unknown scenario '{}'. Expected one of: version, status-code, security",
                    s
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passing_contract_order() {
        let contract = Contract::passing();
        assert_eq!(
            contract.checks,
            vec![
                CheckKind::Root,
                CheckKind::Health,
                CheckKind::ListUsers,
                CheckKind::CreateUser,
                CheckKind::NotFound,
                CheckKind::InvalidCreate,
            ]
        );
        assert_eq!(contract.expectations, Expectations::default());
        assert!(contract.validate().is_ok());
    }

    #[test]
    fn test_scenarios_are_valid_and_differ_from_passing() {
        for scenario in FailureScenario::ALL {
            let contract = Contract::for_scenario(scenario);
            assert!(contract.validate().is_ok());
            assert_ne!(contract.expectations, Expectations::default());
        }
    }

    #[test]
    fn test_scenario_from_str() {
        assert_eq!(
            "version".parse::<FailureScenario>(),
            Ok(FailureScenario::Version)
        );
        assert_eq!(
            "Status-Code".parse::<FailureScenario>(),
            Ok(FailureScenario::StatusCode)
        );
        assert!("nope".parse::<FailureScenario>().is_err());
    }

    #[test]
    fn test_validation() {
        let empty = Contract::builder().name("empty").build();
        assert!(empty.validate().is_err());

        let bad_status = Contract::builder()
            .name("bad")
            .check(CheckKind::Root)
            .expectations(Expectations {
                root_status: 42,
                ..Expectations::default()
            })
            .build();
        assert!(bad_status.validate().is_err());
    }
}
