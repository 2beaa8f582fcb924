pub mod assertions;
pub mod client;
pub mod contract;
pub mod error;
pub mod parser;
pub mod report;
pub mod runner;
pub mod suite;

pub use assertions::TestContext;
pub use client::{HttpProbe, ProbeResponse, ResponseBody};
pub use contract::{CheckKind, Contract, Expectations, FailureScenario};
pub use error::{HarnessError, Result};
pub use parser::{parse_contract_from_file, parse_contract_from_str};
pub use report::{JsonExporter, MarkdownExporter};
pub use runner::{CheckFailure, HarnessRunner, RunOptions, RunReport};
