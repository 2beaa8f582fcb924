use crate::{
    client::HttpProbe,
    error::{HarnessError, Result},
};
use tracing::{error, info};

/// State shared by the checks of one run: the probe and every assertion
/// that has passed so far.
pub struct TestContext {
    probe: HttpProbe,
    passed: Vec<String>,
}

impl TestContext {
    pub fn new(probe: HttpProbe) -> Self {
        Self {
            probe,
            passed: Vec::new(),
        }
    }

    pub fn probe(&self) -> &HttpProbe {
        &self.probe
    }

    /// Fails fast with `message` when `condition` is false.
    pub fn assert(&mut self, condition: bool, message: impl Into<String>) -> Result<()> {
        let message = message.into();
        if !condition {
            error!("✗ {}", message);
            return Err(HarnessError::AssertionFailed(message));
        }

        info!("✓ {}", message);
        self.passed.push(message);
        Ok(())
    }

    pub fn passed(&self) -> &[String] {
        &self.passed
    }

    pub fn into_passed(self) -> Vec<String> {
        self.passed
    }
}
