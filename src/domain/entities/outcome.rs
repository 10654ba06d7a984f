use serde::Serialize;

use super::{Deployment, ModuleKind};

/// Whether a module made it into the bot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordStatus {
    Success,
    Fail,
}

/// Bookkeeping entry for one discovered module
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegistrationOutcome {
    /// Module name on success, path relative to the root on failure
    pub identifier: String,
    pub status: RecordStatus,
    pub kind: Option<ModuleKind>,
    pub deployment: Option<Deployment>,
    pub message: Option<String>,
}

impl RegistrationOutcome {
    pub fn success(name: impl Into<String>, kind: ModuleKind, deployment: Deployment) -> Self {
        Self {
            identifier: name.into(),
            status: RecordStatus::Success,
            kind: Some(kind),
            deployment: Some(deployment),
            message: None,
        }
    }

    pub fn fail(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            identifier: path.into(),
            status: RecordStatus::Fail,
            kind: None,
            deployment: None,
            message: Some(message.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == RecordStatus::Success
    }
}

/// Successes and failures of one discovery pass, in discovery order
#[derive(Debug, Clone, Default, Serialize)]
pub struct DiscoveryReport {
    pub successes: Vec<RegistrationOutcome>,
    pub failures: Vec<RegistrationOutcome>,
}

impl DiscoveryReport {
    pub fn record(&mut self, outcome: RegistrationOutcome) {
        match outcome.status {
            RecordStatus::Success => self.successes.push(outcome),
            RecordStatus::Fail => self.failures.push(outcome),
        }
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    pub fn total(&self) -> usize {
        self.successes.len() + self.failures.len()
    }
}
