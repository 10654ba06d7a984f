//! Logging of discovery outcomes

use crate::domain::entities::{DiscoveryReport, RegistrationOutcome};

pub fn log_report(report: &DiscoveryReport) {
    if report.total() == 0 {
        tracing::warn!("No modules found");
        return;
    }

    tracing::info!(
        "Registered {} module(s), {} failed",
        report.successes.len(),
        report.failures.len()
    );

    for outcome in &report.successes {
        tracing::info!("  {}", describe(outcome));
    }
    for outcome in &report.failures {
        tracing::warn!("  {}", describe(outcome));
    }
}

/// One-line summary of an outcome
pub fn describe(outcome: &RegistrationOutcome) -> String {
    let mut line = outcome.identifier.clone();
    if let Some(kind) = outcome.kind {
        line.push_str(&format!(" [{}]", kind));
    }
    if let Some(deployment) = outcome.deployment {
        line.push_str(&format!(" ({})", deployment));
    }
    if let Some(message) = &outcome.message {
        line.push_str(&format!(": {}", message));
    }
    line
}
