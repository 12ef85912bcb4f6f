//! Check Environment use case
//!
//! Probes the external capabilities and decides which demonstration path is
//! possible. The result never influences how a conversation runs.

use crate::ports::capability::{Capability, CapabilityProbe, CapabilityStatus};
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

/// Which demonstration can run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DemoPath {
    /// Live conversation against the language-model service
    Live,
    /// Replay of the canned conversation
    Offline,
}

/// Status of every probed capability
#[derive(Debug, Clone, Serialize)]
pub struct EnvironmentReport {
    pub statuses: Vec<CapabilityStatus>,
}

impl EnvironmentReport {
    pub fn status(&self, capability: Capability) -> Option<&CapabilityStatus> {
        self.statuses.iter().find(|s| s.capability == capability)
    }

    pub fn is_available(&self, capability: Capability) -> bool {
        self.status(capability).is_some_and(|s| s.available)
    }

    pub fn all_available(&self) -> bool {
        self.statuses.iter().all(|s| s.available)
    }

    pub fn missing(&self) -> impl Iterator<Item = &CapabilityStatus> {
        self.statuses.iter().filter(|s| !s.available)
    }

    pub fn demo_path(&self) -> DemoPath {
        if self.is_available(Capability::LanguageModel) {
            DemoPath::Live
        } else {
            DemoPath::Offline
        }
    }
}

/// Use case for probing the environment
pub struct CheckEnvironmentUseCase<P: CapabilityProbe> {
    probe: Arc<P>,
}

impl<P: CapabilityProbe> CheckEnvironmentUseCase<P> {
    pub fn new(probe: Arc<P>) -> Self {
        Self { probe }
    }

    pub fn execute(&self) -> EnvironmentReport {
        let statuses = Capability::ALL
            .iter()
            .map(|&capability| {
                let status = self.probe.probe(capability);
                debug!(
                    "{}: {} ({})",
                    capability.display_name(),
                    if status.available { "ok" } else { "missing" },
                    status.detail
                );
                status
            })
            .collect();
        EnvironmentReport { statuses }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    struct FixedProbe {
        available: HashSet<Capability>,
    }

    impl CapabilityProbe for FixedProbe {
        fn probe(&self, capability: Capability) -> CapabilityStatus {
            if self.available.contains(&capability) {
                CapabilityStatus::available(capability, "found")
            } else {
                CapabilityStatus::missing(capability, "not found")
            }
        }
    }

    fn report(available: &[Capability]) -> EnvironmentReport {
        let probe = FixedProbe {
            available: available.iter().copied().collect(),
        };
        CheckEnvironmentUseCase::new(Arc::new(probe)).execute()
    }

    #[test]
    fn test_everything_available() {
        let report = report(&Capability::ALL);
        assert_eq!(report.statuses.len(), 3);
        assert!(report.all_available());
        assert_eq!(report.demo_path(), DemoPath::Live);
    }

    #[test]
    fn test_missing_api_key_selects_offline() {
        let report = report(&[Capability::CodeExecution, Capability::TestRunner]);
        assert!(!report.all_available());
        assert_eq!(report.demo_path(), DemoPath::Offline);
        let missing: Vec<_> = report.missing().map(|s| s.capability).collect();
        assert_eq!(missing, vec![Capability::LanguageModel]);
    }

    #[test]
    fn test_missing_interpreter_keeps_live_path() {
        let report = report(&[Capability::LanguageModel]);
        assert_eq!(report.demo_path(), DemoPath::Live);
        assert!(!report.is_available(Capability::TestRunner));
    }
}
