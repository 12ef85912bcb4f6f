//! Capability probe port
//!
//! Answers "is this external capability available?" so the outer layers can
//! choose between the live and the offline demonstration. Probing never
//! changes how a conversation runs.

use serde::Serialize;

/// External capabilities the demonstrations depend on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Credentials for the language-model service are configured
    LanguageModel,
    /// An interpreter for code artifacts is installed
    CodeExecution,
    /// The test runner used by the test-suite action is installed
    TestRunner,
}

impl Capability {
    pub const ALL: [Capability; 3] = [
        Capability::LanguageModel,
        Capability::CodeExecution,
        Capability::TestRunner,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            Capability::LanguageModel => "Language model service",
            Capability::CodeExecution => "Code execution",
            Capability::TestRunner => "Test runner",
        }
    }
}

/// Result of probing one capability
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CapabilityStatus {
    pub capability: Capability,
    pub available: bool,
    /// What was checked, and a hint when unavailable
    pub detail: String,
}

impl CapabilityStatus {
    pub fn available(capability: Capability, detail: impl Into<String>) -> Self {
        Self {
            capability,
            available: true,
            detail: detail.into(),
        }
    }

    pub fn missing(capability: Capability, detail: impl Into<String>) -> Self {
        Self {
            capability,
            available: false,
            detail: detail.into(),
        }
    }
}

/// Port for probing the environment
pub trait CapabilityProbe: Send + Sync {
    fn probe(&self, capability: Capability) -> CapabilityStatus;

    fn is_available(&self, capability: Capability) -> bool {
        self.probe(capability).available
    }
}
