use crew_application::{Capability, CapabilityProbe, CapabilityStatus};

/// Probes the local machine: environment variables and programs on `PATH`
pub struct SystemProbe {
    api_key_env: String,
    interpreter: String,
    test_runner: String,
}

impl SystemProbe {
    /// `test_runner` is the program of the configured test command
    pub fn new(
        api_key_env: impl Into<String>,
        interpreter: impl Into<String>,
        test_runner: impl Into<String>,
    ) -> Self {
        Self {
            api_key_env: api_key_env.into(),
            interpreter: interpreter.into(),
            test_runner: test_runner.into(),
        }
    }

    fn probe_program(capability: Capability, program: &str) -> CapabilityStatus {
        match which::which(program) {
            Ok(path) => CapabilityStatus::available(capability, path.display().to_string()),
            Err(_) => CapabilityStatus::missing(
                capability,
                format!("`{}` not found on PATH", program),
            ),
        }
    }
}

impl CapabilityProbe for SystemProbe {
    fn probe(&self, capability: Capability) -> CapabilityStatus {
        match capability {
            Capability::LanguageModel => match std::env::var(&self.api_key_env) {
                Ok(value) if !value.trim().is_empty() => CapabilityStatus::available(
                    capability,
                    format!("{} is set", self.api_key_env),
                ),
                _ => CapabilityStatus::missing(
                    capability,
                    format!("{} is not set", self.api_key_env),
                ),
            },
            Capability::CodeExecution => Self::probe_program(capability, &self.interpreter),
            Capability::TestRunner => Self::probe_program(capability, &self.test_runner),
        }
    }
}
