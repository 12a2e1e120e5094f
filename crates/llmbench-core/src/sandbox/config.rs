//! Sandbox configuration

use serde::{Deserialize, Serialize};

use super::limits::ResourceLimits;

/// How and under which limits sandboxed code runs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SandboxConfig {
    /// Interpreter that runs the code
    #[serde(default)]
    pub runtime: Runtime,

    /// Limits applied to the child process
    #[serde(default)]
    pub limits: ResourceLimits,
}

impl SandboxConfig {
    /// Config for the given runtime with default limits
    pub fn new(runtime: Runtime) -> Self {
        Self {
            runtime,
            limits: ResourceLimits::default(),
        }
    }

    /// Replace the resource limits
    pub fn with_limits(mut self, limits: ResourceLimits) -> Self {
        self.limits = limits;
        self
    }
}

/// Interpreter used for sandboxed code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Runtime {
    /// CPython in isolated mode
    Python {
        #[serde(default = "default_interpreter")]
        interpreter: String,
    },
    /// POSIX `sh` with `set -e`
    Shell,
}

fn default_interpreter() -> String {
    "python3".to_string()
}

impl Default for Runtime {
    fn default() -> Self {
        Runtime::Python {
            interpreter: default_interpreter(),
        }
    }
}

impl Runtime {
    /// Python runtime using a specific interpreter
    pub fn python(interpreter: impl Into<String>) -> Self {
        Runtime::Python {
            interpreter: interpreter.into(),
        }
    }

    /// Name of the code file written into the working directory
    pub(crate) fn file_name(&self) -> &'static str {
        match self {
            Runtime::Python { .. } => "program.py",
            Runtime::Shell => "program.sh",
        }
    }
}
