//! Resource limits for sandboxed execution

use serde::{Deserialize, Serialize};

/// Per-process rlimits applied to the sandboxed child
///
/// `None` leaves the inherited limit untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceLimits {
    /// Address space in bytes (`RLIMIT_AS`)
    pub max_memory_bytes: Option<u64>,

    /// CPU time in seconds (`RLIMIT_CPU`)
    pub max_cpu_seconds: Option<u64>,

    /// Largest file the child may write (`RLIMIT_FSIZE`)
    pub max_file_size_bytes: Option<u64>,

    /// Open descriptors (`RLIMIT_NOFILE`)
    pub max_open_files: Option<u64>,

    /// Stack size in bytes (`RLIMIT_STACK`)
    pub max_stack_bytes: Option<u64>,

    /// Bytes of stderr kept for diagnostics; the rest is drained
    pub max_output_bytes: Option<u64>,
}

impl Default for ResourceLimits {
    fn default() -> Self {
        Self {
            max_memory_bytes: Some(512 * 1024 * 1024), // 512 MB
            max_cpu_seconds: Some(30),
            max_file_size_bytes: Some(16 * 1024 * 1024), // 16 MB
            max_open_files: Some(64),
            max_stack_bytes: Some(8 * 1024 * 1024), // 8 MB
            max_output_bytes: Some(64 * 1024),
        }
    }
}

impl ResourceLimits {
    /// Tight limits for small, pure functions
    pub fn strict() -> Self {
        Self {
            max_memory_bytes: Some(256 * 1024 * 1024),
            max_cpu_seconds: Some(10),
            max_file_size_bytes: Some(1024 * 1024),
            max_open_files: Some(32),
            max_stack_bytes: Some(2 * 1024 * 1024),
            max_output_bytes: Some(16 * 1024),
        }
    }

    /// Inherit every limit from the parent
    pub fn unlimited() -> Self {
        Self {
            max_memory_bytes: None,
            max_cpu_seconds: None,
            max_file_size_bytes: None,
            max_open_files: None,
            max_stack_bytes: None,
            max_output_bytes: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_limits_keep_defaults() {
        let limits: ResourceLimits = serde_yaml::from_str("max_cpu_seconds: 5").unwrap();
        assert_eq!(limits.max_cpu_seconds, Some(5));
        assert_eq!(limits.max_open_files, ResourceLimits::default().max_open_files);
    }

    #[test]
    fn test_unlimited_is_all_none() {
        let limits = ResourceLimits::unlimited();
        assert!(limits.max_memory_bytes.is_none());
        assert!(limits.max_stack_bytes.is_none());
    }

    #[test]
    fn test_strict_is_tighter_than_default() {
        let strict = ResourceLimits::strict();
        let default = ResourceLimits::default();
        assert!(strict.max_memory_bytes < default.max_memory_bytes);
        assert!(strict.max_cpu_seconds < default.max_cpu_seconds);
    }
}
