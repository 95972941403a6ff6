//! Analyzer configuration.
//!
//! Defaults: reserved words are never type names, includes are followed, and the per-file phase uses
//! all available cores.

use svtopo_syntax::scanner::InstantiationPolicy;

/// Maximum source file size (100 MiB).
///
/// Larger files are rejected by the filesystem loader to prevent out-of-memory conditions.
pub const MAX_SOURCE_SIZE: u64 = 100 * 1024 * 1024;

/// Default limit for nested `` `include `` chains.
pub const DEFAULT_MAX_INCLUDE_DEPTH: usize = 16;

/// Configuration for one analysis run.
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// Which token shapes count as instantiations
    pub policy: InstantiationPolicy,
    /// Worker threads for lexing and scanning; `0` means available parallelism
    pub jobs: usize,
    /// Whether `` `include `` directives are resolved and scanned in place
    pub follow_includes: bool,
    /// Maximum nesting of includes before giving up on a chain
    pub max_include_depth: usize,
    /// Files larger than this are reported as unreadable
    pub max_source_size: u64,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            policy: InstantiationPolicy::default(),
            jobs: 0,
            follow_includes: true,
            max_include_depth: DEFAULT_MAX_INCLUDE_DEPTH,
            max_source_size: MAX_SOURCE_SIZE,
        }
    }
}

impl AnalyzerConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the instantiation policy
    pub fn with_policy(mut self, policy: InstantiationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set the number of worker threads (`0` = available parallelism)
    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs;
        self
    }

    pub fn with_follow_includes(mut self, follow: bool) -> Self {
        self.follow_includes = follow;
        self
    }

    pub fn with_max_include_depth(mut self, depth: usize) -> Self {
        self.max_include_depth = depth;
        self
    }

    pub fn with_max_source_size(mut self, bytes: u64) -> Self {
        self.max_source_size = bytes;
        self
    }

    /// Number of worker threads to use for `files` inputs.
    pub fn effective_jobs(&self, files: usize) -> usize {
        let jobs = if self.jobs == 0 {
            std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1)
        } else {
            self.jobs
        };
        jobs.clamp(1, files.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AnalyzerConfig::default();
        assert_eq!(config.jobs, 0);
        assert!(config.follow_includes);
        assert_eq!(config.max_include_depth, 16);
        assert_eq!(config.max_source_size, 100 * 1024 * 1024);
        assert_eq!(config.policy, InstantiationPolicy::default());
    }

    #[test]
    fn test_builder_chain() {
        let config = AnalyzerConfig::new()
            .with_jobs(3)
            .with_follow_includes(false)
            .with_max_include_depth(2)
            .with_max_source_size(10);
        assert_eq!(config.jobs, 3);
        assert!(!config.follow_includes);
        assert_eq!(config.max_include_depth, 2);
        assert_eq!(config.max_source_size, 10);
    }

    #[test]
    fn test_effective_jobs_is_bounded_by_file_count() {
        let config = AnalyzerConfig::new().with_jobs(8);
        assert_eq!(config.effective_jobs(3), 3);
        assert_eq!(config.effective_jobs(0), 1);
        assert!(AnalyzerConfig::default().effective_jobs(100) >= 1);
    }
}
