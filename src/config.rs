//! Configuration management for shape sorting runs

use crate::algorithms::SortAlgorithm;
use crate::batch::CHUNK_SIZE;
use crate::error::{ShapeResult, ShapeSortError};
use crate::ordering::{SortKey, SortOrder};
use std::path::PathBuf;
use std::str::FromStr;

/// Input used when no `-f` flag is given
pub const DEFAULT_INPUT: &str = "data/shapes1.txt";

/// Files larger than this many bytes are processed in batch mode under `RunMode::Auto`
pub const DEFAULT_BATCH_THRESHOLD: u64 = 1024 * 1024;

/// How the input is processed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    /// Choose by input file size
    #[default]
    Auto,
    /// Sort everything at once and print every shape
    Full,
    /// Sort fixed-size chunks for checkpoints, then everything once
    Batch,
}

/// Main configuration structure for a sorting run
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Shape file to read
    pub input: PathBuf,
    /// Metric that drives comparison
    pub key: SortKey,
    /// Sorting algorithm to dispatch to
    pub algorithm: SortAlgorithm,
    /// Output direction
    pub order: SortOrder,
    /// Full, batch, or chosen by size
    pub mode: RunMode,
    /// Records per batch chunk
    pub chunk_size: usize,
    /// Size in bytes above which `Auto` picks batch mode
    pub batch_threshold: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            key: SortKey::default(),
            algorithm: SortAlgorithm::default(),
            order: SortOrder::default(),
            mode: RunMode::default(),
            chunk_size: CHUNK_SIZE,
            batch_threshold: DEFAULT_BATCH_THRESHOLD,
        }
    }
}

impl RunConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_input(mut self, input: impl Into<PathBuf>) -> Self {
        self.input = input.into();
        self
    }

    pub fn with_key(mut self, key: SortKey) -> Self {
        self.key = key;
        self
    }

    pub fn with_mode(mut self, mode: RunMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    pub fn with_batch_threshold(mut self, bytes: u64) -> Self {
        self.batch_threshold = bytes;
        self
    }

    /// Validate configuration for consistency
    pub fn validate(&self) -> ShapeResult<()> {
        if self.input.as_os_str().is_empty() {
            return Err(ShapeSortError::invalid_config("input path is empty"));
        }
        if self.chunk_size == 0 {
            return Err(ShapeSortError::invalid_config("chunk size must be positive"));
        }
        Ok(())
    }

    /// Resolve `Auto` against the size of the input file
    pub fn effective_mode(&self, input_len: u64) -> RunMode {
        match self.mode {
            RunMode::Auto if input_len > self.batch_threshold => RunMode::Batch,
            RunMode::Auto => RunMode::Full,
            mode => mode,
        }
    }
}

impl FromStr for RunMode {
    type Err = ShapeSortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(RunMode::Auto),
            "full" => Ok(RunMode::Full),
            "batch" => Ok(RunMode::Batch),
            _ => Err(ShapeSortError::invalid_config(&format!("unknown run mode: {s}"))),
        }
    }
}

impl std::fmt::Display for RunMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RunMode::Auto => "auto",
            RunMode::Full => "full",
            RunMode::Batch => "batch",
        };
        write!(f, "{name}")
    }
}

/// Builder pattern for creating configurations
pub struct RunConfigBuilder {
    config: RunConfig,
}

impl RunConfigBuilder {
    /// Start building a new configuration
    pub fn new() -> Self {
        Self {
            config: RunConfig::default(),
        }
    }

    pub fn input(mut self, input: impl Into<PathBuf>) -> Self {
        self.config.input = input.into();
        self
    }

    pub fn key(mut self, key: SortKey) -> Self {
        self.config.key = key;
        self
    }

    pub fn algorithm(mut self, algorithm: SortAlgorithm) -> Self {
        self.config.algorithm = algorithm;
        self
    }

    pub fn order(mut self, order: SortOrder) -> Self {
        self.config.order = order;
        self
    }

    /// Always process in batch mode
    pub fn batch(mut self) -> Self {
        self.config.mode = RunMode::Batch;
        self
    }

    /// Always sort the whole file at once
    pub fn full(mut self) -> Self {
        self.config.mode = RunMode::Full;
        self
    }

    pub fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.config.chunk_size = chunk_size;
        self
    }

    pub fn batch_threshold(mut self, bytes: u64) -> Self {
        self.config.batch_threshold = bytes;
        self
    }

    /// Build the final configuration
    pub fn build(self) -> ShapeResult<RunConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for RunConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RunConfig::default();
        assert_eq!(config.input, PathBuf::from(DEFAULT_INPUT));
        assert_eq!(config.key, SortKey::Volume);
        assert_eq!(config.algorithm, SortAlgorithm::Heap);
        assert_eq!(config.order, SortOrder::Descending);
        assert_eq!(config.mode, RunMode::Auto);
        assert_eq!(config.chunk_size, 1000);
    }

    #[test]
    fn test_config_builder() {
        let config = RunConfigBuilder::new()
            .input("res/shapes2.txt")
            .key(SortKey::Height)
            .algorithm(SortAlgorithm::Merge)
            .order(SortOrder::Ascending)
            .batch()
            .chunk_size(50)
            .build()
            .expect("Failed to build test config");

        assert_eq!(config.input, PathBuf::from("res/shapes2.txt"));
        assert_eq!(config.key, SortKey::Height);
        assert_eq!(config.algorithm, SortAlgorithm::Merge);
        assert_eq!(config.order, SortOrder::Ascending);
        assert_eq!(config.mode, RunMode::Batch);
        assert_eq!(config.chunk_size, 50);

        let config = RunConfigBuilder::new()
            .full()
            .batch_threshold(0)
            .build()
            .expect("Failed to build test config");
        assert_eq!(config.effective_mode(1 << 30), RunMode::Full);
    }

    #[test]
    fn test_validate_rejects_zero_chunk() {
        let config = RunConfig {
            chunk_size: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
        assert!(RunConfigBuilder::new().input("").build().is_err());
    }

    #[test]
    fn test_effective_mode() {
        let config = RunConfig::new().with_batch_threshold(100);
        assert_eq!(config.effective_mode(100), RunMode::Full);
        assert_eq!(config.effective_mode(101), RunMode::Batch);

        let config = config.with_mode(RunMode::Full);
        assert_eq!(config.effective_mode(u64::MAX), RunMode::Full);

        let config = config.with_mode(RunMode::Batch);
        assert_eq!(config.effective_mode(0), RunMode::Batch);
    }

    #[test]
    fn test_run_mode_from_str() {
        assert_eq!("Batch".parse::<RunMode>().unwrap(), RunMode::Batch);
        assert!("stream".parse::<RunMode>().is_err());
    }
}
