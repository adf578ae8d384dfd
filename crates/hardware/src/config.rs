//! Configuration system for the pipeline simulator.
//!
//! This module defines all configuration structures used to parameterize the
//! simulator. It provides:
//! 1. **Defaults:** Baseline sizes for the backing store and both caches.
//! 2. **Structures:** Hierarchical config for general, memory, and cache settings.
//! 3. **Validation:** Power-of-two and capacity checks reported as `SimError`.
//!
//! Configuration is supplied as JSON (every field optional) or built with `Config::default()`.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::common::error::{SimError, SimResult};

/// Default configuration constants for the simulator.
///
/// These values define the baseline machine when not explicitly overridden in a
/// JSON configuration file.
mod defaults {
    /// Size of the backing store in words (4 KiB of 32-bit words).
    pub const MEMORY_WORDS: usize = 1024;

    /// Default number of one-word lines in each cache.
    pub const CACHE_WORDS: usize = 16;

    /// Reset value of the program counter.
    pub const START_PC: u32 = crate::common::constants::RESET_PC;

    /// Cycle budget for `Simulator::run` before giving up on a halt.
    pub const MAX_CYCLES: u64 = 100_000;
}

/// Root configuration for the simulator.
///
/// # Examples
///
/// ```
/// use pipesim_core::config::Config;
///
/// let json = r#"{
///     "general": { "max_cycles": 500 },
///     "cache": { "dcache": { "size_words": 8 } }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.general.max_cycles, 500);
/// assert_eq!(config.cache.dcache.size_words, 8);
/// assert_eq!(config.cache.icache.size_words, 16);
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// General simulation settings
    #[serde(default)]
    pub general: GeneralConfig,
    /// Backing store configuration
    #[serde(default)]
    pub memory: MemoryConfig,
    /// Instruction and data cache configuration
    #[serde(default)]
    pub cache: CacheHierarchyConfig,
}

impl Config {
    /// Parses and validates a configuration from a JSON string.
    ///
    /// # Arguments
    ///
    /// * `json` - JSON text; missing fields take their defaults.
    ///
    /// # Returns
    ///
    /// The validated configuration.
    ///
    /// # Errors
    ///
    /// Returns `SimError::Json` for malformed input and `SimError::InvalidConfig`
    /// if validation fails.
    pub fn from_json(json: &str) -> SimResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses, and validates a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns `SimError::Io` if the file cannot be read, otherwise as [`Config::from_json`].
    pub fn from_file(path: impl AsRef<Path>) -> SimResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| SimError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Checks every size against the constraints of the hardware model.
    ///
    /// Sizes must be non-zero powers of two so that index and tag fields are plain
    /// bit slices, and neither cache may have more lines than the backing store has
    /// words.
    ///
    /// # Errors
    ///
    /// Returns `SimError::InvalidConfig` naming the first offending field.
    pub fn validate(&self) -> SimResult<()> {
        check_pow2("memory.size_words", self.memory.size_words)?;
        check_pow2("cache.icache.size_words", self.cache.icache.size_words)?;
        check_pow2("cache.dcache.size_words", self.cache.dcache.size_words)?;

        if self.cache.icache.size_words > self.memory.size_words {
            return Err(SimError::InvalidConfig {
                field: "cache.icache.size_words",
                value: self.cache.icache.size_words,
                reason: "larger than memory.size_words",
            });
        }
        if self.cache.dcache.size_words > self.memory.size_words {
            return Err(SimError::InvalidConfig {
                field: "cache.dcache.size_words",
                value: self.cache.dcache.size_words,
                reason: "larger than memory.size_words",
            });
        }
        Ok(())
    }
}

fn check_pow2(field: &'static str, value: usize) -> SimResult<()> {
    if value == 0 || !value.is_power_of_two() {
        return Err(SimError::InvalidConfig {
            field,
            value,
            reason: "must be a non-zero power of two",
        });
    }
    Ok(())
}

/// General simulation settings and options.
///
/// Contains high-level simulation configuration such as tracing, the reset
/// program counter, and the cycle budget.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct GeneralConfig {
    /// Emit one `trace` event per stage per cycle
    #[serde(default)]
    pub trace_pipeline: bool,

    /// Initial PC value (word address)
    #[serde(default = "GeneralConfig::default_start_pc")]
    pub start_pc: u32,

    /// Cycles `Simulator::run` allows before reporting `SimError::CycleLimit`
    #[serde(default = "GeneralConfig::default_max_cycles")]
    pub max_cycles: u64,
}

impl GeneralConfig {
    /// Returns the default starting program counter.
    const fn default_start_pc() -> u32 {
        defaults::START_PC
    }

    /// Returns the default cycle budget.
    const fn default_max_cycles() -> u64 {
        defaults::MAX_CYCLES
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            trace_pipeline: false,
            start_pc: defaults::START_PC,
            max_cycles: defaults::MAX_CYCLES,
        }
    }
}

/// Backing store configuration.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct MemoryConfig {
    /// Capacity in 32-bit words; addresses wrap modulo this size
    #[serde(default = "MemoryConfig::default_size_words")]
    pub size_words: usize,
}

impl MemoryConfig {
    /// Returns the default backing store size.
    const fn default_size_words() -> usize {
        defaults::MEMORY_WORDS
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            size_words: defaults::MEMORY_WORDS,
        }
    }
}

/// Configuration of a single direct-mapped cache.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct CacheConfig {
    /// Number of one-word lines
    #[serde(default = "CacheConfig::default_size_words")]
    pub size_words: usize,
}

impl CacheConfig {
    /// Returns the default number of lines.
    const fn default_size_words() -> usize {
        defaults::CACHE_WORDS
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            size_words: defaults::CACHE_WORDS,
        }
    }
}

/// The split instruction/data cache pair.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct CacheHierarchyConfig {
    /// Instruction cache
    #[serde(default)]
    pub icache: CacheConfig,
    /// Data cache
    #[serde(default)]
    pub dcache: CacheConfig,
}
