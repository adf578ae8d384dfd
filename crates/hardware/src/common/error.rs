//! Host-side error definitions.
//!
//! The modelled hardware never fails: malformed instructions decode to a halt and
//! addresses wrap to the size of the backing store. What can fail is everything the
//! host does around it, which this module covers:
//! 1. **Configuration:** Rejected sizes and malformed JSON.
//! 2. **Program Loading:** Unreadable files, unparsable words, and oversized images.
//! 3. **Execution Budget:** Programs that do not halt within the configured cycle limit.

use std::io;
use std::path::PathBuf;

/// Errors raised while configuring, loading, or running the simulator.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    /// A configuration value is out of range.
    #[error("invalid configuration: {field} = {value} ({reason})")]
    InvalidConfig {
        /// Dotted path of the offending field.
        field: &'static str,
        /// The rejected value.
        value: usize,
        /// Human-readable constraint that was violated.
        reason: &'static str,
    },

    /// The configuration file is not valid JSON for [`crate::config::Config`].
    #[error("malformed configuration: {0}")]
    Json(#[from] serde_json::Error),

    /// A file could not be read.
    #[error("could not read '{}': {source}", path.display())]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A line of a hex image is not a 32-bit word.
    #[error("line {line}: '{text}' is not a 32-bit hex word")]
    ParseWord {
        /// One-based line number.
        line: usize,
        /// Offending text, trimmed.
        text: String,
    },

    /// The program image does not fit in the backing store.
    #[error("image of {words} words does not fit in {capacity} words of memory")]
    ImageTooLarge {
        /// Words in the image plus its load offset.
        words: usize,
        /// Capacity of the backing store in words.
        capacity: usize,
    },

    /// The program did not reach a halt within the cycle budget.
    #[error("no halt after {limit} cycles")]
    CycleLimit {
        /// The exhausted budget.
        limit: u64,
    },
}

/// Convenience alias for fallible host-side operations.
pub type SimResult<T> = Result<T, SimError>;
