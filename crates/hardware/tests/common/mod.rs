//! Shared test infrastructure.

/// Fluent builders for pipeline latch entries.
pub mod builder;


pub use harness::TestContext;
