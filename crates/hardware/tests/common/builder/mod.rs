//! Builders for pipeline state used by stage and hazard tests.
