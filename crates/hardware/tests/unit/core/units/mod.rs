
/// Direct-mapped write-through cache.
pub mod cache;
