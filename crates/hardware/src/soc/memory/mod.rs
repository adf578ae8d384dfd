//! Backing Store.
//!
//! This module implements the flat word memory behind both caches. It provides:
//! 1. **Storage:** A power-of-two array of 32-bit words.
//! 2. **Address Wrapping:** Only the low `log2(size)` address bits select a word.
//! 3. **Image Loading:** Bulk initialization before cycle 0.
//!
//! During simulation the store is written only by the memory arbiter, on granted writes.

use crate::common::error::{SimError, SimResult};

/// Flat word-addressed memory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BackingStore {
    words: Vec<u32>,
    mask: u32,
}

impl BackingStore {
    /// Creates a zero-filled store.
    ///
    /// # Arguments
    ///
    /// * `size_words` - Capacity in words; rounded up to a power of two (minimum 1).
    pub fn new(size_words: usize) -> Self {
        let size = size_words.max(1).next_power_of_two();
        Self {
            words: vec![0; size],
            mask: u32::try_from(size - 1).unwrap_or(u32::MAX),
        }
    }

    #[inline]
    const fn slot(&self, addr: u32) -> usize {
        (addr & self.mask) as usize
    }

    /// Reads the word at `addr` (wrapped to the store size).
    pub fn read(&self, addr: u32) -> u32 {
        self.words.get(self.slot(addr)).copied().unwrap_or(0)
    }

    /// Writes the word at `addr` (wrapped to the store size).
    pub fn write(&mut self, addr: u32, val: u32) {
        let slot = self.slot(addr);
        if let Some(word) = self.words.get_mut(slot) {
            *word = val;
        }
    }

    /// Copies `image` into the store starting at word `base`.
    ///
    /// # Errors
    ///
    /// Returns `SimError::ImageTooLarge` if the image would run past the end of the
    /// store; nothing is written in that case.
    pub fn load(&mut self, base: u32, image: &[u32]) -> SimResult<()> {
        let start = base as usize;
        let end = start.saturating_add(image.len());
        match self.words.get_mut(start..end) {
            Some(dst) => {
                dst.copy_from_slice(image);
                Ok(())
            }
            None => Err(SimError::ImageTooLarge {
                words: end,
                capacity: self.words.len(),
            }),
        }
    }

    /// Returns the capacity in words.
    pub fn size_words(&self) -> usize {
        self.words.len()
    }

    /// Returns the whole store, for inspection.
    pub fn words(&self) -> &[u32] {
        &self.words
    }
}
