//! Program Image Loader.
//!
//! This module reads program images from disk into word vectors ready for
//! `Simulator::load_program`. It performs:
//! 1. **Hex images:** One 32-bit word per line, optional `0x` prefix and `_` separators;
//!    `#` and `//` start comments and blank lines are skipped.
//! 2. **Binary images:** Raw little-endian words; a trailing partial word is zero-padded.
//! 3. **Format detection:** `.bin` files are binary, everything else is hex text.

use std::fs;
use std::path::Path;

use crate::common::constants::WORD_BYTES;
use crate::common::error::{SimError, SimResult};

/// On-disk encoding of a program image.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ImageFormat {
    /// Text, one hex word per line.
    #[default]
    Hex,
    /// Raw little-endian 32-bit words.
    Binary,
}

impl ImageFormat {
    /// Picks the format from a file extension: `.bin` is binary, anything else hex.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("bin") => Self::Binary,
            _ => Self::Hex,
        }
    }
}

/// Loads a file from disk into a byte vector.
///
/// # Arguments
///
/// * `path` - Path to the file.
///
/// # Errors
///
/// Returns `SimError::Io` if the file cannot be read.
pub fn load_binary(path: &Path) -> SimResult<Vec<u8>> {
    fs::read(path).map_err(|source| SimError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads a program image, detecting its format from the extension.
///
/// # Errors
///
/// Returns `SimError::Io` for unreadable files and `SimError::ParseWord` for
/// malformed hex lines.
pub fn load_image(path: &Path) -> SimResult<Vec<u32>> {
    load_image_as(path, ImageFormat::from_path(path))
}

/// Reads a program image in an explicit format.
///
/// # Errors
///
/// As [`load_image`].
pub fn load_image_as(path: &Path, format: ImageFormat) -> SimResult<Vec<u32>> {
    let bytes = load_binary(path)?;
    let words = match format {
        ImageFormat::Binary => parse_binary(&bytes),
        ImageFormat::Hex => parse_hex(&String::from_utf8_lossy(&bytes))?,
    };
    tracing::debug!(path = %path.display(), ?format, words = words.len(), "image read");
    Ok(words)
}

/// Parses a hex text image.
///
/// # Examples
///
/// ```
/// use pipesim_core::sim::loader::parse_hex;
///
/// let words = parse_hex("# program\n0x0800_0005\n\nFC000000 // halt\n").unwrap();
/// assert_eq!(words, vec![0x0800_0005, 0xFC00_0000]);
/// ```
///
/// # Errors
///
/// Returns `SimError::ParseWord` naming the first line that is not a 32-bit hex word.
pub fn parse_hex(text: &str) -> SimResult<Vec<u32>> {
    let mut words = Vec::new();
    for (i, line) in text.lines().enumerate() {
        let code = strip_comment(line).trim();
        if code.is_empty() {
            continue;
        }
        let digits: String = code
            .strip_prefix("0x")
            .or_else(|| code.strip_prefix("0X"))
            .unwrap_or(code)
            .chars()
            .filter(|c| *c != '_')
            .collect();
        let word = u32::from_str_radix(&digits, 16).map_err(|_| SimError::ParseWord {
            line: i + 1,
            text: code.to_string(),
        })?;
        words.push(word);
    }
    Ok(words)
}

fn strip_comment(line: &str) -> &str {
    let cut = [line.find('#'), line.find("//")]
        .into_iter()
        .flatten()
        .min()
        .unwrap_or(line.len());
    line.get(..cut).unwrap_or(line)
}

/// Parses a raw little-endian binary image.
pub fn parse_binary(bytes: &[u8]) -> Vec<u32> {
    bytes
        .chunks(WORD_BYTES)
        .map(|chunk| {
            let mut word = [0u8; WORD_BYTES];
            if let Some(dst) = word.get_mut(..chunk.len()) {
                dst.copy_from_slice(chunk);
            }
            u32::from_le_bytes(word)
        })
        .collect()
}
