//! Inline, fixed-capacity string storage
//!
//! Used for the prefix tag and for module filter entries so that neither
//! configuration nor the logging fast path touches the heap.

use core::fmt;

/// A UTF-8 string of at most `N - 1` bytes stored inline.
///
/// The last byte of capacity is reserved, so a `FixedStr<64>` holds 63 bytes.
#[derive(Clone, Copy)]
pub struct FixedStr<const N: usize> {
    bytes: [u8; N],
    len: usize,
}

impl<const N: usize> FixedStr<N> {
    /// Longest string that fits
    pub const MAX_LEN: usize = N - 1;

    /// An empty string
    pub const fn new() -> Self {
        Self {
            bytes: [0; N],
            len: 0,
        }
    }

    /// Copies `s`, silently cutting it to [`Self::MAX_LEN`] bytes.
    ///
    /// The cut backs off to the previous character boundary so the stored
    /// value stays valid UTF-8.
    pub const fn truncating(s: &str) -> Self {
        let src = s.as_bytes();
        let mut len = if src.len() > Self::MAX_LEN {
            Self::MAX_LEN
        } else {
            src.len()
        };
        // Continuation bytes look like 0b10xx_xxxx.
        while len < src.len() && len > 0 && (src[len] & 0xC0) == 0x80 {
            len -= 1;
        }

        let mut bytes = [0; N];
        let mut i = 0;
        while i < len {
            bytes[i] = src[i];
            i += 1;
        }
        Self { bytes, len }
    }

    /// Copies `s` only if it fits without truncation
    pub fn exact(s: &str) -> Option<Self> {
        (s.len() <= Self::MAX_LEN).then(|| Self::truncating(s))
    }

    /// Stored bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    /// Stored string
    pub fn as_str(&self) -> &str {
        // Only ever filled from `&str` cut on a char boundary.
        unsafe { core::str::from_utf8_unchecked(self.as_bytes()) }
    }

    /// Length in bytes
    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the string is empty
    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl<const N: usize> Default for FixedStr<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> PartialEq<str> for FixedStr<N> {
    fn eq(&self, other: &str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl<const N: usize> fmt::Debug for FixedStr<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}
