//! Configurable limits for bounded decoding.

/// Wire-level limits for protocol decoding.
///
/// These limits are enforced while reading strings, container headers and
/// nested values (including values that are skipped), so that a hostile or
/// corrupt buffer cannot force unbounded allocation or recursion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limits {
    /// Maximum length of a single string or binary value in bytes.
    pub max_string_bytes: usize,

    /// Maximum declared element count of a list, set or map.
    pub max_container_len: usize,

    /// Maximum nesting of structs and containers.
    pub max_nesting_depth: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_string_bytes: 1024 * 1024,
            max_container_len: 64 * 1024,
            max_nesting_depth: 64,
        }
    }
}

impl Limits {
    /// Creates limits suitable for testing with smaller values.
    #[must_use]
    pub const fn for_testing() -> Self {
        Self {
            max_string_bytes: 1024,
            max_container_len: 64,
            max_nesting_depth: 8,
        }
    }

    /// Creates limits with no restrictions (use with caution).
    #[must_use]
    pub const fn unlimited() -> Self {
        Self {
            max_string_bytes: usize::MAX,
            max_container_len: usize::MAX,
            max_nesting_depth: usize::MAX,
        }
    }
}
