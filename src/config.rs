//! Tree configuration.

use once_cell::sync::Lazy;

/// Environment variable consulted once for the process-wide default key size limit.
pub const MAX_KEY_SIZE_ENV: &str = "RADIX_MAX_KEY_SIZE";

/// Key size limit used when nothing else is configured.
pub const DEFAULT_MAX_KEY_SIZE: usize = 512;

static DEFAULT_CONFIG: Lazy<RadixConfig> = Lazy::new(|| {
    let max_key_size = std::env::var(MAX_KEY_SIZE_ENV)
        .ok()
        .and_then(|raw| parse_max_key_size(&raw))
        .unwrap_or(DEFAULT_MAX_KEY_SIZE);
    RadixConfig { max_key_size }
});

fn parse_max_key_size(raw: &str) -> Option<usize> {
    raw.trim().parse::<usize>().ok().filter(|&n| n > 0)
}

/// Settings for a [`Radix`](crate::Radix) tree.
///
/// `max_key_size` only bounds keys pulled from a reader (see
/// [`Radix::insert_reader`](crate::Radix::insert_reader)); keys handed over as byte slices
/// are taken as they are.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RadixConfig {
    /// Longest key, in bytes, accepted from a reader
    pub max_key_size: usize,
}

impl RadixConfig {
    /// Returns a copy with a different key size limit.
    ///
    /// # Examples
    ///
    /// ```
    /// use radix_tree::RadixConfig;
    ///
    /// let config = RadixConfig::default().with_max_key_size(64);
    /// assert_eq!(config.max_key_size, 64);
    /// ```
    pub fn with_max_key_size(mut self, max_key_size: usize) -> Self {
        self.max_key_size = max_key_size;
        self
    }
}

impl Default for RadixConfig {
    /// The process-wide default: `RADIX_MAX_KEY_SIZE` if set to a positive integer when first
    /// read, 512 otherwise.
    fn default() -> Self {
        *DEFAULT_CONFIG
    }
}
