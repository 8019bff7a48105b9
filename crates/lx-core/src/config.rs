use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use crate::error::{Error, Result};

pub const DEFAULT_SIZE_PRIME: u32 = 100_003;
pub const DEFAULT_MAX_KEYWORDS: u32 = 10_000;

fn env_true(key: &str) -> Option<bool> {
    std::env::var(key).ok().map(|val| {
        let trimmed = val.trim();
        !trimmed.is_empty() && !matches!(trimmed, "0" | "false" | "FALSE" | "False")
    })
}

fn bool_from_env(key: &str) -> bool {
    env_true(key).unwrap_or(false)
}

fn u32_from_env(key: &str) -> Result<Option<u32>> {
    match std::env::var(key) {
        Ok(val) => val
            .trim()
            .parse::<u32>()
            .map(Some)
            .map_err(|e| Error::Config(format!("{key}={val:?}: {e}"))),
        Err(_) => Ok(None),
    }
}

/// Emit scope open/close events at debug level instead of trace.
pub fn trace_scopes() -> bool {
    static TRACE: OnceLock<bool> = OnceLock::new();
    *TRACE.get_or_init(|| bool_from_env("LEXIS_TRACE_SCOPES"))
}

/// Sizing of the interning table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SymTableConfig {
    /// Number of hash slots; must be a prime so double hashing visits every slot
    pub size_prime: u32,
    /// Keyword ids at or above this bound are interned but not indexed
    pub max_keywords: u32,
}

impl Default for SymTableConfig {
    fn default() -> Self {
        Self {
            size_prime: DEFAULT_SIZE_PRIME,
            max_keywords: DEFAULT_MAX_KEYWORDS,
        }
    }
}

impl SymTableConfig {
    pub fn with_size_prime(mut self, size_prime: u32) -> Self {
        self.size_prime = size_prime;
        self
    }

    pub fn with_max_keywords(mut self, max_keywords: u32) -> Self {
        self.max_keywords = max_keywords;
        self
    }

    /// Defaults overridden by `LEXIS_SYMTAB_SIZE` and `LEXIS_MAX_KEYWORDS`.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        if let Some(size) = u32_from_env("LEXIS_SYMTAB_SIZE")? {
            config.size_prime = size;
        }
        if let Some(max) = u32_from_env("LEXIS_MAX_KEYWORDS")? {
            config.max_keywords = max;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.size_prime < 3 || self.size_prime > i32::MAX as u32 || !is_prime(self.size_prime) {
            return Err(Error::Config(format!(
                "symbol table size must be a prime in 3..=i32::MAX, got {}",
                self.size_prime
            )));
        }
        Ok(())
    }
}

fn is_prime(n: u32) -> bool {
    if n < 2 {
        return false;
    }
    let mut d = 2u64;
    while d * d <= n as u64 {
        if n as u64 % d == 0 {
            return false;
        }
        d += 1;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_config_is_valid() {
        let config = SymTableConfig::default();
        assert_eq!(config.size_prime, 100_003);
        assert_eq!(config.max_keywords, 10_000);
        config.validate().expect("default size is prime");
    }

    #[test]
    fn composite_size_rejected() {
        let config = SymTableConfig::default().with_size_prime(100);
        assert!(matches!(config.validate(), Err(Error::Config(_))));
        let config = SymTableConfig::default().with_size_prime(2);
        assert!(config.validate().is_err());
    }

    #[test]
    fn small_primes_accepted() {
        for p in [3, 7, 13, 101] {
            SymTableConfig::default()
                .with_size_prime(p)
                .validate()
                .expect("prime size");
        }
    }
}
