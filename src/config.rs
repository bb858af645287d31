// Copyright (c) 2025 Mauka MCP Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Configuration options for the prefix trie.

use serde::{Deserialize, Serialize};

use crate::error::{TrieError, TrieResult};

/// Upper bound on the number of node slots reserved at construction.
pub const MAX_INITIAL_CAPACITY: usize = 1 << 24;

/// Configuration for a [`PrefixTrie`](crate::PrefixTrie).
///
/// Can be built in code through the `with_*` methods or loaded from TOML.
/// Fields missing from a TOML document take their default values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrieConfig {
    /// Number of node slots reserved up front, root included.
    pub initial_capacity: usize,

    /// Whether keys are compared case-sensitively.
    ///
    /// When `false`, every key and prefix is lowercased before use and keys
    /// returned by prefix queries are in their lowercased form.
    pub case_sensitive: bool,
}

impl TrieConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of node slots reserved up front.
    ///
    /// # Arguments
    ///
    /// * `initial_capacity` - Slots to reserve, clamped to `1..=MAX_INITIAL_CAPACITY`.
    ///
    /// # Returns
    ///
    /// Self with the updated configuration.
    pub fn with_initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity.clamp(1, MAX_INITIAL_CAPACITY);
        self
    }

    /// Sets whether keys are compared case-sensitively.
    pub fn with_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    /// Checks that every value is within its legal range.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the configuration is usable as is.
    /// * `Err(TrieError::InvalidConfig)` - If a value is out of range.
    pub fn validate(&self) -> TrieResult<()> {
        if self.initial_capacity == 0 {
            return Err(TrieError::InvalidConfig(
                "initial_capacity must be at least 1 (the root node)".to_string(),
            ));
        }
        if self.initial_capacity > MAX_INITIAL_CAPACITY {
            return Err(TrieError::InvalidConfig(format!(
                "initial_capacity {} exceeds maximum of {}",
                self.initial_capacity, MAX_INITIAL_CAPACITY
            )));
        }
        Ok(())
    }

    /// Parses and validates a configuration from a TOML document.
    pub fn from_toml_str(document: &str) -> TrieResult<Self> {
        let config: TrieConfig = toml::from_str(document)?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes the configuration as a pretty-printed TOML document.
    pub fn to_toml_string(&self) -> TrieResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Returns a copy with every value forced into its legal range.
    pub(crate) fn clamped(mut self) -> Self {
        self.initial_capacity = self.initial_capacity.clamp(1, MAX_INITIAL_CAPACITY);
        self
    }
}

impl Default for TrieConfig {
    fn default() -> Self {
        Self {
            initial_capacity: 64,
            case_sensitive: true,
        }
    }
}
