// Copyright (c) 2025 Mauka MCP Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Error types for the prefix trie.
//!
//! Trie operations are total and report absence through `Option`/`bool`.
//! Only the configuration surface can fail.

/// Errors that can occur while building or (de)serializing a trie configuration.
#[derive(Debug, thiserror::Error)]
pub enum TrieError {
    /// A configuration value is outside its legal range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A TOML document could not be deserialized into a configuration.
    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// A configuration could not be serialized to TOML.
    #[error("Failed to serialize configuration: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),
}

/// Result type for trie configuration operations.
pub type TrieResult<T> = Result<T, TrieError>;
