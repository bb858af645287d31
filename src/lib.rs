//! Mauka Trie Library
//!
//! A thread-safe, in-memory map keyed by strings and organized as a prefix
//! tree. Besides point operations (insert, lookup, delete) it enumerates every
//! key sharing a prefix.
//!
//! # Architecture
//!
//! - [`trie`]: the [`PrefixTrie`] container and its node arena
//! - [`config`]: construction-time settings, loadable from TOML
//! - [`error`]: errors raised by the configuration surface
//!
//! A single reader-writer lock guards each trie. Writers (`insert`, `remove`,
//! `delete`, `clear`) are exclusive; readers run in parallel.

pub mod config;
pub mod error;
pub mod trie;

// Internal modules that are not part of the public API
#[cfg(test)]
pub(crate) mod tests;

pub use config::TrieConfig;
pub use error::{TrieError, TrieResult};
pub use trie::PrefixTrie;

/// Version information for the library.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
