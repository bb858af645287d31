// Copyright (c) 2025 Mauka MCP Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Thread-safe prefix trie.
//!
//! [`PrefixTrie`] maps string keys to values, one edge per `char`, and
//! answers prefix queries. The whole node graph and both counters sit behind a
//! single reader-writer lock: `insert`, `remove`, `delete` and `clear` take it
//! exclusively, every other operation shares it. Each call acquires the lock
//! exactly once and runs to completion.
//!
//! # Example
//!
//! ```
//! use mauka_trie::PrefixTrie;
//!
//! let trie = PrefixTrie::new();
//! trie.insert("foo", 11);
//! trie.insert("foobar", 111);
//! trie.insert("bar", 22);
//!
//! assert_eq!(trie.get("foo"), Some(11));
//! assert_eq!(trie.get("foob"), None);
//! assert_eq!(trie.with_prefix("f").len(), 2);
//!
//! assert!(trie.delete("foobar"));
//! assert!(!trie.delete("foobar"));
//! assert_eq!(trie.node_count(), 7);
//! ```

mod node;

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;

use parking_lot::RwLock;
use tracing::{debug, trace};

use crate::config::TrieConfig;
use crate::error::TrieResult;
use node::{NodeArena, NodeId};

/// State guarded by the trie lock.
struct TrieInner<V> {
    nodes: NodeArena<V>,
    /// Keys currently holding a value.
    size: usize,
    /// Live nodes, root included.
    node_count: usize,
}

impl<V> TrieInner<V> {
    fn new(capacity: usize) -> Self {
        Self {
            nodes: NodeArena::with_capacity(capacity),
            size: 0,
            node_count: 1,
        }
    }
}

/// A concurrent string-keyed map organized as a prefix tree.
///
/// Values are cloned out under the read lock, so no reference into the trie
/// outlives a call. Re-inserting an existing key replaces its value without
/// changing [`len`](Self::len).
pub struct PrefixTrie<V> {
    inner: RwLock<TrieInner<V>>,
    config: TrieConfig,
}

impl<V> PrefixTrie<V> {
    /// Creates an empty trie with the default configuration.
    pub fn new() -> Self {
        Self::with_config(TrieConfig::default())
    }

    /// Creates an empty trie, forcing out-of-range settings into range.
    pub fn with_config(config: TrieConfig) -> Self {
        let config = config.clamped();
        debug!(
            initial_capacity = config.initial_capacity,
            case_sensitive = config.case_sensitive,
            "Creating prefix trie"
        );
        Self {
            inner: RwLock::new(TrieInner::new(config.initial_capacity)),
            config,
        }
    }

    /// Creates an empty trie after validating the configuration.
    ///
    /// # Returns
    ///
    /// * `Ok(PrefixTrie)` - A new empty trie.
    /// * `Err(TrieError::InvalidConfig)` - If a setting is out of range.
    pub fn try_with_config(config: TrieConfig) -> TrieResult<Self> {
        config.validate()?;
        Ok(Self::with_config(config))
    }

    /// Returns the configuration this trie was built with.
    pub fn config(&self) -> &TrieConfig {
        &self.config
    }

    fn normalize<'a>(&self, key: &'a str) -> Cow<'a, str> {
        if self.config.case_sensitive {
            Cow::Borrowed(key)
        } else {
            Cow::Owned(key.to_lowercase())
        }
    }

    /// Inserts a value at `key`, replacing any value already stored there.
    ///
    /// Missing path nodes are created on the way down. The empty key is stored
    /// on the root.
    ///
    /// # Returns
    ///
    /// The value previously stored at `key`, if any.
    pub fn insert<K>(&self, key: K, value: V) -> Option<V>
    where
        K: AsRef<str>,
    {
        let key = self.normalize(key.as_ref());
        let mut guard = self.inner.write();
        let inner = &mut *guard;

        let mut current = NodeId::ROOT;
        for symbol in key.chars() {
            let (child, created) = inner.nodes.child_or_insert(current, symbol);
            if created {
                inner.node_count += 1;
            }
            current = child;
        }

        let previous = inner.nodes[current].value.replace(value);
        if previous.is_none() {
            inner.size += 1;
            trace!(key = %key, size = inner.size, node_count = inner.node_count, "Inserted key");
        } else {
            trace!(key = %key, "Replaced value");
        }
        previous
    }

    /// Removes the value stored at `key` and prunes the path nodes it leaves
    /// empty.
    ///
    /// # Returns
    ///
    /// The removed value, or `None` if `key` held no value.
    pub fn remove<K>(&self, key: K) -> Option<V>
    where
        K: AsRef<str>,
    {
        let key = self.normalize(key.as_ref());
        let mut guard = self.inner.write();
        let inner = &mut *guard;

        let target = inner.nodes.descend(NodeId::ROOT, key.chars())?;
        let removed = inner.nodes[target].value.take()?;
        inner.size -= 1;

        let mut nodes_pruned = 0;
        let mut current = target;
        while let Some(parent) = inner.nodes.detach(current) {
            nodes_pruned += 1;
            current = parent;
        }
        inner.node_count -= nodes_pruned;
        debug_assert_eq!(inner.node_count, inner.nodes.live());

        trace!(
            key = %key,
            nodes_pruned,
            size = inner.size,
            node_count = inner.node_count,
            "Removed key"
        );
        Some(removed)
    }

    /// Removes the value stored at `key`.
    ///
    /// # Returns
    ///
    /// `true` if a value was removed, `false` if `key` was never inserted or
    /// was already deleted. A `false` result leaves the trie unchanged.
    pub fn delete<K>(&self, key: K) -> bool
    where
        K: AsRef<str>,
    {
        self.remove(key).is_some()
    }

    /// Checks whether a value is stored at `key`.
    pub fn contains_key<K>(&self, key: K) -> bool
    where
        K: AsRef<str>,
    {
        let key = self.normalize(key.as_ref());
        let inner = self.inner.read();
        inner
            .nodes
            .descend(NodeId::ROOT, key.chars())
            .is_some_and(|id| inner.nodes[id].value.is_some())
    }

    /// Returns every stored key starting with `prefix`, in unspecified order.
    pub fn keys_with_prefix<P>(&self, prefix: P) -> Vec<String>
    where
        P: AsRef<str>,
    {
        let prefix = self.normalize(prefix.as_ref());
        let inner = self.inner.read();
        match inner.nodes.descend(NodeId::ROOT, prefix.chars()) {
            Some(start) => inner.nodes.collect_keys(start, &prefix),
            None => Vec::new(),
        }
    }

    /// Number of keys currently holding a value.
    pub fn len(&self) -> usize {
        self.inner.read().size
    }

    /// Whether no key holds a value.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of nodes in the tree, root included.
    ///
    /// Equals one plus the number of distinct non-empty prefixes of the
    /// stored keys. Useful for debugging.
    pub fn node_count(&self) -> usize {
        self.inner.read().node_count
    }

    /// Removes every key and node except the root.
    pub fn clear(&self) {
        let mut inner = self.inner.write();
        debug!(size = inner.size, node_count = inner.node_count, "Clearing prefix trie");
        inner.nodes.reset();
        inner.size = 0;
        inner.node_count = 1;
    }
}

impl<V: Clone> PrefixTrie<V> {
    /// Returns a clone of the value stored at `key`.
    ///
    /// The empty key addresses the root.
    pub fn get<K>(&self, key: K) -> Option<V>
    where
        K: AsRef<str>,
    {
        let key = self.normalize(key.as_ref());
        let inner = self.inner.read();
        let id = inner.nodes.descend(NodeId::ROOT, key.chars())?;
        inner.nodes[id].value.clone()
    }

    /// Returns every stored `(key, value)` pair whose key starts with `prefix`.
    ///
    /// Includes `prefix` itself when a value is stored there. An unknown
    /// prefix yields an empty map.
    pub fn with_prefix<P>(&self, prefix: P) -> HashMap<String, V>
    where
        P: AsRef<str>,
    {
        let prefix = self.normalize(prefix.as_ref());
        let inner = self.inner.read();
        match inner.nodes.descend(NodeId::ROOT, prefix.chars()) {
            Some(start) => inner.nodes.collect_subtree(start, &prefix).into_iter().collect(),
            None => HashMap::new(),
        }
    }
}

impl<V> Default for PrefixTrie<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> fmt::Debug for PrefixTrie<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.read();
        f.debug_struct("PrefixTrie")
            .field("len", &inner.size)
            .field("node_count", &inner.node_count)
            .field("config", &self.config)
            .finish()
    }
}

impl<K, V> Extend<(K, V)> for PrefixTrie<V>
where
    K: AsRef<str>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for PrefixTrie<V>
where
    K: AsRef<str>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut trie = Self::new();
        trie.extend(iter);
        trie
    }
}
