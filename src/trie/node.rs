// Copyright (c) 2025 Mauka MCP Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Node storage for the prefix trie.
//!
//! Nodes live in a slot arena and refer to each other by [`NodeId`]. The
//! `children` map holds the owning edges; `parent` is a plain back reference
//! used only to walk upward while pruning. Dropping the arena reclaims every
//! node at once, so nothing ever has to be freed through a back reference.

use std::ops::{Index, IndexMut};

use hashbrown::HashMap;

/// Handle to a node slot inside a [`NodeArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(usize);

impl NodeId {
    /// The root always occupies the first slot and is never released.
    pub(crate) const ROOT: NodeId = NodeId(0);
}

/// A single point in the trie.
///
/// Each non-root node is reached from its parent through the edge labeled
/// `symbol`. A node with `value == None` is a pure path node.
#[derive(Debug)]
pub(crate) struct Node<V> {
    /// Label of the edge from the parent to this node. Unused on the root.
    pub(crate) symbol: char,

    /// Structural parent, `None` for the root.
    pub(crate) parent: Option<NodeId>,

    /// Child nodes keyed by edge label.
    pub(crate) children: HashMap<char, NodeId>,

    /// Payload of the key that terminates here, if any.
    pub(crate) value: Option<V>,
}

impl<V> Node<V> {
    fn root() -> Self {
        Self {
            symbol: '\0',
            parent: None,
            children: HashMap::new(),
            value: None,
        }
    }

    fn child(symbol: char, parent: NodeId) -> Self {
        Self {
            symbol,
            parent: Some(parent),
            children: HashMap::new(),
            value: None,
        }
    }

    /// A non-root node with neither a value nor children.
    pub(crate) fn is_prunable(&self) -> bool {
        self.parent.is_some() && self.value.is_none() && self.children.is_empty()
    }
}

#[derive(Debug)]
enum Slot<V> {
    Occupied(Node<V>),
    Vacant,
}

/// Slot arena holding every node of one trie.
#[derive(Debug)]
pub(crate) struct NodeArena<V> {
    slots: Vec<Slot<V>>,
    /// Indices of vacant slots available for reuse.
    free: Vec<usize>,
}

impl<V> NodeArena<V> {
    /// Creates an arena containing only the root.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity.max(1));
        slots.push(Slot::Occupied(Node::root()));
        Self {
            slots,
            free: Vec::new(),
        }
    }

    /// Number of live nodes, root included.
    pub(crate) fn live(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    /// Drops every node except a fresh root, keeping the allocation.
    pub(crate) fn reset(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.slots.push(Slot::Occupied(Node::root()));
    }

    /// Returns the child of `parent` labeled `symbol`, creating and linking it
    /// when absent. The flag is `true` when a node was created.
    pub(crate) fn child_or_insert(&mut self, parent: NodeId, symbol: char) -> (NodeId, bool) {
        if let Some(&existing) = self[parent].children.get(&symbol) {
            return (existing, false);
        }

        let node = Node::child(symbol, parent);
        let id = match self.free.pop() {
            Some(index) => {
                self.slots[index] = Slot::Occupied(node);
                NodeId(index)
            }
            None => {
                self.slots.push(Slot::Occupied(node));
                NodeId(self.slots.len() - 1)
            }
        };
        self[parent].children.insert(symbol, id);
        (id, true)
    }

    /// Unlinks a prunable node from its parent and frees its slot.
    ///
    /// Returns the parent, or `None` (leaving the arena untouched) when the
    /// node still carries a value, has children, or is the root.
    pub(crate) fn detach(&mut self, id: NodeId) -> Option<NodeId> {
        let node = &self[id];
        if !node.is_prunable() {
            return None;
        }
        let (symbol, parent) = (node.symbol, node.parent?);

        self[parent].children.remove(&symbol);
        self.slots[id.0] = Slot::Vacant;
        self.free.push(id.0);
        Some(parent)
    }

    /// Follows `path` one symbol at a time starting at `from`.
    ///
    /// Returns `None` as soon as an edge is missing. The node reached may or
    /// may not hold a value.
    pub(crate) fn descend<I>(&self, from: NodeId, path: I) -> Option<NodeId>
    where
        I: IntoIterator<Item = char>,
    {
        path.into_iter()
            .try_fold(from, |current, symbol| self[current].children.get(&symbol).copied())
    }

    /// Collects every `(key, value)` pair stored at `start` or below it.
    ///
    /// Keys are `start_key` followed by the edge labels from `start` down to
    /// the node holding the value. Order is unspecified.
    pub(crate) fn collect_subtree(&self, start: NodeId, start_key: &str) -> Vec<(String, V)>
    where
        V: Clone,
    {
        self.walk_subtree(start, start_key, |node| node.value.clone())
    }

    /// Collects the keys stored at `start` or below it.
    pub(crate) fn collect_keys(&self, start: NodeId, start_key: &str) -> Vec<String> {
        self.walk_subtree(start, start_key, |node| node.value.as_ref().map(|_| ()))
            .into_iter()
            .map(|(key, ())| key)
            .collect()
    }

    // Explicit stack instead of recursion: depth equals the longest key.
    fn walk_subtree<T, F>(&self, start: NodeId, start_key: &str, mut extract: F) -> Vec<(String, T)>
    where
        F: FnMut(&Node<V>) -> Option<T>,
    {
        let mut results = Vec::new();
        let mut stack = vec![(start, start_key.to_string())];

        while let Some((id, key)) = stack.pop() {
            let node = &self[id];
            for (&symbol, &child) in &node.children {
                let mut child_key = String::with_capacity(key.len() + symbol.len_utf8());
                child_key.push_str(&key);
                child_key.push(symbol);
                stack.push((child, child_key));
            }
            if let Some(item) = extract(node) {
                results.push((key, item));
            }
        }

        results
    }
}

impl<V> Index<NodeId> for NodeArena<V> {
    type Output = Node<V>;

    fn index(&self, id: NodeId) -> &Node<V> {
        match &self.slots[id.0] {
            Slot::Occupied(node) => node,
            Slot::Vacant => panic!("stale node id {id:?}"),
        }
    }
}

impl<V> IndexMut<NodeId> for NodeArena<V> {
    fn index_mut(&mut self, id: NodeId) -> &mut Node<V> {
        match &mut self.slots[id.0] {
            Slot::Occupied(node) => node,
            Slot::Vacant => panic!("stale node id {id:?}"),
        }
    }
}
