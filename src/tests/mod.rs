//! Test modules for the Mauka Trie library.
//!
//! This module contains the crate-internal test suite:
//! - Table-driven tests for the prefix trie using test-case
//! - Model-based property tests using proptest
//! - Shared strategies and fixtures


pub use test_utils::{init_test_tracing, key_strategy, op_strategy, sample_trie, Op};
