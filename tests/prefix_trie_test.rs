// Copyright (c) 2025 Mauka MCP Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Integration tests for the prefix trie public API.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

use mauka_trie::{PrefixTrie, TrieConfig, TrieError};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[test]
fn test_documented_scenario() {
    init_tracing();
    let trie = PrefixTrie::new();
    trie.insert("foo", 11);
    trie.insert("foobar", 111);
    trie.insert("bar", 22);

    assert_eq!(trie.get("foo"), Some(11));
    assert_eq!(trie.get("foob"), None);

    let expected: HashMap<String, i32> =
        [("foo".to_string(), 11), ("foobar".to_string(), 111)].into_iter().collect();
    assert_eq!(trie.with_prefix("f"), expected);

    let before = trie.node_count();
    assert!(trie.delete("foobar"));
    assert_eq!(
        trie.with_prefix("f"),
        [("foo".to_string(), 11)].into_iter().collect::<HashMap<_, _>>()
    );
    assert_eq!(trie.node_count(), before - 3);
}

#[test]
fn test_config_from_toml() {
    let config = TrieConfig::from_toml_str(
        r#"
        initial_capacity = 1024
        case_sensitive = false
        "#,
    )
    .unwrap();
    let trie = PrefixTrie::try_with_config(config).unwrap();
    trie.insert("Accept-Encoding", "gzip");
    assert_eq!(trie.get("accept-encoding"), Some("gzip"));

    let err = TrieConfig::from_toml_str("initial_capacity = 0").unwrap_err();
    assert!(matches!(err, TrieError::InvalidConfig(_)));
}

/// Writers replace and delete keys while readers scan; readers must only ever
/// see complete values and the final state must match a sequential run.
#[test]
fn test_concurrent_readers_and_writers() {
    const WRITERS: usize = 4;
    const READERS: usize = 4;
    const KEYS_PER_WRITER: usize = 200;

    init_tracing();
    let trie = Arc::new(PrefixTrie::<(usize, usize)>::new());
    let barrier = Arc::new(Barrier::new(WRITERS + READERS));
    let writers_done = Arc::new(AtomicBool::new(false));

    let writer_handles: Vec<_> = (0..WRITERS)
        .map(|writer| {
            let trie = Arc::clone(&trie);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for i in 0..KEYS_PER_WRITER {
                    let key = format!("w{writer}/k{i}");
                    trie.insert(&key, (writer, i));
                    if i % 2 == 0 {
                        assert!(trie.delete(&key), "own key {key} must be deletable");
                    }
                }
            })
        })
        .collect();

    let reader_handles: Vec<_> = (0..READERS)
        .map(|_| {
            let trie = Arc::clone(&trie);
            let barrier = Arc::clone(&barrier);
            let writers_done = Arc::clone(&writers_done);
            thread::spawn(move || {
                barrier.wait();
                while !writers_done.load(Ordering::Acquire) {
                    for writer in 0..WRITERS {
                        for (key, (owner, index)) in trie.with_prefix(format!("w{writer}/")) {
                            assert_eq!(owner, writer);
                            assert_eq!(key, format!("w{owner}/k{index}"));
                        }
                    }
                    let _ = trie.get("w0/k1");
                    let _ = trie.len();
                }
            })
        })
        .collect();

    for handle in writer_handles {
        handle.join().unwrap();
    }
    writers_done.store(true, Ordering::Release);
    for handle in reader_handles {
        handle.join().unwrap();
    }

    assert_eq!(trie.len(), WRITERS * KEYS_PER_WRITER / 2);
    for writer in 0..WRITERS {
        let stored = trie.with_prefix(format!("w{writer}/"));
        assert_eq!(stored.len(), KEYS_PER_WRITER / 2);
        for i in 0..KEYS_PER_WRITER {
            let key = format!("w{writer}/k{i}");
            let expected = if i % 2 == 0 { None } else { Some((writer, i)) };
            assert_eq!(trie.get(&key), expected);
        }
    }

    // Dropping every key must collapse the tree back to the root.
    for key in trie.keys_with_prefix("") {
        assert!(trie.delete(&key));
    }
    assert!(trie.is_empty());
    assert_eq!(trie.node_count(), 1);
}

#[test]
fn test_concurrent_inserts_of_shared_prefixes() {
    const THREADS: usize = 8;

    let trie = Arc::new(PrefixTrie::new());
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|thread_id| {
            let trie = Arc::clone(&trie);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for i in 0..100 {
                    trie.insert(format!("shared/{i}"), thread_id);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    // Every thread wrote the same keys: distinct key count, not insert count.
    assert_eq!(trie.len(), 100);
    assert!(trie
        .with_prefix("shared/")
        .values()
        .all(|owner| *owner < THREADS));
}
