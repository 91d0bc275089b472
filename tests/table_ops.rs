//! # Record Table Integration Tests
//!
//! Table behavior across sizing, duplicate policies, and resizes, plus a
//! randomized-order comparison against a reference map.

use bytepool::{ByteBuf, DuplicatePolicy, MemoryPool, RecordTable};
use hashbrown::HashMap;

fn buf(bytes: &[u8]) -> ByteBuf {
    ByteBuf::from_slice(bytes).unwrap()
}

#[test]
fn add_get_remove_cycle() {
    let mut table = RecordTable::new();

    table.add(&buf(b"foo"), &buf(b"1")).unwrap();
    assert_eq!(table.get(&buf(b"foo")).unwrap().as_bytes(), b"1");

    table.remove(&buf(b"foo"));
    assert!(table.get(&buf(b"foo")).is_none());
}

#[test]
fn resize_preserves_four_distinct_keys() {
    let mut table = RecordTable::new();
    let keys: &[&[u8]] = &[b"foo", b"bar", b"baz", b"qux"];
    for (i, key) in keys.iter().enumerate() {
        table.add(&buf(key), &buf(&[i as u8])).unwrap();
    }

    table.resize(23).unwrap();

    assert_eq!(table.entry_count(), 4);
    for (i, key) in keys.iter().enumerate() {
        assert_eq!(table.get(&buf(key)).unwrap().as_bytes(), &[i as u8]);
    }
}

#[test]
fn resize_to_same_size_keeps_all_keys_retrievable() {
    let mut table = RecordTable::new();
    for key in [&b"a"[..], b"b", b"c"] {
        table.add(&buf(key), &buf(b"v")).unwrap();
    }
    let size = table.bucket_count();

    table.resize(size).unwrap();

    for key in [&b"a"[..], b"b", b"c"] {
        assert!(table.get(&buf(key)).is_some());
    }
}

#[test]
fn single_bucket_table_still_works() {
    let mut table = RecordTable::new();
    table.resize(1).unwrap();

    for key in [&b"x"[..], b"y", b"z"] {
        table.add(&buf(key), &buf(key)).unwrap();
    }
    assert_eq!(table.entry_count(), 3);
    for key in [&b"x"[..], b"y", b"z"] {
        assert_eq!(table.get(&buf(key)).unwrap().as_bytes(), key);
    }

    table.remove(&buf(b"y"));
    assert_eq!(table.entry_count(), 2);
    assert!(table.get(&buf(b"y")).is_none());
    assert!(table.get(&buf(b"x")).is_some());
    assert!(table.get(&buf(b"z")).is_some());
}

#[test]
fn legacy_append_mode_accumulates_records() {
    let mut table = RecordTable::new().with_policy(DuplicatePolicy::Append);

    for _ in 0..3 {
        table.add(&buf(b"dup"), &buf(b"v")).unwrap();
    }

    assert_eq!(table.entry_count(), 1);
    assert_eq!(table.iter().count(), 3);

    // removals peel records one at a time; the key stays counted until
    // the last one goes
    table.remove(&buf(b"dup"));
    table.remove(&buf(b"dup"));
    assert_eq!(table.entry_count(), 1);
    table.remove(&buf(b"dup"));
    assert_eq!(table.entry_count(), 0);
}

#[test]
fn pooled_table_matches_reference_map() {
    let pool = MemoryPool::new();
    let mut table = RecordTable::new_in(&pool);
    let mut reference: HashMap<Vec<u8>, Vec<u8>> = HashMap::new();

    // deterministic but scattered key set, long enough to spill the weight
    // window and collide buckets
    for i in 0..200u32 {
        let key = format!("key-{}-{}", i % 37, "x".repeat((i % 25) as usize));
        let value = i.to_le_bytes().to_vec();

        let kb = ByteBuf::from_slice_in(&pool, key.as_bytes()).unwrap();
        let vb = ByteBuf::from_slice_in(&pool, &value).unwrap();
        table.add(&kb, &vb).unwrap();
        reference.insert(key.into_bytes(), value);
    }

    table.resize(97).unwrap();

    assert_eq!(table.entry_count(), reference.len());
    for (key, value) in &reference {
        let found = table.get(&buf(key)).unwrap();
        assert_eq!(found.as_bytes(), &value[..]);
    }

    // remove half, verify the rest
    let mut removed = 0;
    for key in reference.keys().take(reference.len() / 2) {
        assert!(table.remove(&buf(key)).is_some());
        removed += 1;
    }
    assert_eq!(table.entry_count(), reference.len() - removed);
}

#[test]
fn get_mut_updates_value_in_place() {
    let mut table = RecordTable::new();
    table.add(&buf(b"counter"), &buf(&[0])).unwrap();

    table.get_mut(&buf(b"counter")).unwrap().as_bytes_mut()[0] = 9;

    assert_eq!(table.get(&buf(b"counter")).unwrap().as_bytes(), &[9]);
}
