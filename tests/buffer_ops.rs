//! # Buffer Behavior Integration Tests
//!
//! End-to-end checks of the ByteBuf contract: growth idempotence, the
//! termination invariant under mixed operations, the text transforms, and
//! pool-backed growth observed from the outside.

use bytepool::{ByteBuf, MemoryPool};

#[test]
fn reserve_never_disturbs_contents() {
    let mut buf = ByteBuf::new();
    buf.push_bytes(b"payload").unwrap();

    for request in [1, 7, 64, 64, 32, 4096] {
        buf.reserve(request).unwrap();
        assert_eq!(buf.as_bytes(), b"payload");
        assert_eq!(buf.len(), 7);
    }
}

#[test]
fn terminator_survives_mixed_pushes() {
    let mut buf = ByteBuf::new();
    buf.set_text("a").unwrap();

    buf.push_byte(b'b').unwrap();
    buf.push_bytes(b"cde").unwrap();
    buf.push_byte(b'f').unwrap();

    assert!(buf.is_terminated());
    assert_eq!(buf.as_bytes(), b"abcdef\0");
    assert_eq!(buf.text(), b"abcdef");
}

#[test]
fn split_tokens_inherit_pool_and_termination() {
    let pool = MemoryPool::new();
    let mut line = ByteBuf::new_in(&pool);
    line.set_text("Hello From Mars").unwrap();

    let tokens = line.split(b' ').unwrap();
    let words: Vec<&[u8]> = tokens.iter().map(|t| t.text()).collect();
    assert_eq!(words, vec![&b"Hello"[..], b"From", b"Mars"]);
    for token in &tokens {
        assert!(token.is_terminated());
        assert!(token.pool().is_some());
    }
}

#[test]
fn sanitize_downcase_split_pipeline() {
    // the exact pipeline the word counter runs per line
    let mut line = ByteBuf::new();
    line.push_bytes(b"The QUICK,  brown fox!\n").unwrap();

    line.sanitize_text();
    line.make_ascii_lowercase();
    let tokens = line.split(b' ').unwrap();

    let words: Vec<&[u8]> = tokens.iter().map(|t| t.text()).collect();
    assert_eq!(words, vec![&b"the"[..], b"quick", b"brown", b"fox"]);
}

#[test]
fn left_shift_then_append_assembles_stream() {
    // the reader's refill pattern: shift consumed bytes, append a block
    let mut buf = ByteBuf::new();
    buf.push_bytes(b"consumed|tail").unwrap();

    buf.left_shift(9).unwrap();
    assert_eq!(buf.as_bytes(), b"tail");

    buf.append_slice(b"+more").unwrap();
    assert_eq!(buf.as_bytes(), b"tail+more");
}

#[test]
fn deep_copies_share_nothing_across_pools() {
    let pool = MemoryPool::new();
    let mut original = ByteBuf::new_in(&pool);
    original.set_text("independent").unwrap();

    let mut copy = original.try_clone().unwrap();
    copy.clear();
    copy.push_bytes(b"rewritten").unwrap();

    assert_eq!(original.text(), b"independent");
    assert_eq!(copy.as_bytes(), b"rewritten");
}

#[test]
fn pool_feeds_buffer_growth() {
    let pool = MemoryPool::new();

    // park a roomy block
    pool.release(Vec::with_capacity(256));
    assert_eq!(pool.live_blocks(), 1);

    let mut buf = ByteBuf::new_in(&pool);
    buf.reserve(100).unwrap();

    // growth was served from the pool, not the allocator
    assert_eq!(pool.live_blocks(), 0);
    assert!(buf.capacity() >= 256);
}
