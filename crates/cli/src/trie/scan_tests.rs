// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::collections::BTreeSet;

use aho_corasick::AhoCorasick;
use proptest::prelude::*;

use super::*;

fn trie<T>(entries: impl IntoIterator<Item = (&'static str, T)>) -> Trie<T> {
    let mut trie = Trie::new();
    for (pattern, data) in entries {
        trie.add(pattern, data).unwrap();
    }
    trie
}

fn text(bytes: Vec<u8>) -> String {
    String::from_utf8(bytes).unwrap()
}

/// Wraps every match as `<pattern>`.
fn bracket<T>(out: &mut Vec<u8>, m: &Match<'_, T>) -> bool {
    out.push(b'<');
    out.extend_from_slice(m.pattern());
    out.push(b'>');
    true
}

// =============================================================================
// SINGLE TRIE
// =============================================================================

#[test]
fn deepest_match_wins_and_refusals_stay_literal() {
    let mut trie = trie([
        ("test", 0x1001),
        ("testing", 0x1002),
        ("overtested", 0x1003),
        ("trie", 0x1004),
        ("tree", 0x1005),
        ("implement", 0x1006),
        ("implementation", 0x1007),
    ]);
    trie.set_reset_on_match(false);

    let input = "Alice is testing her trie implementation, but she's far away from making test tree overtested";
    let out = trie
        .replace(input, |out, m| {
            if *m.data() == 0x1001 {
                out.extend_from_slice(b"should be discarded");
                return false;
            }
            out.extend_from_slice(format!("[1:{:x}]", m.data()).as_bytes());
            true
        })
        .unwrap();

    similar_asserts::assert_eq!(
        text(out),
        "Alice is [1:1002] her [1:1004] [1:1006]ation, but she's far away from making test [1:1005] [1:1003]".to_string()
    );
}

#[test]
fn removed_pattern_is_never_matched_again() {
    let mut trie = trie([("alice", ()), ("bob", ()), ("cherry", ())]);
    trie.replace("warm up", bracket).unwrap();

    assert_eq!(trie.remove("bob"), Some(()));
    let out = trie.replace("alice bob cherry", bracket).unwrap();
    assert_eq!(text(out), "<alice> bob <cherry>");
}

#[test]
fn empty_trie_returns_a_copy() {
    let mut trie: Trie<()> = Trie::new();
    assert_eq!(trie.replace("", bracket).unwrap(), b"");
    assert_eq!(trie.replace("anything at all", bracket).unwrap(), b"anything at all");
    assert_eq!(trie.find("anything", |_| true).unwrap(), 0);
}

#[test]
fn find_counts_boundary_aligned_tokens_with_reset() {
    let mut trie = trie([("al", ()), ("ali", ()), ("alice", ())]);
    assert!(trie.reset_on_match());
    assert_eq!(trie.find("al ali alice", |_| true).unwrap(), 3);
}

#[test]
fn find_counts_nested_matches_without_reset() {
    let mut trie = trie([("al", ()), ("ali", ()), ("alice", ())]);
    trie.set_reset_on_match(false);
    assert_eq!(trie.find("al ali alice", |_| true).unwrap(), 6);
}

#[test]
fn declined_find_never_resets() {
    let mut trie = trie([("al", ()), ("alice", ())]);
    let mut seen = Vec::new();
    let count = trie
        .find("alice", |m| {
            seen.push(text(m.pattern().to_vec()));
            m.pattern() == b"alice"
        })
        .unwrap();
    assert_eq!(count, 1);
    assert_eq!(seen, vec!["al", "alice"]);
}

#[test]
fn refusal_does_not_retry_a_shorter_pattern() {
    let mut trie = trie([("ab", ()), ("b", ())]);
    let mut offered = Vec::new();
    let out = trie
        .replace("ab", |out, m| {
            offered.push(text(m.pattern().to_vec()));
            if m.pattern() == b"b" {
                return bracket(out, m);
            }
            false
        })
        .unwrap();
    assert_eq!(offered, vec!["ab"]);
    assert_eq!(text(out), "ab");
}

#[test]
fn refusal_with_reset_suppresses_the_longer_match() {
    let mut trie = trie([("ab", ()), ("abc", ())]);
    let refuse_short = |out: &mut Vec<u8>, m: &Match<'_, ()>| m.pattern() != b"ab" && bracket(out, m);

    let out = trie.replace("abc", refuse_short).unwrap();
    assert_eq!(text(out), "abc");

    trie.set_reset_on_match(false);
    let out = trie.replace("abc", refuse_short).unwrap();
    assert_eq!(text(out), "<abc>");
}

#[test]
fn replacement_resets_even_without_reset_on_match() {
    let mut trie = trie([("ab", ()), ("abc", ())]);
    trie.set_reset_on_match(false);
    let out = trie.replace("abc", bracket).unwrap();
    assert_eq!(text(out), "<ab>c");
}

#[test]
fn match_reports_its_byte_range() {
    let mut trie = trie([(":)", "smile")]);
    let mut ranges = Vec::new();
    trie.find("hi :) there :)", |m| {
        ranges.push(m.range());
        assert_eq!(m.trie(), 0);
        assert_eq!(*m.data(), "smile");
        true
    })
    .unwrap();
    assert_eq!(ranges, vec![3..5, 12..14]);
}

#[test]
fn patterns_are_raw_bytes() {
    let mut trie = Trie::new();
    trie.add([0xFFu8, 0x00], 1).unwrap();
    let out = trie
        .replace([0x01u8, 0xFF, 0x00, 0x02], |out, _| {
            out.push(b'!');
            true
        })
        .unwrap();
    assert_eq!(out, vec![0x01, b'!', 0x02]);
}

#[test]
fn callback_may_use_the_output_so_far() {
    let mut trie = trie([("x", ())]);
    let out = trie
        .replace("aax", |out, _| {
            let len = out.len();
            out.extend_from_slice(len.to_string().as_bytes());
            true
        })
        .unwrap();
    assert_eq!(text(out), "aa2");
}

// =============================================================================
// MULTIPLE TRIES
// =============================================================================

#[test]
fn earlier_trie_takes_priority() {
    let mut first = trie([("test", "first")]);
    let mut second = trie([("test", "second")]);

    let mut winners = Vec::new();
    let out = multi_replace([&mut first, &mut second], "a test here", |out, m| {
        winners.push((m.trie(), *m.data()));
        out.extend_from_slice(m.data().as_bytes());
        true
    })
    .unwrap();

    assert_eq!(text(out), "a first here");
    assert_eq!(winners, vec![(0, "first")]);
}

#[test]
fn refusal_falls_through_to_the_next_trie() {
    let mut first = trie([("test", "first")]);
    let mut second = trie([("test", "second")]);

    let out = multi_replace([&mut first, &mut second], "test", |out, m| {
        if m.trie() == 0 {
            return false;
        }
        out.extend_from_slice(m.data().as_bytes());
        true
    })
    .unwrap();
    assert_eq!(text(out), "second");
}

#[test]
fn accepted_match_resets_every_trie() {
    let mut first = trie([("ab", ())]);
    let mut second = trie([("bc", ())]);
    let out = multi_replace([&mut first, &mut second], "abc", bracket).unwrap();
    assert_eq!(text(out), "<ab>c");
}

#[test]
fn multi_find_resets_according_to_the_winner() {
    let mut first = trie([("al", ())]);
    let mut second = trie([("ali", ())]);
    assert_eq!(multi_find([&mut first, &mut second], "ali", |_| true).unwrap(), 1);

    first.set_reset_on_match(false);
    let mut seen = Vec::new();
    let count = multi_find([&mut first, &mut second], "ali", |m| {
        seen.push(m.trie());
        true
    })
    .unwrap();
    assert_eq!(count, 2);
    assert_eq!(seen, vec![0, 1]);
}

#[test]
fn multi_scan_accepts_owned_collections() {
    let mut tries = vec![trie([(":)", 1)]), trie([(":(", 2)])];
    let out = multi_replace(tries.iter_mut(), ":) :(", |out, m| {
        out.extend_from_slice(m.data().to_string().as_bytes());
        true
    })
    .unwrap();
    assert_eq!(text(out), "1 2");
    assert!(tries.iter().all(|t| t.stats().built));
}

#[test]
fn multi_scan_over_no_tries_copies_input() {
    let tries: Vec<&mut Trie<()>> = Vec::new();
    assert_eq!(multi_replace(tries, "plain", bracket).unwrap(), b"plain");
    let tries: Vec<&mut Trie<()>> = Vec::new();
    assert_eq!(multi_find(tries, "plain", |_| true).unwrap(), 0);
}

// =============================================================================
// PROPERTIES
// =============================================================================

fn naive_deepest(patterns: &BTreeSet<String>, text: &str) -> Vec<(usize, Vec<u8>)> {
    (1..=text.len())
        .filter_map(|end| {
            patterns
                .iter()
                .filter(|p| text[..end].ends_with(p.as_str()))
                .max_by_key(|p| p.len())
                .map(|p| (end, p.as_bytes().to_vec()))
        })
        .collect()
}

proptest! {
    #[test]
    fn reports_deepest_pattern_at_every_position(
        patterns in proptest::collection::btree_set("[ab]{1,4}", 1..6),
        text in "[abc]{0,40}",
    ) {
        let mut trie = Trie::new();
        trie.set_reset_on_match(false);
        for pattern in &patterns {
            trie.add(pattern, ()).unwrap();
        }

        let mut seen = Vec::new();
        trie.find(&text, |m| {
            seen.push((m.end(), m.pattern().to_vec()));
            true
        }).unwrap();

        prop_assert_eq!(seen, naive_deepest(&patterns, &text));
    }

    #[test]
    fn counts_every_end_position_reported_by_aho_corasick(
        patterns in proptest::collection::btree_set("[abc]{1,5}", 1..8),
        text in "[abcd]{0,60}",
    ) {
        let mut trie = Trie::new();
        trie.set_reset_on_match(false);
        for pattern in &patterns {
            trie.add(pattern, ()).unwrap();
        }
        let count = trie.find(&text, |_| true).unwrap();

        let ac = AhoCorasick::new(&patterns).unwrap();
        let ends: BTreeSet<usize> = ac.find_overlapping_iter(&text).map(|m| m.end()).collect();
        prop_assert_eq!(count, ends.len());
    }

    #[test]
    fn refusing_every_match_preserves_input(
        patterns in proptest::collection::btree_set("[ab]{1,3}", 1..5),
        text in "[ab ]{0,40}",
        reset in any::<bool>(),
    ) {
        let mut trie = Trie::new();
        trie.set_reset_on_match(reset);
        for pattern in &patterns {
            trie.add(pattern, ()).unwrap();
        }
        let out = trie.replace(&text, |out, _| {
            out.extend_from_slice(b"junk");
            false
        }).unwrap();
        prop_assert_eq!(out, text.as_bytes());
    }
}
