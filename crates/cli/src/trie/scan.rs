// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Automaton walks shared by single- and multi-trie scans.

use std::ops::Range;

use super::automaton::StateId;
use super::{Trie, TrieError};

/// A pattern occurrence reported to a scan callback.
#[derive(Debug)]
pub struct Match<'a, T> {
    pattern: &'a [u8],
    data: &'a T,
    trie: usize,
    start: usize,
}

impl<'a, T> Match<'a, T> {
    /// The registered pattern that matched.
    pub fn pattern(&self) -> &'a [u8] {
        self.pattern
    }

    /// Data registered with the pattern.
    pub fn data(&self) -> &'a T {
        self.data
    }

    /// Position of the reporting trie in the scanned list (0 for single scans).
    pub fn trie(&self) -> usize {
        self.trie
    }

    /// Byte offset of the match in the input.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Byte offset just past the match.
    pub fn end(&self) -> usize {
        self.start + self.pattern.len()
    }

    pub fn len(&self) -> usize {
        self.pattern.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pattern.is_empty()
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end()
    }
}

/// Replace matches of several tries in one pass.
///
/// Tries are consulted in iteration order at every byte; the first whose
/// match `on_match` accepts wins the position and every trie restarts from
/// its root.
pub fn multi_replace<'a, T, I, F>(
    tries: I,
    text: impl AsRef<[u8]>,
    on_match: F,
) -> Result<Vec<u8>, TrieError>
where
    T: 'a,
    I: IntoIterator<Item = &'a mut Trie<T>>,
    F: FnMut(&mut Vec<u8>, &Match<'_, T>) -> bool,
{
    let tries = prepare(tries)?;
    Ok(replace_in(&tries, text.as_ref(), on_match))
}

/// Count matches of several tries in one pass.
///
/// The first trie whose match `on_match` accepts counts the position. When
/// that trie resets on match, every trie restarts from its root.
pub fn multi_find<'a, T, I, F>(tries: I, text: impl AsRef<[u8]>, on_match: F) -> Result<usize, TrieError>
where
    T: 'a,
    I: IntoIterator<Item = &'a mut Trie<T>>,
    F: FnMut(&Match<'_, T>) -> bool,
{
    let tries = prepare(tries)?;
    Ok(find_in(&tries, text.as_ref(), on_match))
}

fn prepare<'a, T, I>(tries: I) -> Result<Vec<&'a Trie<T>>, TrieError>
where
    T: 'a,
    I: IntoIterator<Item = &'a mut Trie<T>>,
{
    tries
        .into_iter()
        .map(|trie| -> Result<&'a Trie<T>, TrieError> {
            trie.build()?;
            let trie: &'a Trie<T> = trie;
            Ok(trie)
        })
        .collect()
}

pub(super) fn replace_in<T, F>(tries: &[&Trie<T>], text: &[u8], mut on_match: F) -> Vec<u8>
where
    F: FnMut(&mut Vec<u8>, &Match<'_, T>) -> bool,
{
    let mut out = Vec::with_capacity(text.len());
    let mut states = vec![StateId::ROOT; tries.len()];

    for (pos, &byte) in text.iter().enumerate() {
        advance(tries, &mut states, byte);

        let mut replaced = false;
        for (index, trie) in tries.iter().enumerate() {
            let Some(found) = match_at(trie, index, states[index], pos + 1) else {
                continue;
            };

            // All but the current byte of the match are already in `out`.
            let keep = (out.len() + 1).saturating_sub(found.len());
            out.truncate(keep);
            if on_match(&mut out, &found) {
                replaced = true;
                break;
            }

            out.truncate(keep);
            out.extend_from_slice(&text[found.start()..pos]);
            if trie.reset_on_match {
                states[index] = StateId::ROOT;
            }
        }

        if replaced {
            states.fill(StateId::ROOT);
        } else {
            out.push(byte);
        }
    }
    out
}

pub(super) fn find_in<T, F>(tries: &[&Trie<T>], text: &[u8], mut on_match: F) -> usize
where
    F: FnMut(&Match<'_, T>) -> bool,
{
    let mut count = 0;
    let mut states = vec![StateId::ROOT; tries.len()];

    for (pos, &byte) in text.iter().enumerate() {
        advance(tries, &mut states, byte);

        for (index, trie) in tries.iter().enumerate() {
            let Some(found) = match_at(trie, index, states[index], pos + 1) else {
                continue;
            };
            if on_match(&found) {
                count += 1;
                if trie.reset_on_match {
                    states.fill(StateId::ROOT);
                }
                break;
            }
        }
    }
    count
}

fn advance<T>(tries: &[&Trie<T>], states: &mut [StateId], byte: u8) {
    for (trie, state) in tries.iter().zip(states.iter_mut()) {
        *state = trie.automaton.next_state(*state, byte);
    }
}

/// Match ending just before `end` for the trie standing on `state`.
fn match_at<'a, T>(trie: &'a Trie<T>, index: usize, state: StateId, end: usize) -> Option<Match<'a, T>> {
    let record = trie.automaton.found(state)?;
    let found = trie.records.get(record);
    debug_assert!(found.is_some(), "automaton refers to a removed record");
    let (pattern, data) = found?;
    Some(Match {
        pattern,
        data,
        trie: index,
        start: end.checked_sub(pattern.len())?,
    })
}

#[cfg(test)]
#[path = "scan_tests.rs"]
mod tests;
