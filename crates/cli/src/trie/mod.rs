// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Multi-pattern search and replace.
//!
//! A [`Trie`] holds (pattern, data) records and lazily compiles them into a
//! suffix-linked automaton the first time a scan runs after an edit. Scans
//! are linear in the input regardless of how many patterns overlap.
//!
//! - `add`/`remove` only invalidate; the rebuild is deferred to the next scan
//! - At each byte only the deepest registered match is reported
//! - [`multi_replace`] and [`multi_find`] run several tries in lock-step,
//!   earlier tries taking priority

mod automaton;
mod record;
mod scan;

use crate::arena::{Arena, ArenaError, DEFAULT_BLOCK_SIZE};
use automaton::Automaton;
use record::Records;

pub use scan::{Match, multi_find, multi_replace};

/// Error during trie mutation or compilation.
#[derive(Debug, thiserror::Error)]
pub enum TrieError {
    /// Patterns must contain at least one byte.
    #[error("empty pattern")]
    EmptyPattern,

    /// The pattern is already registered in this trie.
    #[error("duplicate pattern: {0}")]
    DuplicatePattern(String),

    /// Arena allocation failed.
    #[error(transparent)]
    Arena(#[from] ArenaError),
}

/// Construction options for a [`Trie`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrieOptions {
    /// Return to the root after every reported match.
    pub reset_on_match: bool,
    /// Serve storage from pooled blocks; `false` allocates per object.
    pub pooling: bool,
    /// Block size of the pattern string arena.
    pub string_block_size: usize,
}

impl Default for TrieOptions {
    fn default() -> Self {
        Self {
            reset_on_match: true,
            pooling: true,
            string_block_size: DEFAULT_BLOCK_SIZE,
        }
    }
}

/// Snapshot of a trie's size and build state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TrieStats {
    pub patterns: usize,
    pub pattern_bytes: usize,
    /// Automaton states, zero until built.
    pub states: usize,
    /// Number of automaton compilations so far.
    pub builds: u64,
    pub built: bool,
}

/// Set of literal byte patterns, each carrying caller data.
#[derive(Debug)]
pub struct Trie<T> {
    records: Records<T>,
    automaton: Automaton,
    reset_on_match: bool,
    builds: u64,
}

impl<T> Default for Trie<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Trie<T> {
    pub fn new() -> Self {
        Self::with_options(TrieOptions::default())
    }

    pub fn with_options(options: TrieOptions) -> Self {
        let strings = if options.pooling {
            Arena::with_block_size(options.string_block_size)
        } else {
            Arena::unpooled()
        };
        Self {
            records: Records::new(strings),
            automaton: Automaton::new(options.pooling),
            reset_on_match: options.reset_on_match,
            builds: 0,
        }
    }

    pub fn reset_on_match(&self) -> bool {
        self.reset_on_match
    }

    /// Choose whether a reported match returns the scan to the root.
    ///
    /// Enabled (the default), overlapping matches are suppressed.
    pub fn set_reset_on_match(&mut self, reset: bool) {
        self.reset_on_match = reset;
    }

    /// Register `pattern` with its data.
    ///
    /// Fails without modifying the trie when the pattern is empty or
    /// already registered.
    pub fn add(&mut self, pattern: impl AsRef<[u8]>, data: T) -> Result<(), TrieError> {
        let pattern = pattern.as_ref();
        if pattern.is_empty() {
            return Err(TrieError::EmptyPattern);
        }
        match self.records.insert(pattern, data)? {
            Some(_) => {
                self.automaton.invalidate();
                Ok(())
            }
            None => Err(TrieError::DuplicatePattern(
                String::from_utf8_lossy(pattern).into_owned(),
            )),
        }
    }

    /// Unregister `pattern`, returning its data.
    ///
    /// Returns `None` and leaves the automaton intact when the pattern is
    /// not registered.
    pub fn remove(&mut self, pattern: impl AsRef<[u8]>) -> Option<T> {
        let data = self.records.remove(pattern.as_ref())?;
        self.automaton.invalidate();
        Some(data)
    }

    /// Number of registered patterns.
    pub fn size(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.len() == 0
    }

    pub fn contains(&self, pattern: impl AsRef<[u8]>) -> bool {
        self.records.lookup(pattern.as_ref()).is_some()
    }

    /// Registered patterns and their data, most recently added first.
    pub fn patterns(&self) -> impl Iterator<Item = (&[u8], &T)> + '_ {
        self.records.iter().map(|(_, pattern, data)| (pattern, data))
    }

    /// Compile the automaton if an edit invalidated it.
    ///
    /// Scans call this implicitly; calling it up front moves the cost out
    /// of the first scan.
    pub fn build(&mut self) -> Result<(), TrieError> {
        if self.automaton.is_built() {
            return Ok(());
        }
        self.automaton.build(&self.records)?;
        self.builds += 1;
        Ok(())
    }

    /// Replace matches in `text`.
    ///
    /// On each match the output is cut back to where the match starts and
    /// `on_match` may append a replacement, returning `true`. When it
    /// returns `false` the matched bytes are kept verbatim. A trie with no
    /// patterns returns a copy of `text`.
    pub fn replace<F>(&mut self, text: impl AsRef<[u8]>, on_match: F) -> Result<Vec<u8>, TrieError>
    where
        F: FnMut(&mut Vec<u8>, &Match<'_, T>) -> bool,
    {
        self.build()?;
        Ok(scan::replace_in(&[&*self], text.as_ref(), on_match))
    }

    /// Count matches in `text` that `on_match` accepts.
    pub fn find<F>(&mut self, text: impl AsRef<[u8]>, on_match: F) -> Result<usize, TrieError>
    where
        F: FnMut(&Match<'_, T>) -> bool,
    {
        self.build()?;
        Ok(scan::find_in(&[&*self], text.as_ref(), on_match))
    }

    pub fn stats(&self) -> TrieStats {
        TrieStats {
            patterns: self.records.len(),
            pattern_bytes: self.records.total_len(),
            states: self.automaton.state_count(),
            builds: self.builds,
            built: self.automaton.is_built(),
        }
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
