// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shortcut sets compiled from configuration.
//!
//! Each `[[set]]` becomes one [`Trie`] mapping shortcut text to its
//! replacement. Sets are scanned together, earlier sets winning a position.

use serde::Serialize;

use crate::config::Config;
use crate::error::Result;
use crate::trie::{self, Trie, TrieError, TrieStats};

/// Command-line adjustments applied on top of the config file.
#[derive(Debug, Clone, Copy, Default)]
pub struct Overrides {
    /// Allow overlapping matches in every set.
    pub no_reset: bool,
    /// Allocate per object instead of from pooled blocks.
    pub no_pool: bool,
}

/// A named trie of shortcuts.
#[derive(Debug)]
pub struct ShortcutSet {
    name: String,
    trie: Trie<String>,
}

impl ShortcutSet {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stats(&self) -> TrieStats {
        self.trie.stats()
    }
}

/// A shortcut occurrence found in the input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hit {
    pub set: String,
    pub shortcut: String,
    pub replacement: String,
    pub start: usize,
    pub end: usize,
}

/// All configured shortcut sets, in priority order.
#[derive(Debug, Default)]
pub struct Shortcuts {
    sets: Vec<ShortcutSet>,
}

impl Shortcuts {
    /// Compile every configured set.
    ///
    /// A shortcut repeated within a set keeps its first definition.
    pub fn from_config(config: &Config, overrides: Overrides) -> Result<Self> {
        let mut sets = Vec::with_capacity(config.sets.len());

        for set in &config.sets {
            let mut options = config.trie_options(set);
            if overrides.no_reset {
                options.reset_on_match = false;
            }
            if overrides.no_pool {
                options.pooling = false;
            }

            let mut trie = Trie::with_options(options);
            for pattern in &set.patterns {
                match trie.add(&pattern.text, pattern.replace.clone()) {
                    Ok(()) => {}
                    Err(TrieError::DuplicatePattern(text)) => {
                        tracing::warn!("set '{}': duplicate shortcut '{}' ignored", set.name, text);
                    }
                    Err(e) => return Err(e.into()),
                }
            }
            trie.build()?;
            tracing::debug!(
                "set '{}': {} shortcuts, {} states",
                set.name,
                trie.size(),
                trie.stats().states
            );

            sets.push(ShortcutSet {
                name: set.name.clone(),
                trie,
            });
        }

        Ok(Self { sets })
    }

    pub fn sets(&self) -> &[ShortcutSet] {
        &self.sets
    }

    pub fn is_empty(&self) -> bool {
        self.sets.iter().all(|set| set.trie.is_empty())
    }

    /// Expand every shortcut in `text`.
    pub fn replace_all(&mut self, text: &[u8]) -> Result<Vec<u8>> {
        let out = trie::multi_replace(self.sets.iter_mut().map(|set| &mut set.trie), text, |out, m| {
            out.extend_from_slice(m.data().as_bytes());
            true
        })?;
        Ok(out)
    }

    /// Locate every shortcut in `text` without rewriting it.
    pub fn find_all(&mut self, text: &[u8]) -> Result<Vec<Hit>> {
        let names: Vec<String> = self.sets.iter().map(|set| set.name.clone()).collect();
        let mut hits = Vec::new();
        trie::multi_find(self.sets.iter_mut().map(|set| &mut set.trie), text, |m| {
            hits.push(Hit {
                set: names[m.trie()].clone(),
                shortcut: String::from_utf8_lossy(m.pattern()).into_owned(),
                replacement: m.data().clone(),
                start: m.start(),
                end: m.end(),
            });
            true
        })?;
        Ok(hits)
    }
}

#[cfg(test)]
#[path = "shortcuts_tests.rs"]
mod tests;
