// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration parsing and validation.
//!
//! Handles emotrie.toml parsing with version validation. Shortcut sets keep
//! their file order, which is the priority order used when replacing.

use std::collections::BTreeSet;
use std::path::Path;

use serde::Deserialize;

use crate::arena::DEFAULT_BLOCK_SIZE;
use crate::error::{Error, Result};
use crate::trie::TrieOptions;

/// Config file name looked up by discovery.
pub const CONFIG_FILE_NAME: &str = "emotrie.toml";

/// The only config version this build understands.
pub const SUPPORTED_VERSION: i64 = 1;

/// Minimum config structure for version checking.
#[derive(Deserialize)]
struct VersionOnly {
    version: Option<i64>,
}

/// Full configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Config file version (must be 1).
    pub version: i64,

    /// Storage settings shared by every set.
    #[serde(default)]
    pub arena: ArenaConfig,

    /// Shortcut sets, highest priority first.
    #[serde(default, rename = "set")]
    pub sets: Vec<SetConfig>,
}

/// `[arena]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArenaConfig {
    /// Serve storage from pooled blocks (disable for allocator diagnostics).
    #[serde(default = "default_true")]
    pub pooling: bool,

    /// Block size of each set's pattern string arena.
    #[serde(default = "ArenaConfig::default_block_size")]
    pub block_size: usize,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            pooling: true,
            block_size: Self::default_block_size(),
        }
    }
}

impl ArenaConfig {
    pub(crate) fn default_block_size() -> usize {
        DEFAULT_BLOCK_SIZE
    }
}

/// One `[[set]]` of shortcuts.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SetConfig {
    pub name: String,

    /// Suppress overlapping matches within this set.
    #[serde(default = "default_true")]
    pub reset_on_match: bool,

    #[serde(default)]
    pub patterns: Vec<PatternConfig>,
}

/// A shortcut and the text it expands to.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PatternConfig {
    pub text: String,
    pub replace: String,
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Trie options for `set`, honoring the arena section.
    pub fn trie_options(&self, set: &SetConfig) -> TrieOptions {
        TrieOptions {
            reset_on_match: set.reset_on_match,
            pooling: self.arena.pooling,
            string_block_size: self.arena.block_size,
        }
    }

    /// Total number of shortcuts across sets.
    pub fn pattern_count(&self) -> usize {
        self.sets.iter().map(|set| set.patterns.len()).sum()
    }
}

/// Load and parse a config file.
pub fn load(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    parse(&content, path)
}

/// Parse config from string content.
pub fn parse(content: &str, path: &Path) -> Result<Config> {
    let config_error = |message: String| Error::Config {
        message,
        path: Some(path.to_path_buf()),
    };

    // First check version
    let version_check: VersionOnly =
        toml::from_str(content).map_err(|e| config_error(e.to_string()))?;
    let version = version_check
        .version
        .ok_or_else(|| config_error("missing required field: version".to_string()))?;
    if version != SUPPORTED_VERSION {
        return Err(config_error(format!(
            "unsupported config version {} (supported: {})",
            version, SUPPORTED_VERSION
        )));
    }

    let config: Config = toml::from_str(content).map_err(|e| config_error(e.to_string()))?;
    validate(&config).map_err(config_error)?;
    Ok(config)
}

fn validate(config: &Config) -> std::result::Result<(), String> {
    let mut names = BTreeSet::new();
    for set in &config.sets {
        if set.name.trim().is_empty() {
            return Err("set name must not be empty".to_string());
        }
        if !names.insert(set.name.as_str()) {
            tracing::warn!("set '{}' is defined more than once", set.name);
        }
        if set.patterns.iter().any(|pattern| pattern.text.is_empty()) {
            return Err(format!("set '{}': shortcut text must not be empty", set.name));
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
