// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

pub mod arena;
pub mod cli;
pub mod config;
pub mod discovery;
pub mod error;
pub mod shortcuts;
pub mod trie;

pub use arena::{Arena, ArenaError, Span};
pub use cli::{Cli, Command, FindArgs, OutputFormat, ReplaceArgs};
pub use error::{Error, ExitCode, Result};
pub use shortcuts::{Hit, Overrides, Shortcuts};
pub use trie::{Match, Trie, TrieError, TrieOptions, TrieStats, multi_find, multi_replace};
