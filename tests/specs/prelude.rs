//! Test helpers for behavioral specifications.
//!
//! Provides a small DSL for running the emotrie binary inside a scratch
//! project with its own config.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

pub use assert_cmd::prelude::*;
pub use predicates;
pub use predicates::prelude::PredicateBooleanExt;
use std::path::{Path, PathBuf};

/// Returns a Command configured to run the emotrie binary
pub fn emotrie_cmd() -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("emotrie"));
    cmd.env_remove("EMOTRIE_CONFIG")
        .env_remove("EMOTRIE_POOL_DISABLED")
        .env_remove("EMOTRIE_LOG");
    cmd
}

/// Config with two sets sharing the `:-)` shortcut.
pub const SMILEYS: &str = r#"
version = 1

[[set]]
name = "custom"
patterns = [{ text = ":-)", replace = "[grin]" }]

[[set]]
name = "theme"
patterns = [
    { text = ":)", replace = "[smile]" },
    { text = ":-)", replace = "[theme-grin]" },
    { text = "<3", replace = "[heart]" },
]
"#;

/// Scratch directory rooted at its own git marker so discovery stays inside.
pub struct Project {
    dir: tempfile::TempDir,
}

#[allow(dead_code)]
impl Project {
    pub fn empty() -> Self {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join(".git")).unwrap();
        Self { dir }
    }

    pub fn with_config(content: &str) -> Self {
        let project = Self::empty();
        project.file("emotrie.toml", content);
        project
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, content).unwrap();
        path
    }

    /// emotrie command running inside this project.
    pub fn cmd(&self) -> assert_cmd::Command {
        let mut cmd = emotrie_cmd();
        cmd.current_dir(self.path());
        cmd
    }
}
