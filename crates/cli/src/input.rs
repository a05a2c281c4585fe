// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared plumbing for the scanning commands.

use std::io::Read;
use std::path::{Path, PathBuf};

use emotrie::cli::Cli;
use emotrie::config::{self, CONFIG_FILE_NAME, Config};
use emotrie::discovery;
use emotrie::error::{Error, Result};
use emotrie::shortcuts::Shortcuts;

/// Load the resolved config, or an empty one when none is found.
///
/// The path is `None` in the latter case.
pub fn load_config(cli: &Cli) -> Result<(Config, Option<PathBuf>)> {
    let cwd = std::env::current_dir().map_err(|e| Error::Io {
        path: PathBuf::from("."),
        source: e,
    })?;

    match discovery::resolve_config(cli.config.as_deref(), &cwd)? {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            let config = config::load(&path)?;
            Ok((config, Some(path)))
        }
        None => {
            tracing::debug!("no config found");
            Ok((Config::default(), None))
        }
    }
}

/// Compile the configured sets; scanning without a config is an error.
pub fn load_shortcuts(cli: &Cli) -> Result<Shortcuts> {
    let (config, path) = load_config(cli)?;
    if path.is_none() {
        return Err(Error::Config {
            message: format!("no {} found (use -C to name one)", CONFIG_FILE_NAME),
            path: None,
        });
    }
    Shortcuts::from_config(&config, cli.overrides())
}

/// Read `file`, or stdin when it is absent or `-`.
pub fn read_input(file: Option<&Path>) -> Result<Vec<u8>> {
    match file {
        Some(path) if path.is_dir() => Err(Error::Argument(format!(
            "{} is a directory, expected a file",
            path.display()
        ))),
        Some(path) if path != Path::new("-") => std::fs::read(path).map_err(|e| Error::Io {
            path: path.to_path_buf(),
            source: e,
        }),
        _ => {
            let mut buf = Vec::new();
            std::io::stdin()
                .lock()
                .read_to_end(&mut buf)
                .map_err(|e| Error::Io {
                    path: PathBuf::from("<stdin>"),
                    source: e,
                })?;
            Ok(buf)
        }
    }
}
