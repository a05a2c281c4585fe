// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Check command implementation.

use emotrie::cli::Cli;
use emotrie::error::ExitCode;
use emotrie::shortcuts::Shortcuts;

use crate::input;

/// Validate the config and print one line per set.
pub fn run(cli: &Cli) -> anyhow::Result<ExitCode> {
    let (config, path) = input::load_config(cli)?;
    let shortcuts = Shortcuts::from_config(&config, cli.overrides())?;

    match &path {
        Some(path) => println!("config: {}", path.display()),
        None => println!("config: none"),
    }
    for set in shortcuts.sets() {
        let stats = set.stats();
        println!(
            "{}: {} shortcuts, {} bytes, {} states",
            set.name(),
            stats.patterns,
            stats.pattern_bytes,
            stats.states
        );
    }
    Ok(ExitCode::Success)
}
