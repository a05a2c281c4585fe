// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Find command implementation.

use std::io::Write;

use emotrie::cli::{Cli, FindArgs, OutputFormat};
use emotrie::error::ExitCode;

use crate::input;

/// Run the find command.
pub fn run(cli: &Cli, args: &FindArgs) -> anyhow::Result<ExitCode> {
    let mut shortcuts = input::load_shortcuts(cli)?;
    let text = input::read_input(args.file.as_deref())?;
    let hits = shortcuts.find_all(&text)?;

    let mut stdout = std::io::stdout().lock();
    match args.output {
        OutputFormat::Text => {
            for hit in &hits {
                writeln!(
                    stdout,
                    "{}..{}\t{}\t{} -> {}",
                    hit.start, hit.end, hit.set, hit.shortcut, hit.replacement
                )?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut stdout, &hits)?;
            writeln!(stdout)?;
        }
    }
    stdout.flush()?;

    if hits.is_empty() {
        Ok(ExitCode::NoMatches)
    } else {
        Ok(ExitCode::Success)
    }
}
