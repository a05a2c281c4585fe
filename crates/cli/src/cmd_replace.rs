// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Replace command implementation.

use std::io::Write;

use emotrie::cli::{Cli, ReplaceArgs};
use emotrie::error::ExitCode;

use crate::input;

/// Run the replace command.
pub fn run(cli: &Cli, args: &ReplaceArgs) -> anyhow::Result<ExitCode> {
    let mut shortcuts = input::load_shortcuts(cli)?;
    let text = input::read_input(args.file.as_deref())?;

    let out = shortcuts.replace_all(&text)?;
    tracing::debug!("replaced {} input bytes with {} output bytes", text.len(), out.len());

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(&out)?;
    stdout.flush()?;
    Ok(ExitCode::Success)
}
