// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! CLI argument parsing with clap derive.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::shortcuts::Overrides;

/// Expand text shortcuts in one linear pass
#[derive(Parser)]
#[command(name = "emotrie")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Use specific config file
    #[arg(short = 'C', long = "config", global = true, env = "EMOTRIE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Report overlapping shortcuts instead of restarting after each match
    #[arg(long, global = true)]
    pub no_reset: bool,

    /// Allocate per object instead of from pooled blocks
    #[arg(long, global = true, hide = true, env = "EMOTRIE_POOL_DISABLED")]
    pub no_pool: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            no_reset: self.no_reset,
            no_pool: self.no_pool,
        }
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Expand shortcuts and print the result
    Replace(ReplaceArgs),
    /// List shortcuts present in the input
    Find(FindArgs),
    /// Validate config and print set statistics
    Check,
}

#[derive(clap::Args)]
pub struct ReplaceArgs {
    /// Input file (reads stdin when omitted or "-")
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,
}

#[derive(clap::Args)]
pub struct FindArgs {
    /// Input file (reads stdin when omitted or "-")
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub output: OutputFormat,
}

#[derive(Clone, Copy, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
