#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;

#[test]
fn parse_bare_invocation() {
    let cli = Cli::try_parse_from(["emotrie"]).unwrap();
    assert!(cli.command.is_none());
    assert!(!cli.no_reset);
}

#[test]
fn parse_replace_with_file() {
    let cli = Cli::try_parse_from(["emotrie", "replace", "notes.txt"]).unwrap();
    if let Some(Command::Replace(args)) = cli.command {
        assert_eq!(args.file, Some(PathBuf::from("notes.txt")));
    } else {
        panic!("expected replace command");
    }
}

#[test]
fn parse_replace_from_stdin() {
    let cli = Cli::try_parse_from(["emotrie", "replace"]).unwrap();
    if let Some(Command::Replace(args)) = cli.command {
        assert!(args.file.is_none());
    } else {
        panic!("expected replace command");
    }
}

#[test]
fn parse_find_with_output_format() {
    let cli = Cli::try_parse_from(["emotrie", "find", "-o", "json"]).unwrap();
    if let Some(Command::Find(args)) = cli.command {
        assert!(matches!(args.output, OutputFormat::Json));
    } else {
        panic!("expected find command");
    }
}

#[test]
fn parse_find_defaults_to_text() {
    let cli = Cli::try_parse_from(["emotrie", "find"]).unwrap();
    if let Some(Command::Find(args)) = cli.command {
        assert!(matches!(args.output, OutputFormat::Text));
    } else {
        panic!("expected find command");
    }
}

#[test]
fn parse_check_command() {
    let cli = Cli::try_parse_from(["emotrie", "check"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Check)));
}

#[test]
fn global_flags_after_subcommand() {
    let cli =
        Cli::try_parse_from(["emotrie", "find", "--no-reset", "-C", "custom.toml"]).unwrap();
    assert!(cli.no_reset);
    assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
    assert!(cli.overrides().no_reset);
}

#[test]
fn hidden_no_pool_flag() {
    let cli = Cli::try_parse_from(["emotrie", "--no-pool", "replace"]).unwrap();
    assert!(cli.overrides().no_pool);
}

#[test]
fn rejects_unknown_output_format() {
    assert!(Cli::try_parse_from(["emotrie", "find", "-o", "html"]).is_err());
}
