//! Command-line parsing

use clap::Parser;
use mobility_feed_decoder::cli::{Cli, Commands};

#[test]
fn test_subcommands_parse() {
    let cli = Cli::try_parse_from(["mobility-feed-decoder", "decode", "feed.xml", "--csv"]).unwrap();
    assert!(matches!(cli.command, Commands::Decode(_)));

    let cli = Cli::try_parse_from([
        "mobility-feed-decoder",
        "export",
        "feed.xml",
        "--format",
        "wide-csv",
    ])
    .unwrap();
    assert!(matches!(cli.command, Commands::Export(_)));

    let cli = Cli::try_parse_from([
        "mobility-feed-decoder",
        "fetch",
        "--endpoint",
        "https://feed.example/data",
        "--decode",
    ])
    .unwrap();
    assert!(matches!(cli.command, Commands::Fetch(_)));
}

#[test]
fn test_unknown_export_format_is_rejected() {
    assert!(Cli::try_parse_from([
        "mobility-feed-decoder",
        "export",
        "feed.xml",
        "--format",
        "yaml"
    ])
    .is_err());
}
