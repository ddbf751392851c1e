use clap::Parser;

use super::*;

#[test]
fn parses_scrape_with_default_count() {
    let cli = Cli::try_parse_from(["devscout-cli", "scrape"]).expect("expected valid cli args");

    assert!(matches!(cli.command, Some(Commands::Scrape { count: 10 })));
}

#[test]
fn parses_scrape_with_explicit_count() {
    let cli = Cli::try_parse_from(["devscout-cli", "scrape", "--count", "25"])
        .expect("expected valid cli args");

    assert!(matches!(cli.command, Some(Commands::Scrape { count: 25 })));
}

#[test]
fn parses_scrape_with_short_count_flag() {
    let cli =
        Cli::try_parse_from(["devscout-cli", "scrape", "-c", "3"]).expect("expected valid cli args");

    assert!(matches!(cli.command, Some(Commands::Scrape { count: 3 })));
}

#[test]
fn rejects_non_numeric_count() {
    let result = Cli::try_parse_from(["devscout-cli", "scrape", "--count", "many"]);
    assert!(result.is_err());
}

#[test]
fn parses_db_ping_command() {
    let cli = Cli::try_parse_from(["devscout-cli", "db", "ping"]).expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Db {
            command: DbCommands::Ping
        })
    ));
}

#[test]
fn parses_db_migrate_command() {
    let cli =
        Cli::try_parse_from(["devscout-cli", "db", "migrate"]).expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Db {
            command: DbCommands::Migrate
        })
    ));
}

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["devscout-cli"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}
