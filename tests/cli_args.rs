//! CLI argument parsing tests.

use clap::Parser;
use clickapi::cli::{parse_kind, parse_pair, Cli, Command};
use clickapi::ModelKind;

#[test]
fn test_cli_parses_get_subcommand() {
    let cli = Cli::parse_from(["clickapi", "get", "task", "abc1"]);

    assert!(!cli.json);
    match cli.command {
        Command::Get { entity, id } => {
            assert_eq!(entity, ModelKind::Task);
            assert_eq!(id, "abc1");
        }
        _ => panic!("Expected Get command"),
    }
}

#[test]
fn test_cli_parses_list_subcommand() {
    let cli = Cli::parse_from(["clickapi", "list", "teams"]);

    match cli.command {
        Command::List {
            entity,
            parent,
            parent_id,
            filters,
        } => {
            assert_eq!(entity, ModelKind::Team);
            assert!(parent.is_none());
            assert!(parent_id.is_none());
            assert!(filters.is_empty());
        }
        _ => panic!("Expected List command"),
    }
}

#[test]
fn test_list_under_parent_with_filters() {
    let cli = Cli::parse_from([
        "clickapi",
        "list",
        "tasks",
        "--parent",
        "list",
        "--parent-id",
        "100",
        "--where",
        "archived=true",
        "--where",
        "page=2",
    ]);

    match cli.command {
        Command::List {
            entity,
            parent,
            parent_id,
            filters,
        } => {
            assert_eq!(entity, ModelKind::Task);
            assert_eq!(parent, Some(ModelKind::TaskList));
            assert_eq!(parent_id.as_deref(), Some("100"));
            assert_eq!(
                filters,
                vec![
                    ("archived".to_string(), "true".to_string()),
                    ("page".to_string(), "2".to_string())
                ]
            );
        }
        _ => panic!("Expected List command"),
    }
}

#[test]
fn test_parent_requires_parent_id() {
    let result = Cli::try_parse_from(["clickapi", "list", "tasks", "--parent", "list"]);
    assert!(result.is_err());
}

#[test]
fn test_cli_parses_update_subcommand() {
    let cli = Cli::parse_from([
        "clickapi", "update", "task", "abc1", "--set", "name=New name", "--set", "priority=2",
    ]);

    match cli.command {
        Command::Update { entity, id, fields } => {
            assert_eq!(entity, ModelKind::Task);
            assert_eq!(id, "abc1");
            assert_eq!(fields.len(), 2);
            assert_eq!(fields[0], ("name".to_string(), "New name".to_string()));
        }
        _ => panic!("Expected Update command"),
    }
}

#[test]
fn test_update_requires_a_field() {
    let result = Cli::try_parse_from(["clickapi", "update", "task", "abc1"]);
    assert!(result.is_err());
}

#[test]
fn test_cli_parses_delete_and_whoami() {
    let cli = Cli::parse_from(["clickapi", "delete", "comment", "458"]);
    assert!(matches!(
        cli.command,
        Command::Delete { entity: ModelKind::Comment, ref id } if id == "458"
    ));

    let cli = Cli::parse_from(["clickapi", "whoami"]);
    assert!(matches!(cli.command, Command::Whoami));
}

#[test]
fn test_global_json_flag() {
    // --json before subcommand
    let cli = Cli::parse_from(["clickapi", "--json", "list", "teams"]);
    assert!(cli.json);

    // --json after subcommand (global flag)
    let cli = Cli::parse_from(["clickapi", "list", "teams", "--json"]);
    assert!(cli.json);
}

#[test]
fn test_invalid_entity_fails() {
    let result = Cli::try_parse_from(["clickapi", "get", "gadget", "1"]);
    assert!(result.is_err());
}

#[test]
fn test_parse_kind_accepts_common_spellings() {
    assert_eq!(parse_kind("workspaces").unwrap(), ModelKind::Team);
    assert_eq!(parse_kind("lists").unwrap(), ModelKind::TaskList);
    assert_eq!(parse_kind("task_list").unwrap(), ModelKind::TaskList);
    assert_eq!(parse_kind("key-results").unwrap(), ModelKind::KeyResult);
    assert_eq!(parse_kind("Comment").unwrap(), ModelKind::Comment);

    let err = parse_kind("gadgets").unwrap_err();
    assert!(err.contains("gadget"), "{err}");
}

#[test]
fn test_parse_pair() {
    assert_eq!(
        parse_pair("due_date=1567780450202").unwrap(),
        ("due_date".to_string(), "1567780450202".to_string())
    );
    assert_eq!(
        parse_pair("name=a=b").unwrap(),
        ("name".to_string(), "a=b".to_string())
    );
    assert!(parse_pair("name").is_err());
    assert!(parse_pair("=value").is_err());
}
