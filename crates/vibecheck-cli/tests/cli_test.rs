//! Argument parsing tests for the vibecheck binary.

use clap::Parser;
use std::path::PathBuf;
use vibecheck_cli::{ClassesCommand, Cli, Command, DashboardArgs, ReleaseArgs, StudentCommand};
use vibecheck_client::ClassSelection;
use vibecheck_common::{AggregationPeriod, ClassId, Emotion, EventType};

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("vibecheck").chain(args.iter().copied())).unwrap()
}

#[test]
fn test_dashboard_defaults() {
    let cli = parse(&["dashboard"]);

    assert_eq!(
        cli.command,
        Command::Dashboard(DashboardArgs {
            period: None,
            class: ClassSelection::All,
            event_type: None,
            json: false,
            export: None,
            chart: None,
        })
    );
}

#[test]
fn test_dashboard_filters_and_outputs() {
    let cli = parse(&[
        "dashboard",
        "--period",
        "month",
        "--class",
        "4",
        "--type",
        "checkout",
        "--export",
        "--chart",
        "chart.svg",
    ]);

    let Command::Dashboard(args) = cli.command else {
        panic!("expected dashboard command");
    };
    assert_eq!(args.period, Some(AggregationPeriod::Month));
    assert_eq!(args.class, ClassSelection::Id(ClassId(4)));
    assert_eq!(args.event_type, Some(EventType::Checkout));
    assert_eq!(args.export, Some(None));
    assert_eq!(args.chart, Some(PathBuf::from("chart.svg")));
}

#[test]
fn test_export_with_explicit_path() {
    let Command::Dashboard(args) = parse(&["dashboard", "--export", "out.txt"]).command else {
        panic!("expected dashboard command");
    };
    assert_eq!(args.export, Some(Some(PathBuf::from("out.txt"))));
}

#[test]
fn test_invalid_values_are_rejected() {
    assert!(Cli::try_parse_from(["vibecheck", "dashboard", "--period", "year"]).is_err());
    assert!(Cli::try_parse_from(["vibecheck", "dashboard", "--class", "third"]).is_err());
    assert!(Cli::try_parse_from(["vibecheck", "student", "submit", "10"]).is_err());
}

#[test]
fn test_class_commands() {
    assert_eq!(
        parse(&["classes", "rename", "3", "Biologia"]).command,
        Command::Classes(ClassesCommand::Rename {
            id: ClassId(3),
            name: "Biologia".to_string(),
        })
    );
    assert_eq!(
        parse(&["classes", "delete", "3", "--yes"]).command,
        Command::Classes(ClassesCommand::Delete {
            id: ClassId(3),
            yes: true,
        })
    );
}

#[test]
fn test_release_defaults_to_checkin() {
    assert_eq!(
        parse(&["release", "3A"]).command,
        Command::Release(ReleaseArgs {
            class: "3A".to_string(),
            event_type: EventType::Checkin,
        })
    );
}

#[test]
fn test_student_submit_accepts_code_or_label() {
    assert_eq!(
        parse(&["student", "submit", "8"]).command,
        Command::Student(StudentCommand::Submit {
            emotion: Emotion::Anxious,
        })
    );
    assert_eq!(
        parse(&["student", "submit", "Feliz"]).command,
        Command::Student(StudentCommand::Submit {
            emotion: Emotion::Happy,
        })
    );
}

#[test]
fn test_global_options() {
    let cli = parse(&["--config", "custom.yaml", "--log-level", "debug", "login-url"]);

    assert_eq!(cli.config, Some(PathBuf::from("custom.yaml")));
    assert_eq!(cli.log_level.as_deref(), Some("debug"));
    assert_eq!(cli.command, Command::LoginUrl);
}
