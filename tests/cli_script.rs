use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;

mod common;
use common::temp_home;

fn cli(home: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("budget_pulse_cli").unwrap();
    cmd.env("BUDGET_PULSE_HOME", home)
        .env("NO_COLOR", "1")
        .env("RUST_LOG", "off");
    cmd
}

#[test]
fn period_command_prints_the_payday_window() {
    let home = temp_home();
    cli(&home)
        .args(["config", "set-payday", "25"])
        .assert()
        .success()
        .stdout(contains("Payday set to 25"));
    cli(&home)
        .args(["period", "2025-08-10"])
        .assert()
        .success()
        .stdout(contains("2025-07-25 ~ 2025-08-24"))
        .stdout(contains("15"));
}

#[test]
fn recorded_expenses_show_up_in_status() {
    let home = temp_home();
    cli(&home)
        .args(["config", "set-budget", "1,000,000"])
        .assert()
        .success();
    cli(&home)
        .args(["add", "expense", "400000", "food", "2025-08-03", "team", "dinner"])
        .assert()
        .success()
        .stdout(contains("Recorded expense of ₩400,000 in Food"));
    cli(&home)
        .args(["status", "2025-08-10"])
        .assert()
        .success()
        .stdout(contains("₩600,000"))
        .stdout(contains("40.0%"));
    assert!(home.join("data").join("budget.json").exists());
}

#[test]
fn decimal_amounts_follow_the_configured_currency() {
    let home = temp_home();
    let config_dir = home.join("config");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(config_dir.join("config.json"), r#"{"currency": "USD"}"#).unwrap();

    cli(&home)
        .args(["config", "set-budget", "1000"])
        .assert()
        .success()
        .stdout(contains("$1,000.00"));
    cli(&home)
        .args(["add", "expense", "12.50", "food", "2025-08-03"])
        .assert()
        .success()
        .stdout(contains("Recorded expense of $12.50 in Food"));
    cli(&home)
        .args(["add", "expense", "1.999", "food", "2025-08-03"])
        .assert()
        .failure()
        .stderr(contains("invalid amount"));
    cli(&home)
        .args(["status", "2025-08-10"])
        .assert()
        .success()
        .stdout(contains("$987.50"));
}

#[test]
fn invalid_input_exits_with_failure() {
    let home = temp_home();
    cli(&home)
        .args(["config", "set-payday", "32"])
        .assert()
        .failure()
        .stderr(contains("payday"));
    cli(&home)
        .args(["status", "10/08/2025"])
        .assert()
        .failure()
        .stderr(contains("YYYY-MM-DD"));
}

#[test]
fn unknown_commands_get_a_suggestion() {
    let home = temp_home();
    cli(&home)
        .arg("stauts")
        .assert()
        .failure()
        .stderr(contains("unknown command `stauts`"))
        .stdout(contains("Did you mean `status`?"));
}

#[test]
fn version_reports_package_version() {
    let home = temp_home();
    cli(&home)
        .arg("version")
        .assert()
        .success()
        .stdout(contains(env!("CARGO_PKG_VERSION")).and(contains("budget_pulse")));
}
