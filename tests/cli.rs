use assert_cmd::Command;
use predicates::{prelude::PredicateBooleanExt, str::contains};
use tempfile::TempDir;

const BIN_NAME: &str = "budget-grid";

fn command(config_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin(BIN_NAME).expect("binary exists");
    cmd.env("BUDGET_GRID_CONFIG_DIR", config_dir.path());
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn summary_prints_balance_sheet() {
    let dir = TempDir::new().unwrap();
    command(&dir)
        .args(["summary", "--set", "income:revenue:sales:2024-01=1000"])
        .assert()
        .success()
        .stdout(contains("Budget: January 2024 - December 2024"))
        .stdout(contains("Closing"))
        .stdout(contains("$1000.00"));
}

#[test]
fn summary_json_carries_balances_forward() {
    let dir = TempDir::new().unwrap();
    let output = command(&dir)
        .args([
            "summary",
            "--start",
            "2024-01",
            "--end",
            "2024-03",
            "--set",
            "income:revenue:sales:2024-01=1000",
            "--json",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let snapshot: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let balances = snapshot["balances"].as_array().unwrap();
    assert_eq!(balances.len(), 3);
    assert_eq!(balances[0]["closing_balance"], 100_000);
    assert_eq!(balances[1]["opening_balance"], 100_000);
    assert_eq!(balances[2]["closing_balance"], 100_000);
    assert_eq!(snapshot["revision"], 1);
}

#[test]
fn summary_ledger_lists_rows() {
    let dir = TempDir::new().unwrap();
    command(&dir)
        .args(["summary", "--ledger", "--end", "2024-02"])
        .assert()
        .success()
        .stdout(contains("General Income"))
        .stdout(contains("Total Expenses"));
}

#[test]
fn summary_rejects_unknown_cell() {
    let dir = TempDir::new().unwrap();
    command(&dir)
        .args(["summary", "--set", "income:revenue:nope:2024-01=5"])
        .assert()
        .failure()
        .stderr(contains("not in the ledger").or(contains("Validation")));
}

#[test]
fn summary_rejects_inverted_range() {
    let dir = TempDir::new().unwrap();
    command(&dir)
        .args(["summary", "--start", "2024-06", "--end", "2024-01"])
        .assert()
        .failure();
}

#[test]
fn config_reports_paths() {
    let dir = TempDir::new().unwrap();
    command(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(contains("config.json"))
        .stdout(contains("January 2024 - December 2024"));
}
