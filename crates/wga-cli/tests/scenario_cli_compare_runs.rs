use assert_cmd::Command;
use predicates::prelude::*;

fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{name}", env!("CARGO_MANIFEST_DIR"))
}

fn wga() -> Command {
    Command::cargo_bin("wga").unwrap()
}

#[test]
fn scenario_cli_monthly_compare_reports_both_sides() {
    wga()
        .args([
            "compare",
            "monthly",
            "--excel",
            &fixture("monthly_excel.txt"),
            "--tracker",
            &fixture("monthly_tracker.txt"),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Matched (1): CODE1"))
        .stdout(predicate::str::contains("Excel only (1): CODE2"))
        .stdout(predicate::str::contains("Tracker only (1): CODE3"));
}

#[test]
fn scenario_cli_add_compare_is_clean_for_a_complete_profile() {
    wga()
        .args([
            "compare",
            "add",
            "--platform",
            "ism",
            "--role",
            "SA PROFILE",
            "--requested",
            &fixture("add_requested.txt"),
            "--added",
            &fixture("add_added.txt"),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Matched (1): AB100"))
        .stdout(predicate::str::contains("Missing (1): CD200"))
        .stdout(predicate::str::contains(
            "Summary: matched=1 missing=1 extra=0 errors=0",
        ));
}

#[test]
fn scenario_cli_add_requires_a_role_on_role_matrix_platforms() {
    wga()
        .args([
            "compare",
            "add",
            "--platform",
            "ism",
            "--requested",
            &fixture("add_requested.txt"),
            "--added",
            &fixture("add_added.txt"),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("requires --role"));
}

#[test]
fn scenario_cli_branch_check_partitions_codes() {
    wga()
        .args([
            "branch-check",
            "--branch-codes",
            &fixture("branch_known.txt"),
            "--check",
            &fixture("branch_check.txt"),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Duplicates (1): *A445FC"))
        .stdout(predicate::str::contains("Unique (1): *A999FC"));
}

#[test]
fn scenario_cli_rejects_unknown_platforms() {
    wga()
        .args([
            "compare",
            "add",
            "--platform",
            "mainframe9",
            "--requested",
            &fixture("add_requested.txt"),
            "--added",
            &fixture("add_added.txt"),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown platform"));
}
