use assert_cmd::Command;
use predicates::prelude::*;

fn wga() -> Command {
    Command::cargo_bin("wga").unwrap()
}

#[test]
fn scenario_cli_policy_list_names_every_role() {
    wga()
        .args(["policy", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("SA PROFILE"))
        .stdout(predicate::str::contains("IA PROFILE"))
        .stdout(predicate::str::contains("BA & CAGE INQUIRY"));
}

#[test]
fn scenario_cli_policy_show_prints_the_permission_vector() {
    wga()
        .args(["policy", "show", "--role", "SA PROFILE"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"allow_branch_bundle\": false"))
        .stdout(predicate::str::contains("Permission levels:"))
        .stdout(predicate::str::contains("Order Entry: 1"));
}

#[test]
fn scenario_cli_policy_show_fails_on_unknown_role() {
    wga()
        .args(["policy", "show", "--role", "NO SUCH ROLE"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no policy for role"));
}

#[test]
fn scenario_cli_policy_hash_is_stable() {
    let first = wga().args(["policy", "hash"]).output().unwrap();
    let second = wga().args(["policy", "hash"]).output().unwrap();
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
    let text = String::from_utf8(first.stdout).unwrap();
    let hash = text.trim();
    assert_eq!(hash.len(), 64);
    assert!(hash.bytes().all(|b| b.is_ascii_hexdigit()));
}
