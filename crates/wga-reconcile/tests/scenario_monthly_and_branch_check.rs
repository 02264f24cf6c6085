use wga_codes::{normalize, NormalizeOptions};
use wga_reconcile::{check_branch_duplicates, compare_monthly};

fn names(list: &[wga_codes::CodeToken]) -> Vec<&str> {
    list.iter().map(|t| t.as_str()).collect()
}

#[test]
fn scenario_monthly_strips_the_export_prefix_then_matches() {
    let excel = normalize(
        "RRRR=CODE1 CODE2",
        NormalizeOptions {
            strip_modify_prefix: true,
            ..Default::default()
        },
    );
    let tracker = normalize("CODE1 CODE3", NormalizeOptions::default());

    let outcome = compare_monthly(&excel, &tracker);

    assert_eq!(names(&outcome.excel), ["CODE1", "CODE2"]);
    assert_eq!(names(&outcome.matches), ["CODE1"]);
    assert_eq!(names(&outcome.excel_only), ["CODE2"]);
    assert_eq!(names(&outcome.tracker_only), ["CODE3"]);
    assert_eq!(outcome.totals.excel, 2);
    assert_eq!(outcome.totals.tracker, 2);
    assert_eq!(outcome.totals.matched, 1);
    assert_eq!(outcome.totals.excel_only, 1);
    assert_eq!(outcome.totals.tracker_only, 1);
}

#[test]
fn scenario_monthly_with_empty_sources_yields_zero_totals() {
    let empty = normalize("", NormalizeOptions::default());
    let outcome = compare_monthly(&empty, &empty);
    assert_eq!(outcome.totals, Default::default());
    assert!(outcome.matches.is_empty());
}

#[test]
fn scenario_branch_check_partitions_codes_to_check() {
    let known = normalize("*A445FC *A446FC *A457FC", NormalizeOptions::default());
    let to_check = normalize("*A445FC *A999FC *A446FC NEWCODE", NormalizeOptions::default());

    let outcome = check_branch_duplicates(&known, &to_check);

    assert_eq!(names(&outcome.duplicates), ["*A445FC", "*A446FC"]);
    assert_eq!(names(&outcome.unique), ["*A999FC", "NEWCODE"]);
}
