use wga_codes::{normalize, NormalizeOptions, TokenSet};
use wga_policy::{Platform, PolicyRegistry};
use wga_reconcile::{compare_add, compare_modify, compare_monthly};

fn tokens(raw: &str) -> TokenSet {
    normalize(raw, NormalizeOptions::default())
}

fn find_row<'a>(rows: &'a [Vec<String>], code: &str) -> &'a Vec<String> {
    rows.iter()
        .find(|r| r.len() >= 2 && r[1] == code)
        .unwrap_or_else(|| panic!("no row for {code}"))
}

#[test]
fn scenario_add_rows_cover_the_status_vocabulary() {
    let registry = PolicyRegistry::builtin().unwrap();
    let outcome = compare_add(
        &registry,
        &tokens("AB100 CD200"),
        &tokens("AB100 EXTRA1 *BRMGTFUNC *SBRMGTSCON WGSTD REGB"),
        Some("BA/ABM/BM and Backup"),
        Platform::Ism,
    );
    let rows = wga_export::add_rows(&outcome);

    assert_eq!(rows[0], vec!["Section", "Code", "Status", "Notes"]);
    assert_eq!(find_row(&rows, "AB100")[2], "Matched");
    assert_eq!(find_row(&rows, "CD200")[2], "Missing");
    assert_eq!(find_row(&rows, "EXTRA1")[2], "Extra");
    assert_eq!(find_row(&rows, "*BRMGTFUNC")[2], "Matrix-Required");

    // WGSTD appears exactly once, as the wrong base — never also as
    // Matrix-Required or Extra.
    let wgstd: Vec<&Vec<String>> = rows
        .iter()
        .filter(|r| r.len() >= 2 && r[1] == "WGSTD")
        .collect();
    assert_eq!(wgstd.len(), 1);
    assert_eq!(wgstd[0][2], "Wrong-Reporting-Base");
    assert_eq!(wgstd[0][3], "WGBRANCH required");

    // Trailer rows carry the messages verbatim.
    assert!(rows
        .iter()
        .any(|r| r[0] == "Error" && r[3].contains("WGBRANCH required")));
}

#[test]
fn scenario_add_rows_mark_foreign_missing_codes() {
    let registry = PolicyRegistry::builtin().unwrap();
    let outcome = compare_add(
        &registry,
        &tokens("A15"),
        &tokens("*SAFUNC *SASCON WGSTD REGA"),
        Some("SA PROFILE"),
        Platform::Ism,
    );
    let rows = wga_export::add_rows(&outcome);
    let row = find_row(&rows, "A15");
    assert_eq!(row[2], "Missing");
    assert_eq!(row[3], "INS CODE - Not added");
}

#[test]
fn scenario_modify_rows_cover_re_added_statuses() {
    let registry = PolicyRegistry::builtin().unwrap();
    let outcome = compare_modify(
        &registry,
        &tokens("C4"),
        &tokens("C1 C2 WGBRANCH REGALL"),
        &tokens("C1 C4 WGBRANCH REGALL"),
        Some("BA/ABM/BM ACWS INQUIRY"),
        Platform::Ism,
    )
    .unwrap();
    let rows = wga_export::modify_rows(&outcome);

    assert_eq!(find_row(&rows, "C1")[2], "Re-added");
    let c2 = find_row(&rows, "C2");
    assert_eq!(c2[2], "Not-re-added");
    assert_eq!(c2[3], "Verify if intentional");
    assert_eq!(find_row(&rows, "C4")[2], "Matched");
    assert!(rows
        .iter()
        .any(|r| r[0] == "Warning" && r[3].contains("NOT re-added")));
}

#[test]
fn scenario_monthly_rows_zip_both_sources() {
    let excel = normalize(
        "RRRR=CODE1 CODE2",
        NormalizeOptions {
            strip_modify_prefix: true,
            ..Default::default()
        },
    );
    let tracker = tokens("CODE1 CODE3 CODE4");
    let outcome = compare_monthly(&excel, &tracker);
    let rows = wga_export::monthly_rows(&outcome);

    assert_eq!(rows[0], vec!["Excel Codes", "Tracker Codes", "Status"]);
    assert_eq!(rows[1], vec!["CODE1", "CODE1", "Matched"]);
    assert_eq!(rows[3], vec!["", "CODE4", "Tracker Only"]);
    assert_eq!(rows.len(), 4);
}
