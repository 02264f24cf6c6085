//! wga-export
//!
//! CSV row construction for comparison outcomes. The schema is part of the
//! core's external contract:
//!
//! - Add/Modify: `(Section, Code, Status, Notes)` rows with the statuses
//!   Matched, Missing, Extra, Matrix-Required, Wrong-Reporting-Base,
//!   Re-added, Not-re-added, plus Error/Warning trailer rows.
//! - Monthly: `(Excel Codes, Tracker Codes, Status)` rows.
//!
//! Every cell is quoted and embedded quotes are doubled.

use wga_reconcile::{AddOutcome, ModifyOutcome, MonthlyOutcome};
use wga_validate::{ValidationReport, Violation};

pub const STATUS_MATCHED: &str = "Matched";
pub const STATUS_MISSING: &str = "Missing";
pub const STATUS_EXTRA: &str = "Extra";
pub const STATUS_MATRIX_REQUIRED: &str = "Matrix-Required";
pub const STATUS_WRONG_REPORTING_BASE: &str = "Wrong-Reporting-Base";
pub const STATUS_RE_ADDED: &str = "Re-added";
pub const STATUS_NOT_RE_ADDED: &str = "Not-re-added";

fn row4(section: &str, code: &str, status: &str, notes: &str) -> Vec<String> {
    vec![
        section.to_string(),
        code.to_string(),
        status.to_string(),
        notes.to_string(),
    ]
}

fn push_trailer(rows: &mut Vec<Vec<String>>, validation: &ValidationReport) {
    for message in validation.error_messages() {
        rows.push(row4("Error", "", "", &message));
    }
    for message in validation.warning_messages() {
        rows.push(row4("Warning", "", "", &message));
    }
}

/// Rows for an Add-mode comparison.
pub fn add_rows(outcome: &AddOutcome) -> Vec<Vec<String>> {
    let mut rows = vec![row4("Section", "Code", "Status", "Notes")];

    for code in &outcome.matched {
        rows.push(row4("Requested", code.as_str(), STATUS_MATCHED, "Code was added"));
    }
    for entry in &outcome.missing {
        let notes = if entry.origin.is_foreign() {
            "INS CODE - Not added"
        } else {
            "Not added"
        };
        rows.push(row4("Requested", entry.code.as_str(), STATUS_MISSING, notes));
    }

    for code in &outcome.matched {
        rows.push(row4("Added", code.as_str(), STATUS_MATCHED, "Requested"));
    }
    for code in &outcome.policy_required {
        rows.push(row4("Added", code.as_str(), STATUS_MATRIX_REQUIRED, ""));
    }
    for violation in &outcome.validation.errors {
        if let Violation::WrongReportingBase { required, found } = violation {
            rows.push(row4(
                "Added",
                found.as_str(),
                STATUS_WRONG_REPORTING_BASE,
                &format!("{required} required"),
            ));
        }
    }
    for entry in &outcome.extra {
        rows.push(row4("Added", entry.code.as_str(), STATUS_EXTRA, ""));
    }
    for code in &outcome.unexpected {
        rows.push(row4("Added", code.as_str(), STATUS_EXTRA, ""));
    }

    push_trailer(&mut rows, &outcome.validation);
    rows
}

/// Rows for a Modify-mode comparison.
pub fn modify_rows(outcome: &ModifyOutcome) -> Vec<Vec<String>> {
    let mut rows = vec![row4("Section", "Code", "Status", "Notes")];

    for code in &outcome.re_added {
        rows.push(row4("Deleted", code.as_str(), STATUS_RE_ADDED, ""));
    }
    for code in &outcome.not_re_added {
        rows.push(row4(
            "Deleted",
            code.as_str(),
            STATUS_NOT_RE_ADDED,
            "Verify if intentional",
        ));
    }

    for code in &outcome.requested_satisfied {
        rows.push(row4("Requested", code.as_str(), STATUS_MATCHED, ""));
    }
    for code in &outcome.requested_missing {
        rows.push(row4("Requested", code.as_str(), STATUS_MISSING, "Not added"));
    }

    push_trailer(&mut rows, &outcome.validation);
    rows
}

/// Rows for a Monthly-mode comparison: the two sources zipped side by side.
pub fn monthly_rows(outcome: &MonthlyOutcome) -> Vec<Vec<String>> {
    let mut rows = vec![vec![
        "Excel Codes".to_string(),
        "Tracker Codes".to_string(),
        "Status".to_string(),
    ]];

    let matched = |code: &wga_codes::CodeToken| outcome.matches.contains(code);
    let len = outcome.excel.len().max(outcome.tracker.len());
    for i in 0..len {
        let excel = outcome.excel.get(i);
        let tracker = outcome.tracker.get(i);
        let status = match (excel, tracker) {
            (Some(e), Some(t)) if matched(e) && matched(t) => STATUS_MATCHED,
            (Some(_), None) => "Excel Only",
            (None, Some(_)) => "Tracker Only",
            _ => "",
        };
        rows.push(vec![
            excel.map(|t| t.as_str()).unwrap_or("").to_string(),
            tracker.map(|t| t.as_str()).unwrap_or("").to_string(),
            status.to_string(),
        ]);
    }

    rows
}

/// Assemble rows into CSV text: every cell quoted, quotes doubled.
pub fn to_csv(rows: &[Vec<String>]) -> String {
    rows.iter()
        .map(|row| {
            row.iter()
                .map(|cell| format!("\"{}\"", cell.replace('"', "\"\"")))
                .collect::<Vec<_>>()
                .join(",")
        })
        .collect::<Vec<_>>()
        .join("\n")
}
