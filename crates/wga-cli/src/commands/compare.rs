use super::{read_input, Session};
use anyhow::{bail, Context, Result};
use serde_json::json;
use std::fs;
use std::path::Path;
use wga_codes::{normalize, CodeToken, NormalizeOptions};
use wga_policy::{Platform, PolicyRegistry};
use wga_reconcile::{
    check_branch_duplicates, compare_add, compare_modify, compare_monthly, AnnotatedCode, Summary,
};
use wga_validate::ValidationReport;

fn join_tokens(tokens: &[CodeToken]) -> String {
    if tokens.is_empty() {
        return "-".to_string();
    }
    tokens
        .iter()
        .map(|t| t.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn join_annotated(entries: &[AnnotatedCode]) -> String {
    if entries.is_empty() {
        return "-".to_string();
    }
    entries
        .iter()
        .map(|entry| match &entry.origin {
            wga_codes::CodeOrigin::Foreign { reason } => {
                format!("{} [INS: {reason}]", entry.code)
            }
            wga_codes::CodeOrigin::Internal => entry.code.to_string(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn print_validation(validation: &ValidationReport) {
    if !validation.errors.is_empty() {
        println!("Errors ({}):", validation.errors.len());
        for error in &validation.errors {
            println!("  - {error}");
        }
    }
    if !validation.warnings.is_empty() {
        println!("Warnings ({}):", validation.warnings.len());
        for warning in &validation.warnings {
            println!("  - {warning}");
        }
    }
}

fn print_summary(session: &Session, summary: &Summary) {
    if session.options.show_summary_stats {
        println!(
            "Summary: matched={} missing={} extra={} errors={}",
            summary.matched, summary.missing, summary.extra, summary.errors
        );
    }
}

fn write_csv(path: &Path, rows: &[Vec<String>]) -> Result<()> {
    fs::write(path, wga_export::to_csv(rows))
        .with_context(|| format!("write CSV {path:?}"))?;
    println!("CSV written to {}", path.display());
    Ok(())
}

fn normalize_options(
    registry: &PolicyRegistry,
    role: Option<&str>,
    platform: Platform,
) -> NormalizeOptions {
    NormalizeOptions {
        strip_modify_prefix: false,
        branch_rewrite: registry.branch_rewrite_applies(role, platform),
    }
}

fn require_role(platform: Platform, role: Option<&str>) -> Result<()> {
    if platform.descriptor().requires_role && role.is_none() {
        bail!("platform {platform} requires --role");
    }
    Ok(())
}

pub fn run_add(
    session: &mut Session,
    registry: &PolicyRegistry,
    platform: Platform,
    role: Option<&str>,
    requested_path: &Path,
    added_path: &Path,
    csv: Option<&Path>,
) -> Result<()> {
    require_role(platform, role)?;
    let opts = normalize_options(registry, role, platform);
    let requested = normalize(&read_input(requested_path)?, opts);
    let added = normalize(&read_input(added_path)?, opts);

    let outcome = compare_add(registry, &requested, &added, role, platform);

    println!("Add comparison on {platform}");
    println!("Matched ({}): {}", outcome.matched.len(), join_tokens(&outcome.matched));
    println!(
        "Missing ({}): {}",
        outcome.missing.len(),
        join_annotated(&outcome.missing)
    );
    println!("Extra ({}): {}", outcome.extra.len(), join_annotated(&outcome.extra));
    println!(
        "Matrix required ({}): {}",
        outcome.policy_required.len(),
        join_tokens(&outcome.policy_required)
    );
    println!(
        "Unexpected ({}): {}",
        outcome.unexpected.len(),
        join_tokens(&outcome.unexpected)
    );
    print_validation(&outcome.validation);
    print_summary(session, &outcome.summary);

    if let Some(path) = csv {
        write_csv(path, &wga_export::add_rows(&outcome))?;
    }

    session.log(
        "compare.add",
        format!(
            "Add comparison completed for {}: {} matched, {} missing",
            role.unwrap_or("(no role)"),
            outcome.summary.matched,
            outcome.summary.missing
        ),
        json!({
            "mode": "Add",
            "platform": platform.key(),
            "role": role,
            "summary": outcome.summary,
        }),
    )
}

#[allow(clippy::too_many_arguments)]
pub fn run_modify(
    session: &mut Session,
    registry: &PolicyRegistry,
    platform: Platform,
    role: Option<&str>,
    requested_path: &Path,
    deleted_path: &Path,
    readded_path: &Path,
    csv: Option<&Path>,
) -> Result<()> {
    require_role(platform, role)?;
    let opts = normalize_options(registry, role, platform);
    let requested = normalize(&read_input(requested_path)?, opts);
    let deleted = normalize(&read_input(deleted_path)?, opts);
    let re_added = normalize(&read_input(readded_path)?, opts);

    let outcome = compare_modify(registry, &requested, &deleted, &re_added, role, platform)?;

    println!("Modify comparison on {platform}");
    println!(
        "Re-added ({}): {}",
        outcome.re_added.len(),
        join_tokens(&outcome.re_added)
    );
    println!(
        "Not re-added ({}): {}",
        outcome.not_re_added.len(),
        join_tokens(&outcome.not_re_added)
    );
    println!(
        "New ({}): {}",
        outcome.new_codes.len(),
        join_tokens(&outcome.new_codes)
    );
    println!(
        "Requested matched ({}): {}",
        outcome.requested_satisfied.len(),
        join_tokens(&outcome.requested_satisfied)
    );
    println!(
        "Requested missing ({}): {}",
        outcome.requested_missing.len(),
        join_tokens(&outcome.requested_missing)
    );
    print_validation(&outcome.validation);
    print_summary(session, &outcome.summary);

    if let Some(path) = csv {
        write_csv(path, &wga_export::modify_rows(&outcome))?;
    }

    session.log(
        "compare.modify",
        format!(
            "Modify comparison completed for {}: {} not re-added",
            role.unwrap_or("(no role)"),
            outcome.summary.missing
        ),
        json!({
            "mode": "Modify",
            "platform": platform.key(),
            "role": role,
            "summary": outcome.summary,
        }),
    )
}

pub fn run_monthly(
    session: &mut Session,
    excel_path: &Path,
    tracker_path: &Path,
    csv: Option<&Path>,
) -> Result<()> {
    let excel = normalize(
        &read_input(excel_path)?,
        NormalizeOptions {
            strip_modify_prefix: true,
            branch_rewrite: false,
        },
    );
    let tracker = normalize(&read_input(tracker_path)?, NormalizeOptions::default());

    let outcome = compare_monthly(&excel, &tracker);

    println!("Monthly comparison");
    println!("Excel codes: {}", outcome.totals.excel);
    println!("Tracker codes: {}", outcome.totals.tracker);
    println!(
        "Matched ({}): {}",
        outcome.matches.len(),
        join_tokens(&outcome.matches)
    );
    println!(
        "Excel only ({}): {}",
        outcome.excel_only.len(),
        join_tokens(&outcome.excel_only)
    );
    println!(
        "Tracker only ({}): {}",
        outcome.tracker_only.len(),
        join_tokens(&outcome.tracker_only)
    );

    if let Some(path) = csv {
        write_csv(path, &wga_export::monthly_rows(&outcome))?;
    }

    session.log(
        "compare.monthly",
        format!(
            "Monthly comparison completed: {} matches found",
            outcome.totals.matched
        ),
        json!({"mode": "Monthly", "totals": outcome.totals}),
    )
}

pub fn run_branch_check(
    session: &mut Session,
    branch_codes_path: &Path,
    check_path: &Path,
) -> Result<()> {
    let known = normalize(&read_input(branch_codes_path)?, NormalizeOptions::default());
    let to_check = normalize(&read_input(check_path)?, NormalizeOptions::default());

    let outcome = check_branch_duplicates(&known, &to_check);

    println!("Branch duplicate check");
    println!(
        "Duplicates ({}): {}",
        outcome.duplicates.len(),
        join_tokens(&outcome.duplicates)
    );
    println!(
        "Unique ({}): {}",
        outcome.unique.len(),
        join_tokens(&outcome.unique)
    );

    session.log(
        "branch-check",
        format!(
            "Branch checker: {} duplicates, {} unique",
            outcome.duplicates.len(),
            outcome.unique.len()
        ),
        json!({
            "mode": "BranchCheck",
            "duplicates": outcome.duplicates.len(),
            "unique": outcome.unique.len(),
        }),
    )
}
