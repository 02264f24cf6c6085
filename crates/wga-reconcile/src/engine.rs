use crate::types::{
    AddOutcome, AnnotatedCode, BranchCheckOutcome, ModifyOutcome, ModifyUnsupported,
    MonthlyOutcome, MonthlyTotals, Summary,
};
use std::collections::BTreeSet;
use wga_codes::{classify, detect_origin, CodeCategory, CodeToken, TokenSet};
use wga_policy::{Platform, PolicyRegistry};
use wga_validate::{validate, Advisory, ValidationInput};

fn annotate(token: &CodeToken) -> AnnotatedCode {
    AnnotatedCode {
        code: token.clone(),
        origin: detect_origin(token),
    }
}

fn identity_codes(set: &TokenSet) -> Vec<CodeToken> {
    set.iter()
        .filter(|t| classify(t).is_identity_bearing())
        .cloned()
        .collect()
}

/// Add-mode comparison: requested codes vs codes actually added.
///
/// Identity-bearing codes are matched across the two sets; structural codes
/// in the added set are split into policy-required and unexpected using the
/// validator's detail record. A token flagged as the wrong reporting base is
/// excluded from both structural buckets — it is already reported once.
pub fn compare_add(
    registry: &PolicyRegistry,
    requested: &TokenSet,
    added: &TokenSet,
    role: Option<&str>,
    platform: Platform,
) -> AddOutcome {
    let validation = validate(
        registry,
        &ValidationInput {
            added,
            requested: Some(requested),
            role,
            platform,
        },
    );

    let requested_identity = identity_codes(requested);
    let added_identity = identity_codes(added);

    let matched: Vec<CodeToken> = requested_identity
        .iter()
        .filter(|t| added.contains(t))
        .cloned()
        .collect();
    let missing: Vec<AnnotatedCode> = requested_identity
        .iter()
        .filter(|t| !added.contains(t))
        .map(annotate)
        .collect();
    let extra: Vec<AnnotatedCode> = added_identity
        .iter()
        .filter(|t| !requested.contains(t))
        .map(annotate)
        .collect();

    // Structural tokens the policy accounts for, per validator details.
    let details = &validation.details;
    let mut accounted: BTreeSet<CodeToken> = details.markers.found.iter().cloned().collect();
    if details.reporting.wrong_base.is_none() {
        if let Some(base) = &details.reporting.base {
            accounted.insert(base.clone());
        }
    }
    if let Some(region) = &details.reporting.region {
        accounted.insert(region.clone());
    }

    let wrong_base = details.reporting.wrong_base.clone();
    let mut policy_required = Vec::new();
    let mut unexpected = Vec::new();
    for token in added.iter() {
        let category = classify(token);
        if category.is_identity_bearing() {
            continue;
        }
        if wrong_base.as_ref() == Some(token) {
            continue;
        }
        if category == CodeCategory::DefaultFile || accounted.contains(token) {
            policy_required.push(token.clone());
        } else {
            unexpected.push(token.clone());
        }
    }

    let summary = Summary {
        matched: matched.len(),
        missing: missing.len(),
        extra: extra.len() + unexpected.len(),
        errors: validation.errors.len(),
    };

    AddOutcome {
        matched,
        missing,
        extra,
        policy_required,
        unexpected,
        validation,
        summary,
    }
}

/// Modify-mode comparison: deleted vs re-added vs requested.
///
/// Only meaningful on platforms whose profiles are deleted and re-added in
/// place; others get a typed refusal. Validation runs against the re-added
/// set, which represents the profile's final state.
pub fn compare_modify(
    registry: &PolicyRegistry,
    requested: &TokenSet,
    deleted: &TokenSet,
    re_added: &TokenSet,
    role: Option<&str>,
    platform: Platform,
) -> Result<ModifyOutcome, ModifyUnsupported> {
    if !platform.descriptor().supports_modify {
        return Err(ModifyUnsupported { platform });
    }

    let mut validation = validate(
        registry,
        &ValidationInput {
            added: re_added,
            requested: None,
            role,
            platform,
        },
    );

    let kept = deleted.intersect(re_added);
    let not_re_added = deleted.minus(re_added);
    let new_codes = re_added.minus(deleted);
    let requested_satisfied = requested.intersect(re_added);
    let requested_missing = requested.minus(re_added);

    if !not_re_added.is_empty() {
        validation.warnings.push(Advisory::NotReadded {
            count: not_re_added.len(),
        });
    }

    let summary = Summary {
        matched: kept.len(),
        missing: not_re_added.len(),
        extra: requested_satisfied.len(),
        errors: validation.errors.len(),
    };

    Ok(ModifyOutcome {
        re_added: kept,
        not_re_added,
        new_codes,
        requested_satisfied,
        requested_missing,
        validation,
        summary,
    })
}

/// Monthly-mode comparison: export source vs tracker source.
///
/// Callers normalize the export source with `strip_modify_prefix`; no role
/// or platform validation applies here.
pub fn compare_monthly(excel: &TokenSet, tracker: &TokenSet) -> MonthlyOutcome {
    let matches = excel.intersect(tracker);
    let excel_only = excel.minus(tracker);
    let tracker_only = tracker.minus(excel);

    let totals = MonthlyTotals {
        excel: excel.len(),
        tracker: tracker.len(),
        matched: matches.len(),
        excel_only: excel_only.len(),
        tracker_only: tracker_only.len(),
    };

    MonthlyOutcome {
        excel: excel.iter().cloned().collect(),
        tracker: tracker.iter().cloned().collect(),
        matches,
        excel_only,
        tracker_only,
        totals,
    }
}

/// Branch-duplicate check: which codes-to-check already exist as branch
/// codes.
pub fn check_branch_duplicates(known: &TokenSet, to_check: &TokenSet) -> BranchCheckOutcome {
    BranchCheckOutcome {
        duplicates: to_check.intersect(known),
        unique: to_check.minus(known),
    }
}
