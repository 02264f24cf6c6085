use crate::types::{
    Advisory, MarginPairing, ValidationReport, Violation,
};
use wga_codes::{classify, CodeCategory, CodeToken, TokenSet};
use wga_policy::{Platform, PolicyRegistry, ValidationStrategy};

/// One validation request. `requested` is only consulted by knowledge-base
/// platforms (the requested-vs-added cross-check).
#[derive(Clone, Copy, Debug)]
pub struct ValidationInput<'a> {
    pub added: &'a TokenSet,
    pub requested: Option<&'a TokenSet>,
    pub role: Option<&'a str>,
    pub platform: Platform,
}

/// Evaluate the policy table against a token set.
///
/// Dispatches on the platform's validation strategy. Checks run in a fixed
/// order and push errors as they fire, so the output ordering is part of the
/// contract.
pub fn validate(registry: &PolicyRegistry, input: &ValidationInput) -> ValidationReport {
    match input.platform.descriptor().strategy {
        ValidationStrategy::RoleMatrix { scon_auto_satisfied } => {
            validate_role_matrix(registry, input, scon_auto_satisfied)
        }
        ValidationStrategy::KnowledgeBase {
            required_markers,
            margin_pairing,
        } => validate_knowledge_base(input, required_markers, margin_pairing),
    }
}

fn first_of(added: &TokenSet, category: CodeCategory) -> Option<CodeToken> {
    added.iter().find(|t| classify(t) == category).cloned()
}

fn all_of(added: &TokenSet, category: CodeCategory) -> Vec<CodeToken> {
    added
        .iter()
        .filter(|t| classify(t) == category)
        .cloned()
        .collect()
}

fn validate_role_matrix(
    registry: &PolicyRegistry,
    input: &ValidationInput,
    scon_auto_satisfied: bool,
) -> ValidationReport {
    let Some(role) = input.role else {
        return ValidationReport::default();
    };
    // Unknown role: silent no-op, not an error. Pinned by scenario test.
    let Some(policy) = registry.get(role) else {
        return ValidationReport::default();
    };

    let added = input.added;
    let mut report = ValidationReport::default();
    report.details.cheque_writing = Some(policy.cheque_writing.clone());
    report.details.permission_levels = Some(policy.permission_levels.clone());
    report.details.branch_bundle.allowed = policy.allow_branch_bundle;

    // 1. Required marker pair for this platform.
    let pair = policy.marker_pair(input.platform);
    if let Some(func) = pair.function {
        report.details.markers.required.push(func.clone());
        let func_found = added.contains(&func);
        if func_found {
            report.details.markers.found.push(func);
        } else {
            report.details.markers.missing.push(func.clone());
            report.errors.push(Violation::MissingFunction { marker: func });
        }

        if let Some(scon) = pair.security_context {
            report.details.markers.required.push(scon.clone());
            if added.contains(&scon) {
                report.details.markers.found.push(scon);
            } else if scon_auto_satisfied {
                // Platform has no separate security-context grant to check:
                // correct FUNC implies the context. Recorded, never erred.
                if func_found {
                    report.details.markers.auto_satisfied.push(scon);
                } else {
                    report.details.markers.missing.push(scon);
                }
            } else {
                report.details.markers.missing.push(scon.clone());
                report
                    .errors
                    .push(Violation::MissingSecurityContext { marker: scon });
            }
        }
    }

    // 2. RPTS base composition: exactly one, and the pinned one if pinned.
    let bases = all_of(added, CodeCategory::ReportingBase);
    if bases.len() > 1 {
        report.details.reporting.base = bases.first().cloned();
        report
            .errors
            .push(Violation::DuplicateReportingBase { found: bases });
    } else if let Some(base) = bases.into_iter().next() {
        report.details.reporting.base = Some(base.clone());
        if let Some(required) = &policy.reporting.required_base {
            if *required != base {
                report.details.reporting.wrong_base = Some(base.clone());
                report.errors.push(Violation::WrongReportingBase {
                    required: required.clone(),
                    found: base,
                });
            }
        }
    } else if policy.reporting.base_required {
        report.errors.push(Violation::MissingReportingBase {
            required: policy.reporting.required_base.clone(),
        });
    }

    // 3. RPTS regional composition: exactly one; no pinning concept.
    let regions = all_of(added, CodeCategory::ReportingRegion);
    if regions.len() > 1 {
        report.details.reporting.region = regions.first().cloned();
        report
            .errors
            .push(Violation::DuplicateReportingRegion { found: regions });
    } else if let Some(region) = regions.into_iter().next() {
        report.details.reporting.region = Some(region);
    } else if policy.reporting.region_required {
        report.errors.push(Violation::MissingReportingRegion);
    }

    // 4. Branch-bundle eligibility.
    let bundle = first_of(added, CodeCategory::BranchBundle);
    report.details.branch_bundle.found = bundle.clone();
    if let Some(token) = bundle {
        if !policy.allow_branch_bundle {
            report.errors.push(Violation::BranchBundleNotAllowed {
                role: role.to_string(),
                token,
            });
        }
    }

    // 5. Matrix notes: surfaced in details; warned when the companion code
    //    is absent.
    for note in &policy.reporting.notes {
        report.details.reporting.notes.push(note.text.clone());
        if let Some(companion) = &note.companion {
            if !added.contains(companion) {
                report.warnings.push(Advisory::MatrixNote {
                    text: note.text.clone(),
                });
            }
        }
    }

    report
}

fn validate_knowledge_base(
    input: &ValidationInput,
    required_markers: &'static [&'static str],
    margin_pairing: bool,
) -> ValidationReport {
    let added = input.added;
    let mut report = ValidationReport::default();
    report.details.branch_bundle.allowed = true;
    report.details.branch_bundle.found = first_of(added, CodeCategory::BranchBundle);

    // 1. Platform-required markers, role-independent.
    for marker in required_markers {
        // Registry load validation guarantees these literals are canonical.
        let Some(token) = CodeToken::new(marker) else {
            continue;
        };
        report.details.markers.required.push(token.clone());
        if added.contains(&token) {
            report.details.markers.found.push(token);
        } else {
            report.details.markers.missing.push(token.clone());
            report
                .errors
                .push(Violation::MissingPlatformMarker { marker: token });
        }
    }

    // 2. Branch-to-margin pairing: every bundle *A<nnn>FC needs a bare <nnn>.
    if margin_pairing {
        for token in added.iter() {
            if classify(token) != CodeCategory::BranchBundle {
                continue;
            }
            let Some(margin) = CodeToken::new(&token.as_str()[2..5]) else {
                continue;
            };
            let satisfied = added.contains(&margin);
            report.details.margin_pairs.push(MarginPairing {
                bundle: token.clone(),
                margin: margin.clone(),
                satisfied,
            });
            if !satisfied {
                report.errors.push(Violation::MissingMarginEquivalent {
                    bundle: token.clone(),
                    margin,
                });
            }
        }
    }

    // 3. Requested-vs-added cross-check on generic access codes.
    if let Some(requested) = input.requested {
        for token in requested.iter() {
            if classify(token) == CodeCategory::GenericAccessCode && !added.contains(token) {
                report.errors.push(Violation::RequestedCodeNotAdded {
                    token: token.clone(),
                });
            }
        }
    }

    report
}
