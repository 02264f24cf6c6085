use serde::{Deserialize, Serialize};
use std::fmt;
use wga_codes::{CodeOrigin, CodeToken};
use wga_policy::Platform;
use wga_validate::ValidationReport;

/// A code plus its origin annotation, attached to missing/extra entries so
/// the operator can judge whether a gap is ours or the insurance system's.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatedCode {
    pub code: CodeToken,
    pub origin: CodeOrigin,
}

/// Headline counts for the summary strip.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub matched: usize,
    pub missing: usize,
    pub extra: usize,
    pub errors: usize,
}

/// Add-mode result: identity codes matched across the two lists, plus the
/// structural remainder split into policy-required and truly unexpected.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddOutcome {
    pub matched: Vec<CodeToken>,
    pub missing: Vec<AnnotatedCode>,
    /// Identity codes added but never requested.
    pub extra: Vec<AnnotatedCode>,
    /// Structural codes the policy accounts for (markers, reporting codes,
    /// default file).
    pub policy_required: Vec<CodeToken>,
    /// Structural codes nothing in policy accounts for.
    pub unexpected: Vec<CodeToken>,
    pub validation: ValidationReport,
    pub summary: Summary,
}

/// Modify-mode result. Validation runs against the re-added set — that is
/// the profile's final state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModifyOutcome {
    /// Deleted codes that came back.
    pub re_added: Vec<CodeToken>,
    /// Deleted codes that did not come back (warned, never erred).
    pub not_re_added: Vec<CodeToken>,
    /// Re-added codes that were never deleted.
    pub new_codes: Vec<CodeToken>,
    pub requested_satisfied: Vec<CodeToken>,
    pub requested_missing: Vec<CodeToken>,
    pub validation: ValidationReport,
    pub summary: Summary,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyTotals {
    pub excel: usize,
    pub tracker: usize,
    pub matched: usize,
    pub excel_only: usize,
    pub tracker_only: usize,
}

/// Monthly-mode result: pure set comparison between the two export sources.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyOutcome {
    pub excel: Vec<CodeToken>,
    pub tracker: Vec<CodeToken>,
    pub matches: Vec<CodeToken>,
    pub excel_only: Vec<CodeToken>,
    pub tracker_only: Vec<CodeToken>,
    pub totals: MonthlyTotals,
}

/// Branch-duplicate-check result.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchCheckOutcome {
    /// Codes to check that duplicate a known branch code.
    pub duplicates: Vec<CodeToken>,
    /// Codes to check not present in the known branch codes.
    pub unique: Vec<CodeToken>,
}

/// Modify mode was requested on a platform that has no delete/re-add cycle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModifyUnsupported {
    pub platform: Platform,
}

impl fmt::Display for ModifyUnsupported {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "platform {} does not support Modify-mode comparisons",
            self.platform
        )
    }
}

impl std::error::Error for ModifyUnsupported {}
