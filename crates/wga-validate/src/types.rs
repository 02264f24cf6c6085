use serde::{Deserialize, Serialize};
use std::fmt;
use wga_codes::{CodeToken, REPORTING_BASES};
use wga_policy::{ChequePolicy, PermissionLevels};

/// A policy violation. Every rendering names at least one literal token or
/// the role itself, so no error is unattributable.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "kind")]
pub enum Violation {
    MissingFunction {
        marker: CodeToken,
    },
    MissingSecurityContext {
        marker: CodeToken,
    },
    DuplicateReportingBase {
        found: Vec<CodeToken>,
    },
    MissingReportingBase {
        /// Set when the role pins one specific base.
        required: Option<CodeToken>,
    },
    WrongReportingBase {
        required: CodeToken,
        found: CodeToken,
    },
    DuplicateReportingRegion {
        found: Vec<CodeToken>,
    },
    MissingReportingRegion,
    BranchBundleNotAllowed {
        role: String,
        token: CodeToken,
    },
    MissingPlatformMarker {
        marker: CodeToken,
    },
    MissingMarginEquivalent {
        bundle: CodeToken,
        margin: CodeToken,
    },
    RequestedCodeNotAdded {
        token: CodeToken,
    },
}

fn join(tokens: &[CodeToken]) -> String {
    tokens
        .iter()
        .map(|t| t.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::MissingFunction { marker } => {
                write!(f, "Missing required FUNC: {marker}")
            }
            Violation::MissingSecurityContext { marker } => {
                write!(f, "Missing required SCON: {marker}")
            }
            Violation::DuplicateReportingBase { found } => {
                write!(f, "Multiple base RPTS codes found ({})", join(found))
            }
            Violation::MissingReportingBase { required: Some(base) } => {
                write!(f, "Missing base RPTS code: {base} is required")
            }
            Violation::MissingReportingBase { required: None } => {
                write!(
                    f,
                    "Missing base RPTS code (need {})",
                    REPORTING_BASES.join(", ")
                )
            }
            Violation::WrongReportingBase { required, found } => {
                write!(f, "Wrong base RPTS code: {found} found, {required} required")
            }
            Violation::DuplicateReportingRegion { found } => {
                write!(f, "Multiple regional RPTS codes found ({})", join(found))
            }
            Violation::MissingReportingRegion => {
                write!(f, "Missing regional RPTS code (need REGA-REGF or REGALL)")
            }
            Violation::BranchBundleNotAllowed { role, token } => {
                write!(f, "Role \"{role}\" cannot have branch bundles ({token} present)")
            }
            Violation::MissingPlatformMarker { marker } => {
                write!(f, "Missing required platform code: {marker}")
            }
            Violation::MissingMarginEquivalent { bundle, margin } => {
                write!(f, "Branch bundle {bundle} has no matching margin code {margin}")
            }
            Violation::RequestedCodeNotAdded { token } => {
                write!(f, "Requested code {token} was not added")
            }
        }
    }
}

/// Advisory conditions. Never block or alter pass/fail; always additive.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "kind")]
pub enum Advisory {
    /// A matrix note whose companion code is absent from the added set.
    MatrixNote { text: String },
    /// Modify mode: codes deleted but never re-added.
    NotReadded { count: usize },
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Advisory::MatrixNote { text } => write!(f, "Matrix note: {text}"),
            Advisory::NotReadded { count } => {
                write!(f, "{count} code(s) deleted but NOT re-added (verify if intentional)")
            }
        }
    }
}

/// Which required markers were found, missing, or auto-satisfied.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerDetails {
    pub required: Vec<CodeToken>,
    pub found: Vec<CodeToken>,
    pub missing: Vec<CodeToken>,
    /// Security-context markers recorded as satisfied by the platform when
    /// the paired function marker is present.
    pub auto_satisfied: Vec<CodeToken>,
}

/// Which RPTS codes were found, and whether the base was the wrong one.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportingDetails {
    pub base: Option<CodeToken>,
    pub region: Option<CodeToken>,
    /// The base token that was present but did not match the pinned one.
    /// Downstream, this token must not also be counted as policy-required
    /// or extra.
    pub wrong_base: Option<CodeToken>,
    pub notes: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchBundleDetails {
    pub allowed: bool,
    pub found: Option<CodeToken>,
}

/// One branch-bundle / margin-equivalent pairing on the SIS platform.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarginPairing {
    pub bundle: CodeToken,
    pub margin: CodeToken,
    pub satisfied: bool,
}

/// Structured record of what the validator saw, for display and for the
/// reconciliation engine's policy-required partition.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationDetails {
    pub markers: MarkerDetails,
    pub reporting: ReportingDetails,
    pub branch_bundle: BranchBundleDetails,
    pub margin_pairs: Vec<MarginPairing>,
    pub cheque_writing: Option<ChequePolicy>,
    pub permission_levels: Option<PermissionLevels>,
}

/// Full validation outcome. Produced fresh per call, never persisted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub errors: Vec<Violation>,
    pub warnings: Vec<Advisory>,
    pub details: ValidationDetails,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(|e| e.to_string()).collect()
    }

    pub fn warning_messages(&self) -> Vec<String> {
        self.warnings.iter().map(|w| w.to_string()).collect()
    }
}
