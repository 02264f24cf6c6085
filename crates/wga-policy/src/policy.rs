use crate::platform::Platform;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use wga_codes::CodeToken;

/// Required marker pair for one role on one platform.
///
/// `security_context` is absent on platforms that have no such concept
/// (BPS uses a single combined profile marker carried in `function`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerPair {
    pub function: Option<CodeToken>,
    pub security_context: Option<CodeToken>,
}

/// Free-text matrix note with an optional companion token.
///
/// The note is surfaced in validation details; when `companion` is set and
/// absent from the added codes, the note is also raised as a warning. The
/// mapping is data, not validator code.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyNote {
    pub text: String,
    pub companion: Option<CodeToken>,
}

/// RPTS composition rules for one role.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportingPolicy {
    pub notes: Vec<PolicyNote>,
    pub base_required: bool,
    pub region_required: bool,
    /// When pinned, any other base is a wrong-base error, not merely extra.
    pub required_base: Option<CodeToken>,
}

/// Cheque-writing eligibility. Display-only: surfaced in validation details
/// for the operator, never enforced against the token set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChequePolicy {
    pub allowed: bool,
    pub department: Option<String>,
    pub numeric_range: Option<String>,
}

impl ChequePolicy {
    pub fn not_allowed() -> Self {
        Self {
            allowed: false,
            department: None,
            numeric_range: None,
        }
    }

    pub fn branch_default() -> Self {
        Self {
            allowed: true,
            department: Some("B".to_string()),
            numeric_range: Some("069-999".to_string()),
        }
    }
}

/// The nine display-only permission axes, in slot order.
pub const PERMISSION_AXES: [&str; 9] = [
    "Inquiry",
    "Order Entry",
    "Cancel/Correct",
    "Cheque Request",
    "Margin Release",
    "Transfers",
    "Client Maintenance",
    "Commissions",
    "Reports",
];

/// One slot of the permission vector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PermissionLevel {
    Level(u8),
    NotApplicable,
}

impl fmt::Display for PermissionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PermissionLevel::Level(n) => write!(f, "{n}"),
            PermissionLevel::NotApplicable => write!(f, "N/A"),
        }
    }
}

/// Fixed 9-slot permission vector, one slot per [`PERMISSION_AXES`] entry.
/// Display-only, never enforced.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionLevels(pub [PermissionLevel; 9]);

impl PermissionLevels {
    pub fn slots(&self) -> impl Iterator<Item = (&'static str, PermissionLevel)> + '_ {
        PERMISSION_AXES.iter().copied().zip(self.0.iter().copied())
    }
}

/// Immutable access policy for one named role.
///
/// Role names are the join key between operator selection and policy lookup;
/// the registry guarantees exactly one policy per name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolePolicy {
    pub name: String,
    pub allow_branch_bundle: bool,
    /// Required markers per role-matrix platform. Knowledge-base platforms
    /// carry their requirements on the platform descriptor instead.
    pub markers: BTreeMap<Platform, MarkerPair>,
    /// Assumed always satisfied; shown as matrix-required when present.
    pub default_file: CodeToken,
    pub default_margin: CodeToken,
    pub reporting: ReportingPolicy,
    pub cheque_writing: ChequePolicy,
    pub permission_levels: PermissionLevels,
}

impl RolePolicy {
    pub fn marker_pair(&self, platform: Platform) -> MarkerPair {
        self.markers.get(&platform).cloned().unwrap_or_default()
    }
}
