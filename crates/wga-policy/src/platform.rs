use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The four provisioning platforms we validate against.
///
/// A closed set dispatched by exhaustive match — adding a platform is a
/// compile-time-checked extension, not a string comparison chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Platform {
    /// The mainframe entitlement system reached through Reflection sessions.
    Ism,
    /// BPS back-office profiles. One combined profile marker per role; the
    /// platform has no distinct security-context concept.
    Bps,
    /// CROESUS desktop/web. Fixed marker pair, role-independent.
    Croesus,
    /// SIS margin system. Branch bundles must be paired with their bare
    /// 3-digit margin-equivalent code.
    Sis,
}

impl Platform {
    pub const ALL: [Platform; 4] = [Platform::Ism, Platform::Bps, Platform::Croesus, Platform::Sis];

    pub fn key(&self) -> &'static str {
        match self {
            Platform::Ism => "ISM",
            Platform::Bps => "BPS",
            Platform::Croesus => "CROESUS",
            Platform::Sis => "SIS",
        }
    }

    pub fn descriptor(&self) -> PlatformDescriptor {
        match self {
            Platform::Ism => PlatformDescriptor {
                name: "ISM (Reflection)",
                supports_modify: true,
                requires_role: true,
                branch_rewrite: true,
                strategy: ValidationStrategy::RoleMatrix {
                    scon_auto_satisfied: false,
                },
            },
            Platform::Bps => PlatformDescriptor {
                name: "BPS",
                supports_modify: true,
                requires_role: true,
                branch_rewrite: true,
                strategy: ValidationStrategy::RoleMatrix {
                    scon_auto_satisfied: true,
                },
            },
            Platform::Croesus => PlatformDescriptor {
                name: "CROESUS",
                supports_modify: false,
                requires_role: false,
                branch_rewrite: false,
                strategy: ValidationStrategy::KnowledgeBase {
                    required_markers: &["CRWEB", "CRINQ"],
                    margin_pairing: false,
                },
            },
            Platform::Sis => PlatformDescriptor {
                name: "SIS",
                supports_modify: false,
                requires_role: false,
                branch_rewrite: false,
                strategy: ValidationStrategy::KnowledgeBase {
                    required_markers: &["*SISFUNC"],
                    margin_pairing: true,
                },
            },
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Static description of how one platform is validated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlatformDescriptor {
    pub name: &'static str,
    /// Modify-mode comparisons only make sense on platforms where profiles
    /// are deleted and re-added in place.
    pub supports_modify: bool,
    /// Whether a role selection is needed before validation can run.
    pub requires_role: bool,
    /// Whether bare 3-digit codes are rewritten to branch bundles for
    /// branch-code-eligible roles.
    pub branch_rewrite: bool,
    pub strategy: ValidationStrategy,
}

/// Which rule set the validator applies.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ValidationStrategy {
    /// Look the role up in the role matrix and check its marker pair,
    /// reporting composition, and branch-bundle eligibility.
    RoleMatrix {
        /// When set, a missing security-context marker is recorded as
        /// auto-satisfied (not erred) whenever the function marker is
        /// present.
        scon_auto_satisfied: bool,
    },
    /// Role is ignored; the platform's own required markers are checked,
    /// optionally with branch-to-margin pairing.
    KnowledgeBase {
        required_markers: &'static [&'static str],
        margin_pairing: bool,
    },
}

/// Parse error for platform keys coming from the CLI or saved state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownPlatform(pub String);

impl fmt::Display for UnknownPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown platform {:?} (expected ISM, BPS, CROESUS, or SIS)",
            self.0
        )
    }
}

impl std::error::Error for UnknownPlatform {}

impl FromStr for Platform {
    type Err = UnknownPlatform;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ISM" => Ok(Platform::Ism),
            "BPS" => Ok(Platform::Bps),
            "CROESUS" => Ok(Platform::Croesus),
            "SIS" => Ok(Platform::Sis),
            _ => Err(UnknownPlatform(s.to_string())),
        }
    }
}
